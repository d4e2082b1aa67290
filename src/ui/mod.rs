//! Presentation state for the product management screen.
//!
//! Rendering is left to the embedding frontend; these types hold what it renders from and
//! encode the rules for moving between states.

pub mod catalog;
pub mod form;
pub mod modal;

pub use catalog::{CatalogEvent, CatalogView, Command, Dialog, ListingStatus};
pub use form::{Category, FormError, FormField, ProductForm};
pub use modal::{ModalEvent, ModalState};
