//! State of the product management screen: listing, search and the three dialogs.
//!
//! The view is driven by [`CatalogEvent`]s. Whenever a dialog finishes a successful submit
//! it closes and [`CatalogView::apply`] asks the caller to reload the listing.

use super::modal::{ModalEvent, ModalState};
use crate::client::{FetchError, FetchState, products::ProductList};
use crate::entities::ProductModel;
use uuid::Uuid;

/// Progress of the product listing.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ListingStatus {
    /// Nothing requested yet
    #[default]
    Idle,
    /// A listing call is running
    Loading,
    /// Products are up to date
    Loaded,
    /// The last listing call failed with this message
    Failed(String),
}

/// The screen's three dialogs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialog {
    /// New product form
    Create,
    /// Form pre-filled with the selected product
    Edit,
    /// Product details, where deletion is confirmed
    Detail,
}

/// Inputs to [`CatalogView::apply`].
#[derive(Debug, Clone, PartialEq)]
pub enum CatalogEvent {
    /// A listing call started
    LoadStarted,
    /// A listing call returned
    Loaded(ProductList),
    /// A listing call failed
    LoadFailed(FetchError),
    /// The search box changed
    SearchChanged(String),
    /// "Add product" was pressed
    CreateRequested,
    /// Edit was pressed on a product
    EditRequested(Uuid),
    /// A product was opened for viewing
    DetailRequested(Uuid),
    /// Lifecycle event for one dialog
    Dialog(Dialog, ModalEvent),
}

/// Follow-up work the caller must perform after an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Reload the product listing
    RefreshProducts,
}

/// Everything the product screen renders from.
#[derive(Debug, Clone, Default)]
pub struct CatalogView {
    products: Vec<ProductModel>,
    search_term: String,
    listing: ListingStatus,
    create: ModalState,
    edit: ModalState,
    detail: ModalState,
    selected: Option<Uuid>,
}

impl CatalogView {
    /// An empty screen with every dialog closed.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies one event and returns the command it triggers, if any.
    pub fn apply(&mut self, event: CatalogEvent) -> Option<Command> {
        match event {
            CatalogEvent::LoadStarted => self.listing = ListingStatus::Loading,
            CatalogEvent::Loaded(list) => {
                self.products = list.into_products();
                self.listing = ListingStatus::Loaded;
            }
            CatalogEvent::LoadFailed(error) => {
                self.listing = ListingStatus::Failed(error.message().to_string());
            }
            CatalogEvent::SearchChanged(term) => self.search_term = term,
            CatalogEvent::CreateRequested => {
                return self.apply(CatalogEvent::Dialog(Dialog::Create, ModalEvent::OpenRequested));
            }
            CatalogEvent::EditRequested(id) => {
                self.selected = Some(id);
                return self.apply(CatalogEvent::Dialog(Dialog::Edit, ModalEvent::OpenRequested));
            }
            CatalogEvent::DetailRequested(id) => {
                self.selected = Some(id);
                return self.apply(CatalogEvent::Dialog(Dialog::Detail, ModalEvent::OpenRequested));
            }
            CatalogEvent::Dialog(dialog, modal_event) => {
                let succeeded = modal_event == ModalEvent::SubmitSucceeded;
                let modal = self.modal_mut(dialog);
                let was_submitting = *modal == ModalState::Submitting;
                *modal = std::mem::take(modal).transition(modal_event);

                if succeeded && was_submitting {
                    return Some(Command::RefreshProducts);
                }
            }
        }
        None
    }

    /// Mirrors a listing fetcher's state into the view.
    pub fn sync_listing(&mut self, state: &FetchState<ProductList>) {
        if state.is_loading {
            self.listing = ListingStatus::Loading;
        } else if let Some(error) = &state.error {
            self.listing = ListingStatus::Failed(error.message().to_string());
        } else if let Some(list) = &state.result {
            self.products = list.clone().into_products();
            self.listing = ListingStatus::Loaded;
        }
    }

    /// Products whose name contains the search term, ignoring case.
    #[must_use]
    pub fn visible_products(&self) -> Vec<&ProductModel> {
        let needle = self.search_term.to_lowercase();
        self.products
            .iter()
            .filter(|product| product.name.to_lowercase().contains(&needle))
            .collect()
    }

    /// Progress of the listing.
    #[must_use]
    pub fn listing(&self) -> &ListingStatus {
        &self.listing
    }

    /// Current search box text.
    #[must_use]
    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    /// State of one dialog.
    #[must_use]
    pub fn modal(&self, dialog: Dialog) -> &ModalState {
        match dialog {
            Dialog::Create => &self.create,
            Dialog::Edit => &self.edit,
            Dialog::Detail => &self.detail,
        }
    }

    /// Product targeted by the edit or detail dialog.
    #[must_use]
    pub fn selected(&self) -> Option<&ProductModel> {
        let id = self.selected?;
        self.products.iter().find(|product| product.id == id)
    }

    fn modal_mut(&mut self, dialog: Dialog) -> &mut ModalState {
        match dialog {
            Dialog::Create => &mut self.create,
            Dialog::Edit => &mut self.edit,
            Dialog::Detail => &mut self.detail,
        }
    }
}
