//! Core business logic - framework-agnostic product operations and payload validation.

/// Product CRUD operations
pub mod product;
/// Request payload validation
pub mod validation;
