//! Product business logic - Handles all catalog product operations.
//!
//! This module provides the five catalog operations (list, get, create, update, delete)
//! over the `products` table. Validation of incoming request bodies happens in
//! [`crate::core::validation`]; functions here accept an already-validated
//! [`ProductPayload`]. All functions are async and return Result types for error handling.

use crate::{
    entities::{Product, product},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, prelude::*};
use serde::{Deserialize, Serialize};

/// The writable fields of a product, as submitted by create and update requests.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProductPayload {
    /// Display name
    pub name: String,
    /// Free text description
    pub description: String,
    /// Unit price
    pub price: f64,
    /// Units on hand
    pub stock: i64,
    /// Category label
    pub category: String,
}

/// Parses a product id taken from a request path.
///
/// # Errors
/// Returns [`Error::InvalidId`] if `id` is not a UUID.
pub fn parse_product_id(id: &str) -> Result<Uuid> {
    Uuid::parse_str(id).map_err(|_| Error::InvalidId { id: id.to_string() })
}

/// Retrieves every product in the catalog, oldest first.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn get_all_products(db: &DatabaseConnection) -> Result<Vec<product::Model>> {
    Product::find()
        .order_by_asc(product::Column::CreatedAt)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves a specific product by its id, returning None if no such product exists.
///
/// # Errors
/// Returns an error if the id is malformed or the database query fails.
pub async fn get_product_by_id(db: &DatabaseConnection, id: &str) -> Result<Option<product::Model>> {
    let product_id = parse_product_id(id)?;

    Product::find_by_id(product_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Creates a new product from a validated payload.
///
/// The id is generated here and both timestamps are set to the current time.
///
/// # Errors
/// Returns an error if the database insert fails.
pub async fn create_product(
    db: &DatabaseConnection,
    payload: ProductPayload,
) -> Result<product::Model> {
    let now = chrono::Utc::now();

    let product = product::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(payload.name),
        description: Set(payload.description),
        price: Set(payload.price),
        stock: Set(payload.stock),
        category: Set(payload.category),
        created_at: Set(now),
        updated_at: Set(now),
    };
    product.insert(db).await.map_err(Into::into)
}

/// Replaces the writable fields of an existing product and refreshes its update timestamp.
///
/// The new `updated_at` is never earlier than the stored one, even if the clock moved back.
///
/// # Errors
/// Returns an error if:
/// - The id is malformed
/// - The product does not exist
/// - The database update fails
pub async fn update_product(
    db: &DatabaseConnection,
    id: &str,
    payload: ProductPayload,
) -> Result<product::Model> {
    let product_id = parse_product_id(id)?;

    let existing = Product::find_by_id(product_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::ProductNotFound { id: id.to_string() })?;

    let updated_at = chrono::Utc::now().max(existing.updated_at);
    let mut product: product::ActiveModel = existing.into();

    product.name = Set(payload.name);
    product.description = Set(payload.description);
    product.price = Set(payload.price);
    product.stock = Set(payload.stock);
    product.category = Set(payload.category);
    product.updated_at = Set(updated_at);

    product.update(db).await.map_err(Into::into)
}

/// Permanently removes a product.
///
/// # Errors
/// Returns an error if:
/// - The id is malformed
/// - No product with this id exists
/// - The database delete fails
pub async fn delete_product(db: &DatabaseConnection, id: &str) -> Result<()> {
    let product_id = parse_product_id(id)?;

    let outcome = Product::delete_by_id(product_id).exec(db).await?;
    if outcome.rows_affected == 0 {
        return Err(Error::ProductNotFound { id: id.to_string() });
    }

    Ok(())
}
