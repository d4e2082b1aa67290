//! Product entity - Represents an item in the catalog.
//!
//! Each product carries a name, description, unit price, stock count and a free-form
//! category. Serialized with the field names the catalog frontend expects
//! (`_id`, `createdAt`, `updatedAt`).

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Product database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "products")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    /// Unique identifier, assigned on creation and never changed
    #[sea_orm(primary_key, auto_increment = false)]
    #[serde(rename = "_id", alias = "id")]
    pub id: Uuid,
    /// Display name (e.g., "Cola")
    pub name: String,
    /// Free text shown on the product detail view
    pub description: String,
    /// Unit price
    pub price: f64,
    /// Units on hand
    pub stock: i64,
    /// Category label; the UI offers soda/juice/water/energy but any text is stored
    pub category: String,
    /// When the product was created
    pub created_at: DateTimeUtc,
    /// When the product was last modified
    pub updated_at: DateTimeUtc,
}

/// Products have no relations
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
