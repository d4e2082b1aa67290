//! Requests and response shapes for the product endpoints.

use super::FetchRequest;
use crate::{api::response::MessageBody, core::product::ProductPayload, entities::ProductModel};
use serde::Deserialize;
use serde_json::json;
use std::fmt::Display;

/// Body of `GET /products`: the products, or a message when the catalog is empty.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ProductList {
    /// The catalog, oldest first
    Products(Vec<ProductModel>),
    /// The catalog is empty
    Message(MessageBody),
}

impl ProductList {
    /// The listed products; a message response means there are none.
    #[must_use]
    pub fn into_products(self) -> Vec<ProductModel> {
        match self {
            Self::Products(products) => products,
            Self::Message(_) => Vec::new(),
        }
    }
}

/// Body of `GET /products/:id`: the product, or a message when it does not exist.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ProductLookup {
    /// The product exists
    Found(Box<ProductModel>),
    /// No product has this id
    Missing(MessageBody),
}

impl ProductLookup {
    /// The product, if it was found.
    #[must_use]
    pub fn into_product(self) -> Option<ProductModel> {
        match self {
            Self::Found(product) => Some(*product),
            Self::Missing(_) => None,
        }
    }
}

/// Lists every product; decode as [`ProductList`].
#[must_use]
pub fn list() -> FetchRequest {
    FetchRequest::get("/products")
}

/// Looks up one product; decode as [`ProductLookup`].
pub fn get(id: impl Display) -> FetchRequest {
    FetchRequest::get(format!("/products/{id}"))
}

/// Creates a product; decode as [`MessageBody`].
#[must_use]
pub fn create(payload: &ProductPayload) -> FetchRequest {
    FetchRequest::post("/products/add").with_body(json!({ "data": payload }))
}

/// Replaces a product's fields; decode as [`MessageBody`].
pub fn update(id: impl Display, payload: &ProductPayload) -> FetchRequest {
    FetchRequest::put(format!("/products/{id}")).with_body(json!({ "data": payload }))
}

/// Deletes a product; decode as [`MessageBody`].
pub fn delete(id: impl Display) -> FetchRequest {
    FetchRequest::delete(format!("/products/{id}"))
}
