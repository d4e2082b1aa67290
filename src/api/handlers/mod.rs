//! HTTP handlers for the catalog API.

/// Product CRUD endpoints
pub mod products;

use axum::Json;
use serde_json::{Value, json};

/// Liveness probe; does not touch the database.
pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
