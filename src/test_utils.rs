//! Shared test utilities for the product catalog.
//!
//! This module provides common helper functions for setting up test databases,
//! routers and live servers, and for creating test products with sensible defaults.

use crate::{
    api::{self, ApiState},
    config::{ResponseStyle, cors::CorsConfig},
    core::product::{self, ProductPayload},
    entities,
    errors::Result,
};
use axum::Router;
use sea_orm::DatabaseConnection;
use std::net::SocketAddr;
use tracing_subscriber::EnvFilter;

/// Routes `tracing` output through the test harness; safe to call from every test.
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
        )
        .with_test_writer()
        .try_init();
}

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// A valid payload with the given name.
///
/// # Defaults
/// * `description`: "Test description"
/// * `price`: 50.0
/// * `stock`: 10
/// * `category`: "soda"
pub fn sample_payload(name: &str) -> ProductPayload {
    ProductPayload {
        name: name.to_string(),
        description: "Test description".to_string(),
        price: 50.0,
        stock: 10,
        category: "soda".to_string(),
    }
}

/// Creates a test product with sensible defaults (see [`sample_payload`]).
pub async fn create_test_product(
    db: &DatabaseConnection,
    name: &str,
) -> Result<entities::product::Model> {
    product::create_product(db, sample_payload(name)).await
}

/// Sets up a router over a fresh in-memory database with the default CORS origins.
/// Returns (router, db) so tests can seed or inspect data directly.
pub async fn setup_test_app(style: ResponseStyle) -> Result<(Router, DatabaseConnection)> {
    init_test_tracing();
    let db = setup_test_db().await?;
    let app = api::router(ApiState::new(db.clone(), style), &CorsConfig::default());
    Ok((app, db))
}

/// Serves a fresh test app on an ephemeral local port.
/// Returns (address, db); the server runs until the test runtime shuts down.
pub async fn spawn_test_server(style: ResponseStyle) -> Result<(SocketAddr, DatabaseConnection)> {
    let (app, db) = setup_test_app(style).await?;
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            tracing::error!("Test server stopped: {}", e);
        }
    });

    Ok((addr, db))
}
