//! API layer - HTTP interface for the product catalog
//!
//! This module exposes the catalog over JSON/HTTP with axum: route table, handlers,
//! response envelopes, and the CORS policy applied to browser callers.

/// Request handlers
pub mod handlers;
/// Response bodies and error-to-status mapping
pub mod response;

use crate::config::{ResponseStyle, cors::CorsConfig};
use axum::{
    Router,
    http::{HeaderValue, Method, header},
    routing::{get, post},
};
use sea_orm::DatabaseConnection;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};
use tracing::warn;

/// Shared data available to all handlers.
#[derive(Clone)]
pub struct ApiState {
    /// Database connection for all product operations
    pub database: DatabaseConnection,
    /// How read endpoints report "nothing found"
    pub response_style: ResponseStyle,
}

impl ApiState {
    /// Creates the handler state from a database connection and response style.
    #[must_use]
    pub const fn new(database: DatabaseConnection, response_style: ResponseStyle) -> Self {
        Self {
            database,
            response_style,
        }
    }
}

/// Builds the CORS layer from the origin allow-list.
///
/// Origins that are not valid header values are skipped with a warning. Credentials are
/// allowed, so the list is always explicit and never a wildcard.
#[must_use]
pub fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| {
            HeaderValue::from_str(origin)
                .inspect_err(|e| warn!("Ignoring invalid CORS origin '{}': {}", origin, e))
                .ok()
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_credentials(true)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE])
}

/// Builds the full application router.
pub fn router(state: ApiState, cors: &CorsConfig) -> Router {
    Router::new()
        .route("/api/health", get(handlers::health))
        .route("/api/products", get(handlers::products::list_products))
        .route("/api/products/add", post(handlers::products::create_product))
        .route(
            "/api/products/:id",
            get(handlers::products::get_product)
                .put(handlers::products::update_product)
                .delete(handlers::products::delete_product),
        )
        .layer(cors_layer(cors))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::setup_test_app;
    use axum::{body::Body, http::Request};
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_allowed_origin_gets_cors_headers() {
        let (app, _db) = setup_test_app(ResponseStyle::Legacy).await.unwrap();

        let request = Request::builder()
            .uri("/api/health")
            .header(header::ORIGIN, "http://localhost:5173")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();

        let headers = response.headers();
        assert_eq!(
            headers.get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
            "http://localhost:5173"
        );
        assert_eq!(
            headers.get(header::ACCESS_CONTROL_ALLOW_CREDENTIALS).unwrap(),
            "true"
        );
    }

    #[tokio::test]
    async fn test_unlisted_origin_gets_no_cors_headers() {
        let (app, _db) = setup_test_app(ResponseStyle::Legacy).await.unwrap();

        let request = Request::builder()
            .uri("/api/health")
            .header(header::ORIGIN, "https://evil.example.com")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert!(
            response
                .headers()
                .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
                .is_none()
        );
    }

    #[tokio::test]
    async fn test_preflight_from_allowed_origin() {
        let (app, _db) = setup_test_app(ResponseStyle::Legacy).await.unwrap();

        let request = Request::builder()
            .method(Method::OPTIONS)
            .uri("/api/products/add")
            .header(header::ORIGIN, "http://localhost:5173")
            .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
            .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert!(response.status().is_success());
        assert_eq!(
            response
                .headers()
                .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
                .unwrap(),
            "http://localhost:5173"
        );
    }

    #[test]
    fn test_invalid_origins_are_skipped() {
        let config = CorsConfig {
            allowed_origins: vec!["http://ok.example".to_string(), "bad\norigin".to_string()],
        };
        // Building the layer must not panic on the invalid entry
        let _layer = cors_layer(&config);
    }
}
