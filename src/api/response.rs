//! Response bodies and the mapping from [`Error`] to HTTP responses.
//!
//! Every endpoint answers with the resource itself, a `{"message": ...}` object, or a
//! `{"error": ...}` object. Message texts are compared literally by the catalog frontend,
//! so they must not change.

use crate::errors::Error;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

/// Legacy answer for an empty catalog
pub const NO_PRODUCTS: &str = "no products available";
/// Answer for an unknown product id
pub const PRODUCT_NOT_FOUND: &str = "product not found";
/// Answer for a successful create
pub const PRODUCT_CREATED: &str = "product created successfully";
/// Answer for a successful update
pub const PRODUCT_UPDATED: &str = "Product updated successfully";
/// Answer for a successful delete; the spelling is what the frontend compares against
pub const PRODUCT_DELETED: &str = "product deleted succesfully";
/// Body text of every 500 response
pub const INTERNAL_ERROR: &str = "Internal server error";

/// `{"message": ...}` body used for outcomes and client errors
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageBody {
    /// Human-readable outcome
    pub message: String,
}

impl MessageBody {
    /// Wraps `message` in a body.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// `{"error": ...}` body used for server failures
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Always [`INTERNAL_ERROR`]
    pub error: String,
}

/// Builds a `{message}` response with the given status.
pub fn message(status: StatusCode, text: impl Into<String>) -> Response {
    (status, Json(MessageBody::new(text))).into_response()
}

/// An [`Error`] raised while serving one catalog operation.
///
/// The operation name is only used for the server log; callers get either the
/// validation/not-found message or an opaque 500.
#[derive(Debug)]
pub struct ApiError {
    operation: &'static str,
    source: Error,
}

impl ApiError {
    /// Tags `source` with the operation that raised it.
    pub const fn new(operation: &'static str, source: Error) -> Self {
        Self { operation, source }
    }

    /// Adapter for `map_err`: tags an error with the operation that raised it.
    pub fn during(operation: &'static str) -> impl FnOnce(Error) -> Self {
        move |source| Self::new(operation, source)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self.source {
            Error::Validation { message: text } => message(StatusCode::BAD_REQUEST, text),
            Error::ProductNotFound { id } => {
                tracing::debug!(product_id = %id, "{}: product not found", self.operation);
                message(StatusCode::NOT_FOUND, PRODUCT_NOT_FOUND)
            }
            other => {
                tracing::error!(error = %other, "{}", self.operation);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorBody {
                        error: INTERNAL_ERROR.to_string(),
                    }),
                )
                    .into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use axum::body::to_bytes;
    use serde_json::{Value, json};

    async fn render(error: ApiError) -> (StatusCode, Value) {
        let response = error.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_validation_maps_to_bad_request() {
        let (status, body) = render(ApiError::new(
            "Error in creating product",
            Error::validation("\"Price\" is required"),
        ))
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "message": "\"Price\" is required" }));
    }

    #[tokio::test]
    async fn test_not_found_maps_to_404() {
        let (status, body) = render(ApiError::new(
            "Error in deleting product",
            Error::ProductNotFound { id: "x".to_string() },
        ))
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({ "message": "product not found" }));
    }

    #[tokio::test]
    async fn test_internal_errors_do_not_leak_details() {
        let (status, body) = render(ApiError::new(
            "Error in getting product",
            Error::Database(sea_orm::DbErr::Custom("disk on fire".to_string())),
        ))
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({ "error": "Internal server error" }));

        let (status, _) = render(ApiError::new(
            "Error in getting product",
            Error::InvalidId { id: "abc".to_string() },
        ))
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }
}
