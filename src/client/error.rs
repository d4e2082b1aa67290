//! Typed failures of a catalog API call.

use serde::Deserialize;
use thiserror::Error;

/// Why a fetch failed. Every variant carries a message fit for showing to the operator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// The server rejected the request payload (400)
    #[error("{0}")]
    Validation(String),
    /// The addressed product does not exist (404)
    #[error("{0}")]
    NotFound(String),
    /// No response was received (connection refused, DNS, reset)
    #[error("{0}")]
    Network(String),
    /// Any other status, or a body that could not be decoded
    #[error("{0}")]
    Unknown(String),
}

impl FetchError {
    /// The displayable message.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Validation(message)
            | Self::NotFound(message)
            | Self::Network(message)
            | Self::Unknown(message) => message,
        }
    }

    /// Classifies a non-success response.
    ///
    /// The message is the body's `message`, else its `error`, else a generic text naming
    /// the status. Bodies that are not JSON objects fall through to the generic text.
    pub(crate) fn from_response(status: u16, body: &[u8]) -> Self {
        #[derive(Deserialize)]
        struct ErrorResponse {
            message: Option<String>,
            error: Option<String>,
        }

        let message = serde_json::from_slice::<ErrorResponse>(body)
            .ok()
            .and_then(|parsed| parsed.message.or(parsed.error))
            .unwrap_or_else(|| format!("Request failed with status {status}"));

        match status {
            400 => Self::Validation(message),
            404 => Self::NotFound(message),
            _ => Self::Unknown(message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_classification() {
        let body = br#"{"message":"\"Price\" is required"}"#;
        assert_eq!(
            FetchError::from_response(400, body),
            FetchError::Validation("\"Price\" is required".to_string())
        );

        let body = br#"{"message":"product not found"}"#;
        assert_eq!(
            FetchError::from_response(404, body),
            FetchError::NotFound("product not found".to_string())
        );

        let body = br#"{"error":"Internal server error"}"#;
        assert_eq!(
            FetchError::from_response(500, body),
            FetchError::Unknown("Internal server error".to_string())
        );
    }

    #[test]
    fn test_unstructured_body_falls_back() {
        let error = FetchError::from_response(502, b"<html>Bad Gateway</html>");
        assert_eq!(error.message(), "Request failed with status 502");

        let error = FetchError::from_response(404, b"");
        assert!(matches!(error, FetchError::NotFound(_)));
    }
}
