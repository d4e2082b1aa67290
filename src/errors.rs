//! Unified error type for the catalog service and its configuration layer.
//!
//! HTTP status mapping lives in [`crate::api::response`]; client-side failures use
//! [`crate::client::FetchError`] instead.

use thiserror::Error;

/// Errors produced by configuration, persistence, and product business logic.
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid or unreadable configuration
    #[error("Configuration error: {message}")]
    Config {
        /// What was wrong with the configuration
        message: String,
    },

    /// Failure reported by the database layer
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// A product payload failed validation; the message names the first failing field
    #[error("{message}")]
    Validation {
        /// Validation message, e.g. `"Price" must be a number`
        message: String,
    },

    /// No product exists with the given id
    #[error("product not found")]
    ProductNotFound {
        /// The id that was looked up
        id: String,
    },

    /// The id is not a well-formed product identifier
    #[error("Invalid product id: {id}")]
    InvalidId {
        /// The rejected id
        id: String,
    },

    /// I/O failure (binding the listener, reading files)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A required environment variable was unusable
    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),
}

impl Error {
    /// Shorthand for a validation failure with the given message.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Shorthand for a configuration failure with the given message.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
