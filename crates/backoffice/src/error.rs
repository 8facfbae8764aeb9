//! Error types for the backoffice library.

use reqwest::StatusCode;
use thiserror::Error;

/// Main error type for backoffice operations.
#[derive(Debug, Error)]
pub enum BackofficeError {
    /// Transport-level failure (connection refused, timeout, TLS, ...).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server rejected the bearer token. The stored session has already
    /// been discarded when this is returned.
    #[error("Session expired or invalid; log in again")]
    Unauthorized,

    /// Login was refused.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// The server answered with a non-success status.
    #[error("Failed to {operation} ({status})")]
    Status {
        operation: &'static str,
        status: StatusCode,
    },

    /// A row or table could not be found locally.
    #[error("Not found: {0}")]
    NotFound(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Reading or writing the session file failed.
    #[error("Persistence error: {0}")]
    Persistence(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl BackofficeError {
    /// Returns true if this error means the operator must log in again.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, BackofficeError::Unauthorized)
    }
}

/// Result type alias for backoffice operations.
pub type Result<T> = std::result::Result<T, BackofficeError>;
