//! CMS error types.

use thiserror::Error;

/// Errors that can occur while talking to the content backend.
#[derive(Debug, Error)]
pub enum CmsError {
    /// Configuration error (missing repository, bad client setup).
    #[error("configuration error: {0}")]
    Configuration(String),

    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend answered with a non-success status.
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Vote ledger persistence failed.
    #[error("storage error: {0}")]
    Storage(#[from] bookings::StoreError),

    /// A write was attempted without credentials.
    #[error("provider is read-only; set a token to enable writes")]
    ReadOnly,

    /// The post does not exist.
    #[error("post not found: {0}")]
    NotFound(u64),

    /// The submitted content was rejected before sending.
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

/// Result type for CMS operations.
pub type Result<T> = std::result::Result<T, CmsError>;
