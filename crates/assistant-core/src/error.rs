//! Error types for assistant operations.

use thiserror::Error;

/// Errors that can occur while generating or parsing an assistant answer.
#[derive(Debug, Error)]
pub enum AssistantError {
    /// Configuration error (missing API key, bad client setup).
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The request never reached the endpoint or the connection failed.
    #[error("network error: {0}")]
    Network(String),

    /// The endpoint answered with a non-success status.
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// The completion did not have the expected shape.
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// The generator is not available.
    #[error("generator unavailable: {0}")]
    Unavailable(String),
}
