//! Export error types.

use thiserror::Error;

/// Errors that can occur while building an export.
#[derive(Debug, Error)]
pub enum ExportError {
    /// JSON serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A requested field name is not exportable.
    #[error("unknown export field: {0}")]
    UnknownField(String),

    /// A requested grouping is not supported.
    #[error("unknown grouping: {0}")]
    UnknownGroupBy(String),

    /// A requested format is not supported.
    #[error("unknown export format: {0}")]
    UnknownFormat(String),
}

/// Result type for export operations.
pub type Result<T> = std::result::Result<T, ExportError>;
