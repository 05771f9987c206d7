//! Error types for the admin web interface.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use bookings::{StoreError, ValidationError};
use exporter::ExportError;
use issue_cms::CmsError;
use thiserror::Error;

/// Errors that can occur in the admin web interface.
#[derive(Debug, Error)]
pub enum AdminError {
    /// Booking store error.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Booking form failed validation.
    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// Export request could not be served.
    #[error("Export error: {0}")]
    Export(#[from] ExportError),

    /// Blog backend error.
    #[error("Blog error: {0}")]
    Cms(#[from] CmsError),

    /// The blog is not configured on this server.
    #[error("Blog is not configured")]
    BlogDisabled,

    /// Resource not found.
    #[error("{0}")]
    NotFound(String),

    /// Malformed request.
    #[error("{0}")]
    BadRequest(String),

    /// Request body is not the expected JSON.
    #[error("{0}")]
    InvalidBody(#[from] JsonRejection),

    /// Path parameter could not be parsed.
    #[error("{0}")]
    InvalidPath(#[from] PathRejection),

    /// Query string could not be parsed.
    #[error("{0}")]
    InvalidQuery(#[from] QueryRejection),
}

impl AdminError {
    fn status(&self) -> StatusCode {
        match self {
            AdminError::Store(StoreError::AlreadyExists { .. })
            | AdminError::Store(StoreError::IllegalTransition { .. }) => StatusCode::CONFLICT,
            AdminError::Store(StoreError::Json(_)) => StatusCode::BAD_REQUEST,
            AdminError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AdminError::Validation(_) | AdminError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AdminError::Export(ExportError::Json(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            AdminError::Export(_) => StatusCode::BAD_REQUEST,
            AdminError::Cms(CmsError::NotFound(_)) => StatusCode::NOT_FOUND,
            AdminError::Cms(CmsError::ReadOnly) => StatusCode::FORBIDDEN,
            AdminError::Cms(CmsError::InvalidInput(_)) => StatusCode::BAD_REQUEST,
            AdminError::Cms(CmsError::Storage(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            AdminError::Cms(_) => StatusCode::BAD_GATEWAY,
            AdminError::BlogDisabled | AdminError::NotFound(_) => StatusCode::NOT_FOUND,
            AdminError::InvalidBody(rejection) => rejection.status(),
            AdminError::InvalidPath(rejection) => rejection.status(),
            AdminError::InvalidQuery(rejection) => rejection.status(),
        }
    }
}

impl IntoResponse for AdminError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("{}", self);
        } else {
            tracing::debug!(status = status.as_u16(), "Request rejected: {}", self);
        }

        let body = serde_json::json!({
            "error": self.to_string()
        });

        (status, Json(body)).into_response()
    }
}

/// Result type for admin operations.
pub type Result<T> = std::result::Result<T, AdminError>;
