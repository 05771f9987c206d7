//! Extractors whose rejections render as `{error}` JSON.

use axum::extract::FromRequest;
use axum::extract::FromRequestParts;

use crate::error::AdminError;

/// JSON request body.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AdminError))]
pub struct AppJson<T>(pub T);

/// Path parameters.
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AdminError))]
pub struct AppPath<T>(pub T);

/// Query string.
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(AdminError))]
pub struct AppQuery<T>(pub T);
