//! Booking routes.

use axum::extract::State;
use axum::http::header::{self, HeaderName};
use axum::http::StatusCode;
use axum::Json;
use bookings::status::next_statuses;
use bookings::validation::validate_new_booking;
use bookings::{Booking, BookingStatus, NewBooking, StatusUpdate};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{AdminError, Result};
use crate::extract::{AppJson, AppPath};
use crate::state::AppState;

/// Response to a booking submission.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedBooking {
    pub tracking_id: String,
    pub booking: Booking,
}

/// A booking with the statuses it may move to next.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingDetail {
    #[serde(flatten)]
    pub booking: Booking,
    pub next_statuses: Vec<BookingStatus>,
}

/// Diagnostic update body.
#[derive(Deserialize)]
pub struct DiagnosticsRequest {
    #[serde(default)]
    pub notes: Option<String>,
    /// Image data (usually data URLs).
    #[serde(default)]
    pub images: Option<Vec<String>>,
}

/// Result of an image cleanup.
#[derive(Serialize)]
pub struct Removed {
    pub removed: usize,
}

/// Result of an import.
#[derive(Serialize)]
pub struct Added {
    pub added: usize,
}

fn not_found(id: &str) -> AdminError {
    AdminError::NotFound(format!("No booking with tracking id {}", id))
}

/// Submit a booking from the booking form.
pub async fn create_booking(
    State(state): State<AppState>,
    AppJson(new): AppJson<NewBooking>,
) -> Result<(StatusCode, Json<CreatedBooking>)> {
    validate_new_booking(&new)?;
    let booking = state.store.save(new).await?;
    info!(tracking_id = %booking.tracking_id, "Booking submitted");

    Ok((
        StatusCode::CREATED,
        Json(CreatedBooking {
            tracking_id: booking.tracking_id.clone(),
            booking,
        }),
    ))
}

/// List every booking.
pub async fn list_bookings(State(state): State<AppState>) -> Result<Json<Vec<Booking>>> {
    Ok(Json(state.store.get_all().await?))
}

/// Look up a booking by tracking id.
pub async fn get_booking(
    State(state): State<AppState>,
    AppPath(id): AppPath<String>,
) -> Result<Json<BookingDetail>> {
    let booking = state
        .store
        .get_by_tracking_id(&id)
        .await?
        .ok_or_else(|| not_found(&id))?;

    Ok(Json(BookingDetail {
        next_statuses: next_statuses(booking.status),
        booking,
    }))
}

/// Move a booking to a new status and merge optional fields.
pub async fn update_status(
    State(state): State<AppState>,
    AppPath(id): AppPath<String>,
    AppJson(update): AppJson<StatusUpdate>,
) -> Result<Json<Booking>> {
    if !state.store.update_status(&id, update).await? {
        return Err(not_found(&id));
    }
    let booking = state
        .store
        .get_by_tracking_id(&id)
        .await?
        .ok_or_else(|| not_found(&id))?;
    Ok(Json(booking))
}

/// Replace diagnostic notes and images.
pub async fn update_diagnostics(
    State(state): State<AppState>,
    AppPath(id): AppPath<String>,
    AppJson(req): AppJson<DiagnosticsRequest>,
) -> Result<Json<Booking>> {
    if !state
        .store
        .update_diagnostics(&id, req.notes, req.images)
        .await?
    {
        return Err(not_found(&id));
    }
    let booking = state
        .store
        .get_by_tracking_id(&id)
        .await?
        .ok_or_else(|| not_found(&id))?;
    Ok(Json(booking))
}

/// Prune expired diagnostic images.
pub async fn cleanup_images(State(state): State<AppState>) -> Result<Json<Removed>> {
    let removed = state.store.cleanup_old_images().await?;
    Ok(Json(Removed { removed }))
}

/// Full backup as a `{lastUpdated, bookings}` envelope.
pub async fn backup(
    State(state): State<AppState>,
) -> Result<([(HeaderName, &'static str); 1], String)> {
    let body = state.store.export_data().await?;
    Ok(([(header::CONTENT_TYPE, "application/json")], body))
}

/// Merge bookings from a backup; existing tracking ids are kept.
pub async fn import(State(state): State<AppState>, body: String) -> Result<Json<Added>> {
    let added = state.store.import_data(&body).await?;
    info!(added, "Bookings imported");
    Ok(Json(Added { added }))
}
