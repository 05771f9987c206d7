//! Booking status transition table.

use crate::error::{Result, StoreError};
use crate::models::BookingStatus;

/// Allowed forward moves. Re-applying the current status is always allowed.
const TRANSITIONS: &[(BookingStatus, BookingStatus)] = &[
    (BookingStatus::Received, BookingStatus::Diagnosed),
    (BookingStatus::Diagnosed, BookingStatus::InProgress),
    (BookingStatus::InProgress, BookingStatus::Completed),
    (BookingStatus::InProgress, BookingStatus::ReadyForPickup),
    (BookingStatus::Completed, BookingStatus::ReadyForPickup),
];

/// Whether `from -> to` is permitted.
pub fn can_transition(from: BookingStatus, to: BookingStatus) -> bool {
    from == to || TRANSITIONS.contains(&(from, to))
}

/// Statuses reachable from `from` in one step (excluding `from` itself).
pub fn next_statuses(from: BookingStatus) -> Vec<BookingStatus> {
    TRANSITIONS
        .iter()
        .filter(|(src, _)| *src == from)
        .map(|(_, dst)| *dst)
        .collect()
}

/// Check a transition, returning a typed error when it is not permitted.
pub fn check_transition(from: BookingStatus, to: BookingStatus) -> Result<()> {
    if can_transition(from, to) {
        Ok(())
    } else {
        Err(StoreError::IllegalTransition { from, to })
    }
}
