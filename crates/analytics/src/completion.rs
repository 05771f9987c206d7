//! Completion rate and turnaround time.

use bookings::Booking;
use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use crate::range::start_of_day;
use crate::{percent, ratio};

/// How many bookings are finished and how long they took.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionMetrics {
    /// Bookings that are `completed` or `ready-for-pickup`.
    pub completed: usize,
    pub completion_rate: f64,
    /// Mean of `estimatedCompletion - createdAt` in days over `measured` bookings.
    pub average_completion_days: f64,
    /// Finished bookings with a parseable `estimatedCompletion`.
    pub measured: usize,
}

pub(crate) fn completion_metrics(bookings: &[&Booking]) -> CompletionMetrics {
    let finished: Vec<&Booking> = bookings
        .iter()
        .copied()
        .filter(|b| b.status.is_finished())
        .collect();

    let durations: Vec<f64> = finished
        .iter()
        .filter_map(|b| {
            let done = b.estimated_completion.as_deref().and_then(parse_completion)?;
            Some((done - b.created_at).num_seconds() as f64 / 86_400.0)
        })
        .collect();

    CompletionMetrics {
        completed: finished.len(),
        completion_rate: percent(finished.len(), bookings.len()),
        average_completion_days: ratio(durations.iter().sum(), durations.len() as f64),
        measured: durations.len(),
    }
}

/// Parse an `estimatedCompletion` value: RFC 3339 or `YYYY-MM-DD`.
pub fn parse_completion(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(instant) = DateTime::parse_from_rfc3339(value) {
        return Some(instant.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .map(start_of_day)
}
