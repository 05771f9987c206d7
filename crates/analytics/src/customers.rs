//! Customer counts keyed by email.

use bookings::Booking;
use indexmap::IndexMap;
use serde::Serialize;

use crate::percent;

/// New vs. returning customer figures.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerMetrics {
    pub total: usize,
    /// Customers with exactly one booking.
    pub new: usize,
    /// Customers with more than one booking.
    pub returning: usize,
    /// `returning / total` as a percentage.
    pub retention_rate: f64,
}

pub(crate) fn customer_metrics(bookings: &[&Booking]) -> CustomerMetrics {
    let mut per_customer: IndexMap<String, usize> = IndexMap::new();
    for booking in bookings {
        *per_customer.entry(booking.customer_key()).or_default() += 1;
    }

    let total = per_customer.len();
    let new = per_customer.values().filter(|&&count| count == 1).count();
    let returning = total - new;

    CustomerMetrics {
        total,
        new,
        returning,
        retention_rate: percent(returning, total),
    }
}
