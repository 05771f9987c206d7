//! Analytics over repair bookings.
//!
//! [`compute`] turns a booking collection into an [`AnalyticsSnapshot`]. It is
//! a pure function: the reference time is passed in, nothing is cached, and
//! the snapshot is never persisted. Every ratio is guarded, so an empty
//! collection yields zeros and empty lists rather than NaN.
//!
//! # Example
//!
//! ```rust
//! use analytics::{compute, DateRange};
//! use chrono::Utc;
//!
//! let now = Utc::now();
//! let snapshot = compute(&[], Some(DateRange::last_days(30, now)), now);
//! assert_eq!(snapshot.total_bookings, 0);
//! assert_eq!(snapshot.revenue.average_order_value, 0.0);
//! ```

mod completion;
mod customers;
mod range;
mod ranking;
mod revenue;
mod trends;

pub use completion::{parse_completion, CompletionMetrics};
pub use customers::CustomerMetrics;
pub use range::DateRange;
pub use ranking::{DayCount, HourCount, RankedCount, StatusCount};
pub use revenue::{growth, RevenueMetrics, RevenueWindow};
pub use trends::{TrendPoint, DAILY_TREND_DAYS, MONTHLY_TREND_MONTHS};

use bookings::Booking;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Derived view over a booking collection at one point in time.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsSnapshot {
    pub generated_at: DateTime<Utc>,
    pub range: Option<DateRange>,
    pub total_bookings: usize,
    pub revenue: RevenueMetrics,
    pub customers: CustomerMetrics,
    pub popular_devices: Vec<RankedCount>,
    pub popular_services: Vec<RankedCount>,
    pub status_distribution: Vec<StatusCount>,
    pub completion: CompletionMetrics,
    pub busy_hours: Vec<HourCount>,
    pub busy_days: Vec<DayCount>,
    pub daily_trend: Vec<TrendPoint>,
    pub monthly_trend: Vec<TrendPoint>,
}

/// Compute a snapshot over `bookings`, optionally restricted to those created
/// inside `range`.
pub fn compute(
    bookings: &[Booking],
    range: Option<DateRange>,
    now: DateTime<Utc>,
) -> AnalyticsSnapshot {
    let selected: Vec<&Booking> = bookings
        .iter()
        .filter(|b| range.map_or(true, |r| r.contains(b.created_at)))
        .collect();

    AnalyticsSnapshot {
        generated_at: now,
        range,
        total_bookings: selected.len(),
        revenue: revenue::revenue_metrics(&selected, now),
        customers: customers::customer_metrics(&selected),
        popular_devices: ranking::popular_devices(&selected),
        popular_services: ranking::popular_services(&selected),
        status_distribution: ranking::status_distribution(&selected),
        completion: completion::completion_metrics(&selected),
        busy_hours: ranking::busy_hours(&selected),
        busy_days: ranking::busy_days(&selected),
        daily_trend: trends::daily_trend(&selected, now),
        monthly_trend: trends::monthly_trend(&selected, now),
    }
}

/// `part / whole`, or 0 when `whole` is 0.
pub(crate) fn ratio(part: f64, whole: f64) -> f64 {
    if whole == 0.0 {
        0.0
    } else {
        part / whole
    }
}

/// `part / whole` as a percentage, or 0 when `whole` is 0.
pub(crate) fn percent(part: usize, whole: usize) -> f64 {
    ratio(part as f64 * 100.0, whole as f64)
}
