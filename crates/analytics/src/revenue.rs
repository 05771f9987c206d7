//! Revenue figures and trailing-window growth.

use bookings::Booking;
use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use crate::ratio;

/// Revenue over one trailing window compared to the window before it.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RevenueWindow {
    pub current: f64,
    pub previous: f64,
    /// Percent change from `previous` to `current`; 0 when `previous` is 0.
    pub growth_percent: f64,
}

/// Revenue figures for a booking collection.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RevenueMetrics {
    pub total: f64,
    /// Bookings with a positive cost.
    pub paid_bookings: usize,
    pub average_order_value: f64,
    pub daily: RevenueWindow,
    pub weekly: RevenueWindow,
    pub monthly: RevenueWindow,
}

pub(crate) fn revenue_metrics(bookings: &[&Booking], now: DateTime<Utc>) -> RevenueMetrics {
    let paid: Vec<(DateTime<Utc>, f64)> = bookings
        .iter()
        .filter_map(|b| b.billed_cost().map(|cost| (b.created_at, cost)))
        .collect();

    let total: f64 = paid.iter().map(|(_, cost)| cost).sum();

    RevenueMetrics {
        total,
        paid_bookings: paid.len(),
        average_order_value: ratio(total, paid.len() as f64),
        daily: window(&paid, now, Duration::days(1)),
        weekly: window(&paid, now, Duration::days(7)),
        monthly: window(&paid, now, Duration::days(30)),
    }
}

fn window(paid: &[(DateTime<Utc>, f64)], now: DateTime<Utc>, len: Duration) -> RevenueWindow {
    let current_start = now - len;
    let previous_start = current_start - len;

    let sum_between = |from: DateTime<Utc>, to: DateTime<Utc>| -> f64 {
        paid.iter()
            .filter(|(at, _)| *at > from && *at <= to)
            .map(|(_, cost)| cost)
            .sum()
    };

    let current = sum_between(current_start, now);
    let previous = sum_between(previous_start, current_start);

    RevenueWindow {
        current,
        previous,
        growth_percent: growth(current, previous),
    }
}

/// Percent growth from `previous` to `current`, 0 when there is no baseline.
pub fn growth(current: f64, previous: f64) -> f64 {
    if previous > 0.0 {
        (current - previous) / previous * 100.0
    } else {
        0.0
    }
}
