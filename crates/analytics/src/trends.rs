//! Zero-filled daily and monthly trend series.

use bookings::Booking;
use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};
use indexmap::IndexMap;
use serde::Serialize;

/// Days in the daily series.
pub const DAILY_TREND_DAYS: i64 = 30;

/// Months in the monthly series.
pub const MONTHLY_TREND_MONTHS: u32 = 12;

/// Bookings and revenue for one period.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendPoint {
    /// `YYYY-MM-DD` for days, `YYYY-MM` for months.
    pub period: String,
    pub bookings: usize,
    pub revenue: f64,
}

fn series(
    periods: Vec<String>,
    bookings: &[&Booking],
    label: impl Fn(&Booking) -> String,
) -> Vec<TrendPoint> {
    let mut buckets: IndexMap<String, TrendPoint> = periods
        .into_iter()
        .map(|period| {
            (
                period.clone(),
                TrendPoint {
                    period,
                    bookings: 0,
                    revenue: 0.0,
                },
            )
        })
        .collect();

    for booking in bookings {
        if let Some(point) = buckets.get_mut(&label(*booking)) {
            point.bookings += 1;
            point.revenue += booking.billed_cost().unwrap_or(0.0);
        }
    }

    buckets.into_values().collect()
}

/// The last [`DAILY_TREND_DAYS`] days ending today, oldest first.
pub(crate) fn daily_trend(bookings: &[&Booking], now: DateTime<Utc>) -> Vec<TrendPoint> {
    let today = now.date_naive();
    let periods = (0..DAILY_TREND_DAYS)
        .rev()
        .map(|offset| day_label(today - Duration::days(offset)))
        .collect();

    series(periods, bookings, |b| day_label(b.created_at.date_naive()))
}

/// The last [`MONTHLY_TREND_MONTHS`] months ending this month, oldest first.
pub(crate) fn monthly_trend(bookings: &[&Booking], now: DateTime<Utc>) -> Vec<TrendPoint> {
    let periods = (0..MONTHLY_TREND_MONTHS)
        .rev()
        .map(|offset| {
            let (year, month) = months_back(now.year(), now.month(), offset);
            month_label(year, month)
        })
        .collect();

    series(periods, bookings, |b| {
        month_label(b.created_at.year(), b.created_at.month())
    })
}

fn day_label(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

fn month_label(year: i32, month: u32) -> String {
    format!("{:04}-{:02}", year, month)
}

/// Step back `offset` months from `(year, month)`; months are 1-based.
fn months_back(year: i32, month: u32, offset: u32) -> (i32, u32) {
    let index = year * 12 + (month as i32 - 1) - offset as i32;
    (index.div_euclid(12), index.rem_euclid(12) as u32 + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_months_back_wraps_years() {
        assert_eq!(months_back(2026, 10, 0), (2026, 10));
        assert_eq!(months_back(2026, 10, 9), (2026, 1));
        assert_eq!(months_back(2026, 10, 10), (2025, 12));
        assert_eq!(months_back(2026, 1, 13), (2024, 12));
    }
}
