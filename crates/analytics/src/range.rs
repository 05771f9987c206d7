//! Date range filters.

use chrono::{DateTime, Datelike, Duration, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// Inclusive range over booking creation times.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl DateRange {
    /// Create a range, swapping the bounds if given in reverse.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        if start <= end {
            Self { start, end }
        } else {
            Self { start: end, end: start }
        }
    }

    /// Whole calendar days from `from` through `to`.
    ///
    /// A `to` on the last representable day ends at [`DateTime::MAX_UTC`].
    pub fn from_dates(from: NaiveDate, to: NaiveDate) -> Self {
        let start = start_of_day(from);
        let end = start_of_day(to)
            .checked_add_signed(Duration::days(1) - Duration::milliseconds(1))
            .unwrap_or(DateTime::<Utc>::MAX_UTC);
        Self::new(start, end)
    }

    /// From midnight today until `now`.
    pub fn today(now: DateTime<Utc>) -> Self {
        Self::new(start_of_day(now.date_naive()), now)
    }

    /// The trailing `days` days ending at `now`, clamped at the earliest
    /// representable instant.
    pub fn last_days(days: i64, now: DateTime<Utc>) -> Self {
        let start = Duration::try_days(days)
            .and_then(|span| now.checked_sub_signed(span))
            .unwrap_or(DateTime::<Utc>::MIN_UTC);
        Self::new(start, now)
    }

    /// From the first of the current month until `now`.
    pub fn this_month(now: DateTime<Utc>) -> Self {
        let first = now.date_naive().with_day(1).unwrap_or(now.date_naive());
        Self::new(start_of_day(first), now)
    }

    /// From January 1st of the current year until `now`.
    pub fn this_year(now: DateTime<Utc>) -> Self {
        let first = NaiveDate::from_ymd_opt(now.year(), 1, 1).unwrap_or(now.date_naive());
        Self::new(start_of_day(first), now)
    }

    /// Whether `instant` falls inside the range.
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.start <= instant && instant <= self.end
    }
}

pub(crate) fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
    Utc.from_utc_datetime(&date.and_time(chrono::NaiveTime::MIN))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 18, 15, 45, 0).unwrap()
    }

    #[test]
    fn test_reversed_bounds_are_swapped() {
        let a = now();
        let b = a - Duration::days(2);
        let range = DateRange::new(a, b);
        assert_eq!(range.start, b);
        assert_eq!(range.end, a);
    }

    #[test]
    fn test_presets() {
        let today = DateRange::today(now());
        assert_eq!(today.start, Utc.with_ymd_and_hms(2026, 10, 18, 0, 0, 0).unwrap());

        let month = DateRange::this_month(now());
        assert_eq!(month.start, Utc.with_ymd_and_hms(2026, 10, 1, 0, 0, 0).unwrap());

        let year = DateRange::this_year(now());
        assert_eq!(year.start, Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap());

        let week = DateRange::last_days(7, now());
        assert!(week.contains(now() - Duration::days(7)));
        assert!(!week.contains(now() - Duration::days(8)));
    }

    #[test]
    fn test_from_dates_covers_whole_days() {
        let range = DateRange::from_dates(
            NaiveDate::from_ymd_opt(2026, 10, 1).unwrap(),
            NaiveDate::from_ymd_opt(2026, 10, 2).unwrap(),
        );
        assert!(range.contains(Utc.with_ymd_and_hms(2026, 10, 2, 23, 59, 59).unwrap()));
        assert!(!range.contains(Utc.with_ymd_and_hms(2026, 10, 3, 0, 0, 0).unwrap()));
    }

    #[test]
    fn test_extreme_bounds_saturate() {
        let range = DateRange::from_dates(NaiveDate::MAX, NaiveDate::MAX);
        assert_eq!(range.end, DateTime::<Utc>::MAX_UTC);
        assert!(range.contains(DateTime::<Utc>::MAX_UTC));

        let range = DateRange::last_days(i64::MAX, now());
        assert_eq!(range.start, DateTime::<Utc>::MIN_UTC);
        assert_eq!(range.end, now());
    }
}
