//! Popularity rankings and time-of-day / day-of-week histograms.
//!
//! All rankings sort by count descending. Ties keep first-encounter order,
//! which makes the output deterministic for a given booking order.

use std::hash::Hash;

use bookings::{Booking, BookingStatus};
use chrono::{Datelike, Timelike, Weekday};
use indexmap::IndexMap;
use serde::Serialize;

use crate::percent;

/// A named bucket with its share of the collection.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedCount {
    pub name: String,
    pub count: usize,
    pub percentage: f64,
}

/// Bookings in one status.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusCount {
    pub status: BookingStatus,
    pub count: usize,
    pub percentage: f64,
}

/// Bookings created during one hour of the day (UTC).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HourCount {
    pub hour: u32,
    pub count: usize,
}

/// Bookings created on one day of the week (UTC).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayCount {
    pub day: String,
    pub count: usize,
}

/// Group by `key`, then sort descending by count with ties in encounter order.
fn count_by<K, F>(bookings: &[&Booking], key: F) -> Vec<(K, usize)>
where
    K: Hash + Eq,
    F: Fn(&Booking) -> K,
{
    let mut counts: IndexMap<K, usize> = IndexMap::new();
    for booking in bookings {
        *counts.entry(key(*booking)).or_default() += 1;
    }

    let mut ranked: Vec<(K, usize)> = counts.into_iter().collect();
    // sort_by is stable
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked
}

fn ranked_names<F>(bookings: &[&Booking], field: F) -> Vec<RankedCount>
where
    F: Fn(&Booking) -> &str,
{
    let total = bookings.len();
    count_by(bookings, |b| {
        let name = field(b).trim();
        if name.is_empty() {
            "Unspecified".to_string()
        } else {
            name.to_string()
        }
    })
    .into_iter()
    .map(|(name, count)| RankedCount {
        name,
        count,
        percentage: percent(count, total),
    })
    .collect()
}

pub(crate) fn popular_devices(bookings: &[&Booking]) -> Vec<RankedCount> {
    ranked_names(bookings, |b| b.device_type.as_str())
}

pub(crate) fn popular_services(bookings: &[&Booking]) -> Vec<RankedCount> {
    ranked_names(bookings, |b| b.service_type.as_str())
}

pub(crate) fn status_distribution(bookings: &[&Booking]) -> Vec<StatusCount> {
    let total = bookings.len();
    BookingStatus::ALL
        .into_iter()
        .map(|status| {
            let count = bookings.iter().filter(|b| b.status == status).count();
            StatusCount {
                status,
                count,
                percentage: percent(count, total),
            }
        })
        .collect()
}

pub(crate) fn busy_hours(bookings: &[&Booking]) -> Vec<HourCount> {
    count_by(bookings, |b| b.created_at.hour())
        .into_iter()
        .map(|(hour, count)| HourCount { hour, count })
        .collect()
}

pub(crate) fn busy_days(bookings: &[&Booking]) -> Vec<DayCount> {
    count_by(bookings, |b| b.created_at.weekday())
        .into_iter()
        .map(|(day, count)| DayCount {
            day: day_name(day).to_string(),
            count,
        })
        .collect()
}

fn day_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}
