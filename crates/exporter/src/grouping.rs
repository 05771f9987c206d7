//! Grouping bookings with per-group revenue summaries.

use std::fmt;
use std::str::FromStr;

use bookings::Booking;
use indexmap::IndexMap;
use serde::Serialize;

use crate::error::ExportError;

/// How to group bookings in an export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupBy {
    Status,
    Service,
    Month,
}

impl GroupBy {
    pub fn as_str(&self) -> &'static str {
        match self {
            GroupBy::Status => "status",
            GroupBy::Service => "service",
            GroupBy::Month => "month",
        }
    }

    fn key_for(&self, booking: &Booking) -> String {
        match self {
            GroupBy::Status => booking.status.to_string(),
            GroupBy::Service => booking.service_type.trim().to_string(),
            GroupBy::Month => booking.created_at.format("%Y-%m").to_string(),
        }
    }
}

impl fmt::Display for GroupBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GroupBy {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "status" => Ok(GroupBy::Status),
            "service" | "servicetype" => Ok(GroupBy::Service),
            "month" => Ok(GroupBy::Month),
            _ => Err(ExportError::UnknownGroupBy(s.to_string())),
        }
    }
}

/// Count and revenue of one group.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupSummary {
    pub count: usize,
    pub total_revenue: f64,
    /// Total revenue divided by the number of bookings in the group.
    pub average_revenue: f64,
}

/// Bookings sharing one group key.
#[derive(Debug, Clone, PartialEq)]
pub struct BookingGroup<'a> {
    pub key: String,
    pub summary: GroupSummary,
    pub bookings: Vec<&'a Booking>,
}

/// Group bookings by `group_by`, in first-encounter order of the keys.
pub fn group_bookings(bookings: &[Booking], group_by: GroupBy) -> Vec<BookingGroup<'_>> {
    let mut groups: IndexMap<String, Vec<&Booking>> = IndexMap::new();
    for booking in bookings {
        groups
            .entry(group_by.key_for(booking))
            .or_default()
            .push(booking);
    }

    groups
        .into_iter()
        .map(|(key, members)| {
            let total_revenue: f64 = members.iter().filter_map(|b| b.billed_cost()).sum();
            let count = members.len();
            BookingGroup {
                key,
                summary: GroupSummary {
                    count,
                    total_revenue,
                    average_revenue: if count == 0 {
                        0.0
                    } else {
                        total_revenue / count as f64
                    },
                },
                bookings: members,
            }
        })
        .collect()
}
