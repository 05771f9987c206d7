//! Export formatting for bookings and analytics.
//!
//! Produces the CSV and JSON artifacts offered for download from the admin
//! pages, plus the filename they are saved under.

mod csv_format;
mod error;
mod fields;
mod grouping;
mod json_format;

pub use csv_format::{analytics_to_csv, bookings_to_csv, escape_cell};
pub use error::{ExportError, Result};
pub use fields::{parse_field_list, ExportField, CSV_DATE_FORMAT};
pub use grouping::{group_bookings, BookingGroup, GroupBy, GroupSummary};
pub use json_format::{analytics_to_json, bookings_to_json, ExportInfo, ExportOptions};

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, SecondsFormat, Utc};

/// Output format of an export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    #[default]
    Csv,
    Json,
}

impl ExportFormat {
    /// File extension without the dot.
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }

    /// MIME type for the download response.
    pub fn content_type(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "text/csv; charset=utf-8",
            ExportFormat::Json => "application/json",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "json" => Ok(ExportFormat::Json),
            _ => Err(ExportError::UnknownFormat(s.to_string())),
        }
    }
}

/// Download filename such as `bookings-2026-10-18T12-00-00Z.csv`.
pub fn export_filename(prefix: &str, format: ExportFormat, now: DateTime<Utc>) -> String {
    let stamp = now
        .to_rfc3339_opts(SecondsFormat::Secs, true)
        .replace([':', '.'], "-");
    format!("{}-{}.{}", prefix, stamp, format.extension())
}
