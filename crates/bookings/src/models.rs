//! Booking models.
//!
//! Field names serialize in camelCase so the persisted JSON matches what the
//! booking forms and admin pages exchange.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle status of a repair booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BookingStatus {
    Received,
    Diagnosed,
    InProgress,
    Completed,
    ReadyForPickup,
}

impl BookingStatus {
    /// All statuses in lifecycle order.
    pub const ALL: [BookingStatus; 5] = [
        BookingStatus::Received,
        BookingStatus::Diagnosed,
        BookingStatus::InProgress,
        BookingStatus::Completed,
        BookingStatus::ReadyForPickup,
    ];

    /// Wire name (e.g. `"in-progress"`).
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Received => "received",
            BookingStatus::Diagnosed => "diagnosed",
            BookingStatus::InProgress => "in-progress",
            BookingStatus::Completed => "completed",
            BookingStatus::ReadyForPickup => "ready-for-pickup",
        }
    }

    /// Whether the repair work is finished.
    pub fn is_finished(&self) -> bool {
        matches!(self, BookingStatus::Completed | BookingStatus::ReadyForPickup)
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown status name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownStatus(pub String);

impl fmt::Display for UnknownStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown booking status: {}", self.0)
    }
}

impl std::error::Error for UnknownStatus {}

impl FromStr for BookingStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace(['_', ' '], "-");
        BookingStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == normalized)
            .ok_or_else(|| UnknownStatus(s.to_string()))
    }
}

/// When a diagnostic image was uploaded.
///
/// Current records carry epoch milliseconds. Older records stored a
/// free-form string, which is kept as-is and never expires.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UploadedAt {
    /// Milliseconds since the Unix epoch.
    Millis(i64),
    /// Legacy free-form timestamp.
    Legacy(String),
}

impl UploadedAt {
    /// Stamp for the given instant.
    pub fn at(instant: DateTime<Utc>) -> Self {
        UploadedAt::Millis(instant.timestamp_millis())
    }
}

/// A diagnostic photo attached to a booking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagnosticImage {
    /// Image bytes encoded as text (usually a data URL).
    pub data: String,
    /// Upload time.
    pub uploaded_at: UploadedAt,
}

/// One customer repair request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    /// Human-shareable unique identifier.
    pub tracking_id: String,
    pub customer_name: String,
    pub email: String,
    pub phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    pub device_type: String,
    pub device_model: String,
    pub service_type: String,
    pub issue_description: String,
    /// Preferred appointment date (`YYYY-MM-DD`).
    pub preferred_date: String,
    /// Preferred appointment time (`HH:MM`).
    pub preferred_time: String,
    pub status: BookingStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost: Option<f64>,
    /// Free-form completion date, normally `YYYY-MM-DD` or RFC 3339.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_completion: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diagnostic_images: Option<Vec<DiagnosticImage>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diagnostic_notes: Option<String>,
}

impl Booking {
    /// Lower-cased email, used as the customer key.
    pub fn customer_key(&self) -> String {
        self.email.trim().to_lowercase()
    }

    /// Cost if the booking has been billed a positive amount.
    pub fn billed_cost(&self) -> Option<f64> {
        self.cost.filter(|cost| cost.is_finite() && *cost > 0.0)
    }
}

/// Fields submitted by the booking form.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBooking {
    /// Caller-assigned tracking id; generated when absent.
    #[serde(default)]
    pub tracking_id: Option<String>,
    pub customer_name: String,
    pub email: String,
    pub phone: String,
    #[serde(default)]
    pub address: Option<String>,
    pub device_type: String,
    pub device_model: String,
    pub service_type: String,
    pub issue_description: String,
    pub preferred_date: String,
    pub preferred_time: String,
}

impl NewBooking {
    /// Notes derived from the device and service fields.
    pub fn default_notes(&self) -> String {
        let device = format!("{} {}", self.device_type.trim(), self.device_model.trim());
        format!("{} - {} requested", device.trim(), self.service_type.trim())
    }
}

/// Fields merged by a status update.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusUpdate {
    pub status: Option<BookingStatus>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub estimated_completion: Option<String>,
    #[serde(default)]
    pub cost: Option<f64>,
}

impl StatusUpdate {
    /// An update that only changes the status.
    pub fn to(status: BookingStatus) -> Self {
        Self {
            status: Some(status),
            ..Default::default()
        }
    }
}

/// Mirror envelope written alongside the booking array, and the format
/// produced by exports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingEnvelope {
    pub last_updated: DateTime<Utc>,
    pub bookings: Vec<Booking>,
}
