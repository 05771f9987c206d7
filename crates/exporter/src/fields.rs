//! Exportable booking fields.

use std::str::FromStr;

use analytics::parse_completion;
use bookings::Booking;
use chrono::{DateTime, NaiveDate, Utc};

use crate::error::ExportError;

/// Date format used in CSV output.
pub const CSV_DATE_FORMAT: &str = "%m/%d/%Y";

/// A column in a booking export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExportField {
    TrackingId,
    CustomerName,
    Email,
    Phone,
    Address,
    DeviceType,
    DeviceModel,
    ServiceType,
    IssueDescription,
    PreferredDate,
    PreferredTime,
    Status,
    CreatedAt,
    UpdatedAt,
    Cost,
    EstimatedCompletion,
    Notes,
    DiagnosticNotes,
    DiagnosticImages,
}

impl ExportField {
    /// Every field, in default column order.
    pub fn all() -> Vec<ExportField> {
        use ExportField::*;
        vec![
            TrackingId,
            CustomerName,
            Email,
            Phone,
            Address,
            DeviceType,
            DeviceModel,
            ServiceType,
            IssueDescription,
            PreferredDate,
            PreferredTime,
            Status,
            CreatedAt,
            UpdatedAt,
            Cost,
            EstimatedCompletion,
            Notes,
            DiagnosticNotes,
            DiagnosticImages,
        ]
    }

    /// JSON key of the field (camelCase, as stored).
    pub fn key(&self) -> &'static str {
        match self {
            ExportField::TrackingId => "trackingId",
            ExportField::CustomerName => "customerName",
            ExportField::Email => "email",
            ExportField::Phone => "phone",
            ExportField::Address => "address",
            ExportField::DeviceType => "deviceType",
            ExportField::DeviceModel => "deviceModel",
            ExportField::ServiceType => "serviceType",
            ExportField::IssueDescription => "issueDescription",
            ExportField::PreferredDate => "preferredDate",
            ExportField::PreferredTime => "preferredTime",
            ExportField::Status => "status",
            ExportField::CreatedAt => "createdAt",
            ExportField::UpdatedAt => "updatedAt",
            ExportField::Cost => "cost",
            ExportField::EstimatedCompletion => "estimatedCompletion",
            ExportField::Notes => "notes",
            ExportField::DiagnosticNotes => "diagnosticNotes",
            ExportField::DiagnosticImages => "diagnosticImages",
        }
    }

    /// CSV column header.
    pub fn header(&self) -> &'static str {
        match self {
            ExportField::TrackingId => "Tracking ID",
            ExportField::CustomerName => "Customer Name",
            ExportField::Email => "Email",
            ExportField::Phone => "Phone",
            ExportField::Address => "Address",
            ExportField::DeviceType => "Device Type",
            ExportField::DeviceModel => "Device Model",
            ExportField::ServiceType => "Service Type",
            ExportField::IssueDescription => "Issue Description",
            ExportField::PreferredDate => "Preferred Date",
            ExportField::PreferredTime => "Preferred Time",
            ExportField::Status => "Status",
            ExportField::CreatedAt => "Created",
            ExportField::UpdatedAt => "Updated",
            ExportField::Cost => "Cost",
            ExportField::EstimatedCompletion => "Estimated Completion",
            ExportField::Notes => "Notes",
            ExportField::DiagnosticNotes => "Diagnostic Notes",
            ExportField::DiagnosticImages => "Diagnostic Images",
        }
    }

    /// Render the field of `booking` as CSV cell text (unescaped).
    pub fn csv_value(&self, booking: &Booking) -> String {
        let opt = |value: &Option<String>| value.clone().unwrap_or_default();
        match self {
            ExportField::TrackingId => booking.tracking_id.clone(),
            ExportField::CustomerName => booking.customer_name.clone(),
            ExportField::Email => booking.email.clone(),
            ExportField::Phone => booking.phone.clone(),
            ExportField::Address => opt(&booking.address),
            ExportField::DeviceType => booking.device_type.clone(),
            ExportField::DeviceModel => booking.device_model.clone(),
            ExportField::ServiceType => booking.service_type.clone(),
            ExportField::IssueDescription => booking.issue_description.clone(),
            ExportField::PreferredDate => NaiveDate::parse_from_str(&booking.preferred_date, "%Y-%m-%d")
                .map(|d| d.format(CSV_DATE_FORMAT).to_string())
                .unwrap_or_else(|_| booking.preferred_date.clone()),
            ExportField::PreferredTime => booking.preferred_time.clone(),
            ExportField::Status => booking.status.to_string(),
            ExportField::CreatedAt => csv_date(booking.created_at),
            ExportField::UpdatedAt => csv_date(booking.updated_at),
            ExportField::Cost => booking.cost.map(|c| c.to_string()).unwrap_or_default(),
            ExportField::EstimatedCompletion => match booking.estimated_completion.as_deref() {
                Some(value) => parse_completion(value)
                    .map(csv_date)
                    .unwrap_or_else(|| value.to_string()),
                None => String::new(),
            },
            ExportField::Notes => opt(&booking.notes),
            ExportField::DiagnosticNotes => opt(&booking.diagnostic_notes),
            ExportField::DiagnosticImages => booking
                .diagnostic_images
                .as_ref()
                .map_or(0, Vec::len)
                .to_string(),
        }
    }
}

fn csv_date(instant: DateTime<Utc>) -> String {
    instant.format(CSV_DATE_FORMAT).to_string()
}

impl FromStr for ExportField {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        ExportField::all()
            .into_iter()
            .find(|field| field.key().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ExportError::UnknownField(s.to_string()))
    }
}

/// Parse a comma-separated field list such as `"trackingId,email,status"`.
pub fn parse_field_list(list: &str) -> Result<Vec<ExportField>, ExportError> {
    list.split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::parse)
        .collect()
}
