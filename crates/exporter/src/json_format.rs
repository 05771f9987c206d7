//! JSON export envelopes.

use analytics::{AnalyticsSnapshot, DateRange};
use bookings::Booking;
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::Result;
use crate::fields::ExportField;
use crate::grouping::{group_bookings, GroupBy, GroupSummary};

/// Options for a booking export.
#[derive(Debug, Clone, Default)]
pub struct ExportOptions {
    /// Columns to include; empty means every field.
    pub fields: Vec<ExportField>,
    /// Only bookings created inside this range.
    pub range: Option<DateRange>,
    /// Group the data instead of emitting a flat list.
    pub group_by: Option<GroupBy>,
}

impl ExportOptions {
    /// The effective field list.
    pub fn effective_fields(&self) -> Vec<ExportField> {
        if self.fields.is_empty() {
            ExportField::all()
        } else {
            self.fields.clone()
        }
    }

    /// Bookings selected by the range filter.
    pub fn select(&self, bookings: &[Booking]) -> Vec<Booking> {
        bookings
            .iter()
            .filter(|b| self.range.map_or(true, |r| r.contains(b.created_at)))
            .cloned()
            .collect()
    }
}

/// Metadata carried by every export.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportInfo {
    pub exported_at: DateTime<Utc>,
    pub record_count: usize,
    pub date_range: Option<DateRange>,
    pub fields: Vec<&'static str>,
    pub group_by: Option<GroupBy>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Envelope<T: Serialize> {
    export_info: ExportInfo,
    data: T,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GroupOut {
    key: String,
    summary: GroupSummary,
    bookings: Vec<Value>,
}

/// Keep only the exported keys of a serialized booking.
fn project(booking: &Booking, fields: &[ExportField]) -> Result<Value> {
    let mut object = match serde_json::to_value(booking)? {
        Value::Object(object) => object,
        other => return Ok(other),
    };

    let mut projected = Map::new();
    for field in fields {
        if let Some(value) = object.remove(field.key()) {
            projected.insert(field.key().to_string(), value);
        }
    }
    Ok(Value::Object(projected))
}

/// Render bookings as a JSON export envelope.
pub fn bookings_to_json(
    bookings: &[Booking],
    options: &ExportOptions,
    now: DateTime<Utc>,
) -> Result<String> {
    let selected = options.select(bookings);
    let fields = options.effective_fields();

    let export_info = ExportInfo {
        exported_at: now,
        record_count: selected.len(),
        date_range: options.range,
        fields: fields.iter().map(ExportField::key).collect(),
        group_by: options.group_by,
    };

    let data = match options.group_by {
        None => Value::Array(
            selected
                .iter()
                .map(|b| project(b, &fields))
                .collect::<Result<Vec<_>>>()?,
        ),
        Some(group_by) => {
            let groups = group_bookings(&selected, group_by)
                .into_iter()
                .map(|group| {
                    Ok(GroupOut {
                        key: group.key,
                        summary: group.summary,
                        bookings: group
                            .bookings
                            .into_iter()
                            .map(|b| project(b, &fields))
                            .collect::<Result<Vec<_>>>()?,
                    })
                })
                .collect::<Result<Vec<_>>>()?;
            serde_json::to_value(groups)?
        }
    };

    Ok(serde_json::to_string_pretty(&Envelope { export_info, data })?)
}

/// Render an analytics snapshot as a JSON export envelope.
pub fn analytics_to_json(snapshot: &AnalyticsSnapshot, now: DateTime<Utc>) -> Result<String> {
    let envelope = Envelope {
        export_info: ExportInfo {
            exported_at: now,
            record_count: snapshot.total_bookings,
            date_range: snapshot.range,
            fields: Vec::new(),
            group_by: None,
        },
        data: snapshot,
    };
    Ok(serde_json::to_string_pretty(&envelope)?)
}
