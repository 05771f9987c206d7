//! Analytics and export routes.

use analytics::{compute, AnalyticsSnapshot, DateRange};
use axum::extract::State;
use axum::http::header::{self, HeaderName};
use axum::Json;
use chrono::{DateTime, NaiveDate, Utc};
use exporter::{
    analytics_to_csv, analytics_to_json, bookings_to_csv, bookings_to_json, export_filename,
    parse_field_list, ExportFormat, ExportOptions, GroupBy,
};
use serde::Deserialize;
use tracing::info;

use crate::error::{AdminError, Result};
use crate::extract::AppQuery;
use crate::state::AppState;

/// Range selection shared by analytics and exports.
///
/// `from`/`to` are whole days (`YYYY-MM-DD`); `preset` is one of `today`,
/// `week`, `month`, `this-month`, `this-year`. Explicit dates win over a preset.
#[derive(Debug, Default, Deserialize)]
pub struct RangeQuery {
    pub from: Option<String>,
    pub to: Option<String>,
    pub preset: Option<String>,
}

impl RangeQuery {
    fn resolve(&self, now: DateTime<Utc>) -> Result<Option<DateRange>> {
        let parse = |value: &str| {
            NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
                .map_err(|_| AdminError::BadRequest(format!("Invalid date: {}", value)))
        };

        match (self.from.as_deref(), self.to.as_deref()) {
            (Some(from), Some(to)) => return Ok(Some(DateRange::from_dates(parse(from)?, parse(to)?))),
            (Some(from), None) => return Ok(Some(DateRange::from_dates(parse(from)?, now.date_naive()))),
            (None, Some(to)) => {
                let to = parse(to)?;
                let end = DateRange::from_dates(to, to).end;
                return Ok(Some(DateRange::new(DateTime::<Utc>::MIN_UTC, end)));
            }
            (None, None) => {}
        }

        let Some(preset) = self.preset.as_deref() else {
            return Ok(None);
        };
        let range = match preset.trim().to_lowercase().as_str() {
            "today" => DateRange::today(now),
            "week" | "7d" => DateRange::last_days(7, now),
            "month" | "30d" => DateRange::last_days(30, now),
            "this-month" => DateRange::this_month(now),
            "this-year" => DateRange::this_year(now),
            "all" => return Ok(None),
            other => return Err(AdminError::BadRequest(format!("Unknown range preset: {}", other))),
        };
        Ok(Some(range))
    }
}

/// Export query.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportQuery {
    pub format: Option<String>,
    /// Comma-separated field keys.
    pub fields: Option<String>,
    pub group_by: Option<String>,
    #[serde(flatten)]
    pub range: RangeQuery,
}

impl ExportQuery {
    fn format(&self) -> Result<ExportFormat> {
        Ok(match self.format.as_deref() {
            Some(format) => format.parse()?,
            None => ExportFormat::default(),
        })
    }
}

type Download = ([(HeaderName, String); 2], String);

fn download(prefix: &str, format: ExportFormat, now: DateTime<Utc>, body: String) -> Download {
    let filename = export_filename(prefix, format, now);
    (
        [
            (header::CONTENT_TYPE, format.content_type().to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", filename),
            ),
        ],
        body,
    )
}

/// Analytics snapshot over the selected range.
pub async fn snapshot(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<RangeQuery>,
) -> Result<Json<AnalyticsSnapshot>> {
    let now = Utc::now();
    let range = query.resolve(now)?;
    let bookings = state.store.get_all().await?;
    Ok(Json(compute(&bookings, range, now)))
}

/// Download bookings as CSV or JSON.
pub async fn export_bookings(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<ExportQuery>,
) -> Result<Download> {
    let now = Utc::now();
    let format = query.format()?;
    let options = ExportOptions {
        fields: match query.fields.as_deref() {
            Some(list) => parse_field_list(list)?,
            None => Vec::new(),
        },
        range: query.range.resolve(now)?,
        group_by: query
            .group_by
            .as_deref()
            .map(str::parse::<GroupBy>)
            .transpose()?,
    };

    let bookings = state.store.get_all().await?;
    let body = match format {
        ExportFormat::Csv => bookings_to_csv(&options.select(&bookings), &options.fields),
        ExportFormat::Json => bookings_to_json(&bookings, &options, now)?,
    };

    info!(format = %format, "Bookings exported");
    Ok(download("bookings", format, now, body))
}

/// Download the analytics snapshot as CSV or JSON.
pub async fn export_analytics(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<ExportQuery>,
) -> Result<Download> {
    let now = Utc::now();
    let format = query.format()?;
    let bookings = state.store.get_all().await?;
    let snapshot = compute(&bookings, query.range.resolve(now)?, now);

    let body = match format {
        ExportFormat::Csv => analytics_to_csv(&snapshot),
        ExportFormat::Json => analytics_to_json(&snapshot, now)?,
    };

    info!(format = %format, "Analytics exported");
    Ok(download("analytics", format, now, body))
}
