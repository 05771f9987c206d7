//! CSV rendering.

use analytics::AnalyticsSnapshot;
use bookings::Booking;

use crate::fields::ExportField;

/// Escape one CSV cell.
///
/// Cells containing a comma, double quote or line break are wrapped in
/// double quotes with internal quotes doubled.
pub fn escape_cell(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

fn push_row<I, S>(out: &mut String, cells: I)
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let row: Vec<String> = cells
        .into_iter()
        .map(|cell| escape_cell(cell.as_ref()))
        .collect();
    out.push_str(&row.join(","));
    out.push('\n');
}

/// Render bookings as CSV with one header row and one row per booking.
///
/// An empty `fields` slice means every field.
pub fn bookings_to_csv(bookings: &[Booking], fields: &[ExportField]) -> String {
    let all;
    let fields = if fields.is_empty() {
        all = ExportField::all();
        &all[..]
    } else {
        fields
    };

    let mut out = String::new();
    push_row(&mut out, fields.iter().map(ExportField::header));
    for booking in bookings {
        push_row(&mut out, fields.iter().map(|field| field.csv_value(booking)));
    }
    out
}

/// Render an analytics snapshot as `Section,Name,Value` rows.
pub fn analytics_to_csv(snapshot: &AnalyticsSnapshot) -> String {
    let mut out = String::new();
    let mut row = |section: &str, name: &str, value: String| {
        push_row(&mut out, [section, name, value.as_str()]);
    };

    row("Section", "Name", "Value".to_string());

    row("Summary", "Generated At", snapshot.generated_at.to_rfc3339());
    if let Some(range) = snapshot.range {
        row("Summary", "Range Start", range.start.to_rfc3339());
        row("Summary", "Range End", range.end.to_rfc3339());
    }
    row("Summary", "Total Bookings", snapshot.total_bookings.to_string());

    let revenue = &snapshot.revenue;
    row("Revenue", "Total", money(revenue.total));
    row("Revenue", "Paid Bookings", revenue.paid_bookings.to_string());
    row("Revenue", "Average Order Value", money(revenue.average_order_value));
    for (label, window) in [
        ("Daily", &revenue.daily),
        ("Weekly", &revenue.weekly),
        ("Monthly", &revenue.monthly),
    ] {
        row("Revenue", &format!("{} Revenue", label), money(window.current));
        row("Revenue", &format!("{} Growth %", label), money(window.growth_percent));
    }

    let customers = &snapshot.customers;
    row("Customers", "Total", customers.total.to_string());
    row("Customers", "New", customers.new.to_string());
    row("Customers", "Returning", customers.returning.to_string());
    row("Customers", "Retention Rate %", money(customers.retention_rate));

    let completion = &snapshot.completion;
    row("Completion", "Completed", completion.completed.to_string());
    row("Completion", "Completion Rate %", money(completion.completion_rate));
    row(
        "Completion",
        "Average Completion Days",
        money(completion.average_completion_days),
    );

    for ranked in &snapshot.popular_devices {
        row("Popular Devices", &ranked.name, ranked.count.to_string());
    }
    for ranked in &snapshot.popular_services {
        row("Popular Services", &ranked.name, ranked.count.to_string());
    }
    for status in &snapshot.status_distribution {
        row("Status", status.status.as_str(), status.count.to_string());
    }
    for hour in &snapshot.busy_hours {
        row("Busy Hours", &format!("{:02}:00", hour.hour), hour.count.to_string());
    }
    for day in &snapshot.busy_days {
        row("Busy Days", &day.day, day.count.to_string());
    }
    for point in &snapshot.daily_trend {
        row("Daily Trend", &point.period, point.bookings.to_string());
    }
    for point in &snapshot.monthly_trend {
        row("Monthly Trend", &point.period, point.bookings.to_string());
    }

    out
}

fn money(value: f64) -> String {
    format!("{:.2}", value)
}
