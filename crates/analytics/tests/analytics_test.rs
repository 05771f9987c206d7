//! Integration tests for the analytics aggregator.

use analytics::{compute, AnalyticsSnapshot, DateRange};
use bookings::{Booking, BookingStatus};
use chrono::{DateTime, Duration, TimeZone, Utc};

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 18, 12, 0, 0).unwrap()
}

fn booking(id: &str, created_at: DateTime<Utc>) -> Booking {
    Booking {
        tracking_id: id.to_string(),
        customer_name: format!("Customer {}", id),
        email: format!("{}@example.com", id),
        phone: "555-0100".to_string(),
        address: None,
        device_type: "Laptop".to_string(),
        device_model: "Generic".to_string(),
        service_type: "Diagnostics".to_string(),
        issue_description: "Won't charge".to_string(),
        preferred_date: "2026-10-20".to_string(),
        preferred_time: "10:00".to_string(),
        status: BookingStatus::Received,
        created_at,
        updated_at: created_at,
        cost: None,
        estimated_completion: None,
        notes: None,
        diagnostic_images: None,
        diagnostic_notes: None,
    }
}

fn with_cost(mut b: Booking, cost: Option<f64>) -> Booking {
    b.cost = cost;
    b
}

fn all_finite(snapshot: &AnalyticsSnapshot) -> bool {
    let mut values = vec![
        snapshot.revenue.total,
        snapshot.revenue.average_order_value,
        snapshot.revenue.daily.growth_percent,
        snapshot.revenue.weekly.growth_percent,
        snapshot.revenue.monthly.growth_percent,
        snapshot.customers.retention_rate,
        snapshot.completion.completion_rate,
        snapshot.completion.average_completion_days,
    ];
    values.extend(snapshot.popular_devices.iter().map(|r| r.percentage));
    values.extend(snapshot.popular_services.iter().map(|r| r.percentage));
    values.extend(snapshot.status_distribution.iter().map(|s| s.percentage));
    values.iter().all(|v| v.is_finite())
}

#[test]
fn test_revenue_sums_positive_costs() {
    let t = now() - Duration::hours(2);
    let bookings = vec![
        with_cost(booking("a", t), Some(100.0)),
        with_cost(booking("b", t), Some(0.0)),
        with_cost(booking("c", t), Some(50.0)),
        with_cost(booking("d", t), None),
    ];

    let snapshot = compute(&bookings, None, now());
    assert_eq!(snapshot.revenue.total, 150.0);
    assert_eq!(snapshot.revenue.paid_bookings, 2);
    assert_eq!(snapshot.revenue.average_order_value, 75.0);
    assert_eq!(snapshot.revenue.daily.current, 150.0);
}

#[test]
fn test_empty_collection_is_zeroed() {
    let snapshot = compute(&[], None, now());

    assert_eq!(snapshot.total_bookings, 0);
    assert_eq!(snapshot.revenue.total, 0.0);
    assert_eq!(snapshot.revenue.average_order_value, 0.0);
    assert_eq!(snapshot.customers.total, 0);
    assert_eq!(snapshot.customers.retention_rate, 0.0);
    assert!(snapshot.popular_devices.is_empty());
    assert!(snapshot.popular_services.is_empty());
    assert!(snapshot.busy_hours.is_empty());
    assert!(snapshot.busy_days.is_empty());
    assert_eq!(snapshot.status_distribution.len(), 5);
    assert!(snapshot.status_distribution.iter().all(|s| s.count == 0));
    assert_eq!(snapshot.daily_trend.len(), 30);
    assert_eq!(snapshot.monthly_trend.len(), 12);
    assert!(all_finite(&snapshot));

    // Serializes without nulls from NaN
    let json = serde_json::to_value(&snapshot).unwrap();
    assert_eq!(json["revenue"]["averageOrderValue"], 0.0);
}

#[test]
fn test_customers_keyed_by_lowercase_email() {
    let t = now() - Duration::days(1);
    let mut first = booking("1", t);
    first.email = "Pat@Example.com".to_string();
    let mut second = booking("2", t);
    second.email = "pat@example.com ".to_string();
    let third = booking("3", t);

    let snapshot = compute(&[first, second, third], None, now());
    assert_eq!(snapshot.customers.total, 2);
    assert_eq!(snapshot.customers.returning, 1);
    assert_eq!(snapshot.customers.new, 1);
    assert_eq!(snapshot.customers.retention_rate, 50.0);
}

#[test]
fn test_popularity_ties_keep_encounter_order() {
    let t = now() - Duration::days(1);
    let devices = ["Phone", "Laptop", "Laptop", "Phone", "Tablet"];
    let bookings: Vec<Booking> = devices
        .iter()
        .enumerate()
        .map(|(i, device)| {
            let mut b = booking(&i.to_string(), t);
            b.device_type = device.to_string();
            b
        })
        .collect();

    let snapshot = compute(&bookings, None, now());
    let names: Vec<&str> = snapshot
        .popular_devices
        .iter()
        .map(|r| r.name.as_str())
        .collect();
    assert_eq!(names, vec!["Phone", "Laptop", "Tablet"]);
    assert_eq!(snapshot.popular_devices[0].percentage, 40.0);
    assert_eq!(snapshot.popular_devices[2].percentage, 20.0);
}

#[test]
fn test_completion_only_measures_parseable_dates() {
    let created = Utc.with_ymd_and_hms(2026, 10, 10, 0, 0, 0).unwrap();

    let mut done = booking("done", created);
    done.status = BookingStatus::Completed;
    done.estimated_completion = Some("2026-10-12".to_string());

    let mut pickup = booking("pickup", created);
    pickup.status = BookingStatus::ReadyForPickup;
    pickup.estimated_completion = Some("when parts arrive".to_string());

    let mut working = booking("working", created);
    working.status = BookingStatus::InProgress;
    working.estimated_completion = Some("2026-10-30".to_string());

    let fresh = booking("fresh", created);

    let snapshot = compute(&[done, pickup, working, fresh], None, now());
    assert_eq!(snapshot.completion.completed, 2);
    assert_eq!(snapshot.completion.completion_rate, 50.0);
    assert_eq!(snapshot.completion.measured, 1);
    assert_eq!(snapshot.completion.average_completion_days, 2.0);
}

#[test]
fn test_busy_hours_and_days() {
    // 2026-10-12 is a Monday, 2026-10-13 a Tuesday
    let bookings = vec![
        booking("a", Utc.with_ymd_and_hms(2026, 10, 12, 9, 15, 0).unwrap()),
        booking("b", Utc.with_ymd_and_hms(2026, 10, 13, 14, 0, 0).unwrap()),
        booking("c", Utc.with_ymd_and_hms(2026, 10, 13, 14, 30, 0).unwrap()),
    ];

    let snapshot = compute(&bookings, None, now());
    assert_eq!(snapshot.busy_hours[0].hour, 14);
    assert_eq!(snapshot.busy_hours[0].count, 2);
    assert_eq!(snapshot.busy_hours[1].hour, 9);
    assert_eq!(snapshot.busy_days[0].day, "Tuesday");
    assert_eq!(snapshot.busy_days[1].day, "Monday");
}

#[test]
fn test_range_filter() {
    let bookings = vec![
        with_cost(booking("recent", now() - Duration::days(2)), Some(80.0)),
        with_cost(booking("old", now() - Duration::days(45)), Some(20.0)),
    ];

    let snapshot = compute(&bookings, Some(DateRange::last_days(7, now())), now());
    assert_eq!(snapshot.total_bookings, 1);
    assert_eq!(snapshot.revenue.total, 80.0);
    assert_eq!(snapshot.range, Some(DateRange::last_days(7, now())));
}

#[test]
fn test_trends_are_zero_filled() {
    let bookings = vec![
        with_cost(booking("today", now() - Duration::hours(1)), Some(40.0)),
        with_cost(booking("last-month", now() - Duration::days(40)), Some(60.0)),
    ];

    let snapshot = compute(&bookings, None, now());

    let daily = &snapshot.daily_trend;
    assert_eq!(daily.first().unwrap().period, "2026-09-19");
    assert_eq!(daily.last().unwrap().period, "2026-10-18");
    assert_eq!(daily.last().unwrap().bookings, 1);
    assert_eq!(daily.last().unwrap().revenue, 40.0);
    assert_eq!(daily.iter().map(|p| p.bookings).sum::<usize>(), 1);

    let monthly = &snapshot.monthly_trend;
    assert_eq!(monthly.first().unwrap().period, "2025-11");
    assert_eq!(monthly.last().unwrap().period, "2026-10");
    let september = monthly.iter().find(|p| p.period == "2026-09").unwrap();
    assert_eq!(september.bookings, 1);
    assert_eq!(september.revenue, 60.0);
}

#[test]
fn test_weekly_growth() {
    let bookings = vec![
        with_cost(booking("this-week", now() - Duration::days(3)), Some(300.0)),
        with_cost(booking("last-week", now() - Duration::days(10)), Some(200.0)),
    ];

    let snapshot = compute(&bookings, None, now());
    assert_eq!(snapshot.revenue.weekly.current, 300.0);
    assert_eq!(snapshot.revenue.weekly.previous, 200.0);
    assert_eq!(snapshot.revenue.weekly.growth_percent, 50.0);

    // No baseline for the daily window
    assert_eq!(snapshot.revenue.daily.growth_percent, 0.0);
}
