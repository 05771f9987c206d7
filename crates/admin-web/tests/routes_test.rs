//! Router tests against in-memory storage and scripted generators.

use std::sync::Arc;

use admin_web::{app, AppState};
use assistant_core::Troubleshooter;
use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use bookings::{BookingStore, MemorySlots};
use chrono::{TimeZone, Utc};
use issue_cms::{MemoryProvider, Post};
use mock_assistant::{CannedGenerator, FailingGenerator};
use serde_json::{json, Value};
use tower::ServiceExt;

fn store() -> BookingStore {
    BookingStore::new(Arc::new(MemorySlots::new()))
}

fn offline_app() -> Router {
    app(AppState::new(store(), Troubleshooter::offline()))
}

fn post(id: u64) -> Post {
    let at = Utc.with_ymd_and_hms(2026, 10, 1, 9, 0, 0).unwrap();
    Post {
        id,
        title: format!("Post {}", id),
        body: "Keep your vents clear.".to_string(),
        author: "shop".to_string(),
        media: Vec::new(),
        labels: vec!["blog".to_string()],
        created_at: at,
        updated_at: at,
        comment_count: 0,
        likes: 0,
        dislikes: 0,
        url: format!("https://example.com/issues/{}", id),
    }
}

// Monday 2099-01-05 10:00, inside business hours and always in the future.
fn booking_form(tracking_id: Option<&str>) -> Value {
    json!({
        "trackingId": tracking_id,
        "customerName": "Sam Lee",
        "email": "sam@example.com",
        "phone": "+1 (555) 010-2030",
        "deviceType": "laptop",
        "deviceModel": "ThinkPad T14",
        "serviceType": "repair",
        "issueDescription": "Screen flickers after waking from sleep",
        "preferredDate": "2099-01-05",
        "preferredTime": "10:00"
    })
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let (status, text) = send_raw(app, method, uri, body.map(|b| b.to_string())).await;
    let value = serde_json::from_str(&text).unwrap_or(Value::Null);
    (status, value)
}

async fn send_raw(app: &Router, method: Method, uri: &str, body: Option<String>) -> (StatusCode, String) {
    let mut request = Request::builder().method(method).uri(uri);
    if body.is_some() {
        request = request.header(header::CONTENT_TYPE, "application/json");
    }
    let request = request
        .body(body.map(Body::from).unwrap_or_else(Body::empty))
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

#[tokio::test]
async fn test_health() {
    let app = offline_app();
    let (status, body) = send(&app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_booking_lifecycle() {
    let app = offline_app();

    let (status, created) = send(&app, Method::POST, "/api/bookings", Some(booking_form(None))).await;
    assert_eq!(status, StatusCode::CREATED);
    let id = created["trackingId"].as_str().unwrap().to_string();
    assert_eq!(created["booking"]["status"], "received");

    let (status, detail) = send(&app, Method::GET, &format!("/api/bookings/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(detail["customerName"], "Sam Lee");
    assert_eq!(detail["nextStatuses"], json!(["diagnosed"]));

    let (status, updated) = send(
        &app,
        Method::PATCH,
        &format!("/api/bookings/{}/status", id),
        Some(json!({"status": "diagnosed", "cost": 89.5})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["status"], "diagnosed");
    assert_eq!(updated["cost"], 89.5);

    // Skipping ahead is refused.
    let (status, body) = send(
        &app,
        Method::PATCH,
        &format!("/api/bookings/{}/status", id),
        Some(json!({"status": "ready-for-pickup"})),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body["error"].is_string());

    let (status, updated) = send(
        &app,
        Method::PATCH,
        &format!("/api/bookings/{}/diagnostics", id),
        Some(json!({"notes": "Loose display cable", "images": ["data:image/png;base64,AAAA"]})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["diagnosticNotes"], "Loose display cable");
    assert_eq!(updated["diagnosticImages"].as_array().unwrap().len(), 1);

    let (status, list) = send(&app, Method::GET, "/api/bookings", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_booking_errors() {
    let app = offline_app();

    let mut invalid = booking_form(None);
    invalid["email"] = json!("not-an-email");
    let (status, body) = send(&app, Method::POST, "/api/bookings", Some(invalid)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("@"));

    let (status, _) = send(&app, Method::POST, "/api/bookings", Some(booking_form(Some("RB-FIXED")))).await;
    assert_eq!(status, StatusCode::CREATED);
    let (status, _) = send(&app, Method::POST, "/api/bookings", Some(booking_form(Some("rb-fixed")))).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = send(&app, Method::GET, "/api/bookings/RB-MISSING", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(
        &app,
        Method::PATCH,
        "/api/bookings/RB-MISSING/status",
        Some(json!({"status": "diagnosed"})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_malformed_requests_get_json_errors() {
    let app = offline_app();

    let mut missing_email = booking_form(None);
    missing_email.as_object_mut().unwrap().remove("email");
    let (status, body) = send(&app, Method::POST, "/api/bookings", Some(missing_email)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["error"].as_str().unwrap().contains("email"));

    send(&app, Method::POST, "/api/bookings", Some(booking_form(Some("RB-KNOWN")))).await;
    let (status, body) = send(
        &app,
        Method::PATCH,
        "/api/bookings/RB-KNOWN/status",
        Some(json!({"status": "shipped"})),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["error"].is_string());

    let (status, body) = send_raw(
        &app,
        Method::POST,
        "/api/assistant/chat",
        Some("{not json".to_string()),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let body: Value = serde_json::from_str(&body).unwrap();
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_backup_and_import() {
    let source = offline_app();
    send(&source, Method::POST, "/api/bookings", Some(booking_form(Some("RB-ONE")))).await;
    send(&source, Method::POST, "/api/bookings", Some(booking_form(Some("RB-TWO")))).await;

    let (status, backup) = send_raw(&source, Method::GET, "/api/backup", None).await;
    assert_eq!(status, StatusCode::OK);

    let target = offline_app();
    send(&target, Method::POST, "/api/bookings", Some(booking_form(Some("RB-ONE")))).await;
    let (status, body) = send_raw(&target, Method::POST, "/api/import", Some(backup)).await;
    assert_eq!(status, StatusCode::OK);
    let body: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(body["added"], 1);

    let (status, _) = send_raw(&target, Method::POST, "/api/import", Some("not json".to_string())).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send(&target, Method::POST, "/api/maintenance/cleanup-images", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["removed"], 0);
}

#[tokio::test]
async fn test_analytics_and_exports() {
    let app = offline_app();
    send(&app, Method::POST, "/api/bookings", Some(booking_form(None))).await;

    let (status, snapshot) = send(&app, Method::GET, "/api/analytics", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(snapshot["totalBookings"], 1);

    let (status, _) = send(&app, Method::GET, "/api/analytics?preset=fortnight", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // The last representable day is accepted rather than overflowing.
    let (status, snapshot) = send(&app, Method::GET, "/api/analytics?to=%2B262142-12-31", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(snapshot["totalBookings"], 1);

    let request = Request::builder()
        .uri("/api/export/bookings?format=csv&fields=trackingId,customerName")
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let disposition = response.headers()[header::CONTENT_DISPOSITION].to_str().unwrap().to_string();
    assert!(disposition.starts_with("attachment; filename=\"bookings-"));
    assert!(disposition.ends_with(".csv\""));
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let csv = String::from_utf8(bytes.to_vec()).unwrap();
    assert_eq!(csv.lines().count(), 2);
    assert!(csv.lines().nth(1).unwrap().contains("Sam Lee"));

    let (status, body) = send(&app, Method::GET, "/api/export/bookings?format=json&groupBy=status", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["exportInfo"]["recordCount"], 1);
    assert_eq!(body["exportInfo"]["groupBy"], "status");

    let (status, _) = send_raw(&app, Method::GET, "/api/export/bookings?format=xml", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let (status, _) = send_raw(&app, Method::GET, "/api/export/bookings?fields=shoeSize", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send(&app, Method::GET, "/api/export/analytics?format=json", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["totalBookings"], 1);
}

#[tokio::test]
async fn test_troubleshoot_uses_model_then_falls_back() {
    let generator = CannedGenerator::diagnosis("Failing display cable", &["Reseat the cable"]);
    let app = app(AppState::new(store(), Troubleshooter::new(Arc::new(generator))));
    let report = json!({"description": "Screen flickers", "deviceType": "laptop"});
    let (status, body) = send(&app, Method::POST, "/api/assistant/troubleshoot", Some(report.clone())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["source"]["kind"], "model");
    assert_eq!(body["diagnosis"]["diagnosis"], "Failing display cable");

    let failing = app_with_failing_generator();
    let report = json!({"description": "My laptop won't turn on at all"});
    let (status, body) = send(&failing, Method::POST, "/api/assistant/troubleshoot", Some(report)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["source"]["kind"], "fallback");
    assert!(!body["diagnosis"]["steps"].as_array().unwrap().is_empty());

    let (status, _) = send(&failing, Method::POST, "/api/assistant/troubleshoot", Some(json!({"description": "  "}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

fn app_with_failing_generator() -> Router {
    app(AppState::new(
        store(),
        Troubleshooter::new(Arc::new(FailingGenerator::network())),
    ))
}

#[tokio::test]
async fn test_chat_fallback() {
    let app = app_with_failing_generator();
    let (status, body) = send(&app, Method::POST, "/api/assistant/chat", Some(json!({"message": "What are your opening hours?"}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["source"]["kind"], "fallback");
    assert!(body["text"].as_str().unwrap().contains("Saturday"));
}

#[tokio::test]
async fn test_blog_disabled() {
    let app = offline_app();
    let (status, body) = send(&app, Method::GET, "/api/blog/posts", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Blog is not configured");
}

#[tokio::test]
async fn test_blog_comments_and_votes() {
    let provider = Arc::new(MemoryProvider::new(vec![post(1), post(2)]));
    let app = app(AppState::new(store(), Troubleshooter::offline()).with_blog(provider.clone()));

    let (status, posts) = send(&app, Method::GET, "/api/blog/posts", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(posts.as_array().unwrap().len(), 2);

    let (status, comment) = send(&app, Method::POST, "/api/blog/posts/1/comments", Some(json!({"body": "Helpful, thanks"}))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(comment["body"], "Helpful, thanks");

    let (status, comments) = send(&app, Method::GET, "/api/blog/posts/1/comments", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(comments.as_array().unwrap().len(), 1);

    let (status, _) = send(&app, Method::GET, "/api/blog/posts/99/comments", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = send(&app, Method::GET, "/api/blog/posts/first/comments", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    let (status, body) = send(&app, Method::POST, "/api/blog/posts/1/vote", Some(json!({"vote": "like"}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["vote"], "like");

    // Voting the same way again clears the vote.
    let (_, body) = send(&app, Method::POST, "/api/blog/posts/1/vote", Some(json!({"vote": "like"}))).await;
    assert_eq!(body["vote"], Value::Null);

    let (status, _) = send(&app, Method::POST, "/api/blog/posts/1/vote", Some(json!({"vote": "love"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // A rejected reaction leaves no local vote behind.
    let (status, _) = send(&app, Method::POST, "/api/blog/posts/99/vote", Some(json!({"vote": "dislike"}))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, posts) = send(&app, Method::GET, "/api/blog/posts", None).await;
    let first = posts.as_array().unwrap().iter().find(|p| p["id"] == 1).unwrap();
    assert_eq!(first["likes"], 1);
    assert_eq!(first["commentCount"], 1);
}
