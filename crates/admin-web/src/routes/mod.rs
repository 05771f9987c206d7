//! Route handlers for the repair desk API.

pub mod analytics;
pub mod assistant;
pub mod blog;
pub mod bookings;
pub mod health;

use axum::routing::{get, patch, post};
use axum::Router;

use crate::state::AppState;

/// Build the router with all routes.
pub fn router() -> Router<AppState> {
    Router::new()
        // Health check
        .route("/health", get(health::health))
        // Bookings
        .route(
            "/api/bookings",
            get(bookings::list_bookings).post(bookings::create_booking),
        )
        .route("/api/bookings/:id", get(bookings::get_booking))
        .route("/api/bookings/:id/status", patch(bookings::update_status))
        .route(
            "/api/bookings/:id/diagnostics",
            patch(bookings::update_diagnostics),
        )
        .route(
            "/api/maintenance/cleanup-images",
            post(bookings::cleanup_images),
        )
        .route("/api/backup", get(bookings::backup))
        .route("/api/import", post(bookings::import))
        // Analytics and exports
        .route("/api/analytics", get(analytics::snapshot))
        .route("/api/export/bookings", get(analytics::export_bookings))
        .route("/api/export/analytics", get(analytics::export_analytics))
        // Assistant
        .route("/api/assistant/troubleshoot", post(assistant::troubleshoot))
        .route("/api/assistant/chat", post(assistant::chat))
        // Blog
        .route("/api/blog/posts", get(blog::list_posts))
        .route(
            "/api/blog/posts/:id/comments",
            get(blog::list_comments).post(blog::add_comment),
        )
        .route("/api/blog/posts/:id/vote", post(blog::vote))
}
