//! HTTP API for the repair desk.
//!
//! ## Endpoints
//!
//! - `POST /api/bookings` - Submit a booking (validated)
//! - `GET /api/bookings` - List bookings
//! - `GET /api/bookings/:id` - Track a booking
//! - `PATCH /api/bookings/:id/status` - Move a booking through its lifecycle
//! - `PATCH /api/bookings/:id/diagnostics` - Attach diagnostic notes and images
//! - `POST /api/maintenance/cleanup-images` - Prune expired diagnostic images
//! - `GET /api/backup`, `POST /api/import` - Backup and merge
//! - `GET /api/analytics` - Analytics snapshot
//! - `GET /api/export/bookings`, `GET /api/export/analytics` - CSV / JSON downloads
//! - `POST /api/assistant/troubleshoot`, `POST /api/assistant/chat` - Assistant
//! - `/api/blog/...` - Blog posts, comments and votes (when configured)
//! - `GET /health` - Health check

pub mod config;
pub mod error;
pub mod extract;
pub mod routes;
pub mod state;

use axum::Router;
use tower_http::trace::TraceLayer;

pub use config::Config;
pub use error::AdminError;
pub use state::AppState;

/// Create the application with middleware and state attached.
pub fn app(state: AppState) -> Router {
    routes::router()
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
