//! Repair desk API server.

use std::sync::Arc;

use admin_web::{app, AppState, Config};
use assistant_core::Troubleshooter;
use bookings::{BookingStore, SqliteSlots};
use issue_cms::{CmsError, GithubIssuesProvider};
use llm_assistant::CompletionsClient;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load configuration
    let config = Config::from_env()?;
    info!(addr = %config.addr, "Starting repair desk server");

    // Connect to database
    let slots = Arc::new(SqliteSlots::connect(&config.database_url).await?);
    slots.migrate().await?;
    let store = BookingStore::new(slots.clone());

    // Assistant: the scripted fallback still answers without an API key
    let troubleshooter = match CompletionsClient::from_env() {
        Ok(client) => Troubleshooter::new(Arc::new(client)),
        Err(e) => {
            warn!("Assistant generator disabled: {}", e);
            Troubleshooter::offline()
        }
    };

    // Build application state
    let mut state = AppState::new(store, troubleshooter);
    match GithubIssuesProvider::from_env() {
        Ok(provider) => state = state.with_blog(Arc::new(provider)),
        Err(CmsError::Configuration(msg)) => info!("Blog disabled: {}", msg),
        Err(e) => return Err(e.into()),
    }

    let removed = state.store.cleanup_old_images().await?;
    if removed > 0 {
        info!(removed, "Pruned expired diagnostic images at startup");
    }

    // Start server
    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    info!(addr = %config.addr, "Repair desk server listening");
    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    slots.close().await;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutting down");
}
