//! Configuration loaded from environment variables.

use std::env;
use std::net::SocketAddr;

/// Default bind address.
pub const DEFAULT_ADDR: &str = "127.0.0.1:8788";

/// Default SQLite database URL.
pub const DEFAULT_DATABASE_URL: &str = "sqlite:repairdesk.db?mode=rwc";

/// Admin web server configuration.
///
/// Assistant and blog settings are read by their own crates
/// (`ASSISTANT_*`, `CMS_*`); both features are optional.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server bind address.
    pub addr: SocketAddr,
    /// SQLite database URL.
    pub database_url: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// | Variable | Description | Default |
    /// |----------|-------------|---------|
    /// | `ADMIN_ADDR` | Server bind address | `127.0.0.1:8788` |
    /// | `SQLITE_PATH` | SQLite database URL | `sqlite:repairdesk.db?mode=rwc` |
    pub fn from_env() -> Result<Self, ConfigError> {
        let addr = env::var("ADMIN_ADDR")
            .unwrap_or_else(|_| DEFAULT_ADDR.to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidAddr)?;

        let database_url =
            env::var("SQLITE_PATH").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string());

        Ok(Self { addr, database_url })
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid ADMIN_ADDR format")]
    InvalidAddr,
}
