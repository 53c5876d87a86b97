//! Order engine configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `BOOKMALL_DATABASE_URL` - `SQLite` connection string
//!   (e.g. `sqlite://bookmall.db`)
//!
//! ## Optional
//! - `BOOKMALL_MAX_DB_CONNECTIONS` - Connection pool size (default: 10)

use secrecy::SecretString;
use thiserror::Error;

/// Default connection pool size.
const DEFAULT_MAX_DB_CONNECTIONS: u32 = 10;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Order engine configuration.
#[derive(Debug, Clone)]
pub struct OrdersConfig {
    /// Database connection URL (may contain credentials)
    pub database_url: SecretString,
    /// Maximum number of pooled database connections
    pub max_db_connections: u32,
}

impl OrdersConfig {
    /// Load configuration from environment variables.
    ///
    /// Loads a `.env` file first if one is present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingEnvVar` if `BOOKMALL_DATABASE_URL` is
    /// not set, or `ConfigError::InvalidEnvVar` if an optional variable
    /// cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let database_url = std::env::var("BOOKMALL_DATABASE_URL")
            .map_err(|_| ConfigError::MissingEnvVar("BOOKMALL_DATABASE_URL".to_owned()))?
            .into();

        let max_db_connections = match std::env::var("BOOKMALL_MAX_DB_CONNECTIONS") {
            Ok(raw) => raw.parse().map_err(|_| {
                ConfigError::InvalidEnvVar(
                    "BOOKMALL_MAX_DB_CONNECTIONS".to_owned(),
                    format!("expected a positive integer, got {raw:?}"),
                )
            })?,
            Err(_) => DEFAULT_MAX_DB_CONNECTIONS,
        };

        Ok(Self {
            database_url,
            max_db_connections,
        })
    }
}
