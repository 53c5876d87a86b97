//! Database operations for the order engine.
//!
//! ## Tables
//!
//! - `user` - Buyer directory (read-only here; registration lives elsewhere)
//! - `book` - Catalog with the authoritative per-book stock counter
//! - `orders` - Order headers
//! - `order_line` - Denormalized order lines
//!
//! # Migrations
//!
//! Migrations are embedded from `crates/orders/migrations/` and run with
//! [`MIGRATOR`].
//!
//! # Transactions
//!
//! Read paths take the pool; every write that must share an order's atomic
//! scope takes `&mut SqliteConnection` so the service can thread a single
//! `pool.begin()` transaction through the header insert, the line inserts
//! and the stock decrements. Dropping the transaction without committing
//! rolls everything back.

pub mod books;
pub mod orders;
pub mod users;

use std::str::FromStr;
use std::time::Duration;

use rust_decimal::Decimal;
use secrecy::ExposeSecret;
use sqlx::SqlitePool;
use sqlx::migrate::Migrator;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use thiserror::Error;

pub use books::BookRepository;
pub use orders::OrderRepository;
pub use users::UserRepository;

use crate::config::OrdersConfig;

/// Embedded schema migrations.
pub static MIGRATOR: Migrator = sqlx::migrate!();

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Constraint violation (e.g., unique login name).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

/// Create a `SQLite` connection pool with sensible defaults.
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection string is invalid or the
/// database cannot be opened.
pub async fn create_pool(config: &OrdersConfig) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(config.database_url.expose_secret())?
        .create_if_missing(true)
        .foreign_keys(true)
        .busy_timeout(Duration::from_secs(10));

    SqlitePoolOptions::new()
        .max_connections(config.max_db_connections)
        .acquire_timeout(Duration::from_secs(10))
        .connect_with(options)
        .await
}

/// Parse a decimal stored as TEXT, reporting corruption with the column
/// it came from.
pub(crate) fn parse_decimal(raw: &str, column: &str) -> Result<Decimal, RepositoryError> {
    Decimal::from_str(raw).map_err(|e| {
        RepositoryError::DataCorruption(format!("invalid decimal in {column}: {e}"))
    })
}
