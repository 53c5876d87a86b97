//! End-to-end tests for the bookmall order engine.
//!
//! Every test runs against its own in-memory `SQLite` database with the
//! real migrations applied, so the conditional-decrement and transaction
//! behavior under test is the same storage-layer behavior production
//! uses.

#![cfg_attr(not(test), forbid(unsafe_code))]

use sqlx::SqlitePool;
use sqlx::sqlite::SqlitePoolOptions;

use bookmall_core::{BookId, UserId};
use bookmall_orders::db::MIGRATOR;

/// A fresh database with helpers for seeding and observing state.
pub struct TestContext {
    pub pool: SqlitePool,
}

impl TestContext {
    /// Create an in-memory database and run the migrations.
    ///
    /// A single pooled connection keeps the in-memory database alive for
    /// the lifetime of the context.
    ///
    /// # Panics
    ///
    /// Panics if the database cannot be opened or migrated - tests cannot
    /// proceed without one.
    pub async fn new() -> Self {
        init_tracing();

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .expect("connect to in-memory sqlite");

        MIGRATOR.run(&pool).await.expect("run migrations");

        Self { pool }
    }

    /// Insert a buyer and return the assigned id.
    pub async fn seed_user(&self, login_name: &str) -> UserId {
        let (id,): (i32,) = sqlx::query_as("INSERT INTO user (login_name) VALUES (?1) RETURNING id")
            .bind(login_name)
            .fetch_one(&self.pool)
            .await
            .expect("seed user");
        UserId::new(id)
    }

    /// Insert a book and return the assigned id.
    pub async fn seed_book(&self, title: &str, author: &str, price: &str, stock: i32) -> BookId {
        let (id,): (i32,) = sqlx::query_as(
            "INSERT INTO book (title, author, price, stock) VALUES (?1, ?2, ?3, ?4) RETURNING id",
        )
        .bind(title)
        .bind(author)
        .bind(price)
        .bind(stock)
        .fetch_one(&self.pool)
        .await
        .expect("seed book");
        BookId::new(id)
    }

    /// Current raw stock counter for a book.
    pub async fn stock_of(&self, book_id: BookId) -> i32 {
        sqlx::query_scalar("SELECT stock FROM book WHERE id = ?1")
            .bind(book_id)
            .fetch_one(&self.pool)
            .await
            .expect("read stock")
    }

    /// Total number of order headers in the database.
    pub async fn order_count(&self) -> i64 {
        sqlx::query_scalar("SELECT COUNT(*) FROM orders")
            .fetch_one(&self.pool)
            .await
            .expect("count orders")
    }

    /// Total number of order lines in the database.
    pub async fn line_count(&self) -> i64 {
        sqlx::query_scalar("SELECT COUNT(*) FROM order_line")
            .fetch_one(&self.pool)
            .await
            .expect("count order lines")
    }
}

/// Install a test subscriber once; later calls are no-ops.
fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
