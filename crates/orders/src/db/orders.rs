//! Order repository: durable storage of order headers and lines.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{SqliteConnection, SqlitePool};

use bookmall_core::{BookId, OrderId, OrderLineId, OrderStatus, UserId};

use super::{RepositoryError, parse_decimal};
use crate::models::{Order, OrderDetailLine, OrderLine};

/// Internal row type for order header queries.
#[derive(Debug, sqlx::FromRow)]
struct OrderRow {
    id: i32,
    user_id: i32,
    created_at: DateTime<Utc>,
    status: i32,
    total_price: String,
}

impl OrderRow {
    fn into_order(self) -> Result<Order, RepositoryError> {
        let status = OrderStatus::try_from(self.status)
            .map_err(|e| RepositoryError::DataCorruption(e.to_string()))?;

        Ok(Order {
            id: OrderId::new(self.id),
            user_id: UserId::new(self.user_id),
            created_at: self.created_at,
            status,
            total_price: parse_decimal(&self.total_price, "orders.total_price")?,
        })
    }
}

/// Internal row type for order line queries.
#[derive(Debug, sqlx::FromRow)]
struct OrderLineRow {
    id: i32,
    order_id: i32,
    user_id: i32,
    book_id: i32,
    book_title: String,
    quantity: i32,
}

impl From<OrderLineRow> for OrderLine {
    fn from(row: OrderLineRow) -> Self {
        Self {
            id: OrderLineId::new(row.id),
            order_id: OrderId::new(row.order_id),
            user_id: UserId::new(row.user_id),
            book_id: BookId::new(row.book_id),
            book_title: row.book_title,
            quantity: row.quantity,
        }
    }
}

/// Internal row type for the order detail join.
#[derive(Debug, sqlx::FromRow)]
struct OrderDetailRow {
    order_id: i32,
    user_id: i32,
    book_id: i32,
    book_title: String,
    quantity: i32,
    author: Option<String>,
    current_price: Option<String>,
}

impl OrderDetailRow {
    fn into_detail(self) -> Result<OrderDetailLine, RepositoryError> {
        let current_price = self
            .current_price
            .as_deref()
            .map(|raw| parse_decimal(raw, "book.price"))
            .transpose()?;

        Ok(OrderDetailLine {
            order_id: OrderId::new(self.order_id),
            user_id: UserId::new(self.user_id),
            book_id: BookId::new(self.book_id),
            book_title: self.book_title,
            quantity: self.quantity,
            author: self.author,
            current_price,
        })
    }
}

/// Repository for order database operations.
pub struct OrderRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> OrderRepository<'a> {
    /// Create a new order repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert an order header and return its assigned identifier.
    ///
    /// Orders are written directly as `Completed`: payment is out of
    /// scope, so placement implies paid. Runs on the caller's transaction
    /// connection so the header shares the atomic scope of its lines and
    /// decrements.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails; no partial
    /// identifier is ever returned.
    pub async fn create_order(
        conn: &mut SqliteConnection,
        user_id: UserId,
        total_price: &Decimal,
    ) -> Result<OrderId, RepositoryError> {
        let (id,): (i32,) = sqlx::query_as(
            "INSERT INTO orders (user_id, created_at, status, total_price) \
             VALUES (?1, ?2, ?3, ?4) RETURNING id",
        )
        .bind(user_id)
        .bind(Utc::now())
        .bind(OrderStatus::Completed.as_i32())
        .bind(total_price.to_string())
        .fetch_one(&mut *conn)
        .await?;

        Ok(OrderId::new(id))
    }

    /// Append one line to an order.
    ///
    /// Callable repeatedly against the same order inside one transaction
    /// (batch orders insert one line per requested pair, in input order).
    /// `book_title` is copied, not referenced.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn append_line(
        conn: &mut SqliteConnection,
        order_id: OrderId,
        user_id: UserId,
        book_id: BookId,
        book_title: &str,
        quantity: i32,
    ) -> Result<(), RepositoryError> {
        sqlx::query(
            "INSERT INTO order_line (order_id, user_id, book_id, book_title, quantity) \
             VALUES (?1, ?2, ?3, ?4, ?5)",
        )
        .bind(order_id)
        .bind(user_id)
        .bind(book_id)
        .bind(book_title)
        .bind(quantity)
        .execute(&mut *conn)
        .await?;

        Ok(())
    }

    /// List a buyer's order headers, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if a stored status or
    /// total does not parse.
    pub async fn list_for_user(&self, user_id: UserId) -> Result<Vec<Order>, RepositoryError> {
        let rows: Vec<OrderRow> = sqlx::query_as(
            "SELECT id, user_id, created_at, status, total_price FROM orders \
             WHERE user_id = ?1 ORDER BY created_at DESC, id DESC",
        )
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(OrderRow::into_order).collect()
    }

    /// Fetch the raw lines of an order, in insertion order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn lines_for_order(
        &self,
        order_id: OrderId,
    ) -> Result<Vec<OrderLine>, RepositoryError> {
        let rows: Vec<OrderLineRow> = sqlx::query_as(
            "SELECT id, order_id, user_id, book_id, book_title, quantity FROM order_line \
             WHERE order_id = ?1 ORDER BY id ASC",
        )
        .bind(order_id)
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(OrderLine::from).collect())
    }

    /// Fetch an order's lines joined with the current catalog entry.
    ///
    /// The join is a LEFT JOIN: lines survive even when the book has since
    /// left the catalog, with the catalog fields absent.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if a stored price does
    /// not parse.
    pub async fn detail(
        &self,
        order_id: OrderId,
    ) -> Result<Vec<OrderDetailLine>, RepositoryError> {
        let rows: Vec<OrderDetailRow> = sqlx::query_as(
            "SELECT ol.order_id, ol.user_id, ol.book_id, ol.book_title, ol.quantity, \
                    b.author AS author, b.price AS current_price \
             FROM order_line ol \
             LEFT JOIN book b ON ol.book_id = b.id \
             WHERE ol.order_id = ?1 ORDER BY ol.id ASC",
        )
        .bind(order_id)
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(OrderDetailRow::into_detail).collect()
    }
}
