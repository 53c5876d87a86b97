//! Catalog repository: pricing snapshots and the inventory decrement.

use sqlx::{SqliteConnection, SqlitePool};

use bookmall_core::{BookId, StockCount};

use super::{RepositoryError, parse_decimal};
use crate::models::Book;

/// Internal row type for book queries.
#[derive(Debug, sqlx::FromRow)]
struct BookRow {
    id: i32,
    title: String,
    author: String,
    price: String,
    stock: i32,
}

impl BookRow {
    fn into_book(self) -> Result<Book, RepositoryError> {
        Ok(Book {
            id: BookId::new(self.id),
            title: self.title,
            author: self.author,
            price: parse_decimal(&self.price, "book.price")?,
            stock: StockCount::new(self.stock),
        })
    }
}

/// Repository for catalog reads and the stock decrement.
pub struct BookRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> BookRepository<'a> {
    /// Create a new book repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Get a pricing/availability snapshot for a book.
    ///
    /// The returned stock count is advisory: it feeds the fast-fail
    /// pre-check and its error message, but the conditional decrement
    /// inside the order transaction is the sole authority.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the stored price does
    /// not parse as a decimal.
    pub async fn get_by_id(&self, book_id: BookId) -> Result<Option<Book>, RepositoryError> {
        let row: Option<BookRow> =
            sqlx::query_as("SELECT id, title, author, price, stock FROM book WHERE id = ?1")
                .bind(book_id)
                .fetch_optional(self.pool)
                .await?;

        row.map(BookRow::into_book).transpose()
    }

    /// Atomically decrement a book's stock if and only if enough remains.
    ///
    /// This is the single authoritative availability check: the condition
    /// and the subtraction execute as one storage-layer write, so two
    /// callers racing for the last units cannot both succeed. Withdrawn
    /// books (stock `-1`) never satisfy `stock >= quantity` for a positive
    /// quantity and always fail. On failure the counter is untouched.
    ///
    /// Runs on the caller's transaction connection; compensation for a
    /// failed batch is discarding that whole transaction, not a reverse
    /// decrement.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the update fails to execute.
    pub async fn decrement_stock(
        conn: &mut SqliteConnection,
        book_id: BookId,
        quantity: i32,
    ) -> Result<bool, RepositoryError> {
        let result = sqlx::query("UPDATE book SET stock = stock - ?1 WHERE id = ?2 AND stock >= ?1")
            .bind(quantity)
            .bind(book_id)
            .execute(&mut *conn)
            .await?;

        Ok(result.rows_affected() == 1)
    }
}
