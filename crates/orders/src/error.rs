//! Error taxonomy for the order engine.
//!
//! All failures are returned as typed results; nothing is swallowed. Any
//! failure after the transaction has opened rolls the whole unit of work
//! back, so callers never observe a partial order or stock mutation.

use thiserror::Error;

use bookmall_core::{BookId, OrderId, StockCount, UserId};

use crate::db::RepositoryError;

/// Errors returned by [`crate::services::OrderService`].
#[derive(Debug, Error)]
pub enum OrderError {
    /// Malformed input (non-positive quantity or identifier, empty batch).
    /// A caller bug - retrying the same request cannot succeed.
    #[error("validation failed: {0}")]
    Validation(String),

    /// The buyer does not exist in the user directory.
    #[error("user {0} does not exist")]
    UserNotFound(UserId),

    /// The requested book does not exist in the catalog.
    #[error("book {0} does not exist")]
    BookNotFound(BookId),

    /// No order with this identifier exists.
    #[error("order {0} does not exist")]
    OrderNotFound(OrderId),

    /// Stock could not cover the requested quantity. `available` is the
    /// last observed snapshot and may be stale under contention; the
    /// request may legitimately succeed later if stock is replenished.
    #[error("insufficient stock for book {book_id}: requested {requested}, available {available}")]
    InsufficientStock {
        book_id: BookId,
        requested: i32,
        available: StockCount,
    },

    /// A storage write or read failed for infrastructure reasons.
    #[error("repository error: {0}")]
    Repository(#[from] RepositoryError),
}

impl OrderError {
    /// Whether resubmitting the identical request can ever succeed.
    ///
    /// Infrastructure failures are safe to retry immediately; stock
    /// shortages may resolve after a restock. Validation and not-found
    /// errors will fail the same way every time. The engine itself never
    /// retries - retry policy belongs to the caller.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Repository(_) | Self::InsufficientStock { .. })
    }
}
