//! Order placement service.
//!
//! Orchestrates validation, pricing, persistence and the inventory
//! decrement into one all-or-nothing operation per call. The pre-checks
//! exist purely to fail fast with a useful message before opening a
//! transaction; the conditional decrement inside the transaction is the
//! only check that decides correctness.

use rust_decimal::Decimal;
use sqlx::SqlitePool;
use tracing::{info, warn};

use bookmall_core::{BookId, OrderId, UserId};

use crate::db::{BookRepository, OrderRepository, RepositoryError, UserRepository};
use crate::error::OrderError;
use crate::models::{Book, Order, OrderDetailLine, OrderLineRequest};

/// Order placement service.
///
/// Exposes the two placement operations plus the order history read path.
pub struct OrderService<'a> {
    pool: &'a SqlitePool,
    books: BookRepository<'a>,
    orders: OrderRepository<'a>,
    users: UserRepository<'a>,
}

impl<'a> OrderService<'a> {
    /// Create a new order service.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self {
            pool,
            books: BookRepository::new(pool),
            orders: OrderRepository::new(pool),
            users: UserRepository::new(pool),
        }
    }

    /// Place an order for a single book.
    ///
    /// On success exactly one order with exactly one line exists, the
    /// book's stock is lower by `quantity`, and the new order id is
    /// returned. On any failure nothing is persisted and no stock moves.
    ///
    /// # Errors
    ///
    /// Returns `OrderError::Validation` for a non-positive quantity or
    /// identifier, `OrderError::UserNotFound`/`OrderError::BookNotFound`
    /// for unknown parties, `OrderError::InsufficientStock` when stock
    /// cannot cover the request (from the advisory pre-check or from the
    /// authoritative decrement), and `OrderError::Repository` for
    /// infrastructure failures.
    pub async fn place_order(
        &self,
        user_id: UserId,
        book_id: BookId,
        quantity: i32,
    ) -> Result<OrderId, OrderError> {
        self.check_user(user_id).await?;
        let book = self.check_book(book_id, quantity).await?;
        let total = book.price * Decimal::from(quantity);

        let mut tx = self.pool.begin().await.map_err(RepositoryError::from)?;
        let order_id = OrderRepository::create_order(&mut tx, user_id, &total).await?;
        OrderRepository::append_line(&mut tx, order_id, user_id, book_id, &book.title, quantity)
            .await?;

        if !BookRepository::decrement_stock(&mut tx, book_id, quantity).await? {
            // The advisory pre-check passed but the authoritative check
            // lost the race. Dropping the transaction discards the header
            // and line.
            warn!(%user_id, %book_id, quantity, "stock decrement failed, rolling back order");
            return Err(OrderError::InsufficientStock {
                book_id,
                requested: quantity,
                available: book.stock,
            });
        }

        tx.commit().await.map_err(RepositoryError::from)?;
        info!(%order_id, %user_id, %book_id, quantity, %total, "order placed");
        Ok(order_id)
    }

    /// Place one order covering several (book, quantity) pairs.
    ///
    /// Lines are created in input order; duplicates of the same book stay
    /// separate lines. The whole batch commits or nothing does: the first
    /// failed decrement aborts immediately and rolls back every line and
    /// every decrement that had already succeeded in this call.
    ///
    /// # Errors
    ///
    /// As [`Self::place_order`], plus `OrderError::Validation` for an
    /// empty batch. The pre-pass fails the whole call before any write if
    /// any single item fails its own check.
    pub async fn place_batch_order(
        &self,
        user_id: UserId,
        items: &[OrderLineRequest],
    ) -> Result<OrderId, OrderError> {
        self.check_user(user_id).await?;
        if items.is_empty() {
            return Err(OrderError::Validation(
                "a batch order must contain at least one item".to_owned(),
            ));
        }

        // Fast-fail pre-pass: validate every pair and capture unit prices
        // before opening the transaction. Prices captured here are the
        // ones the total is computed from (they are not re-read later).
        let mut books = Vec::with_capacity(items.len());
        for item in items {
            books.push(self.check_book(item.book_id, item.quantity).await?);
        }

        let total: Decimal = items
            .iter()
            .zip(&books)
            .map(|(item, book)| book.price * Decimal::from(item.quantity))
            .sum();

        let mut tx = self.pool.begin().await.map_err(RepositoryError::from)?;
        let order_id = OrderRepository::create_order(&mut tx, user_id, &total).await?;

        for (item, book) in items.iter().zip(&books) {
            OrderRepository::append_line(
                &mut tx,
                order_id,
                user_id,
                item.book_id,
                &book.title,
                item.quantity,
            )
            .await?;
        }

        for (item, book) in items.iter().zip(&books) {
            if !BookRepository::decrement_stock(&mut tx, item.book_id, item.quantity).await? {
                // No further decrements are attempted; dropping the
                // transaction rolls back the header, all lines, and the
                // decrements that already succeeded in this call.
                warn!(
                    %user_id, book_id = %item.book_id, quantity = item.quantity,
                    "batch decrement failed, rolling back whole order"
                );
                return Err(OrderError::InsufficientStock {
                    book_id: item.book_id,
                    requested: item.quantity,
                    available: book.stock,
                });
            }
        }

        tx.commit().await.map_err(RepositoryError::from)?;
        info!(%order_id, %user_id, lines = items.len(), %total, "batch order placed");
        Ok(order_id)
    }

    /// List a buyer's order headers, newest first.
    ///
    /// # Errors
    ///
    /// Returns `OrderError::Validation`/`OrderError::UserNotFound` for a
    /// bad buyer, `OrderError::Repository` for infrastructure failures.
    pub async fn my_orders(&self, user_id: UserId) -> Result<Vec<Order>, OrderError> {
        self.check_user(user_id).await?;
        Ok(self.orders.list_for_user(user_id).await?)
    }

    /// Fetch an order's lines joined with the current catalog entries.
    ///
    /// # Errors
    ///
    /// Returns `OrderError::Validation` for a non-positive id and
    /// `OrderError::OrderNotFound` if the order has no lines.
    pub async fn order_detail(
        &self,
        order_id: OrderId,
    ) -> Result<Vec<OrderDetailLine>, OrderError> {
        if order_id.as_i32() <= 0 {
            return Err(OrderError::Validation(
                "order id must be a positive integer".to_owned(),
            ));
        }

        let lines = self.orders.detail(order_id).await?;
        if lines.is_empty() {
            return Err(OrderError::OrderNotFound(order_id));
        }
        Ok(lines)
    }

    /// Validate the buyer id and confirm the buyer exists.
    async fn check_user(&self, user_id: UserId) -> Result<(), OrderError> {
        if user_id.as_i32() <= 0 {
            return Err(OrderError::Validation(
                "user id must be a positive integer".to_owned(),
            ));
        }
        if !self.users.exists(user_id).await? {
            return Err(OrderError::UserNotFound(user_id));
        }
        Ok(())
    }

    /// Validate one (book, quantity) pair and resolve its pricing
    /// snapshot.
    ///
    /// The stock check here is advisory: it saves a wasted transaction
    /// and produces a message with the observed count, but the snapshot
    /// can be stale by the time the decrement runs. The decrement always
    /// wins.
    async fn check_book(&self, book_id: BookId, quantity: i32) -> Result<Book, OrderError> {
        if book_id.as_i32() <= 0 {
            return Err(OrderError::Validation(
                "book id must be a positive integer".to_owned(),
            ));
        }
        if quantity <= 0 {
            return Err(OrderError::Validation(format!(
                "quantity for book {book_id} must be a positive integer"
            )));
        }

        let book = self
            .books
            .get_by_id(book_id)
            .await?
            .ok_or(OrderError::BookNotFound(book_id))?;

        if !book.stock.can_satisfy(quantity) {
            return Err(OrderError::InsufficientStock {
                book_id,
                requested: quantity,
                available: book.stock,
            });
        }

        Ok(book)
    }
}
