//! Order and order line models.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use bookmall_core::{BookId, OrderId, OrderLineId, OrderStatus, UserId};

/// An order header.
///
/// Created exactly once per successful placement and immutable afterwards
/// within this subsystem. `total_price` is the sum of unit price at
/// purchase time times quantity over all lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub user_id: UserId,
    pub created_at: DateTime<Utc>,
    pub status: OrderStatus,
    pub total_price: Decimal,
}

/// A line belonging to exactly one order.
///
/// `book_title` is a snapshot copied at purchase time, so later catalog
/// renames do not retroactively alter order history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLine {
    pub id: OrderLineId,
    pub order_id: OrderId,
    pub user_id: UserId,
    pub book_id: BookId,
    pub book_title: String,
    pub quantity: i32,
}

/// One requested (book, quantity) pair in a batch order.
///
/// Duplicates of the same book are permitted and become independent lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLineRequest {
    pub book_id: BookId,
    pub quantity: i32,
}

/// An order line joined with the current catalog entry for display.
///
/// The catalog fields are `None` when the book has since been removed from
/// the catalog; the title snapshot is always present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderDetailLine {
    pub order_id: OrderId,
    pub user_id: UserId,
    pub book_id: BookId,
    /// Title as it read at purchase time.
    pub book_title: String,
    pub quantity: i32,
    /// Current catalog author, if the book still exists.
    pub author: Option<String>,
    /// Current catalog price, if the book still exists.
    pub current_price: Option<Decimal>,
}
