//! Catalog item model.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use bookmall_core::{BookId, StockCount};

/// A book in the catalog.
///
/// The order engine never creates or destroys books; it only reads them
/// for pricing/availability snapshots and decrements their stock inside an
/// order transaction. `stock` here is the advisory snapshot at read time -
/// it can be stale by the time the decrement runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub id: BookId,
    pub title: String,
    pub author: String,
    /// Unit price, exact decimal - never floating point.
    pub price: Decimal,
    pub stock: StockCount,
}
