//! Stock count with withdrawn/out-of-stock/available semantics.

use serde::{Deserialize, Serialize};

/// Remaining stock for a catalog item.
///
/// The raw counter has three-way semantics:
/// - `-1` - the item is permanently withdrawn and can never be ordered again
/// - `0` - temporarily out of stock (may be restocked later)
/// - `>= 1` - available quantity
///
/// The counter is only ever decremented by the inventory decrement inside
/// an order transaction; restock and withdrawal are admin operations that
/// happen elsewhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StockCount(i32);

impl StockCount {
    /// Sentinel value for a permanently withdrawn item.
    pub const WITHDRAWN: Self = Self(-1);

    /// Create a stock count from its raw counter value.
    #[must_use]
    pub const fn new(count: i32) -> Self {
        Self(count)
    }

    /// Raw counter value as stored in the database.
    #[must_use]
    pub const fn as_i32(self) -> i32 {
        self.0
    }

    /// Whether the item has been permanently withdrawn from sale.
    #[must_use]
    pub const fn is_withdrawn(self) -> bool {
        self.0 < 0
    }

    /// Whether the advisory snapshot can satisfy a request for `quantity`
    /// units. A withdrawn item never can: `-1` fails `>= quantity` for any
    /// positive quantity, mirroring the authoritative conditional update.
    #[must_use]
    pub const fn can_satisfy(self, quantity: i32) -> bool {
        quantity > 0 && self.0 >= quantity
    }
}

impl From<i32> for StockCount {
    fn from(count: i32) -> Self {
        Self(count)
    }
}

impl From<StockCount> for i32 {
    fn from(count: StockCount) -> Self {
        count.0
    }
}

impl std::fmt::Display for StockCount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
