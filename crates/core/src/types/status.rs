//! Status enums for order entities.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Lifecycle status of an order.
///
/// Stored as an integer column. The order engine only ever writes
/// `Completed` - payment is out of scope, so a successfully placed order
/// counts as paid. `Pending` and `Voided` are reserved for payment and
/// cancellation flows that live outside this subsystem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// Order was cancelled/voided (out-of-scope flow).
    Voided,
    /// Order exists but has not been paid (out-of-scope flow).
    Pending,
    /// Order is paid and complete.
    #[default]
    Completed,
}

/// Error returned when an integer does not map to a known status.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown order status code: {0}")]
pub struct UnknownOrderStatus(pub i32);

impl OrderStatus {
    /// Integer code used in the database.
    #[must_use]
    pub const fn as_i32(self) -> i32 {
        match self {
            Self::Voided => 0,
            Self::Pending => 1,
            Self::Completed => 2,
        }
    }
}

impl TryFrom<i32> for OrderStatus {
    type Error = UnknownOrderStatus;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Self::Voided),
            1 => Ok(Self::Pending),
            2 => Ok(Self::Completed),
            other => Err(UnknownOrderStatus(other)),
        }
    }
}
