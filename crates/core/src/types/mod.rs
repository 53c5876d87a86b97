//! Core types for bookmall.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod status;
pub mod stock;

pub use id::*;
pub use status::OrderStatus;
pub use stock::StockCount;
