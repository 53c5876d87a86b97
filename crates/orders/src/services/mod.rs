//! Services orchestrating validation, pricing, persistence and inventory.

pub mod orders;

pub use orders::OrderService;
