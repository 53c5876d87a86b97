//! Domain records for the order engine.
//!
//! Query results cross the repository boundary as these explicit records,
//! never as untyped rows.

pub mod book;
pub mod order;

pub use book::Book;
pub use order::{Order, OrderDetailLine, OrderLine, OrderLineRequest};
