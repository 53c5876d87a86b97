//! Bookmall order placement engine.
//!
//! Given a buyer and one or more requested (book, quantity) pairs, the
//! engine atomically verifies availability, computes an exact decimal
//! price, persists the order with its lines, and decrements inventory -
//! all inside one database transaction, correct under concurrent requests
//! for the same book.
//!
//! The concurrency primitive is a single conditional update
//! (`UPDATE book SET stock = stock - ? WHERE id = ? AND stock >= ?`); the
//! advisory stock snapshot read during validation only produces friendlier
//! early failures and is never trusted for correctness.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod services;

pub use error::OrderError;
pub use services::OrderService;
