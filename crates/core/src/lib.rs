//! Bookmall Core - Shared types library.
//!
//! This crate provides common types used across all bookmall components:
//! - `orders` - Order placement engine (catalog, orders, inventory)
//! - `integration-tests` - End-to-end tests against a real database
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no database access. This
//! keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, stock counts, and statuses

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
