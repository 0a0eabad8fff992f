//! Storage backend contracts and SQLite implementation.
//!
//! # Responsibility
//! - Define the durable record store consumed by the inventory model.
//! - Keep SQL details out of the inventory and search layers.
//!
//! # Invariants
//! - Every write operation is exactly one SQLite transaction.
//! - Item listings are stable: place-scoped by insertion order, global by
//!   creation order.

pub mod inventory_store;
