//! Item name search.
//!
//! # Responsibility
//! - Match item names against type-as-you-search text.
//! - Scope results to one place or the whole inventory.
//!
//! Nothing here is persisted; every query reads the current model state.

pub mod substring;
