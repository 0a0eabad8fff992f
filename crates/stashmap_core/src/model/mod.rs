//! Domain model for places, items and photo positions.
//!
//! # Responsibility
//! - Define the canonical records shared by the inventory, store and search.
//! - Own field-level validation so every write path applies the same rules.
//!
//! # Invariants
//! - Every item references exactly one place by `PlaceId`.
//! - Positions always lie inside the fixed display canvas.

pub mod item;
pub mod place;
pub mod position;
pub mod validation;
