//! Inventory model and demo data.
//!
//! # Responsibility
//! - Own the in-memory place/item state and its write-through persistence.
//! - Provide the relocation operation with its consistency guarantees.

pub mod inventory_model;
pub mod seed;
mod state;
