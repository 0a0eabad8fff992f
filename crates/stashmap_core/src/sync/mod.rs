//! View synchronization contract.
//!
//! # Responsibility
//! - Define the display-surface callbacks every live view implements.
//! - Fan successful mutations out to all subscribed views.
//!
//! # Invariants
//! - Notifications are sent only after the store write and the in-memory
//!   update both succeeded.
//! - Overlay markers are keyed by `(place, item)`, never by item alone.

pub mod marker;
pub mod view_registry;
