//! Core of the stashmap household inventory.
//! This crate is the single source of truth for place/item invariants.

pub mod config;
pub mod db;
pub mod inventory;
pub mod logging;
pub mod model;
pub mod search;
pub mod store;
pub mod sync;

pub use config::{ConfigError, CoreConfig};
pub use inventory::inventory_model::{Inventory, InventoryError, InventoryResult, PlaceSummary};
pub use inventory::seed::seed_demo;
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::item::{Item, ItemId};
pub use model::place::{Place, PlaceId};
pub use model::position::{Position, CANVAS_HEIGHT, CANVAS_WIDTH};
pub use model::validation::ValidationError;
pub use search::substring::{search_items, SearchHit, SearchQuery, SearchScope};
pub use store::inventory_store::{
    InventoryStore, ItemFilter, SqliteInventoryStore, StoreError, StoreResult,
};
pub use sync::marker::{Marker, MarkerKey};
pub use sync::view_registry::{DisplaySurface, SubscriptionId, ViewRegistry};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
