//! Inventory model: places, items and relocation.
//!
//! # Responsibility
//! - Hold the in-memory place/item maps that views read from.
//! - Write every mutation through to the store before applying it in memory.
//! - Notify subscribed views after each successful mutation.
//!
//! # Invariants
//! - Validation and existence checks run before any store write.
//! - A failed store write leaves the in-memory state untouched.
//! - `relocate_item` changes place and position together; afterwards exactly
//!   one place list contains the item.

use super::state::InventoryState;
use crate::model::item::{Item, ItemId};
use crate::model::place::{normalize_place_name, Place, PlaceId};
use crate::model::position::Position;
use crate::model::validation::ValidationError;
use crate::store::inventory_store::{InventoryStore, ItemFilter, StoreError};
use crate::sync::marker::{Marker, MarkerKey};
use crate::sync::view_registry::{DisplaySurface, SubscriptionId, ViewRegistry};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Arc;

pub type InventoryResult<T> = Result<T, InventoryError>;

/// Errors from inventory operations.
#[derive(Debug)]
pub enum InventoryError {
    /// Bad or missing field, or out-of-canvas coordinate.
    Validation(ValidationError),
    /// Referenced place is unknown or already deleted.
    PlaceNotFound(PlaceId),
    /// Referenced item is unknown or already deleted.
    ItemNotFound(ItemId),
    /// Store write or read failed; nothing was applied in memory.
    Storage(StoreError),
}

impl InventoryError {
    /// Whether the caller referenced a stale or deleted ID.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::PlaceNotFound(_) | Self::ItemNotFound(_))
    }
}

impl Display for InventoryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::PlaceNotFound(id) => write!(f, "place not found: {id}"),
            Self::ItemNotFound(id) => write!(f, "item not found: {id}"),
            Self::Storage(err) => write!(f, "storage failure: {err}"),
        }
    }
}

impl Error for InventoryError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Storage(err) => Some(err),
            Self::PlaceNotFound(_) | Self::ItemNotFound(_) => None,
        }
    }
}

impl From<ValidationError> for InventoryError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<StoreError> for InventoryError {
    fn from(value: StoreError) -> Self {
        match value {
            StoreError::PlaceNotFound(id) => Self::PlaceNotFound(id),
            StoreError::ItemNotFound(id) => Self::ItemNotFound(id),
            StoreError::Validation(err) => Self::Validation(err),
            other => Self::Storage(other),
        }
    }
}

/// One entry of the place grid: the place and how many items it holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceSummary {
    pub place: Place,
    pub item_count: usize,
}

/// In-memory inventory backed by a write-through store.
///
/// The store is owned and never handed back out; every write goes through
/// the mutation methods below.
///
/// ```compile_fail
/// use stashmap_core::db::open_db_in_memory;
/// use stashmap_core::{Inventory, SqliteInventoryStore};
///
/// let conn = open_db_in_memory().unwrap();
/// let inventory = Inventory::load(SqliteInventoryStore::try_new(&conn).unwrap()).unwrap();
/// let _store = inventory.store();
/// ```
pub struct Inventory<S: InventoryStore> {
    store: S,
    state: InventoryState,
    views: ViewRegistry,
}

impl<S: InventoryStore> Inventory<S> {
    /// Builds the in-memory model from everything the store holds.
    pub fn load(store: S) -> InventoryResult<Self> {
        let mut state = InventoryState::default();
        for place in store.list_places()? {
            let items = store.list_items(&ItemFilter::in_place(place.id))?;
            state.insert_place(place);
            for item in items {
                state.insert_item(item);
            }
        }

        // Place lists above follow insertion order; the global list follows
        // creation order, which differs once items have been relocated.
        let creation_order = store.list_items(&ItemFilter::default())?;
        if creation_order.len() != state.all_items().count() {
            return Err(InventoryError::Storage(StoreError::InvalidData(
                "items reference places missing from the store".to_string(),
            )));
        }
        state.set_item_order(creation_order.iter().map(|item| item.id));

        info!(
            "event=inventory_load module=inventory status=ok places={} items={}",
            state.places().count(),
            creation_order.len()
        );
        Ok(Self {
            store,
            state,
            views: ViewRegistry::new(),
        })
    }

    /// Registers a live view for change notifications.
    pub fn subscribe(&mut self, view: Arc<dyn DisplaySurface>) -> SubscriptionId {
        self.views.subscribe(view)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.views.unsubscribe(id)
    }

    pub fn place(&self, id: PlaceId) -> Option<&Place> {
        self.state.place(id)
    }

    pub fn item(&self, id: ItemId) -> Option<&Item> {
        self.state.item(id)
    }

    /// Places in creation order.
    pub fn places(&self) -> Vec<&Place> {
        self.state.places().collect()
    }

    /// Every item in creation order.
    pub fn all_items(&self) -> Vec<&Item> {
        self.state.all_items().collect()
    }

    /// Items of one place in insertion order.
    pub fn items_in_place(&self, place_id: PlaceId) -> InventoryResult<Vec<&Item>> {
        self.state
            .items_in_place(place_id)
            .ok_or(InventoryError::PlaceNotFound(place_id))
    }

    pub fn item_count(&self, place_id: PlaceId) -> InventoryResult<usize> {
        self.state
            .item_count(place_id)
            .ok_or(InventoryError::PlaceNotFound(place_id))
    }

    /// Data behind the place grid, in creation order.
    pub fn place_summaries(&self) -> Vec<PlaceSummary> {
        self.state
            .places()
            .map(|place| PlaceSummary {
                place: place.clone(),
                item_count: self.state.item_count(place.id).unwrap_or(0),
            })
            .collect()
    }

    /// Markers for a place photo, in the place's item order.
    pub fn overlay(&self, place_id: PlaceId) -> InventoryResult<Vec<Marker>> {
        let items = self.items_in_place(place_id)?;
        Ok(items
            .into_iter()
            .map(|item| Marker {
                key: MarkerKey {
                    place_id,
                    item_id: item.id,
                },
                label: item.name.clone(),
                position: item.position,
            })
            .collect())
    }

    pub fn create_place(&mut self, name: &str, image: &str) -> InventoryResult<Place> {
        let place = Place::new(name, image)?;
        self.store.insert_place(&place).map_err(|err| {
            log_store_failure("place_create", &err);
            err
        })?;
        self.state.insert_place(place.clone());

        info!(
            "event=place_create module=inventory status=ok place_id={}",
            place.id
        );
        self.views.place_changed(place.id);
        Ok(place)
    }

    /// Renames a place. The photo is fixed because item positions depend on it.
    pub fn rename_place(&mut self, place_id: PlaceId, name: &str) -> InventoryResult<Place> {
        let current = self
            .state
            .place(place_id)
            .ok_or(InventoryError::PlaceNotFound(place_id))?;
        let renamed = Place {
            name: normalize_place_name(name)?,
            ..current.clone()
        };
        self.store.update_place(&renamed).map_err(|err| {
            log_store_failure("place_rename", &err);
            err
        })?;
        self.state.replace_place(renamed.clone());

        info!("event=place_rename module=inventory status=ok place_id={place_id}");
        self.views.place_changed(place_id);
        Ok(renamed)
    }

    /// Deletes a place together with every item it owns.
    pub fn delete_place(&mut self, place_id: PlaceId) -> InventoryResult<()> {
        if self.state.place(place_id).is_none() {
            return Err(InventoryError::PlaceNotFound(place_id));
        }
        self.store.delete_place(place_id).map_err(|err| {
            log_store_failure("place_delete", &err);
            err
        })?;
        let removed = self.state.remove_place(place_id);

        info!(
            "event=place_delete module=inventory status=ok place_id={place_id} removed_items={}",
            removed.len()
        );
        for item_id in removed {
            self.views.item_changed(item_id);
        }
        self.views.place_changed(place_id);
        Ok(())
    }

    /// Pins a new item on a place photo.
    pub fn create_item(
        &mut self,
        place_id: PlaceId,
        name: &str,
        description: &str,
        x: u32,
        y: u32,
    ) -> InventoryResult<Item> {
        let position = Position::new(x, y)?;
        let item = Item::new(place_id, name, description, position)?;
        if self.state.place(place_id).is_none() {
            return Err(InventoryError::PlaceNotFound(place_id));
        }
        self.store.insert_item(&item).map_err(|err| {
            log_store_failure("item_create", &err);
            err
        })?;
        self.state.insert_item(item.clone());

        info!(
            "event=item_create module=inventory status=ok item_id={} place_id={place_id}",
            item.id
        );
        self.views.place_changed(place_id);
        self.views.item_changed(item.id);
        Ok(item)
    }

    /// Edits name and description; place and position stay as they are.
    pub fn update_item(
        &mut self,
        item_id: ItemId,
        name: &str,
        description: &str,
    ) -> InventoryResult<Item> {
        let updated = self
            .state
            .item(item_id)
            .ok_or(InventoryError::ItemNotFound(item_id))?
            .with_details(name, description)?;
        self.store.update_item(&updated).map_err(|err| {
            log_store_failure("item_update", &err);
            err
        })?;
        self.state.replace_item(updated.clone());

        info!("event=item_update module=inventory status=ok item_id={item_id}");
        self.views.place_changed(updated.place_id);
        self.views.item_changed(item_id);
        Ok(updated)
    }

    /// Deletes an item. A second call for the same ID fails with not-found.
    pub fn delete_item(&mut self, item_id: ItemId) -> InventoryResult<()> {
        let place_id = self
            .state
            .item(item_id)
            .map(|item| item.place_id)
            .ok_or(InventoryError::ItemNotFound(item_id))?;
        self.store.delete_item(item_id).map_err(|err| {
            log_store_failure("item_delete", &err);
            err
        })?;
        self.state.remove_item(item_id);

        info!("event=item_delete module=inventory status=ok item_id={item_id} place_id={place_id}");
        self.views.place_changed(place_id);
        self.views.item_changed(item_id);
        Ok(())
    }

    /// Moves an item to `(new_x, new_y)` on `new_place_id`'s photo.
    ///
    /// When the place is unchanged only the position moves and the item keeps
    /// its slot in the place list. Otherwise it leaves the source list and is
    /// appended to the destination list, and both places are notified.
    pub fn relocate_item(
        &mut self,
        item_id: ItemId,
        new_place_id: PlaceId,
        new_x: u32,
        new_y: u32,
    ) -> InventoryResult<Item> {
        let position = Position::new(new_x, new_y)?;
        let current = self
            .state
            .item(item_id)
            .ok_or(InventoryError::ItemNotFound(item_id))?;
        if self.state.place(new_place_id).is_none() {
            return Err(InventoryError::PlaceNotFound(new_place_id));
        }
        let source_place_id = current.place_id;
        let relocated = current.relocated(new_place_id, position);

        self.store.update_item(&relocated).map_err(|err| {
            log_store_failure("item_relocate", &err);
            err
        })?;
        self.state.replace_item(relocated.clone());

        info!(
            "event=item_relocate module=inventory status=ok item_id={item_id} from={source_place_id} to={new_place_id} x={new_x} y={new_y}"
        );
        self.views.place_changed(source_place_id);
        if source_place_id != new_place_id {
            self.views.place_changed(new_place_id);
        }
        self.views.item_changed(item_id);
        Ok(relocated)
    }
}

fn log_store_failure(event: &str, err: &StoreError) {
    warn!("event={event} module=inventory status=error error={err}");
}
