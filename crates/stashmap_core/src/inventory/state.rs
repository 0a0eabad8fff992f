//! In-memory place/item maps.
//!
//! # Invariants
//! - `items[id].place_id == p` iff `id` appears exactly once in
//!   `items_by_place[p]`, and in no other place list.
//! - Every place in `places` has an entry in `items_by_place`.
//! - `place_order` and `item_order` hold each live ID once, in creation order.
//!
//! Mutators assume the caller already checked existence; they are only ever
//! called after the matching store write succeeded.

use crate::model::item::{Item, ItemId};
use crate::model::place::{Place, PlaceId};
use std::collections::HashMap;

#[derive(Debug, Default, Clone)]
pub(crate) struct InventoryState {
    places: HashMap<PlaceId, Place>,
    place_order: Vec<PlaceId>,
    items: HashMap<ItemId, Item>,
    item_order: Vec<ItemId>,
    items_by_place: HashMap<PlaceId, Vec<ItemId>>,
}

impl InventoryState {
    pub(crate) fn place(&self, id: PlaceId) -> Option<&Place> {
        self.places.get(&id)
    }

    pub(crate) fn item(&self, id: ItemId) -> Option<&Item> {
        self.items.get(&id)
    }

    pub(crate) fn places(&self) -> impl Iterator<Item = &Place> + '_ {
        self.place_order.iter().filter_map(|id| self.places.get(id))
    }

    pub(crate) fn all_items(&self) -> impl Iterator<Item = &Item> + '_ {
        self.item_order.iter().filter_map(|id| self.items.get(id))
    }

    /// Items of one place in insertion order, `None` for an unknown place.
    pub(crate) fn items_in_place(&self, place_id: PlaceId) -> Option<Vec<&Item>> {
        let ids = self.items_by_place.get(&place_id)?;
        Some(ids.iter().filter_map(|id| self.items.get(id)).collect())
    }

    pub(crate) fn item_count(&self, place_id: PlaceId) -> Option<usize> {
        self.items_by_place.get(&place_id).map(Vec::len)
    }

    pub(crate) fn insert_place(&mut self, place: Place) {
        self.place_order.push(place.id);
        self.items_by_place.entry(place.id).or_default();
        self.places.insert(place.id, place);
    }

    pub(crate) fn replace_place(&mut self, place: Place) {
        self.places.insert(place.id, place);
    }

    /// Removes a place and all items it owns, returning the removed item IDs.
    pub(crate) fn remove_place(&mut self, place_id: PlaceId) -> Vec<ItemId> {
        let owned = self.items_by_place.remove(&place_id).unwrap_or_default();
        for item_id in &owned {
            self.items.remove(item_id);
        }
        self.item_order.retain(|id| !owned.contains(id));
        self.place_order.retain(|id| *id != place_id);
        self.places.remove(&place_id);
        owned
    }

    /// Adds a new item at the end of its place's list.
    pub(crate) fn insert_item(&mut self, item: Item) {
        self.items_by_place
            .entry(item.place_id)
            .or_default()
            .push(item.id);
        self.item_order.push(item.id);
        self.items.insert(item.id, item);
    }

    /// Swaps in an updated record, moving membership when the place changed.
    ///
    /// Both maps are updated inside this one call; a moved item is appended
    /// to the destination list.
    pub(crate) fn replace_item(&mut self, item: Item) {
        let previous_place = self.items.get(&item.id).map(|current| current.place_id);
        if let Some(previous_place) = previous_place {
            if previous_place != item.place_id {
                if let Some(ids) = self.items_by_place.get_mut(&previous_place) {
                    ids.retain(|id| *id != item.id);
                }
                self.items_by_place
                    .entry(item.place_id)
                    .or_default()
                    .push(item.id);
            }
        }
        self.items.insert(item.id, item);
    }

    /// Replaces the global creation order. Unknown IDs are skipped.
    pub(crate) fn set_item_order(&mut self, ids: impl IntoIterator<Item = ItemId>) {
        self.item_order = ids
            .into_iter()
            .filter(|id| self.items.contains_key(id))
            .collect();
    }

    pub(crate) fn remove_item(&mut self, item_id: ItemId) -> Option<Item> {
        let item = self.items.remove(&item_id)?;
        if let Some(ids) = self.items_by_place.get_mut(&item.place_id) {
            ids.retain(|id| *id != item_id);
        }
        self.item_order.retain(|id| *id != item_id);
        Some(item)
    }

    #[cfg(test)]
    pub(crate) fn assert_consistent(&self) {
        for (item_id, item) in &self.items {
            let owners = self
                .items_by_place
                .iter()
                .filter(|(_, ids)| ids.contains(item_id))
                .map(|(place_id, ids)| {
                    (*place_id, ids.iter().filter(|id| *id == item_id).count())
                })
                .collect::<Vec<_>>();
            assert_eq!(owners, vec![(item.place_id, 1)], "item {item_id}");
        }
        for (place_id, ids) in &self.items_by_place {
            assert!(self.places.contains_key(place_id));
            for id in ids {
                assert!(self.items.contains_key(id), "dangling id {id}");
            }
        }
        assert_eq!(self.place_order.len(), self.places.len());
        assert_eq!(self.item_order.len(), self.items.len());
    }
}
