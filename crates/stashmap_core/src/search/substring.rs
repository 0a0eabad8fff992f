//! Linear substring search over the in-memory inventory.
//!
//! # Invariants
//! - Matching is case-sensitive containment of the trimmed query.
//! - Blank queries return every item in scope.
//! - Place scope keeps the place's insertion order; global scope keeps
//!   creation order.

use crate::inventory::inventory_model::{Inventory, InventoryError, InventoryResult};
use crate::model::item::{Item, ItemId};
use crate::model::place::PlaceId;
use crate::model::position::Position;
use crate::store::inventory_store::InventoryStore;

/// Which items a query looks at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchScope {
    /// Items of one place, e.g. the search box of a place dialog.
    Place(PlaceId),
    /// Every item, e.g. the search box of the main window.
    Global,
}

/// Search options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    /// Raw text from the search box.
    pub text: String,
    pub scope: SearchScope,
}

impl SearchQuery {
    pub fn global(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            scope: SearchScope::Global,
        }
    }

    pub fn in_place(place_id: PlaceId, text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            scope: SearchScope::Place(place_id),
        }
    }
}

/// One matching item, annotated with its owning place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchHit {
    pub item_id: ItemId,
    pub item_name: String,
    pub place_id: PlaceId,
    pub place_name: String,
    pub position: Position,
    scope: SearchScope,
}

impl SearchHit {
    /// List text: `name` inside a place, `name(place)` for global results.
    pub fn label(&self) -> String {
        match self.scope {
            SearchScope::Place(_) => self.item_name.clone(),
            SearchScope::Global => format!("{}({})", self.item_name, self.place_name),
        }
    }
}

/// Runs one query against the current inventory state.
pub fn search_items<S: InventoryStore>(
    inventory: &Inventory<S>,
    query: &SearchQuery,
) -> InventoryResult<Vec<SearchHit>> {
    let needle = query.text.trim();
    let candidates = match query.scope {
        SearchScope::Place(place_id) => inventory.items_in_place(place_id)?,
        SearchScope::Global => inventory.all_items(),
    };

    candidates
        .into_iter()
        .filter(|item| needle.is_empty() || item.name.contains(needle))
        .map(|item| to_hit(inventory, item, query.scope))
        .collect()
}

fn to_hit<S: InventoryStore>(
    inventory: &Inventory<S>,
    item: &Item,
    scope: SearchScope,
) -> InventoryResult<SearchHit> {
    let place = inventory
        .place(item.place_id)
        .ok_or(InventoryError::PlaceNotFound(item.place_id))?;
    Ok(SearchHit {
        item_id: item.id,
        item_name: item.name.clone(),
        place_id: place.id,
        place_name: place.name.clone(),
        position: item.position,
        scope,
    })
}
