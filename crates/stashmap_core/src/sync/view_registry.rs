//! Display-surface trait and the subscriber registry owned by the inventory.

use crate::model::item::ItemId;
use crate::model::place::PlaceId;
use log::debug;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Callbacks a live view implements to learn that it must re-render.
///
/// Signals carry only IDs. Views pull fresh state from the inventory
/// afterwards and must not assume anything else changed or stayed the same.
pub trait DisplaySurface {
    /// Item count, item list or overlay of this place is stale.
    fn notify_place_changed(&self, place_id: PlaceId);
    /// Anything showing this item (including search results) is stale.
    fn notify_item_changed(&self, item_id: ItemId);
}

/// Handle returned by [`ViewRegistry::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SubscriptionId(u64);

/// Registered display surfaces, notified in subscription order.
#[derive(Default)]
pub struct ViewRegistry {
    views: BTreeMap<SubscriptionId, Arc<dyn DisplaySurface>>,
    next_id: u64,
}

impl ViewRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, view: Arc<dyn DisplaySurface>) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.views.insert(id, view);
        id
    }

    /// Removes a view. Returns `false` when the handle was already gone.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.views.remove(&id).is_some()
    }

    pub fn len(&self) -> usize {
        self.views.len()
    }

    pub fn is_empty(&self) -> bool {
        self.views.is_empty()
    }

    pub(crate) fn place_changed(&self, place_id: PlaceId) {
        debug!(
            "event=view_notify module=sync kind=place place_id={place_id} views={}",
            self.views.len()
        );
        for view in self.views.values() {
            view.notify_place_changed(place_id);
        }
    }

    pub(crate) fn item_changed(&self, item_id: ItemId) {
        debug!(
            "event=view_notify module=sync kind=item item_id={item_id} views={}",
            self.views.len()
        );
        for view in self.views.values() {
            view.notify_item_changed(item_id);
        }
    }
}
