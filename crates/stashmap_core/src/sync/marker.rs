//! Read model behind a place's photo overlay.

use crate::model::item::ItemId;
use crate::model::place::PlaceId;
use crate::model::position::Position;
use serde::Serialize;

/// Identity of one overlay marker.
///
/// A relocated item gets a new key on its new place, so views cannot carry
/// a marker across places by accident.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct MarkerKey {
    pub place_id: PlaceId,
    pub item_id: ItemId,
}

/// One dot drawn on a place photo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Marker {
    pub key: MarkerKey,
    /// Tooltip text.
    pub label: String,
    pub position: Position,
}
