//! Item domain model.
//!
//! # Responsibility
//! - Describe one stored object pinned to a place photo.
//!
//! # Invariants
//! - `name` is non-blank after trim; `description` may be empty.
//! - `place_id` and `position` change together or not at all.

use super::place::PlaceId;
use super::position::Position;
use super::validation::{normalize_single_line, ValidationError};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier of an item.
pub type ItemId = Uuid;

/// A named object stored at a position on its owning place's photo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    /// Owning place. Never dangling.
    pub place_id: PlaceId,
    pub name: String,
    /// Free text, may be empty or span several lines.
    pub description: String,
    /// Offset on the owning place's photo.
    pub position: Position,
}

impl Item {
    /// Creates an item with a generated ID from user input.
    pub fn new(
        place_id: PlaceId,
        name: &str,
        description: &str,
        position: Position,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            id: Uuid::new_v4(),
            place_id,
            name: normalize_item_name(name)?,
            description: description.to_string(),
            position,
        })
    }

    /// Returns a copy carrying new name/description and the same location.
    pub fn with_details(&self, name: &str, description: &str) -> Result<Self, ValidationError> {
        Ok(Self {
            name: normalize_item_name(name)?,
            description: description.to_string(),
            ..self.clone()
        })
    }

    /// Returns a copy placed at `position` on `place_id`.
    ///
    /// The place and position are always supplied together.
    pub fn relocated(&self, place_id: PlaceId, position: Position) -> Self {
        Self {
            place_id,
            position,
            ..self.clone()
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        normalize_item_name(&self.name)?;
        Position::new(self.position.x(), self.position.y())?;
        Ok(())
    }
}

fn normalize_item_name(value: &str) -> Result<String, ValidationError> {
    normalize_single_line(value, "item name", ValidationError::EmptyItemName)
}

#[cfg(test)]
mod tests {
    use super::Item;
    use crate::model::position::Position;
    use crate::model::validation::ValidationError;
    use uuid::Uuid;

    #[test]
    fn with_details_keeps_location() {
        let place_id = Uuid::new_v4();
        let item = Item::new(place_id, "手机", "", Position::new(100, 100).unwrap()).unwrap();

        let edited = item.with_details("旧手机", "抽屉里\n充电线在旁边").unwrap();
        assert_eq!(edited.id, item.id);
        assert_eq!(edited.place_id, place_id);
        assert_eq!(edited.position, item.position);
        assert_eq!(edited.description, "抽屉里\n充电线在旁边");
    }

    #[test]
    fn with_details_rejects_blank_name() {
        let item = Item::new(Uuid::new_v4(), "毛巾", "", Position::new(1, 2).unwrap()).unwrap();
        assert_eq!(
            item.with_details("  ", "x").unwrap_err(),
            ValidationError::EmptyItemName
        );
    }
}
