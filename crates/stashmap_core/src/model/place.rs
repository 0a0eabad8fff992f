//! Place domain model.
//!
//! # Responsibility
//! - Describe one named storage location and its reference photo.
//!
//! # Invariants
//! - `name` and `image` are non-blank after trim.
//! - `image` is opaque: core never opens or parses it.

use super::validation::{normalize_single_line, ValidationError};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier of a place.
pub type PlaceId = Uuid;

/// A named location with a reference photo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Place {
    pub id: PlaceId,
    /// User-facing label, e.g. `书房`.
    pub name: String,
    /// Photo path or URI, rendered at canvas size by the display layer.
    pub image: String,
}

impl Place {
    /// Creates a place with a generated ID from user input.
    pub fn new(name: &str, image: &str) -> Result<Self, ValidationError> {
        Ok(Self {
            id: Uuid::new_v4(),
            name: normalize_place_name(name)?,
            image: normalize_image(image)?,
        })
    }

    /// Re-checks fields of a record that did not come through [`Place::new`].
    pub fn validate(&self) -> Result<(), ValidationError> {
        normalize_place_name(&self.name)?;
        normalize_image(&self.image)?;
        Ok(())
    }
}

pub(crate) fn normalize_place_name(value: &str) -> Result<String, ValidationError> {
    normalize_single_line(value, "place name", ValidationError::EmptyPlaceName)
}

fn normalize_image(value: &str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyImage);
    }
    Ok(trimmed.to_string())
}
