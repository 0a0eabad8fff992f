//! Pixel positions on a place photo.
//!
//! Photos are always rendered at a fixed square size, so a position is only
//! meaningful together with the place whose photo it was picked on.

use super::validation::ValidationError;
use serde::{Deserialize, Serialize};

/// Canvas width in logical pixels.
pub const CANVAS_WIDTH: u32 = 400;
/// Canvas height in logical pixels.
pub const CANVAS_HEIGHT: u32 = 400;

/// Validated `(x, y)` offset inside the display canvas.
///
/// Deserialization goes through [`Position::new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawPosition")]
pub struct Position {
    x: u32,
    y: u32,
}

#[derive(Deserialize)]
struct RawPosition {
    x: u32,
    y: u32,
}

impl TryFrom<RawPosition> for Position {
    type Error = ValidationError;

    fn try_from(raw: RawPosition) -> Result<Self, Self::Error> {
        Self::new(raw.x, raw.y)
    }
}

impl Position {
    /// Creates a position, rejecting coordinates outside the canvas.
    ///
    /// Out-of-range input is never clamped.
    pub fn new(x: u32, y: u32) -> Result<Self, ValidationError> {
        if x >= CANVAS_WIDTH || y >= CANVAS_HEIGHT {
            return Err(ValidationError::PositionOutOfBounds {
                x,
                y,
                width: CANVAS_WIDTH,
                height: CANVAS_HEIGHT,
            });
        }
        Ok(Self { x, y })
    }

    pub fn x(&self) -> u32 {
        self.x
    }

    pub fn y(&self) -> u32 {
        self.y
    }
}

#[cfg(test)]
mod tests {
    use super::{Position, CANVAS_HEIGHT, CANVAS_WIDTH};
    use crate::model::validation::ValidationError;

    #[test]
    fn accepts_canvas_corners() {
        assert!(Position::new(0, 0).is_ok());
        assert!(Position::new(CANVAS_WIDTH - 1, CANVAS_HEIGHT - 1).is_ok());
    }

    #[test]
    fn rejects_edge_coordinate() {
        let err = Position::new(CANVAS_WIDTH, 10).unwrap_err();
        assert!(matches!(
            err,
            ValidationError::PositionOutOfBounds { x, y: 10, .. } if x == CANVAS_WIDTH
        ));
        assert!(Position::new(10, CANVAS_HEIGHT).is_err());
    }

    #[test]
    fn deserialization_enforces_canvas_bounds() {
        let err = serde_json::from_str::<Position>(r#"{"x":4000,"y":9000}"#).unwrap_err();
        assert!(err.to_string().contains("4000"));

        let position: Position = serde_json::from_str(r#"{"x":399,"y":0}"#).unwrap();
        assert_eq!(position, Position::new(399, 0).unwrap());
    }
}
