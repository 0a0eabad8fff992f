//! Field validation shared by place and item records.
//!
//! # Invariants
//! - Names are trimmed before they are checked or stored.
//! - Single-line fields never contain line breaks or control characters.

use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};

static CONTROL_CHAR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\p{Cc}]").expect("valid control char regex"));

/// Rejected user input. Always recoverable, never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Place name is blank after trim.
    EmptyPlaceName,
    /// Place photo reference is blank after trim.
    EmptyImage,
    /// Item name is blank after trim.
    EmptyItemName,
    /// A single-line field contains line breaks or control characters.
    MultilineText { field: &'static str },
    /// Coordinate falls outside the display canvas.
    PositionOutOfBounds {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    },
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyPlaceName => write!(f, "place name must not be blank"),
            Self::EmptyImage => write!(f, "place image must not be blank"),
            Self::EmptyItemName => write!(f, "item name must not be blank"),
            Self::MultilineText { field } => {
                write!(f, "{field} must be a single line without control characters")
            }
            Self::PositionOutOfBounds {
                x,
                y,
                width,
                height,
            } => write!(
                f,
                "position ({x}, {y}) is outside the {width}x{height} canvas"
            ),
        }
    }
}

impl Error for ValidationError {}

/// Trims a single-line field, rejecting blank or multi-line values.
///
/// `blank` is returned when nothing but whitespace remains.
pub(crate) fn normalize_single_line(
    value: &str,
    field: &'static str,
    blank: ValidationError,
) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(blank);
    }
    if CONTROL_CHAR_RE.is_match(trimmed) {
        return Err(ValidationError::MultilineText { field });
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::{normalize_single_line, ValidationError};

    #[test]
    fn trims_surrounding_whitespace() {
        let value = normalize_single_line("  手机 ", "item name", ValidationError::EmptyItemName)
            .expect("name should normalize");
        assert_eq!(value, "手机");
    }

    #[test]
    fn rejects_whitespace_only() {
        let err = normalize_single_line(" \t ", "item name", ValidationError::EmptyItemName)
            .unwrap_err();
        assert_eq!(err, ValidationError::EmptyItemName);
    }

    #[test]
    fn rejects_embedded_line_break() {
        let err = normalize_single_line("a\nb", "place name", ValidationError::EmptyPlaceName)
            .unwrap_err();
        assert_eq!(
            err,
            ValidationError::MultilineText {
                field: "place name"
            }
        );
    }
}
