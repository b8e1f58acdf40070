//! BoundsForm: the settings surface for editing confinement bounds.
//!
//! Holds the four edges as raw text, the way an input dialog would.  The form
//! is pre-filled from the controller's current bounds and, on submit, turns
//! the text back into [`PercentBounds`].  Unparsable fields fall back to the
//! default edge value; the controller never sees a parse failure.

use cursorlock_core::{parse_percent_or, PercentBounds, DEFAULT_FAR_EDGE, DEFAULT_NEAR_EDGE};
use thiserror::Error;

/// Validation failure reported back to the user.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum FormError {
    #[error("Right/Bottom must be larger than Left/Top.")]
    NotWellFormed(PercentBounds),
}

/// Raw text of the four bounds fields.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BoundsForm {
    pub left: String,
    pub top: String,
    pub right: String,
    pub bottom: String,
}

impl BoundsForm {
    /// Pre-populates the form from the current bounds.
    pub fn from_bounds(bounds: &PercentBounds) -> Self {
        Self {
            left: format_percent(bounds.left),
            top: format_percent(bounds.top),
            right: format_percent(bounds.right),
            bottom: format_percent(bounds.bottom),
        }
    }

    /// Builds a form from four text fields in left, top, right, bottom order.
    pub fn from_fields(left: &str, top: &str, right: &str, bottom: &str) -> Self {
        Self {
            left: left.to_string(),
            top: top.to_string(),
            right: right.to_string(),
            bottom: bottom.to_string(),
        }
    }

    /// Parses every field, substituting the default edge on bad input.
    pub fn parse(&self) -> PercentBounds {
        PercentBounds {
            left: parse_percent_or(&self.left, DEFAULT_NEAR_EDGE),
            top: parse_percent_or(&self.top, DEFAULT_NEAR_EDGE),
            right: parse_percent_or(&self.right, DEFAULT_FAR_EDGE),
            bottom: parse_percent_or(&self.bottom, DEFAULT_FAR_EDGE),
        }
    }

    /// Parses and validates the form.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::NotWellFormed`] if the parsed rectangle has
    /// `right <= left` or `bottom <= top`.
    pub fn submit(&self) -> Result<PercentBounds, FormError> {
        let bounds = self.parse();
        if bounds.is_well_formed() {
            Ok(bounds)
        } else {
            Err(FormError::NotWellFormed(bounds))
        }
    }
}

fn format_percent(value: f64) -> String {
    format!("{value:.2}")
}
