//! Domain entities for CursorLock.
//!
//! Pure data transforms with no OS dependencies: the percentage bounds model,
//! its conversion to device pixels, and parsing of user-entered percentages.
//! Everything here compiles and tests on any platform without a display.

/// Bounds model and percent-to-pixel conversion.
///
/// See [`bounds::PercentBounds`] and [`bounds::percent_to_pixels`].
pub mod bounds;

/// Fallible parsing of percentages typed into a settings surface.
pub mod settings;
