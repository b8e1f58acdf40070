//! Confinement bounds and the percent-to-pixel transform.
//!
//! Bounds are stored as percentages of the primary screen so that a single
//! setting survives resolution changes.  They are turned into absolute pixel
//! coordinates only at the moment of use, against a freshly queried
//! [`ScreenRect`].
//!
//! # Coordinate spaces
//!
//! ```text
//!   percent space              pixel space (device coordinates)
//!   (0,0) ─────── (100,0)      (x,y) ─────────── (x+w,y)
//!     │   ┌─────┐    │           │    ┌─────┐       │
//!     │   │ L,T │    │    ──►    │    │     │       │
//!     │   └─R,B─┘    │           │    └─────┘       │
//!   (0,100) ──── (100,100)     (x,y+h) ──────── (x+w,y+h)
//! ```
//!
//! Each edge is mapped independently:
//! `pixel = screen.origin + screen.size * (percent / 100)`.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Lowest accepted percentage.
pub const MIN_PERCENT: f64 = 0.0;

/// Highest accepted percentage.
pub const MAX_PERCENT: f64 = 100.0;

/// Default left and top edge, in percent.
pub const DEFAULT_NEAR_EDGE: f64 = 25.0;

/// Default right and bottom edge, in percent.
pub const DEFAULT_FAR_EDGE: f64 = 75.0;

/// Errors raised when bounds cannot be used for confinement.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum BoundsError {
    /// `right <= left` or `bottom <= top` (or a NaN edge).
    #[error(
        "bounds are ill-formed: right/bottom must exceed left/top \
         (left={left}, top={top}, right={right}, bottom={bottom})"
    )]
    IllFormed {
        left: f64,
        top: f64,
        right: f64,
        bottom: f64,
    },
}

/// A confinement rectangle expressed as percentages of screen width/height.
///
/// Ordering of the edges is deliberately not enforced by the type; callers
/// check [`PercentBounds::validate`] before applying.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PercentBounds {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Default for PercentBounds {
    /// A centered rectangle covering the middle half of each axis.
    fn default() -> Self {
        Self {
            left: DEFAULT_NEAR_EDGE,
            top: DEFAULT_NEAR_EDGE,
            right: DEFAULT_FAR_EDGE,
            bottom: DEFAULT_FAR_EDGE,
        }
    }
}

impl PercentBounds {
    /// Creates bounds from the four edges, without clamping.
    pub fn new(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Returns a copy with every edge independently clamped into `[0, 100]`.
    ///
    /// Total for every input: NaN becomes `0`, infinities saturate.  Edge
    /// ordering is left untouched.
    pub fn clamped(&self) -> Self {
        Self {
            left: clamp_percent(self.left),
            top: clamp_percent(self.top),
            right: clamp_percent(self.right),
            bottom: clamp_percent(self.bottom),
        }
    }

    /// Returns `true` when `right > left` and `bottom > top`.
    pub fn is_well_formed(&self) -> bool {
        // Written as `>` so that NaN edges are rejected.
        self.right > self.left && self.bottom > self.top
    }

    /// Checks well-formedness, reporting the offending edges on failure.
    ///
    /// # Errors
    ///
    /// Returns [`BoundsError::IllFormed`] when [`is_well_formed`](Self::is_well_formed)
    /// is `false`.
    pub fn validate(&self) -> Result<(), BoundsError> {
        if self.is_well_formed() {
            Ok(())
        } else {
            Err(BoundsError::IllFormed {
                left: self.left,
                top: self.top,
                right: self.right,
                bottom: self.bottom,
            })
        }
    }

    /// Scales these bounds against `screen`, clamping first.
    ///
    /// `screen` must be queried fresh by the caller; a stale rectangle gives
    /// a wrong but harmless result.
    pub fn to_pixels(&self, screen: &ScreenRect) -> PixelRect {
        percent_to_pixels(self, screen)
    }
}

/// Clamps a single percentage into `[0, 100]`, mapping NaN to `0`.
pub fn clamp_percent(value: f64) -> f64 {
    if value.is_nan() {
        return MIN_PERCENT;
    }
    value.clamp(MIN_PERCENT, MAX_PERCENT)
}

/// Clamps every edge of `bounds` into `[0, 100]`.
///
/// Idempotent: `clamp_bounds(&clamp_bounds(b)) == clamp_bounds(b)`.
pub fn clamp_bounds(bounds: &PercentBounds) -> PercentBounds {
    bounds.clamped()
}

/// Origin and size of the primary display in device pixels.
///
/// The origin may be negative on virtual-desktop layouts.  Never cached:
/// query it again before each conversion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl ScreenRect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Returns `true` if either dimension is zero, negative or NaN.
    pub fn is_degenerate(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }
}

/// Absolute confinement rectangle in device pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PixelRect {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl PixelRect {
    pub fn new(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Returns `true` if `(x, y)` lies on or inside the rectangle.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.left && x <= self.right && y >= self.top && y <= self.bottom
    }

    /// Clamps `(x, y)` into the rectangle, one axis at a time.
    ///
    /// Uses `max`/`min` rather than `f64::clamp` so an inverted rectangle
    /// (possible on a degenerate screen) pins to the far edge instead of
    /// panicking.
    pub fn clamp_point(&self, x: f64, y: f64) -> (f64, f64) {
        (
            x.max(self.left).min(self.right),
            y.max(self.top).min(self.bottom),
        )
    }
}

/// Converts percentage bounds into device pixels on `screen`.
///
/// Pure and deterministic.  The bounds are clamped with [`clamp_bounds`]
/// before scaling and each edge is mapped on its own axis.
pub fn percent_to_pixels(bounds: &PercentBounds, screen: &ScreenRect) -> PixelRect {
    let pct = bounds.clamped();
    PixelRect {
        left: screen.x + screen.width * (pct.left / 100.0),
        top: screen.y + screen.height * (pct.top / 100.0),
        right: screen.x + screen.width * (pct.right / 100.0),
        bottom: screen.y + screen.height * (pct.bottom / 100.0),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn svga() -> ScreenRect {
        ScreenRect::new(0.0, 0.0, 800.0, 600.0)
    }

    // ── Clamping ──────────────────────────────────────────────────────────────

    #[test]
    fn test_default_bounds_are_centered_quarter_to_three_quarters() {
        let b = PercentBounds::default();
        assert_eq!(b, PercentBounds::new(25.0, 25.0, 75.0, 75.0));
    }

    #[test]
    fn test_clamp_bounds_pins_out_of_range_edges() {
        // Arrange
        let b = PercentBounds::new(-10.0, 150.0, 250.0, -0.5);

        // Act
        let c = clamp_bounds(&b);

        // Assert
        assert_eq!(c, PercentBounds::new(0.0, 100.0, 100.0, 0.0));
    }

    #[test]
    fn test_clamp_bounds_keeps_in_range_edges_and_inverted_order() {
        let b = PercentBounds::new(60.0, 10.0, 40.0, 90.0);
        assert_eq!(clamp_bounds(&b), b);
    }

    #[test]
    fn test_clamp_bounds_maps_nan_to_zero_and_saturates_infinity() {
        let b = PercentBounds::new(f64::NAN, f64::INFINITY, f64::NEG_INFINITY, 50.0);
        let c = clamp_bounds(&b);
        assert_eq!(c, PercentBounds::new(0.0, 100.0, 0.0, 50.0));
    }

    #[test]
    fn test_clamp_bounds_is_idempotent() {
        let b = PercentBounds::new(-3.0, 42.5, 101.0, 99.9);
        let once = clamp_bounds(&b);
        assert_eq!(clamp_bounds(&once), once);
    }

    // ── Well-formedness ───────────────────────────────────────────────────────

    #[test]
    fn test_validate_accepts_default_bounds() {
        assert!(PercentBounds::default().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_inverted_horizontal_edges() {
        let b = PercentBounds::new(60.0, 10.0, 40.0, 90.0);
        assert!(matches!(b.validate(), Err(BoundsError::IllFormed { left, .. }) if left == 60.0));
    }

    #[test]
    fn test_validate_rejects_zero_height() {
        let b = PercentBounds::new(10.0, 50.0, 90.0, 50.0);
        assert!(!b.is_well_formed());
    }

    #[test]
    fn test_validate_rejects_nan_edge() {
        let b = PercentBounds::new(10.0, 10.0, f64::NAN, 90.0);
        assert!(b.validate().is_err());
    }

    // ── Conversion ────────────────────────────────────────────────────────────

    #[test]
    fn test_percent_to_pixels_full_screen_matches_screen_rect() {
        // Arrange
        let screen = ScreenRect::new(-1920.0, 120.0, 1920.0, 1080.0);

        // Act
        let px = percent_to_pixels(&PercentBounds::new(0.0, 0.0, 100.0, 100.0), &screen);

        // Assert
        assert_eq!(px, PixelRect::new(-1920.0, 120.0, 0.0, 1200.0));
    }

    #[test]
    fn test_percent_to_pixels_scales_each_axis_independently() {
        let px = percent_to_pixels(&PercentBounds::new(10.0, 10.0, 90.0, 90.0), &svga());
        assert_eq!(px, PixelRect::new(80.0, 60.0, 720.0, 540.0));
    }

    #[test]
    fn test_percent_to_pixels_clamps_before_scaling() {
        let px = percent_to_pixels(&PercentBounds::new(-50.0, 0.0, 200.0, 50.0), &svga());
        assert_eq!(px, PixelRect::new(0.0, 0.0, 800.0, 300.0));
    }

    #[test]
    fn test_to_pixels_method_matches_free_function() {
        let b = PercentBounds::default();
        assert_eq!(b.to_pixels(&svga()), percent_to_pixels(&b, &svga()));
    }

    #[test]
    fn test_screen_rect_zero_size_is_degenerate() {
        assert!(ScreenRect::new(0.0, 0.0, 0.0, 1080.0).is_degenerate());
        assert!(!svga().is_degenerate());
    }

    // ── Point clamping ────────────────────────────────────────────────────────

    #[test]
    fn test_clamp_point_moves_outside_point_to_nearest_edge() {
        let r = PixelRect::new(80.0, 60.0, 720.0, 540.0);
        assert_eq!(r.clamp_point(0.0, 0.0), (80.0, 60.0));
        assert_eq!(r.clamp_point(900.0, 300.0), (720.0, 300.0));
    }

    #[test]
    fn test_clamp_point_leaves_inside_point_unchanged() {
        let r = PixelRect::new(80.0, 60.0, 720.0, 540.0);
        assert_eq!(r.clamp_point(400.0, 300.0), (400.0, 300.0));
        assert!(r.contains(400.0, 300.0));
    }

    #[test]
    fn test_clamp_point_on_inverted_rect_does_not_panic() {
        let r = PixelRect::new(10.0, 10.0, 0.0, 0.0);
        assert_eq!(r.clamp_point(5.0, 5.0), (0.0, 0.0));
    }
}
