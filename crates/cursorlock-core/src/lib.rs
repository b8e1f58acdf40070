//! # cursorlock-core
//!
//! Shared geometry for CursorLock, the cursor confinement library.
//!
//! Confinement bounds are kept as percentages of the primary display so that
//! they stay meaningful across resolution changes.  This crate turns them into
//! device-pixel rectangles against a screen rectangle supplied by the caller,
//! and provides the per-axis point clamp that polling backends use to pull the
//! cursor back inside.
//!
//! It has zero dependencies on OS APIs; the platform adapters live in the
//! `cursorlock` crate.

pub mod domain;

pub use domain::bounds::{
    clamp_bounds, clamp_percent, percent_to_pixels, BoundsError, PercentBounds, PixelRect,
    ScreenRect, DEFAULT_FAR_EDGE, DEFAULT_NEAR_EDGE, MAX_PERCENT, MIN_PERCENT,
};
pub use domain::settings::{parse_percent, parse_percent_or};
