//! macOS primary-screen query via Core Graphics.
//!
//! `CGDisplayBounds` reports the main display in global display coordinates
//! (top-left origin, points), which is also the space used by
//! `CGEventGetLocation` and `CGWarpMouseCursorPosition`, so no axis flip is
//! needed here.

use core_graphics::display::CGDisplay;
use cursorlock_core::ScreenRect;

use super::non_degenerate;
use crate::application::confine_cursor::{ScreenGeometry, ScreenQueryError};

/// macOS implementation of [`ScreenGeometry`].
pub struct MacosScreenGeometry;

impl MacosScreenGeometry {
    pub fn new() -> Self {
        Self
    }
}

impl Default for MacosScreenGeometry {
    fn default() -> Self {
        Self::new()
    }
}

impl ScreenGeometry for MacosScreenGeometry {
    fn primary_screen_rect(&self) -> Result<ScreenRect, ScreenQueryError> {
        let bounds = CGDisplay::main().bounds();
        non_degenerate(
            ScreenRect::new(
                bounds.origin.x,
                bounds.origin.y,
                bounds.size.width,
                bounds.size.height,
            ),
            "CGDisplayBounds",
        )
    }
}
