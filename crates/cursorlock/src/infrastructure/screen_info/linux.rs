//! Linux screen query via the X11 Xlib API.
//!
//! Reports the default screen of the X display.  Plain Xlib exposes no
//! per-monitor offsets without Xrandr, so the origin is always `(0, 0)`;
//! this matches the root-window coordinates used by `XQueryPointer` and
//! `XWarpPointer`.

use cursorlock_core::ScreenRect;
use x11::xlib;

use super::non_degenerate;
use crate::application::confine_cursor::{ScreenGeometry, ScreenQueryError};
use crate::infrastructure::x11_display::XDisplay;

/// Linux X11 implementation of [`ScreenGeometry`].
///
/// Holds its own display connection for the lifetime of the query object.
pub struct X11ScreenGeometry {
    display: XDisplay,
}

impl X11ScreenGeometry {
    /// Connects to the X server named by `DISPLAY`.
    ///
    /// # Errors
    ///
    /// Returns [`ScreenQueryError::Platform`] if the display cannot be opened.
    pub fn new() -> Result<Self, ScreenQueryError> {
        let display = XDisplay::open().map_err(ScreenQueryError::Platform)?;
        Ok(Self { display })
    }
}

impl ScreenGeometry for X11ScreenGeometry {
    fn primary_screen_rect(&self) -> Result<ScreenRect, ScreenQueryError> {
        let raw = self.display.as_ptr();
        // SAFETY: `raw` is a live connection owned by `self.display`.
        let (width, height) = unsafe {
            let screen = xlib::XDefaultScreen(raw);
            (
                xlib::XDisplayWidth(raw, screen),
                xlib::XDisplayHeight(raw, screen),
            )
        };
        non_degenerate(
            ScreenRect::new(0.0, 0.0, width as f64, height as f64),
            "XDisplayWidth/XDisplayHeight",
        )
    }
}
