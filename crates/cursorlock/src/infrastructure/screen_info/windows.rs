//! Windows primary-screen query via `GetSystemMetrics`.
//!
//! Uses the virtual-screen metrics, which are in the same coordinate space
//! as `ClipCursor` and `GetCursorPos`.  On a multi-monitor desktop the origin
//! can be negative.

use cursorlock_core::ScreenRect;
use windows::Win32::UI::WindowsAndMessaging::{
    GetSystemMetrics, SM_CXVIRTUALSCREEN, SM_CYVIRTUALSCREEN, SM_XVIRTUALSCREEN,
    SM_YVIRTUALSCREEN,
};

use super::non_degenerate;
use crate::application::confine_cursor::{ScreenGeometry, ScreenQueryError};

/// Windows implementation of [`ScreenGeometry`].
pub struct WindowsScreenGeometry;

impl WindowsScreenGeometry {
    pub fn new() -> Self {
        Self
    }
}

impl Default for WindowsScreenGeometry {
    fn default() -> Self {
        Self::new()
    }
}

impl ScreenGeometry for WindowsScreenGeometry {
    fn primary_screen_rect(&self) -> Result<ScreenRect, ScreenQueryError> {
        // SAFETY: GetSystemMetrics has no preconditions; it returns 0 on failure.
        let (x, y, w, h) = unsafe {
            (
                GetSystemMetrics(SM_XVIRTUALSCREEN),
                GetSystemMetrics(SM_YVIRTUALSCREEN),
                GetSystemMetrics(SM_CXVIRTUALSCREEN),
                GetSystemMetrics(SM_CYVIRTUALSCREEN),
            )
        };
        non_degenerate(
            ScreenRect::new(x as f64, y as f64, w as f64, h as f64),
            "GetSystemMetrics",
        )
    }
}
