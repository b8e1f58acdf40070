//! Windows native-clip confinement via `ClipCursor`.
//!
//! The OS itself keeps the cursor inside the clip rectangle, so `tick` has
//! nothing to do.  Windows drops the clip when the foreground window changes;
//! the controller's per-frame re-apply restores it.

use cursorlock_core::PixelRect;
use windows::Win32::Foundation::RECT;
use windows::Win32::UI::WindowsAndMessaging::ClipCursor;

use crate::application::confine_cursor::{ConfinementError, CursorConfinement};

/// Windows implementation of [`CursorConfinement`].
pub struct WindowsClipConfinement;

impl WindowsClipConfinement {
    pub fn new() -> Self {
        Self
    }
}

impl Default for WindowsClipConfinement {
    fn default() -> Self {
        Self::new()
    }
}

/// Converts a pixel rectangle to a Win32 `RECT`, truncating each edge
/// toward zero.
fn to_win32_rect(rect: &PixelRect) -> RECT {
    RECT {
        left: rect.left as i32,
        top: rect.top as i32,
        right: rect.right as i32,
        bottom: rect.bottom as i32,
    }
}

impl CursorConfinement for WindowsClipConfinement {
    fn apply_bounds(&mut self, rect: PixelRect) -> Result<(), ConfinementError> {
        let r = to_win32_rect(&rect);
        // SAFETY: `r` outlives the call; ClipCursor copies the rectangle.
        unsafe { ClipCursor(Some(&r as *const RECT)) }
            .map_err(|e| ConfinementError::Platform(format!("ClipCursor failed: {e}")))
    }

    fn release(&mut self) -> Result<(), ConfinementError> {
        // SAFETY: a null rectangle lifts the clip.
        unsafe { ClipCursor(None) }
            .map_err(|e| ConfinementError::Platform(format!("ClipCursor(NULL) failed: {e}")))
    }

    fn name(&self) -> &'static str {
        "win32-clip-cursor"
    }
}
