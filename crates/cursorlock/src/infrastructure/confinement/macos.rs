//! macOS cursor driver for poll-and-warp confinement.
//!
//! macOS has no public cursor-clip API, so the cursor is read and moved each
//! frame through Core Graphics:
//!
//! 1. `CGEventCreate` on a combined-session event source; its location is
//!    the current cursor position in global display coordinates.
//! 2. `CGWarpMouseCursorPosition` moves the cursor without posting events.
//! 3. `CGAssociateMouseAndMouseCursorPosition(true)` re-couples the mouse,
//!    which the warp otherwise suppresses for a short interval.
//!
//! Warping needs no Accessibility permission.

use core_graphics::display::CGDisplay;
use core_graphics::event::CGEvent;
use core_graphics::event_source::{CGEventSource, CGEventSourceStateID};
use core_graphics::geometry::CGPoint;

use super::poll_warp::CursorPointer;
use crate::application::confine_cursor::ConfinementError;

/// Core Graphics implementation of [`CursorPointer`].
pub struct CoreGraphicsPointer;

impl CoreGraphicsPointer {
    pub fn new() -> Self {
        Self
    }
}

impl Default for CoreGraphicsPointer {
    fn default() -> Self {
        Self::new()
    }
}

impl CursorPointer for CoreGraphicsPointer {
    fn position(&mut self) -> Result<(f64, f64), ConfinementError> {
        let source = CGEventSource::new(CGEventSourceStateID::CombinedSessionState)
            .map_err(|_| ConfinementError::Platform("CGEventSourceCreate failed".into()))?;
        let event = CGEvent::new(source)
            .map_err(|_| ConfinementError::Platform("CGEventCreate returned null".into()))?;
        let location = event.location();
        Ok((location.x, location.y))
    }

    fn warp(&mut self, x: f64, y: f64) -> Result<(), ConfinementError> {
        CGDisplay::warp_mouse_cursor_position(CGPoint::new(x, y)).map_err(|code| {
            ConfinementError::Platform(format!("CGWarpMouseCursorPosition failed: {code}"))
        })
    }

    fn reassociate(&mut self) -> Result<(), ConfinementError> {
        CGDisplay::associate_mouse_and_mouse_cursor_position(true).map_err(|code| {
            ConfinementError::Platform(format!(
                "CGAssociateMouseAndMouseCursorPosition failed: {code}"
            ))
        })
    }

    fn name(&self) -> &'static str {
        "coregraphics-poll-warp"
    }
}
