//! X11 cursor driver for poll-and-warp confinement.
//!
//! Core X11 offers `XGrabPointer` with a `confine_to` window, but that needs
//! a mapped window and an active grab that steals input from the host.
//! Polling with `XQueryPointer` and moving with `XWarpPointer` on the root
//! window works for any client.
//!
//! Pointer coordinates are integral; warp targets are rounded.

use std::os::raw::{c_int, c_uint};

use x11::xlib;

use super::poll_warp::CursorPointer;
use crate::application::confine_cursor::ConfinementError;
use crate::infrastructure::x11_display::XDisplay;

/// Xlib implementation of [`CursorPointer`].
pub struct X11Pointer {
    display: XDisplay,
    root: xlib::Window,
}

impl X11Pointer {
    /// Connects to the X server named by `DISPLAY`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfinementError::Platform`] if the display cannot be opened.
    pub fn new() -> Result<Self, ConfinementError> {
        let display = XDisplay::open().map_err(ConfinementError::Platform)?;
        let root = display.default_root();
        Ok(Self { display, root })
    }
}

impl CursorPointer for X11Pointer {
    fn position(&mut self) -> Result<(f64, f64), ConfinementError> {
        let mut root_return: xlib::Window = 0;
        let mut child_return: xlib::Window = 0;
        let (mut root_x, mut root_y, mut win_x, mut win_y): (c_int, c_int, c_int, c_int) =
            (0, 0, 0, 0);
        let mut mask: c_uint = 0;

        // SAFETY: the display is live and every out-pointer refers to a local.
        let same_screen = unsafe {
            xlib::XQueryPointer(
                self.display.as_ptr(),
                self.root,
                &mut root_return,
                &mut child_return,
                &mut root_x,
                &mut root_y,
                &mut win_x,
                &mut win_y,
                &mut mask,
            )
        };

        if same_screen == xlib::False {
            return Err(ConfinementError::Platform(
                "XQueryPointer: pointer is on another screen".into(),
            ));
        }
        Ok((root_x as f64, root_y as f64))
    }

    fn warp(&mut self, x: f64, y: f64) -> Result<(), ConfinementError> {
        // SAFETY: the display is live.  A zero source window means "move
        // unconditionally"; the destination is the root window.
        unsafe {
            xlib::XWarpPointer(
                self.display.as_ptr(),
                0,
                self.root,
                0,
                0,
                0,
                0,
                x.round() as c_int,
                y.round() as c_int,
            );
            xlib::XFlush(self.display.as_ptr());
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        "x11-poll-warp"
    }
}
