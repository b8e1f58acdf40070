//! Poll-and-warp confinement for platforms without a native clip primitive.
//!
//! `apply_bounds` only records the rectangle.  Enforcement happens in `tick`,
//! which the controller calls once per frame: the cursor position is read
//! once, clamped per axis, and the cursor is warped back only if the clamp
//! actually moved it.
//!
//! The OS-facing half is the [`CursorPointer`] trait.  macOS and X11 each
//! provide a driver; [`MockPointer`](super::mock::MockPointer) stands in for
//! tests.

use cursorlock_core::PixelRect;
use tracing::trace;

use crate::application::confine_cursor::{ConfinementError, CursorConfinement};

/// Reads and moves the system cursor.
pub trait CursorPointer {
    /// Current cursor position in the same space as the screen query.
    ///
    /// # Errors
    ///
    /// Returns [`ConfinementError::Platform`] if the position is unavailable.
    fn position(&mut self) -> Result<(f64, f64), ConfinementError>;

    /// Moves the cursor to `(x, y)` without generating a click.
    ///
    /// # Errors
    ///
    /// Returns [`ConfinementError::Platform`] if the OS refused the warp.
    fn warp(&mut self, x: f64, y: f64) -> Result<(), ConfinementError>;

    /// Re-couples hardware motion to the cursor after a warp.
    ///
    /// Some platforms briefly decouple them after a programmatic move, which
    /// breaks relative-motion deltas.  Default is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`ConfinementError::Platform`] if the OS call failed.
    fn reassociate(&mut self) -> Result<(), ConfinementError> {
        Ok(())
    }

    fn name(&self) -> &'static str;
}

/// [`CursorConfinement`] that enforces bounds by polling a [`CursorPointer`].
pub struct PollWarpConfinement<P> {
    pointer: P,
    rect: PixelRect,
    active: bool,
}

impl<P: CursorPointer> PollWarpConfinement<P> {
    pub fn new(pointer: P) -> Self {
        Self {
            pointer,
            rect: PixelRect::default(),
            active: false,
        }
    }

    /// Returns `true` while a rectangle is being enforced.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// The most recently applied rectangle.
    pub fn rect(&self) -> PixelRect {
        self.rect
    }
}

impl<P: CursorPointer> CursorConfinement for PollWarpConfinement<P> {
    fn apply_bounds(&mut self, rect: PixelRect) -> Result<(), ConfinementError> {
        self.rect = rect;
        self.active = true;
        Ok(())
    }

    fn release(&mut self) -> Result<(), ConfinementError> {
        self.active = false;
        Ok(())
    }

    fn tick(&mut self) -> Result<(), ConfinementError> {
        if !self.active {
            return Ok(());
        }

        let (x, y) = self.pointer.position()?;
        let (cx, cy) = self.rect.clamp_point(x, y);

        if cx != x || cy != y {
            trace!(from = ?(x, y), to = ?(cx, cy), "warping cursor back inside bounds");
            self.pointer.warp(cx, cy)?;
            self.pointer.reassociate()?;
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        self.pointer.name()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
