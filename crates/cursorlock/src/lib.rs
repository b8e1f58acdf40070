//! cursorlock library entry point.
//!
//! Re-exports all public modules so that integration tests in `tests/`
//! and the binary entry point in `main.rs` share the same module tree.
//!
//! # What does cursorlock do?
//!
//! While a host application is in a particular state (a game level is being
//! played, a kiosk view is showing) the mouse cursor is kept inside a
//! rectangle given as percentages of the primary display.  Outside that state
//! the cursor moves freely.
//!
//! 1. The host reports lifecycle events to a `HostSession`.
//! 2. The session drives a `ConfinementController`, which owns the bounds.
//! 3. On every apply the controller queries the primary screen, converts the
//!    percentages to device pixels, and hands the rectangle to the backend.
//! 4. The backend enforces it: Windows clips the cursor natively
//!    (`ClipCursor`); macOS and X11 have no equivalent, so the cursor is
//!    polled once per frame and warped back inside.

/// Application layer: controller, settings form and host session.
pub mod application;

/// Infrastructure layer: OS adapters, configuration and console input.
pub mod infrastructure;

pub use application::confine_cursor::{
    ApplyError, ConfinementController, ConfinementError, CursorConfinement, ScreenGeometry,
    ScreenQueryError,
};
pub use application::edit_bounds::{BoundsForm, FormError};
pub use application::host_session::{HostEvent, HostSession, SessionStatus};
