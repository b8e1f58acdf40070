//! Platform cursor-confinement backends.
//!
//! Exactly one native backend is compiled per target and re-exported as
//! `NativeConfinement`:
//!
//! | Target  | Variant        | Mechanism                                   |
//! |---------|----------------|---------------------------------------------|
//! | Windows | native clip    | `ClipCursor` (OS enforces continuously)     |
//! | macOS   | poll-and-warp  | Core Graphics location + warp, every frame  |
//! | Linux   | poll-and-warp  | `XQueryPointer` + `XWarpPointer`, per frame |
//!
//! The poll-and-warp logic is shared in [`poll_warp`]; only the
//! [`CursorPointer`](poll_warp::CursorPointer) driver is platform specific.
//! The in-memory doubles in [`mock`] are always compiled.

pub mod mock;
pub mod poll_warp;

#[cfg(target_os = "windows")]
pub mod windows;

#[cfg(target_os = "windows")]
pub use windows::WindowsClipConfinement as NativeConfinement;

#[cfg(target_os = "macos")]
pub mod macos;

#[cfg(target_os = "macos")]
pub type NativeConfinement = poll_warp::PollWarpConfinement<macos::CoreGraphicsPointer>;

#[cfg(target_os = "linux")]
pub mod linux;

#[cfg(target_os = "linux")]
pub type NativeConfinement = poll_warp::PollWarpConfinement<linux::X11Pointer>;

use crate::application::confine_cursor::{ConfinementError, CursorConfinement};

/// Builds the confinement backend for the compile target.
///
/// # Errors
///
/// Returns [`ConfinementError::Unsupported`] on targets without a backend,
/// or [`ConfinementError::Platform`] if the platform connection fails.
pub fn native_confinement() -> Result<Box<dyn CursorConfinement>, ConfinementError> {
    #[cfg(target_os = "windows")]
    {
        Ok(Box::new(windows::WindowsClipConfinement::new()))
    }

    #[cfg(target_os = "macos")]
    {
        Ok(Box::new(poll_warp::PollWarpConfinement::new(
            macos::CoreGraphicsPointer::new(),
        )))
    }

    #[cfg(target_os = "linux")]
    {
        Ok(Box::new(poll_warp::PollWarpConfinement::new(
            linux::X11Pointer::new()?,
        )))
    }

    #[cfg(not(any(target_os = "windows", target_os = "macos", target_os = "linux")))]
    {
        Err(ConfinementError::Unsupported)
    }
}
