//! Platform-specific primary-screen queries.
//!
//! The controller converts percentage bounds into device pixels against the
//! rectangle returned here, so it must be in the same coordinate system as
//! the platform's cursor APIs.
//!
//! # Platform implementations
//!
//! Each platform implements [`ScreenGeometry`]; the correct one is selected
//! at compile time via `#[cfg(target_os = ...)]` and re-exported as
//! `NativeScreenGeometry`:
//!
//! | Module    | OS      | API used                                        |
//! |-----------|---------|-------------------------------------------------|
//! | `windows` | Windows | `GetSystemMetrics(SM_*VIRTUALSCREEN)`           |
//! | `linux`   | Linux   | `XDisplayWidth` / `XDisplayHeight` (Xlib)       |
//! | `macos`   | macOS   | `CGDisplayBounds(CGMainDisplayID())`            |
//!
//! A [`FixedScreenGeometry`] is always compiled (not guarded by `#[cfg]`) so
//! tests and dry runs work without a physical display.
//!
//! A zero-sized screen is reported as an error rather than converted: a
//! degenerate rectangle would collapse the confinement region to a point.

use cursorlock_core::ScreenRect;

use crate::application::confine_cursor::{ScreenGeometry, ScreenQueryError};

// ── Windows implementation ────────────────────────────────────────────────────

#[cfg(target_os = "windows")]
pub mod windows;

#[cfg(target_os = "windows")]
pub use windows::WindowsScreenGeometry as NativeScreenGeometry;

// ── Linux implementation ──────────────────────────────────────────────────────

#[cfg(target_os = "linux")]
pub mod linux;

#[cfg(target_os = "linux")]
pub use linux::X11ScreenGeometry as NativeScreenGeometry;

// ── macOS implementation ──────────────────────────────────────────────────────

#[cfg(target_os = "macos")]
pub mod macos;

#[cfg(target_os = "macos")]
pub use macos::MacosScreenGeometry as NativeScreenGeometry;

/// Builds the screen query for the compile target.
///
/// # Errors
///
/// Returns [`ScreenQueryError::Platform`] if the platform connection cannot
/// be established or the target has no implementation.
pub fn native_screen_geometry() -> Result<Box<dyn ScreenGeometry>, ScreenQueryError> {
    #[cfg(target_os = "windows")]
    {
        Ok(Box::new(windows::WindowsScreenGeometry::new()))
    }

    #[cfg(target_os = "macos")]
    {
        Ok(Box::new(macos::MacosScreenGeometry::new()))
    }

    #[cfg(target_os = "linux")]
    {
        Ok(Box::new(linux::X11ScreenGeometry::new()?))
    }

    #[cfg(not(any(target_os = "windows", target_os = "macos", target_os = "linux")))]
    {
        Err(ScreenQueryError::Platform(
            "no screen query is available for this platform".to_string(),
        ))
    }
}

/// Rejects zero, negative or NaN sizes reported by a platform query.
pub(crate) fn non_degenerate(rect: ScreenRect, api: &str) -> Result<ScreenRect, ScreenQueryError> {
    if rect.is_degenerate() {
        return Err(ScreenQueryError::Platform(format!(
            "{api} reported a degenerate primary screen ({}x{})",
            rect.width, rect.height
        )));
    }
    Ok(rect)
}

// ── Fixed implementation (always compiled) ────────────────────────────────────

/// A screen query that always returns the same rectangle.
///
/// Used in tests and by the `--dry-run` harness mode.  Does not make any OS
/// calls.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedScreenGeometry {
    pub rect: ScreenRect,
}

impl FixedScreenGeometry {
    pub fn new(rect: ScreenRect) -> Self {
        Self { rect }
    }

    /// A single 1920×1080 display at the origin.
    pub fn single_1080p() -> Self {
        Self::new(ScreenRect::new(0.0, 0.0, 1920.0, 1080.0))
    }

    /// A single 800×600 display at the origin.
    pub fn svga() -> Self {
        Self::new(ScreenRect::new(0.0, 0.0, 800.0, 600.0))
    }
}

impl ScreenGeometry for FixedScreenGeometry {
    /// Returns the configured rectangle, or an error if it is degenerate.
    fn primary_screen_rect(&self) -> Result<ScreenRect, ScreenQueryError> {
        non_degenerate(self.rect, "FixedScreenGeometry")
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
