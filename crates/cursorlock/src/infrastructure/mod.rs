//! Infrastructure layer for cursorlock.
//!
//! Contains the OS-facing adapters plus the pieces of the console harness
//! that touch the outside world.
//!
//! **Dependency rule**: this layer may depend on `application` and
//! `cursorlock_core`, but MUST NOT be imported by the `application` or
//! domain layers.
//!
//! # Sub-modules
//!
//! - **`confinement`** – `CursorConfinement` backends.  Windows clips the
//!   cursor with `ClipCursor`; macOS and X11 poll and warp.  Recording and
//!   simulated-pointer doubles are always compiled.
//!
//! - **`screen_info`** – primary display geometry.  `GetSystemMetrics` on
//!   Windows, `CGDisplay` on macOS, Xlib on Linux.
//!
//! - **`storage`** – read-only TOML configuration.
//!
//! - **`console`** – parses harness commands typed on stdin.
//!
//! - **`host_loop`** – the async frame loop that feeds events into a
//!   `HostSession`.

pub mod confinement;
pub mod console;
pub mod host_loop;
pub mod screen_info;
pub mod storage;

#[cfg(target_os = "linux")]
pub(crate) mod x11_display;
