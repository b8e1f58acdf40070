//! Application layer use cases for CursorLock.
//!
//! - **`confine_cursor`** – The confinement controller and the two seams the
//!   infrastructure layer implements: `ScreenGeometry` (primary screen query)
//!   and `CursorConfinement` (the platform enforcement backend).
//!
//! - **`edit_bounds`** – The settings form: raw text fields in, validated
//!   percentage bounds out, with per-field fallback on unparsable input.
//!
//! - **`host_session`** – Translates host lifecycle events (enter, leave,
//!   pause, resume, frame, settings applied) into controller calls.

pub mod confine_cursor;
pub mod edit_bounds;
pub mod host_session;
