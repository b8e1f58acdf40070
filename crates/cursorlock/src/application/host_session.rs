//! HostSession: maps host lifecycle events onto the confinement controller.
//!
//! The host (a game, a kiosk shell, the bundled console harness) reports
//! what it is doing; the session decides which controller operation that
//! implies.
//!
//! | Event                   | Controller call                               |
//! |-------------------------|-----------------------------------------------|
//! | `EnterConfinedContext`  | `activate()`                                  |
//! | `LeaveConfinedContext`  | `deactivate()`                                |
//! | `Pause`                 | none (frames keep re-applying the lock)       |
//! | `Resume`                | `activate()` (platform may have dropped clip) |
//! | `Frame`                 | `tick()`                                      |
//! | `ApplySettings(b)`      | `set_bounds(b)`, then `activate()` if active  |

use cursorlock_core::PercentBounds;
use tracing::{debug, info, warn};

use super::confine_cursor::ConfinementController;
use super::edit_bounds::BoundsForm;

/// A lifecycle notification from the host application.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HostEvent {
    /// The host entered the state in which the cursor is confined.
    EnterConfinedContext,
    /// The host left that state.
    LeaveConfinedContext,
    /// The host paused (e.g. opened a pause overlay).
    Pause,
    /// The host resumed from a pause or suspension.
    Resume,
    /// One rendered frame elapsed.
    Frame,
    /// The user confirmed new bounds in the settings surface.
    ApplySettings(PercentBounds),
}

/// Read-only view of the session for status displays.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SessionStatus {
    pub active: bool,
    pub paused: bool,
    pub bounds: PercentBounds,
    pub frames: u64,
}

/// Drives a [`ConfinementController`] from host events.
#[derive(Debug)]
pub struct HostSession {
    controller: ConfinementController,
    paused: bool,
    frames: u64,
}

impl HostSession {
    pub fn new(controller: ConfinementController) -> Self {
        Self {
            controller,
            paused: false,
            frames: 0,
        }
    }

    /// Dispatches a single host event.
    pub fn handle(&mut self, event: HostEvent) {
        match event {
            HostEvent::EnterConfinedContext => {
                self.paused = false;
                self.controller.activate();
            }
            HostEvent::LeaveConfinedContext => {
                self.paused = false;
                self.controller.deactivate();
            }
            HostEvent::Pause => {
                debug!("host paused");
                self.paused = true;
            }
            HostEvent::Resume => {
                self.paused = false;
                self.controller.activate();
            }
            HostEvent::Frame => {
                self.frames += 1;
                self.controller.tick();
            }
            HostEvent::ApplySettings(bounds) => {
                self.controller.set_bounds(bounds);
                if self.controller.is_active() {
                    self.controller.activate();
                }
            }
        }
    }

    /// Returns a form pre-filled with the current bounds.
    pub fn settings_form(&self) -> BoundsForm {
        BoundsForm::from_bounds(&self.controller.bounds())
    }

    /// Submits an edited form.  Returns `true` if the bounds were applied.
    ///
    /// An ill-formed rectangle is reported and discarded; the controller is
    /// left untouched.
    pub fn submit_settings(&mut self, form: &BoundsForm) -> bool {
        match form.submit() {
            Ok(bounds) => {
                info!(?bounds, "applying new cursor lock bounds");
                self.handle(HostEvent::ApplySettings(bounds));
                true
            }
            Err(e) => {
                warn!("settings rejected: {e}");
                false
            }
        }
    }

    pub fn status(&self) -> SessionStatus {
        SessionStatus {
            active: self.controller.is_active(),
            paused: self.paused,
            bounds: self.controller.bounds(),
            frames: self.frames,
        }
    }

    pub fn controller(&self) -> &ConfinementController {
        &self.controller
    }

    /// Releases confinement and hands back the controller.
    pub fn shutdown(mut self) -> ConfinementController {
        self.controller.deactivate();
        self.controller
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
