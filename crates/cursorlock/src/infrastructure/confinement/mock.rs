//! In-memory confinement doubles.
//!
//! The real backends clip or warp the system cursor, which needs a desktop
//! session and cannot be observed from test code.  These replace the OS
//! calls with recording:
//!
//! - [`RecordingConfinement`] logs every controller-facing call.  The
//!   harness uses it for `--dry-run`.
//! - [`MockPointer`] simulates a cursor for [`PollWarpConfinement`]
//!   (see `poll_warp`), recording queries, warps and re-associations.
//!
//! Both hand out cloneable handles that share state with the boxed instance,
//! so a test can keep a handle after giving the backend to the controller.
//!
//! [`PollWarpConfinement`]: super::poll_warp::PollWarpConfinement

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};

use cursorlock_core::PixelRect;
use tracing::info;

use super::poll_warp::CursorPointer;
use crate::application::confine_cursor::{ConfinementError, CursorConfinement};

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// One call received by a [`RecordingConfinement`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConfinementCall {
    Apply(PixelRect),
    Release,
    Tick,
}

/// Number of calls an [`announcing`](RecordingConfinement::announcing)
/// recorder keeps; older entries are dropped.
pub const ANNOUNCING_LOG_LIMIT: usize = 256;

#[derive(Debug, Default)]
struct RecorderState {
    calls: VecDeque<ConfinementCall>,
    limit: Option<usize>,
    releases: usize,
    last_announced: Option<PixelRect>,
    fail: bool,
}

/// A backend that records calls instead of touching the cursor.
#[derive(Debug, Clone, Default)]
pub struct RecordingConfinement {
    state: Arc<Mutex<RecorderState>>,
    announce: bool,
}

impl RecordingConfinement {
    /// Records every call without limit.
    pub fn new() -> Self {
        Self::default()
    }

    /// Logs each changed apply and each release at `info`, and keeps only the
    /// most recent [`ANNOUNCING_LOG_LIMIT`] calls so a long dry run stays
    /// flat in memory.
    pub fn announcing() -> Self {
        let recorder = Self {
            announce: true,
            ..Self::default()
        };
        lock(&recorder.state).limit = Some(ANNOUNCING_LOG_LIMIT);
        recorder
    }

    /// Recorded calls, oldest first.
    pub fn calls(&self) -> Vec<ConfinementCall> {
        lock(&self.state).calls.iter().copied().collect()
    }

    /// Only the rectangles passed to `apply_bounds`.
    pub fn applied(&self) -> Vec<PixelRect> {
        lock(&self.state)
            .calls
            .iter()
            .filter_map(|c| match c {
                ConfinementCall::Apply(r) => Some(*r),
                _ => None,
            })
            .collect()
    }

    /// Total releases, including any that fell out of a capped log.
    pub fn release_count(&self) -> usize {
        lock(&self.state).releases
    }

    /// When `true`, every call is recorded and then fails.
    pub fn set_fail(&self, fail: bool) {
        lock(&self.state).fail = fail;
    }

    fn record(&self, call: ConfinementCall) -> Result<(), ConfinementError> {
        let mut state = lock(&self.state);
        if let Some(limit) = state.limit {
            while state.calls.len() >= limit {
                state.calls.pop_front();
            }
        }
        state.calls.push_back(call);
        if call == ConfinementCall::Release {
            state.releases += 1;
        }
        if state.fail {
            return Err(ConfinementError::Platform("injected failure".into()));
        }
        Ok(())
    }
}

impl CursorConfinement for RecordingConfinement {
    fn apply_bounds(&mut self, rect: PixelRect) -> Result<(), ConfinementError> {
        if self.announce {
            let previous = lock(&self.state).last_announced.replace(rect);
            if previous != Some(rect) {
                info!(
                    left = rect.left,
                    top = rect.top,
                    right = rect.right,
                    bottom = rect.bottom,
                    "dry run: would confine cursor"
                );
            }
        }
        self.record(ConfinementCall::Apply(rect))
    }

    fn release(&mut self) -> Result<(), ConfinementError> {
        if self.announce {
            lock(&self.state).last_announced = None;
            info!("dry run: would release cursor");
        }
        self.record(ConfinementCall::Release)
    }

    fn tick(&mut self) -> Result<(), ConfinementError> {
        self.record(ConfinementCall::Tick)
    }

    fn name(&self) -> &'static str {
        "recording"
    }
}

#[derive(Debug, Default)]
struct PointerState {
    position: (f64, f64),
    queries: usize,
    warps: Vec<(f64, f64)>,
    reassociations: usize,
    fail_query: bool,
}

/// A simulated cursor for poll-and-warp tests.
#[derive(Debug, Clone, Default)]
pub struct MockPointer {
    state: Arc<Mutex<PointerState>>,
}

impl MockPointer {
    /// A pointer resting at `(x, y)`.
    pub fn at(x: f64, y: f64) -> Self {
        let pointer = Self::default();
        pointer.move_to(x, y);
        pointer
    }

    /// Simulates the user moving the mouse.
    pub fn move_to(&self, x: f64, y: f64) {
        lock(&self.state).position = (x, y);
    }

    pub fn position_now(&self) -> (f64, f64) {
        lock(&self.state).position
    }

    pub fn queries(&self) -> usize {
        lock(&self.state).queries
    }

    pub fn warps(&self) -> Vec<(f64, f64)> {
        lock(&self.state).warps.clone()
    }

    pub fn reassociations(&self) -> usize {
        lock(&self.state).reassociations
    }

    /// When `true`, position queries fail.
    pub fn set_fail_query(&self, fail: bool) {
        lock(&self.state).fail_query = fail;
    }
}

impl CursorPointer for MockPointer {
    fn position(&mut self) -> Result<(f64, f64), ConfinementError> {
        let mut state = lock(&self.state);
        state.queries += 1;
        if state.fail_query {
            return Err(ConfinementError::Platform("cursor position unavailable".into()));
        }
        Ok(state.position)
    }

    fn warp(&mut self, x: f64, y: f64) -> Result<(), ConfinementError> {
        let mut state = lock(&self.state);
        state.warps.push((x, y));
        state.position = (x, y);
        Ok(())
    }

    fn reassociate(&mut self) -> Result<(), ConfinementError> {
        lock(&self.state).reassociations += 1;
        Ok(())
    }

    fn name(&self) -> &'static str {
        "mock-pointer"
    }
}
