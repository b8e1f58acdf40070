//! ConfinementController: keeps the cursor inside the configured bounds.
//!
//! The controller is the single entry point through which host glue enables,
//! disables and reshapes confinement.  It owns the current [`PercentBounds`],
//! an enabled flag, and exactly one [`CursorConfinement`] backend chosen at
//! construction.  Screen geometry is read through [`ScreenGeometry`] on every
//! apply and never cached.
//!
//! # State machine
//!
//! ```text
//!              activate()                     deactivate()
//!   Disabled ─────────────► Enabled ───────────────────────► Disabled
//!      ▲  │                  │  ▲                              (release)
//!      │  └─ set_bounds ─────┘  └── set_bounds / tick: re-apply
//!      │     (store only)
//! ```
//!
//! # Failure policy
//!
//! None of the public operations return an error.  Ill-formed bounds and
//! platform failures are logged and the current call becomes a no-op; the
//! next frame tries again.  From `activate`, `set_bounds` and `deactivate`
//! failures are logged at `warn`.  Inside `tick` they are logged at `debug`
//! since the same fault would otherwise be reported once per frame.

use cursorlock_core::{BoundsError, PercentBounds, PixelRect, ScreenRect};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Error type for primary-screen queries.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ScreenQueryError {
    #[error("platform error while querying the primary screen: {0}")]
    Platform(String),
}

/// Error type for confinement backends.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfinementError {
    #[error("platform error: {0}")]
    Platform(String),
    #[error("cursor confinement is not supported on this platform")]
    Unsupported,
}

/// Why a single apply attempt did not reach the backend, or failed in it.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ApplyError {
    #[error(transparent)]
    IllFormed(#[from] BoundsError),
    #[error(transparent)]
    Screen(#[from] ScreenQueryError),
    #[error("backend rejected bounds: {0}")]
    Backend(#[from] ConfinementError),
}

/// Reports the primary display's rectangle in the coordinate system the
/// platform's cursor APIs use.
#[cfg_attr(test, mockall::automock)]
pub trait ScreenGeometry {
    /// Queries the primary screen.  Called once per apply; implementations
    /// must not cache.
    ///
    /// # Errors
    ///
    /// Returns [`ScreenQueryError`] when the platform reports no display.
    fn primary_screen_rect(&self) -> Result<ScreenRect, ScreenQueryError>;
}

/// Platform mechanism that enforces a pixel rectangle on the cursor.
///
/// Two shapes exist.  A native-clip backend hands the rectangle to the OS in
/// `apply_bounds` and has nothing to do in `tick`.  A poll-and-warp backend
/// only records the rectangle and clamps the cursor itself on every `tick`.
#[cfg_attr(test, mockall::automock)]
pub trait CursorConfinement {
    /// Starts (or updates) confinement to `rect`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfinementError`] if the OS refused the request.
    fn apply_bounds(&mut self, rect: PixelRect) -> Result<(), ConfinementError>;

    /// Lifts any confinement.  Safe to call when nothing is applied.
    ///
    /// # Errors
    ///
    /// Returns [`ConfinementError`] if the OS refused the request.
    fn release(&mut self) -> Result<(), ConfinementError>;

    /// Per-frame enforcement hook.  No-op unless the backend polls.
    ///
    /// # Errors
    ///
    /// Returns [`ConfinementError`] if the cursor could not be read or moved.
    fn tick(&mut self) -> Result<(), ConfinementError> {
        Ok(())
    }

    /// Short human-readable backend name for logs.
    fn name(&self) -> &'static str;
}

/// Owns the bounds, the enabled flag and the confinement backend.
///
/// Construct one per process and pass it by `&mut` to the host glue.
pub struct ConfinementController {
    bounds: PercentBounds,
    enabled: bool,
    backend: Box<dyn CursorConfinement>,
    screen: Box<dyn ScreenGeometry>,
    last_applied: Option<PixelRect>,
}

impl ConfinementController {
    /// Creates a disabled controller with default bounds.
    pub fn new(backend: Box<dyn CursorConfinement>, screen: Box<dyn ScreenGeometry>) -> Self {
        Self::with_bounds(backend, screen, PercentBounds::default())
    }

    /// Creates a disabled controller starting from `bounds` (clamped).
    pub fn with_bounds(
        backend: Box<dyn CursorConfinement>,
        screen: Box<dyn ScreenGeometry>,
        bounds: PercentBounds,
    ) -> Self {
        debug!(backend = backend.name(), "confinement controller created");
        Self {
            bounds: bounds.clamped(),
            enabled: false,
            backend,
            screen,
            last_applied: None,
        }
    }

    /// Enables confinement and applies the current bounds.
    ///
    /// Idempotent.  Ill-formed bounds are logged and skipped; whatever the
    /// backend last enforced stays in place.
    pub fn activate(&mut self) {
        if !self.enabled {
            info!(bounds = ?self.bounds, "cursor confinement activated");
        }
        self.enabled = true;
        if let Err(e) = self.apply_current() {
            warn!("cursor lock apply skipped: {e}");
        }
    }

    /// Disables confinement and always asks the backend to release.
    pub fn deactivate(&mut self) {
        if self.enabled {
            info!("cursor confinement deactivated");
        }
        self.enabled = false;
        self.last_applied = None;
        if let Err(e) = self.backend.release() {
            warn!(backend = self.backend.name(), "cursor lock release failed: {e}");
        }
    }

    /// Clamps and stores `bounds`; re-applies immediately when enabled.
    pub fn set_bounds(&mut self, bounds: PercentBounds) {
        self.bounds = bounds.clamped();
        debug!(bounds = ?self.bounds, "cursor lock bounds updated");
        if self.enabled {
            if let Err(e) = self.apply_current() {
                warn!("cursor lock apply skipped: {e}");
            }
        }
    }

    /// Per-frame hook.  While enabled, re-applies the bounds (some platforms
    /// drop a clip on focus loss or pause) and then lets the backend poll.
    pub fn tick(&mut self) {
        if !self.enabled {
            return;
        }
        if let Err(e) = self.apply_current() {
            debug!("cursor lock re-apply skipped: {e}");
        }
        if let Err(e) = self.backend.tick() {
            debug!(backend = self.backend.name(), "cursor lock tick failed: {e}");
        }
    }

    /// Returns a snapshot of the current (clamped) bounds.
    pub fn bounds(&self) -> PercentBounds {
        self.bounds
    }

    /// Returns `true` while confinement is enabled.
    pub fn is_active(&self) -> bool {
        self.enabled
    }

    /// The pixel rectangle most recently accepted by the backend while
    /// enabled, if any.
    pub fn last_applied(&self) -> Option<PixelRect> {
        self.last_applied
    }

    /// Name of the backend chosen at construction.
    pub fn backend_name(&self) -> &'static str {
        self.backend.name()
    }

    fn apply_current(&mut self) -> Result<PixelRect, ApplyError> {
        self.bounds.validate()?;
        let screen = self.screen.primary_screen_rect()?;
        let rect = self.bounds.to_pixels(&screen);
        self.backend.apply_bounds(rect)?;
        self.last_applied = Some(rect);
        Ok(rect)
    }
}

impl std::fmt::Debug for ConfinementController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfinementController")
            .field("bounds", &self.bounds)
            .field("enabled", &self.enabled)
            .field("backend", &self.backend.name())
            .field("last_applied", &self.last_applied)
            .finish()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use mockall::predicate::eq;

    fn svga_screen() -> MockScreenGeometry {
        let mut screen = MockScreenGeometry::new();
        screen
            .expect_primary_screen_rect()
            .returning(|| Ok(ScreenRect::new(0.0, 0.0, 800.0, 600.0)));
        screen
    }

    fn named_backend() -> MockCursorConfinement {
        let mut backend = MockCursorConfinement::new();
        backend.expect_name().return_const("mock");
        backend
    }

    fn controller(backend: MockCursorConfinement, screen: MockScreenGeometry) -> ConfinementController {
        ConfinementController::new(Box::new(backend), Box::new(screen))
    }

    // ── Construction ──────────────────────────────────────────────────────────

    #[test]
    fn test_new_controller_is_disabled_with_default_bounds() {
        // Arrange
        let backend = named_backend();

        // Act
        let c = controller(backend, MockScreenGeometry::new());

        // Assert
        assert!(!c.is_active());
        assert_eq!(c.bounds(), PercentBounds::default());
        assert_eq!(c.last_applied(), None);
        assert_eq!(c.backend_name(), "mock");
    }

    #[test]
    fn test_with_bounds_clamps_initial_bounds() {
        let c = ConfinementController::with_bounds(
            Box::new(named_backend()),
            Box::new(MockScreenGeometry::new()),
            PercentBounds::new(-5.0, 10.0, 120.0, 90.0),
        );
        assert_eq!(c.bounds(), PercentBounds::new(0.0, 10.0, 100.0, 90.0));
    }

    // ── activate ──────────────────────────────────────────────────────────────

    #[test]
    fn test_activate_applies_converted_rectangle() {
        // Arrange
        let mut backend = named_backend();
        backend
            .expect_apply_bounds()
            .with(eq(PixelRect::new(200.0, 150.0, 600.0, 450.0)))
            .times(1)
            .returning(|_| Ok(()));
        let mut c = controller(backend, svga_screen());

        // Act
        c.activate();

        // Assert
        assert!(c.is_active());
        assert_eq!(c.last_applied(), Some(PixelRect::new(200.0, 150.0, 600.0, 450.0)));
    }

    #[test]
    fn test_activate_twice_applies_same_rectangle() {
        // Arrange
        let mut backend = named_backend();
        backend
            .expect_apply_bounds()
            .with(eq(PixelRect::new(200.0, 150.0, 600.0, 450.0)))
            .times(2)
            .returning(|_| Ok(()));
        let mut c = controller(backend, svga_screen());

        // Act
        c.activate();
        let first = c.last_applied();
        c.activate();

        // Assert
        assert!(c.is_active());
        assert_eq!(c.last_applied(), first);
    }

    #[test]
    fn test_activate_with_ill_formed_bounds_never_reaches_backend() {
        // Arrange
        let mut backend = named_backend();
        backend.expect_apply_bounds().never();
        let mut screen = MockScreenGeometry::new();
        screen.expect_primary_screen_rect().never();
        let mut c = controller(backend, screen);
        c.set_bounds(PercentBounds::new(60.0, 10.0, 40.0, 90.0));

        // Act
        c.activate();

        // Assert
        assert!(c.is_active(), "enabled flag is set even when apply is skipped");
        assert_eq!(c.last_applied(), None);
    }

    /// Collects formatted log output for the duration of a test.
    #[derive(Clone, Default)]
    struct CapturedLog(std::sync::Arc<std::sync::Mutex<Vec<u8>>>);

    impl CapturedLog {
        fn text(&self) -> String {
            let bytes = self.0.lock().unwrap_or_else(|p| p.into_inner());
            String::from_utf8_lossy(&bytes).into_owned()
        }
    }

    impl std::io::Write for CapturedLog {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0
                .lock()
                .unwrap_or_else(|p| p.into_inner())
                .extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_activate_with_ill_formed_bounds_logs_warning_and_tick_stays_quiet() {
        // Arrange
        let mut backend = named_backend();
        backend.expect_apply_bounds().never();
        backend.expect_tick().returning(|| Ok(()));
        let mut c = controller(backend, svga_screen());
        c.set_bounds(PercentBounds::new(60.0, 10.0, 40.0, 90.0));

        let log = CapturedLog::default();
        let writer = log.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::WARN)
            .finish();

        // Act
        let after_activate = tracing::subscriber::with_default(subscriber, || {
            c.activate();
            let text = log.text();
            c.tick();
            text
        });

        // Assert
        assert!(after_activate.contains("WARN"), "log was: {after_activate}");
        assert!(after_activate.contains("cursor lock apply skipped"));
        // Per-frame failures are reported below `warn`.
        assert_eq!(log.text(), after_activate);
    }

    #[test]
    fn test_activate_with_failing_screen_query_skips_backend() {
        // Arrange
        let mut backend = named_backend();
        backend.expect_apply_bounds().never();
        let mut screen = MockScreenGeometry::new();
        screen
            .expect_primary_screen_rect()
            .times(1)
            .returning(|| Err(ScreenQueryError::Platform("no display".into())));
        let mut c = controller(backend, screen);

        // Act
        c.activate();

        // Assert
        assert!(c.is_active());
        assert_eq!(c.last_applied(), None);
    }

    #[test]
    fn test_activate_backend_failure_is_swallowed() {
        let mut backend = named_backend();
        backend
            .expect_apply_bounds()
            .times(1)
            .returning(|_| Err(ConfinementError::Platform("denied".into())));
        let mut c = controller(backend, svga_screen());

        c.activate();

        assert!(c.is_active());
        assert_eq!(c.last_applied(), None);
    }

    #[test]
    fn test_activate_queries_screen_fresh_each_time() {
        // Arrange: the screen grows between activations.
        let mut screen = MockScreenGeometry::new();
        let mut seq = mockall::Sequence::new();
        screen
            .expect_primary_screen_rect()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|| Ok(ScreenRect::new(0.0, 0.0, 800.0, 600.0)));
        screen
            .expect_primary_screen_rect()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|| Ok(ScreenRect::new(0.0, 0.0, 1600.0, 1200.0)));
        let mut backend = named_backend();
        backend.expect_apply_bounds().times(2).returning(|_| Ok(()));
        let mut c = controller(backend, screen);

        // Act
        c.activate();
        c.activate();

        // Assert
        assert_eq!(c.last_applied(), Some(PixelRect::new(400.0, 300.0, 1200.0, 900.0)));
    }

    // ── deactivate ────────────────────────────────────────────────────────────

    #[test]
    fn test_deactivate_after_activate_releases_exactly_once() {
        // Arrange
        let mut backend = named_backend();
        backend.expect_apply_bounds().returning(|_| Ok(()));
        backend.expect_release().times(1).returning(|| Ok(()));
        let mut c = controller(backend, svga_screen());
        c.activate();

        // Act
        c.deactivate();

        // Assert
        assert!(!c.is_active());
        assert_eq!(c.last_applied(), None);
    }

    #[test]
    fn test_deactivate_releases_even_when_apply_was_skipped() {
        let mut backend = named_backend();
        backend.expect_apply_bounds().never();
        backend.expect_release().times(1).returning(|| Ok(()));
        let mut c = controller(backend, MockScreenGeometry::new());
        c.set_bounds(PercentBounds::new(50.0, 50.0, 50.0, 50.0));
        c.activate();

        c.deactivate();

        assert!(!c.is_active());
    }

    #[test]
    fn test_deactivate_when_disabled_still_releases() {
        let mut backend = named_backend();
        backend.expect_release().times(2).returning(|| Ok(()));
        let mut c = controller(backend, MockScreenGeometry::new());

        c.deactivate();
        c.deactivate();

        assert!(!c.is_active());
    }

    #[test]
    fn test_deactivate_release_failure_still_disables() {
        let mut backend = named_backend();
        backend
            .expect_release()
            .times(1)
            .returning(|| Err(ConfinementError::Platform("busy".into())));
        let mut c = controller(backend, MockScreenGeometry::new());

        c.deactivate();

        assert!(!c.is_active());
    }

    // ── set_bounds ────────────────────────────────────────────────────────────

    #[test]
    fn test_set_bounds_while_disabled_only_stores() {
        // Arrange
        let mut backend = named_backend();
        backend.expect_apply_bounds().never();
        let mut screen = MockScreenGeometry::new();
        screen.expect_primary_screen_rect().never();
        let mut c = controller(backend, screen);

        // Act
        c.set_bounds(PercentBounds::new(10.0, 10.0, 90.0, 150.0));

        // Assert
        assert_eq!(c.bounds(), PercentBounds::new(10.0, 10.0, 90.0, 100.0));
    }

    #[test]
    fn test_set_bounds_while_enabled_reapplies_immediately() {
        // Arrange
        let mut backend = named_backend();
        let mut seq = mockall::Sequence::new();
        backend
            .expect_apply_bounds()
            .with(eq(PixelRect::new(200.0, 150.0, 600.0, 450.0)))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(()));
        backend
            .expect_apply_bounds()
            .with(eq(PixelRect::new(80.0, 60.0, 720.0, 540.0)))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(()));
        let mut c = controller(backend, svga_screen());
        c.activate();

        // Act
        c.set_bounds(PercentBounds::new(10.0, 10.0, 90.0, 90.0));

        // Assert
        assert_eq!(c.last_applied(), Some(PixelRect::new(80.0, 60.0, 720.0, 540.0)));
    }

    #[test]
    fn test_set_ill_formed_bounds_while_enabled_keeps_previous_enforcement() {
        // Arrange
        let mut backend = named_backend();
        backend.expect_apply_bounds().times(1).returning(|_| Ok(()));
        backend.expect_release().never();
        let mut c = controller(backend, svga_screen());
        c.activate();
        let before = c.last_applied();

        // Act
        c.set_bounds(PercentBounds::new(90.0, 10.0, 10.0, 90.0));

        // Assert
        assert!(c.is_active());
        assert_eq!(c.last_applied(), before);
        assert_eq!(c.bounds(), PercentBounds::new(90.0, 10.0, 10.0, 90.0));
    }

    // ── tick ──────────────────────────────────────────────────────────────────

    #[test]
    fn test_tick_while_disabled_does_nothing() {
        let mut backend = named_backend();
        backend.expect_apply_bounds().never();
        backend.expect_tick().never();
        let mut c = controller(backend, MockScreenGeometry::new());

        c.tick();
    }

    #[test]
    fn test_tick_reapplies_before_polling_backend() {
        // Arrange
        let mut backend = named_backend();
        let mut seq = mockall::Sequence::new();
        backend
            .expect_apply_bounds()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(()));
        backend
            .expect_apply_bounds()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(()));
        backend
            .expect_tick()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|| Ok(()));
        let mut c = controller(backend, svga_screen());
        c.activate();

        // Act
        c.tick();

        // Assert
        assert!(c.is_active());
    }

    #[test]
    fn test_tick_with_ill_formed_bounds_still_polls_backend() {
        let mut backend = named_backend();
        backend.expect_apply_bounds().never();
        backend.expect_tick().times(1).returning(|| Ok(()));
        let mut c = controller(backend, MockScreenGeometry::new());
        c.set_bounds(PercentBounds::new(60.0, 10.0, 40.0, 90.0));
        c.activate();

        c.tick();
    }

    #[test]
    fn test_tick_backend_failure_is_swallowed() {
        let mut backend = named_backend();
        backend.expect_apply_bounds().returning(|_| Ok(()));
        backend
            .expect_tick()
            .times(1)
            .returning(|| Err(ConfinementError::Platform("no cursor".into())));
        let mut c = controller(backend, svga_screen());
        c.activate();

        c.tick();

        assert!(c.is_active());
    }

    #[test]
    fn test_debug_output_names_backend() {
        let c = controller(named_backend(), MockScreenGeometry::new());
        let text = format!("{c:?}");
        assert!(text.contains("mock"));
        assert!(text.contains("enabled: false"));
    }
}
