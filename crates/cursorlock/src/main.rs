//! cursorlock console harness: entry point.
//!
//! Plays the part of a host application.  It builds a `ConfinementController`
//! on the platform backend, drives it with frames at a fixed rate, and takes
//! lifecycle commands from stdin.
//!
//! # Usage
//!
//! ```text
//! cursorlock [OPTIONS]
//!
//! Options:
//!   --config <PATH>        Config file [default: platform config dir]
//!   --left <PCT>           Left edge override, percent of screen width
//!   --top <PCT>            Top edge override
//!   --right <PCT>          Right edge override
//!   --bottom <PCT>         Bottom edge override
//!   --frame-rate <FPS>     Frames per second driven into the controller
//!   --duration <SECS>      Stop automatically after this many seconds
//!   --dry-run              Log what would be confined; never touch the cursor
//! ```
//!
//! Console commands: `enter`, `leave`, `pause`, `resume`,
//! `bounds <l> <t> <r> <b>`, `status`, `quit`.
//!
//! Whatever way the loop ends (quit, Ctrl+C, `--duration`) the cursor is
//! released before the process exits.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use cursorlock::application::confine_cursor::ConfinementController;
use cursorlock::application::host_session::{HostEvent, HostSession};
use cursorlock::infrastructure::confinement::{mock::RecordingConfinement, native_confinement};
use cursorlock::infrastructure::host_loop::{run_host_loop, spawn_stdin_reader};
use cursorlock::infrastructure::screen_info::{native_screen_geometry, FixedScreenGeometry};
use cursorlock::infrastructure::storage::config::{load_config, load_config_from, AppConfig};
use cursorlock_core::{parse_percent_or, PercentBounds};

// ── CLI argument definitions ──────────────────────────────────────────────────

/// Confines the mouse cursor to a percentage region of the primary display.
#[derive(Debug, Parser)]
#[command(
    name = "cursorlock",
    about = "Confine the mouse cursor to a percentage region of the primary display",
    version
)]
struct Cli {
    /// Path to a TOML config file.  Defaults to the platform config directory.
    #[arg(long, env = "CURSORLOCK_CONFIG")]
    config: Option<PathBuf>,

    /// Left edge in percent of screen width.  Unparsable text keeps the
    /// configured value.
    #[arg(long, allow_hyphen_values = true)]
    left: Option<String>,

    /// Top edge in percent of screen height.
    #[arg(long, allow_hyphen_values = true)]
    top: Option<String>,

    /// Right edge in percent of screen width.
    #[arg(long, allow_hyphen_values = true)]
    right: Option<String>,

    /// Bottom edge in percent of screen height.
    #[arg(long, allow_hyphen_values = true)]
    bottom: Option<String>,

    /// Frames per second; overrides `host.frame_rate`.
    #[arg(long, env = "CURSORLOCK_FRAME_RATE")]
    frame_rate: Option<u32>,

    /// Stop automatically after this many seconds.
    #[arg(long)]
    duration: Option<u64>,

    /// Use a fixed 1920x1080 screen and a recording backend.
    #[arg(long)]
    dry_run: bool,
}

impl Cli {
    /// Reads the config file named by `--config`, or the platform default.
    fn load_config(&self) -> anyhow::Result<AppConfig> {
        match &self.config {
            Some(path) => load_config_from(path)
                .with_context(|| format!("failed to load config from {}", path.display())),
            None => load_config().context("failed to load config"),
        }
    }

    /// Applies the command-line overrides on top of `config`.
    fn apply_overrides(&self, config: &mut AppConfig) {
        let c = &mut config.confinement;
        if let Some(text) = &self.left {
            c.left = parse_percent_or(text, c.left);
        }
        if let Some(text) = &self.top {
            c.top = parse_percent_or(text, c.top);
        }
        if let Some(text) = &self.right {
            c.right = parse_percent_or(text, c.right);
        }
        if let Some(text) = &self.bottom {
            c.bottom = parse_percent_or(text, c.bottom);
        }
        if let Some(rate) = self.frame_rate {
            config.host.frame_rate = rate;
        }
    }

    fn stop_after(&self) -> Option<Duration> {
        self.duration.map(Duration::from_secs)
    }
}

/// Builds the controller on the native backend, or on doubles for `--dry-run`.
fn build_controller(dry_run: bool, bounds: PercentBounds) -> anyhow::Result<ConfinementController> {
    if dry_run {
        return Ok(ConfinementController::with_bounds(
            Box::new(RecordingConfinement::announcing()),
            Box::new(FixedScreenGeometry::single_1080p()),
            bounds,
        ));
    }

    let backend = native_confinement().context("no cursor confinement backend available")?;
    let screen = native_screen_geometry().context("cannot query the primary screen")?;
    Ok(ConfinementController::with_bounds(backend, screen, bounds))
}

// ── Entry point ───────────────────────────────────────────────────────────────

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Config is read before logging so `host.log_level` can seed the filter.
    let config_result = cli.load_config();
    let log_level = config_result
        .as_ref()
        .map(|c| c.host.log_level.clone())
        .unwrap_or_else(|_| "info".to_string());

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log_level)),
        )
        .init();

    let mut config = config_result?;
    cli.apply_overrides(&mut config);

    let bounds = config.confinement.bounds();
    if !bounds.is_well_formed() {
        warn!(?bounds, "configured bounds are ill-formed; confinement will not apply");
    }

    let controller = build_controller(cli.dry_run, bounds)?;
    info!(
        backend = controller.backend_name(),
        ?bounds,
        frame_rate = config.host.frame_rate,
        "cursorlock starting"
    );

    let mut session = HostSession::new(controller);
    if config.confinement.start_active {
        session.handle(HostEvent::EnterConfinedContext);
    }

    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("failed to listen for Ctrl+C signal: {e}");
            std::future::pending::<()>().await;
        }
    };

    let exit = run_host_loop(
        &mut session,
        spawn_stdin_reader(),
        config.host.frame_interval(),
        cli.stop_after(),
        shutdown,
    )
    .await;

    let status = session.status();
    let controller = session.shutdown();
    info!(
        ?exit,
        frames = status.frames,
        released = !controller.is_active(),
        "cursorlock stopped"
    );
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
