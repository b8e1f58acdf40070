//! TOML configuration for the cursorlock harness.
//!
//! Read from an explicit path or from the platform-appropriate config file:
//! - Windows:  `%APPDATA%\CursorLock\config.toml`
//! - Linux:    `$XDG_CONFIG_HOME/cursorlock/config.toml` (or `~/.config/...`)
//! - macOS:    `~/Library/Application Support/CursorLock/config.toml`
//!
//! The file is only read.  Bounds edited at runtime live in memory for the
//! life of the process and are never written back.
//!
//! ```toml
//! [confinement]
//! left = 10.0
//! top = 10.0
//! right = 90.0
//! bottom = 90.0
//! start_active = true
//!
//! [host]
//! frame_rate = 60
//! log_level = "info"
//! ```
//!
//! Every field has a `#[serde(default = ...)]`, so a missing file, a missing
//! section and a missing key all fall back to the same defaults.

use std::path::{Path, PathBuf};
use std::time::Duration;

use cursorlock_core::{PercentBounds, DEFAULT_FAR_EDGE, DEFAULT_NEAR_EDGE};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Lowest accepted host frame rate, in frames per second.
pub const MIN_FRAME_RATE: u32 = 1;

/// Highest accepted host frame rate, in frames per second.
pub const MAX_FRAME_RATE: u32 = 1000;

/// Error type for configuration file operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The platform config directory could not be determined.
    #[error("could not determine platform config directory")]
    NoPlatformConfigDir,

    /// A file system I/O error occurred.
    #[error("I/O error accessing config at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The TOML content could not be parsed.
    #[error("failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),
}

// ── Config schema types ───────────────────────────────────────────────────────

/// Top-level configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub confinement: ConfinementConfig,
    #[serde(default)]
    pub host: HostConfig,
}

/// Initial confinement bounds and whether to start confined.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ConfinementConfig {
    #[serde(default = "default_near_edge")]
    pub left: f64,
    #[serde(default = "default_near_edge")]
    pub top: f64,
    #[serde(default = "default_far_edge")]
    pub right: f64,
    #[serde(default = "default_far_edge")]
    pub bottom: f64,
    /// Enter the confined context immediately on start-up.
    #[serde(default = "default_true")]
    pub start_active: bool,
}

/// Host loop settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HostConfig {
    /// Ticks per second driven into the controller.
    #[serde(default = "default_frame_rate")]
    pub frame_rate: u32,
    /// `tracing` level: `"error"`, `"warn"`, `"info"`, `"debug"`, `"trace"`.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

// ── Default helpers ───────────────────────────────────────────────────────────

fn default_near_edge() -> f64 {
    DEFAULT_NEAR_EDGE
}
fn default_far_edge() -> f64 {
    DEFAULT_FAR_EDGE
}
fn default_true() -> bool {
    true
}
fn default_frame_rate() -> u32 {
    60
}
fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ConfinementConfig {
    fn default() -> Self {
        Self {
            left: default_near_edge(),
            top: default_near_edge(),
            right: default_far_edge(),
            bottom: default_far_edge(),
            start_active: default_true(),
        }
    }
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            frame_rate: default_frame_rate(),
            log_level: default_log_level(),
        }
    }
}

impl ConfinementConfig {
    /// The configured bounds, clamped into `[0, 100]`.
    pub fn bounds(&self) -> PercentBounds {
        PercentBounds::new(self.left, self.top, self.right, self.bottom).clamped()
    }
}

impl HostConfig {
    /// Interval between frames, with the rate clamped to
    /// `[MIN_FRAME_RATE, MAX_FRAME_RATE]`.
    pub fn frame_interval(&self) -> Duration {
        let rate = self.frame_rate.clamp(MIN_FRAME_RATE, MAX_FRAME_RATE);
        Duration::from_secs_f64(1.0 / f64::from(rate))
    }
}

// ── Config loading ────────────────────────────────────────────────────────────

/// Determines the platform-appropriate directory for the config file.
///
/// # Errors
///
/// Returns [`ConfigError::NoPlatformConfigDir`] when the platform config base
/// directory cannot be determined from the environment.
pub fn config_dir() -> Result<PathBuf, ConfigError> {
    platform_config_dir().ok_or(ConfigError::NoPlatformConfigDir)
}

/// Resolves the full path to the default config file.
///
/// # Errors
///
/// Returns [`ConfigError::NoPlatformConfigDir`] if the base directory cannot be
/// determined.
pub fn config_file_path() -> Result<PathBuf, ConfigError> {
    Ok(config_dir()?.join("config.toml"))
}

/// Parses configuration from TOML text.
///
/// # Errors
///
/// Returns [`ConfigError::Parse`] if the TOML is malformed.
pub fn parse_config(content: &str) -> Result<AppConfig, ConfigError> {
    Ok(toml::from_str(content)?)
}

/// Loads `AppConfig` from `path`, returning `AppConfig::default()` if the file
/// does not exist.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] for file-system errors other than "not found",
/// and [`ConfigError::Parse`] if the TOML is malformed.
pub fn load_config_from(path: &Path) -> Result<AppConfig, ConfigError> {
    match std::fs::read_to_string(path) {
        Ok(content) => parse_config(&content),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(AppConfig::default()),
        Err(e) => Err(ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        }),
    }
}

/// Loads `AppConfig` from the platform config file.
///
/// # Errors
///
/// See [`config_file_path`] and [`load_config_from`].
pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_config_from(&config_file_path()?)
}

/// Resolves the platform config base directory including the app subdirectory.
fn platform_config_dir() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        std::env::var_os("APPDATA").map(|p| PathBuf::from(p).join("CursorLock"))
    }

    #[cfg(target_os = "linux")]
    {
        let base = std::env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| std::env::var_os("HOME").map(|h| PathBuf::from(h).join(".config")))?;
        Some(base.join("cursorlock"))
    }

    #[cfg(target_os = "macos")]
    {
        std::env::var_os("HOME").map(|h| {
            PathBuf::from(h)
                .join("Library")
                .join("Application Support")
                .join("CursorLock")
        })
    }

    #[cfg(not(any(target_os = "windows", target_os = "linux", target_os = "macos")))]
    {
        None
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
