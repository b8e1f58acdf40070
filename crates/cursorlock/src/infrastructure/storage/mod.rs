//! Storage infrastructure: configuration file loading.
//!
//! The `config` sub-module reads the TOML file from an explicit path or the
//! platform-appropriate directory and supplies defaults when it is absent.
//! Nothing is written back.

pub mod config;
