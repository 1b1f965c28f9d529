//! # Configuration Modules
//!
//! Run configuration for feed consumers, layered from built-in defaults, a
//! JSON file, environment variables and command-line flags.

/// Layered `quake-report` configuration.
pub mod config_quake;

pub use config_quake::{load_config, read_config_file, ConfigError, OutputFormat, QuakeConfig, DEFAULT_CONFIG_FILE};
