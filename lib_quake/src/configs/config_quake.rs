use crate::errors::QuakeError;
use crate::quakes::{FeedQuery, OrderBy};
use chrono::Locale;
use chrono_tz::Tz;
use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

/// Config file looked up in the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "quake_report.conf";

#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file exists but could not be read.
    #[error("I/O error occurred: {0}")]
    IoError(#[from] io::Error),

    /// The config file is not valid JSON for [`QuakeConfig`].
    #[error("Invalid config file: {0}")]
    ParseError(#[from] serde_json::Error),
}

/// How records are printed.
#[derive(ValueEnum, Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Two aligned lines per event.
    #[default]
    Text,
    /// Pretty-printed array of records with their presentation.
    Json,
}

#[derive(Parser, Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
#[command(name = "quake-report", about = "Recent earthquakes from the USGS feed", version)]
#[serde(rename_all = "camelCase")]
pub struct QuakeConfig {
    #[arg(long = "url", env = "QUAKE_FEED_URL", help = "Full feed URL. Overrides the query filters below.")]
    pub feed_url: Option<String>,

    #[arg(long, env = "QUAKE_BASE_URL", help = "FDSN query endpoint the filters are appended to.")]
    pub base_url: Option<String>,

    #[arg(long, env = "QUAKE_MIN_MAGNITUDE", help = "Minimum magnitude to include.")]
    pub min_magnitude: Option<f64>,

    #[arg(long, env = "QUAKE_LIMIT", help = "Maximum number of events to request.")]
    pub limit: Option<u32>,

    #[arg(long, env = "QUAKE_ORDER_BY", help = "Sort order: time, time-asc, magnitude or magnitude-asc.")]
    pub order_by: Option<OrderBy>,

    #[arg(long, env = "QUAKE_TIME_ZONE", help = "IANA time zone used for dates and times, e.g. America/Los_Angeles.")]
    pub time_zone: Option<String>,

    #[arg(long, env = "QUAKE_LOCALE", help = "Locale for month names and AM/PM, e.g. en_US or fr_FR.")]
    pub locale: Option<String>,

    #[arg(long = "config", env = "QUAKE_CONFIG_PATH", help = "Path to the JSON configuration file.")]
    pub config_path: Option<PathBuf>,

    #[arg(long, env = "QUAKE_LOG_DIR", help = "Directory for log files.")]
    pub log_dir: Option<PathBuf>,

    #[arg(long, env = "QUAKE_LOG_LEVEL", help = "Logging level (trace, debug, info, warn, error, fatal).")]
    pub log_level: Option<String>,

    #[arg(long, value_enum, env = "QUAKE_FORMAT", help = "Output format.")]
    pub format: Option<OutputFormat>,
}

impl QuakeConfig {
    /// Built-in defaults, the lowest layer.
    pub fn defaults() -> Self {
        let query = FeedQuery::default();
        Self {
            base_url: Some(query.base_url),
            min_magnitude: Some(query.min_magnitude),
            limit: Some(query.limit),
            order_by: Some(query.order_by),
            time_zone: Some("UTC".to_string()),
            locale: Some("en_US".to_string()),
            log_level: Some("info".to_string()),
            format: Some(OutputFormat::Text),
            ..Default::default()
        }
    }

    /// Field-wise merge where `Some` values in `other` win.
    pub fn merge(self, other: QuakeConfig) -> QuakeConfig {
        QuakeConfig {
            feed_url: other.feed_url.or(self.feed_url),
            base_url: other.base_url.or(self.base_url),
            min_magnitude: other.min_magnitude.or(self.min_magnitude),
            limit: other.limit.or(self.limit),
            order_by: other.order_by.or(self.order_by),
            time_zone: other.time_zone.or(self.time_zone),
            locale: other.locale.or(self.locale),
            config_path: other.config_path.or(self.config_path),
            log_dir: other.log_dir.or(self.log_dir),
            log_level: other.log_level.or(self.log_level),
            format: other.format.or(self.format),
        }
    }

    /// The query filters, with defaults for anything unset.
    pub fn feed_query(&self) -> FeedQuery {
        let defaults = FeedQuery::default();
        FeedQuery {
            base_url: self.base_url.clone().unwrap_or(defaults.base_url),
            min_magnitude: self.min_magnitude.unwrap_or(defaults.min_magnitude),
            limit: self.limit.unwrap_or(defaults.limit),
            order_by: self.order_by.unwrap_or(defaults.order_by),
        }
    }

    /// The URL to fetch: `feed_url` verbatim if set, otherwise the built query.
    ///
    /// # Errors
    /// [`QuakeError::InvalidUrl`] when the query base does not parse.
    pub fn feed_url(&self) -> Result<String, QuakeError> {
        match &self.feed_url {
            Some(url) => Ok(url.clone()),
            None => Ok(self.feed_query().to_url()?.to_string()),
        }
    }

    /// The display time zone. Unknown names fall back to UTC.
    pub fn time_zone(&self) -> Tz {
        let Some(name) = self.time_zone.as_deref() else {
            return Tz::UTC;
        };
        name.parse::<Tz>().unwrap_or_else(|e| {
            warn!(time_zone = name, error = %e, "Unknown time zone, using UTC");
            Tz::UTC
        })
    }

    /// The display locale. Unknown names fall back to `en_US`.
    pub fn locale(&self) -> Locale {
        let Some(name) = self.locale.as_deref() else {
            return Locale::en_US;
        };
        Locale::try_from(name).unwrap_or_else(|_| {
            warn!(locale = name, "Unknown locale, using en_US");
            Locale::en_US
        })
    }

    /// Effective output format.
    pub fn output_format(&self) -> OutputFormat {
        self.format.unwrap_or_default()
    }

    /// Effective log level.
    pub fn log_level(&self) -> &str {
        self.log_level.as_deref().unwrap_or("info")
    }

    /// Applies the file layer, then `overrides` (CLI and environment) on top
    /// of the defaults.
    pub fn resolve(overrides: QuakeConfig) -> QuakeConfig {
        let config_file_path = overrides
            .config_path
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));

        let mut current_config = QuakeConfig::defaults();

        match read_config_file(&config_file_path) {
            Ok(Some(file_config)) => current_config = current_config.merge(file_config),
            Ok(None) => info!(
                path = %config_file_path.display(),
                "Config file not found. Using defaults and environment/CLI variables."
            ),
            Err(e) => warn!(
                path = %config_file_path.display(),
                error = %e,
                "Failed to load config file. Falling back to other sources."
            ),
        }

        current_config.merge(overrides)
    }
}

/// Reads a JSON config file. A missing file is `Ok(None)`.
///
/// # Errors
/// [`ConfigError`] when the file exists but cannot be read or parsed.
pub fn read_config_file(path: &Path) -> Result<Option<QuakeConfig>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }
    let raw = fs::read_to_string(path)?;
    Ok(Some(serde_json::from_str(&raw)?))
}

/// Parses CLI flags and environment variables, then resolves all layers.
pub fn load_config() -> QuakeConfig {
    QuakeConfig::resolve(QuakeConfig::parse())
}
