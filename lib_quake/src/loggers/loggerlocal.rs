use chrono::{Local, NaiveDateTime};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{InitError, RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Timestamp between the app name and `.log` in every log file name.
const LOG_STAMP_FORMAT: &str = "%Y-%m-%d_%H-%M-%S";

#[derive(Debug, Error)]
/// # Logger Error
///
/// Failures while installing the global subscriber.
pub enum LoggerError {
    /// The log directory could not be created or scanned.
    #[error("I/O error occurred: {0}")]
    IoError(#[from] io::Error),

    /// The level string is not a valid filter directive.
    #[error("Invalid log level: {0}")]
    InvalidLevel(#[from] tracing_subscriber::filter::ParseError),

    /// The log file could not be opened.
    #[error("Failed to open log file: {0}")]
    AppenderError(#[from] InitError),

    /// A global subscriber was already installed.
    #[error("Logger already initialised: {0}")]
    AlreadyInitialised(#[from] tracing_subscriber::util::TryInitError),
}

#[derive(Debug, Clone)]
/// # Log Options
///
/// Where and how much to log.
pub struct LogOptions {
    /// Prefix of the log file name.
    pub app_name: String,
    /// Level or filter directive (trace, debug, info, warn, error, fatal).
    /// `RUST_LOG` takes precedence when set.
    pub level: String,
    /// Directory for the log file. `None` logs to stderr only.
    pub log_dir: Option<PathBuf>,
}

impl Default for LogOptions {
    fn default() -> Self {
        Self {
            app_name: "quake_report".to_string(),
            level: "info".to_string(),
            log_dir: None,
        }
    }
}

/// Installs the global `tracing` subscriber.
///
/// Logs go to stderr and, when `log_dir` is set, to a timestamped file in
/// that directory. Older log files of the same app are pruned first so only
/// the previous run's file survives next to the new one.
///
/// The returned guard flushes the file writer on drop; keep it alive for
/// the lifetime of the program.
///
/// # Errors
/// See [`LoggerError`].
pub fn setup_logging(options: &LogOptions) -> Result<Option<WorkerGuard>, LoggerError> {
    let directive = match options.level.to_lowercase().as_str() {
        "fatal" => "error".to_string(),
        other => other.to_string(),
    };
    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(&directive))?;
    let console = fmt::layer().with_target(true).with_writer(io::stderr);

    let Some(log_dir) = &options.log_dir else {
        tracing_subscriber::registry().with(filter).with(console).try_init()?;
        return Ok(None);
    };

    fs::create_dir_all(log_dir)?;
    cleanup_old_logs(log_dir, &options.app_name)?;

    let appender = RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(format!(
            "{}_{}",
            options.app_name,
            Local::now().format(LOG_STAMP_FORMAT)
        ))
        .filename_suffix("log")
        .build(log_dir)?;
    let (writer, guard) = tracing_appender::non_blocking(appender);
    let file = fmt::layer().with_ansi(false).with_writer(writer);

    tracing_subscriber::registry()
        .with(filter)
        .with(console)
        .with(file)
        .try_init()?;

    Ok(Some(guard))
}

/// Deletes all but the newest `<app_name>_<timestamp>.log` file in `log_dir`.
///
/// File names carry a sortable timestamp, so "newest" is the greatest name.
/// Returns how many files were removed; other files, including logs of apps
/// whose name merely starts with `app_name`, are left alone.
///
/// # Errors
/// Fails only if the directory cannot be read.
pub fn cleanup_old_logs(log_dir: &Path, app_name: &str) -> io::Result<usize> {
    let mut logs: Vec<PathBuf> = fs::read_dir(log_dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| {
            path.file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| is_log_of(name, app_name))
        })
        .collect();

    // Newest first
    logs.sort_by(|a, b| b.file_name().cmp(&a.file_name()));

    let mut removed = 0;
    for old in logs.iter().skip(1) {
        match fs::remove_file(old) {
            Ok(()) => removed += 1,
            Err(e) => eprintln!("Failed to delete old log file {}: {}", old.display(), e),
        }
    }
    Ok(removed)
}

/// True for `<app_name>_<YYYY-MM-DD_HH-MM-SS>.log`, the names [`setup_logging`] creates.
fn is_log_of(file_name: &str, app_name: &str) -> bool {
    file_name
        .strip_prefix(app_name)
        .and_then(|rest| rest.strip_prefix('_'))
        .and_then(|rest| rest.strip_suffix(".log"))
        .is_some_and(|stamp| NaiveDateTime::parse_from_str(stamp, LOG_STAMP_FORMAT).is_ok())
}
