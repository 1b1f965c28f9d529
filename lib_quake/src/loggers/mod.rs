/// Console and file logging built on `tracing-subscriber`.
pub mod loggerlocal;

pub use loggerlocal::{cleanup_old_logs, setup_logging, LogOptions, LoggerError};
