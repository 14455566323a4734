use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::error::{AppError, AppResult};

/// `-v` raises the configured level to debug, `-vv` to trace.
pub fn level_for_verbosity(configured: &str, verbosity: u8) -> &str {
    match verbosity {
        0 => configured,
        1 => "debug",
        _ => "trace",
    }
}

pub fn build_filter(level: &str) -> AppResult<EnvFilter> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }
    EnvFilter::try_new(level)
        .map_err(|err| AppError::invalid_argument(format!("invalid log level {level:?}: {err}")))
}

pub fn init_logging(level: &str, file: &Path) -> AppResult<()> {
    let filter = build_filter(level)?;
    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(file)
        .map_err(|source| {
            AppError::io_with_context(source, format!("failed to open log file: {}", file.display()))
        })?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(log_file))
        .with_ansi(false)
        .with_target(false)
        .try_init()
        .map_err(|err| AppError::invalid_argument(format!("failed to initialize logging: {err}")))
}
