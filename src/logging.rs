// File-based tracing. The terminal belongs to the UI, so nothing goes to stdout/stderr.

use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::error::AppError;

/// Installs the global subscriber. Returns the log path, or `None` when
/// no log directory is available.
pub fn init(config: &Config) -> Result<Option<PathBuf>, AppError> {
    let Some(path) = config.log_file() else {
        return Ok(None);
    };

    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).map_err(|source| AppError::LogFile {
            path: path.clone(),
            source,
        })?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .map_err(|source| AppError::LogFile {
            path: path.clone(),
            source,
        })?;

    let (filter, bad_filter) = match EnvFilter::try_new(&config.log_filter) {
        Ok(filter) => (filter, None),
        Err(err) => (EnvFilter::new("info"), Some(err.to_string())),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .try_init()
        .map_err(|err| AppError::Subscriber(err.to_string()))?;

    if let Some(err) = bad_filter {
        tracing::warn!(filter = %config.log_filter, %err, "invalid log filter, using info");
    }
    for warning in &config.warnings {
        tracing::warn!("{warning}");
    }

    Ok(Some(path))
}
