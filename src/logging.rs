//! File logging
//!
//! The terminal is owned by the UI, so logs go to a file under the config
//! directory. Verbosity follows `RUST_LOG`, defaulting to `info`.

use crate::config::Config;
use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

const LOG_FILE_NAME: &str = "conductor-dash.log";

/// Path of the log file, if a home directory is known
pub fn log_file_path() -> Option<PathBuf> {
    Config::config_dir().map(|dir| dir.join(LOG_FILE_NAME))
}

/// Install the global tracing subscriber.
///
/// Returns the log path, or `None` when no home directory is available
/// (logging is then disabled).
pub fn init() -> Result<Option<PathBuf>> {
    let Some(log_path) = log_file_path() else {
        return Ok(None);
    };

    if let Some(parent) = log_path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create log directory {}", parent.display()))?;
    }

    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("Failed to open log file {}", log_path.display()))?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(log_file))
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to install log subscriber: {}", e))?;

    Ok(Some(log_path))
}
