use std::fs::{self, OpenOptions};
use std::io;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Mutex;

use thiserror::Error;
use tracing::Level;

use crate::config::LoggingSettings;

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("couldn't open log file {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("unknown log level {0:?}")]
    Level(String),
    #[error("couldn't install log subscriber: {0}")]
    Init(String),
}

/// Install a file-backed `tracing` subscriber when `settings.file` is set.
///
/// Returns `Ok(false)` when logging is disabled. The terminal belongs to the
/// UI, so logs never go to stdout/stderr.
pub fn init_logging(settings: &LoggingSettings) -> Result<bool, LoggingError> {
    let Some(path) = &settings.file else {
        return Ok(false);
    };
    let level =
        Level::from_str(&settings.level).map_err(|_| LoggingError::Level(settings.level.clone()))?;

    let io_err = |source: io::Error| LoggingError::Io {
        path: path.clone(),
        source,
    };
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir).map_err(io_err)?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(io_err)?;

    tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .with_max_level(level)
        .try_init()
        .map_err(|e| LoggingError::Init(e.to_string()))?;
    Ok(true)
}
