use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failures that stop the game before or while it runs.
#[derive(Debug, Error)]
pub enum Error {
    #[error("terminal I/O failed: {0}")]
    Io(#[from] io::Error),

    #[error("cannot read settings file {}: {source}", path.display())]
    SettingsRead { path: PathBuf, source: io::Error },

    #[error("invalid settings file {}: {source}", path.display())]
    SettingsParse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("window must be finite and positive, got {width}x{height}")]
    InvalidWindow { width: f64, height: f64 },

    #[error("cannot open log file {}: {source}", path.display())]
    LogFile { path: PathBuf, source: io::Error },
}

pub type Result<T> = std::result::Result<T, Error>;
