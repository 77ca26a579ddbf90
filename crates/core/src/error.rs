//! Error types for session construction and highscore persistence.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Rejected game configuration. Fatal to session creation only.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("board dimensions must be positive, got {width}x{height}")]
    InvalidBoard { width: u16, height: u16 },
    #[error("tick interval must be positive")]
    InvalidTickInterval,
    #[error("highscore capacity must be at least 1")]
    InvalidCapacity,
    #[error("highscore capacity {capacity} exceeds the maximum of {max}")]
    CapacityTooLarge { capacity: usize, max: usize },
    #[error("time attack needs a positive time limit")]
    InvalidTimeLimit,
}

/// Failure while reading or writing the highscore file.
///
/// Never escapes [`crate::highscore::HighscoreStore`]'s public API; it is
/// logged and the store falls back to its in-memory list.
#[derive(Debug, Error)]
pub enum HighscoreError {
    #[error("highscore file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("highscore file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("highscore file contains no readable records")]
    Unreadable,
}
