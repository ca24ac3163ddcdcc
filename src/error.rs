//! Error kinds for the check pipeline

use std::path::PathBuf;
use thiserror::Error;

/// Fatal errors raised by any pipeline stage.
///
/// Every variant carries the path or pattern it failed on so the entry point
/// can surface a single message and end the run.
#[derive(Debug, Error)]
pub enum CheckError {
    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Invalid glob pattern '{pattern}': {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    #[error("Failed to walk '{pattern}': {source}")]
    Walk {
        pattern: String,
        #[source]
        source: ignore::Error,
    },

    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, CheckError>;
