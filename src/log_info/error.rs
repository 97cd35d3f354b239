use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while extracting information from a game log.
#[derive(Error, Debug)]
pub enum LogInfoError {
    #[error("I/O error on '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid log pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("Failed to write report: {0}")]
    Json(#[from] serde_json::Error),
}
