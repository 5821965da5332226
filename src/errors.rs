//! Error types for mulemap analysis operations.
//!
//! Per-file failures (unreadable or malformed documents) are recovered at the
//! call site and surfaced as warnings; only the analysis root existence check
//! is allowed to abort a run. The variants here categorize the failures that
//! cross module boundaries before that decision is made.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MulemapError {
    /// The top-level repository folder does not exist or is not a directory.
    /// This is the only unrecoverable error in a run.
    #[error("repository folder not found: {}", .0.display())]
    RootNotFound(PathBuf),

    /// A file could not be read or decoded.
    #[error("could not read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A structured document could not be parsed.
    #[error("could not parse {}: {message}", path.display())]
    Parse { path: PathBuf, message: String },

    /// Configuration file problems (`.mulemap.toml`).
    #[error("configuration error: {0}")]
    Config(String),
}

impl MulemapError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn parse(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Parse {
            path: path.into(),
            message: message.into(),
        }
    }
}
