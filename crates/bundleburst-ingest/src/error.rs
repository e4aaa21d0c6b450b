//! Error types for reading bundle stats.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while reading build stats.
#[derive(Debug, Error)]
pub enum IngestError {
    /// Stats file could not be read.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Stats were not valid JSON for a build or a list of builds.
    #[error("Invalid stats JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Requested build does not exist.
    #[error("No build #{index}, {available} available")]
    NoSuchBuild { index: usize, available: usize },

    /// Input contained no builds.
    #[error("No builds found")]
    Empty,
}

impl IngestError {
    /// Create an I/O error with path context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result alias for ingest operations.
pub type Result<T> = std::result::Result<T, IngestError>;
