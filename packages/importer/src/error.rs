//! Error types for the importer.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for the importer.
#[derive(Debug, Error)]
pub enum ImportError {
    /// Failed to read the statute input file.
    #[error("Failed to read statute file {path}: {source}")]
    ReadInput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    /// Parser-side caller error (bad regulation id).
    #[error(transparent)]
    Parse(#[from] vocana_parser::ParseError),
}

/// Result type alias for importer operations.
pub type Result<T> = std::result::Result<T, ImportError>;
