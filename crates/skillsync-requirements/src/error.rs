//! Error types for requirement indexing

use std::path::PathBuf;
use thiserror::Error;

/// Requirement indexer errors
#[derive(Debug, Error)]
pub enum SyncError {
    /// Mapping file lacks the `requirements` list
    #[error("Mapping format error: {0}")]
    MappingFormat(String),

    /// A file could not be read
    #[error("Failed to read {path:?}: {source}")]
    Read {
        /// File path
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// A file or directory could not be written
    #[error("Failed to write {path:?}: {source}")]
    Write {
        /// File path
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Mapping file is not valid JSON
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Mapping file is not valid YAML
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl SyncError {
    /// Whether this error comes from the mapping file's content
    #[must_use]
    pub fn is_mapping_error(&self) -> bool {
        matches!(
            self,
            SyncError::MappingFormat(_) | SyncError::Json(_) | SyncError::Yaml(_)
        )
    }
}

/// Convenient Result type alias
pub type Result<T> = std::result::Result<T, SyncError>;
