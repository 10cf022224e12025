// src/ledger/systems/io/error.rs
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("Failed to {operation} '{}': {source}", path.display())]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed JSON in '{}': {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Could not determine a data directory for this platform")]
    NoDataDirectory,
}

impl PersistenceError {
    pub(crate) fn io(operation: &'static str, path: impl Into<PathBuf>) -> impl FnOnce(std::io::Error) -> Self {
        let path = path.into();
        move |source| PersistenceError::Io {
            operation,
            path,
            source,
        }
    }

    pub(crate) fn json(path: impl Into<PathBuf>) -> impl FnOnce(serde_json::Error) -> Self {
        let path = path.into();
        move |source| PersistenceError::Json { path, source }
    }

    /// The file was read but its contents are unusable. Read failures
    /// surfacing through serde_json do not count.
    pub fn is_corrupt_snapshot(&self) -> bool {
        matches!(self, PersistenceError::Json { source, .. } if !source.is_io())
    }
}
