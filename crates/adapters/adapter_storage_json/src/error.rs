//! Storage-specific error type for the JSON file store.

use std::path::PathBuf;

use places_domain::error::PlacesError;

/// Errors originating from the JSON file storage layer.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Reading, writing or renaming a file failed.
    #[error("failed to access {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The backing file does not contain valid JSON.
    #[error("{} is not valid JSON", .path.display())]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The backing file holds JSON that is not an array.
    #[error("{} must hold a JSON array, found {found}", .path.display())]
    NotAnArray { path: PathBuf, found: &'static str },

    /// An element of the stored array is not an object.
    #[error("{} element {index} must be a JSON object, found {found}", .path.display())]
    NotAnObject {
        path: PathBuf,
        index: usize,
        found: &'static str,
    },

    /// The collection could not be serialized.
    #[error("failed to serialize places")]
    Serialize(#[from] serde_json::Error),
}

impl From<StoreError> for PlacesError {
    fn from(err: StoreError) -> Self {
        Self::Storage(Box::new(err))
    }
}
