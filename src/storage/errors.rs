//! Storage error types
//!
//! Every failure below the CRUD layer ends up here. None of these are
//! fatal to the process; the HTTP layer turns them into a 500 response.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Table storage errors
#[derive(Debug, Error)]
pub enum StorageError {
    /// Filesystem operation failed
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Table file is not a valid JSON object
    #[error("Table {} is not a valid JSON object: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Document set could not be serialized
    #[error("Failed to encode table {}: {source}", path.display())]
    Encode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Database or table name is not a single path component
    #[error("Invalid name: {0:?}")]
    InvalidName(String),
}

impl StorageError {
    pub(crate) fn io(path: &Path, source: io::Error) -> Self {
        StorageError::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    pub(crate) fn decode(path: &Path, source: serde_json::Error) -> Self {
        StorageError::Decode {
            path: path.to_path_buf(),
            source,
        }
    }

    pub(crate) fn encode(path: &Path, source: serde_json::Error) -> Self {
        StorageError::Encode {
            path: path.to_path_buf(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_mentions_path() {
        let err = StorageError::io(
            Path::new("/data/shop/orders.json"),
            io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        );
        let msg = err.to_string();
        assert!(msg.contains("/data/shop/orders.json"));
        assert!(msg.contains("denied"));
    }

    #[test]
    fn test_decode_error_keeps_source() {
        let source = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err = StorageError::decode(Path::new("t.json"), source);
        assert!(std::error::Error::source(&err).is_some());
    }
}
