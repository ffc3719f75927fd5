//! # Record Errors
//!
//! Outcomes of a CRUD request other than success. Everything except
//! `Storage` is an expected per-request result.

use thiserror::Error;

use crate::storage::StorageError;

/// Result type for record operations
pub type RecordResult<T> = Result<T, RecordError>;

/// Record operation errors
#[derive(Debug, Error)]
pub enum RecordError {
    #[error("Database not found: {0}")]
    DatabaseNotFound(String),

    #[error("Table not found: {0}")]
    TableNotFound(String),

    #[error("Record not found: {0}")]
    RecordNotFound(String),

    /// Create with an id that is already present
    #[error("Record already exists: {0}")]
    Conflict(String),

    /// Create body has no string `id` field
    #[error("Payload does not contain an 'id' field")]
    MissingId,

    /// Stored value is not an object where one is required
    #[error("Record {0} is not a JSON object")]
    InvalidFormat(String),

    #[error("Invalid database or table name: {0:?}")]
    InvalidName(String),

    /// Failure below the CRUD layer
    #[error(transparent)]
    Storage(StorageError),
}

impl From<StorageError> for RecordError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::InvalidName(name) => RecordError::InvalidName(name),
            other => RecordError::Storage(other),
        }
    }
}

impl RecordError {
    /// True for failures the client did not cause
    pub fn is_internal(&self) -> bool {
        matches!(self, RecordError::Storage(_) | RecordError::InvalidFormat(_))
    }
}
