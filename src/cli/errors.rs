//! CLI-specific error types
//!
//! All CLI errors are fatal: the process prints the error and exits non-zero.

use std::fmt;

use crate::records::RecordError;
use crate::storage::StorageError;

/// CLI error codes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliErrorCode {
    /// Configuration missing or invalid
    ConfigError,
    /// Root directory or server could not be brought up
    BootFailed,
    /// `create` command failed
    CreateFailed,
}

impl CliErrorCode {
    /// Get the error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::ConfigError => "BARELY_CLI_CONFIG_ERROR",
            Self::BootFailed => "BARELY_CLI_BOOT_FAILED",
            Self::CreateFailed => "BARELY_CLI_CREATE_FAILED",
        }
    }
}

/// CLI error
#[derive(Debug)]
pub struct CliError {
    code: CliErrorCode,
    message: String,
}

impl CliError {
    /// Create a new CLI error
    pub fn new(code: CliErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::ConfigError, msg)
    }

    pub fn boot_failed(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::BootFailed, msg)
    }

    pub fn create_failed(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::CreateFailed, msg)
    }

    /// Root directory not given by flag, env, or config file
    pub fn missing_root() -> Self {
        Self::config_error(
            "root database directory is required (--root-db, BARELYDB_ROOT_DB, or config root_db)",
        )
    }

    pub fn code(&self) -> &CliErrorCode {
        &self.code
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.code(), self.message)
    }
}

impl std::error::Error for CliError {}

impl From<StorageError> for CliError {
    fn from(e: StorageError) -> Self {
        Self::boot_failed(e.to_string())
    }
}

impl From<RecordError> for CliError {
    fn from(e: RecordError) -> Self {
        Self::create_failed(e.to_string())
    }
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_code() {
        let err = CliError::missing_root();
        assert!(err.to_string().starts_with("BARELY_CLI_CONFIG_ERROR: "));
        assert_eq!(err.code(), &CliErrorCode::ConfigError);
    }

    #[test]
    fn test_record_error_maps_to_create_failed() {
        let err = CliError::from(RecordError::InvalidName("..".to_string()));
        assert_eq!(err.code(), &CliErrorCode::CreateFailed);
    }

    #[test]
    fn test_storage_error_maps_to_boot_failed() {
        let err = CliError::from(StorageError::InvalidName("".to_string()));
        assert_eq!(err.code(), &CliErrorCode::BootFailed);
        assert!(err.to_string().starts_with("BARELY_CLI_BOOT_FAILED: "));
    }
}
