//! Error types for session persistence.

use std::io;
use thiserror::Error;

/// Errors that can occur while reading or writing persisted state.
#[derive(Error, Debug)]
pub enum StoreError {
    /// I/O error from the storage backend.
    #[error("Storage I/O error: {0}")]
    Io(#[from] io::Error),

    /// A stored value could not be encoded or decoded.
    #[error("Failed to parse stored value: {0}")]
    Json(#[from] serde_json::Error),

    /// The snapshot was written by a newer version of the application.
    #[error("Unsupported snapshot version {found} (newest supported: {supported})")]
    UnsupportedVersion { found: u32, supported: u32 },

    /// The stored value is JSON but not a snapshot of any known shape.
    #[error("Invalid snapshot: {0}")]
    InvalidSnapshot(String),
}

/// Result type for persistence operations.
pub type StoreResult<T> = Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_version_display() {
        let error = StoreError::UnsupportedVersion { found: 9, supported: 2 };
        let display = format!("{error}");
        assert!(display.contains("version 9"));
        assert!(display.contains("supported: 2"));
    }

    #[test]
    fn test_io_error_from_conversion() {
        let io_error = io::Error::new(io::ErrorKind::PermissionDenied, "denied");
        let error: StoreError = io_error.into();
        assert!(matches!(error, StoreError::Io(_)));
    }
}
