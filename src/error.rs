//! Error handling module for SmartPark
//!
//! Provides centralized error handling with proper error types using thiserror.
//! The two "nothing to do" lot conditions (lot full, nothing to release) are
//! not errors; they are reported through [`crate::lot::OperationResult`].

use thiserror::Error;

/// Main error type for SmartPark
#[derive(Error, Debug)]
pub enum SmartParkError {
    /// IO errors (blob files, terminal, log file)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors (corrupt lot blobs land here)
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration errors (loading, parsing, validation)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Blob store errors that are not plain IO
    #[error("Storage error: {0}")]
    Storage(String),

    /// Terminal/UI errors
    #[error("Terminal error: {0}")]
    Terminal(String),
}

/// Result type alias for SmartPark operations
pub type Result<T> = std::result::Result<T, SmartParkError>;

impl SmartParkError {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a storage error
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    /// Create a terminal error
    pub fn terminal(msg: impl Into<String>) -> Self {
        Self::Terminal(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SmartParkError::config("refresh interval must be positive");
        assert_eq!(
            err.to_string(),
            "Configuration error: refresh interval must be positive"
        );

        let err = SmartParkError::storage("invalid key");
        assert_eq!(err.to_string(), "Storage error: invalid key");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: SmartParkError = io_err.into();
        assert!(matches!(err, SmartParkError::Io(_)));
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<Vec<u32>>("[1, 2,").unwrap_err();
        let err: SmartParkError = json_err.into();
        assert!(matches!(err, SmartParkError::Json(_)));
    }
}
