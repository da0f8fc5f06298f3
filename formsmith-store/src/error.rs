//! Error types for schema storage
//!
//! These never leave [`crate::FormStorage`]: it logs them and hands callers
//! an empty result instead.

use formsmith_common::{ErrorSeverity, Severity};
use thiserror::Error;

/// Result type for storage operations
pub type Result<T> = std::result::Result<T, StoreError>;

#[derive(Debug, Error)]
pub enum StoreError {
    /// Key cannot be used as a storage slot
    #[error("invalid storage key: {key}")]
    InvalidKey { key: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Bucket contents are not the expected JSON mapping
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Severity for StoreError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Error
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = StoreError::InvalidKey {
            key: "../escape".into(),
        };
        assert_eq!(err.to_string(), "invalid storage key: ../escape");
    }
}
