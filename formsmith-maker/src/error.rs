//! Authoring errors: actions the maker refused, with the reason.

use formsmith_common::{ErrorSeverity, Severity};
use thiserror::Error;

/// Result type for authoring operations
pub type Result<T> = std::result::Result<T, AuthoringError>;

/// Reasons an authoring action was blocked. The schema is left untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthoringError {
    /// Some field has a blank label
    #[error("Please fix validation errors before adding more fields")]
    InvalidFields,

    /// Save attempted without a form name
    #[error("Please enter a form name")]
    MissingFormName,

    /// Index past the end of the field list
    #[error("no field at index {index} (form has {len} fields)")]
    NoSuchField { index: usize, len: usize },
}

impl Severity for AuthoringError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            AuthoringError::InvalidFields | AuthoringError::MissingFormName => {
                ErrorSeverity::Warning
            }
            AuthoringError::NoSuchField { .. } => ErrorSeverity::Error,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            AuthoringError::InvalidFields.to_string(),
            "Please fix validation errors before adding more fields"
        );
        let err = AuthoringError::NoSuchField { index: 3, len: 1 };
        assert!(err.to_string().contains("index 3"));
        assert_eq!(err.severity(), ErrorSeverity::Error);
    }
}
