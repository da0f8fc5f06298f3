//! Error types for the field schema

use formsmith_common::{ErrorSeverity, Severity};
use thiserror::Error;

/// Result type for field schema operations
pub type Result<T> = std::result::Result<T, FieldsError>;

/// Errors raised while building field definitions.
///
/// Validation failures against user input are not errors; they are returned
/// as messages by [`crate::validation::evaluate`].
#[derive(Debug, Error)]
pub enum FieldsError {
    /// Field kind string not one of text, number, select, radio
    #[error("unknown field kind: {kind}")]
    UnknownKind { kind: String },

    /// Pattern rule did not compile
    #[error("invalid pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

impl Severity for FieldsError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Warning
    }
}
