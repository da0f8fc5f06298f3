//! Severity classification for Formsmith errors
//!
//! Each crate defines its own `thiserror` enum. They all implement
//! [`Severity`] so callers can pick a log level or decide whether to surface
//! the failure to the user.

/// Severity levels for error classification
///
/// - **Warning**: the action was refused but nothing is lost; the user can
///   correct their input and retry (an empty form name, a blank label).
/// - **Error**: an operation failed but the system can continue
///   (a storage write that did not land).
/// - **Critical**: the system cannot continue.
///
/// # Examples
///
/// ```rust
/// use formsmith_common::ErrorSeverity;
///
/// let blocked_save = ErrorSeverity::Warning;
/// let failed_write = ErrorSeverity::Error;
/// assert_ne!(blocked_save, failed_write);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    /// Potential issue but operation can proceed
    Warning,
    /// Operation failed but system can continue
    Error,
    /// System cannot continue, requires immediate attention
    Critical,
}

/// Trait for error types that have severity levels
///
/// # Example
///
/// ```rust
/// use formsmith_common::{ErrorSeverity, Severity};
///
/// #[derive(Debug)]
/// enum MyError {
///     MissingName,
///     WriteFailed,
/// }
///
/// impl Severity for MyError {
///     fn severity(&self) -> ErrorSeverity {
///         match self {
///             MyError::MissingName => ErrorSeverity::Warning,
///             MyError::WriteFailed => ErrorSeverity::Error,
///         }
///     }
/// }
///
/// assert_eq!(MyError::WriteFailed.severity(), ErrorSeverity::Error);
/// ```
pub trait Severity {
    /// Get the severity level of this error
    fn severity(&self) -> ErrorSeverity;
}
