//! # Formsmith Common
//!
//! Foundational utilities shared across the Formsmith crates.
//!
//! ## Modules
//!
//! - [`debounce`] - Cancellable, coalescing delayed delivery of a payload
//! - [`error`] - Severity classification shared by every crate's error type
//! - [`logging`] - Tracing setup and the [`Pretty`] log formatter

pub mod debounce;
pub mod error;
pub mod logging;

pub use debounce::Debouncer;
pub use error::{ErrorSeverity, Severity};
pub use logging::{init_tracing, Pretty};
