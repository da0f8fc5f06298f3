//! Persistence of authored schemas
//!
//! - [`kv`]: synchronous key-value backends ([`MemoryStore`], [`FileStore`])
//! - [`forms`]: [`FormStorage`], the schema bucket over a backend
//!
//! The bucket is flat, single-process and last-write-wins. Nothing here
//! fails past [`FormStorage`]; errors are logged and become empty results.

pub mod error;
pub mod forms;
pub mod kv;

pub use error::{Result, StoreError};
pub use forms::{FormStorage, SavedForms};
pub use kv::{FileStore, KeyValueStore, MemoryStore};
