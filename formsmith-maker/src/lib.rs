//! Schema authoring for Formsmith
//!
//! [`FormMaker`] is the editor behind the maker UI: it holds the schema being
//! built, validates labels on demand, autosaves after a quiet period, and
//! manages the saved-schema list through [`formsmith_store::FormStorage`].
//!
//! ```rust,ignore
//! use formsmith_maker::{FieldUpdate, FormMaker};
//! use formsmith_store::FormStorage;
//!
//! let mut maker = FormMaker::new(FormStorage::in_memory());
//! maker.set_form_name("signup");
//! maker.update_field(0, FieldUpdate::Label("Email".into()))?;
//! maker.save()?;
//! ```

pub mod confirm;
pub mod error;
pub mod maker;
pub mod update;

pub use confirm::{Confirm, TerminalConfirm};
pub use error::{AuthoringError, Result};
pub use maker::{FormMaker, FormMakerBuilder, Tab, DELETE_PROMPT};
pub use update::{parse_options, FieldUpdate};
