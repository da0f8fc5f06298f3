//! Schema-driven form rendering and submission
//!
//! - [`render`] maps one field definition and its value to a control description
//! - [`form`] owns the live value and error maps of a rendered schema
//! - [`demo`] holds the sample schema shown on the preview tab

pub mod demo;
pub mod form;
pub mod render;

pub use demo::demo_schema;
pub use form::{ChangeCallback, FormBuilder, LiveFormState, RenderedField, SubmitOutcome};
pub use render::{
    coerce, describe, ChangeEvent, ChoiceOption, Control, ControlDescription, InputType,
};
