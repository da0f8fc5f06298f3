//! Field schema and validation rules
//!
//! `formsmith-fields` is the schema-only crate of Formsmith. It defines what a
//! form field is and how its value is judged; it knows nothing about live
//! form state, authoring, or persistence.
//!
//! # Architecture
//!
//! - **Tagged per kind**: a [`FieldShape`] variant per [`FieldKind`] carries
//!   only the options and rule members meaningful for that kind
//! - **Label-derived identity**: ids are slugged labels with a random suffix,
//!   see [`ids`]
//! - **Pure evaluation**: [`validation::evaluate`] returns failure messages as
//!   data and never errors

pub mod error;
pub mod ids;
pub mod rules;
pub mod types;
pub mod validation;

pub use error::{FieldsError, Result};
pub use ids::{slug, FieldId, IdGenerator, RandomSuffix, SequentialSuffix};
pub use rules::{
    ChoiceValidation, ErrorMessages, NumberValidation, Pattern, TextValidation, ValidationBase,
    ValidationPatch,
};
pub use types::{FieldDefinition, FieldKind, FieldShape, FieldValue, FormSchema, DEFAULT_OPTIONS};
pub use validation::{evaluate, validate_all, ErrorMap, ValueMap};
