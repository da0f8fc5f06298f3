//! Attribute edits to a single field.
//!
//! Every edit produces a new definition; the caller swaps it into the list.

use formsmith_fields::{
    ErrorMessages, FieldDefinition, FieldKind, FieldValue, IdGenerator, ValidationPatch,
};

/// One user edit to one attribute of a field.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldUpdate {
    /// New caption. Regenerates id and name.
    Label(String),
    /// New kind. Resets the rule; choices get the default options.
    Kind(FieldKind),
    Placeholder(String),
    /// Raw default value text, coerced for number fields.
    DefaultValue(String),
    /// Partial rule merged into the existing one.
    Validation(ValidationPatch),
    /// Comma-separated option list.
    Options(String),
    /// Comma-separated custom error messages.
    ErrorMessages(String),
}

/// Split comma-separated option text, trimming each entry.
pub fn parse_options(raw: &str) -> Vec<String> {
    raw.split(',').map(|o| o.trim().to_string()).collect()
}

/// Default value for a number field: the parsed number, or the raw text
/// when it does not parse to a finite number so nothing the user typed is
/// lost. Non-finite numbers have no JSON form.
fn default_for(kind: FieldKind, raw: &str) -> FieldValue {
    if kind == FieldKind::Number {
        if let Some(n) = raw.trim().parse::<f64>().ok().filter(|n| n.is_finite()) {
            return FieldValue::Number(n);
        }
    }
    FieldValue::Text(raw.to_string())
}

impl FieldUpdate {
    /// The field as it looks after this edit.
    pub fn apply(self, field: &FieldDefinition, ids: &dyn IdGenerator) -> FieldDefinition {
        match self {
            FieldUpdate::Label(label) => field.relabeled(&label, ids),
            FieldUpdate::Kind(kind) => field.rekinded(kind),
            FieldUpdate::Placeholder(placeholder) => FieldDefinition {
                placeholder,
                ..field.clone()
            },
            FieldUpdate::DefaultValue(raw) => FieldDefinition {
                default_value: default_for(field.kind(), &raw),
                ..field.clone()
            },
            FieldUpdate::Validation(patch) => {
                let mut next = field.clone();
                next.shape.apply_patch(&patch);
                next
            }
            FieldUpdate::Options(raw) => {
                let mut next = field.clone();
                if !next.shape.set_options(parse_options(&raw)) {
                    tracing::debug!(kind = %field.kind(), "options ignored for kind");
                }
                next
            }
            FieldUpdate::ErrorMessages(raw) => {
                let mut next = field.clone();
                next.shape.apply_patch(
                    &ValidationPatch::default().with_error_messages(ErrorMessages::from_csv(&raw)),
                );
                next
            }
        }
    }
}
