//! Field renderer: one field definition plus its current value becomes a
//! control description a UI layer can draw without knowing the schema.

use serde::Serialize;

use formsmith_fields::{FieldDefinition, FieldId, FieldKind, FieldValue};

/// Which input element a text or number field renders as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InputType {
    Text,
    Number,
}

/// One selectable entry of a select or radio group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChoiceOption {
    pub value: String,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "control", rename_all = "kebab-case")]
pub enum Control {
    /// A single input bound to the current value.
    Input { input_type: InputType, value: String },
    /// A dropdown over the field's options, in order.
    Select {
        value: String,
        options: Vec<ChoiceOption>,
    },
    /// One element per option. Every element shares `name`, so at most one
    /// is selected.
    RadioGroup {
        name: String,
        options: Vec<ChoiceOption>,
    },
}

/// Everything needed to draw one field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ControlDescription {
    pub id: FieldId,
    pub name: String,
    pub label: String,
    pub placeholder: String,
    pub kind: FieldKind,
    pub control: Control,
}

impl ControlDescription {
    /// Turn raw control text into the change event for this field.
    pub fn change_event(&self, raw: &str) -> ChangeEvent {
        ChangeEvent {
            field_id: self.id.clone(),
            value: coerce(self.kind, raw),
        }
    }
}

/// The single change contract shared by every control kind.
#[derive(Debug, Clone, PartialEq)]
pub struct ChangeEvent {
    pub field_id: FieldId,
    pub value: FieldValue,
}

/// Convert raw control text to a value of `kind`.
///
/// Number fields parse the text; blank becomes `0` and unparsable text
/// becomes NaN, which validation treats as empty. Other kinds keep the text.
pub fn coerce(kind: FieldKind, raw: &str) -> FieldValue {
    match kind {
        FieldKind::Number => {
            let trimmed = raw.trim();
            if trimmed.is_empty() {
                FieldValue::Number(0.0)
            } else {
                FieldValue::Number(trimmed.parse().unwrap_or(f64::NAN))
            }
        }
        FieldKind::Text | FieldKind::Select | FieldKind::Radio => FieldValue::Text(raw.to_string()),
    }
}

fn display_value(value: Option<&FieldValue>) -> String {
    match value {
        Some(FieldValue::Number(n)) if n.is_nan() => String::new(),
        Some(value) => value.to_string(),
        None => String::new(),
    }
}

/// Describe the control for `field` showing `current`.
pub fn describe(field: &FieldDefinition, current: Option<&FieldValue>) -> ControlDescription {
    let value = display_value(current);
    let choices = || {
        field
            .options()
            .iter()
            .map(|option| ChoiceOption {
                selected: *option == value,
                value: option.clone(),
            })
            .collect::<Vec<_>>()
    };

    let control = match field.kind() {
        FieldKind::Text => Control::Input {
            input_type: InputType::Text,
            value,
        },
        FieldKind::Number => Control::Input {
            input_type: InputType::Number,
            value,
        },
        FieldKind::Select => Control::Select {
            options: choices(),
            value,
        },
        FieldKind::Radio => Control::RadioGroup {
            name: field.name.clone(),
            options: choices(),
        },
    };

    ControlDescription {
        id: field.id.clone(),
        name: field.name.clone(),
        label: field.label.clone(),
        placeholder: field.placeholder.clone(),
        kind: field.kind(),
        control,
    }
}
