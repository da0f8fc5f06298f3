//! Core field schema types.
//!
//! A [`FieldDefinition`] carries the attributes every field has (identity,
//! caption, default) plus a [`FieldShape`] holding only what its kind needs.
//! Definitions serialize to the flat JSON record the storage bucket holds:
//!
//! ```json
//! {"id": "age-k3j9x0a1b", "name": "age-k3j9x0a1b", "label": "Age",
//!  "placeholder": "Enter your age", "defaultValue": 20, "type": "number",
//!  "validation": {"required": true, "min": 18, "max": 60}}
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::FieldsError;
use crate::ids::{FieldId, IdGenerator};
use crate::rules::{
    ChoiceValidation, NumberValidation, TextValidation, ValidationBase, ValidationPatch,
};

/// Options seeded when a field becomes a select or radio.
pub const DEFAULT_OPTIONS: [&str; 3] = ["Option 1", "Option 2", "Option 3"];

/// The kind of control a field renders as.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    #[default]
    Text,
    Number,
    Select,
    Radio,
}

impl FieldKind {
    pub const ALL: [FieldKind; 4] = [
        FieldKind::Text,
        FieldKind::Number,
        FieldKind::Select,
        FieldKind::Radio,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            FieldKind::Text => "text",
            FieldKind::Number => "number",
            FieldKind::Select => "select",
            FieldKind::Radio => "radio",
        }
    }

    /// Select and radio fields choose from an option list.
    pub fn has_options(self) -> bool {
        matches!(self, FieldKind::Select | FieldKind::Radio)
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldKind {
    type Err = FieldsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FieldKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| FieldsError::UnknownKind { kind: s.to_string() })
    }
}

/// A field's value: what the user typed or picked, or the authored default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Number(f64),
    Text(String),
}

impl FieldValue {
    /// Empty string, zero, or a number that failed to parse.
    pub fn is_empty(&self) -> bool {
        match self {
            FieldValue::Text(s) => s.is_empty(),
            FieldValue::Number(n) => *n == 0.0 || n.is_nan(),
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Number(n) => Some(*n),
            FieldValue::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            FieldValue::Number(_) => None,
        }
    }
}

impl Default for FieldValue {
    fn default() -> Self {
        FieldValue::Text(String::new())
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Number(n) => write!(f, "{n}"),
            FieldValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::Text(s)
    }
}

impl From<f64> for FieldValue {
    fn from(n: f64) -> Self {
        FieldValue::Number(n)
    }
}

/// Kind-specific attributes of a field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum FieldShape {
    Text {
        #[serde(default)]
        validation: TextValidation,
    },
    Number {
        #[serde(default)]
        validation: NumberValidation,
    },
    Select {
        #[serde(default)]
        options: Vec<String>,
        #[serde(default)]
        validation: ChoiceValidation,
    },
    Radio {
        #[serde(default)]
        options: Vec<String>,
        #[serde(default)]
        validation: ChoiceValidation,
    },
}

impl FieldShape {
    /// A shape of `kind` with an empty rule and, for choices, the default options.
    pub fn blank(kind: FieldKind) -> Self {
        let default_options = || DEFAULT_OPTIONS.iter().map(|o| o.to_string()).collect();
        match kind {
            FieldKind::Text => FieldShape::Text {
                validation: TextValidation::default(),
            },
            FieldKind::Number => FieldShape::Number {
                validation: NumberValidation::default(),
            },
            FieldKind::Select => FieldShape::Select {
                options: default_options(),
                validation: ChoiceValidation::default(),
            },
            FieldKind::Radio => FieldShape::Radio {
                options: default_options(),
                validation: ChoiceValidation::default(),
            },
        }
    }

    pub fn kind(&self) -> FieldKind {
        match self {
            FieldShape::Text { .. } => FieldKind::Text,
            FieldShape::Number { .. } => FieldKind::Number,
            FieldShape::Select { .. } => FieldKind::Select,
            FieldShape::Radio { .. } => FieldKind::Radio,
        }
    }

    /// The option list; empty for kinds without options.
    pub fn options(&self) -> &[String] {
        match self {
            FieldShape::Select { options, .. } | FieldShape::Radio { options, .. } => options,
            FieldShape::Text { .. } | FieldShape::Number { .. } => &[],
        }
    }

    /// Replace the option list. Returns `false` for kinds without options.
    pub fn set_options(&mut self, new_options: Vec<String>) -> bool {
        match self {
            FieldShape::Select { options, .. } | FieldShape::Radio { options, .. } => {
                *options = new_options;
                true
            }
            FieldShape::Text { .. } | FieldShape::Number { .. } => false,
        }
    }

    pub fn validation_base(&self) -> &ValidationBase {
        match self {
            FieldShape::Text { validation } => &validation.base,
            FieldShape::Number { validation } => &validation.base,
            FieldShape::Select { validation, .. } | FieldShape::Radio { validation, .. } => {
                &validation.base
            }
        }
    }

    /// Merge `patch` into this shape's rule, ignoring members that do not apply.
    pub fn apply_patch(&mut self, patch: &ValidationPatch) {
        let kind = self.kind();
        match self {
            FieldShape::Text { validation } => patch.merge_text(validation),
            FieldShape::Number { validation } => patch.merge_number(validation),
            FieldShape::Select { validation, .. } | FieldShape::Radio { validation, .. } => {
                if patch.has_bounds() {
                    tracing::debug!(%kind, "ignoring bounds on choice field");
                }
                patch.merge_base(&mut validation.base);
            }
        }
    }
}

impl Default for FieldShape {
    fn default() -> Self {
        FieldShape::blank(FieldKind::Text)
    }
}

/// One authored field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDefinition {
    #[serde(default)]
    pub id: FieldId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub placeholder: String,
    #[serde(default, alias = "value")]
    pub default_value: FieldValue,
    #[serde(flatten)]
    pub shape: FieldShape,
}

impl FieldDefinition {
    /// The template a newly added field starts from: no label, text kind,
    /// empty rule.
    pub fn blank() -> Self {
        Self::default()
    }

    /// A field whose id and name are derived from `label`.
    pub fn new(label: &str, shape: FieldShape, ids: &dyn IdGenerator) -> Self {
        let id = FieldId::from_label(label, ids);
        Self {
            name: id.to_string(),
            id,
            label: label.to_string(),
            placeholder: String::new(),
            default_value: FieldValue::default(),
            shape,
        }
    }

    /// A field with a fixed id, for hand-written schemas.
    pub fn with_id(id: &str, label: &str, shape: FieldShape) -> Self {
        Self {
            id: FieldId::new(id),
            name: id.to_string(),
            label: label.to_string(),
            placeholder: String::new(),
            default_value: FieldValue::default(),
            shape,
        }
    }

    pub fn placeholder(mut self, placeholder: &str) -> Self {
        self.placeholder = placeholder.to_string();
        self
    }

    pub fn default_value(mut self, value: impl Into<FieldValue>) -> Self {
        self.default_value = value.into();
        self
    }

    pub fn kind(&self) -> FieldKind {
        self.shape.kind()
    }

    pub fn options(&self) -> &[String] {
        self.shape.options()
    }

    pub fn validation(&self) -> &ValidationBase {
        self.shape.validation_base()
    }

    /// The authoring-validity rule: the label is not blank.
    pub fn has_label(&self) -> bool {
        !self.label.trim().is_empty()
    }

    /// A copy relabeled to `label`, with id and name regenerated.
    pub fn relabeled(&self, label: &str, ids: &dyn IdGenerator) -> Self {
        let id = FieldId::from_label(label, ids);
        Self {
            name: id.to_string(),
            id,
            label: label.to_string(),
            ..self.clone()
        }
    }

    /// A copy switched to `kind` with a blank rule. Caption, placeholder and
    /// default value are kept.
    pub fn rekinded(&self, kind: FieldKind) -> Self {
        Self {
            shape: FieldShape::blank(kind),
            ..self.clone()
        }
    }
}

/// A named, ordered list of field definitions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FormSchema {
    pub name: String,
    pub fields: Vec<FieldDefinition>,
}

impl FormSchema {
    pub fn new(name: impl Into<String>, fields: Vec<FieldDefinition>) -> Self {
        Self {
            name: name.into(),
            fields,
        }
    }

    /// Every field has a non-blank label.
    pub fn is_valid(&self) -> bool {
        self.fields.iter().all(FieldDefinition::has_label)
    }

    pub fn field(&self, id: &str) -> Option<&FieldDefinition> {
        self.fields.iter().find(|f| f.id.as_str() == id)
    }
}
