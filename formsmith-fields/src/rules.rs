//! Validation rules attached to a field.
//!
//! Each field kind carries its own rule shape, so a length bound can only
//! exist on a text field and a numeric bound only on a number field.

use std::fmt;

use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{FieldsError, Result};

/// Custom failure message(s) that replace every generated default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ErrorMessages {
    One(String),
    Many(Vec<String>),
}

impl ErrorMessages {
    /// Parse comma-separated free text, trimming entries and dropping blanks.
    pub fn from_csv(raw: &str) -> Option<Self> {
        let messages: Vec<String> = raw
            .split(',')
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .map(String::from)
            .collect();
        if messages.is_empty() {
            None
        } else {
            Some(ErrorMessages::Many(messages))
        }
    }

    /// The message shown on failure, or `None` when nothing usable is set.
    pub fn message(&self) -> Option<String> {
        match self {
            ErrorMessages::One(m) if !m.is_empty() => Some(m.clone()),
            ErrorMessages::Many(ms) if !ms.is_empty() => Some(ms.join(", ")),
            _ => None,
        }
    }
}

/// A compiled string-matching rule. Compares and serializes by its source.
#[derive(Debug, Clone)]
pub struct Pattern(Regex);

impl Pattern {
    pub fn new(source: &str) -> Result<Self> {
        Regex::new(source)
            .map(Pattern)
            .map_err(|source_err| FieldsError::InvalidPattern {
                pattern: source.to_string(),
                source: source_err,
            })
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    pub fn is_match(&self, value: &str) -> bool {
        self.0.is_match(value)
    }
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Pattern {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Pattern {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let source = String::deserialize(deserializer)?;
        Pattern::new(&source).map_err(serde::de::Error::custom)
    }
}

/// Rule members shared by every kind.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationBase {
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_messages: Option<ErrorMessages>,
}

impl ValidationBase {
    /// The custom message, if one is configured and non-empty.
    pub fn custom_message(&self) -> Option<String> {
        self.error_messages.as_ref().and_then(ErrorMessages::message)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextValidation {
    #[serde(flatten)]
    pub base: ValidationBase,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_length: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<Pattern>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NumberValidation {
    #[serde(flatten)]
    pub base: ValidationBase,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
}

/// Rules for select and radio fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChoiceValidation {
    #[serde(flatten)]
    pub base: ValidationBase,
}

/// A partial rule merged shallowly into a field's existing rule.
///
/// Members that do not apply to the field's kind are ignored on merge.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationPatch {
    pub required: Option<bool>,
    pub error_messages: Option<Option<ErrorMessages>>,
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
    pub pattern: Option<Option<Pattern>>,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl ValidationPatch {
    pub fn required(required: bool) -> Self {
        Self {
            required: Some(required),
            ..Self::default()
        }
    }

    pub fn with_min_length(mut self, n: usize) -> Self {
        self.min_length = Some(n);
        self
    }

    pub fn with_max_length(mut self, n: usize) -> Self {
        self.max_length = Some(n);
        self
    }

    pub fn with_pattern(mut self, pattern: Option<Pattern>) -> Self {
        self.pattern = Some(pattern);
        self
    }

    pub fn with_min(mut self, min: f64) -> Self {
        self.min = Some(min);
        self
    }

    pub fn with_max(mut self, max: f64) -> Self {
        self.max = Some(max);
        self
    }

    pub fn with_error_messages(mut self, messages: Option<ErrorMessages>) -> Self {
        self.error_messages = Some(messages);
        self
    }

    pub(crate) fn merge_base(&self, base: &mut ValidationBase) {
        if let Some(required) = self.required {
            base.required = required;
        }
        if let Some(messages) = &self.error_messages {
            base.error_messages = messages.clone();
        }
    }

    pub(crate) fn merge_text(&self, rule: &mut TextValidation) {
        self.merge_base(&mut rule.base);
        if let Some(n) = self.min_length {
            rule.min_length = Some(n);
        }
        if let Some(n) = self.max_length {
            rule.max_length = Some(n);
        }
        if let Some(pattern) = &self.pattern {
            rule.pattern = pattern.clone();
        }
    }

    pub(crate) fn merge_number(&self, rule: &mut NumberValidation) {
        self.merge_base(&mut rule.base);
        if let Some(min) = self.min {
            rule.min = Some(min);
        }
        if let Some(max) = self.max {
            rule.max = Some(max);
        }
    }

    /// Whether the patch carries members meaningless for choice fields.
    pub(crate) fn has_bounds(&self) -> bool {
        self.min_length.is_some()
            || self.max_length.is_some()
            || self.pattern.is_some()
            || self.min.is_some()
            || self.max.is_some()
    }
}
