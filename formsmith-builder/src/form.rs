//! Form render/submit engine.
//!
//! [`FormBuilder`] owns the live state of one rendered schema: the value map
//! and the error map. Changes only touch values; validation runs on submit
//! and its result replaces the error map wholesale, so the errors shown are
//! always those of the latest submit.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use formsmith_common::Debouncer;
use formsmith_config::{FormsConfig, DEFAULT_FIELD_CHANGE_DEBOUNCE_MS};
use formsmith_fields::{validate_all, ErrorMap, FieldDefinition, FieldId, FieldValue, ValueMap};
use tracing::{debug, warn};

use crate::render::{coerce, describe, ControlDescription};

/// Caller-supplied per-field change callback.
pub type ChangeCallback = Arc<dyn Fn(FieldValue) + Send + Sync>;

/// Values and errors of one rendered schema instance.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LiveFormState {
    values: ValueMap,
    errors: ErrorMap,
}

impl LiveFormState {
    /// Seed every field with its default value and no errors.
    pub fn seeded(fields: &[FieldDefinition]) -> Self {
        Self {
            values: defaults(fields),
            errors: ErrorMap::new(),
        }
    }

    pub fn value(&self, id: &str) -> Option<&FieldValue> {
        self.values.get(id)
    }

    pub fn error(&self, id: &str) -> Option<&str> {
        self.errors.get(id).map(String::as_str)
    }

    pub fn values(&self) -> &ValueMap {
        &self.values
    }

    pub fn errors(&self) -> &ErrorMap {
        &self.errors
    }
}

fn defaults(fields: &[FieldDefinition]) -> ValueMap {
    fields
        .iter()
        .map(|field| (field.id.clone(), field.default_value.clone()))
        .collect()
}

/// Result of a submit attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// Every field passed; carries the accepted data.
    Accepted(ValueMap),
    /// At least one field failed; carries every failure.
    Rejected(ErrorMap),
}

impl SubmitOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, SubmitOutcome::Accepted(_))
    }
}

/// A field's control plus the error slot shown next to it.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedField {
    pub control: ControlDescription,
    pub error: Option<String>,
}

/// The live, validated rendering of a fixed list of fields.
pub struct FormBuilder {
    fields: Vec<FieldDefinition>,
    state: LiveFormState,
    change_delay: Duration,
    callbacks: HashMap<FieldId, Debouncer<FieldValue>>,
}

impl FormBuilder {
    pub fn new(fields: Vec<FieldDefinition>) -> Self {
        let state = LiveFormState::seeded(&fields);
        debug!(fields = fields.len(), "form rendered");
        Self {
            fields,
            state,
            change_delay: Duration::from_millis(DEFAULT_FIELD_CHANGE_DEBOUNCE_MS),
            callbacks: HashMap::new(),
        }
    }

    /// A form whose change callbacks use the configured debounce delay.
    pub fn from_config(fields: Vec<FieldDefinition>, config: &FormsConfig) -> Self {
        Self::new(fields).with_change_delay(config.field_change_delay())
    }

    /// Debounce delay for callbacks attached with [`FormBuilder::on_change`]
    /// from here on.
    pub fn with_change_delay(mut self, delay: Duration) -> Self {
        self.change_delay = delay;
        self
    }

    pub fn change_delay(&self) -> Duration {
        self.change_delay
    }

    /// Attach a callback invoked after changes to field `id`, debounced by
    /// the form's change delay so a burst of changes delivers only the last
    /// value.
    pub fn on_change<F>(self, id: &str, callback: F) -> Self
    where
        F: Fn(FieldValue) + Send + Sync + 'static,
    {
        let delay = self.change_delay;
        self.on_change_after(id, delay, callback)
    }

    /// Like [`FormBuilder::on_change`] with an explicit delay for this field.
    pub fn on_change_after<F>(mut self, id: &str, delay: Duration, callback: F) -> Self
    where
        F: Fn(FieldValue) + Send + Sync + 'static,
    {
        match self.fields.iter().find(|f| f.id.as_str() == id) {
            Some(field) => {
                self.callbacks
                    .insert(field.id.clone(), Debouncer::new(delay, callback));
            }
            None => warn!(field = id, "callback for unknown field ignored"),
        }
        self
    }

    /// Like [`FormBuilder::on_change`] for an already shared callback.
    pub fn on_change_shared(self, id: &str, callback: ChangeCallback) -> Self {
        self.on_change(id, move |value| callback(value))
    }

    pub fn fields(&self) -> &[FieldDefinition] {
        &self.fields
    }

    pub fn state(&self) -> &LiveFormState {
        &self.state
    }

    /// Describe every field with its current value and last submit error.
    pub fn render(&self) -> Vec<RenderedField> {
        self.fields
            .iter()
            .map(|field| RenderedField {
                control: describe(field, self.state.value(field.id.as_str())),
                error: self.state.error(field.id.as_str()).map(String::from),
            })
            .collect()
    }

    /// Store the coerced `raw` value for field `id`. Does not validate.
    ///
    /// Returns `false` when no field has that id.
    pub fn on_field_change(&mut self, id: &str, raw: &str) -> bool {
        let Some(field) = self.fields.iter().find(|f| f.id.as_str() == id) else {
            warn!(field = id, "change for unknown field ignored");
            return false;
        };
        let value = coerce(field.kind(), raw);
        self.state.values.insert(field.id.clone(), value.clone());
        if let Some(callback) = self.callbacks.get(id) {
            callback.schedule(value);
        }
        true
    }

    /// Validate every field, replace the error map, and accept the data only
    /// when nothing failed. Repeating a submit on unchanged state yields the
    /// same outcome.
    pub fn on_submit(&mut self) -> SubmitOutcome {
        self.state.errors = validate_all(&self.fields, &self.state.values);
        if self.state.errors.is_empty() {
            debug!(fields = self.fields.len(), "form submitted");
            SubmitOutcome::Accepted(self.state.values.clone())
        } else {
            debug!(errors = self.state.errors.len(), "form submit rejected");
            SubmitOutcome::Rejected(self.state.errors.clone())
        }
    }

    /// Restore every default value and clear all errors.
    pub fn on_reset(&mut self) {
        self.state = LiveFormState::seeded(&self.fields);
    }

    /// Swap in an edited schema while keeping state for surviving fields.
    ///
    /// Values of fields whose id is unchanged are kept; new ids are seeded
    /// from their defaults. Errors and callbacks keyed by ids that no longer
    /// exist, such as the old id of a relabeled field, are dropped.
    pub fn sync_schema(&mut self, fields: Vec<FieldDefinition>) {
        let mut values = ValueMap::with_capacity(fields.len());
        for field in &fields {
            let value = self
                .state
                .values
                .remove(&field.id)
                .unwrap_or_else(|| field.default_value.clone());
            values.insert(field.id.clone(), value);
        }
        self.state.values = values;
        self.state
            .errors
            .retain(|id, _| fields.iter().any(|f| &f.id == id));
        self.callbacks
            .retain(|id, _| fields.iter().any(|f| &f.id == id));
        self.fields = fields;
    }

    /// Cancel pending change callbacks. Also runs on drop.
    pub fn teardown(&mut self) {
        for callback in self.callbacks.values() {
            callback.cancel();
        }
    }
}

impl Drop for FormBuilder {
    fn drop(&mut self) {
        self.teardown();
    }
}

impl std::fmt::Debug for FormBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormBuilder")
            .field("fields", &self.fields.len())
            .field("state", &self.state)
            .field("change_delay", &self.change_delay)
            .finish_non_exhaustive()
    }
}
