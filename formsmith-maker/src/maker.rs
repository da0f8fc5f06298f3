//! The schema authoring state machine.
//!
//! [`FormMaker`] owns the schema being edited, the index of saved schemas,
//! which tab is showing, and which field panels are collapsed. Every edit
//! replaces the edited field with a new definition and schedules a debounced
//! autosave under the current form name.

use std::collections::BTreeSet;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use formsmith_builder::{demo_schema, FormBuilder};
use formsmith_common::{Debouncer, Pretty};
use formsmith_config::{
    FormsConfig, DEFAULT_AUTOSAVE_DEBOUNCE_MS, DEFAULT_FIELD_CHANGE_DEBOUNCE_MS,
};
use formsmith_fields::{FieldDefinition, IdGenerator, RandomSuffix};
use formsmith_store::{FormStorage, SavedForms};
use tracing::{debug, info};

use crate::confirm::Confirm;
use crate::error::{AuthoringError, Result};
use crate::update::FieldUpdate;

/// Prompt shown before a saved form is deleted.
pub const DELETE_PROMPT: &str = "Are you sure you want to delete this form?";

/// The views a user moves between.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Tab {
    /// The demo schema rendered as a form.
    #[default]
    Preview,
    /// The field editor.
    Maker,
    /// The schema under construction rendered as a form.
    LivePreview,
    /// The list of saved schemas.
    SavedForms,
}

type AutosavePayload = (String, Vec<FieldDefinition>);

/// Builder for [`FormMaker`]. Created by [`FormMaker::builder`].
pub struct FormMakerBuilder {
    storage: FormStorage,
    ids: Arc<dyn IdGenerator>,
    autosave_delay: Duration,
    change_delay: Duration,
}

impl FormMakerBuilder {
    /// Source of id suffixes for relabeled fields.
    pub fn ids(mut self, ids: Arc<dyn IdGenerator>) -> Self {
        self.ids = ids;
        self
    }

    /// Quiet period before edits are autosaved.
    pub fn autosave_delay(mut self, delay: Duration) -> Self {
        self.autosave_delay = delay;
        self
    }

    /// Debounce delay for change callbacks on the preview forms.
    pub fn change_delay(mut self, delay: Duration) -> Self {
        self.change_delay = delay;
        self
    }

    /// Build the maker and load the saved-schema index from storage.
    pub fn build(self) -> FormMaker {
        let saved = Arc::new(Mutex::new(self.storage.load_all()));

        let autosave = {
            let storage = self.storage.clone();
            let saved = Arc::clone(&saved);
            Debouncer::new(
                self.autosave_delay,
                move |(name, fields): AutosavePayload| {
                    if name.is_empty() || fields.is_empty() {
                        return;
                    }
                    storage.save(&name, &fields);
                    lock(&saved).insert(name.clone(), fields);
                    debug!(form = %name, "autosaved form");
                },
            )
        };

        debug!(saved = lock(&saved).len(), "form maker opened");

        FormMaker {
            storage: self.storage,
            ids: self.ids,
            change_delay: self.change_delay,
            active_tab: Tab::default(),
            form_name: String::new(),
            fields: vec![FieldDefinition::blank()],
            saved,
            collapsed: BTreeSet::new(),
            autosave,
        }
    }
}

fn lock(saved: &Mutex<SavedForms>) -> MutexGuard<'_, SavedForms> {
    saved
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Interactive editor for a named schema.
pub struct FormMaker {
    storage: FormStorage,
    ids: Arc<dyn IdGenerator>,
    change_delay: Duration,
    active_tab: Tab,
    form_name: String,
    fields: Vec<FieldDefinition>,
    saved: Arc<Mutex<SavedForms>>,
    collapsed: BTreeSet<usize>,
    autosave: Debouncer<AutosavePayload>,
}

impl FormMaker {
    /// Start configuring a maker over `storage`.
    ///
    /// ```rust,ignore
    /// let maker = FormMaker::builder(FormStorage::in_memory())
    ///     .autosave_delay(Duration::from_millis(500))
    ///     .build();
    /// ```
    pub fn builder(storage: FormStorage) -> FormMakerBuilder {
        FormMakerBuilder {
            storage,
            ids: Arc::new(RandomSuffix),
            autosave_delay: Duration::from_millis(DEFAULT_AUTOSAVE_DEBOUNCE_MS),
            change_delay: Duration::from_millis(DEFAULT_FIELD_CHANGE_DEBOUNCE_MS),
        }
    }

    /// A maker with default settings over `storage`.
    pub fn new(storage: FormStorage) -> Self {
        Self::builder(storage).build()
    }

    /// A maker over file storage with the configured debounce delays.
    pub fn from_config(config: &FormsConfig) -> Self {
        Self::builder(FormStorage::from_config(config))
            .autosave_delay(config.autosave_delay())
            .change_delay(config.field_change_delay())
            .build()
    }

    // --- Tabs ---

    pub fn active_tab(&self) -> Tab {
        self.active_tab
    }

    pub fn select_tab(&mut self, tab: Tab) {
        debug!(from = ?self.active_tab, to = ?tab, "tab selected");
        self.active_tab = tab;
    }

    /// The demo schema as a fresh form.
    pub fn preview_form(&self) -> FormBuilder {
        FormBuilder::new(demo_schema()).with_change_delay(self.change_delay)
    }

    /// The schema under construction as a fresh form.
    pub fn live_preview(&self) -> FormBuilder {
        FormBuilder::new(self.fields.clone()).with_change_delay(self.change_delay)
    }

    // --- Schema under edit ---

    pub fn form_name(&self) -> &str {
        &self.form_name
    }

    pub fn set_form_name(&mut self, name: impl Into<String>) {
        self.form_name = name.into();
        self.schedule_autosave();
    }

    pub fn fields(&self) -> &[FieldDefinition] {
        &self.fields
    }

    pub fn field(&self, index: usize) -> Option<&FieldDefinition> {
        self.fields.get(index)
    }

    /// Every field has a non-blank label. Recomputed from the field list on
    /// each call.
    pub fn is_valid(&self) -> bool {
        self.fields.iter().all(FieldDefinition::has_label)
    }

    /// Why Add Field is disabled, if it is.
    pub fn add_field_blocked_reason(&self) -> Option<String> {
        (!self.is_valid()).then(|| AuthoringError::InvalidFields.to_string())
    }

    /// Why Save is disabled, if it is.
    pub fn save_blocked_reason(&self) -> Option<String> {
        self.add_field_blocked_reason()
    }

    /// Append a blank field. Refused while any field lacks a label.
    pub fn add_field(&mut self) -> Result<()> {
        if !self.is_valid() {
            return Err(AuthoringError::InvalidFields);
        }
        self.fields.push(FieldDefinition::blank());
        debug!(fields = self.fields.len(), "field added");
        self.schedule_autosave();
        Ok(())
    }

    /// Replace the field at `index` with the result of `update`.
    pub fn update_field(&mut self, index: usize, update: FieldUpdate) -> Result<()> {
        let current = self.fields.get(index).ok_or(AuthoringError::NoSuchField {
            index,
            len: self.fields.len(),
        })?;
        let next = update.apply(current, self.ids.as_ref());
        self.fields[index] = next;
        self.schedule_autosave();
        Ok(())
    }

    /// Remove and return the field at `index`. Collapse state of later
    /// panels moves with them.
    pub fn remove_field(&mut self, index: usize) -> Result<FieldDefinition> {
        if index >= self.fields.len() {
            return Err(AuthoringError::NoSuchField {
                index,
                len: self.fields.len(),
            });
        }
        let removed = self.fields.remove(index);
        self.collapsed = self
            .collapsed
            .iter()
            .filter(|&&i| i != index)
            .map(|&i| if i > index { i - 1 } else { i })
            .collect();
        debug!(index, fields = self.fields.len(), "field removed");
        self.schedule_autosave();
        Ok(removed)
    }

    // --- Panels ---

    pub fn toggle_collapse(&mut self, index: usize) {
        if !self.collapsed.remove(&index) {
            self.collapsed.insert(index);
        }
    }

    pub fn is_collapsed(&self, index: usize) -> bool {
        self.collapsed.contains(&index)
    }

    // --- Persistence ---

    /// Persist the schema under the current name now.
    pub fn save(&mut self) -> Result<()> {
        if self.form_name.is_empty() {
            return Err(AuthoringError::MissingFormName);
        }
        if !self.is_valid() {
            return Err(AuthoringError::InvalidFields);
        }
        self.storage.save(&self.form_name, &self.fields);
        lock(&self.saved).insert(self.form_name.clone(), self.fields.clone());
        info!(form = %self.form_name, fields = self.fields.len(), "form saved");
        Ok(())
    }

    /// Open the saved schema `name` for editing. Returns `false`, leaving
    /// everything untouched, when no such schema exists.
    pub fn load(&mut self, name: &str) -> bool {
        let Some(fields) = self.storage.load(name) else {
            debug!(form = name, "no saved form to load");
            return false;
        };
        self.form_name = name.to_string();
        self.fields = fields;
        self.collapsed.clear();
        self.active_tab = Tab::Maker;
        debug!(form = name, "form loaded: {}", Pretty(&self.fields));
        true
    }

    /// Delete the saved schema `name` after the user confirms.
    pub fn delete(&mut self, name: &str, confirm: &dyn Confirm) -> bool {
        if !confirm.confirm(DELETE_PROMPT) {
            return false;
        }
        if name == self.form_name {
            self.autosave.cancel();
        }
        self.storage.delete(name);
        lock(&self.saved).remove(name);
        info!(form = name, "form deleted");
        true
    }

    /// Start a new, unnamed schema with one blank field.
    pub fn new_form(&mut self) {
        self.form_name.clear();
        self.fields = vec![FieldDefinition::blank()];
        self.collapsed.clear();
        self.active_tab = Tab::Maker;
    }

    /// Names of saved schemas, in order.
    pub fn saved_forms(&self) -> Vec<String> {
        lock(&self.saved).keys().cloned().collect()
    }

    pub fn saved_form(&self, name: &str) -> Option<Vec<FieldDefinition>> {
        lock(&self.saved).get(name).cloned()
    }

    /// Whether an autosave is waiting for its quiet period.
    pub fn autosave_pending(&self) -> bool {
        self.autosave.is_pending()
    }

    /// Cancel any pending autosave. Also runs on drop.
    pub fn teardown(&mut self) {
        self.autosave.cancel();
    }

    fn schedule_autosave(&self) {
        if self.form_name.is_empty() || self.fields.is_empty() {
            return;
        }
        self.autosave
            .schedule((self.form_name.clone(), self.fields.clone()));
    }
}

impl Drop for FormMaker {
    fn drop(&mut self) {
        self.teardown();
    }
}

impl std::fmt::Debug for FormMaker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormMaker")
            .field("active_tab", &self.active_tab)
            .field("form_name", &self.form_name)
            .field("fields", &self.fields.len())
            .finish_non_exhaustive()
    }
}
