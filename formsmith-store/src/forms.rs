//! Saved schemas in a single namespaced bucket.
//!
//! Every schema lives under one key as a JSON object mapping schema name to
//! its field list. [`FormStorage`] is the boundary where storage failures
//! stop: each is logged and turned into "absent", "empty" or a no-op.

use std::collections::BTreeMap;
use std::sync::Arc;

use formsmith_config::{FormsConfig, DEFAULT_BUCKET_KEY};
use formsmith_fields::FieldDefinition;
use serde_json::{Map, Value};
use tracing::{debug, error, warn};

use crate::error::Result;
use crate::kv::{FileStore, KeyValueStore, MemoryStore};

/// Schema name to field list, ordered by name.
pub type SavedForms = BTreeMap<String, Vec<FieldDefinition>>;

#[derive(Clone)]
pub struct FormStorage {
    store: Arc<dyn KeyValueStore>,
    bucket: String,
}

impl FormStorage {
    /// Storage over `store` using the default bucket key.
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self::with_bucket(store, DEFAULT_BUCKET_KEY)
    }

    pub fn with_bucket(store: Arc<dyn KeyValueStore>, bucket: impl Into<String>) -> Self {
        Self {
            store,
            bucket: bucket.into(),
        }
    }

    /// Storage that lives only as long as the process.
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()))
    }

    /// File-backed storage at the configured directory and bucket.
    pub fn from_config(config: &FormsConfig) -> Self {
        Self::with_bucket(
            Arc::new(FileStore::new(&config.storage_dir)),
            config.bucket_key.clone(),
        )
    }

    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    /// Store `fields` under `name`, replacing any schema of that name.
    pub fn save(&self, name: &str, fields: &[FieldDefinition]) {
        if let Err(e) = self.try_save(name, fields) {
            error!(form = name, %e, "error saving form to storage");
        }
    }

    /// Same as [`FormStorage::save`].
    pub fn update(&self, name: &str, fields: &[FieldDefinition]) {
        self.save(name, fields);
    }

    /// The schema saved under `name`, if any.
    pub fn load(&self, name: &str) -> Option<Vec<FieldDefinition>> {
        match self.read_bucket() {
            Ok(mut forms) => forms.remove(name),
            Err(e) => {
                error!(form = name, %e, "error getting form from storage");
                None
            }
        }
    }

    /// Every saved schema. Empty when the bucket is missing or unreadable.
    pub fn load_all(&self) -> SavedForms {
        self.read_bucket().unwrap_or_else(|e| {
            error!(%e, "error getting all forms from storage");
            SavedForms::new()
        })
    }

    /// Remove the schema saved under `name`. Missing names are a no-op.
    pub fn delete(&self, name: &str) {
        if let Err(e) = self.try_delete(name) {
            error!(form = name, %e, "error deleting form from storage");
        }
    }

    fn try_save(&self, name: &str, fields: &[FieldDefinition]) -> Result<()> {
        let mut entries = self.read_raw().unwrap_or_else(|e| {
            warn!(%e, "discarding unreadable form bucket");
            Map::new()
        });
        entries.insert(name.to_string(), serde_json::to_value(fields)?);
        self.write_raw(&entries)?;
        debug!(form = name, fields = fields.len(), "saved form");
        Ok(())
    }

    /// Remove `name` from the bucket, dropping the bucket key once the last
    /// schema is gone.
    fn try_delete(&self, name: &str) -> Result<()> {
        let mut entries = self.read_raw()?;
        if entries.remove(name).is_none() {
            return Ok(());
        }
        if entries.is_empty() {
            self.store.remove_item(&self.bucket)?;
        } else {
            self.write_raw(&entries)?;
        }
        debug!(form = name, "deleted form");
        Ok(())
    }

    /// The bucket as stored, one JSON value per schema name. Writes go
    /// through this so entries that do not parse are carried over untouched.
    fn read_raw(&self) -> Result<Map<String, Value>> {
        match self.store.get_item(&self.bucket)? {
            Some(raw) => Ok(serde_json::from_str(&raw)?),
            None => Ok(Map::new()),
        }
    }

    fn write_raw(&self, entries: &Map<String, Value>) -> Result<()> {
        let json = serde_json::to_string(entries)?;
        self.store.set_item(&self.bucket, &json)
    }

    /// Parse the bucket. A missing bucket is empty; a schema entry that does
    /// not parse is skipped so one bad entry cannot hide the rest.
    fn read_bucket(&self) -> Result<SavedForms> {
        let mut forms = SavedForms::new();
        for (name, value) in self.read_raw()? {
            match serde_json::from_value::<Vec<FieldDefinition>>(value) {
                Ok(fields) => {
                    forms.insert(name, fields);
                }
                Err(e) => warn!(form = %name, %e, "skipping invalid saved form"),
            }
        }
        Ok(forms)
    }
}

impl std::fmt::Debug for FormStorage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormStorage")
            .field("bucket", &self.bucket)
            .finish_non_exhaustive()
    }
}
