//! Formsmith configuration using Figment
//!
//! Settings are layered with this precedence, lowest first:
//!
//! 1. Built-in defaults ([`FormsConfig::default`])
//! 2. `formsmith.toml`, `formsmith.yaml`, `formsmith.json` in the config directory
//! 3. `FORMSMITH_*` environment variables
//!
//! ```toml
//! field_change_debounce_ms = 300
//! autosave_debounce_ms = 1000
//! storage_dir = ".formsmith"
//! bucket_key = "formBuilderData"
//! ```
//!
//! ```bash
//! export FORMSMITH_AUTOSAVE_DEBOUNCE_MS=2000   # → autosave_debounce_ms
//! ```

pub mod error;

use std::path::{Path, PathBuf};
use std::time::Duration;

use figment::providers::{Env, Format, Json, Serialized, Toml, Yaml};
use figment::Figment;
use serde::{Deserialize, Serialize};

pub use error::{ConfigError, Result};

/// Base file name searched for in the config directory.
pub const CONFIG_FILE_STEM: &str = "formsmith";

/// Prefix for environment variable overrides.
pub const ENV_PREFIX: &str = "FORMSMITH_";

/// Default quiet period before a per-field change callback fires.
pub const DEFAULT_FIELD_CHANGE_DEBOUNCE_MS: u64 = 300;

/// Default quiet period before the in-progress schema is autosaved.
pub const DEFAULT_AUTOSAVE_DEBOUNCE_MS: u64 = 1000;

/// Default storage bucket key holding every saved schema.
pub const DEFAULT_BUCKET_KEY: &str = "formBuilderData";

/// Runtime settings for the builder, maker and storage crates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormsConfig {
    pub field_change_debounce_ms: u64,
    pub autosave_debounce_ms: u64,
    pub storage_dir: PathBuf,
    pub bucket_key: String,
}

impl Default for FormsConfig {
    fn default() -> Self {
        Self {
            field_change_debounce_ms: DEFAULT_FIELD_CHANGE_DEBOUNCE_MS,
            autosave_debounce_ms: DEFAULT_AUTOSAVE_DEBOUNCE_MS,
            storage_dir: PathBuf::from(".formsmith"),
            bucket_key: DEFAULT_BUCKET_KEY.to_string(),
        }
    }
}

impl FormsConfig {
    /// Load configuration using the current directory as the config directory.
    pub fn load() -> Result<Self> {
        Self::load_from(Path::new("."))
    }

    /// Load configuration from files in `dir` plus environment overrides.
    pub fn load_from(dir: &Path) -> Result<Self> {
        let config: FormsConfig = Self::figment(dir).extract()?;
        config.validate()?;
        tracing::debug!(
            dir = %dir.display(),
            autosave_ms = config.autosave_debounce_ms,
            field_change_ms = config.field_change_debounce_ms,
            "loaded formsmith configuration"
        );
        Ok(config)
    }

    /// The layered figment for `dir`, exposed so embedders can add providers.
    pub fn figment(dir: &Path) -> Figment {
        Figment::from(Serialized::defaults(FormsConfig::default()))
            .merge(Toml::file(dir.join(format!("{CONFIG_FILE_STEM}.toml"))))
            .merge(Yaml::file(dir.join(format!("{CONFIG_FILE_STEM}.yaml"))))
            .merge(Json::file(dir.join(format!("{CONFIG_FILE_STEM}.json"))))
            .merge(Env::prefixed(ENV_PREFIX))
    }

    /// Reject values the storage layer cannot use.
    pub fn validate(&self) -> Result<()> {
        if self.bucket_key.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "bucket_key".into(),
                message: "must not be empty".into(),
            });
        }
        if self.bucket_key.contains(['/', '\\']) {
            return Err(ConfigError::InvalidValue {
                key: "bucket_key".into(),
                message: "must not contain path separators".into(),
            });
        }
        Ok(())
    }

    pub fn field_change_delay(&self) -> Duration {
        Duration::from_millis(self.field_change_debounce_ms)
    }

    pub fn autosave_delay(&self) -> Duration {
        Duration::from_millis(self.autosave_debounce_ms)
    }
}
