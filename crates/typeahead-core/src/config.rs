use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{Result, TypeaheadError};
use crate::suggestion::FieldId;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypeaheadConfig {
    #[serde(default)]
    pub endpoint: EndpointConfig,

    #[serde(default)]
    pub controller: ControllerConfig,

    #[serde(default = "default_fields")]
    pub fields: Vec<FieldConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EndpointConfig {
    /// URL the suggestion request is POSTed to.
    #[serde(default = "default_url")]
    pub url: String,

    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ControllerConfig {
    /// Quiet period after the last keystroke before a fetch is issued.
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,

    /// Identifier of the search form submissions are sent to.
    #[serde(default = "default_form_id")]
    pub form_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FieldConfig {
    pub id: FieldId,

    #[serde(default)]
    pub label: String,
}

impl FieldConfig {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: FieldId::new(id),
            label: label.into(),
        }
    }
}

fn default_url() -> String {
    "http://127.0.0.1:5000/autocomplete".to_string()
}
fn default_timeout() -> u64 {
    10
}
fn default_debounce_ms() -> u64 {
    150
}
fn default_form_id() -> String {
    "search-form".to_string()
}
fn default_fields() -> Vec<FieldConfig> {
    vec![
        FieldConfig::new("search-bar", "Search"),
        FieldConfig::new("search-bar-results", "Refine results"),
    ]
}

impl Default for TypeaheadConfig {
    fn default() -> Self {
        Self {
            endpoint: EndpointConfig::default(),
            controller: ControllerConfig::default(),
            fields: default_fields(),
        }
    }
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            timeout_seconds: default_timeout(),
        }
    }
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
            form_id: default_form_id(),
        }
    }
}

impl ControllerConfig {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

impl EndpointConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

impl TypeaheadConfig {
    /// Load config from ~/.config/typeahead/config.toml, creating defaults if missing.
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            let config = TypeaheadConfig::default();
            config.save()?;
            Ok(config)
        }
    }

    /// Load and validate config from an explicit path.
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| TypeaheadError::Config(format!("Failed to read config: {e}")))?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: TypeaheadConfig = toml::from_str(contents)
            .map_err(|e| TypeaheadError::Config(format!("Failed to parse config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Save config to disk.
    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| TypeaheadError::Config(format!("Failed to serialize config: {e}")))?;
        std::fs::write(&config_path, contents)?;
        Ok(())
    }

    /// Get the config file path.
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().ok_or_else(|| {
            TypeaheadError::Config("Could not determine config directory".into())
        })?;
        Ok(config_dir.join("typeahead").join("config.toml"))
    }

    pub fn validate(&self) -> Result<()> {
        if self.fields.is_empty() {
            return Err(TypeaheadError::Config(
                "At least one search field must be configured".into(),
            ));
        }
        let mut seen = HashSet::new();
        for field in &self.fields {
            if field.id.as_str().trim().is_empty() {
                return Err(TypeaheadError::Config("Field ids must not be empty".into()));
            }
            if !seen.insert(&field.id) {
                return Err(TypeaheadError::Config(format!(
                    "Duplicate field id: {}",
                    field.id
                )));
            }
        }
        if self.controller.debounce_ms == 0 {
            return Err(TypeaheadError::Config(
                "debounce_ms must be greater than zero".into(),
            ));
        }
        Ok(())
    }

    pub fn field_ids(&self) -> Vec<FieldId> {
        self.fields.iter().map(|f| f.id.clone()).collect()
    }
}
