use std::env;
use std::path::Path;

use serde::{Deserialize, Serialize};

use self::dictionary::DictionaryConfig;
use self::search::SearchConfig;

pub mod dictionary;
pub mod search;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Default, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    pub dictionary: DictionaryConfig,
    pub search: SearchConfig,
}

impl Config {
    /// Defaults with environment overrides applied.
    pub fn new() -> Self {
        Self::default().with_overrides(|key| env::var(key).ok())
    }

    /// Parse a JSON config; missing fields keep their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        tracing::info!("Loading config from {}", path.display());
        let data = std::fs::read_to_string(path)?;
        Self::from_json_str(&data)
    }

    /// Apply `KOTOBA_*` overrides looked up through `lookup`.
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(dir) = lookup("KOTOBA_DATA_DIR") {
            self.dictionary.data_dir = dir;
        }

        if let Some(max) = lookup("KOTOBA_MAX_ENTRIES").and_then(|v| v.parse().ok()) {
            self.search.max_entries = max;
        }

        if let Some(max) = lookup("KOTOBA_MAX_NAME_ENTRIES").and_then(|v| v.parse().ok()) {
            self.search.max_name_entries = max;
        }

        self
    }
}
