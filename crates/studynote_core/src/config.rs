//! Application configuration.
//!
//! # Responsibility
//! - Hold the tunables shared by the store, the editor session and hosts.
//! - Accept partial JSON overrides from hosts; missing fields keep defaults.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Storage key holding the serialized note collection.
pub const DEFAULT_STORAGE_KEY: &str = "notes";
pub const DEFAULT_TITLE_PREFIX: &str = "Ny Anteckning";
pub const DEFAULT_PLACEHOLDER: &str = "Välj en anteckning eller skapa en ny för att börja skriva.";
pub const DEFAULT_LOAD_GRACE_MS: u64 = 100;
pub const DEFAULT_HISTORY_DEPTH: usize = 100;

/// Runtime configuration for a notes app instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Durable-storage key for the whole collection.
    pub storage_key: String,
    /// Prefix for generated note titles (`"<prefix> <n>"`).
    pub title_prefix: String,
    /// Message shown when no note is selected.
    pub placeholder: String,
    /// Fallback window after which an unconfirmed load stops suppressing changes.
    pub load_grace_ms: u64,
    /// Maximum undo steps retained by the editor.
    pub history_depth: usize,
}

impl AppConfig {
    /// Parses a JSON override document on top of the defaults.
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    pub fn load_grace(&self) -> Duration {
        Duration::from_millis(self.load_grace_ms)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            title_prefix: DEFAULT_TITLE_PREFIX.to_string(),
            placeholder: DEFAULT_PLACEHOLDER.to_string(),
            load_grace_ms: DEFAULT_LOAD_GRACE_MS,
            history_depth: DEFAULT_HISTORY_DEPTH,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{AppConfig, DEFAULT_STORAGE_KEY};
    use std::time::Duration;

    #[test]
    fn partial_json_keeps_remaining_defaults() {
        let config = AppConfig::from_json(r#"{"title_prefix":"Note","load_grace_ms":5}"#).unwrap();
        assert_eq!(config.title_prefix, "Note");
        assert_eq!(config.load_grace(), Duration::from_millis(5));
        assert_eq!(config.storage_key, DEFAULT_STORAGE_KEY);
    }

    #[test]
    fn malformed_json_is_rejected() {
        assert!(AppConfig::from_json("{not json").is_err());
    }
}
