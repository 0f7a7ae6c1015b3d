//! Session configuration.
//!
//! Every field has a default, so an empty TOML document is a valid config:
//!
//! ```toml
//! default_suspect_count = 3
//! summary_event_window = 3
//! summary_notes_per_player = 3
//! narrate_self_updates = false
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::player_ledger::DEFAULT_SUSPECT_COUNT;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("invalid configuration: {reason}")]
    Invalid { reason: String },
}

/// Tunables for one session of memory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MemoryConfig {
    /// How many suspects the summary and the default suspect query return.
    pub default_suspect_count: usize,

    /// How many of the latest key events the summary includes.
    pub summary_event_window: usize,

    /// How many of each player's latest behavioral notes the summary includes.
    pub summary_notes_per_player: usize,

    /// Also log a thought-process entry for role, alliance, enemy, vote and
    /// strategy updates.
    pub narrate_self_updates: bool,
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            default_suspect_count: DEFAULT_SUSPECT_COUNT,
            summary_event_window: 3,
            summary_notes_per_player: 3,
            narrate_self_updates: false,
        }
    }
}

impl MemoryConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let source = std::fs::read_to_string(path.as_ref())?;
        let config = Self::from_toml_str(&source)?;
        tracing::debug!(path = %path.as_ref().display(), ?config, "loaded memory config");
        Ok(config)
    }

    /// Check the values make sense together.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.default_suspect_count == 0 {
            return Err(ConfigError::Invalid {
                reason: "default_suspect_count must be at least 1".to_owned(),
            });
        }
        Ok(())
    }
}
