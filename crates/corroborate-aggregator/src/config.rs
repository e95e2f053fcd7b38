//! Configuration for the Aggregator

use serde::{Deserialize, Serialize};

/// What to do when two categories produce the same evidence id
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CollisionPolicy {
    /// Abort the run; distinct categories never legitimately share an id
    #[default]
    Reject,

    /// Keep the later record and report the overwrite
    LastWins,
}

/// Configuration for the Aggregator
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AggregatorConfig {
    /// Handling of ids shared across categories
    ///
    /// Duplicates within one category always keep the last record and are
    /// reported as overwrites.
    pub collision: CollisionPolicy,
}

impl AggregatorConfig {
    /// Lenient preset: cross-category collisions are overwrites, not errors
    pub fn lenient() -> Self {
        Self {
            collision: CollisionPolicy::LastWins,
        }
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}
