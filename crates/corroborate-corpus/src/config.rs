//! Corpus search configuration

use serde::{Deserialize, Serialize};

/// Configuration for the corpus search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Characters of context kept on each side of a hit
    pub context_chars: usize,

    /// Hits kept per term (all hits are still counted)
    pub max_matches_per_term: usize,

    /// Directory names never descended into (pipeline outputs, tooling)
    pub skip_dirs: Vec<String>,

    /// File extensions never read (binary and database files)
    pub skip_extensions: Vec<String>,

    /// Follow symbolic links while walking
    pub follow_links: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            context_chars: 200,
            max_matches_per_term: 100,
            skip_dirs: ["processed", "coordination", "memory", "scripts"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            skip_extensions: ["db", "sqlite", "pkl", "gpickle", "png", "jpg", "pdf"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            follow_links: false,
        }
    }
}

impl SearchConfig {
    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.max_matches_per_term == 0 {
            return Err("max_matches_per_term must be at least 1".to_string());
        }
        if self.skip_extensions.iter().any(|e| e.trim().trim_start_matches('.').is_empty()) {
            return Err("skip_extensions must not contain empty entries".to_string());
        }
        Ok(())
    }

    /// Whether a directory name is skipped
    pub fn skips_dir(&self, name: &str) -> bool {
        self.skip_dirs.iter().any(|d| d == name)
    }

    /// Whether a file extension is skipped (case-insensitive, leading dot optional)
    pub fn skips_extension(&self, extension: &str) -> bool {
        self.skip_extensions
            .iter()
            .any(|e| e.trim_start_matches('.').eq_ignore_ascii_case(extension))
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
