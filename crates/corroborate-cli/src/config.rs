//! Configuration management for the CLI.

use crate::error::{CliError, Result};
use corroborate_aggregator::AggregatorConfig;
use corroborate_corpus::SearchConfig;
use corroborate_gatekeeper::{GatekeeperConfig, PolicyConfig, ScoringConfig};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// File name looked up in the working directory.
pub const LOCAL_CONFIG: &str = "corroborate.toml";

/// CLI configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Global settings
    pub settings: Settings,

    /// Source-strength scoring policy
    pub scoring: ScoringConfig,

    /// Aggregation collision handling
    pub aggregation: AggregatorConfig,

    /// Policy safeguards
    pub policy: PolicyConfig,

    /// Corpus search
    pub search: SearchConfig,
}

/// Global CLI settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Enable colored output
    pub color: bool,

    /// Default output format
    pub format: OutputFormat,
}

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Table format
    Table,
    /// JSON format
    Json,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            color: true,
            format: OutputFormat::Table,
        }
    }
}

impl Config {
    /// Default configuration file path.
    ///
    /// `corroborate.toml` in the working directory when present, otherwise
    /// `corroborate/config.toml` under the user configuration directory.
    pub fn default_path() -> Result<PathBuf> {
        let local = PathBuf::from(LOCAL_CONFIG);
        if local.exists() {
            return Ok(local);
        }
        let base = dirs::config_dir()
            .ok_or_else(|| CliError::Config("Could not find configuration directory".into()))?;
        Ok(base.join("corroborate").join("config.toml"))
    }

    /// Load configuration.
    ///
    /// An explicit path must exist. Without one, the default path is read if
    /// present and built-in defaults are used otherwise.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let path = match explicit {
            Some(path) => {
                if !path.exists() {
                    return Err(CliError::Config(format!(
                        "Config file not found: {}",
                        path.display()
                    )));
                }
                path.to_path_buf()
            }
            None => match Self::default_path() {
                Ok(path) if path.exists() => path,
                _ => return Ok(Self::default()),
            },
        };

        let contents = fs::read_to_string(&path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to file.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(path, self.to_toml()?)?;
        Ok(())
    }

    /// Serialize to TOML.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| CliError::Config(format!("Failed to serialize config: {}", e)))
    }

    /// Validate every section.
    pub fn validate(&self) -> Result<()> {
        self.gatekeeper().validate().map_err(CliError::Config)?;
        self.search.validate().map_err(CliError::Config)
    }

    /// Classifier configuration.
    pub fn gatekeeper(&self) -> GatekeeperConfig {
        GatekeeperConfig {
            scoring: self.scoring.clone(),
            policy: self.policy.clone(),
        }
    }
}
