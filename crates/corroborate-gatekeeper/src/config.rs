//! Gatekeeper configuration

use corroborate_domain::{DISCOUNT, STRONG_THRESHOLD, WEAK_THRESHOLD};
use serde::{Deserialize, Serialize};

/// Scoring policy: discount, thresholds and source classification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Weight of a summary-derived document (0.0-1.0)
    pub discount: f64,

    /// Effective sources needed for tier 2 (and the blockchain tier-1 proof rule)
    pub strong_threshold: f64,

    /// Effective sources needed for tier 3
    pub weak_threshold: f64,

    /// Path fragments (case-insensitive) marking a document as summary-derived
    pub summary_path_markers: Vec<String>,

    /// How far below the weak threshold a flagged item counts as a near miss
    pub near_miss_margin: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            discount: DISCOUNT,
            strong_threshold: STRONG_THRESHOLD,
            weak_threshold: WEAK_THRESHOLD,
            summary_path_markers: vec!["shadowlens".to_string(), "notebooklm".to_string()],
            near_miss_margin: 1.0,
        }
    }
}

impl ScoringConfig {
    /// Validate the scoring policy
    pub fn validate(&self) -> Result<(), String> {
        if !self.discount.is_finite() || !(0.0..=1.0).contains(&self.discount) {
            return Err(format!("discount must be in [0.0, 1.0], got {}", self.discount));
        }
        for (name, value) in [
            ("strong_threshold", self.strong_threshold),
            ("weak_threshold", self.weak_threshold),
            ("near_miss_margin", self.near_miss_margin),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(format!("{} must be a non-negative number, got {}", name, value));
            }
        }
        if self.weak_threshold > self.strong_threshold {
            return Err(format!(
                "weak_threshold ({}) must not exceed strong_threshold ({})",
                self.weak_threshold, self.strong_threshold
            ));
        }
        if self.summary_path_markers.iter().any(|m| m.trim().is_empty()) {
            return Err("summary_path_markers must not contain empty entries".to_string());
        }
        Ok(())
    }
}

/// One protected-party safeguard rule
///
/// Patterns are regular expressions matched case-insensitively against the
/// item's serialized content.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PolicyRule {
    /// Rule name, cited in rejections
    pub name: String,

    /// Mentions of the protected party
    pub subject: Vec<String>,

    /// Content implicating the protected party
    pub denylist: Vec<String>,

    /// Protective or contextual language that clears a mention
    pub overrides: Vec<String>,
}

/// Policy safeguard configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PolicyConfig {
    /// Rules, evaluated in order
    pub rules: Vec<PolicyRule>,
}

impl PolicyConfig {
    /// Validate rule shape (patterns are compiled by the gatekeeper)
    pub fn validate(&self) -> Result<(), String> {
        for (idx, rule) in self.rules.iter().enumerate() {
            if rule.name.trim().is_empty() {
                return Err(format!("policy rule #{} has no name", idx + 1));
            }
            if rule.subject.is_empty() {
                return Err(format!("policy rule '{}' has no subject patterns", rule.name));
            }
        }
        Ok(())
    }
}

/// Configuration for the Gatekeeper
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GatekeeperConfig {
    /// Scoring policy
    pub scoring: ScoringConfig,

    /// Policy safeguards
    pub policy: PolicyConfig,
}

impl GatekeeperConfig {
    /// Create a strict configuration (summaries count for a quarter document)
    pub fn strict() -> Self {
        Self {
            scoring: ScoringConfig {
                discount: 0.25,
                near_miss_margin: 0.5,
                ..ScoringConfig::default()
            },
            policy: PolicyConfig::default(),
        }
    }

    /// Create a lenient configuration (summaries count as full documents)
    pub fn lenient() -> Self {
        Self {
            scoring: ScoringConfig {
                discount: 1.0,
                ..ScoringConfig::default()
            },
            policy: PolicyConfig::default(),
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        self.scoring.validate()?;
        self.policy.validate()
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
