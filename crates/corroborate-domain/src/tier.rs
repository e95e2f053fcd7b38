//! Tier module - confidence buckets for admitted evidence

use serde::{Deserialize, Serialize};
use std::fmt;

/// Confidence tier assigned to an admitted evidence item
///
/// Lower numbers are stronger:
/// - One: cryptographic or documentary proof with full corroboration
/// - Two: strong corroboration, one subpoena away from proof
/// - Three: weak corroboration, investigative lead
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Tier {
    /// Highest confidence
    One,

    /// Strong corroboration
    Two,

    /// Weak corroboration
    Three,
}

impl Tier {
    /// All tiers, strongest first
    pub const ALL: [Tier; 3] = [Tier::One, Tier::Two, Tier::Three];

    /// Get the tier number (1 = strongest)
    pub fn number(&self) -> u8 {
        match self {
            Tier::One => 1,
            Tier::Two => 2,
            Tier::Three => 3,
        }
    }

    /// Get the tier from its number
    pub fn from_number(n: u8) -> Option<Self> {
        match n {
            1 => Some(Tier::One),
            2 => Some(Tier::Two),
            3 => Some(Tier::Three),
            _ => None,
        }
    }

    /// Report label, e.g. `tier1`
    pub fn label(&self) -> &'static str {
        match self {
            Tier::One => "tier1",
            Tier::Two => "tier2",
            Tier::Three => "tier3",
        }
    }

    /// Whether a claimed tier number is stronger than this tier
    ///
    /// Used to detect downgrades: a claim of 1 assigned tier 2 is a downgrade.
    pub fn is_downgrade_from(&self, claimed: Option<u8>) -> bool {
        matches!(claimed, Some(c) if c >= 1 && c < self.number())
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tier {}", self.number())
    }
}

impl From<Tier> for u8 {
    fn from(tier: Tier) -> Self {
        tier.number()
    }
}

impl TryFrom<u8> for Tier {
    type Error = String;

    fn try_from(n: u8) -> Result<Self, Self::Error> {
        Self::from_number(n).ok_or_else(|| format!("Invalid tier: {}", n))
    }
}
