//! Evidence module - the unit that flows through the pipeline
//!
//! An [`EvidenceItem`] is created once by the aggregator and never mutated;
//! scoring and classification attach new records instead.

use crate::corpus::{FactKind, KeyFact};
use crate::Category;
use serde::{Deserialize, Serialize};

/// Whether a string field holds a placeholder rather than a value
///
/// Empty strings, whitespace and the literal `unknown` (any case) are placeholders.
pub fn is_placeholder(value: &str) -> bool {
    let trimmed = value.trim();
    trimmed.is_empty() || trimmed.eq_ignore_ascii_case("unknown")
}

/// The all-zero burn/mint address used as a filler by some exports
fn is_null_address(value: &str) -> bool {
    let trimmed = value.trim();
    match (trimmed.get(..2), trimmed.get(2..)) {
        (Some(prefix), Some(digits)) => {
            prefix.eq_ignore_ascii_case("0x") && !digits.is_empty() && digits.chars().all(|c| c == '0')
        }
        _ => false,
    }
}

/// Ownership attribution for one side of a transfer
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WalletAttribution {
    /// Attributed owner name
    #[serde(default)]
    pub entity: String,

    /// Attribution status (`known`, `suspected`, ...)
    #[serde(default)]
    pub attribution: String,
}

impl WalletAttribution {
    /// An attribution that claims to be known but names nobody
    pub fn is_contradictory(&self) -> bool {
        self.attribution.trim().eq_ignore_ascii_case("known")
            && self.entity.trim().eq_ignore_ascii_case("unknown")
    }
}

/// Fields of a blockchain transaction item
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BlockchainPayload {
    /// Transaction hash, the cryptographic proof of the transfer
    #[serde(default)]
    pub tx_hash: String,

    /// Sending wallet
    #[serde(default)]
    pub from_address: String,

    /// Receiving wallet
    #[serde(default)]
    pub to_address: String,

    /// Transfer value in USD
    #[serde(default)]
    pub amount_usd: f64,

    /// Transfer value in the native asset
    #[serde(default)]
    pub amount_crypto: f64,

    /// Chain name
    #[serde(default)]
    pub chain: String,

    /// Attribution of the sending wallet
    #[serde(default)]
    pub from_wallet: WalletAttribution,

    /// Attribution of the receiving wallet
    #[serde(default)]
    pub to_wallet: WalletAttribution,

    /// CSV export the transfer was read from
    #[serde(default)]
    pub source_file: String,
}

/// Fields of an AI document summary item
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentSummaryPayload {
    /// Date the summarized event is anchored to
    #[serde(default)]
    pub temporal_anchor: String,

    /// Named responsible parties
    #[serde(default)]
    pub principals: Vec<String>,

    /// Pointer to the retrievable source document (custodian, record id)
    #[serde(default)]
    pub subpoena_target: String,

    /// Summary file the item came from
    #[serde(default)]
    pub source_file: String,

    /// Section within the summary file
    #[serde(default)]
    pub source_section: String,

    /// Summary text
    #[serde(default)]
    pub summary: String,
}

/// Fields of a URL or promotional pattern item
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UrlPatternPayload {
    /// The URL
    #[serde(default)]
    pub url: String,

    /// Platform hosting the URL
    #[serde(default)]
    pub platform: String,

    /// What the pattern shows
    #[serde(default)]
    pub description: String,

    /// Indicator keywords found at the URL
    #[serde(default)]
    pub keywords: Vec<String>,
}

/// Fields of an entity linkage item
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EntityLinkPayload {
    /// The linked entity
    #[serde(default)]
    pub entity_name: String,

    /// Principals the entity is linked to
    #[serde(default)]
    pub principals: Vec<String>,

    /// Nature of the link
    #[serde(default)]
    pub relationship: String,

    /// File the linkage was inferred from
    #[serde(default)]
    pub source_file: String,
}

/// Category-specific attributes, one variant per [`Category`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "category", rename_all = "kebab-case")]
pub enum Payload {
    /// Blockchain transaction
    BlockchainTransaction(BlockchainPayload),

    /// AI document summary
    DocumentSummary(DocumentSummaryPayload),

    /// URL pattern
    UrlPattern(UrlPatternPayload),

    /// Entity linkage
    EntityLink(EntityLinkPayload),
}

impl Payload {
    /// The category this payload belongs to
    pub fn category(&self) -> Category {
        match self {
            Payload::BlockchainTransaction(_) => Category::BlockchainTransaction,
            Payload::DocumentSummary(_) => Category::DocumentSummary,
            Payload::UrlPattern(_) => Category::UrlPattern,
            Payload::EntityLink(_) => Category::EntityLink,
        }
    }

    /// Populated key facts used to look up corroborating documents
    ///
    /// Placeholder strings, the null address and non-positive amounts are skipped.
    pub fn key_facts(&self) -> Vec<KeyFact> {
        let mut facts = Vec::new();
        match self {
            Payload::BlockchainTransaction(p) => {
                for (field, address) in [("from_address", &p.from_address), ("to_address", &p.to_address)] {
                    if !is_placeholder(address) && !is_null_address(address) {
                        facts.push(KeyFact::new(field, FactKind::Address(address.trim().to_string())));
                    }
                }
                if p.amount_usd > 0.0 {
                    facts.push(KeyFact::new("amount_usd", FactKind::Amount(p.amount_usd)));
                }
            }
            Payload::DocumentSummary(p) => {
                push_names(&mut facts, "principals", &p.principals);
            }
            Payload::UrlPattern(p) => {
                if !is_placeholder(&p.url) {
                    facts.push(KeyFact::new("url", FactKind::Url(p.url.trim().to_string())));
                }
            }
            Payload::EntityLink(p) => {
                if !is_placeholder(&p.entity_name) {
                    facts.push(KeyFact::new("entity_name", FactKind::Name(p.entity_name.trim().to_string())));
                }
                push_names(&mut facts, "principals", &p.principals);
            }
        }
        facts
    }
}

fn push_names(facts: &mut Vec<KeyFact>, field: &'static str, names: &[String]) {
    for name in names {
        if !is_placeholder(name) {
            facts.push(KeyFact::new(field, FactKind::Name(name.trim().to_string())));
        }
    }
}

/// One claimed fact plus its provenance
///
/// Created once by the aggregator and treated as an immutable value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvidenceItem {
    /// Identifier, unique within a run
    pub id: String,

    /// Category-specific attributes
    pub payload: Payload,

    /// Tier the upstream extractor believes the item merits (never trusted)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub claimed_tier: Option<u8>,
}

impl EvidenceItem {
    /// Create a new evidence item
    pub fn new(id: impl Into<String>, payload: Payload) -> Self {
        Self {
            id: id.into(),
            payload,
            claimed_tier: None,
        }
    }

    /// Record the tier the upstream extractor claimed
    pub fn with_claimed_tier(mut self, tier: Option<u8>) -> Self {
        self.claimed_tier = tier;
        self
    }

    /// The item's category
    pub fn category(&self) -> Category {
        self.payload.category()
    }

    /// Populated key facts of the payload
    pub fn key_facts(&self) -> Vec<KeyFact> {
        self.payload.key_facts()
    }
}
