//! Category module - the closed set of evidence source domains

use serde::{Deserialize, Serialize};
use std::fmt;

/// Source-domain tag for an evidence item
///
/// The category is assigned from the upstream collection an item came from,
/// never sniffed from content. It selects the required fields, the key facts
/// used for corpus scoring, and the tier-1 rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    /// On-chain transfer extracted from blockchain CSV exports
    BlockchainTransaction,

    /// Claim lifted from an AI-generated document summary
    DocumentSummary,

    /// URL or promotional pattern found by crawl analysis
    UrlPattern,

    /// Entity-to-entity linkage from network analysis
    EntityLink,
}

impl Category {
    /// All categories, in report order
    pub const ALL: [Category; 4] = [
        Category::BlockchainTransaction,
        Category::DocumentSummary,
        Category::UrlPattern,
        Category::EntityLink,
    ];

    /// Get the category tag as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::BlockchainTransaction => "blockchain-transaction",
            Category::DocumentSummary => "document-summary",
            Category::UrlPattern => "url-pattern",
            Category::EntityLink => "entity-link",
        }
    }

    /// Parse a category tag
    ///
    /// Accepts the canonical kebab-case tag plus the short names the
    /// extraction passes write into their output (`blockchain`, `entities`, ...).
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().replace('_', "-").as_str() {
            "blockchain-transaction" | "blockchain" => Some(Category::BlockchainTransaction),
            "document-summary" | "summary" | "shadowlens" | "notebooklm-summary" => {
                Some(Category::DocumentSummary)
            }
            "url-pattern" | "url" | "urls" => Some(Category::UrlPattern),
            "entity-link" | "entity" | "entities" => Some(Category::EntityLink),
            _ => None,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid category: {}", s))
    }
}
