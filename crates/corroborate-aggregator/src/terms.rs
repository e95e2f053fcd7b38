//! Search-term extraction from aggregated evidence

use crate::error::AggregateError;
use corroborate_domain::{format_score, is_placeholder, EvidenceItem, FactKind, Payload, TermType};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::Path;

/// Per-list term counts, stored under `_stats`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TermStats {
    /// Wallet addresses
    pub total_wallet_addresses: usize,
    /// Entity names
    pub total_entity_names: usize,
    /// Keywords
    pub total_keywords: usize,
    /// Amounts
    pub total_amounts: usize,
    /// Platforms
    pub total_platforms: usize,
    /// URLs
    pub total_urls: usize,
}

/// Sorted, deduplicated search terms per term type
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TermLists {
    /// Lowercased wallet addresses
    pub wallet_addresses: BTreeSet<String>,

    /// Entity and principal names
    pub entity_names: BTreeSet<String>,

    /// Indicator keywords
    pub keywords: BTreeSet<String>,

    /// Positive USD amounts, ascending
    pub amounts: Vec<f64>,

    /// Platform identifiers
    pub platforms: BTreeSet<String>,

    /// URLs
    pub urls: BTreeSet<String>,

    /// Counts per list
    #[serde(rename = "_stats")]
    pub stats: TermStats,
}

impl TermLists {
    /// Derive term lists from evidence items
    pub fn extract<'a>(items: impl IntoIterator<Item = &'a EvidenceItem>) -> Self {
        let mut lists = TermLists::default();

        for item in items {
            for fact in item.key_facts() {
                match fact.kind {
                    FactKind::Address(address) => {
                        lists.wallet_addresses.insert(address.to_lowercase());
                    }
                    FactKind::Name(name) => {
                        lists.entity_names.insert(name);
                    }
                    FactKind::Amount(amount) => lists.amounts.push(amount),
                    FactKind::Url(url) => {
                        lists.urls.insert(url);
                    }
                }
            }

            if let Payload::UrlPattern(p) = &item.payload {
                if !is_placeholder(&p.platform) {
                    lists.platforms.insert(p.platform.trim().to_string());
                }
                lists.keywords.extend(
                    p.keywords
                        .iter()
                        .filter(|k| !is_placeholder(k))
                        .map(|k| k.trim().to_string()),
                );
            }
        }

        lists.amounts.sort_by(f64::total_cmp);
        lists.amounts.dedup();
        lists.stats = lists.compute_stats();
        lists
    }

    fn compute_stats(&self) -> TermStats {
        TermStats {
            total_wallet_addresses: self.wallet_addresses.len(),
            total_entity_names: self.entity_names.len(),
            total_keywords: self.keywords.len(),
            total_amounts: self.amounts.len(),
            total_platforms: self.platforms.len(),
            total_urls: self.urls.len(),
        }
    }

    /// Every term with its type, in list order
    ///
    /// Amounts are rendered the way they appear as mapping keys (`1250.0`).
    pub fn terms(&self) -> Vec<(TermType, String)> {
        let mut terms = Vec::with_capacity(self.len());
        terms.extend(self.wallet_addresses.iter().map(|t| (TermType::Address, t.clone())));
        terms.extend(self.entity_names.iter().map(|t| (TermType::Name, t.clone())));
        terms.extend(self.keywords.iter().map(|t| (TermType::Keyword, t.clone())));
        terms.extend(self.amounts.iter().map(|a| (TermType::Amount, format_score(*a))));
        terms.extend(self.platforms.iter().map(|t| (TermType::Platform, t.clone())));
        terms.extend(self.urls.iter().map(|t| (TermType::Url, t.clone())));
        terms
    }

    /// Total number of terms
    pub fn len(&self) -> usize {
        self.wallet_addresses.len()
            + self.entity_names.len()
            + self.keywords.len()
            + self.amounts.len()
            + self.platforms.len()
            + self.urls.len()
    }

    /// Whether there are no terms
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Parse a term file
    pub fn parse(text: &str, origin: &str) -> Result<Self, AggregateError> {
        let mut lists: TermLists = serde_json::from_str(text)
            .map_err(|e| AggregateError::parse(origin, e.to_string()))?;
        lists.amounts.retain(|a| a.is_finite() && *a > 0.0);
        lists.stats = lists.compute_stats();
        Ok(lists)
    }

    /// Read and parse a term file
    pub fn load(path: &Path) -> Result<Self, AggregateError> {
        let origin = path.display().to_string();
        let text = std::fs::read_to_string(path).map_err(|source| AggregateError::Io {
            path: origin.clone(),
            source,
        })?;
        Self::parse(&text, &origin)
    }

    /// Pretty-printed JSON
    pub fn to_json_pretty(&self) -> Result<String, AggregateError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
