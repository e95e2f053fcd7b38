//! In-memory corpus match index

use corroborate_domain::traits::CorpusLookup;
use corroborate_domain::{CorpusMatch, FactKind, KeyFact, TermType};
use std::collections::HashMap;

/// Matches held in memory, looked up by key fact
///
/// Addresses and URLs are hashed for exact lookup (addresses lowercased).
/// Names and amounts are scanned: a name matches any name term that contains
/// it, an amount matches any amount term written in one of the usual
/// patterns (`$1,234.56`, `1234.56`, `$1,234`, `$1K`).
#[derive(Debug, Clone, Default)]
pub struct CorpusIndex {
    matches: Vec<CorpusMatch>,
    exact: HashMap<(TermType, String), Vec<usize>>,
}

impl CorpusIndex {
    /// Build an index over the given matches
    pub fn new(matches: Vec<CorpusMatch>) -> Self {
        let mut exact: HashMap<(TermType, String), Vec<usize>> = HashMap::new();
        for (idx, m) in matches.iter().enumerate() {
            let key = match m.term_type {
                TermType::Address => m.term.trim().to_lowercase(),
                TermType::Url => m.term.trim().to_string(),
                _ => continue,
            };
            exact.entry((m.term_type, key)).or_default().push(idx);
        }
        Self { matches, exact }
    }

    /// All matches held
    pub fn matches(&self) -> &[CorpusMatch] {
        &self.matches
    }

    fn exact_lookup(&self, term_type: TermType, key: String) -> Vec<&CorpusMatch> {
        self.exact
            .get(&(term_type, key))
            .map(|indices| indices.iter().map(|&i| &self.matches[i]).collect())
            .unwrap_or_default()
    }
}

impl FromIterator<CorpusMatch> for CorpusIndex {
    fn from_iter<I: IntoIterator<Item = CorpusMatch>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl CorpusLookup for CorpusIndex {
    fn matches_for(&self, fact: &KeyFact) -> Vec<&CorpusMatch> {
        match &fact.kind {
            FactKind::Address(address) => {
                self.exact_lookup(TermType::Address, address.trim().to_lowercase())
            }
            FactKind::Url(url) => self.exact_lookup(TermType::Url, url.trim().to_string()),
            FactKind::Name(name) => {
                let needle = name.trim().to_lowercase();
                if needle.is_empty() {
                    return Vec::new();
                }
                self.matches
                    .iter()
                    .filter(|m| m.term_type == TermType::Name && m.term.to_lowercase().contains(&needle))
                    .collect()
            }
            FactKind::Amount(amount) => self
                .matches
                .iter()
                .filter(|m| m.term_type == TermType::Amount && amount_matches(&m.term, *amount))
                .collect(),
        }
    }

    fn len(&self) -> usize {
        self.matches.len()
    }
}

/// Parsed amount term; `thousands` is set for `$1K` shorthand
fn parse_amount(term: &str) -> Option<(f64, bool)> {
    let cleaned = term.trim().trim_start_matches('$').replace(',', "");
    let (digits, thousands) = match cleaned.strip_suffix(|c: char| c == 'K' || c == 'k') {
        Some(rest) => (rest.trim(), true),
        None => (cleaned.as_str(), false),
    };
    let value: f64 = digits.parse().ok().filter(|v: &f64| v.is_finite())?;
    Some(if thousands { (value * 1000.0, true) } else { (value, false) })
}

fn amount_matches(term: &str, amount: f64) -> bool {
    match parse_amount(term) {
        Some((value, false)) => (value - amount).abs() < 0.005,
        Some((value, true)) => amount >= 1000.0 && ((amount / 1000.0).round() * 1000.0 - value).abs() < 0.5,
        None => false,
    }
}
