//! Corpus mapping file: the document search's output
//!
//! ```json
//! {
//!   "_summary": {"generated_at": "...", "total_matches": 3},
//!   "0xabc...": {
//!     "term_type": "wallet_addresses",
//!     "match_count": 3,
//!     "unique_files": 2,
//!     "matches": [{"file": "a.md", "line": 12, "context": "...", "match_type": "exact"}]
//!   }
//! }
//! ```

use crate::error::AggregateError;
use corroborate_domain::{CorpusMatch, SourceClass, TermType};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;
use tracing::info;

/// One hit as written in the mapping file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappedHit {
    /// Document path
    pub file: String,

    /// 1-based line number
    #[serde(default)]
    pub line: u64,

    /// Surrounding text
    #[serde(default)]
    pub context: String,

    /// How the hit matched (`exact`, `fuzzy`, `amount`, ...)
    #[serde(default, alias = "matchType")]
    pub match_type: String,

    /// Trust class, when the search declared one
    #[serde(default, alias = "sourceClass", skip_serializing_if = "is_direct")]
    pub source_class: SourceClass,
}

fn is_direct(class: &SourceClass) -> bool {
    *class == SourceClass::Direct
}

/// All hits for one term
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TermMapping {
    /// Kind of the term
    pub term_type: TermType,

    /// Hits found, before truncation
    #[serde(default)]
    pub match_count: usize,

    /// Distinct files among all hits
    #[serde(default)]
    pub unique_files: usize,

    /// Hits kept
    #[serde(default)]
    pub matches: Vec<MappedHit>,
}

impl TermMapping {
    /// Build a mapping from all hits, keeping at most `limit` of them
    ///
    /// The first hit of every file is always kept, so the kept hits cover
    /// `unique_files` documents even past the limit. Remaining room is filled
    /// with the other hits in order.
    pub fn new(term_type: TermType, hits: Vec<MappedHit>, limit: usize) -> Self {
        let match_count = hits.len();

        let (mut keep, unique_files) = {
            let mut files = BTreeSet::new();
            let first_in_file: Vec<bool> = hits.iter().map(|h| files.insert(h.file.as_str())).collect();
            (first_in_file, files.len())
        };

        let mut room = limit.saturating_sub(unique_files);
        for kept in keep.iter_mut().filter(|k| !**k) {
            if room == 0 {
                break;
            }
            *kept = true;
            room -= 1;
        }

        let matches = hits
            .into_iter()
            .zip(keep)
            .filter_map(|(hit, kept)| kept.then_some(hit))
            .collect();

        Self {
            term_type,
            match_count,
            unique_files,
            matches,
        }
    }
}

/// Run statistics stored under `_summary`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MappingSummary {
    /// When the search ran
    pub generated_at: String,

    /// Terms searched
    pub total_terms_searched: usize,

    /// Terms with at least one hit
    pub terms_with_matches: usize,

    /// Hits across all terms, before truncation
    pub total_matches: usize,

    /// Directories searched
    pub corpus_directories: Vec<String>,
}

/// A whole corpus mapping: term → hits
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CorpusMapping {
    /// Run statistics
    #[serde(rename = "_summary", skip_serializing_if = "Option::is_none")]
    pub summary: Option<MappingSummary>,

    /// Hits per term
    #[serde(flatten)]
    pub terms: BTreeMap<String, TermMapping>,
}

impl CorpusMapping {
    /// Parse mapping JSON
    ///
    /// Keys starting with `_` are metadata; `_summary` is kept, the rest ignored.
    /// An entry with an unknown term type is an input defect.
    pub fn parse(text: &str, origin: &str) -> Result<Self, AggregateError> {
        let json: Value = serde_json::from_str(text)
            .map_err(|e| AggregateError::parse(origin, format!("JSON parse error: {}", e)))?;
        let Value::Object(entries) = json else {
            return Err(AggregateError::parse(origin, "corpus mapping must be a JSON object"));
        };

        let mut mapping = CorpusMapping::default();
        for (term, value) in entries {
            if term == "_summary" {
                mapping.summary = serde_json::from_value(value).ok();
                continue;
            }
            if term.starts_with('_') {
                continue;
            }
            let entry: TermMapping = serde_json::from_value(value)
                .map_err(|e| AggregateError::invalid_record(origin, &term, e.to_string()))?;
            mapping.terms.insert(term, entry);
        }
        Ok(mapping)
    }

    /// Read and parse a mapping file
    pub fn load(path: &Path) -> Result<Self, AggregateError> {
        let origin = path.display().to_string();
        let text = std::fs::read_to_string(path).map_err(|source| AggregateError::Io {
            path: origin.clone(),
            source,
        })?;
        let mapping = Self::parse(&text, &origin)?;
        info!(
            "Loaded corpus mapping with {} terms ({} hits) from {}",
            mapping.terms.len(),
            mapping.hit_count(),
            origin
        );
        Ok(mapping)
    }

    /// Pretty-printed JSON
    pub fn to_json_pretty(&self) -> Result<String, AggregateError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Number of hits kept across all terms
    pub fn hit_count(&self) -> usize {
        self.terms.values().map(|t| t.matches.len()).sum()
    }

    /// Flatten into corpus matches
    pub fn matches(&self) -> Vec<CorpusMatch> {
        self.terms
            .iter()
            .flat_map(|(term, mapping)| {
                mapping.matches.iter().map(move |hit| {
                    CorpusMatch::new(term.clone(), mapping.term_type, &hit.file, hit.line, &hit.context)
                        .with_source_class(hit.source_class)
                })
            })
            .collect()
    }
}
