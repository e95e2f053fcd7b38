//! Corpus module - search hits and the key facts they corroborate

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of search term, which decides how a term is matched
///
/// Serialized with the list names the document search writes
/// (`wallet_addresses`, `entity_names`, ...); the short forms are accepted too.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TermType {
    /// Blockchain wallet address (exact match)
    #[serde(rename = "wallet_addresses", alias = "address")]
    Address,

    /// Person or organisation name (case-insensitive substring)
    #[serde(rename = "entity_names", alias = "name")]
    Name,

    /// USD amount (numeric pattern)
    #[serde(rename = "amounts", alias = "amount")]
    Amount,

    /// URL (exact match)
    #[serde(rename = "urls", alias = "url")]
    Url,

    /// Free keyword (word-boundary, case-insensitive)
    #[serde(rename = "keywords", alias = "keyword")]
    Keyword,

    /// Platform identifier (case-insensitive)
    #[serde(rename = "platforms", alias = "platform")]
    Platform,
}

impl TermType {
    /// All term types, in the order term lists are written
    pub const ALL: [TermType; 6] = [
        TermType::Address,
        TermType::Name,
        TermType::Keyword,
        TermType::Amount,
        TermType::Platform,
        TermType::Url,
    ];

    /// List name used in term and mapping files
    pub fn as_str(&self) -> &'static str {
        match self {
            TermType::Address => "wallet_addresses",
            TermType::Name => "entity_names",
            TermType::Amount => "amounts",
            TermType::Url => "urls",
            TermType::Keyword => "keywords",
            TermType::Platform => "platforms",
        }
    }

    /// Parse a list name or short form
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "wallet_addresses" | "address" => Some(TermType::Address),
            "entity_names" | "name" => Some(TermType::Name),
            "amounts" | "amount" => Some(TermType::Amount),
            "urls" | "url" => Some(TermType::Url),
            "keywords" | "keyword" => Some(TermType::Keyword),
            "platforms" | "platform" => Some(TermType::Platform),
            _ => None,
        }
    }
}

impl fmt::Display for TermType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Trust class of the collaborator that produced a match
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SourceClass {
    /// Raw corpus document, counted at full weight
    #[default]
    Direct,

    /// AI-generated summary or notebook, counted at the discount
    SummaryDerived,
}

/// A single occurrence of a search term inside the document corpus
///
/// Produced by the document search collaborator and consumed read-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorpusMatch {
    /// The term that was searched for
    pub term: String,

    /// How the term was matched
    pub term_type: TermType,

    /// Path of the document containing the hit
    pub document_path: String,

    /// 1-based line number of the hit
    pub line_number: u64,

    /// Text surrounding the hit
    pub context_snippet: String,

    /// Trust class of the originating source
    #[serde(default)]
    pub source_class: SourceClass,
}

impl CorpusMatch {
    /// Create a direct match
    pub fn new(
        term: impl Into<String>,
        term_type: TermType,
        document_path: impl Into<String>,
        line_number: u64,
        context_snippet: impl Into<String>,
    ) -> Self {
        Self {
            term: term.into(),
            term_type,
            document_path: document_path.into(),
            line_number,
            context_snippet: context_snippet.into(),
            source_class: SourceClass::Direct,
        }
    }

    /// Mark the match as coming from a given source class
    pub fn with_source_class(mut self, source_class: SourceClass) -> Self {
        self.source_class = source_class;
        self
    }
}

/// Value of a key fact, typed by how it is matched against the corpus
#[derive(Debug, Clone, PartialEq)]
pub enum FactKind {
    /// Wallet address
    Address(String),

    /// Person or organisation name
    Name(String),

    /// USD amount, always positive
    Amount(f64),

    /// URL
    Url(String),
}

impl FactKind {
    /// The term type this fact is matched as
    pub fn term_type(&self) -> TermType {
        match self {
            FactKind::Address(_) => TermType::Address,
            FactKind::Name(_) => TermType::Name,
            FactKind::Amount(_) => TermType::Amount,
            FactKind::Url(_) => TermType::Url,
        }
    }
}

/// One populated key fact of an evidence item
#[derive(Debug, Clone, PartialEq)]
pub struct KeyFact {
    /// Payload field the fact was read from
    pub field: &'static str,

    /// The fact value
    pub kind: FactKind,
}

impl KeyFact {
    /// Create a key fact
    pub fn new(field: &'static str, kind: FactKind) -> Self {
        Self { field, kind }
    }
}
