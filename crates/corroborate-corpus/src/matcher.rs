//! Per-term-type line matching

use crate::CorpusError;
use corroborate_domain::TermType;
use regex::{Regex, RegexBuilder};

/// How one search term is recognised in a line of text
#[derive(Debug, Clone)]
pub enum TermMatcher {
    /// Case-insensitive containment (addresses, platforms)
    Insensitive {
        /// Lowercased term
        needle: String,
        /// Label written to `match_type`
        label: &'static str,
    },

    /// Name containment, tolerant of case and missing spaces
    Name {
        /// Lowercased name
        lowered: String,
        /// Lowercased name with spaces removed
        compact: String,
    },

    /// Whole-word, case-insensitive
    Keyword(Regex),

    /// Any of the usual renderings of a USD amount
    Amount(Vec<String>),

    /// Exact containment
    Exact(String),
}

impl TermMatcher {
    /// Build the matcher for a term
    pub fn new(term_type: TermType, term: &str) -> Result<Self, CorpusError> {
        let term = term.trim();
        Ok(match term_type {
            TermType::Address => TermMatcher::Insensitive {
                needle: term.to_lowercase(),
                label: "exact",
            },
            TermType::Platform => TermMatcher::Insensitive {
                needle: term.to_lowercase(),
                label: "platform",
            },
            TermType::Name => {
                let lowered = term.to_lowercase();
                let compact = lowered.split_whitespace().collect();
                TermMatcher::Name { lowered, compact }
            }
            TermType::Keyword => {
                let pattern = format!(r"\b{}\b", regex::escape(term));
                let re = RegexBuilder::new(&pattern)
                    .case_insensitive(true)
                    .build()
                    .map_err(|source| CorpusError::Pattern {
                        term: term.to_string(),
                        source,
                    })?;
                TermMatcher::Keyword(re)
            }
            TermType::Amount => TermMatcher::Amount(amount_patterns(term)),
            TermType::Url => TermMatcher::Exact(term.to_string()),
        })
    }

    /// Label written to the hit's `match_type`
    pub fn label(&self) -> &'static str {
        match self {
            TermMatcher::Insensitive { label, .. } => label,
            TermMatcher::Name { .. } => "fuzzy",
            TermMatcher::Keyword(_) => "keyword",
            TermMatcher::Amount(_) => "amount",
            TermMatcher::Exact(_) => "url",
        }
    }

    /// Byte offset of the hit in `line`, if the line matches
    pub fn find(&self, line: &str) -> Option<usize> {
        match self {
            TermMatcher::Insensitive { needle, .. } => find_insensitive(line, needle),
            TermMatcher::Name { lowered, compact } => find_insensitive(line, lowered)
                .or_else(|| find_insensitive(line, compact).map(|_| 0)),
            TermMatcher::Keyword(re) => re.find(line).map(|m| m.start()),
            TermMatcher::Amount(patterns) => patterns.iter().find_map(|p| line.find(p.as_str())),
            TermMatcher::Exact(needle) => line.find(needle.as_str()),
        }
    }
}

/// Case-insensitive find; the offset is only trusted when lowercasing kept byte lengths
fn find_insensitive(line: &str, needle: &str) -> Option<usize> {
    if needle.is_empty() {
        return None;
    }
    let lowered = line.to_lowercase();
    let pos = lowered.find(needle)?;
    Some(if lowered.len() == line.len() { pos } else { 0 })
}

/// Renderings searched for an amount term such as `1250.0`
///
/// `$1,250.00`, `$1,250`, the term as written, and `$1K` for amounts of a
/// thousand or more.
pub fn amount_patterns(term: &str) -> Vec<String> {
    let mut patterns = Vec::new();
    let Ok(value) = term.trim().trim_start_matches('$').replace(',', "").parse::<f64>() else {
        patterns.push(term.to_string());
        return patterns;
    };
    if !value.is_finite() || value <= 0.0 {
        patterns.push(term.to_string());
        return patterns;
    }

    let cents = format!("{:.2}", value);
    let (whole, fraction) = cents.split_once('.').unwrap_or((cents.as_str(), "00"));
    patterns.push(format!("${}.{}", group_thousands(whole), fraction));
    patterns.push(format!("${}", group_thousands(&format!("{}", value.trunc() as u64))));
    patterns.push(term.to_string());
    if value >= 1000.0 {
        patterns.push(format!("${:.0}K", value / 1000.0));
    }
    patterns.dedup();
    patterns
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, c) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_address_is_case_insensitive() {
        let m = TermMatcher::new(TermType::Address, "0xabcdef").unwrap();
        assert_eq!(m.find("sent to 0xABCDEF today"), Some(8));
        assert_eq!(m.find("nothing here"), None);
        assert_eq!(m.label(), "exact");
    }

    #[test]
    fn test_name_variants() {
        let m = TermMatcher::new(TermType::Name, "Jane Doe").unwrap();
        assert!(m.find("Meeting with JANE DOE").is_some());
        assert!(m.find("@janedoe posted").is_some());
        assert!(m.find("Jane Smith").is_none());
    }

    #[test]
    fn test_keyword_whole_word() {
        let m = TermMatcher::new(TermType::Keyword, "heal").unwrap();
        assert!(m.find("They claim it will Heal you").is_some());
        assert!(m.find("healthy snacks").is_none());
    }

    #[test]
    fn test_url_is_exact() {
        let m = TermMatcher::new(TermType::Url, "https://example.com/A").unwrap();
        assert!(m.find("see https://example.com/A now").is_some());
        assert!(m.find("see https://example.com/a now").is_none());
    }

    #[test]
    fn test_amount_patterns() {
        assert_eq!(
            amount_patterns("1234.5"),
            vec!["$1,234.50", "$1,234", "1234.5", "$1K"]
        );
        assert_eq!(amount_patterns("950.0"), vec!["$950.00", "$950", "950.0"]);
        assert_eq!(amount_patterns("n/a"), vec!["n/a"]);

        let m = TermMatcher::new(TermType::Amount, "25000.0").unwrap();
        assert!(m.find("wired $25,000 to the account").is_some());
        assert!(m.find("about $25K total").is_some());
        assert!(m.find("$2,500").is_none());
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands("1"), "1");
        assert_eq!(group_thousands("1000"), "1,000");
        assert_eq!(group_thousands("1234567"), "1,234,567");
    }
}
