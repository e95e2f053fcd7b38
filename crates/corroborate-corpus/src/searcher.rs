//! Corpus search: walk the document directories once and match every term

use crate::config::SearchConfig;
use crate::matcher::TermMatcher;
use crate::CorpusError;
use corroborate_aggregator::{CorpusMapping, MappedHit, MappingSummary, TermLists, TermMapping};
use corroborate_domain::{SourceClass, TermType};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

struct CompiledTerm {
    term: String,
    term_type: TermType,
    matcher: TermMatcher,
    hits: Vec<MappedHit>,
}

/// Searches document directories for the terms in a [`TermLists`]
#[derive(Debug, Clone)]
pub struct CorpusSearcher {
    config: SearchConfig,
}

impl CorpusSearcher {
    /// Create a new searcher
    pub fn new(config: SearchConfig) -> Result<Self, CorpusError> {
        config.validate().map_err(CorpusError::Config)?;
        Ok(Self { config })
    }

    /// Create with default configuration
    pub fn default_config() -> Self {
        Self {
            config: SearchConfig::default(),
        }
    }

    /// Get configuration
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Search `dirs` for every term
    ///
    /// Only terms with at least one hit get an entry. Missing directories are
    /// skipped with a warning; if none exist the search fails.
    pub fn search(&self, terms: &TermLists, dirs: &[PathBuf]) -> Result<CorpusMapping, CorpusError> {
        let existing: Vec<&PathBuf> = dirs
            .iter()
            .filter(|dir| {
                let exists = dir.is_dir();
                if !exists {
                    warn!("Skipping non-existent corpus directory: {}", dir.display());
                }
                exists
            })
            .collect();
        if existing.is_empty() {
            let listed: Vec<String> = dirs.iter().map(|d| d.display().to_string()).collect();
            return Err(CorpusError::NoCorpus(listed.join(", ")));
        }

        let mut compiled = terms
            .terms()
            .into_iter()
            .map(|(term_type, term)| {
                Ok(CompiledTerm {
                    matcher: TermMatcher::new(term_type, &term)?,
                    term,
                    term_type,
                    hits: Vec::new(),
                })
            })
            .collect::<Result<Vec<_>, CorpusError>>()?;

        info!(
            "Searching {} terms across {} corpus directories",
            compiled.len(),
            existing.len()
        );

        let mut files_scanned = 0usize;
        for dir in &existing {
            for path in self.files(dir) {
                let bytes = match std::fs::read(&path) {
                    Ok(bytes) => bytes,
                    Err(e) => {
                        debug!("Skipping unreadable file {}: {}", path.display(), e);
                        continue;
                    }
                };
                files_scanned += 1;
                self.scan(&path, &String::from_utf8_lossy(&bytes), &mut compiled);
            }
        }

        let total_terms = compiled.len();
        let mut mapping = CorpusMapping::default();
        let mut total_matches = 0;
        for term in compiled {
            if term.hits.is_empty() {
                continue;
            }
            if mapping.terms.contains_key(&term.term) {
                debug!("Term '{}' listed under several types, keeping the first", term.term);
                continue;
            }
            let entry = TermMapping::new(term.term_type, term.hits, self.config.max_matches_per_term);
            total_matches += entry.match_count;
            mapping.terms.insert(term.term, entry);
        }

        mapping.summary = Some(MappingSummary {
            generated_at: chrono::Local::now().to_rfc3339(),
            total_terms_searched: total_terms,
            terms_with_matches: mapping.terms.len(),
            total_matches,
            corpus_directories: existing.iter().map(|d| d.display().to_string()).collect(),
        });

        info!(
            "Scanned {} files: {}/{} terms matched, {} hits",
            files_scanned,
            mapping.terms.len(),
            total_terms,
            total_matches
        );
        Ok(mapping)
    }

    /// Files under `dir`, skipping configured directories and extensions, in name order
    fn files(&self, dir: &Path) -> Vec<PathBuf> {
        let mut files = Vec::new();
        let walker = WalkDir::new(dir)
            .follow_links(self.config.follow_links)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| {
                entry.depth() == 0
                    || !entry.file_type().is_dir()
                    || !self.config.skips_dir(&entry.file_name().to_string_lossy())
            });

        for entry in walker {
            match entry {
                Ok(entry) => {
                    if !entry.file_type().is_file() {
                        continue;
                    }
                    let skipped = entry
                        .path()
                        .extension()
                        .map(|ext| self.config.skips_extension(&ext.to_string_lossy()))
                        .unwrap_or(false);
                    if !skipped {
                        files.push(entry.into_path());
                    }
                }
                Err(e) => debug!("Error walking {}: {}", dir.display(), e),
            }
        }
        files
    }

    fn scan(&self, path: &Path, content: &str, terms: &mut [CompiledTerm]) {
        let file = path.display().to_string();
        for (idx, line) in content.lines().enumerate() {
            for term in terms.iter_mut() {
                let Some(offset) = term.matcher.find(line) else {
                    continue;
                };
                term.hits.push(MappedHit {
                    file: file.clone(),
                    line: idx as u64 + 1,
                    context: snippet(line, offset, term.term.chars().count(), self.config.context_chars),
                    match_type: term.matcher.label().to_string(),
                    source_class: SourceClass::Direct,
                });
            }
        }
    }
}

/// Text around a hit: `radius` chars either side of the term, trimmed
fn snippet(line: &str, offset: usize, term_chars: usize, radius: usize) -> String {
    let offset = if line.is_char_boundary(offset) { offset } else { 0 };
    let start = line[..offset]
        .char_indices()
        .rev()
        .take(radius)
        .last()
        .map(|(i, _)| i)
        .unwrap_or(offset);
    let end = line[offset..]
        .char_indices()
        .nth(term_chars + radius)
        .map(|(i, _)| offset + i)
        .unwrap_or(line.len());
    line[start..end].trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snippet_window() {
        let line = "aaaa TERM bbbb";
        assert_eq!(snippet(line, 5, 4, 2), "a TERM b");
        assert_eq!(snippet(line, 5, 4, 200), line);
        assert_eq!(snippet(line, 0, 4, 0), "aaaa");
    }

    #[test]
    fn test_snippet_respects_char_boundaries() {
        let line = "ééé hit ééé";
        let offset = line.find("hit").unwrap();
        assert_eq!(snippet(line, offset, 3, 2), "é hit é");
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = SearchConfig {
            max_matches_per_term: 0,
            ..Default::default()
        };
        assert!(matches!(CorpusSearcher::new(config), Err(CorpusError::Config(_))));
        assert_eq!(CorpusSearcher::default_config().config().context_chars, 200);
    }
}
