//! Search command implementation.

use super::write_output;
use crate::cli::SearchArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use corroborate_aggregator::TermLists;
use corroborate_corpus::CorpusSearcher;

/// Execute the search command.
pub fn execute_search(args: SearchArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let terms = TermLists::load(&args.terms)?;
    if terms.is_empty() {
        println!("{}", formatter.warning("Term list is empty, nothing to search"));
    }

    let searcher = CorpusSearcher::new(config.search.clone())?;
    let mapping = searcher.search(&terms, &args.corpus_dirs)?;

    println!("{}", formatter.format_mapping(&mapping)?);

    if let Some(path) = &args.output {
        write_output(path, &mapping.to_json_pretty()?)?;
        println!(
            "{}",
            formatter.success(&format!("Corpus mapping written to {}", path.display()))
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputFormat;
    use corroborate_aggregator::CorpusMapping;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_search_writes_mapping() {
        let dir = TempDir::new().unwrap();
        let corpus = dir.path().join("corpus");
        fs::create_dir(&corpus).unwrap();
        fs::write(corpus.join("filing.txt"), "Roe Partners LLC filed late\n").unwrap();

        let terms = dir.path().join("terms.json");
        fs::write(&terms, r#"{"entity_names": ["Roe Partners"]}"#).unwrap();
        let output = dir.path().join("mapping.json");

        let args = SearchArgs {
            terms,
            corpus_dirs: vec![corpus],
            output: Some(output.clone()),
        };
        execute_search(args, &Config::default(), &Formatter::new(OutputFormat::Table, false)).unwrap();

        let mapping = CorpusMapping::load(&output).unwrap();
        assert_eq!(mapping.terms["Roe Partners"].match_count, 1);
    }

    #[test]
    fn test_search_without_corpus_fails() {
        let dir = TempDir::new().unwrap();
        let terms = dir.path().join("terms.json");
        fs::write(&terms, r#"{"keywords": ["miracle"]}"#).unwrap();

        let args = SearchArgs {
            terms,
            corpus_dirs: vec![dir.path().join("missing")],
            output: None,
        };
        let result = execute_search(args, &Config::default(), &Formatter::new(OutputFormat::Table, false));
        assert!(result.is_err());
    }
}
