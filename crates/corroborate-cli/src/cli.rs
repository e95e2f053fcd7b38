//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};
use corroborate_domain::Category;
use std::path::PathBuf;

/// Corroborate - classify evidence by corpus corroboration.
#[derive(Debug, Parser)]
#[command(name = "corroborate")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true, env = "CORROBORATE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Classify evidence against a corpus mapping and write the report
    Classify(ClassifyArgs),

    /// Extract search terms from evidence files
    Terms(TermsArgs),

    /// Search corpus directories for the terms
    Search(SearchArgs),

    /// Show or initialise the configuration file
    Config(ConfigArgs),
}

/// An evidence file tagged with its category (`category=path`).
#[derive(Debug, Clone, PartialEq)]
pub struct SourceArg {
    /// Category of every record in the file
    pub category: Category,
    /// Path to the extraction output
    pub path: PathBuf,
}

/// Parse `category=path`.
pub fn parse_source(s: &str) -> Result<SourceArg, String> {
    let (category, path) = s
        .split_once('=')
        .ok_or_else(|| format!("expected <category>=<path>, got '{}'", s))?;
    let category = Category::parse(category).ok_or_else(|| {
        format!(
            "unknown category '{}' (expected one of: {})",
            category,
            Category::ALL.map(|c| c.as_str()).join(", ")
        )
    })?;
    if path.trim().is_empty() {
        return Err(format!("missing path for category '{}'", category));
    }
    Ok(SourceArg {
        category,
        path: PathBuf::from(path),
    })
}

/// Arguments for the classify command.
#[derive(Debug, Parser)]
pub struct ClassifyArgs {
    /// Evidence file as <category>=<path> (repeatable)
    #[arg(short, long = "source", value_parser = parse_source, required = true)]
    pub sources: Vec<SourceArg>,

    /// Corpus mapping produced by `search`
    #[arg(long)]
    pub corpus: PathBuf,

    /// Write the JSON report here
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Use the strict scoring preset
    #[arg(long, conflicts_with = "lenient")]
    pub strict: bool,

    /// Use the lenient scoring preset
    #[arg(long)]
    pub lenient: bool,
}

/// Arguments for the terms command.
#[derive(Debug, Parser)]
pub struct TermsArgs {
    /// Evidence file as <category>=<path> (repeatable)
    #[arg(short, long = "source", value_parser = parse_source, required = true)]
    pub sources: Vec<SourceArg>,

    /// Write the term lists here
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments for the search command.
#[derive(Debug, Parser)]
pub struct SearchArgs {
    /// Term lists produced by `terms`
    #[arg(short, long)]
    pub terms: PathBuf,

    /// Corpus directory (repeatable)
    #[arg(short = 'd', long = "corpus-dir", required = true)]
    pub corpus_dirs: Vec<PathBuf>,

    /// Write the corpus mapping here
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments for configuration management.
#[derive(Debug, Parser)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Configuration actions.
#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Print the effective configuration
    Show,

    /// Write a default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_command() {
        let cli = Cli::parse_from([
            "corroborate",
            "classify",
            "--source",
            "blockchain=bc.json",
            "-s",
            "entity-link=entities.json",
            "--corpus",
            "mapping.json",
            "-v",
        ]);
        assert!(cli.verbose);
        match cli.command {
            Command::Classify(args) => {
                assert_eq!(args.sources.len(), 2);
                assert_eq!(args.sources[0].category, Category::BlockchainTransaction);
                assert_eq!(args.sources[1].path, PathBuf::from("entities.json"));
                assert_eq!(args.corpus, PathBuf::from("mapping.json"));
            }
            _ => panic!("Expected Classify command"),
        }
    }

    #[test]
    fn test_search_command() {
        let cli = Cli::parse_from([
            "corroborate",
            "--format",
            "json",
            "search",
            "--terms",
            "terms.json",
            "--corpus-dir",
            "a",
            "-d",
            "b",
        ]);
        assert!(matches!(cli.format, Some(CliFormat::Json)));
        match cli.command {
            Command::Search(args) => assert_eq!(args.corpus_dirs.len(), 2),
            _ => panic!("Expected Search command"),
        }
    }

    #[test]
    fn test_parse_source() {
        let source = parse_source("url-pattern=out/urls.json").unwrap();
        assert_eq!(source.category, Category::UrlPattern);
        assert_eq!(source.path, PathBuf::from("out/urls.json"));

        assert!(parse_source("urls.json").is_err());
        assert!(parse_source("bogus=urls.json").unwrap_err().contains("unknown category"));
        assert!(parse_source("entity=").is_err());
    }

    #[test]
    fn test_presets_conflict() {
        let result = Cli::try_parse_from([
            "corroborate",
            "classify",
            "-s",
            "blockchain=bc.json",
            "--corpus",
            "m.json",
            "--strict",
            "--lenient",
        ]);
        assert!(result.is_err());
    }
}
