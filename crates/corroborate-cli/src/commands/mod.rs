//! Command implementations.

pub mod classify;
pub mod config;
pub mod search;
pub mod terms;

pub use self::classify::execute_classify;
pub use self::config::execute_config;
pub use self::search::execute_search;
pub use self::terms::execute_terms;

use crate::cli::SourceArg;
use crate::error::Result;
use corroborate_aggregator::{Aggregation, Aggregator, AggregatorConfig};
use std::fs;
use std::path::Path;

/// Load and merge the tagged evidence files.
pub(crate) fn aggregate_sources(sources: &[SourceArg], config: &AggregatorConfig) -> Result<Aggregation> {
    let files: Vec<_> = sources
        .iter()
        .map(|source| (source.category, source.path.as_path()))
        .collect();
    Ok(Aggregator::new(config.clone()).aggregate_files(&files)?)
}

/// Write command output, creating parent directories.
pub(crate) fn write_output(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, contents)?;
    Ok(())
}
