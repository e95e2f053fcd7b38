//! Terms command implementation.

use super::{aggregate_sources, write_output};
use crate::cli::TermsArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use corroborate_aggregator::TermLists;

/// Execute the terms command.
pub fn execute_terms(args: TermsArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let aggregation = aggregate_sources(&args.sources, &config.aggregation)?;
    let terms = TermLists::extract(aggregation.items.values());

    println!("{}", formatter.format_terms(&terms)?);

    if let Some(path) = &args.output {
        write_output(path, &terms.to_json_pretty()?)?;
        println!(
            "{}",
            formatter.success(&format!("{} terms written to {}", terms.len(), path.display()))
        );
    }

    Ok(())
}
