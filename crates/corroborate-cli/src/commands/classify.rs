//! Classify command implementation.

use super::{aggregate_sources, write_output};
use crate::cli::ClassifyArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use corroborate_aggregator::CorpusMapping;
use corroborate_gatekeeper::{CorpusIndex, Gatekeeper, GatekeeperConfig, RunReport};
use tracing::info;

/// Execute the classify command.
pub fn execute_classify(args: ClassifyArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let report = classify(&args, config)?;

    println!("{}", formatter.format_report(&report)?);

    if let Some(path) = &args.output {
        write_output(path, &report.to_json_pretty()?)?;
        println!(
            "{}",
            formatter.success(&format!("Report written to {}", path.display()))
        );
    }

    Ok(())
}

fn classify(args: &ClassifyArgs, config: &Config) -> Result<RunReport> {
    let aggregation = aggregate_sources(&args.sources, &config.aggregation)?;
    let mapping = CorpusMapping::load(&args.corpus)?;
    let index = CorpusIndex::new(mapping.matches());

    // Presets replace scoring only; policy rules always come from the config file
    let mut gatekeeper_config = if args.strict {
        GatekeeperConfig::strict()
    } else if args.lenient {
        GatekeeperConfig::lenient()
    } else {
        config.gatekeeper()
    };
    gatekeeper_config.policy = config.policy.clone();

    let gatekeeper = Gatekeeper::new(gatekeeper_config)?;
    info!(
        "Classifying {} items against {} corpus matches",
        aggregation.len(),
        index.matches().len()
    );
    Ok(gatekeeper.run(aggregation.items.values(), &index, &aggregation.overwrites))
}
