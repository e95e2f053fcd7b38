//! Corroborate CLI - evidence admissibility and tier classification.

use clap::Parser;
use corroborate_cli::cli::{ConfigAction, ConfigArgs};
use corroborate_cli::commands;
use corroborate_cli::{Cli, Command, Config, Formatter};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();

    // Log to stderr; RUST_LOG wins over -v
    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> corroborate_cli::Result<()> {
    // `config init` may target a file that does not exist yet
    let config = match &cli.command {
        Command::Config(ConfigArgs {
            action: ConfigAction::Init { .. },
        }) => Config::default(),
        _ => Config::load(cli.config.as_deref())?,
    };

    let format = cli.format.map(Into::into).unwrap_or(config.settings.format);
    let color_enabled = !cli.no_color && config.settings.color;
    let formatter = Formatter::new(format, color_enabled);

    match cli.command {
        Command::Classify(args) => commands::execute_classify(args, &config, &formatter),
        Command::Terms(args) => commands::execute_terms(args, &config, &formatter),
        Command::Search(args) => commands::execute_search(args, &config, &formatter),
        Command::Config(args) => {
            commands::execute_config(args, &config, cli.config.as_deref(), format, &formatter)
        }
    }
}
