//! Config command implementation.

use crate::cli::{ConfigAction, ConfigArgs};
use crate::config::{Config, OutputFormat, LOCAL_CONFIG};
use crate::error::{CliError, Result};
use crate::output::Formatter;
use std::path::{Path, PathBuf};

/// Execute the config command.
///
/// `path` is the `--config` path, when given.
pub fn execute_config(
    args: ConfigArgs,
    config: &Config,
    path: Option<&Path>,
    format: OutputFormat,
    formatter: &Formatter,
) -> Result<()> {
    match args.action {
        ConfigAction::Show => {
            let rendered = match format {
                OutputFormat::Json => serde_json::to_string_pretty(config)?,
                OutputFormat::Table => config.to_toml()?,
            };
            println!("{}", rendered);
            Ok(())
        }
        ConfigAction::Init { force } => {
            let target = path.map(Path::to_path_buf).unwrap_or_else(|| PathBuf::from(LOCAL_CONFIG));
            init_config(&target, force)?;
            println!(
                "{}",
                formatter.success(&format!("Wrote default configuration to {}", target.display()))
            );
            Ok(())
        }
    }
}

fn init_config(target: &Path, force: bool) -> Result<()> {
    if target.exists() && !force {
        return Err(CliError::InvalidInput(format!(
            "{} already exists (use --force to overwrite)",
            target.display()
        )));
    }
    Config::default().save(target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_init_refuses_overwrite() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("corroborate.toml");

        init_config(&target, false).unwrap();
        assert_eq!(Config::load(Some(&target)).unwrap(), Config::default());

        assert!(matches!(init_config(&target, false), Err(CliError::InvalidInput(_))));
        assert!(init_config(&target, true).is_ok());
    }
}
