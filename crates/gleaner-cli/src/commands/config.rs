//! Config command implementation.

use crate::cli::{ConfigAction, ConfigArgs};
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use std::path::Path;

/// Execute the config command against the file at `path`.
pub fn execute_config(args: ConfigArgs, config: &mut Config, path: &Path, formatter: &Formatter) -> Result<()> {
    match args.action {
        ConfigAction::Show => {
            print!("{}", config.to_toml()?);
        }
        ConfigAction::Path => {
            println!("{}", path.display());
        }
        ConfigAction::Init { force } => {
            init_config(path, force)?;
            *config = Config::default();
            println!(
                "{}",
                formatter.success(&format!("Wrote default configuration to {}", path.display()))
            );
        }
        ConfigAction::Provider {
            kind,
            model,
            endpoint,
        } => {
            config.provider.kind = kind.into();
            config.provider.model = model;
            config.provider.endpoint = endpoint;
            config.save_to(path)?;
            println!(
                "{}",
                formatter.success(&format!("Provider set to {:?}", config.provider.kind))
            );
        }
    }

    Ok(())
}

/// Write a default configuration file, refusing to replace one unless forced.
pub fn init_config(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        return Err(CliError::Config(format!(
            "{} already exists (use --force to overwrite)",
            path.display()
        )));
    }
    Config::default().save_to(path)
}
