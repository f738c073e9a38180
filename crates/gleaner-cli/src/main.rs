//! Gleaner CLI - Distill text into notes and trace them back to the source.

use clap::Parser;
use gleaner_cli::cli::ConfigAction;
use gleaner_cli::commands;
use gleaner_cli::{Cli, CliError, Command, Config, Formatter};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli).await {
        eprintln!("Error: {}", e);
        if let Some(hint) = e.hint() {
            eprintln!("  {}", hint);
        }
        std::process::exit(1);
    }
}

/// Log to stderr so stdout stays clean for notes; `RUST_LOG` wins over `-v`.
fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let path = match cli.config {
        Some(path) => path,
        None => Config::path()?,
    };
    // init must work even when the existing file no longer parses
    let mut config = match &cli.command {
        Command::Config(args) if matches!(args.action, ConfigAction::Init { .. }) => Config::default(),
        _ => Config::load_from(&path)?,
    };

    let format = cli.format.map(Into::into).unwrap_or(config.settings.format);
    let color_enabled = !cli.no_color && config.settings.color;
    let formatter = Formatter::new(format, color_enabled);

    match cli.command {
        Command::Generate(args) => commands::execute_generate(args, &config, &formatter).await,
        Command::Locate(args) => commands::execute_locate(args, &config, &formatter),
        Command::Config(args) => commands::execute_config(args, &mut config, &path, &formatter),
    }
}
