//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};
use gleaner_llm::ProviderKind;
use std::path::PathBuf;

/// Gleaner CLI - Distill text into short notes and trace them back to the source.
#[derive(Debug, Parser)]
#[command(name = "gleaner")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path (default: ~/.gleaner/config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Log more detail to stderr (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (titles only)
    Quiet,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Generate notes from a text file or stdin
    Generate(GenerateArgs),

    /// Find the passage of a source text a note was drawn from
    Locate(LocateArgs),

    /// Inspect or edit the configuration file
    Config(ConfigArgs),
}

/// Arguments for the generate command.
#[derive(Debug, Clone, Parser)]
pub struct GenerateArgs {
    /// Source text file; reads stdin when omitted or "-"
    pub file: Option<PathBuf>,

    /// Number of notes to generate
    #[arg(short, long)]
    pub notes: Option<usize>,

    /// Character limit per note (clamped to the configured bounds)
    #[arg(short = 'l', long)]
    pub char_limit: Option<usize>,

    /// Also resolve each note's source span
    #[arg(long)]
    pub locate: bool,
}

/// Arguments for the locate command.
#[derive(Debug, Clone, Parser)]
pub struct LocateArgs {
    /// Source text file; reads stdin when "-"
    pub file: PathBuf,

    /// Note content
    pub content: String,

    /// Verbatim quote from the source
    #[arg(short, long)]
    pub quote: Option<String>,

    /// Stored start offset (characters)
    #[arg(long, requires = "end")]
    pub start: Option<usize>,

    /// Stored end offset (characters)
    #[arg(long, requires = "start")]
    pub end: Option<usize>,
}

/// Arguments for configuration management.
#[derive(Debug, Parser)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Configuration management actions.
#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Print the effective configuration
    Show,

    /// Print the configuration file path
    Path,

    /// Write a default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Change the extraction provider
    Provider {
        /// Provider kind
        #[arg(short, long, value_enum)]
        kind: ProviderArg,
        /// Model name
        #[arg(short, long)]
        model: Option<String>,
        /// Base URL of the provider API
        #[arg(short, long)]
        endpoint: Option<String>,
    },
}

/// Provider argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ProviderArg {
    /// OpenAI or a compatible endpoint
    Openai,
    /// Local Ollama
    Ollama,
    /// Deterministic mock
    Mock,
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}

impl From<ProviderArg> for ProviderKind {
    fn from(kind: ProviderArg) -> Self {
        match kind {
            ProviderArg::Openai => ProviderKind::OpenAi,
            ProviderArg::Ollama => ProviderKind::Ollama,
            ProviderArg::Mock => ProviderKind::Mock,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_command() {
        let cli = Cli::parse_from(["gleaner", "generate", "article.txt", "-n", "5", "--locate"]);
        match cli.command {
            Command::Generate(args) => {
                assert_eq!(args.file, Some(PathBuf::from("article.txt")));
                assert_eq!(args.notes, Some(5));
                assert!(args.locate);
            }
            _ => panic!("Expected Generate command"),
        }
    }

    #[test]
    fn test_generate_from_stdin() {
        let cli = Cli::parse_from(["gleaner", "--format", "json", "generate"]);
        assert_eq!(cli.format, Some(CliFormat::Json));
        match cli.command {
            Command::Generate(args) => assert!(args.file.is_none()),
            _ => panic!("Expected Generate command"),
        }
    }

    #[test]
    fn test_locate_command() {
        let cli = Cli::parse_from([
            "gleaner",
            "locate",
            "source.txt",
            "Dogs are loyal",
            "--quote",
            "Dogs are loyal and kind.",
        ]);
        match cli.command {
            Command::Locate(args) => {
                assert_eq!(args.content, "Dogs are loyal");
                assert_eq!(args.quote.as_deref(), Some("Dogs are loyal and kind."));
                assert_eq!(args.start, None);
            }
            _ => panic!("Expected Locate command"),
        }
    }

    #[test]
    fn test_locate_position_needs_both_ends() {
        let result = Cli::try_parse_from(["gleaner", "locate", "s.txt", "c", "--start", "3"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_verbosity_counts() {
        let cli = Cli::parse_from(["gleaner", "-vv", "config", "show"]);
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_provider_conversion() {
        let kind: ProviderKind = ProviderArg::Ollama.into();
        assert_eq!(kind, ProviderKind::Ollama);
    }
}
