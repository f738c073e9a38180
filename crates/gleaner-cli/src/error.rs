//! Error types for the CLI application.

use gleaner_extractor::GenerationError;
use gleaner_llm::LlmError;
use thiserror::Error;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// The configured provider could not be built
    #[error("Provider error: {0}")]
    Provider(#[from] LlmError),

    /// Generation failed
    #[error("Generation failed: {0}")]
    Generation(#[from] GenerationError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl CliError {
    /// What the user can do about it, when there is something
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            CliError::Generation(e) => e.category().map(|c| c.guidance()),
            CliError::Provider(LlmError::Authentication(_)) => {
                Some("Set the API key in the environment variable named by provider.api_key_env")
            }
            _ => None,
        }
    }
}
