//! Provider selection from configuration files

use crate::{LlmError, MockProvider, OllamaProvider, OpenAiConfig, OpenAiProvider};
use gleaner_domain::traits::LlmProvider;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Which backend to talk to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// OpenAI or a compatible server
    #[default]
    #[serde(rename = "openai")]
    OpenAi,

    /// Local Ollama daemon
    Ollama,

    /// Canned replies, no network
    Mock,
}

/// Provider section shared by the server and CLI configuration files
///
/// ```toml
/// [provider]
/// kind = "openai"
/// model = "gpt-4o-mini"
/// api_key_env = "OPENAI_API_KEY"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    /// Backend kind
    pub kind: ProviderKind,

    /// Base URL; each kind has its own default
    pub endpoint: Option<String>,

    /// Model name; each kind has its own default
    pub model: Option<String>,

    /// Name of the environment variable holding the API key
    pub api_key_env: String,

    /// Sampling temperature
    pub temperature: f32,

    /// Completion token cap
    pub max_tokens: u32,

    /// Per-request timeout in seconds
    pub timeout_secs: u64,

    /// Attempts per request
    pub max_retries: u32,

    /// Reply returned by the mock provider
    pub mock_response: Option<String>,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        let openai = OpenAiConfig::default();
        Self {
            kind: ProviderKind::OpenAi,
            endpoint: None,
            model: None,
            api_key_env: "OPENAI_API_KEY".to_string(),
            temperature: openai.temperature,
            max_tokens: openai.max_tokens,
            timeout_secs: openai.timeout_secs,
            max_retries: openai.max_retries,
            mock_response: None,
        }
    }
}

impl ProviderConfig {
    /// Read the API key from the configured environment variable
    pub fn api_key(&self) -> Option<String> {
        std::env::var(&self.api_key_env)
            .ok()
            .filter(|key| !key.trim().is_empty())
    }

    /// Instantiate the configured provider
    ///
    /// # Errors
    ///
    /// Returns [`LlmError::Authentication`] when the hosted OpenAI API is
    /// selected and no API key is available.
    pub fn build(&self) -> Result<AnyProvider, LlmError> {
        match self.kind {
            ProviderKind::OpenAi => {
                let api_key = self.api_key();
                if api_key.is_none() && self.endpoint.is_none() {
                    return Err(LlmError::Authentication(format!(
                        "environment variable {} is not set",
                        self.api_key_env
                    )));
                }

                let defaults = OpenAiConfig::default();
                Ok(AnyProvider::OpenAi(OpenAiProvider::new(OpenAiConfig {
                    base_url: self.endpoint.clone().unwrap_or(defaults.base_url),
                    api_key,
                    model: self.model.clone().unwrap_or(defaults.model),
                    temperature: self.temperature,
                    max_tokens: self.max_tokens,
                    timeout_secs: self.timeout_secs,
                    max_retries: self.max_retries,
                })))
            }
            ProviderKind::Ollama => {
                let provider = OllamaProvider::new(
                    self.endpoint
                        .clone()
                        .unwrap_or_else(|| crate::ollama::DEFAULT_ENDPOINT.to_string()),
                    self.model.clone().unwrap_or_else(|| "llama3".to_string()),
                )
                .with_max_retries(self.max_retries)
                .with_timeout(Duration::from_secs(self.timeout_secs));
                Ok(AnyProvider::Ollama(provider))
            }
            ProviderKind::Mock => Ok(AnyProvider::Mock(MockProvider::new(
                self.mock_response
                    .clone()
                    .unwrap_or_else(|| r#"{"notes": []}"#.to_string()),
            ))),
        }
    }
}

/// One of the built-in providers, chosen at runtime
#[derive(Debug, Clone)]
pub enum AnyProvider {
    /// OpenAI-compatible endpoint
    OpenAi(OpenAiProvider),

    /// Local Ollama
    Ollama(OllamaProvider),

    /// Deterministic mock
    Mock(MockProvider),
}

impl LlmProvider for AnyProvider {
    type Error = LlmError;

    async fn generate_structured(&self, system: &str, input: &str) -> Result<String, Self::Error> {
        match self {
            AnyProvider::OpenAi(p) => p.generate_structured(system, input).await,
            AnyProvider::Ollama(p) => p.generate_structured(system, input).await,
            AnyProvider::Mock(p) => p.generate_structured(system, input).await,
        }
    }

    fn model_name(&self) -> &str {
        match self {
            AnyProvider::OpenAi(p) => p.model_name(),
            AnyProvider::Ollama(p) => p.model_name(),
            AnyProvider::Mock(p) => p.model_name(),
        }
    }
}
