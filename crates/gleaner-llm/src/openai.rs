//! OpenAI-compatible chat completions provider
//!
//! Works with the OpenAI cloud API and with any server exposing the same
//! `/chat/completions` contract (vLLM, LM Studio, Ollama's `/v1`).
//! Structured calls use JSON mode (`response_format: {"type": "json_object"}`).

use crate::http::{classify_status, transport_error, with_retry};
use crate::LlmError;
use gleaner_domain::traits::LlmProvider;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// Default API base URL
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Default chat model
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Connection settings for an OpenAI-compatible endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OpenAiConfig {
    /// API base URL, without the `/chat/completions` suffix
    pub base_url: String,

    /// Bearer token; optional for local servers
    #[serde(skip_serializing)]
    pub api_key: Option<String>,

    /// Chat model name
    pub model: String,

    /// Sampling temperature
    pub temperature: f32,

    /// Completion token cap
    pub max_tokens: u32,

    /// Per-request timeout in seconds
    pub timeout_secs: u64,

    /// Attempts per request
    pub max_retries: u32,
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            temperature: 0.4,
            max_tokens: 2000,
            timeout_secs: 60,
            max_retries: 3,
        }
    }
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    format_type: &'static str,
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
    response_format: ResponseFormat,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    content: Option<String>,
}

/// Provider speaking the OpenAI chat completions protocol
#[derive(Debug, Clone)]
pub struct OpenAiProvider {
    config: OpenAiConfig,
    client: reqwest::Client,
}

impl OpenAiProvider {
    /// Create a provider from its configuration
    pub fn new(mut config: OpenAiConfig) -> Self {
        config.base_url = config.base_url.trim_end_matches('/').to_string();
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .unwrap_or_default();

        Self { config, client }
    }

    /// The active configuration
    pub fn config(&self) -> &OpenAiConfig {
        &self.config
    }

    async fn complete(&self, request: &ChatCompletionRequest<'_>) -> Result<String, LlmError> {
        let url = format!("{}/chat/completions", self.config.base_url);

        with_retry("openai", self.config.max_retries, || async {
            let mut builder = self.client.post(&url).json(request);
            if let Some(api_key) = &self.config.api_key {
                builder = builder.header("Authorization", format!("Bearer {}", api_key));
            }

            let response = builder.send().await.map_err(transport_error)?;

            let status = response.status();
            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                return Err(classify_status(status.as_u16(), &body, &self.config.model));
            }

            let completion: ChatCompletionResponse = response
                .json()
                .await
                .map_err(|e| LlmError::InvalidResponse(format!("Failed to parse response: {}", e)))?;

            completion
                .choices
                .into_iter()
                .next()
                .and_then(|choice| choice.message.content)
                .ok_or_else(|| LlmError::InvalidResponse("No content in response".to_string()))
        })
        .await
    }

    fn request<'a>(&'a self, system: &'a str, input: &'a str) -> ChatCompletionRequest<'a> {
        ChatCompletionRequest {
            model: &self.config.model,
            messages: vec![
                ChatMessage { role: "system", content: system },
                ChatMessage { role: "user", content: input },
            ],
            temperature: self.config.temperature,
            max_tokens: self.config.max_tokens,
            response_format: ResponseFormat {
                format_type: "json_object",
            },
        }
    }
}

impl LlmProvider for OpenAiProvider {
    type Error = LlmError;

    async fn generate_structured(&self, system: &str, input: &str) -> Result<String, Self::Error> {
        debug!(
            model = %self.config.model,
            input_chars = input.chars().count(),
            "Structured chat completion"
        );
        self.complete(&self.request(system, input)).await
    }

    fn model_name(&self) -> &str {
        &self.config.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = OpenAiConfig::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.max_tokens, 2000);
        assert!((config.temperature - 0.4).abs() < f32::EPSILON);
    }

    #[test]
    fn test_trailing_slash_trimmed() {
        let provider = OpenAiProvider::new(OpenAiConfig {
            base_url: "http://localhost:8000/v1/".to_string(),
            ..Default::default()
        });
        assert_eq!(provider.config().base_url, "http://localhost:8000/v1");
    }

    #[test]
    fn test_structured_request_uses_json_mode() {
        let provider = OpenAiProvider::new(OpenAiConfig::default());
        let request = provider.request("sys", "text");
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["response_format"]["type"], "json_object");
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["messages"][1]["content"], "text");
        assert_eq!(json["max_tokens"], 2000);
    }

    #[test]
    fn test_api_key_is_never_serialized() {
        let config = OpenAiConfig {
            api_key: Some("sk-secret".to_string()),
            ..Default::default()
        };
        let json = serde_json::to_string(&config).unwrap();
        assert!(!json.contains("sk-secret"));
    }
}
