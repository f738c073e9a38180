//! Gleaner LLM Provider Layer
//!
//! Pluggable implementations of the extraction oracle's transport.
//!
//! # Architecture
//!
//! This crate provides implementations of the `LlmProvider` trait from
//! `gleaner-domain`. Every provider reports failures as [`LlmError`], which
//! classifies itself into a user-facing [`FailureCategory`].
//!
//! # Providers
//!
//! - `MockProvider`: Deterministic, scriptable mock for testing
//! - `OllamaProvider`: Local Ollama API integration
//! - `OpenAiProvider`: OpenAI-compatible chat completions (JSON mode)
//! - `AnyProvider`: one of the above, chosen from a [`ProviderConfig`]
//!
//! # Examples
//!
//! ```
//! use gleaner_llm::MockProvider;
//! use gleaner_domain::traits::LlmProvider;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let provider = MockProvider::new(r#"{"notes": []}"#);
//! let result = provider.generate_structured("extract notes", "some text").await.unwrap();
//! assert_eq!(result, r#"{"notes": []}"#);
//! # }
//! ```

#![warn(missing_docs)]

pub mod config;
mod http;
pub mod mock;
pub mod ollama;
pub mod openai;

use gleaner_domain::traits::{FailureCategory, OracleError};
use thiserror::Error;

pub use config::{AnyProvider, ProviderConfig, ProviderKind};
pub use mock::MockProvider;
pub use ollama::OllamaProvider;
pub use openai::{OpenAiConfig, OpenAiProvider};

/// Errors that can occur during LLM operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LlmError {
    /// The request never produced an HTTP response (connection refused, DNS, timeout)
    #[error("Communication error: {0}")]
    Communication(String),

    /// The provider answered with an unexpected server-side status
    #[error("Server error (HTTP {status}): {message}")]
    Server {
        /// HTTP status code
        status: u16,
        /// Body or message returned by the provider
        message: String,
    },

    /// Invalid response from LLM
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Credentials missing or rejected
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    /// The prompt does not fit the model's context window
    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),

    /// Model not available
    #[error("Model not available: {0}")]
    ModelNotAvailable(String),

    /// Generic error
    #[error("LLM error: {0}")]
    Other(String),
}

impl LlmError {
    /// Whether repeating the same request may succeed
    pub fn is_retryable(&self) -> bool {
        match self {
            LlmError::Communication(_) | LlmError::RateLimitExceeded => true,
            LlmError::Server { status, .. } => *status >= 500,
            _ => false,
        }
    }
}

impl OracleError for LlmError {
    fn category(&self) -> FailureCategory {
        match self {
            LlmError::Authentication(_) => FailureCategory::Authentication,
            LlmError::RateLimitExceeded => FailureCategory::RateLimited,
            LlmError::PayloadTooLarge(_) => FailureCategory::PayloadTooLarge,
            LlmError::Communication(_) => FailureCategory::Unreachable,
            LlmError::Server { .. }
            | LlmError::InvalidResponse(_)
            | LlmError::ModelNotAvailable(_)
            | LlmError::Other(_) => FailureCategory::Generic,
        }
    }
}
