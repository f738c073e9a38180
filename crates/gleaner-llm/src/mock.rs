//! Deterministic provider for tests and offline runs

use crate::LlmError;
use gleaner_domain::traits::LlmProvider;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

/// Mock LLM provider for deterministic testing
///
/// This provider returns pre-configured responses without making any network calls.
/// Replies are chosen in this order:
///
/// 1. the next entry of the scripted queue, if any remain
/// 2. a response registered for the exact input text
/// 3. the default response
///
/// The lookup key is the `input` argument, so tests can key replies by chunk
/// text.
///
/// # Examples
///
/// ```
/// use gleaner_llm::{LlmError, MockProvider};
/// use gleaner_domain::traits::LlmProvider;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// // Simple fixed response
/// let provider = MockProvider::new("Fixed response");
/// assert_eq!(provider.generate_structured("sys", "any text").await.unwrap(), "Fixed response");
///
/// // Keyed responses
/// let mut provider = MockProvider::default();
/// provider.add_response("prompt1", "response1");
/// assert_eq!(provider.generate_structured("sys", "prompt1").await.unwrap(), "response1");
///
/// // Scripted sequence
/// let provider = MockProvider::default();
/// provider.push_error(LlmError::RateLimitExceeded);
/// provider.push_response("second");
/// assert!(provider.generate_structured("sys", "a").await.is_err());
/// assert_eq!(provider.generate_structured("sys", "b").await.unwrap(), "second");
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct MockProvider {
    default_response: String,
    model: String,
    responses: Arc<Mutex<HashMap<String, Result<String, LlmError>>>>,
    script: Arc<Mutex<VecDeque<Result<String, LlmError>>>>,
    inputs: Arc<Mutex<Vec<String>>>,
    call_count: Arc<Mutex<usize>>,
    latency: Option<Duration>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl MockProvider {
    /// Create a new MockProvider with a fixed response for all prompts
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            default_response: response.into(),
            model: "mock".to_string(),
            responses: Arc::new(Mutex::new(HashMap::new())),
            script: Arc::new(Mutex::new(VecDeque::new())),
            inputs: Arc::new(Mutex::new(Vec::new())),
            call_count: Arc::new(Mutex::new(0)),
            latency: None,
        }
    }

    /// Delay every reply by `latency`
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Add a specific response for a given prompt
    pub fn add_response(&mut self, prompt: impl Into<String>, response: impl Into<String>) {
        lock(&self.responses).insert(prompt.into(), Ok(response.into()));
    }

    /// Configure to return an error for a specific prompt
    pub fn add_error(&mut self, prompt: impl Into<String>, error: LlmError) {
        lock(&self.responses).insert(prompt.into(), Err(error));
    }

    /// Queue a reply for the next unanswered call
    pub fn push_response(&self, response: impl Into<String>) {
        lock(&self.script).push_back(Ok(response.into()));
    }

    /// Queue a failure for the next unanswered call
    pub fn push_error(&self, error: LlmError) {
        lock(&self.script).push_back(Err(error));
    }

    /// Get the number of times the provider was called
    pub fn call_count(&self) -> usize {
        *lock(&self.call_count)
    }

    /// Reset the call count
    pub fn reset_call_count(&self) {
        *lock(&self.call_count) = 0;
    }

    /// Inputs received so far, in call order
    pub fn inputs(&self) -> Vec<String> {
        lock(&self.inputs).clone()
    }

    fn reply(&self, key: &str) -> Result<String, LlmError> {
        *lock(&self.call_count) += 1;
        lock(&self.inputs).push(key.to_string());

        if let Some(scripted) = lock(&self.script).pop_front() {
            return scripted;
        }

        if let Some(response) = lock(&self.responses).get(key) {
            return response.clone();
        }

        Ok(self.default_response.clone())
    }

}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new("Default mock response")
    }
}

impl LlmProvider for MockProvider {
    type Error = LlmError;

    async fn generate_structured(&self, _system: &str, input: &str) -> Result<String, Self::Error> {
        let reply = self.reply(input);
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
        reply
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_provider_default() {
        let provider = MockProvider::new("Test response");
        let result = provider.generate_structured("sys", "any prompt").await;
        assert_eq!(result.unwrap(), "Test response");
    }

    #[tokio::test]
    async fn test_mock_provider_specific_responses() {
        let mut provider = MockProvider::default();
        provider.add_response("hello", "world");
        provider.add_response("foo", "bar");

        assert_eq!(provider.generate_structured("sys", "hello").await.unwrap(), "world");
        assert_eq!(provider.generate_structured("sys", "foo").await.unwrap(), "bar");
        assert_eq!(
            provider.generate_structured("sys", "unknown").await.unwrap(),
            "Default mock response"
        );
    }

    #[tokio::test]
    async fn test_mock_provider_call_count() {
        let provider = MockProvider::new("test");

        assert_eq!(provider.call_count(), 0);

        provider.generate_structured("system", "prompt1").await.unwrap();
        assert_eq!(provider.call_count(), 1);

        provider.generate_structured("system", "prompt2").await.unwrap();
        assert_eq!(provider.call_count(), 2);

        provider.reset_call_count();
        assert_eq!(provider.call_count(), 0);
    }

    #[tokio::test]
    async fn test_mock_provider_error() {
        let mut provider = MockProvider::default();
        provider.add_error("bad", LlmError::Authentication("invalid key".into()));

        let result = provider.generate_structured("sys", "bad").await;
        assert!(matches!(result, Err(LlmError::Authentication(_))));
    }

    #[tokio::test]
    async fn test_script_takes_precedence_and_drains() {
        let mut provider = MockProvider::new("fallback");
        provider.add_response("chunk", "keyed");
        provider.push_response("scripted");

        assert_eq!(provider.generate_structured("sys", "chunk").await.unwrap(), "scripted");
        assert_eq!(provider.generate_structured("sys", "chunk").await.unwrap(), "keyed");
        assert_eq!(provider.generate_structured("sys", "other").await.unwrap(), "fallback");
    }

    #[tokio::test]
    async fn test_structured_records_input_not_system() {
        let provider = MockProvider::default();
        provider.generate_structured("instructions", "the chunk").await.unwrap();
        assert_eq!(provider.inputs(), vec!["the chunk".to_string()]);
    }

    #[tokio::test]
    async fn test_clones_share_state() {
        let provider = MockProvider::default();
        let clone = provider.clone();
        clone.generate_structured("sys", "x").await.unwrap();
        assert_eq!(provider.call_count(), 1);
    }
}
