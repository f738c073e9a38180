//! HTTP plumbing shared by the network providers

use crate::LlmError;
use std::future::Future;
use std::time::Duration;
use tracing::warn;

/// Classify a non-success HTTP reply.
///
/// Understands both the OpenAI error envelope (`{"error": {"message", "type", "code"}}`)
/// and Ollama's flat `{"error": "..."}`.
pub(crate) fn classify_status(status: u16, body: &str, model: &str) -> LlmError {
    let (message, error_type) = error_details(body);

    match status {
        401 | 403 => LlmError::Authentication(message),
        429 => LlmError::RateLimitExceeded,
        413 => LlmError::PayloadTooLarge(message),
        404 => LlmError::ModelNotAvailable(model.to_string()),
        _ if error_type == "model_not_found" => LlmError::ModelNotAvailable(model.to_string()),
        400 if error_type.contains("context_length") || message.contains("context_length") => {
            LlmError::PayloadTooLarge(message)
        }
        _ => LlmError::Server { status, message },
    }
}

fn error_details(body: &str) -> (String, String) {
    let parsed: Option<serde_json::Value> = serde_json::from_str(body).ok();
    let error = parsed.as_ref().and_then(|v| v.get("error"));

    match error {
        Some(serde_json::Value::String(message)) => (message.clone(), String::new()),
        Some(obj) => {
            let message = obj
                .get("message")
                .and_then(|m| m.as_str())
                .unwrap_or(body)
                .to_string();
            let error_type = obj
                .get("code")
                .and_then(|c| c.as_str())
                .or_else(|| obj.get("type").and_then(|t| t.as_str()))
                .unwrap_or_default()
                .to_string();
            (message, error_type)
        }
        None => (body.to_string(), String::new()),
    }
}

/// Map a transport failure (no HTTP reply at all)
pub(crate) fn transport_error(err: reqwest::Error) -> LlmError {
    if err.is_timeout() {
        LlmError::Communication(format!("Request timed out: {}", err))
    } else {
        LlmError::Communication(format!("Request failed: {}", err))
    }
}

/// Run `call` up to `max_retries` times with exponential backoff (1s, 2s, 4s, ...)
///
/// Only errors for which [`LlmError::is_retryable`] holds are retried.
pub(crate) async fn with_retry<T, F, Fut>(
    provider: &'static str,
    max_retries: u32,
    mut call: F,
) -> Result<T, LlmError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, LlmError>>,
{
    let attempts = max_retries.max(1);
    let mut attempt = 0;

    loop {
        attempt += 1;
        match call().await {
            Ok(value) => return Ok(value),
            Err(e) if e.is_retryable() && attempt < attempts => {
                let delay = Duration::from_secs(2u64.pow(attempt - 1));
                warn!(provider, attempt, error = %e, ?delay, "LLM request failed, retrying");
                tokio::time::sleep(delay).await;
            }
            Err(e) => return Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_openai_envelope() {
        let body = r#"{"error": {"message": "Incorrect API key", "type": "invalid_request_error", "code": "invalid_api_key"}}"#;
        assert_eq!(
            classify_status(401, body, "gpt-4o-mini"),
            LlmError::Authentication("Incorrect API key".into())
        );
    }

    #[test]
    fn test_classify_context_length() {
        let body = r#"{"error": {"message": "maximum context length is 8192 tokens", "type": "invalid_request_error", "code": "context_length_exceeded"}}"#;
        assert!(matches!(
            classify_status(400, body, "m"),
            LlmError::PayloadTooLarge(_)
        ));
    }

    #[test]
    fn test_classify_ollama_flat_error() {
        let body = r#"{"error": "model 'llama9' not found"}"#;
        assert_eq!(
            classify_status(404, body, "llama9"),
            LlmError::ModelNotAvailable("llama9".into())
        );
    }

    #[test]
    fn test_classify_other_statuses() {
        assert_eq!(classify_status(429, "", "m"), LlmError::RateLimitExceeded);
        assert_eq!(
            classify_status(503, "overloaded", "m"),
            LlmError::Server { status: 503, message: "overloaded".into() }
        );
        assert_eq!(
            classify_status(400, r#"{"error": {"message": "bad", "code": "model_not_found"}}"#, "m"),
            LlmError::ModelNotAvailable("m".into())
        );
    }

    #[tokio::test]
    async fn test_with_retry_stops_on_fatal_error() {
        let mut calls = 0;
        let result: Result<(), _> = with_retry("test", 3, || {
            calls += 1;
            async { Err(LlmError::Authentication("no".into())) }
        })
        .await;

        assert!(result.is_err());
        assert_eq!(calls, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_with_retry_retries_transient_errors() {
        let mut calls = 0;
        let result = with_retry("test", 3, || {
            calls += 1;
            let attempt = calls;
            async move {
                if attempt < 3 {
                    Err(LlmError::Server { status: 502, message: String::new() })
                } else {
                    Ok(attempt)
                }
            }
        })
        .await;

        assert_eq!(result, Ok(3));
    }
}
