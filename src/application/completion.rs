//! Completion Client - one JSON answer per prompt, with a fixed retry budget.
//!
//! Each attempt calls the provider, strips an optional code fence, and decodes
//! the body as JSON. A provider failure, an empty body or undecodable JSON
//! consumes one attempt. Attempts run back to back with no delay; after the
//! last one the caller receives that attempt's failure.

use serde_json::Value;
use std::sync::Arc;

use crate::ports::{AIError, AIProvider, CompletionRequest};

const CODE_FENCE: &str = "```";

/// Why a single attempt failed.
#[derive(Debug, Clone, thiserror::Error)]
pub enum AttemptFailure {
    #[error("provider call failed: {0}")]
    Provider(#[from] AIError),

    #[error("provider returned an empty body")]
    EmptyResponse,

    #[error("response is not valid JSON: {0}")]
    InvalidJson(String),
}

/// Raised once every attempt has failed.
#[derive(Debug, Clone, thiserror::Error)]
pub enum CompletionError {
    #[error("completion failed after {attempts} attempt(s): {last}")]
    Exhausted {
        attempts: u32,
        #[source]
        last: AttemptFailure,
    },
}

impl CompletionError {
    /// The failure of the final attempt.
    pub fn last_failure(&self) -> &AttemptFailure {
        match self {
            CompletionError::Exhausted { last, .. } => last,
        }
    }

    pub fn attempts(&self) -> u32 {
        match self {
            CompletionError::Exhausted { attempts, .. } => *attempts,
        }
    }
}

/// Explicitly constructed client shared by every extractor of a run.
#[derive(Clone)]
pub struct CompletionClient {
    provider: Arc<dyn AIProvider>,
    max_attempts: u32,
}

impl CompletionClient {
    pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

    pub fn new(provider: Arc<dyn AIProvider>) -> Self {
        Self {
            provider,
            max_attempts: Self::DEFAULT_MAX_ATTEMPTS,
        }
    }

    /// Overrides the attempt budget. Values below one are raised to one.
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Sends `request` until a JSON body comes back or attempts run out.
    pub async fn complete(&self, request: CompletionRequest) -> Result<Value, CompletionError> {
        let facet = request.facet_name();
        let mut attempt = 1;

        loop {
            match self.attempt(request.clone()).await {
                Ok(value) => return Ok(value),
                Err(failure) if attempt < self.max_attempts => {
                    tracing::warn!(
                        facet,
                        attempt,
                        max_attempts = self.max_attempts,
                        error = %failure,
                        "completion attempt failed, retrying"
                    );
                    attempt += 1;
                }
                Err(failure) => {
                    tracing::error!(
                        facet,
                        provider = %self.provider.provider_info().name,
                        attempts = attempt,
                        error = %failure,
                        "completion attempts exhausted"
                    );
                    return Err(CompletionError::Exhausted {
                        attempts: attempt,
                        last: failure,
                    });
                }
            }
        }
    }

    async fn attempt(&self, request: CompletionRequest) -> Result<Value, AttemptFailure> {
        let facet = request.facet_name();
        let response = self.provider.complete(request).await?;

        tracing::debug!(
            facet,
            model = %response.model,
            prompt_tokens = response.usage.prompt_tokens,
            completion_tokens = response.usage.completion_tokens,
            "completion received"
        );

        let body = sanitize(&response.content);
        if body.trim().is_empty() {
            return Err(AttemptFailure::EmptyResponse);
        }

        serde_json::from_str(&body).map_err(|e| AttemptFailure::InvalidJson(e.to_string()))
    }
}

impl std::fmt::Debug for CompletionClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompletionClient")
            .field("provider", &self.provider.provider_info().name)
            .field("max_attempts", &self.max_attempts)
            .finish()
    }
}

/// Strips a surrounding code fence: when the body starts with a fence
/// marker, its first and last lines are dropped.
///
/// The body is trimmed first, so whitespace before the opening fence is
/// tolerated.
pub fn sanitize(raw: &str) -> String {
    let trimmed = raw.trim();
    if !trimmed.starts_with(CODE_FENCE) {
        return trimmed.to_string();
    }

    let lines: Vec<&str> = trimmed.lines().collect();
    if lines.len() < 2 {
        return String::new();
    }
    lines[1..lines.len() - 1].join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::MockAIProvider;
    use crate::domain::founder::Facet;
    use serde_json::json;

    fn client(provider: &MockAIProvider) -> CompletionClient {
        CompletionClient::new(Arc::new(provider.clone()))
    }

    fn request() -> CompletionRequest {
        CompletionRequest::for_facet(Facet::Traits, "Extract traits")
    }

    #[test]
    fn sanitize_strips_fenced_block() {
        let fenced = "```json\n{\"traits\": []}\n```";
        assert_eq!(sanitize(fenced), "{\"traits\": []}");
    }

    #[test]
    fn sanitize_leaves_plain_body_alone() {
        assert_eq!(sanitize("  {\"a\": 1}\n"), "{\"a\": 1}");
    }

    #[test]
    fn sanitize_accepts_whitespace_before_fence() {
        let fenced = "\n   ```json\n{\"traits\": []}\n```\n";
        assert_eq!(sanitize(fenced), "{\"traits\": []}");
    }

    #[test]
    fn sanitize_of_bare_fence_is_empty() {
        assert_eq!(sanitize("```"), "");
    }

    #[tokio::test]
    async fn fenced_response_parses_like_unwrapped() {
        let provider = MockAIProvider::new()
            .with_response("```json\n{\"traits\": []}\n```")
            .with_response("{\"traits\": []}");
        let client = client(&provider);

        let fenced = client.complete(request()).await.unwrap();
        let plain = client.complete(request()).await.unwrap();

        assert_eq!(fenced, plain);
        assert_eq!(fenced, json!({"traits": []}));
    }

    #[tokio::test]
    async fn retries_until_success() {
        let provider = MockAIProvider::new()
            .with_error(AIError::Network("reset".to_string()))
            .with_response("   ")
            .with_response("{\"ok\": true}");

        let value = client(&provider).complete(request()).await.unwrap();

        assert_eq!(value, json!({"ok": true}));
        assert_eq!(provider.call_count(), 3);
    }

    #[tokio::test]
    async fn exhaustion_stops_after_exactly_three_attempts() {
        let provider = MockAIProvider::new()
            .with_error(AIError::Unavailable("first".to_string()))
            .with_error(AIError::Unavailable("second".to_string()))
            .with_error(AIError::Unavailable("third".to_string()))
            .with_response("{\"never\": \"reached\"}");

        let err = client(&provider).complete(request()).await.unwrap_err();

        assert_eq!(provider.call_count(), 3);
        assert_eq!(err.attempts(), 3);
        match err.last_failure() {
            AttemptFailure::Provider(AIError::Unavailable(message)) => {
                assert_eq!(message, "third")
            }
            other => panic!("unexpected last failure: {:?}", other),
        }
    }

    #[tokio::test]
    async fn invalid_json_consumes_attempts() {
        let provider = MockAIProvider::new().with_fallback("not json");

        let err = client(&provider)
            .with_max_attempts(2)
            .complete(request())
            .await
            .unwrap_err();

        assert_eq!(provider.call_count(), 2);
        assert!(matches!(err.last_failure(), AttemptFailure::InvalidJson(_)));
    }

    #[tokio::test]
    async fn empty_body_is_a_failed_attempt() {
        let provider = MockAIProvider::new().with_fallback("");

        let err = client(&provider)
            .with_max_attempts(1)
            .complete(request())
            .await
            .unwrap_err();

        assert!(matches!(err.last_failure(), AttemptFailure::EmptyResponse));
    }

    #[test]
    fn attempt_budget_is_at_least_one() {
        let provider = MockAIProvider::new();
        assert_eq!(client(&provider).with_max_attempts(0).max_attempts(), 1);
        assert_eq!(client(&provider).max_attempts(), 3);
    }
}
