//! AI Provider Port - the completion service that answers facet prompts.
//!
//! One request carries one prompt and comes back as one text body. Token
//! usage is reported for logging. Retrying is not the provider's job; every
//! failure surfaces as an [`AIError`] and the completion client decides.

use async_trait::async_trait;
use std::time::Duration;

use crate::domain::founder::Facet;

/// Port for chat-completion services.
#[async_trait]
pub trait AIProvider: Send + Sync {
    /// Sends one prompt and returns the raw body.
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, AIError>;

    /// Name and model, for logs.
    fn provider_info(&self) -> ProviderInfo;
}

/// A single prompt to complete.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub prompt: String,
    /// Sampling temperature; extraction always sends 0.
    pub temperature: f32,
    /// Ask the provider to constrain output to a JSON object.
    pub json_response: bool,
    /// Facet this request extracts, for tracing and test routing.
    pub facet: Option<Facet>,
}

impl CompletionRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            temperature: 0.0,
            json_response: false,
            facet: None,
        }
    }

    /// Deterministic JSON-object request for one facet's prompt.
    pub fn for_facet(facet: Facet, prompt: impl Into<String>) -> Self {
        Self {
            json_response: true,
            facet: Some(facet),
            ..Self::new(prompt)
        }
    }

    /// Facet name for log fields; `none` for untagged requests.
    pub fn facet_name(&self) -> &'static str {
        self.facet.map(|f| f.as_str()).unwrap_or("none")
    }
}

/// Body returned by the provider.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionResponse {
    pub content: String,
    pub usage: TokenUsage,
    /// Model that actually answered.
    pub model: String,
}

/// Tokens billed for one call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TokenUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
}

impl TokenUsage {
    pub fn new(prompt_tokens: u32, completion_tokens: u32) -> Self {
        Self {
            prompt_tokens,
            completion_tokens,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderInfo {
    pub name: String,
    pub model: String,
}

impl ProviderInfo {
    pub fn new(name: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            model: model.into(),
        }
    }
}

/// Failure of one provider call.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AIError {
    #[error("rate limited: {0}")]
    RateLimited(String),

    #[error("context too long: {0}")]
    ContextTooLong(String),

    #[error("provider unavailable: {0}")]
    Unavailable(String),

    #[error("authentication failed")]
    AuthenticationFailed,

    #[error("network error: {0}")]
    Network(String),

    /// The HTTP envelope around the body could not be read.
    #[error("malformed provider response: {0}")]
    MalformedResponse(String),

    #[error("request rejected: {0}")]
    Rejected(String),

    #[error("request timed out after {}s", .0.as_secs())]
    Timeout(Duration),

    /// The provider client could not be built.
    #[error("provider misconfigured: {0}")]
    Configuration(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn facet_request_is_deterministic_json() {
        let request = CompletionRequest::for_facet(Facet::Habits, "List habits");

        assert_eq!(request.prompt, "List habits");
        assert_eq!(request.facet, Some(Facet::Habits));
        assert_eq!(request.temperature, 0.0);
        assert!(request.json_response);
        assert_eq!(request.facet_name(), "habits");
    }

    #[test]
    fn plain_request_is_untagged_text() {
        let request = CompletionRequest::new("hi");
        assert!(!request.json_response);
        assert_eq!(request.facet_name(), "none");
    }

    #[test]
    fn errors_render_readably() {
        assert_eq!(
            AIError::Timeout(Duration::from_secs(120)).to_string(),
            "request timed out after 120s"
        );
        assert_eq!(AIError::Network("reset".into()).to_string(), "network error: reset");
    }
}
