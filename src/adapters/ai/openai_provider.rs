//! OpenAI Provider - chat completions for facet prompts.
//!
//! # Configuration
//!
//! ```ignore
//! let config = OpenAIConfig::new(api_key)
//!     .with_model("gpt-4-0125-preview")
//!     .with_base_url("https://api.openai.com/v1");
//!
//! let provider = OpenAIProvider::new(config)?;
//! ```
//!
//! Each prompt is sent as one user message. A call is a single HTTP request;
//! failures surface immediately as `AIError` for the completion client to
//! count against its attempts.

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::ports::{AIError, AIProvider, CompletionRequest, CompletionResponse, ProviderInfo, TokenUsage};

/// Appended to the prompt whenever JSON output is requested.
/// The API rejects `json_object` mode unless the prompt mentions JSON.
const JSON_INSTRUCTION: &str = "Respond in valid JSON format.";

const DEFAULT_MODEL: &str = "gpt-4-0125-preview";
const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Connection settings for the OpenAI provider.
#[derive(Debug, Clone)]
pub struct OpenAIConfig {
    api_key: Secret<String>,
    pub model: String,
    pub base_url: String,
    pub timeout: Duration,
}

impl OpenAIConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Secret::new(api_key.into()),
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(120),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// [`AIProvider`] backed by the `/chat/completions` endpoint.
pub struct OpenAIProvider {
    config: OpenAIConfig,
    client: Client,
}

impl OpenAIProvider {
    pub fn new(config: OpenAIConfig) -> Result<Self, AIError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| AIError::Configuration(format!("cannot build HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.config.base_url.trim_end_matches('/'))
    }

    fn body(&self, request: &CompletionRequest) -> ChatRequest<'_> {
        let content = if request.json_response {
            format!("{}\n\n{}", request.prompt, JSON_INSTRUCTION)
        } else {
            request.prompt.clone()
        };

        ChatRequest {
            model: &self.config.model,
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: Some(content),
            }],
            temperature: request.temperature,
            response_format: request.json_response.then_some(ResponseFormat {
                kind: "json_object",
            }),
        }
    }

    fn transport_error(&self, err: reqwest::Error) -> AIError {
        if err.is_timeout() {
            AIError::Timeout(self.config.timeout)
        } else {
            AIError::Network(err.to_string())
        }
    }

    /// Maps a non-success status and its body to an error.
    fn status_error(status: StatusCode, body: &str) -> AIError {
        let message = error_message(body);
        match status {
            StatusCode::UNAUTHORIZED => AIError::AuthenticationFailed,
            StatusCode::TOO_MANY_REQUESTS => AIError::RateLimited(message),
            StatusCode::BAD_REQUEST
                if body.contains("context_length_exceeded")
                    || body.contains("maximum context length") =>
            {
                AIError::ContextTooLong(message)
            }
            StatusCode::BAD_REQUEST => AIError::Rejected(message),
            s if s.is_server_error() => AIError::Unavailable(format!("{}: {}", s, message)),
            s => AIError::Network(format!("unexpected status {}: {}", s, message)),
        }
    }

    async fn read(&self, response: Response) -> Result<CompletionResponse, AIError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Self::status_error(status, &body));
        }

        let chat: ChatResponse = response
            .json()
            .await
            .map_err(|e| AIError::MalformedResponse(e.to_string()))?;
        into_completion(chat)
    }
}

#[async_trait]
impl AIProvider for OpenAIProvider {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, AIError> {
        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(self.config.api_key.expose_secret())
            .json(&self.body(&request))
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        self.read(response).await
    }

    fn provider_info(&self) -> ProviderInfo {
        ProviderInfo::new("openai", &self.config.model)
    }
}

/// `error.message` from an API error body, or the body itself.
fn error_message(body: &str) -> String {
    serde_json::from_str::<ErrorBody>(body)
        .map(|e| e.error.message)
        .unwrap_or_else(|_| body.to_string())
}

/// First choice's text; a null content is an empty body.
fn into_completion(chat: ChatResponse) -> Result<CompletionResponse, AIError> {
    let choice = chat
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| AIError::MalformedResponse("no choices in response".to_string()))?;

    Ok(CompletionResponse {
        content: choice.message.content.unwrap_or_default(),
        usage: chat
            .usage
            .map(|u| TokenUsage::new(u.prompt_tokens, u.completion_tokens))
            .unwrap_or_default(),
        model: chat.model,
    })
}

// Wire types

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormat>,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Debug, Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    model: String,
    choices: Vec<ChatChoice>,
    usage: Option<ChatUsage>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatUsage {
    prompt_tokens: u32,
    completion_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    message: String,
}
