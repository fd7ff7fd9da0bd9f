//! Mock AI Provider for testing.
//!
//! Scripted implementation of the AIProvider port so extraction can run
//! without a completion service.
//!
//! # Features
//!
//! - Scripted bodies or errors, globally or per facet
//! - Simulated latency, globally or per facet
//! - Call tracking for verification
//!
//! Facets run concurrently, so scripting by facet is the reliable way to
//! pair an answer with a prompt. A request whose facet queue is empty falls
//! back to the shared queue, then to the fallback body.
//!
//! # Example
//!
//! ```ignore
//! let provider = MockAIProvider::new()
//!     .with_facet_response(Facet::Habits, r#"{"habits": []}"#)
//!     .with_facet_error(Facet::Traits, AIError::AuthenticationFailed)
//!     .with_delay(Duration::from_millis(100));
//! ```

use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::sleep;

use crate::domain::founder::Facet;
use crate::ports::{AIError, AIProvider, CompletionRequest, CompletionResponse, ProviderInfo, TokenUsage};

type Scripted = Result<String, AIError>;

const MOCK_MODEL: &str = "mock-model-1";

/// Mock AI provider for testing.
#[derive(Debug, Clone)]
pub struct MockAIProvider {
    /// Answers for any facet, consumed in order.
    shared: Arc<Mutex<VecDeque<Scripted>>>,
    /// Answers reserved for one facet, consumed in order.
    by_facet: Arc<Mutex<HashMap<Facet, VecDeque<Scripted>>>>,
    /// Body returned when every queue is empty.
    fallback: String,
    delay: Duration,
    facet_delays: HashMap<Facet, Duration>,
    calls: Arc<Mutex<Vec<CompletionRequest>>>,
}

impl Default for MockAIProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl MockAIProvider {
    pub fn new() -> Self {
        Self {
            shared: Arc::new(Mutex::new(VecDeque::new())),
            by_facet: Arc::new(Mutex::new(HashMap::new())),
            fallback: "Mock response".to_string(),
            delay: Duration::ZERO,
            facet_delays: HashMap::new(),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Queues a body on the shared queue.
    pub fn with_response(self, content: impl Into<String>) -> Self {
        self.push(None, Ok(content.into()))
    }

    /// Queues an error on the shared queue.
    pub fn with_error(self, error: AIError) -> Self {
        self.push(None, Err(error))
    }

    pub fn with_facet_response(self, facet: Facet, content: impl Into<String>) -> Self {
        self.push(Some(facet), Ok(content.into()))
    }

    pub fn with_facet_error(self, facet: Facet, error: AIError) -> Self {
        self.push(Some(facet), Err(error))
    }

    /// Body returned once the queues run dry.
    pub fn with_fallback(mut self, content: impl Into<String>) -> Self {
        self.fallback = content.into();
        self
    }

    /// Latency applied to every request without a facet override.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn with_facet_delay(mut self, facet: Facet, delay: Duration) -> Self {
        self.facet_delays.insert(facet, delay);
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Number of requests tagged with `facet`.
    pub fn calls_for(&self, facet: Facet) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.facet == Some(facet))
            .count()
    }

    /// Every request received, in arrival order.
    pub fn get_calls(&self) -> Vec<CompletionRequest> {
        self.calls.lock().unwrap().clone()
    }

    fn push(self, facet: Option<Facet>, answer: Scripted) -> Self {
        match facet {
            Some(facet) => self
                .by_facet
                .lock()
                .unwrap()
                .entry(facet)
                .or_default()
                .push_back(answer),
            None => self.shared.lock().unwrap().push_back(answer),
        }
        self
    }

    fn next_answer(&self, facet: Option<Facet>) -> Scripted {
        let reserved = facet.and_then(|facet| {
            self.by_facet
                .lock()
                .unwrap()
                .get_mut(&facet)
                .and_then(VecDeque::pop_front)
        });

        reserved
            .or_else(|| self.shared.lock().unwrap().pop_front())
            .unwrap_or_else(|| Ok(self.fallback.clone()))
    }

    fn delay_for(&self, facet: Option<Facet>) -> Duration {
        facet
            .and_then(|f| self.facet_delays.get(&f).copied())
            .unwrap_or(self.delay)
    }
}

#[async_trait]
impl AIProvider for MockAIProvider {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, AIError> {
        let facet = request.facet;
        self.calls.lock().unwrap().push(request);

        let delay = self.delay_for(facet);
        if !delay.is_zero() {
            sleep(delay).await;
        }

        self.next_answer(facet).map(|content| CompletionResponse {
            content,
            usage: TokenUsage::new(10, 20),
            model: MOCK_MODEL.to_string(),
        })
    }

    fn provider_info(&self) -> ProviderInfo {
        ProviderInfo::new("mock", MOCK_MODEL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn untagged() -> CompletionRequest {
        CompletionRequest::new("Hello")
    }

    fn facet_request(facet: Facet) -> CompletionRequest {
        CompletionRequest::for_facet(facet, "Extract")
    }

    #[tokio::test]
    async fn returns_shared_answers_in_order_then_fallback() {
        let provider = MockAIProvider::new().with_response("First").with_response("Second");

        let r1 = provider.complete(untagged()).await.unwrap();
        let r2 = provider.complete(untagged()).await.unwrap();
        let r3 = provider.complete(untagged()).await.unwrap();

        assert_eq!(r1.content, "First");
        assert_eq!(r1.model, MOCK_MODEL);
        assert_eq!(r2.content, "Second");
        assert_eq!(r3.content, "Mock response");
    }

    #[tokio::test]
    async fn facet_queue_takes_precedence_over_shared_queue() {
        let provider = MockAIProvider::new()
            .with_response("shared")
            .with_facet_response(Facet::Habits, r#"{"habits": []}"#);

        let habits = provider.complete(facet_request(Facet::Habits)).await.unwrap();
        let beliefs = provider.complete(facet_request(Facet::Beliefs)).await.unwrap();
        let habits_again = provider.complete(facet_request(Facet::Habits)).await.unwrap();

        assert_eq!(habits.content, r#"{"habits": []}"#);
        assert_eq!(beliefs.content, "shared");
        assert_eq!(habits_again.content, "Mock response");
    }

    #[tokio::test]
    async fn returns_scripted_error() {
        let provider = MockAIProvider::new()
            .with_facet_error(Facet::Traits, AIError::RateLimited("slow down".to_string()));

        let err = provider.complete(facet_request(Facet::Traits)).await.unwrap_err();

        assert_eq!(err, AIError::RateLimited("slow down".to_string()));
    }

    #[tokio::test]
    async fn tracks_calls_by_facet() {
        let provider = MockAIProvider::new();
        assert_eq!(provider.call_count(), 0);

        provider.complete(untagged()).await.unwrap();
        provider.complete(facet_request(Facet::Anecdotes)).await.unwrap();

        assert_eq!(provider.call_count(), 2);
        assert_eq!(provider.calls_for(Facet::Anecdotes), 1);
        assert_eq!(provider.get_calls()[1].facet, Some(Facet::Anecdotes));
        assert_eq!(provider.provider_info().name, "mock");
    }

    #[tokio::test]
    async fn facet_delay_overrides_global_delay() {
        let provider = MockAIProvider::new()
            .with_delay(Duration::from_secs(5))
            .with_facet_delay(Facet::Failures, Duration::from_millis(20));

        let start = std::time::Instant::now();
        provider.complete(facet_request(Facet::Failures)).await.unwrap();
        let elapsed = start.elapsed();

        assert!(elapsed >= Duration::from_millis(20));
        assert!(elapsed < Duration::from_secs(5));
    }
}
