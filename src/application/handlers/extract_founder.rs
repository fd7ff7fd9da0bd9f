//! ExtractFounderHandler - turns one transcript into a Founder profile.
//!
//! # Sequence
//!
//! 1. Chunk the transcript.
//! 2. Extract basic info from chunk 0. Failure here ends the run.
//! 3. Run the timeline merger across all chunks, one chunk at a time.
//! 4. Fan out every remaining facet concurrently against the whole text.
//! 5. Collect results keyed by facet as they finish, in any order.
//! 6. Assemble the aggregate; field order comes from the aggregate, not
//!    from arrival order.
//!
//! The fan-out is driven on the calling task through `FuturesUnordered`, so
//! the result map is only ever touched by one task and needs no lock.

use futures::stream::{FuturesUnordered, StreamExt};
use serde::Deserialize;
use std::collections::HashMap;
use tracing::Instrument;
use uuid::Uuid;

use crate::application::chunker::Chunker;
use crate::application::facets::{ExtractionError, FacetExtractor};
use crate::application::timeline::TimelineMerger;
use crate::domain::foundation::Timestamp;
use crate::domain::founder::{Facet, FacetRecords, Founder, Transcript};

/// How the concurrent facet group reacts to one facet failing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FanOutPolicy {
    /// A failed facet is logged and falls back to its empty default.
    #[default]
    Isolated,
    /// The first failed facet aborts the group; in-flight siblings are
    /// dropped and finished ones discarded.
    FailFast,
}

/// Command to extract a profile from a transcript.
#[derive(Debug, Clone)]
pub struct ExtractFounderCommand {
    pub transcript: Transcript,
}

impl ExtractFounderCommand {
    pub fn new(transcript: Transcript) -> Self {
        Self { transcript }
    }
}

/// Result of a successful extraction.
#[derive(Debug, Clone)]
pub struct ExtractFounderResult {
    /// The assembled profile.
    pub founder: Founder,
    /// Correlates this run's log lines.
    pub run_id: Uuid,
    /// Number of chunks the transcript was split into.
    pub chunk_count: usize,
    /// Facets that failed and were replaced by their empty default.
    pub failed_facets: Vec<Facet>,
}

/// Error type for profile extraction.
#[derive(Debug, Clone)]
pub enum ExtractFounderError {
    /// Basic info could not be extracted; there is no fallback value.
    BasicInfo(ExtractionError),
    /// A concurrent facet failed under [`FanOutPolicy::FailFast`].
    FacetFailed {
        facet: Facet,
        source: ExtractionError,
        /// Facets that had finished before the abort, for diagnostics only.
        completed: Vec<Facet>,
    },
    /// The blocking entry point could not start a runtime.
    Runtime(String),
}

impl std::fmt::Display for ExtractFounderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExtractFounderError::BasicInfo(err) => {
                write!(f, "Basic info extraction failed: {}", err)
            }
            ExtractFounderError::FacetFailed {
                facet,
                source,
                completed,
            } => write!(
                f,
                "Facet {} failed: {} ({} other facet(s) had completed)",
                facet,
                source,
                completed.len()
            ),
            ExtractFounderError::Runtime(msg) => write!(f, "Runtime error: {}", msg),
        }
    }
}

impl std::error::Error for ExtractFounderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ExtractFounderError::BasicInfo(err) => Some(err),
            ExtractFounderError::FacetFailed { source, .. } => Some(source),
            ExtractFounderError::Runtime(_) => None,
        }
    }
}

/// Handler for profile extraction.
///
/// # Dependencies
///
/// - `Chunker`: Splits the transcript for basic info and timeline
/// - `FacetExtractor`: Prompts, calls and maps each facet
///
/// # Usage
///
/// ```rust,ignore
/// let handler = ExtractFounderHandler::new(chunker, extractor);
/// let result = handler.handle(ExtractFounderCommand::new(transcript)).await?;
/// println!("{}", result.founder.basic_info().name);
/// ```
#[derive(Debug, Clone)]
pub struct ExtractFounderHandler {
    chunker: Chunker,
    extractor: FacetExtractor,
    fan_out: FanOutPolicy,
}

impl ExtractFounderHandler {
    pub fn new(chunker: Chunker, extractor: FacetExtractor) -> Self {
        Self {
            chunker,
            extractor,
            fan_out: FanOutPolicy::default(),
        }
    }

    pub fn with_fan_out_policy(mut self, policy: FanOutPolicy) -> Self {
        self.fan_out = policy;
        self
    }

    /// Runs the whole extraction inside an `extract_founder` span.
    pub async fn handle(
        &self,
        command: ExtractFounderCommand,
    ) -> Result<ExtractFounderResult, ExtractFounderError> {
        let run_id = Uuid::new_v4();
        let span = tracing::info_span!("extract_founder", %run_id);
        self.run(command, run_id).instrument(span).await
    }

    /// Runs [`handle`](Self::handle) to completion on a fresh current-thread
    /// runtime. Must not be called from inside another tokio runtime.
    pub fn handle_blocking(
        &self,
        command: ExtractFounderCommand,
    ) -> Result<ExtractFounderResult, ExtractFounderError> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| ExtractFounderError::Runtime(e.to_string()))?;
        runtime.block_on(self.handle(command))
    }

    async fn run(
        &self,
        command: ExtractFounderCommand,
        run_id: Uuid,
    ) -> Result<ExtractFounderResult, ExtractFounderError> {
        let text = command.transcript.text();
        let chunks = self.chunker.chunk(text);
        tracing::info!(
            chunks = chunks.len(),
            max_tokens = self.chunker.max_tokens(),
            "transcript chunked"
        );

        let first_chunk = chunks.first().map(String::as_str).unwrap_or_default();
        let basic_info = self
            .extractor
            .extract_basic_info(first_chunk)
            .await
            .map_err(|err| {
                tracing::error!(error = %err, "basic info extraction failed");
                ExtractFounderError::BasicInfo(err)
            })?;
        tracing::info!(name = %basic_info.name, "basic info extracted");

        let timeline = TimelineMerger::new(&self.extractor).run(&chunks).await;

        let (collected, failed_facets) = self.fan_out(text).await?;

        let founder = Founder::assemble(basic_info, timeline, collected, Timestamp::now());
        tracing::info!(failed = failed_facets.len(), "profile assembled");

        Ok(ExtractFounderResult {
            founder,
            run_id,
            chunk_count: chunks.len(),
            failed_facets,
        })
    }

    async fn fan_out(
        &self,
        text: &str,
    ) -> Result<(HashMap<Facet, FacetRecords>, Vec<Facet>), ExtractFounderError> {
        let mut pending: FuturesUnordered<_> = Facet::CONCURRENT
            .into_iter()
            .map(|facet| async move { (facet, self.extractor.extract(facet, text).await) })
            .collect();

        let mut collected = HashMap::new();
        let mut failed = Vec::new();

        while let Some((facet, outcome)) = pending.next().await {
            match outcome {
                Ok(records) => {
                    collected.insert(facet, records);
                }
                Err(err) => match self.fan_out {
                    FanOutPolicy::Isolated => {
                        tracing::warn!(facet = facet.as_str(), error = %err, "facet failed, using empty default");
                        failed.push(facet);
                    }
                    FanOutPolicy::FailFast => {
                        tracing::error!(facet = facet.as_str(), error = %err, "facet failed, aborting fan-out");
                        let mut completed: Vec<Facet> = collected.into_keys().collect();
                        completed.sort();
                        return Err(ExtractFounderError::FacetFailed {
                            facet,
                            source: err,
                            completed,
                        });
                    }
                },
            }
        }

        failed.sort();
        Ok((collected, failed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::MockAIProvider;
    use crate::adapters::tokenizer::HeuristicTokenizer;
    use crate::application::completion::CompletionClient;
    use std::sync::Arc;

    fn handler(provider: &MockAIProvider) -> ExtractFounderHandler {
        let chunker = Chunker::new(Arc::new(HeuristicTokenizer::new()), 1000);
        let extractor = FacetExtractor::new(CompletionClient::new(Arc::new(provider.clone())));
        ExtractFounderHandler::new(chunker, extractor)
    }

    #[test]
    fn fan_out_policy_parses_from_config_names() {
        let policy: FanOutPolicy = serde_json::from_str("\"fail_fast\"").unwrap();
        assert_eq!(policy, FanOutPolicy::FailFast);
        assert_eq!(FanOutPolicy::default(), FanOutPolicy::Isolated);
    }

    #[test]
    fn blocking_entry_point_runs_to_completion() {
        let provider = MockAIProvider::new()
            .with_facet_response(Facet::BasicInfo, r#"{"name": "Jane", "domain": []}"#)
            .with_fallback("not json");

        let result = handler(&provider)
            .handle_blocking(ExtractFounderCommand::new(Transcript::new("hello")))
            .unwrap();

        assert_eq!(result.founder.basic_info().name, "Jane");
        assert_eq!(result.chunk_count, 1);
        assert_eq!(result.failed_facets.len(), Facet::CONCURRENT.len());
        assert!(result.founder.timeline().is_empty());
    }

    #[tokio::test]
    async fn basic_info_failure_ends_the_run() {
        let provider = MockAIProvider::new().with_fallback("not json");

        let err = handler(&provider)
            .handle(ExtractFounderCommand::new(Transcript::new("hello")))
            .await
            .unwrap_err();

        assert!(matches!(err, ExtractFounderError::BasicInfo(_)));
        assert_eq!(provider.call_count(), 3);
        assert!(err.to_string().starts_with("Basic info extraction failed"));
    }
}
