//! Facet extractors: prompt, completion call, schema check, record mapping.
//!
//! All facets share one [`FacetExtractor`]; each call builds the facet's
//! prompt, sends it through the [`CompletionClient`], validates the
//! top-level shape and maps the records with per-record isolation.

mod mapping;
mod prompts;

pub use mapping::{map_record, map_records, payload, RecordSkip, SchemaError};
pub use prompts::{excerpt, prompt};

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::application::completion::{CompletionClient, CompletionError};
use crate::domain::foundation::Sourced;
use crate::domain::founder::{BasicInfo, EmotionalIntelligence, Facet, FacetRecords, TimelineEvent};
use crate::ports::CompletionRequest;

/// Default number of characters of chunk 0 shown to the basic-info prompt.
pub const DEFAULT_BASIC_INFO_EXCERPT_CHARS: usize = 2000;

/// Failure of one whole facet.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ExtractionError {
    #[error(transparent)]
    Completion(#[from] CompletionError),

    #[error("malformed response: {0}")]
    Schema(#[from] SchemaError),

    /// The single record of a singleton facet failed to map.
    #[error("invalid record: {0}")]
    InvalidRecord(String),

    #[error("{0} is not extracted against the whole transcript")]
    NotConcurrent(Facet),
}

/// Runs facet extractions through a shared completion client.
#[derive(Debug, Clone)]
pub struct FacetExtractor {
    client: CompletionClient,
    basic_info_excerpt_chars: usize,
}

impl FacetExtractor {
    pub fn new(client: CompletionClient) -> Self {
        Self {
            client,
            basic_info_excerpt_chars: DEFAULT_BASIC_INFO_EXCERPT_CHARS,
        }
    }

    pub fn with_basic_info_excerpt_chars(mut self, chars: usize) -> Self {
        self.basic_info_excerpt_chars = chars;
        self
    }

    /// Basic info from the leading excerpt of `chunk`.
    pub async fn extract_basic_info(&self, chunk: &str) -> Result<BasicInfo, ExtractionError> {
        let text = excerpt(chunk, self.basic_info_excerpt_chars);
        let value = self.request(Facet::BasicInfo, text).await?;
        map_record(0, value).map_err(|skip| ExtractionError::InvalidRecord(skip.reason))
    }

    /// Timeline events mentioned in one chunk.
    pub async fn extract_timeline(&self, chunk: &str) -> Result<Vec<TimelineEvent>, ExtractionError> {
        let value = self.request(Facet::Timeline, chunk).await?;
        Ok(map_records(Facet::Timeline, value))
    }

    /// One concurrently extracted facet over the whole transcript.
    ///
    /// Basic info and timeline are rejected before any request is sent.
    pub async fn extract(&self, facet: Facet, transcript: &str) -> Result<FacetRecords, ExtractionError> {
        let records = match facet {
            Facet::Traits => self.collection(facet, transcript, FacetRecords::Traits).await?,
            Facet::Beliefs => self.collection(facet, transcript, FacetRecords::Beliefs).await?,
            Facet::Philosophies => {
                self.collection(facet, transcript, FacetRecords::Philosophies).await?
            }
            Facet::Failures => self.collection(facet, transcript, FacetRecords::Failures).await?,
            Facet::KeyDecisions => {
                self.collection(facet, transcript, FacetRecords::KeyDecisions).await?
            }
            Facet::Connections => {
                self.collection(facet, transcript, FacetRecords::Connections).await?
            }
            Facet::Habits => self.collection(facet, transcript, FacetRecords::Habits).await?,
            Facet::Approaches => self.collection(facet, transcript, FacetRecords::Approaches).await?,
            Facet::Anecdotes => self.collection(facet, transcript, FacetRecords::Anecdotes).await?,
            Facet::EmotionalIntelligence => {
                let value = self.request(facet, transcript).await?;
                let ei: EmotionalIntelligence = map_record(0, value)
                    .map_err(|skip| ExtractionError::InvalidRecord(skip.reason))?;
                mapping::warn_if_out_of_range(facet, 0, &ei);
                FacetRecords::EmotionalIntelligence(ei)
            }
            Facet::BasicInfo | Facet::Timeline => return Err(ExtractionError::NotConcurrent(facet)),
        };

        tracing::info!(facet = facet.as_str(), records = records.len(), "facet extracted");
        Ok(records)
    }

    async fn collection<T>(
        &self,
        facet: Facet,
        transcript: &str,
        wrap: fn(Vec<T>) -> FacetRecords,
    ) -> Result<FacetRecords, ExtractionError>
    where
        T: DeserializeOwned + Sourced,
    {
        let value = self.request(facet, transcript).await?;
        Ok(wrap(map_records(facet, value)))
    }

    async fn request(&self, facet: Facet, text: &str) -> Result<Value, ExtractionError> {
        let request = CompletionRequest::for_facet(facet, prompt(facet, text));
        let response = self.client.complete(request).await?;
        Ok(payload(facet, response)?)
    }
}
