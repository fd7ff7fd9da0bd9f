//! Timeline Merger - per-chunk timeline extraction folded into one sequence.

use crate::application::facets::FacetExtractor;
use crate::domain::founder::{merge_timeline, TimelineEvent};

/// Runs the timeline extractor over every chunk, one at a time.
#[derive(Debug, Clone, Copy)]
pub struct TimelineMerger<'a> {
    extractor: &'a FacetExtractor,
}

impl<'a> TimelineMerger<'a> {
    pub fn new(extractor: &'a FacetExtractor) -> Self {
        Self { extractor }
    }

    /// Extracts, de-duplicates and orders events from all `chunks`.
    ///
    /// A chunk whose extraction fails contributes no events; the remaining
    /// chunks still run.
    pub async fn run(&self, chunks: &[String]) -> Vec<TimelineEvent> {
        let mut per_chunk = Vec::with_capacity(chunks.len());

        for (index, chunk) in chunks.iter().enumerate() {
            match self.extractor.extract_timeline(chunk).await {
                Ok(events) => {
                    tracing::debug!(chunk = index, events = events.len(), "timeline chunk extracted");
                    per_chunk.push(events);
                }
                Err(err) => {
                    tracing::warn!(chunk = index, error = %err, "timeline chunk failed, contributing no events");
                }
            }
        }

        let merged = merge_timeline(per_chunk);
        tracing::info!(chunks = chunks.len(), events = merged.len(), "timeline merged");
        merged
    }
}
