//! Extraction pipeline configuration

use serde::Deserialize;

use super::error::ValidationError;
use crate::application::{FanOutPolicy, OversizeParagraphPolicy};

/// Chunking and fan-out settings
#[derive(Debug, Clone, Deserialize)]
pub struct ExtractionConfig {
    /// Token budget per transcript chunk; keep it below the model's limit
    #[serde(default = "default_max_chunk_tokens")]
    pub max_chunk_tokens: usize,

    /// Handling of a paragraph that exceeds the budget by itself
    #[serde(default)]
    pub oversize_paragraph: OversizeParagraphPolicy,

    /// Reaction of the concurrent facet group to one failed facet
    #[serde(default)]
    pub fan_out: FanOutPolicy,

    /// Characters of the first chunk shown to the basic-info prompt
    #[serde(default = "default_excerpt_chars")]
    pub basic_info_excerpt_chars: usize,
}

impl ExtractionConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.max_chunk_tokens == 0 {
            return Err(ValidationError::InvalidChunkBudget);
        }
        Ok(())
    }
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            max_chunk_tokens: default_max_chunk_tokens(),
            oversize_paragraph: OversizeParagraphPolicy::default(),
            fan_out: FanOutPolicy::default(),
            basic_info_excerpt_chars: default_excerpt_chars(),
        }
    }
}

fn default_max_chunk_tokens() -> usize {
    100_000
}

fn default_excerpt_chars() -> usize {
    2000
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extraction_defaults() {
        let config = ExtractionConfig::default();
        assert_eq!(config.max_chunk_tokens, 100_000);
        assert_eq!(config.oversize_paragraph, OversizeParagraphPolicy::PassThrough);
        assert_eq!(config.fan_out, FanOutPolicy::Isolated);
        assert_eq!(config.basic_info_excerpt_chars, 2000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_budget_fails() {
        let config = ExtractionConfig {
            max_chunk_tokens: 0,
            ..ExtractionConfig::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidChunkBudget));
    }
}
