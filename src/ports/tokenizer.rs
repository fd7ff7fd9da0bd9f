//! Tokenizer port - token accounting used to size transcript chunks.

/// Counts tokens the way the completion service does, or conservatively.
///
/// Implementations must be deterministic: the same text always yields the
/// same count.
pub trait Tokenizer: Send + Sync {
    /// Number of tokens in `text`.
    fn count_tokens(&self, text: &str) -> usize;
}

/// No vocabulary could be loaded for a model.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("no tokenizer available for model `{model}`: {reason}")]
pub struct TokenizerError {
    pub model: String,
    pub reason: String,
}
