//! BPE token counts from the completion model's own vocabulary.

use std::fmt;

use tiktoken_rs::CoreBPE;

use crate::ports::{Tokenizer, TokenizerError};

/// Counts tokens with the OpenAI vocabulary for a model.
///
/// Models the vocabulary table does not know fall back to `cl100k_base`,
/// shared by the GPT-4 and GPT-3.5 families.
pub struct TiktokenTokenizer {
    bpe: CoreBPE,
    /// Model or encoding the vocabulary was loaded for.
    vocabulary: String,
}

impl TiktokenTokenizer {
    pub fn for_model(model: &str) -> Result<Self, TokenizerError> {
        match tiktoken_rs::get_bpe_from_model(model) {
            Ok(bpe) => Ok(Self {
                bpe,
                vocabulary: model.to_string(),
            }),
            Err(e) => {
                tracing::warn!(model, error = %e, "unknown model vocabulary, using cl100k_base");
                Self::cl100k().map_err(|e| TokenizerError {
                    model: model.to_string(),
                    reason: e.reason,
                })
            }
        }
    }

    pub fn cl100k() -> Result<Self, TokenizerError> {
        let bpe = tiktoken_rs::cl100k_base().map_err(|e| TokenizerError {
            model: "cl100k_base".to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self {
            bpe,
            vocabulary: "cl100k_base".to_string(),
        })
    }
}

impl Tokenizer for TiktokenTokenizer {
    fn count_tokens(&self, text: &str) -> usize {
        self.bpe.encode_with_special_tokens(text).len()
    }
}

impl fmt::Debug for TiktokenTokenizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TiktokenTokenizer")
            .field("vocabulary", &self.vocabulary)
            .finish_non_exhaustive()
    }
}
