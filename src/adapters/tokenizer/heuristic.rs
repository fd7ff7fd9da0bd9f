//! Character-ratio token estimate.

use crate::ports::Tokenizer;

/// Estimates tokens as characters divided by a fixed ratio, rounded up.
///
/// GPT-family vocabularies average roughly four characters per token on
/// English prose. CJK text, digit runs and code tokenize far denser, so this
/// undercounts them; production chunking uses [`TiktokenTokenizer`].
///
/// [`TiktokenTokenizer`]: super::TiktokenTokenizer
#[derive(Debug, Clone, Copy)]
pub struct HeuristicTokenizer {
    chars_per_token: usize,
}

impl HeuristicTokenizer {
    pub const DEFAULT_CHARS_PER_TOKEN: usize = 4;

    pub fn new() -> Self {
        Self {
            chars_per_token: Self::DEFAULT_CHARS_PER_TOKEN,
        }
    }

    /// Uses a custom ratio. A ratio of zero is treated as one.
    pub fn with_chars_per_token(chars_per_token: usize) -> Self {
        Self {
            chars_per_token: chars_per_token.max(1),
        }
    }
}

impl Default for HeuristicTokenizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Tokenizer for HeuristicTokenizer {
    fn count_tokens(&self, text: &str) -> usize {
        text.chars().count().div_ceil(self.chars_per_token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_text_has_no_tokens() {
        assert_eq!(HeuristicTokenizer::new().count_tokens(""), 0);
    }

    #[test]
    fn rounds_partial_tokens_up() {
        let tokenizer = HeuristicTokenizer::new();
        assert_eq!(tokenizer.count_tokens("Hi"), 1);
        assert_eq!(tokenizer.count_tokens("Hello, world!"), 4);
        assert_eq!(tokenizer.count_tokens("abcdefgh"), 2);
    }

    #[test]
    fn counts_characters_not_bytes() {
        let tokenizer = HeuristicTokenizer::with_chars_per_token(1);
        assert_eq!(tokenizer.count_tokens("héllo"), 5);
    }

    #[test]
    fn zero_ratio_is_clamped() {
        assert_eq!(HeuristicTokenizer::with_chars_per_token(0).count_tokens("abc"), 3);
    }
}
