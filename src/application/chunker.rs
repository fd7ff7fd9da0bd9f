//! Chunker - splits a transcript into token-bounded, paragraph-aligned segments.
//!
//! Paragraphs are accumulated into a running chunk until adding the next one
//! would push the chunk over the token budget; the chunk is then closed and a
//! new one starts with that paragraph. Paragraphs are never split, except by
//! [`OversizeParagraphPolicy::HardSplit`] when one alone exceeds the budget.
//!
//! Chunking is pure: identical text, budget and tokenizer give identical
//! output. Chunk order follows the transcript.

use serde::Deserialize;
use std::sync::Arc;

use crate::domain::founder::PARAGRAPH_SEPARATOR;
use crate::ports::Tokenizer;

/// What to do with a single paragraph that exceeds the budget on its own.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OversizeParagraphPolicy {
    /// Emit the paragraph whole, as one over-budget chunk.
    #[default]
    PassThrough,
    /// Split the paragraph at whitespace into within-budget pieces. A single
    /// word longer than the budget becomes a piece by itself.
    HardSplit,
}

/// Splits transcripts into chunks of at most `max_tokens` tokens.
#[derive(Clone)]
pub struct Chunker {
    tokenizer: Arc<dyn Tokenizer>,
    max_tokens: usize,
    oversize: OversizeParagraphPolicy,
}

impl Chunker {
    pub fn new(tokenizer: Arc<dyn Tokenizer>, max_tokens: usize) -> Self {
        Self {
            tokenizer,
            max_tokens,
            oversize: OversizeParagraphPolicy::default(),
        }
    }

    pub fn with_oversize_policy(mut self, policy: OversizeParagraphPolicy) -> Self {
        self.oversize = policy;
        self
    }

    pub fn max_tokens(&self) -> usize {
        self.max_tokens
    }

    /// Splits `text` into chunks.
    ///
    /// Always returns at least one chunk; an empty transcript yields a single
    /// empty chunk. Under `PassThrough`, joining the chunks with the paragraph
    /// separator reproduces `text` exactly.
    ///
    /// Each paragraph is tokenized once. A chunk's size is the sum of its
    /// paragraphs' counts plus one separator count per join.
    pub fn chunk(&self, text: &str) -> Vec<String> {
        let separator_tokens = self.tokenizer.count_tokens(PARAGRAPH_SEPARATOR);
        let mut chunks = Vec::new();
        let mut current: Vec<&str> = Vec::new();
        let mut current_tokens = 0;

        for paragraph in text.split(PARAGRAPH_SEPARATOR) {
            let tokens = self.tokenizer.count_tokens(paragraph);

            if self.oversize == OversizeParagraphPolicy::HardSplit && tokens > self.max_tokens {
                if !current.is_empty() {
                    chunks.push(current.join(PARAGRAPH_SEPARATOR));
                    current.clear();
                }
                chunks.extend(self.hard_split(paragraph));
                continue;
            }

            if current.is_empty() {
                current_tokens = tokens;
            } else if current_tokens + separator_tokens + tokens > self.max_tokens {
                chunks.push(current.join(PARAGRAPH_SEPARATOR));
                current.clear();
                current_tokens = tokens;
            } else {
                current_tokens += separator_tokens + tokens;
            }
            current.push(paragraph);
        }

        if !current.is_empty() || chunks.is_empty() {
            chunks.push(current.join(PARAGRAPH_SEPARATOR));
        }

        chunks
    }

    /// Pieces concatenate back to `paragraph` without any separator.
    fn hard_split(&self, paragraph: &str) -> Vec<String> {
        let mut pieces = Vec::new();
        let mut piece = String::new();
        let mut piece_tokens = 0;

        for word in paragraph.split_inclusive(char::is_whitespace) {
            let tokens = self.tokenizer.count_tokens(word);
            if !piece.is_empty() && piece_tokens + tokens > self.max_tokens {
                pieces.push(std::mem::take(&mut piece));
                piece_tokens = 0;
            }
            piece.push_str(word);
            piece_tokens += tokens;
        }

        if !piece.is_empty() {
            pieces.push(piece);
        }

        pieces
    }
}

impl std::fmt::Debug for Chunker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Chunker")
            .field("max_tokens", &self.max_tokens)
            .field("oversize", &self.oversize)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::tokenizer::HeuristicTokenizer;
    use proptest::prelude::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// One token per character keeps budgets easy to reason about.
    fn chunker(max_tokens: usize) -> Chunker {
        Chunker::new(Arc::new(HeuristicTokenizer::with_chars_per_token(1)), max_tokens)
    }

    fn tokens(text: &str) -> usize {
        HeuristicTokenizer::with_chars_per_token(1).count_tokens(text)
    }

    #[test]
    fn short_text_is_a_single_chunk() {
        let text = "Para A.\n\nPara B.";
        assert_eq!(chunker(100).chunk(text), vec![text.to_string()]);
    }

    #[test]
    fn closes_chunk_before_exceeding_budget() {
        // "aaaa\n\nbbbb" is 10 chars; budget 9 forces a split.
        let chunks = chunker(9).chunk("aaaa\n\nbbbb\n\ncc");
        assert_eq!(chunks, vec!["aaaa", "bbbb\n\ncc"]);
    }

    #[test]
    fn budget_is_inclusive() {
        let chunks = chunker(10).chunk("aaaa\n\nbbbb");
        assert_eq!(chunks, vec!["aaaa\n\nbbbb"]);
    }

    #[test]
    fn empty_text_yields_one_empty_chunk() {
        assert_eq!(chunker(10).chunk(""), vec![String::new()]);
    }

    #[test]
    fn oversize_first_paragraph_passes_through_without_empty_lead() {
        let chunks = chunker(5).chunk("abcdefghij\n\nxy");
        assert_eq!(chunks, vec!["abcdefghij", "xy"]);
    }

    #[test]
    fn oversize_middle_paragraph_passes_through_whole() {
        let chunks = chunker(5).chunk("ab\n\nabcdefghij\n\ncd");
        assert_eq!(chunks, vec!["ab", "abcdefghij", "cd"]);
    }

    #[test]
    fn hard_split_breaks_oversize_paragraph_at_whitespace() {
        let chunker = chunker(8).with_oversize_policy(OversizeParagraphPolicy::HardSplit);
        let paragraph = "one two three four";

        let chunks = chunker.chunk(&format!("ab\n\n{}\n\ncd", paragraph));

        assert_eq!(chunks, vec!["ab", "one two ", "three ", "four", "cd"]);
        assert_eq!(chunks[1..4].concat(), paragraph);
    }

    #[test]
    fn hard_split_keeps_long_word_alone() {
        let chunker = chunker(4).with_oversize_policy(OversizeParagraphPolicy::HardSplit);
        assert_eq!(chunker.chunk("a enormous b"), vec!["a ", "enormous ", "b"]);
    }

    /// Counts calls and bytes seen by the wrapped tokenizer.
    struct CountingTokenizer {
        inner: HeuristicTokenizer,
        calls: AtomicUsize,
        bytes: AtomicUsize,
    }

    impl Tokenizer for CountingTokenizer {
        fn count_tokens(&self, text: &str) -> usize {
            self.calls.fetch_add(1, Ordering::Relaxed);
            self.bytes.fetch_add(text.len(), Ordering::Relaxed);
            self.inner.count_tokens(text)
        }
    }

    #[test]
    fn each_paragraph_is_tokenized_once() {
        let paragraph = "x".repeat(78);
        let text = vec![paragraph; 5000].join(PARAGRAPH_SEPARATOR);
        let tokenizer = Arc::new(CountingTokenizer {
            inner: HeuristicTokenizer::with_chars_per_token(1),
            calls: AtomicUsize::new(0),
            bytes: AtomicUsize::new(0),
        });

        let chunks = Chunker::new(tokenizer.clone(), 1_000_000).chunk(&text);

        assert_eq!(chunks, vec![text.clone()]);
        // One call for the separator, one per paragraph.
        assert_eq!(tokenizer.calls.load(Ordering::Relaxed), 5001);
        assert!(tokenizer.bytes.load(Ordering::Relaxed) <= text.len());
    }

    #[test]
    fn hard_split_tokenizes_each_word_once() {
        let tokenizer = Arc::new(CountingTokenizer {
            inner: HeuristicTokenizer::with_chars_per_token(1),
            calls: AtomicUsize::new(0),
            bytes: AtomicUsize::new(0),
        });
        let chunker =
            Chunker::new(tokenizer.clone(), 8).with_oversize_policy(OversizeParagraphPolicy::HardSplit);

        chunker.chunk("one two three four");

        // Separator, the paragraph, then four words.
        assert_eq!(tokenizer.calls.load(Ordering::Relaxed), 6);
    }

    #[test]
    fn policy_parses_from_config_names() {
        let policy: OversizeParagraphPolicy = serde_json::from_str("\"hard_split\"").unwrap();
        assert_eq!(policy, OversizeParagraphPolicy::HardSplit);
        assert_eq!(OversizeParagraphPolicy::default(), OversizeParagraphPolicy::PassThrough);
    }

    fn paragraphs() -> impl Strategy<Value = Vec<String>> {
        prop::collection::vec("[a-z ]{0,30}", 1..12)
    }

    proptest! {
        #[test]
        fn chunks_cover_the_transcript(paras in paragraphs(), budget in 1usize..80) {
            let text = paras.join(PARAGRAPH_SEPARATOR);
            let chunks = chunker(budget).chunk(&text);
            prop_assert_eq!(chunks.join(PARAGRAPH_SEPARATOR), text);
        }

        #[test]
        fn chunks_never_split_paragraphs(paras in paragraphs(), budget in 1usize..80) {
            let text = paras.join(PARAGRAPH_SEPARATOR);
            let chunks = chunker(budget).chunk(&text);
            let rejoined: usize = chunks
                .iter()
                .map(|c| c.split(PARAGRAPH_SEPARATOR).count())
                .sum();
            prop_assert_eq!(rejoined, paras.len());
        }

        #[test]
        fn only_single_paragraph_chunks_exceed_budget(paras in paragraphs(), budget in 1usize..80) {
            let text = paras.join(PARAGRAPH_SEPARATOR);
            for chunk in chunker(budget).chunk(&text) {
                if tokens(&chunk) > budget {
                    prop_assert!(!chunk.contains(PARAGRAPH_SEPARATOR));
                }
            }
        }

        #[test]
        fn hard_split_respects_budget_for_short_words(
            words in prop::collection::vec("[a-z]{1,5}", 1..40),
            budget in 6usize..40,
        ) {
            let text = words.join(" ");
            let chunker = chunker(budget).with_oversize_policy(OversizeParagraphPolicy::HardSplit);
            let chunks = chunker.chunk(&text);
            for chunk in &chunks {
                prop_assert!(tokens(chunk) <= budget);
            }
            prop_assert_eq!(chunks.concat(), text);
        }

        #[test]
        fn chunking_is_deterministic(paras in paragraphs(), budget in 1usize..80) {
            let text = paras.join(PARAGRAPH_SEPARATOR);
            prop_assert_eq!(chunker(budget).chunk(&text), chunker(budget).chunk(&text));
        }
    }
}
