//! Tokenizer Adapters.
//!
//! - `TiktokenTokenizer` - the completion model's own BPE vocabulary
//! - `HeuristicTokenizer` - character-ratio estimate, no vocabulary needed

mod heuristic;
mod tiktoken;

pub use heuristic::HeuristicTokenizer;
pub use tiktoken::TiktokenTokenizer;
