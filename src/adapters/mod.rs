//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the extraction pipeline to external systems:
//! - `ai` - Completion services (OpenAI, mock)
//! - `storage` - Profile persistence on the local filesystem
//! - `tokenizer` - Token counts for chunk sizing

pub mod ai;
pub mod storage;
pub mod tokenizer;

pub use ai::{MockAIProvider, OpenAIConfig, OpenAIProvider};
pub use storage::LocalFounderStore;
pub use tokenizer::{HeuristicTokenizer, TiktokenTokenizer};
