//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the extraction logic and the outside world. Adapters implement these ports.
//!
//! - `AIProvider` - Chat-completion service that answers facet prompts
//! - `Tokenizer` - Token accounting used to size transcript chunks
//! - `FounderStore` - Durable storage for finished profiles

mod ai_provider;
mod founder_store;
mod tokenizer;

pub use ai_provider::{
    AIError, AIProvider, CompletionRequest, CompletionResponse, ProviderInfo, TokenUsage,
};
pub use founder_store::{FounderStore, StorageError};
pub use tokenizer::{Tokenizer, TokenizerError};
