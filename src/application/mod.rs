//! Application layer - extraction pipeline and its command handler.
//!
//! This layer orchestrates domain rules and coordinates between ports.
//!
//! - `chunker` - token-bounded, paragraph-aligned transcript splitting
//! - `completion` - retrying JSON completion client
//! - `facets` - per-facet prompts, schema checks and record mapping
//! - `timeline` - per-chunk timeline extraction and merge
//! - `handlers` - the `ExtractFounder` command

pub mod chunker;
pub mod completion;
pub mod facets;
pub mod handlers;
pub mod timeline;

pub use chunker::{Chunker, OversizeParagraphPolicy};
pub use completion::{AttemptFailure, CompletionClient, CompletionError};
pub use facets::{ExtractionError, FacetExtractor, RecordSkip, SchemaError};
pub use handlers::{
    ExtractFounderCommand, ExtractFounderError, ExtractFounderHandler, ExtractFounderResult,
    FanOutPolicy,
};
pub use timeline::TimelineMerger;
