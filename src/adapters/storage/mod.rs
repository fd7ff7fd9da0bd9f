//! Storage Adapters
//!
//! Implementations of the FounderStore port.
//!
//! - **LocalFounderStore** - Stores profiles as JSON files on disk

mod local_founder_store;

pub use local_founder_store::LocalFounderStore;
