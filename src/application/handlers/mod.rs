//! Command handlers.
//!
//! - `extract_founder` - transcript in, Founder profile out

mod extract_founder;

pub use extract_founder::{
    ExtractFounderCommand, ExtractFounderError, ExtractFounderHandler, ExtractFounderResult,
    FanOutPolicy,
};
