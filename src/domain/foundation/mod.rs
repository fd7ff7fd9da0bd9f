//! Foundation module - Shared domain primitives.
//!
//! Contains value objects and enums that form the vocabulary of every
//! extracted record.

mod confidence;
mod provenance;
mod timestamp;

pub use confidence::Confidence;
pub use provenance::{DataType, Sourced};
pub use timestamp::Timestamp;
