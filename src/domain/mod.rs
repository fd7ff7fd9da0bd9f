//! Domain layer containing the profile types and pure rules.
//!
//! # Module Organization
//!
//! - `foundation` - Shared primitives (timestamps, confidence, provenance)
//! - `founder` - Facet records, the timeline merge rule and the Founder aggregate

pub mod foundation;
pub mod founder;
