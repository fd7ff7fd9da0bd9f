//! Founder Profiler - structured founder profiles from interview transcripts.
//!
//! A transcript is chunked, sent through a fixed battery of facet prompts to
//! a chat-completion service, and the typed JSON answers are validated,
//! merged and assembled into one immutable [`domain::founder::Founder`].

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
