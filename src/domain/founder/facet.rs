//! Facet enumeration - the independently extracted categories of a profile.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One independently extracted category of information about the subject.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Facet {
    BasicInfo,
    Timeline,
    Traits,
    Beliefs,
    Philosophies,
    Failures,
    KeyDecisions,
    Connections,
    Habits,
    Approaches,
    Anecdotes,
    EmotionalIntelligence,
}

/// Expected JSON type under a facet's response key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseShape {
    /// The whole response object is the record.
    Root,
    /// A JSON array of records under the key.
    Array,
    /// A single JSON object under the key.
    Object,
}

impl fmt::Display for ResponseShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ResponseShape::Root => "root object",
            ResponseShape::Array => "array",
            ResponseShape::Object => "object",
        };
        write!(f, "{}", s)
    }
}

impl Facet {
    /// Facets extracted concurrently against the whole transcript, in the
    /// order they appear in the aggregate.
    pub const CONCURRENT: [Facet; 10] = [
        Facet::Traits,
        Facet::Beliefs,
        Facet::Philosophies,
        Facet::Failures,
        Facet::KeyDecisions,
        Facet::Connections,
        Facet::Habits,
        Facet::Approaches,
        Facet::Anecdotes,
        Facet::EmotionalIntelligence,
    ];

    /// Top-level key the response must carry, if any.
    pub fn response_key(&self) -> Option<&'static str> {
        match self {
            Facet::BasicInfo => None,
            Facet::Timeline => Some("events"),
            Facet::Traits => Some("traits"),
            Facet::Beliefs => Some("beliefs"),
            Facet::Philosophies => Some("philosophies"),
            Facet::Failures => Some("failures"),
            Facet::KeyDecisions => Some("key_decisions"),
            Facet::Connections => Some("connections"),
            Facet::Habits => Some("habits"),
            Facet::Approaches => Some("approaches"),
            Facet::Anecdotes => Some("anecdotes"),
            Facet::EmotionalIntelligence => Some("emotional_intelligence"),
        }
    }

    /// JSON shape found under [`Facet::response_key`].
    pub fn shape(&self) -> ResponseShape {
        match self {
            Facet::BasicInfo => ResponseShape::Root,
            Facet::EmotionalIntelligence => ResponseShape::Object,
            _ => ResponseShape::Array,
        }
    }

    /// Stable snake_case name used in logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Facet::BasicInfo => "basic_info",
            Facet::Timeline => "timeline",
            Facet::Traits => "traits",
            Facet::Beliefs => "beliefs",
            Facet::Philosophies => "philosophies",
            Facet::Failures => "failures",
            Facet::KeyDecisions => "key_decisions",
            Facet::Connections => "connections",
            Facet::Habits => "habits",
            Facet::Approaches => "approaches",
            Facet::Anecdotes => "anecdotes",
            Facet::EmotionalIntelligence => "emotional_intelligence",
        }
    }
}

impl fmt::Display for Facet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
