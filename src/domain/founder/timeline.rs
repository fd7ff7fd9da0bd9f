//! Timeline events and the merge rule applied across transcript chunks.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::domain::foundation::{Confidence, DataType};

/// Kind of milestone an event represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventType {
    Founding,
    Pivot,
    Crisis,
    Success,
    Other,
}

/// How a trait shifted around an event.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TraitChange {
    #[serde(rename = "trait")]
    pub trait_name: String,
    pub change: String,
}

/// A dated milestone in the founder's story.
///
/// Equality and hashing cover every field: two events are duplicates only
/// when they match exactly. The derived ordering compares `date` first, as a
/// plain string, so `"1999"` sorts before `"1999-06"` which sorts before
/// `"2000"`. Mixed granularities therefore order only approximately
/// chronologically.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TimelineEvent {
    /// `YYYY`, `YYYY-MM` or `YYYY-MM-DD`, kept as given.
    pub date: String,
    pub event_type: EventType,
    pub description: String,
    #[serde(default)]
    pub emotional_context: Option<String>,
    #[serde(default)]
    pub trait_changes: Vec<TraitChange>,
    #[serde(default)]
    pub alternative_paths: Vec<String>,
    #[serde(default)]
    pub external_triggers: Vec<String>,
    pub source: String,
    pub confidence: Confidence,
    pub data_type: DataType,
}

crate::sourced!(TimelineEvent);

/// Concatenates per-chunk events, drops exact duplicates and orders the
/// result by `date` string.
///
/// Events sharing a date are ordered by their remaining fields, which makes
/// the output independent of chunk and input order.
pub fn merge_timeline<I>(per_chunk: I) -> Vec<TimelineEvent>
where
    I: IntoIterator<Item = Vec<TimelineEvent>>,
{
    let unique: HashSet<TimelineEvent> = per_chunk.into_iter().flatten().collect();
    let mut events: Vec<TimelineEvent> = unique.into_iter().collect();
    events.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.cmp(b)));
    events
}
