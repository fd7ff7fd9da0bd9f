//! Founder aggregate - the immutable profile assembled from every facet.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::domain::foundation::Timestamp;

use super::{
    Anecdote, BasicInfo, Belief, Connection, EmotionalIntelligence, Facet, Failure, Habit,
    KeyDecision, Philosophy, TimelineEvent, Trait, UniqueApproach,
};

/// Profile format version written into every aggregate.
pub const PROFILE_VERSION: &str = "0.1";

/// Provenance tag for profiles extracted from a transcript.
pub const TRANSCRIPT_SOURCE: &str = "transcript";

/// Bookkeeping stamped onto the aggregate at assembly time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    pub last_updated: Timestamp,
    pub version: String,
    pub sources: Vec<String>,
}

impl Metadata {
    /// Metadata for a transcript extraction completed at `last_updated`.
    pub fn for_transcript(last_updated: Timestamp) -> Self {
        Self {
            last_updated,
            version: PROFILE_VERSION.to_string(),
            sources: vec![TRANSCRIPT_SOURCE.to_string()],
        }
    }
}

/// The records produced by one concurrently extracted facet.
#[derive(Debug, Clone, PartialEq)]
pub enum FacetRecords {
    Traits(Vec<Trait>),
    Beliefs(Vec<Belief>),
    Philosophies(Vec<Philosophy>),
    Failures(Vec<Failure>),
    KeyDecisions(Vec<KeyDecision>),
    Connections(Vec<Connection>),
    Habits(Vec<Habit>),
    Approaches(Vec<UniqueApproach>),
    Anecdotes(Vec<Anecdote>),
    EmotionalIntelligence(EmotionalIntelligence),
}

impl FacetRecords {
    /// Facet these records belong to.
    pub fn facet(&self) -> Facet {
        match self {
            FacetRecords::Traits(_) => Facet::Traits,
            FacetRecords::Beliefs(_) => Facet::Beliefs,
            FacetRecords::Philosophies(_) => Facet::Philosophies,
            FacetRecords::Failures(_) => Facet::Failures,
            FacetRecords::KeyDecisions(_) => Facet::KeyDecisions,
            FacetRecords::Connections(_) => Facet::Connections,
            FacetRecords::Habits(_) => Facet::Habits,
            FacetRecords::Approaches(_) => Facet::Approaches,
            FacetRecords::Anecdotes(_) => Facet::Anecdotes,
            FacetRecords::EmotionalIntelligence(_) => Facet::EmotionalIntelligence,
        }
    }

    /// Number of records, counting the singleton facet as one.
    pub fn len(&self) -> usize {
        match self {
            FacetRecords::Traits(v) => v.len(),
            FacetRecords::Beliefs(v) => v.len(),
            FacetRecords::Philosophies(v) => v.len(),
            FacetRecords::Failures(v) => v.len(),
            FacetRecords::KeyDecisions(v) => v.len(),
            FacetRecords::Connections(v) => v.len(),
            FacetRecords::Habits(v) => v.len(),
            FacetRecords::Approaches(v) => v.len(),
            FacetRecords::Anecdotes(v) => v.len(),
            FacetRecords::EmotionalIntelligence(_) => 1,
        }
    }

    /// True when a collection facet produced no records.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// The founder profile.
///
/// Constructed once from the collected facet results and never updated in
/// place. Field order in the serialized form is fixed by this struct, not by
/// the order in which facets finished.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Founder {
    basic_info: BasicInfo,
    timeline: Vec<TimelineEvent>,
    traits: Vec<Trait>,
    beliefs: Vec<Belief>,
    philosophies: Vec<Philosophy>,
    failures: Vec<Failure>,
    key_decisions: Vec<KeyDecision>,
    mentors_and_network: Vec<Connection>,
    habits: Vec<Habit>,
    unique_approaches: Vec<UniqueApproach>,
    anecdotes: Vec<Anecdote>,
    emotional_intelligence: EmotionalIntelligence,
    metadata: Metadata,
}

impl Founder {
    /// Assembles the aggregate from collected facet results.
    ///
    /// Collection facets absent from `collected` become empty sequences;
    /// an absent emotional intelligence facet becomes its empty default.
    pub fn assemble(
        basic_info: BasicInfo,
        timeline: Vec<TimelineEvent>,
        mut collected: HashMap<Facet, FacetRecords>,
        last_updated: Timestamp,
    ) -> Self {
        let mut founder = Self {
            basic_info,
            timeline,
            traits: Vec::new(),
            beliefs: Vec::new(),
            philosophies: Vec::new(),
            failures: Vec::new(),
            key_decisions: Vec::new(),
            mentors_and_network: Vec::new(),
            habits: Vec::new(),
            unique_approaches: Vec::new(),
            anecdotes: Vec::new(),
            emotional_intelligence: EmotionalIntelligence::default(),
            metadata: Metadata::for_transcript(last_updated),
        };

        for facet in Facet::CONCURRENT {
            match collected.remove(&facet) {
                Some(FacetRecords::Traits(v)) => founder.traits = v,
                Some(FacetRecords::Beliefs(v)) => founder.beliefs = v,
                Some(FacetRecords::Philosophies(v)) => founder.philosophies = v,
                Some(FacetRecords::Failures(v)) => founder.failures = v,
                Some(FacetRecords::KeyDecisions(v)) => founder.key_decisions = v,
                Some(FacetRecords::Connections(v)) => founder.mentors_and_network = v,
                Some(FacetRecords::Habits(v)) => founder.habits = v,
                Some(FacetRecords::Approaches(v)) => founder.unique_approaches = v,
                Some(FacetRecords::Anecdotes(v)) => founder.anecdotes = v,
                Some(FacetRecords::EmotionalIntelligence(ei)) => {
                    founder.emotional_intelligence = ei
                }
                None => {}
            }
        }

        founder
    }

    pub fn basic_info(&self) -> &BasicInfo {
        &self.basic_info
    }

    pub fn timeline(&self) -> &[TimelineEvent] {
        &self.timeline
    }

    pub fn traits(&self) -> &[Trait] {
        &self.traits
    }

    pub fn beliefs(&self) -> &[Belief] {
        &self.beliefs
    }

    pub fn philosophies(&self) -> &[Philosophy] {
        &self.philosophies
    }

    pub fn failures(&self) -> &[Failure] {
        &self.failures
    }

    pub fn key_decisions(&self) -> &[KeyDecision] {
        &self.key_decisions
    }

    pub fn mentors_and_network(&self) -> &[Connection] {
        &self.mentors_and_network
    }

    pub fn habits(&self) -> &[Habit] {
        &self.habits
    }

    pub fn unique_approaches(&self) -> &[UniqueApproach] {
        &self.unique_approaches
    }

    pub fn anecdotes(&self) -> &[Anecdote] {
        &self.anecdotes
    }

    pub fn emotional_intelligence(&self) -> &EmotionalIntelligence {
        &self.emotional_intelligence
    }

    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    /// Serializes to the JSON tree: enums as names, timestamps as ISO-8601.
    pub fn to_json(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::to_value(self)
    }

    /// Parses a previously serialized profile.
    pub fn from_json(value: serde_json::Value) -> Result<Self, serde_json::Error> {
        serde_json::from_value(value)
    }
}
