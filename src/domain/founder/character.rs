//! Character facets: traits, beliefs, philosophies, habits and approaches.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{Confidence, DataType};

/// Whether a characteristic is a disposition or a learned ability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TraitCategory {
    Trait,
    Skill,
}

/// Where a characteristic came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TraitOrigin {
    Innate,
    Developed,
}

/// Concrete illustration of a trait.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Example {
    pub description: String,
    #[serde(default)]
    pub source: Option<String>,
}

/// How a trait changed over a period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraitEvolution {
    pub period: String,
    pub change: String,
    #[serde(default)]
    pub trigger: Option<String>,
}

/// A weakness attached to a trait.
///
/// Unlike top-level records, its provenance fields fall back to defaults when
/// the model omits them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlindSpot {
    pub description: String,
    #[serde(default)]
    pub overcome_strategy: Option<String>,
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub confidence: Confidence,
    #[serde(default)]
    pub data_type: DataType,
}

/// A personality trait or skill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trait {
    #[serde(rename = "trait")]
    pub trait_name: String,
    pub category: TraitCategory,
    pub origin: TraitOrigin,
    pub description: String,
    #[serde(default)]
    pub examples: Vec<Example>,
    #[serde(default)]
    pub evolution: Vec<TraitEvolution>,
    #[serde(default)]
    pub blind_spots: Vec<BlindSpot>,
    pub source: String,
    pub confidence: Confidence,
    pub data_type: DataType,
}

/// A core belief.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Belief {
    pub belief: String,
    #[serde(default)]
    pub rationale: Option<String>,
    pub source: String,
    pub confidence: Confidence,
    pub data_type: DataType,
}

/// A quotation backing a philosophy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    pub quote: String,
    pub source: String,
    #[serde(default)]
    pub context: Option<String>,
}

/// Where behaviour contradicted a stated principle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contradiction {
    pub description: String,
    #[serde(default)]
    pub timeline_ref: Option<String>,
}

/// A guiding principle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Philosophy {
    pub principle: String,
    #[serde(default)]
    pub quotes: Vec<Quote>,
    #[serde(default)]
    pub contradictions: Vec<Contradiction>,
    pub source: String,
    pub confidence: Confidence,
    pub data_type: DataType,
}

/// A recurring routine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Habit {
    pub habit: String,
    pub description: String,
    #[serde(default)]
    pub impact: Option<String>,
    pub source: String,
    pub confidence: Confidence,
    pub data_type: DataType,
}

/// A strategy that set the founder apart from industry norms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UniqueApproach {
    pub approach_name: String,
    pub description: String,
    pub source: String,
    pub confidence: Confidence,
    pub data_type: DataType,
}

crate::sourced!(BlindSpot, Trait, Belief, Philosophy, Habit, UniqueApproach);
