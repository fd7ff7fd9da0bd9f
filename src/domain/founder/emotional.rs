//! Emotional intelligence - the one singleton facet of a profile.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{Confidence, DataType};

/// How the founder copes with pressure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StressStrategy {
    pub strategy: String,
    pub context: String,
    #[serde(default)]
    pub effectiveness: Option<String>,
}

/// An aspect of the founder's leadership.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeadershipTrait {
    #[serde(rename = "trait")]
    pub trait_name: String,
    pub description: String,
    #[serde(default)]
    pub examples: Vec<String>,
}

/// Stress management and leadership style.
///
/// `Default` is the empty-but-valid instance substituted when extraction of
/// this facet produces nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmotionalIntelligence {
    #[serde(default)]
    pub stress_management: Vec<StressStrategy>,
    #[serde(default)]
    pub leadership_style: Vec<LeadershipTrait>,
    pub source: String,
    pub confidence: Confidence,
    pub data_type: DataType,
}

crate::sourced!(EmotionalIntelligence);

impl EmotionalIntelligence {
    /// True when nothing was extracted.
    pub fn is_empty(&self) -> bool {
        self.stress_management.is_empty() && self.leadership_style.is_empty()
    }
}
