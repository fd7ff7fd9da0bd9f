//! Confidence score attached to every sourced record.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Model-reported confidence, contractually within 0.0-1.0.
///
/// The range is not enforced at construction: values are carried exactly as
/// the model returned them. Use [`Confidence::is_within_contract`] to check.
///
/// Equality, ordering and hashing are bitwise-total so that records holding a
/// confidence can participate in set semantics.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Confidence(f64);

impl Confidence {
    /// Zero confidence.
    pub const ZERO: Self = Self(0.0);

    /// Wraps a raw score.
    pub fn new(value: f64) -> Self {
        Self(value)
    }

    /// Returns the raw score.
    pub fn value(&self) -> f64 {
        self.0
    }

    /// True when the score lies in the inclusive 0.0-1.0 range.
    pub fn is_within_contract(&self) -> bool {
        (0.0..=1.0).contains(&self.0)
    }
}

impl PartialEq for Confidence {
    fn eq(&self, other: &Self) -> bool {
        self.0.to_bits() == other.0.to_bits()
    }
}

impl Eq for Confidence {}

impl PartialOrd for Confidence {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Confidence {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl Hash for Confidence {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.to_bits().hash(state);
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}
