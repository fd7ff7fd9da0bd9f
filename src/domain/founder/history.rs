//! Narrative facets: failures, key decisions, connections and anecdotes.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{Confidence, DataType};

/// A significant setback and what it taught.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Failure {
    pub event: String,
    pub date: String,
    pub description: String,
    #[serde(default)]
    pub lessons_learned: Vec<String>,
    pub source: String,
    pub confidence: Confidence,
    pub data_type: DataType,
}

/// A decision with lasting consequences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyDecision {
    pub decision: String,
    pub date: String,
    pub context: String,
    pub impact: String,
    #[serde(default)]
    pub reasoning: Option<String>,
    pub source: String,
    pub confidence: Confidence,
    pub data_type: DataType,
}

/// A mentor, partner or other influential relationship.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Connection {
    pub name: String,
    pub relationship: String,
    pub impact: String,
    #[serde(default)]
    pub period: Option<String>,
    pub source: String,
    pub confidence: Confidence,
    pub data_type: DataType,
}

/// A story told about the founder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Anecdote {
    pub title: String,
    pub narrative: String,
    #[serde(default)]
    pub moral: Option<String>,
    #[serde(default)]
    pub timeline_ref: Option<String>,
    pub source: String,
    pub confidence: Confidence,
    pub data_type: DataType,
}

crate::sourced!(Failure, KeyDecision, Connection, Anecdote);

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn failure_defaults_lessons() {
        let failure: Failure = serde_json::from_value(json!({
            "event": "Launch failure",
            "date": "2006-2008",
            "description": "Three rockets failed",
            "source": "the first three launches failed",
            "confidence": 0.95,
            "data_type": "FACTUAL"
        }))
        .unwrap();

        assert!(failure.lessons_learned.is_empty());
        assert_eq!(failure.date, "2006-2008");
    }

    #[test]
    fn key_decision_requires_impact() {
        let result = serde_json::from_value::<KeyDecision>(json!({
            "decision": "Build rockets",
            "date": "2002",
            "context": "After selling a company",
            "source": "",
            "confidence": 0.9,
            "data_type": "FACTUAL"
        }));
        assert!(result.is_err());
    }

    #[test]
    fn connection_period_is_optional() {
        let connection: Connection = serde_json::from_value(json!({
            "name": "A Mentor",
            "relationship": "Advisor",
            "impact": "Shaped strategy",
            "period": null,
            "source": "he advised us",
            "confidence": 0.7,
            "data_type": "SPECULATIVE"
        }))
        .unwrap();

        assert!(connection.period.is_none());
        assert_eq!(connection.data_type, DataType::Speculative);
    }

    #[test]
    fn anecdote_round_trips() {
        let anecdote = Anecdote {
            title: "Factory floor".to_string(),
            narrative: "Slept on the floor during the crunch".to_string(),
            moral: Some("Lead from the front".to_string()),
            timeline_ref: None,
            source: "I slept on the factory floor".to_string(),
            confidence: Confidence::new(0.9),
            data_type: DataType::Factual,
        };
        let value = serde_json::to_value(&anecdote).unwrap();
        assert_eq!(value["timeline_ref"], serde_json::Value::Null);
        let back: Anecdote = serde_json::from_value(value).unwrap();
        assert_eq!(back, anecdote);
    }
}
