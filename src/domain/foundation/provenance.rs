//! Provenance vocabulary shared by every sourced record.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::Confidence;

/// How a claim relates to the transcript.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DataType {
    /// Stated directly in the transcript.
    #[default]
    Factual,
    /// A guess the model could not confirm.
    Speculative,
    /// Derived from surrounding statements.
    Inferred,
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DataType::Factual => "FACTUAL",
            DataType::Speculative => "SPECULATIVE",
            DataType::Inferred => "INFERRED",
        };
        write!(f, "{}", s)
    }
}

/// A record carrying a supporting quote, a confidence score and a
/// factual/speculative/inferred classification.
pub trait Sourced {
    /// Verbatim supporting quote, or an empty string.
    fn source(&self) -> &str;

    /// Model-reported confidence.
    fn confidence(&self) -> Confidence;

    /// Classification of the claim.
    fn data_type(&self) -> DataType;
}

/// Implements [`Sourced`] for structs with `source`, `confidence` and
/// `data_type` fields.
#[macro_export]
macro_rules! sourced {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl $crate::domain::foundation::Sourced for $ty {
                fn source(&self) -> &str {
                    &self.source
                }

                fn confidence(&self) -> $crate::domain::foundation::Confidence {
                    self.confidence
                }

                fn data_type(&self) -> $crate::domain::foundation::DataType {
                    self.data_type
                }
            }
        )+
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_type_uses_upper_case_names() {
        assert_eq!(
            serde_json::to_string(&DataType::Speculative).unwrap(),
            "\"SPECULATIVE\""
        );
        let parsed: DataType = serde_json::from_str("\"INFERRED\"").unwrap();
        assert_eq!(parsed, DataType::Inferred);
    }

    #[test]
    fn data_type_lookup_is_case_sensitive() {
        assert!(serde_json::from_str::<DataType>("\"factual\"").is_err());
        assert!(serde_json::from_str::<DataType>("\"Factual\"").is_err());
    }

    #[test]
    fn data_type_defaults_to_factual() {
        assert_eq!(DataType::default(), DataType::Factual);
        assert_eq!(DataType::default().to_string(), "FACTUAL");
    }
}
