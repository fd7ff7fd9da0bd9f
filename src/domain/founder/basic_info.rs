//! Basic identifying information about the founder.

use serde::{Deserialize, Serialize};

/// Active period of the founder's career.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Era {
    /// Start year, `YYYY`.
    pub start: String,
    /// End year, absent while still active or unknown.
    #[serde(default)]
    pub end: Option<String>,
}

/// Who the founder is. Extracted once, from the first chunk only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BasicInfo {
    pub name: String,
    pub domain: Vec<String>,
    #[serde(default)]
    pub financial_background: Option<String>,
    #[serde(default)]
    pub era: Option<Era>,
}
