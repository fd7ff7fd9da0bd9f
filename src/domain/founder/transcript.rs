//! Input document handed over by the upstream transcription pipeline.

use serde::{Deserialize, Serialize};

/// Separator between paragraphs of a transcript.
pub const PARAGRAPH_SEPARATOR: &str = "\n\n";

/// A cleaned transcript: `{"transcript": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transcript {
    pub transcript: String,
}

impl Transcript {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            transcript: text.into(),
        }
    }

    /// The transcript body.
    pub fn text(&self) -> &str {
        &self.transcript
    }
}
