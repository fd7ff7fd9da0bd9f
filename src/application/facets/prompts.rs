//! Prompt text for each facet.
//!
//! Every prompt embeds the exact JSON shape the mapper reads back, so the
//! shapes here and the record types in `domain::founder` must change together.

use crate::domain::founder::{Facet, ResponseShape};

const SOURCED_FIELDS: &str = r#""source": "exact quote from transcript",
      "confidence": number between 0 and 1,
      "data_type": "FACTUAL|SPECULATIVE|INFERRED""#;

const EMPTY_ARRAY_GUIDANCE: &str = "Return an empty array if nothing is found";

const EMPTY_OBJECT_GUIDANCE: &str =
    "Always return the object; leave its lists empty if nothing is found";

const QUOTE_GUIDANCE: &str = "Use exact quotes from the transcript as sources where possible";

/// First `max_chars` characters of `chunk`, cut on a character boundary.
pub fn excerpt(chunk: &str, max_chars: usize) -> &str {
    chunk
        .char_indices()
        .nth(max_chars)
        .map(|(idx, _)| &chunk[..idx])
        .unwrap_or(chunk)
}

/// Prompt asking for `facet` from `text`.
///
/// For [`Facet::BasicInfo`] the caller passes an excerpt, not the whole chunk.
pub fn prompt(facet: Facet, text: &str) -> String {
    match facet {
        Facet::BasicInfo => format!(
            "Analyze this transcript excerpt and extract basic information about the founder.\n\
             Return a JSON object in this exact format:\n\
             {{\n  \"name\": \"string\",\n  \"domain\": [\"string\"],\n  \
             \"financial_background\": \"string or null\",\n  \
             \"era\": {{\"start\": \"YYYY\", \"end\": \"YYYY or null\"}}\n}}\n\n\
             - If an item is not found, return null or an empty list as appropriate\n\
             - If the era end date is unknown, set it to null\n\n\
             Transcript excerpt: {}...",
            text
        ),
        _ => render(facet, text),
    }
}

fn render(facet: Facet, text: &str) -> String {
    let (task, item, extra) = template_for(facet);
    let key = facet.response_key().unwrap_or_default();

    let (body, empty) = match facet.shape() {
        ResponseShape::Object => (
            format!("{{\n  \"{}\": {{\n{},\n      {}\n  }}\n}}", key, item, SOURCED_FIELDS),
            EMPTY_OBJECT_GUIDANCE,
        ),
        ResponseShape::Array | ResponseShape::Root => (
            format!(
                "{{\n  \"{}\": [\n    {{\n{},\n      {}\n    }}\n  ]\n}}",
                key, item, SOURCED_FIELDS
            ),
            EMPTY_ARRAY_GUIDANCE,
        ),
    };

    let guidance: String = [empty, QUOTE_GUIDANCE]
        .iter()
        .chain(extra.iter())
        .map(|line| format!("- {}\n", line))
        .collect();

    format!(
        "Analyze this transcript and {}.\nReturn a JSON object in this exact format:\n{}\n\n{}\nTranscript: {}",
        task, body, guidance, text
    )
}

/// Task sentence, facet-specific record fields and extra guidance.
fn template_for(facet: Facet) -> (&'static str, &'static str, &'static [&'static str]) {
    match facet {
        Facet::Timeline => (
            "extract key events in chronological order",
            r#"      "date": "YYYY or YYYY-MM or YYYY-MM-DD",
      "event_type": "FOUNDING|PIVOT|CRISIS|SUCCESS|OTHER",
      "description": "string",
      "emotional_context": "string or null",
      "trait_changes": [{"trait": "string", "change": "string"}],
      "alternative_paths": ["string"],
      "external_triggers": ["string"]"#,
            &[
                "Focus on major events that shaped the founder's journey",
                "trait_changes is always an array of objects with trait and change fields",
            ],
        ),
        Facet::Traits => (
            "extract the founder's personality traits and skills",
            r#"      "trait": "string",
      "category": "TRAIT|SKILL",
      "origin": "INNATE|DEVELOPED",
      "description": "string",
      "examples": [{"description": "string", "source": "quote"}],
      "evolution": [{"period": "string", "change": "string", "trigger": "string or null"}],
      "blind_spots": [{"description": "string", "overcome_strategy": "string or null", "source": "quote", "confidence": 0.8, "data_type": "FACTUAL"}]"#,
            &[],
        ),
        Facet::Beliefs => (
            "extract the founder's core beliefs",
            r#"      "belief": "string",
      "rationale": "string or null""#,
            &[],
        ),
        Facet::Philosophies => (
            "extract the founder's guiding philosophies and principles",
            r#"      "principle": "string",
      "quotes": [{"quote": "string", "source": "string", "context": "string or null"}],
      "contradictions": [{"description": "string", "timeline_ref": "string or null"}]"#,
            &["Note where the founder acted against a stated principle"],
        ),
        Facet::Failures => (
            "extract the founder's failures and setbacks",
            r#"      "event": "string",
      "date": "YYYY or YYYY-MM-DD",
      "description": "string",
      "lessons_learned": ["string"]"#,
            &[],
        ),
        Facet::KeyDecisions => (
            "extract the key decisions the founder made",
            r#"      "decision": "string",
      "date": "YYYY or YYYY-MM-DD",
      "context": "string",
      "impact": "string",
      "reasoning": "string or null""#,
            &[],
        ),
        Facet::Connections => (
            "extract the founder's mentors and important relationships",
            r#"      "name": "string",
      "relationship": "string",
      "impact": "string",
      "period": "string or null""#,
            &[],
        ),
        Facet::Habits => (
            "extract the founder's habits and routines",
            r#"      "habit": "string",
      "description": "string",
      "impact": "string or null""#,
            &[],
        ),
        Facet::Approaches => (
            "extract approaches to work or problems that are unique to the founder",
            r#"      "approach_name": "string",
      "description": "string""#,
            &[],
        ),
        Facet::Anecdotes => (
            "extract memorable stories told about the founder",
            r#"      "title": "string",
      "narrative": "string",
      "moral": "string or null",
      "timeline_ref": "string or null""#,
            &[],
        ),
        Facet::EmotionalIntelligence => (
            "extract how the founder manages stress and leads people",
            r#"    "stress_management": [{"strategy": "string", "context": "string", "effectiveness": "string or null"}],
    "leadership_style": [{"trait": "string", "description": "string", "examples": ["string"]}]"#,
            &["Include effectiveness when it is mentioned"],
        ),
        Facet::BasicInfo => ("extract basic information about the founder", "", &[]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_keyed_facet_prompt_names_its_response_key() {
        for facet in Facet::CONCURRENT.into_iter().chain([Facet::Timeline]) {
            let key = facet.response_key().unwrap();
            let text = prompt(facet, "TRANSCRIPT BODY");
            assert!(text.contains(&format!("\"{}\":", key)), "{}", facet);
            assert!(text.ends_with("Transcript: TRANSCRIPT BODY"), "{}", facet);
            assert!(text.contains("\"data_type\""), "{}", facet);
        }
    }

    #[test]
    fn emotional_intelligence_asks_for_an_object() {
        let text = prompt(Facet::EmotionalIntelligence, "x");
        assert!(text.contains("\"emotional_intelligence\": {"));
        assert!(!text.contains("\"emotional_intelligence\": ["));
    }

    #[test]
    fn emotional_intelligence_never_invites_an_empty_array() {
        let text = prompt(Facet::EmotionalIntelligence, "x");
        assert!(!text.contains("empty array"));
        assert!(text.contains("- Always return the object; leave its lists empty"));
    }

    #[test]
    fn array_facets_invite_an_empty_array() {
        for facet in Facet::CONCURRENT.into_iter().chain([Facet::Timeline]) {
            if facet.shape() == ResponseShape::Array {
                assert!(prompt(facet, "x").contains("- Return an empty array if nothing is found"), "{}", facet);
            }
        }
    }

    #[test]
    fn array_facets_ask_for_arrays() {
        assert!(prompt(Facet::Habits, "x").contains("\"habits\": ["));
        assert!(prompt(Facet::Timeline, "x").contains("FOUNDING|PIVOT|CRISIS|SUCCESS|OTHER"));
    }

    #[test]
    fn basic_info_prompt_uses_given_excerpt() {
        let text = prompt(Facet::BasicInfo, "short excerpt");
        assert!(text.contains("\"financial_background\""));
        assert!(text.ends_with("Transcript excerpt: short excerpt..."));
    }

    #[test]
    fn excerpt_cuts_on_character_boundary() {
        assert_eq!(excerpt("héllo world", 5), "héllo");
        assert_eq!(excerpt("abc", 10), "abc");
        assert_eq!(excerpt("abc", 0), "");
    }
}
