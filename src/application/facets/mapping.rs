//! Schema validation and per-record mapping of facet responses.
//!
//! A response is first checked against its facet's top-level shape. A wrong
//! shape is a [`SchemaError`] for the whole facet. Inside an array payload
//! every element is mapped on its own: a malformed element becomes a
//! [`RecordSkip`], is logged, and the remaining elements still map.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::domain::foundation::Sourced;
use crate::domain::founder::{Facet, ResponseShape};

/// Malformed top-level response shape.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemaError {
    #[error("response is not a JSON object")]
    NotAnObject,

    #[error("response has no `{key}` key")]
    MissingKey { key: &'static str },

    #[error("`{key}` should be {expected}")]
    WrongShape {
        key: &'static str,
        expected: ResponseShape,
    },
}

/// One array element that could not be mapped into its record type.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("record {index} skipped: {reason}")]
pub struct RecordSkip {
    pub index: usize,
    pub reason: String,
}

/// Validates `response` against `facet`'s shape and returns its payload:
/// the whole object for root facets, otherwise the value under the key.
pub fn payload(facet: Facet, response: Value) -> Result<Value, SchemaError> {
    let Value::Object(mut object) = response else {
        return Err(SchemaError::NotAnObject);
    };

    let Some(key) = facet.response_key() else {
        return Ok(Value::Object(object));
    };

    let value = object.remove(key).ok_or(SchemaError::MissingKey { key })?;
    let expected = facet.shape();
    let shape_ok = match expected {
        ResponseShape::Array => value.is_array(),
        ResponseShape::Object | ResponseShape::Root => value.is_object(),
    };

    if shape_ok {
        Ok(value)
    } else {
        Err(SchemaError::WrongShape { key, expected })
    }
}

/// Maps one element into `T`.
pub fn map_record<T: DeserializeOwned>(index: usize, value: Value) -> Result<T, RecordSkip> {
    serde_json::from_value(value).map_err(|e| RecordSkip {
        index,
        reason: e.to_string(),
    })
}

/// Maps every element of an array payload, skipping the malformed ones.
///
/// A non-array payload yields no records; [`payload`] rejects that case
/// before this is reached.
pub fn map_records<T>(facet: Facet, payload: Value) -> Vec<T>
where
    T: DeserializeOwned + Sourced,
{
    let Value::Array(items) = payload else {
        return Vec::new();
    };

    let total = items.len();
    let records: Vec<T> = items
        .into_iter()
        .enumerate()
        .filter_map(|(index, item)| match map_record::<T>(index, item) {
            Ok(record) => {
                warn_if_out_of_range(facet, index, &record);
                Some(record)
            }
            Err(skip) => {
                tracing::warn!(facet = facet.as_str(), index = skip.index, reason = %skip.reason, "skipping malformed record");
                None
            }
        })
        .collect();

    if records.len() < total {
        tracing::info!(
            facet = facet.as_str(),
            kept = records.len(),
            skipped = total - records.len(),
            "facet mapped with skips"
        );
    }

    records
}

/// Out-of-range confidence is kept as reported, only flagged.
pub fn warn_if_out_of_range<T: Sourced>(facet: Facet, index: usize, record: &T) {
    let confidence = record.confidence();
    if !confidence.is_within_contract() {
        tracing::warn!(
            facet = facet.as_str(),
            index,
            confidence = confidence.value(),
            "confidence outside 0..=1"
        );
    }
}
