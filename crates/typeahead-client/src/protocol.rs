//! Request and response shapes of the suggestion endpoint.
//!
//! The response is a positional array: `[normalizedQuery, [candidate, ...]]`.
//! Either element may be missing.

use serde::Serialize;
use serde_json::Value;

use typeahead_core::SuggestionSet;

use crate::error::FetchError;

#[derive(Debug, Serialize)]
pub struct AutocompleteRequest {
    pub q: String,
}

impl AutocompleteRequest {
    pub fn new(query: &str) -> Self {
        Self {
            q: query.trim().to_string(),
        }
    }
}

/// Turn a decoded response body into a suggestion set for `query`.
///
/// A missing, null or empty normalized query falls back to `query`; a
/// missing or null candidate list falls back to no candidates. Anything
/// that is not the expected shape is a malformed payload.
pub fn parse_response(query: &str, body: Value) -> Result<SuggestionSet, FetchError> {
    let Value::Array(elements) = body else {
        return Err(FetchError::MalformedPayload(format!(
            "expected a JSON array, got {}",
            kind(&body)
        )));
    };
    let mut elements = elements.into_iter();

    let normalized_query = match elements.next() {
        None | Some(Value::Null) => query.to_string(),
        Some(Value::String(s)) if s.is_empty() => query.to_string(),
        Some(Value::String(s)) => s,
        Some(other) => {
            return Err(FetchError::MalformedPayload(format!(
                "normalized query must be a string, got {}",
                kind(&other)
            )))
        }
    };

    let candidates = match elements.next() {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(items)) => items
            .into_iter()
            .map(|item| match item {
                Value::String(s) => Ok(s),
                other => Err(FetchError::MalformedPayload(format!(
                    "candidate must be a string, got {}",
                    kind(&other)
                ))),
            })
            .collect::<Result<Vec<_>, _>>()?,
        Some(other) => {
            return Err(FetchError::MalformedPayload(format!(
                "candidates must be an array, got {}",
                kind(&other)
            )))
        }
    };

    Ok(SuggestionSet::new(normalized_query, candidates))
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
