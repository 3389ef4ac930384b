//! Field validator/merger: turns raw extractor text into a complete field
//! record by overlaying parsed keys on the type's sentinel template.
//!
//! Parse order: the whole response as JSON, then every fenced ```json
//! block (multi-page responses produce one block per page; later blocks
//! override earlier ones). Unparseable text is a soft outcome, never an
//! error.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::models::enums::DocumentType;
use crate::models::fields::FieldSet;
use crate::registry::{self, UnknownTypeError};

/// Characters of raw text preserved in the soft-failure excerpt.
const EXCERPT_CHARS: usize = 100;

/// Outcome of merging extractor output against a template.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum MergeOutcome {
    Fields(FieldSet),
    ParseFailed { error: String, excerpt: String },
}

impl MergeOutcome {
    pub fn is_parsed(&self) -> bool {
        matches!(self, MergeOutcome::Fields(_))
    }

    pub fn to_value(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

/// Merge raw extractor text into the field record for `doc_type`.
///
/// The only hard error is an unregistered type; anything wrong with the
/// text itself degrades to `MergeOutcome::ParseFailed`.
pub fn merge(raw_text: &str, doc_type: DocumentType) -> Result<MergeOutcome, UnknownTypeError> {
    // Template lookup first so the type check fires even for empty text.
    registry::template(doc_type)?;

    let parsed = parse_candidate(raw_text);

    let object = match parsed {
        Some(object) => object,
        None => {
            tracing::warn!(
                doc_type = doc_type.as_str(),
                raw_len = raw_text.len(),
                "extractor output not parseable as JSON"
            );
            return Ok(parse_failed(raw_text));
        }
    };

    match FieldSet::from_value(doc_type, Value::Object(object)) {
        Ok(fields) => Ok(MergeOutcome::Fields(fields)),
        Err(e) => {
            tracing::warn!(doc_type = doc_type.as_str(), error = %e, "field record rejected parsed JSON");
            Ok(parse_failed(raw_text))
        }
    }
}

fn parse_failed(raw_text: &str) -> MergeOutcome {
    MergeOutcome::ParseFailed {
        error: "parsing failed".to_string(),
        excerpt: raw_text.chars().take(EXCERPT_CHARS).collect(),
    }
}

/// Extract a JSON object from the raw text: direct parse first, then the
/// union of all fenced blocks.
fn parse_candidate(raw_text: &str) -> Option<Map<String, Value>> {
    if let Ok(Value::Object(object)) = serde_json::from_str::<Value>(raw_text.trim()) {
        return Some(object);
    }

    let mut merged: Option<Map<String, Value>> = None;
    for block in fenced_json_blocks(raw_text) {
        if let Ok(Value::Object(object)) = serde_json::from_str::<Value>(block) {
            let target = merged.get_or_insert_with(Map::new);
            for (key, value) in object {
                target.insert(key, value);
            }
        }
    }
    merged
}

/// All ```json fenced blocks in order of appearance.
fn fenced_json_blocks(text: &str) -> Vec<&str> {
    const OPEN: &str = "```json";
    const CLOSE: &str = "```";

    let mut blocks = Vec::new();
    let mut rest = text;
    while let Some(start) = rest.find(OPEN) {
        let after = &rest[start + OPEN.len()..];
        match after.find(CLOSE) {
            Some(end) => {
                blocks.push(after[..end].trim());
                rest = &after[end + CLOSE.len()..];
            }
            None => break,
        }
    }
    blocks
}
