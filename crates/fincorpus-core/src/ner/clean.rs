use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use super::schema::{LabelSchema, OUTSIDE};

/// Why an annotation record was dropped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum Rejection {
    #[error("tokens or labels missing")]
    MissingFields,
    #[error("tokens or labels empty")]
    Empty,
    #[error("token/label count mismatch")]
    LengthMismatch,
    #[error("no tokens left after cleaning")]
    NoTokens,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanedRecord {
    pub tokens: Vec<String>,
    /// Schema tags after coercion, aligned with `tokens`
    pub labels: Vec<String>,
    pub ner_tags: Vec<u32>,
    pub has_entity: bool,
}

/// One line of a split file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitRecord {
    pub tokens: Vec<String>,
    pub ner_tags: Vec<u32>,
}

impl From<CleanedRecord> for SplitRecord {
    fn from(record: CleanedRecord) -> Self {
        Self {
            tokens: record.tokens,
            ner_tags: record.ner_tags,
        }
    }
}

/// Validate a `{"tokens": [...], "labels": [...]}` record and map its labels
/// to ids.
///
/// Pairs whose token is not a string or is blank are dropped. Labels are
/// trimmed; non-string or unknown labels become `O`.
pub fn clean(record: &Value, schema: &LabelSchema) -> Result<CleanedRecord, Rejection> {
    let (Some(tokens), Some(labels)) = (
        record.get("tokens").and_then(Value::as_array),
        record.get("labels").and_then(Value::as_array),
    ) else {
        return Err(Rejection::MissingFields);
    };
    if tokens.is_empty() || labels.is_empty() {
        return Err(Rejection::Empty);
    }
    if tokens.len() != labels.len() {
        return Err(Rejection::LengthMismatch);
    }

    let mut cleaned = CleanedRecord {
        tokens: Vec::with_capacity(tokens.len()),
        labels: Vec::with_capacity(tokens.len()),
        ner_tags: Vec::with_capacity(tokens.len()),
        has_entity: false,
    };

    for (token, label) in tokens.iter().zip(labels) {
        let Some(token) = token.as_str().map(str::trim) else {
            continue;
        };
        if token.is_empty() {
            continue;
        }

        let label = label
            .as_str()
            .map(str::trim)
            .filter(|l| schema.contains(l))
            .unwrap_or(OUTSIDE);
        let id = schema.id(label).unwrap_or(0);

        cleaned.tokens.push(token.to_string());
        cleaned.labels.push(label.to_string());
        cleaned.ner_tags.push(id);
        cleaned.has_entity |= label != OUTSIDE;
    }

    if cleaned.tokens.is_empty() {
        return Err(Rejection::NoTokens);
    }
    Ok(cleaned)
}
