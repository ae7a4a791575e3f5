use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde_json::{Map, Value};

use crate::ingest::extractor::{
    decode_utf8_ignoring_invalid, DocumentFormat, ExtractError, ExtractResult, Extractor,
    RawUnits,
};

/// Keys searched in priority order for a record's text
pub const TEXT_KEYS: [&str; 4] = ["text", "sentence", "content", "body"];

/// JSON Lines first; when the first line is not a standalone object the
/// whole file is parsed as one document holding an object or a list of them.
#[derive(Debug, Clone)]
pub struct JsonExtractor {
    keys: Arc<[String]>,
}

impl JsonExtractor {
    #[must_use]
    pub fn new(keys: Vec<String>) -> Self {
        Self { keys: keys.into() }
    }
}

impl Default for JsonExtractor {
    fn default() -> Self {
        Self::new(TEXT_KEYS.iter().map(|k| (*k).to_string()).collect())
    }
}

impl Extractor for JsonExtractor {
    fn supported_formats(&self) -> &[DocumentFormat] {
        &[DocumentFormat::Json]
    }

    fn extract(&self, path: &Path) -> ExtractResult<RawUnits> {
        let file = File::open(path)?;
        Ok(Box::new(JsonUnits {
            reader: BufReader::new(file),
            path: path.to_path_buf(),
            keys: Arc::clone(&self.keys),
            line_no: 0,
            first_line_seen: false,
            document: None,
            done: false,
        }))
    }
}

struct JsonUnits {
    reader: BufReader<File>,
    path: PathBuf,
    keys: Arc<[String]>,
    line_no: usize,
    first_line_seen: bool,
    document: Option<std::vec::IntoIter<String>>,
    done: bool,
}

impl JsonUnits {
    fn read_document(&self) -> ExtractResult<Vec<String>> {
        let bytes = std::fs::read(&self.path)?;
        let text = decode_utf8_ignoring_invalid(&bytes);
        let value: Value = serde_json::from_str(&text).map_err(|source| ExtractError::Json {
            path: self.path.clone(),
            source,
        })?;

        let units = match value {
            Value::Array(items) => items
                .iter()
                .filter_map(Value::as_object)
                .filter_map(|obj| first_text(obj, &self.keys))
                .collect(),
            Value::Object(obj) => first_text(&obj, &self.keys).into_iter().collect(),
            _ => Vec::new(),
        };
        Ok(units)
    }
}

impl Iterator for JsonUnits {
    type Item = ExtractResult<String>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut buf = Vec::new();
        loop {
            if let Some(units) = self.document.as_mut() {
                return units.next().map(Ok);
            }
            if self.done {
                return None;
            }

            buf.clear();
            match self.reader.read_until(b'\n', &mut buf) {
                Ok(0) => {
                    self.done = true;
                    return None;
                }
                Ok(_) => self.line_no += 1,
                Err(e) => {
                    self.done = true;
                    return Some(Err(e.into()));
                }
            }

            let line = decode_utf8_ignoring_invalid(&buf);
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            let parsed = serde_json::from_str::<Value>(line);
            let first = !self.first_line_seen;
            self.first_line_seen = true;

            match parsed {
                Ok(Value::Object(obj)) => {
                    if let Some(text) = first_text(&obj, &self.keys) {
                        return Some(Ok(text));
                    }
                }
                _ if first => match self.read_document() {
                    Ok(units) => self.document = Some(units.into_iter()),
                    Err(e) => {
                        self.done = true;
                        return Some(Err(e));
                    }
                },
                _ => {
                    tracing::warn!(
                        "Skipping malformed JSON line {} in {}",
                        self.line_no,
                        self.path.display()
                    );
                }
            }
        }
    }
}

/// First present value among `keys`, stringified and trimmed.
fn first_text(obj: &Map<String, Value>, keys: &[String]) -> Option<String> {
    keys.iter()
        .filter_map(|key| obj.get(key))
        .find_map(value_text)
        .map(|text| text.trim().to_string())
}

fn value_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) if n.as_f64() != Some(0.0) => Some(n.to_string()),
        Value::Bool(true) => Some("true".to_string()),
        Value::Array(items) if !items.is_empty() => Some(value.to_string()),
        Value::Object(obj) if !obj.is_empty() => Some(value.to_string()),
        _ => None,
    }
}
