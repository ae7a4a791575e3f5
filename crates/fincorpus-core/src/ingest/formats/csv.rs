use std::path::Path;

use crate::ingest::extractor::{DocumentFormat, ExtractError, ExtractResult, Extractor, RawUnits};

/// Header substrings (case-insensitive) marking a column as text-bearing
pub const TEXT_COLUMN_KEYWORDS: [&str; 5] = ["text", "sentence", "content", "body", "headline"];

/// Cell values treated as missing, in addition to blank cells
const MISSING_MARKERS: [&str; 18] = [
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN", "<NA>",
    "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Yields every non-empty cell of the text-bearing columns, column by
/// column. Falls back to the first column when no header matches.
#[derive(Debug, Clone)]
pub struct CsvExtractor {
    keywords: Vec<String>,
}

impl CsvExtractor {
    #[must_use]
    pub fn new(keywords: Vec<String>) -> Self {
        Self {
            keywords: keywords.into_iter().map(|k| k.to_lowercase()).collect(),
        }
    }

    fn text_columns(&self, headers: &csv::StringRecord) -> Vec<usize> {
        let matched: Vec<usize> = headers
            .iter()
            .enumerate()
            .filter(|(_, name)| {
                let name = name.to_lowercase();
                self.keywords.iter().any(|k| name.contains(k.as_str()))
            })
            .map(|(i, _)| i)
            .collect();

        if matched.is_empty() && !headers.is_empty() {
            vec![0]
        } else {
            matched
        }
    }

    fn read_units(&self, content: &str) -> Result<Vec<String>, csv::Error> {
        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .from_reader(content.as_bytes());
        let headers = reader.headers()?.clone();
        let columns = self.text_columns(&headers);
        let mut cells: Vec<Vec<String>> = vec![Vec::new(); columns.len()];

        for (row, record) in reader.records().enumerate() {
            let record = match record {
                Ok(record) => record,
                Err(e) => {
                    tracing::warn!("Skipping unreadable CSV row {}: {}", row + 2, e);
                    continue;
                }
            };
            if record.len() > headers.len() {
                tracing::debug!(
                    "Skipping CSV row {} with {} fields (header has {})",
                    row + 2,
                    record.len(),
                    headers.len()
                );
                continue;
            }
            for (slot, &column) in columns.iter().enumerate() {
                if let Some(value) = record.get(column).and_then(present_value) {
                    cells[slot].push(value.to_string());
                }
            }
        }

        Ok(cells.into_iter().flatten().collect())
    }
}

impl Default for CsvExtractor {
    fn default() -> Self {
        Self::new(TEXT_COLUMN_KEYWORDS.iter().map(|k| (*k).to_string()).collect())
    }
}

impl Extractor for CsvExtractor {
    fn supported_formats(&self) -> &[DocumentFormat] {
        &[DocumentFormat::Csv]
    }

    fn extract(&self, path: &Path) -> ExtractResult<RawUnits> {
        let bytes = std::fs::read(path)?;
        let content = decode_with_fallback(&bytes, path);
        let units = self
            .read_units(&content)
            .map_err(|source| ExtractError::Csv {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(Box::new(units.into_iter().map(Ok)))
    }
}

fn present_value(raw: &str) -> Option<&str> {
    if MISSING_MARKERS.contains(&raw) {
        return None;
    }
    let value = raw.trim();
    (!value.is_empty()).then_some(value)
}

/// UTF-8 first (BOM stripped), ISO-8859-1 when the bytes are not valid UTF-8.
fn decode_with_fallback(bytes: &[u8], path: &Path) -> String {
    match std::str::from_utf8(bytes) {
        Ok(text) => text.strip_prefix('\u{feff}').unwrap_or(text).to_string(),
        Err(_) => {
            tracing::debug!("{} is not UTF-8, decoding as ISO-8859-1", path.display());
            bytes.iter().copied().map(char::from).collect()
        }
    }
}
