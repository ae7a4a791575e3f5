use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use super::formats::{CsvExtractor, HtmlExtractor, JsonExtractor, PdfExtractor, TextExtractor};

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error in {}: {source}", path.display())]
    Csv { path: PathBuf, source: csv::Error },
    #[error("JSON error in {}: {source}", path.display())]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}

pub type ExtractResult<T> = Result<T, ExtractError>;

/// Lazy stream of raw text units pulled from one file
pub type RawUnits = Box<dyn Iterator<Item = ExtractResult<String>>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentFormat {
    PlainText,
    Html,
    Csv,
    Json,
    Pdf,
}

impl DocumentFormat {
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "txt" => Some(Self::PlainText),
            "html" | "htm" => Some(Self::Html),
            "csv" => Some(Self::Csv),
            "json" | "jsonl" => Some(Self::Json),
            "pdf" => Some(Self::Pdf),
            _ => None,
        }
    }

    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|e| e.to_str())
            .and_then(Self::from_extension)
    }
}

/// Pulls raw text units out of files of the formats it supports. Every call
/// reopens the file, so a stream can be restarted by calling again.
pub trait Extractor: Send + Sync {
    fn supported_formats(&self) -> &[DocumentFormat];

    fn can_extract(&self, format: DocumentFormat) -> bool {
        self.supported_formats().contains(&format)
    }

    fn extract(&self, path: &Path) -> ExtractResult<RawUnits>;
}

/// Ordered format → extractor table; the first registered extractor that
/// handles a format wins.
pub struct ExtractorRegistry {
    extractors: Vec<Box<dyn Extractor>>,
}

impl ExtractorRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self {
            extractors: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_extractor(mut self, extractor: Box<dyn Extractor>) -> Self {
        self.extractors.push(extractor);
        self
    }

    pub fn register(&mut self, extractor: Box<dyn Extractor>) {
        self.extractors.push(extractor);
    }

    pub fn find(&self, format: DocumentFormat) -> Option<&dyn Extractor> {
        self.extractors
            .iter()
            .find(|e| e.can_extract(format))
            .map(AsRef::as_ref)
    }

    pub fn for_path(&self, path: &Path) -> Option<&dyn Extractor> {
        DocumentFormat::from_path(path).and_then(|format| self.find(format))
    }

    pub fn extract(&self, path: &Path) -> ExtractResult<RawUnits> {
        let extractor = self.for_path(path).ok_or_else(|| {
            ExtractError::UnsupportedFormat(path.display().to_string())
        })?;
        extractor.extract(path)
    }
}

impl Default for ExtractorRegistry {
    fn default() -> Self {
        Self::new()
            .with_extractor(Box::new(TextExtractor))
            .with_extractor(Box::new(HtmlExtractor))
            .with_extractor(Box::new(CsvExtractor::default()))
            .with_extractor(Box::new(JsonExtractor::default()))
            .with_extractor(Box::new(PdfExtractor))
    }
}

/// Decode UTF-8, silently dropping invalid byte sequences.
pub(crate) fn decode_utf8_ignoring_invalid(bytes: &[u8]) -> String {
    bytes.utf8_chunks().map(|chunk| chunk.valid()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_from_extension() {
        assert_eq!(DocumentFormat::from_extension("PDF"), Some(DocumentFormat::Pdf));
        assert_eq!(DocumentFormat::from_extension("jsonl"), Some(DocumentFormat::Json));
        assert_eq!(DocumentFormat::from_extension("htm"), Some(DocumentFormat::Html));
        assert_eq!(DocumentFormat::from_extension("docx"), None);
    }

    #[test]
    fn format_from_path() {
        assert_eq!(
            DocumentFormat::from_path(Path::new("raw/Report.TXT")),
            Some(DocumentFormat::PlainText)
        );
        assert_eq!(DocumentFormat::from_path(Path::new("raw/README")), None);
    }

    #[test]
    fn default_registry_covers_every_format() {
        let registry = ExtractorRegistry::default();
        for format in [
            DocumentFormat::PlainText,
            DocumentFormat::Html,
            DocumentFormat::Csv,
            DocumentFormat::Json,
            DocumentFormat::Pdf,
        ] {
            assert!(registry.find(format).is_some(), "{format:?}");
        }
    }

    #[test]
    fn empty_registry_rejects_files() {
        let registry = ExtractorRegistry::new();
        assert!(matches!(
            registry.extract(Path::new("notes.txt")),
            Err(ExtractError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn invalid_utf8_is_dropped() {
        assert_eq!(decode_utf8_ignoring_invalid(b"ne\xfft"), "net");
    }
}
