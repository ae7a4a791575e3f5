use std::path::Path;

use crate::ingest::extractor::{
    decode_utf8_ignoring_invalid, DocumentFormat, ExtractResult, Extractor, RawUnits,
};

/// Whole file as a single unit
pub struct TextExtractor;

impl Extractor for TextExtractor {
    fn supported_formats(&self) -> &[DocumentFormat] {
        &[DocumentFormat::PlainText]
    }

    fn extract(&self, path: &Path) -> ExtractResult<RawUnits> {
        let bytes = std::fs::read(path)?;
        let content = decode_utf8_ignoring_invalid(&bytes);
        let content = content.trim();
        if content.is_empty() {
            return Ok(Box::new(std::iter::empty()));
        }
        Ok(Box::new(std::iter::once(Ok(content.to_string()))))
    }
}
