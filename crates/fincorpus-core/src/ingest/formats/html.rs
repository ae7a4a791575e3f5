use std::path::Path;

use crate::ingest::extractor::{
    decode_utf8_ignoring_invalid, DocumentFormat, ExtractResult, Extractor, RawUnits,
};
use crate::ingest::markup;

/// Visible text of the page, words separated by single spaces
pub struct HtmlExtractor;

impl Extractor for HtmlExtractor {
    fn supported_formats(&self) -> &[DocumentFormat] {
        &[DocumentFormat::Html]
    }

    fn extract(&self, path: &Path) -> ExtractResult<RawUnits> {
        let bytes = std::fs::read(path)?;
        let html = decode_utf8_ignoring_invalid(&bytes);
        let text = markup::visible_text(&html)
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ");
        if text.is_empty() {
            return Ok(Box::new(std::iter::empty()));
        }
        Ok(Box::new(std::iter::once(Ok(text))))
    }
}
