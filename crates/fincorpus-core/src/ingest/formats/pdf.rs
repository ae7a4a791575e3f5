use std::path::Path;

use crate::ingest::extractor::{DocumentFormat, ExtractResult, Extractor, RawUnits};

/// One unit per page. `lopdf` reads page by page; when it cannot open the
/// document or no page yields text, `pdf-extract` is tried on the whole file.
/// Failures of both backends are logged and end the file without an error.
pub struct PdfExtractor;

impl Extractor for PdfExtractor {
    fn supported_formats(&self) -> &[DocumentFormat] {
        &[DocumentFormat::Pdf]
    }

    fn extract(&self, path: &Path) -> ExtractResult<RawUnits> {
        let pages = match extract_with_lopdf(path) {
            Ok(pages) => pages,
            Err(reason) => {
                tracing::warn!("lopdf failed for {}: {}", path.display(), reason);
                extract_with_pdf_extract(path).unwrap_or_else(|reason| {
                    tracing::error!("PDF fallback failed for {}: {}", path.display(), reason);
                    Vec::new()
                })
            }
        };
        Ok(Box::new(pages.into_iter().map(Ok)))
    }
}

fn extract_with_lopdf(path: &Path) -> Result<Vec<String>, String> {
    let document = lopdf::Document::load(path).map_err(|e| e.to_string())?;
    if document.is_encrypted() {
        return Err("document is encrypted".to_string());
    }

    let page_numbers: Vec<u32> = document.get_pages().keys().copied().collect();
    let mut pages = Vec::with_capacity(page_numbers.len());
    let mut failures = 0usize;

    for number in &page_numbers {
        match document.extract_text(&[*number]) {
            Ok(text) => push_page(&mut pages, &text),
            Err(e) => {
                failures += 1;
                tracing::debug!("page {} of {}: {}", number, path.display(), e);
            }
        }
    }

    if !page_numbers.is_empty() && failures == page_numbers.len() {
        return Err(format!("no readable pages out of {}", page_numbers.len()));
    }
    Ok(pages)
}

fn extract_with_pdf_extract(path: &Path) -> Result<Vec<String>, String> {
    let bytes = std::fs::read(path).map_err(|e| e.to_string())?;
    // pdf-extract panics on some malformed inputs instead of returning Err
    let text = std::panic::catch_unwind(|| pdf_extract::extract_text_from_mem(&bytes))
        .map_err(|_| "extractor panicked".to_string())?
        .map_err(|e| e.to_string())?;

    let mut pages = Vec::new();
    for page in text.split('\u{000C}') {
        push_page(&mut pages, page);
    }
    Ok(pages)
}

fn push_page(pages: &mut Vec<String>, text: &str) {
    let text = text.trim();
    if !text.is_empty() {
        pages.push(text.to_string());
    }
}
