mod csv;
mod html;
mod json;
mod pdf;
mod text;

pub use self::csv::{CsvExtractor, TEXT_COLUMN_KEYWORDS};
pub use html::HtmlExtractor;
pub use json::{JsonExtractor, TEXT_KEYS};
pub use pdf::PdfExtractor;
pub use text::TextExtractor;
