mod dedup;
mod extractor;
mod formats;
pub mod markup;
mod normalizer;
mod pipeline;

pub use dedup::Deduplicator;
pub use extractor::{
    DocumentFormat, ExtractError, ExtractResult, Extractor, ExtractorRegistry, RawUnits,
};
pub use formats::{
    CsvExtractor, HtmlExtractor, JsonExtractor, PdfExtractor, TextExtractor,
    TEXT_COLUMN_KEYWORDS, TEXT_KEYS,
};
pub use normalizer::{fingerprint, is_printable, normalize, FINGERPRINT_LEN};
pub use pipeline::{BuildStats, CorpusBuilder, CorpusRecord};
