#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_precision_loss)]

pub mod augment;
pub mod config;
pub mod error;
pub mod ingest;
pub mod jsonl;
pub mod ner;

pub use augment::{AugmentStats, Augmenter, Lexicon};
pub use config::{AugmentConfig, ConfigError, CorpusConfig, NerConfig, PipelineConfig};
pub use error::{Error, Result};
pub use ingest::{BuildStats, CorpusBuilder, ExtractorRegistry};
pub use ner::{LabelSchema, NerStats};
