use std::path::PathBuf;

use thiserror::Error;

use crate::config::ConfigError;
use crate::ingest::ExtractError;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Input not found: {}", .0.display())]
    MissingInput(PathBuf),

    #[error("No usable records in {}", .0.display())]
    EmptyDataset(PathBuf),

    #[error("Label metadata in {} does not match its entity list", .0.display())]
    InvalidMetadata(PathBuf),

    #[error("Extraction error: {0}")]
    Extract(#[from] ExtractError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Fails with [`Error::MissingInput`] when `path` does not exist, logging the
/// absence before any output is created.
pub fn require_input(path: &std::path::Path) -> Result<()> {
    if path.exists() {
        return Ok(());
    }
    tracing::error!("Input not found: {}", path.display());
    Err(Error::MissingInput(path.to_path_buf()))
}
