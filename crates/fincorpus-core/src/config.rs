use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("{name} must be within [0, 1], got {value}")]
    OutOfRange { name: &'static str, value: f64 },
    #[error("entity label list is empty")]
    NoEntityLabels,
}

/// Settings for every pipeline stage
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub corpus: CorpusConfig,
    pub augment: AugmentConfig,
    pub ner: NerConfig,
}

impl PipelineConfig {
    /// Load from a TOML file; a missing file yields the defaults
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.augment.validate()?;
        self.ner.validate()
    }
}

/// Corpus extraction and deduplication
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CorpusConfig {
    /// Root of the raw document tree
    pub raw_dir: PathBuf,
    /// Merged JSONL corpus written by the builder
    pub output: PathBuf,
    /// Drop units whose fingerprint was already seen
    pub dedup: bool,
    /// Leading characters of normalized text covered by the fingerprint
    pub fingerprint_chars: usize,
}

impl Default for CorpusConfig {
    fn default() -> Self {
        Self {
            raw_dir: PathBuf::from("data/raw"),
            output: PathBuf::from("data/processed/merged_dataset.jsonl"),
            dedup: true,
            fingerprint_chars: 400,
        }
    }
}

/// Protected-token augmentation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AugmentConfig {
    pub input: PathBuf,
    pub output: PathBuf,
    /// Fraction of records that also get an augmented copy
    pub augment_ratio: f64,
    /// Per-token synonym substitution probability
    pub replace_prob: f64,
    /// Per-token deletion probability
    pub delete_prob: f64,
    /// RNG seed; `None` draws from OS entropy
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    /// Texts longer than this many characters only get a light pass
    pub large_text_threshold: usize,
    /// Leading characters augmented during a light pass
    pub light_preview_chars: usize,
    pub light_replace_prob: f64,
    pub light_delete_prob: f64,
    /// WordNet dictionary directory (data.noun, data.verb, ...)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wordnet_dir: Option<PathBuf>,
    /// JSON synonym table `{"word": ["synonym", ...]}`, preferred over WordNet
    #[serde(skip_serializing_if = "Option::is_none")]
    pub synonyms_file: Option<PathBuf>,
}

impl Default for AugmentConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from("data/processed/merged_dataset.jsonl"),
            output: PathBuf::from("data/processed/augmented_dataset.jsonl"),
            augment_ratio: 0.05,
            replace_prob: 0.10,
            delete_prob: 0.03,
            seed: Some(42),
            large_text_threshold: 200_000,
            light_preview_chars: 5_000,
            light_replace_prob: 0.05,
            light_delete_prob: 0.01,
            wordnet_dir: None,
            synonyms_file: None,
        }
    }
}

impl AugmentConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_unit("augment.augment_ratio", self.augment_ratio)?;
        check_unit("augment.replace_prob", self.replace_prob)?;
        check_unit("augment.delete_prob", self.delete_prob)?;
        check_unit("augment.light_replace_prob", self.light_replace_prob)?;
        check_unit("augment.light_delete_prob", self.light_delete_prob)
    }
}

/// BIO label mapping and dataset splitting
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NerConfig {
    /// Token/label annotation file
    pub input: PathBuf,
    pub output_dir: PathBuf,
    /// Share of records held out of train (validation + test)
    pub test_size: f64,
    /// Share of the held-out pool passed as the second split's test size;
    /// the remainder of the pool becomes validation
    pub val_fraction_of_temp: f64,
    pub seed: u64,
    /// Entity types, in id order
    pub entity_labels: Vec<String>,
    /// Warn when fewer records than this carry an entity
    pub min_entity_ratio: f64,
}

impl Default for NerConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from("data/processed/bio_annotation_ready.jsonl"),
            output_dir: PathBuf::from("data/processed/ner_final_splits"),
            test_size: 0.2,
            val_fraction_of_temp: 0.5,
            seed: 42,
            entity_labels: ["ORG", "DATE", "FIN_VALUE", "REVENUE", "PROFIT", "FIN_TERM", "EVENT"]
                .into_iter()
                .map(String::from)
                .collect(),
            min_entity_ratio: 0.01,
        }
    }
}

impl NerConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_unit("ner.test_size", self.test_size)?;
        check_unit("ner.val_fraction_of_temp", self.val_fraction_of_temp)?;
        if self.entity_labels.is_empty() {
            return Err(ConfigError::NoEntityLabels);
        }
        Ok(())
    }
}

fn check_unit(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange { name, value })
    }
}
