use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use serde_json::Value;

use super::clean::{clean, CleanedRecord, Rejection, SplitRecord};
use super::schema::{LabelSchema, SplitMetadata};
use super::split::split_records;
use crate::config::NerConfig;
use crate::error::{require_input, Error, Result};
use crate::jsonl::write_all;

pub const TRAIN_FILE: &str = "train.jsonl";
pub const VALIDATION_FILE: &str = "validation.jsonl";
pub const TEST_FILE: &str = "test.jsonl";
pub const METADATA_FILE: &str = "metadata.json";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadStats {
    /// Non-empty input lines
    pub raw: usize,
    pub cleaned: usize,
    pub malformed_lines: usize,
    pub rejected: usize,
    /// Tag counts over cleaned records, most frequent first
    pub label_counts: Vec<(String, usize)>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NerStats {
    pub loaded: LoadStats,
    pub with_entities: usize,
    pub train: usize,
    pub validation: usize,
    pub test: usize,
}

/// Read an annotation file, keeping the records that survive [`clean`].
pub fn load_and_clean(
    path: &Path,
    schema: &LabelSchema,
) -> Result<(Vec<CleanedRecord>, LoadStats)> {
    require_input(path)?;

    let reader = BufReader::new(File::open(path)?);
    let mut records = Vec::new();
    let mut stats = LoadStats::default();
    let mut counts: HashMap<u32, usize> = HashMap::new();
    let mut first_seen: Vec<u32> = Vec::new();

    for (lineno, line) in reader.split(b'\n').enumerate() {
        let line = line?;
        let Ok(line) = std::str::from_utf8(&line) else {
            tracing::warn!("Skipping non UTF-8 line {}", lineno + 1);
            stats.raw += 1;
            stats.malformed_lines += 1;
            continue;
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        stats.raw += 1;

        let Ok(value) = serde_json::from_str::<Value>(line) else {
            tracing::warn!("Skipping malformed JSON line {}", lineno + 1);
            stats.malformed_lines += 1;
            continue;
        };

        match clean(&value, schema) {
            Ok(record) => {
                for &id in &record.ner_tags {
                    let count = counts.entry(id).or_insert(0);
                    if *count == 0 {
                        first_seen.push(id);
                    }
                    *count += 1;
                }
                records.push(record);
            }
            Err(reason @ Rejection::NoTokens) => {
                tracing::debug!("Skipping record on line {}: {}", lineno + 1, reason);
                stats.rejected += 1;
            }
            Err(reason) => {
                tracing::warn!("Skipping record on line {}: {}", lineno + 1, reason);
                stats.rejected += 1;
            }
        }
    }

    let mut label_counts: Vec<(String, usize)> = first_seen
        .into_iter()
        .map(|id| {
            let label = schema.label(id).unwrap_or(super::schema::OUTSIDE);
            (label.to_string(), counts[&id])
        })
        .collect();
    label_counts.sort_by(|a, b| b.1.cmp(&a.1));
    stats.label_counts = label_counts;

    stats.cleaned = records.len();
    tracing::info!(
        "Loaded {} raw records -> {} cleaned records",
        stats.raw,
        stats.cleaned
    );
    Ok((records, stats))
}

/// Clean the annotation file, split it and write the three split files plus
/// `metadata.json` into `config.output_dir`.
pub fn prepare(config: &NerConfig) -> Result<NerStats> {
    let schema = LabelSchema::build(&config.entity_labels);

    tracing::info!("Loading and cleaning {}", config.input.display());
    let (records, loaded) = load_and_clean(&config.input, &schema)?;

    tracing::info!("Label distribution (tag: count):");
    for (tag, count) in &loaded.label_counts {
        tracing::info!("  {}: {}", tag, count);
    }

    if records.is_empty() {
        tracing::error!("No cleaned records found. Aborting.");
        return Err(Error::EmptyDataset(config.input.clone()));
    }

    let total = records.len();
    let with_entities = records.iter().filter(|r| r.has_entity).count();
    let ratio = with_entities as f64 / total as f64;
    tracing::info!(
        "Records with >=1 entity: {} / {} ({:.2}%)",
        with_entities,
        total,
        ratio * 100.0
    );
    if ratio < config.min_entity_ratio {
        tracing::warn!(
            "Very few records contain entities (<{:.0}%); annotate more examples before training",
            config.min_entity_ratio * 100.0
        );
    }

    let split_input: Vec<SplitRecord> = records.into_iter().map(SplitRecord::from).collect();
    let splits = split_records(
        split_input,
        config.test_size,
        config.val_fraction_of_temp,
        config.seed,
    );
    tracing::info!(
        "Split sizes -> train: {}, validation: {}, test: {}",
        splits.train.len(),
        splits.validation.len(),
        splits.test.len()
    );

    let dir = &config.output_dir;
    std::fs::create_dir_all(dir)?;
    write_all(&dir.join(TRAIN_FILE), &splits.train)?;
    write_all(&dir.join(VALIDATION_FILE), &splits.validation)?;
    write_all(&dir.join(TEST_FILE), &splits.test)?;
    SplitMetadata::new(&schema).write(&dir.join(METADATA_FILE))?;
    tracing::info!("Saved splits and metadata to {}", dir.display());

    Ok(NerStats {
        loaded,
        with_entities,
        train: splits.train.len(),
        validation: splits.validation.len(),
        test: splits.test.len(),
    })
}
