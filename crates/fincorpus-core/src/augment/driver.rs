use std::fs::File;
use std::io::{BufRead, BufReader};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::augmenter::Augmenter;
use super::lexicon::Lexicon;
use crate::config::AugmentConfig;
use crate::error::{require_input, Result};
use crate::jsonl::JsonlWriter;

pub const AUGMENTATION_TYPE: &str = "synonym_replace_delete_controlled";

/// Extra record emitted next to a sampled original
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AugmentedRecord {
    pub text: String,
    pub source_file: String,
    pub augmentation_type: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AugmentStats {
    /// Records with non-empty text
    pub processed: usize,
    /// Lines written, originals plus augmented copies
    pub saved: usize,
    pub augmented: usize,
    pub invalid_lines: usize,
}

/// Seeded generator, or one drawn from OS entropy when no seed is set.
pub fn rng_from_seed(seed: Option<u64>) -> StdRng {
    seed.map_or_else(StdRng::from_os_rng, StdRng::seed_from_u64)
}

/// Copy every corpus record to the output and append an augmented variant
/// for a `config.augment_ratio` sample of them.
pub fn run<L, R>(config: &AugmentConfig, lexicon: &L, rng: &mut R) -> Result<AugmentStats>
where
    L: Lexicon + ?Sized,
    R: Rng + ?Sized,
{
    require_input(&config.input)?;

    let reader = BufReader::new(File::open(&config.input)?);
    let mut writer = JsonlWriter::create(&config.output)?;
    let augmenter = Augmenter::new(lexicon);
    let mut stats = AugmentStats::default();

    tracing::info!("Augmenting {}", config.input.display());

    for (lineno, line) in reader.split(b'\n').enumerate() {
        let line = line?;
        let Ok(line) = std::str::from_utf8(&line) else {
            tracing::warn!("Skipping non UTF-8 line {}", lineno + 1);
            stats.invalid_lines += 1;
            continue;
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let record = match serde_json::from_str::<Value>(line) {
            Ok(Value::Object(record)) => record,
            _ => {
                tracing::warn!("Skipping invalid JSON record on line {}", lineno + 1);
                stats.invalid_lines += 1;
                continue;
            }
        };
        let text = record.get("text").and_then(Value::as_str).map_or("", str::trim);
        if text.is_empty() {
            continue;
        }

        stats.processed += 1;
        writer.write_raw(line)?;

        if config.augment_ratio <= 0.0 || rng.random::<f64>() >= config.augment_ratio {
            continue;
        }

        let augmented = if text.chars().count() > config.large_text_threshold {
            let split = text
                .char_indices()
                .nth(config.light_preview_chars)
                .map_or(text.len(), |(idx, _)| idx);
            let (preview, rest) = text.split_at(split);
            let mut out = augmenter.augment(
                preview,
                config.light_replace_prob,
                config.light_delete_prob,
                rng,
            );
            out.push_str(rest);
            out
        } else {
            augmenter.augment(text, config.replace_prob, config.delete_prob, rng)
        };

        writer.write_record(&AugmentedRecord {
            text: augmented,
            source_file: record
                .get("source_file")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
            augmentation_type: AUGMENTATION_TYPE.to_string(),
        })?;
        stats.augmented += 1;
    }

    stats.saved = writer.finish()?;
    tracing::info!(
        "Augmentation done: {} records processed, {} saved ({} augmented) to {}",
        stats.processed,
        stats.saved,
        stats.augmented,
        config.output.display()
    );
    if stats.invalid_lines > 0 {
        tracing::warn!("{} invalid lines skipped", stats.invalid_lines);
    }
    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::augment::lexicon::{EmptyLexicon, MapLexicon};
    use crate::error::Error;
    use std::path::Path;

    fn config(dir: &Path, input: &str) -> AugmentConfig {
        let input_path = dir.join("merged.jsonl");
        std::fs::write(&input_path, input).unwrap();
        AugmentConfig {
            input: input_path,
            output: dir.join("out/augmented.jsonl"),
            ..AugmentConfig::default()
        }
    }

    fn output_lines(config: &AugmentConfig) -> Vec<String> {
        std::fs::read_to_string(&config.output)
            .unwrap()
            .lines()
            .map(String::from)
            .collect()
    }

    #[test]
    fn ratio_zero_copies_originals_verbatim() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = config(
            dir.path(),
            "{\"text\": \"Q3 revenue up 12%\"}\n\n{\"text\": \"  \"}\n{\"id\": 1}\n  {\"text\":\"EPS beat\"}  \n",
        );
        config.augment_ratio = 0.0;

        let stats = run(&config, &EmptyLexicon, &mut rng_from_seed(Some(1))).unwrap();

        assert_eq!(stats.processed, 2);
        assert_eq!(stats.saved, 2);
        assert_eq!(stats.augmented, 0);
        assert_eq!(
            output_lines(&config),
            vec!["{\"text\": \"Q3 revenue up 12%\"}", "{\"text\":\"EPS beat\"}"]
        );
    }

    #[test]
    fn ratio_one_appends_augmented_copy() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = config(
            dir.path(),
            "{\"text\": \"EPS grew 12% at Acme Corp.\", \"source_file\": \"q3.csv\"}\n",
        );
        config.augment_ratio = 1.0;
        config.replace_prob = 1.0;
        config.delete_prob = 0.0;
        let lexicon = MapLexicon::new()
            .with_entry("grew", ["rose"])
            .with_entry("acme", ["Zenith"]);

        let stats = run(&config, &lexicon, &mut rng_from_seed(Some(42))).unwrap();
        assert_eq!(stats.saved, 2);
        assert_eq!(stats.augmented, 1);

        let lines = output_lines(&config);
        let record: AugmentedRecord = serde_json::from_str(&lines[1]).unwrap();
        assert_eq!(
            record,
            AugmentedRecord {
                text: "EPS rose 12% at Zenith Corp.".to_string(),
                source_file: "q3.csv".to_string(),
                augmentation_type: AUGMENTATION_TYPE.to_string(),
            }
        );
    }

    #[test]
    fn invalid_lines_are_counted_and_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let config = config(dir.path(), "{broken\n[1,2]\n{\"text\": \"ok\"}\n");

        let stats = run(&config, &EmptyLexicon, &mut rng_from_seed(Some(42))).unwrap();
        assert_eq!(stats.invalid_lines, 2);
        assert_eq!(stats.processed, 1);
    }

    #[test]
    fn oversized_text_keeps_tail_verbatim() {
        let dir = tempfile::tempdir().unwrap();
        let head = "alpha beta gamma ";
        let tail = "TAIL-SEGMENT untouched words here";
        let text = format!("{head}{tail}");
        let mut config = config(
            dir.path(),
            &format!("{}\n", serde_json::json!({ "text": text })),
        );
        config.augment_ratio = 1.0;
        config.large_text_threshold = 10;
        config.light_preview_chars = head.len();
        config.light_delete_prob = 1.0;

        run(&config, &EmptyLexicon, &mut rng_from_seed(Some(3))).unwrap();

        let lines = output_lines(&config);
        let record: AugmentedRecord = serde_json::from_str(&lines[1]).unwrap();
        assert_eq!(record.text, tail);
    }

    #[test]
    fn seeded_runs_are_identical() {
        let dir = tempfile::tempdir().unwrap();
        let corpus: String = (0..50)
            .map(|i| format!("{{\"text\": \"Record {i} shows strong growth in sales\"}}\n"))
            .collect();
        let mut config = config(dir.path(), &corpus);
        config.augment_ratio = 0.5;

        run(&config, &EmptyLexicon, &mut rng_from_seed(Some(42))).unwrap();
        let first = std::fs::read(&config.output).unwrap();
        run(&config, &EmptyLexicon, &mut rng_from_seed(Some(42))).unwrap();
        assert_eq!(std::fs::read(&config.output).unwrap(), first);
    }

    #[test]
    fn missing_input_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let config = AugmentConfig {
            input: dir.path().join("absent.jsonl"),
            output: dir.path().join("out/augmented.jsonl"),
            ..AugmentConfig::default()
        };

        let result = run(&config, &EmptyLexicon, &mut rng_from_seed(Some(42)));
        assert!(matches!(result, Err(Error::MissingInput(_))));
        assert!(!config.output.exists());
    }
}
