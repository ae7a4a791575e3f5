use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use walkdir::WalkDir;

use super::dedup::Deduplicator;
use super::extractor::ExtractorRegistry;
use super::normalizer::normalize;
use crate::config::CorpusConfig;
use crate::error::{require_input, Result};
use crate::jsonl::JsonlWriter;

/// One line of the merged corpus
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorpusRecord {
    pub text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildStats {
    pub files_seen: usize,
    pub files_processed: usize,
    pub files_skipped: usize,
    pub units_extracted: usize,
    pub empty_after_normalize: usize,
    pub duplicates: usize,
    pub written: usize,
}

/// Walks a raw document tree and writes one normalized, deduplicated
/// `{"text": ...}` line per extracted unit.
pub struct CorpusBuilder {
    registry: ExtractorRegistry,
    dedup: bool,
    fingerprint_chars: usize,
}

impl CorpusBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self {
            registry: ExtractorRegistry::default(),
            dedup: true,
            fingerprint_chars: 400,
        }
    }

    #[must_use]
    pub fn from_config(config: &CorpusConfig) -> Self {
        Self::new()
            .with_dedup(config.dedup)
            .with_fingerprint_chars(config.fingerprint_chars)
    }

    #[must_use]
    pub fn with_registry(mut self, registry: ExtractorRegistry) -> Self {
        self.registry = registry;
        self
    }

    #[must_use]
    pub const fn with_dedup(mut self, dedup: bool) -> Self {
        self.dedup = dedup;
        self
    }

    #[must_use]
    pub const fn with_fingerprint_chars(mut self, chars: usize) -> Self {
        self.fingerprint_chars = chars;
        self
    }

    pub fn build(&self, raw_dir: &Path, output: &Path) -> Result<BuildStats> {
        require_input(raw_dir)?;

        let mut writer = JsonlWriter::create(output)?;
        let output_abs = output.canonicalize().ok();
        let mut dedup = Deduplicator::new(self.fingerprint_chars);
        let mut stats = BuildStats::default();

        for entry in WalkDir::new(raw_dir).sort_by_file_name() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::warn!("Skipping unreadable entry under {}: {}", raw_dir.display(), e);
                    continue;
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }

            let path = entry.path();
            if is_same_path(path, output_abs.as_ref()) {
                continue;
            }
            stats.files_seen += 1;

            let file_name = entry.file_name().to_string_lossy();
            let Some(extractor) = self.registry.for_path(path) else {
                tracing::debug!("Skipping unsupported: {}", file_name);
                stats.files_skipped += 1;
                continue;
            };

            tracing::info!("Processing {}", file_name);
            stats.files_processed += 1;

            for unit in extractor.extract(path)? {
                let raw = unit?;
                stats.units_extracted += 1;

                let text = normalize(&raw);
                if text.is_empty() {
                    stats.empty_after_normalize += 1;
                    continue;
                }
                if self.dedup && !dedup.check_and_register(&text) {
                    stats.duplicates += 1;
                    continue;
                }
                writer.write_record(&CorpusRecord { text })?;
            }
        }

        stats.written = writer.finish()?;
        tracing::info!(
            "Finished! {} records saved to {} ({} duplicates dropped)",
            stats.written,
            output.display(),
            stats.duplicates
        );
        Ok(stats)
    }
}

impl Default for CorpusBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn is_same_path(path: &Path, other: Option<&PathBuf>) -> bool {
    other.is_some_and(|other| path.canonicalize().is_ok_and(|p| &p == other))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use std::fs;

    fn read_records(path: &Path) -> Vec<CorpusRecord> {
        fs::read_to_string(path)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect()
    }

    #[test]
    fn duplicated_csv_row_written_once() {
        let dir = tempfile::tempdir().unwrap();
        let raw = dir.path().join("raw");
        fs::create_dir_all(&raw).unwrap();
        fs::write(
            raw.join("news.csv"),
            "id,headline\n1,Q3 revenue up 12%\n2,Q3 revenue up 12%\n",
        )
        .unwrap();
        let output = dir.path().join("processed/merged.jsonl");

        let stats = CorpusBuilder::new().build(&raw, &output).unwrap();

        assert_eq!(stats.written, 1);
        assert_eq!(stats.duplicates, 1);
        assert_eq!(
            fs::read_to_string(&output).unwrap(),
            "{\"text\":\"Q3 revenue up 12%\"}\n"
        );
    }

    #[test]
    fn walks_recursively_and_skips_unsupported() {
        let dir = tempfile::tempdir().unwrap();
        let raw = dir.path().join("raw");
        fs::create_dir_all(raw.join("nested/deeper")).unwrap();
        fs::write(raw.join("a.txt"), "Alpha  filing\n\nbody").unwrap();
        fs::write(raw.join("nested/b.JSONL"), "{\"text\": \"Beta\"}\n").unwrap();
        fs::write(raw.join("nested/deeper/c.html"), "<p>Gamma</p>").unwrap();
        fs::write(raw.join("nested/logo.png"), [0u8, 1, 2]).unwrap();
        let output = dir.path().join("merged.jsonl");

        let stats = CorpusBuilder::new().build(&raw, &output).unwrap();

        assert_eq!(stats.files_seen, 4);
        assert_eq!(stats.files_skipped, 1);
        let texts: Vec<String> = read_records(&output).into_iter().map(|r| r.text).collect();
        assert_eq!(texts, vec!["Alpha filing body", "Beta", "Gamma"]);
    }

    #[test]
    fn shared_prefix_documents_collapse() {
        let dir = tempfile::tempdir().unwrap();
        let raw = dir.path().join("raw");
        fs::create_dir_all(&raw).unwrap();
        let preamble = "Forward-looking statements disclaimer. ".repeat(20);
        fs::write(raw.join("one.txt"), format!("{preamble} Report one")).unwrap();
        fs::write(raw.join("two.txt"), format!("{preamble} Report two")).unwrap();
        let output = dir.path().join("merged.jsonl");

        let stats = CorpusBuilder::new().build(&raw, &output).unwrap();
        assert_eq!(stats.written, 1);

        let stats = CorpusBuilder::new()
            .with_dedup(false)
            .build(&raw, &output)
            .unwrap();
        assert_eq!(stats.written, 2);
    }

    #[test]
    fn blank_units_are_dropped() {
        let dir = tempfile::tempdir().unwrap();
        let raw = dir.path().join("raw");
        fs::create_dir_all(&raw).unwrap();
        fs::write(raw.join("data.jsonl"), "{\"text\": \"\u{200B}\"}\n{\"text\": \"kept\"}\n")
            .unwrap();
        let output = dir.path().join("merged.jsonl");

        let stats = CorpusBuilder::new().build(&raw, &output).unwrap();
        assert_eq!(stats.empty_after_normalize, 1);
        assert_eq!(stats.written, 1);
    }

    #[test]
    fn output_inside_raw_dir_is_not_reread() {
        let dir = tempfile::tempdir().unwrap();
        let raw = dir.path().join("raw");
        fs::create_dir_all(&raw).unwrap();
        fs::write(raw.join("a.txt"), "Only unit").unwrap();
        let output = raw.join("merged.jsonl");

        let stats = CorpusBuilder::new().build(&raw, &output).unwrap();
        assert_eq!(stats.written, 1);
        assert_eq!(stats.files_seen, 1);
    }

    #[test]
    fn missing_raw_dir_creates_no_output() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("out/merged.jsonl");

        let result = CorpusBuilder::new().build(&dir.path().join("absent"), &output);

        assert!(matches!(result, Err(Error::MissingInput(_))));
        assert!(!output.exists());
    }

    #[test]
    fn malformed_json_document_aborts_the_run() {
        let dir = tempfile::tempdir().unwrap();
        let raw = dir.path().join("raw");
        fs::create_dir_all(&raw).unwrap();
        fs::write(raw.join("bad.json"), "{oops").unwrap();

        let result = CorpusBuilder::new().build(&raw, &dir.path().join("merged.jsonl"));
        assert!(matches!(result, Err(Error::Extract(_))));
    }
}
