use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use console::style;

use fincorpus_core::{ner, NerConfig};

#[derive(Args)]
pub struct NerArgs {
    /// Token/label annotation file
    #[arg(long)]
    pub input: Option<PathBuf>,
    /// Directory for the split files and metadata.json
    #[arg(long)]
    pub output_dir: Option<PathBuf>,
    /// Fraction held out of train for validation and test
    #[arg(long)]
    pub test_size: Option<f64>,
    /// Fraction of the held-out pool that becomes test
    #[arg(long)]
    pub val_fraction: Option<f64>,
    /// Split seed
    #[arg(long)]
    pub seed: Option<u64>,
    /// Entity type, repeat for each (replaces the configured list)
    #[arg(long = "entity")]
    pub entities: Vec<String>,
}

impl NerArgs {
    pub fn apply(self, config: &mut NerConfig) {
        if let Some(input) = self.input {
            config.input = input;
        }
        if let Some(output_dir) = self.output_dir {
            config.output_dir = output_dir;
        }
        if let Some(test_size) = self.test_size {
            config.test_size = test_size;
        }
        if let Some(val_fraction) = self.val_fraction {
            config.val_fraction_of_temp = val_fraction;
        }
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if !self.entities.is_empty() {
            config.entity_labels = self.entities;
        }
    }
}

pub fn run(config: &NerConfig) -> Result<()> {
    config.validate()?;

    let stats = ner::prepare(config)?;

    eprintln!(
        "{} NER splits {} {}",
        style("✓").green(),
        style("→").dim(),
        config.output_dir.display()
    );
    eprintln!(
        "  Records: {} cleaned of {} ({} with entities)",
        stats.loaded.cleaned, stats.loaded.raw, stats.with_entities
    );
    eprintln!(
        "  Train: {}  Validation: {}  Test: {}",
        stats.train, stats.validation, stats.test
    );
    Ok(())
}
