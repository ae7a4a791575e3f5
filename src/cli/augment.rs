use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use console::style;

use fincorpus_core::augment::{self, resolve_lexicon, rng_from_seed};
use fincorpus_core::AugmentConfig;

#[derive(Args)]
pub struct AugmentArgs {
    /// Corpus to read
    #[arg(long)]
    pub input: Option<PathBuf>,
    /// Augmented corpus to write
    #[arg(long)]
    pub output: Option<PathBuf>,
    /// Fraction of records that get an augmented copy
    #[arg(long)]
    pub ratio: Option<f64>,
    /// Per-token synonym replacement probability
    #[arg(long)]
    pub replace_prob: Option<f64>,
    /// Per-token deletion probability
    #[arg(long)]
    pub delete_prob: Option<f64>,
    /// Random seed
    #[arg(long)]
    pub seed: Option<u64>,
    /// WordNet dictionary directory
    #[arg(long)]
    pub wordnet: Option<PathBuf>,
    /// JSON synonym table, used instead of WordNet
    #[arg(long)]
    pub synonyms: Option<PathBuf>,
}

impl AugmentArgs {
    pub fn apply(self, config: &mut AugmentConfig) {
        if let Some(input) = self.input {
            config.input = input;
        }
        if let Some(output) = self.output {
            config.output = output;
        }
        if let Some(ratio) = self.ratio {
            config.augment_ratio = ratio;
        }
        if let Some(p) = self.replace_prob {
            config.replace_prob = p;
        }
        if let Some(p) = self.delete_prob {
            config.delete_prob = p;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        if self.wordnet.is_some() {
            config.wordnet_dir = self.wordnet;
        }
        if self.synonyms.is_some() {
            config.synonyms_file = self.synonyms;
        }
    }
}

pub fn run(config: &AugmentConfig) -> Result<()> {
    config.validate()?;

    let lexicon = resolve_lexicon(config);
    let mut rng = rng_from_seed(config.seed);
    let stats = augment::run(config, &lexicon, &mut rng)?;

    eprintln!(
        "{} Augmented corpus {} {}",
        style("✓").green(),
        style("→").dim(),
        config.output.display()
    );
    eprintln!("  Records processed: {}", stats.processed);
    eprintln!(
        "  Saved: {} ({} augmented)",
        stats.saved, stats.augmented
    );
    if stats.invalid_lines > 0 {
        eprintln!("  {} invalid lines skipped", style(stats.invalid_lines).yellow());
    }
    Ok(())
}
