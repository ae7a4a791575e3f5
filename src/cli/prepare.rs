use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use console::style;

use fincorpus_core::{CorpusBuilder, CorpusConfig};

#[derive(Args)]
pub struct PrepareArgs {
    /// Root of the raw document tree
    #[arg(long)]
    pub raw_dir: Option<PathBuf>,
    /// Merged corpus file to write
    #[arg(long)]
    pub output: Option<PathBuf>,
    /// Keep units whose fingerprint was already seen
    #[arg(long)]
    pub no_dedup: bool,
}

impl PrepareArgs {
    pub fn apply(self, config: &mut CorpusConfig) {
        if let Some(raw_dir) = self.raw_dir {
            config.raw_dir = raw_dir;
        }
        if let Some(output) = self.output {
            config.output = output;
        }
        if self.no_dedup {
            config.dedup = false;
        }
    }
}

pub fn run(config: &CorpusConfig) -> Result<()> {
    let stats = CorpusBuilder::from_config(config).build(&config.raw_dir, &config.output)?;

    eprintln!(
        "{} Corpus {} {}",
        style("✓").green(),
        style("→").dim(),
        config.output.display()
    );
    eprintln!(
        "  Files: {} processed, {} skipped",
        stats.files_processed, stats.files_skipped
    );
    eprintln!(
        "  Records: {} written, {} duplicates, {} empty",
        stats.written, stats.duplicates, stats.empty_after_normalize
    );
    Ok(())
}
