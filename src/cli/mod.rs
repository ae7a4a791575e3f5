pub mod augment;
pub mod config;
pub mod ner;
pub mod prepare;
pub mod run;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use augment::AugmentArgs;
pub use ner::NerArgs;
pub use prepare::PrepareArgs;

#[derive(Parser)]
#[command(
    name = "fincorpus",
    about = "Financial text corpus and NER dataset preparation",
    version
)]
pub struct Cli {
    /// Pipeline configuration file; defaults apply when it does not exist
    #[arg(long, global = true, default_value = "fincorpus.toml")]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Extract, normalize and deduplicate raw documents into one JSONL corpus
    Prepare(PrepareArgs),
    /// Copy the corpus and add protected-token augmented variants
    Augment(AugmentArgs),
    /// Clean BIO annotations and write train/validation/test splits
    Ner(NerArgs),
    /// Run prepare, augment and ner in order using the configuration file
    Run,
    /// Print the effective configuration as TOML
    Config,
}
