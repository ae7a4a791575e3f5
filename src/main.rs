use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use fincorpus::cli::{Cli, Commands};
use fincorpus_core::PipelineConfig;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = PipelineConfig::load(&cli.config)
        .with_context(|| format!("loading {}", cli.config.display()))?;

    dispatch(cli.command, config)
}

fn dispatch(command: Commands, mut config: PipelineConfig) -> Result<()> {
    match command {
        Commands::Prepare(args) => {
            args.apply(&mut config.corpus);
            fincorpus::cli::prepare::run(&config.corpus)
        }
        Commands::Augment(args) => {
            args.apply(&mut config.augment);
            fincorpus::cli::augment::run(&config.augment)
        }
        Commands::Ner(args) => {
            args.apply(&mut config.ner);
            fincorpus::cli::ner::run(&config.ner)
        }
        Commands::Run => fincorpus::cli::run::run(&config),
        Commands::Config => fincorpus::cli::config::run(&config),
    }
}
