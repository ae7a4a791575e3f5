use anyhow::Result;
use console::style;

use fincorpus_core::PipelineConfig;

/// All three stages in order, augmenting the corpus just built. The NER
/// stage needs a separately produced annotation file and is skipped when it
/// is absent.
pub fn run(config: &PipelineConfig) -> Result<()> {
    config.validate()?;

    tracing::info!("Stage 1/3: corpus");
    super::prepare::run(&config.corpus)?;
    tracing::info!("Stage 2/3: augmentation");
    let mut augment = config.augment.clone();
    if augment.input != config.corpus.output {
        tracing::warn!(
            "augment.input {} differs from corpus.output; augmenting {}",
            augment.input.display(),
            config.corpus.output.display()
        );
        augment.input.clone_from(&config.corpus.output);
    }
    super::augment::run(&augment)?;

    if config.ner.input.exists() {
        tracing::info!("Stage 3/3: NER splits");
        super::ner::run(&config.ner)?;
    } else {
        eprintln!(
            "{} Skipping NER: {} not found",
            style("○").dim(),
            config.ner.input.display()
        );
    }
    Ok(())
}
