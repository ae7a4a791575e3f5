use anyhow::Result;

use fincorpus_core::PipelineConfig;

pub fn run(config: &PipelineConfig) -> Result<()> {
    print!("{}", toml::to_string_pretty(config)?);
    Ok(())
}
