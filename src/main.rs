use std::path::PathBuf;

use anyhow::Context;
use hdi_engine::{DirectorySource, Pipeline, PipelineConfig, open_store};
use log::info;

fn main() -> anyhow::Result<()> {
    // Setup logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match std::env::args_os().nth(1).map(PathBuf::from) {
        Some(path) => {
            info!("Loading configuration from {}", path.display());
            PipelineConfig::from_file(&path)
                .with_context(|| format!("Failed to load configuration {}", path.display()))?
        }
        None => PipelineConfig::default(),
    }
    .with_env_overrides();
    config.validate().context("Invalid configuration")?;

    let store = open_store(&config.store).context("Failed to open artifact store")?;
    let source = DirectorySource::new(&config.data_dir).with_context(|| {
        format!("Failed to open data directory {}", config.data_dir.display())
    })?;

    let pipeline = Pipeline::new(config, Box::new(source), store)?;
    let composite = pipeline.run().context("Index pipeline failed")?;

    print!("{composite}");
    Ok(())
}
