use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;

use setforge::domain::model::Champion;
use setforge::domain::ports::Storage;
use setforge::utils::{logger, validation::Validate};
use setforge::{
    AggregationOrchestrator, BuildDocument, CliConfig, JsonApiSource, LocalStorage, MemoryStore,
    Settings, StaticTranslator,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    logger::init_cli_logger(config.verbose);
    tracing::info!("Starting setforge");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    config.validate().context("Configuration validation failed")?;

    let settings = Settings::load_or_default(Path::new(&config.settings_path))
        .context("Failed to load settings")?;

    let source = JsonApiSource::new(
        config.base_url.clone(),
        Duration::from_secs(config.timeout_seconds),
    )
    .context("Failed to build provider client")?;

    let champions: Vec<Champion> = config
        .champions
        .iter()
        .enumerate()
        .map(|(idx, name)| Champion::new(idx as i32, name.trim()))
        .collect();

    let orchestrator = AggregationOrchestrator::new(
        vec![Arc::new(source)],
        Arc::new(MemoryStore::new()),
        Arc::new(StaticTranslator::new()),
        settings.clone(),
        config.concurrent_requests,
    );

    let outcome = orchestrator.run(&champions).await;

    let storage = LocalStorage::new(config.output_path.clone());
    for set in &outcome.item_sets {
        let document = BuildDocument::from_item_set(set, settings.lock_map.clone());
        let file_name = format!(
            "{}_{}.json",
            set.champion.to_lowercase(),
            set.title.to_lowercase().replace(' ', "_")
        );
        let json = serde_json::to_vec_pretty(&document)?;
        storage
            .write_file(&file_name, &json)
            .await
            .with_context(|| format!("Failed to write {}", file_name))?;
    }

    println!(
        "Aggregated {} item sets ({} failures journaled)",
        outcome.item_sets.len(),
        outcome.journal.len()
    );
    for entry in &outcome.journal {
        tracing::warn!(
            "Undefined build: {} / {} ({})",
            entry.champion,
            entry.position,
            entry.source
        );
    }

    Ok(())
}
