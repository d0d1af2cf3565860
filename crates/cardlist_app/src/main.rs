mod cli;
mod config;

use std::path::Path;

use anyhow::{Context, Result};
use cardlist_engine::{load_cards, summarize, CardListPipeline, CatalogSummary};
use cardlist_logging::{engine_error, engine_info, LogDestination};
use clap::Parser;
use log::LevelFilter;

use crate::cli::Cli;
use crate::config::RunConfig;

fn main() {
    let cli = Cli::parse();
    init_logging(&cli);

    if let Err(err) = run(&cli) {
        engine_error!("{:#}", err);
        std::process::exit(1);
    }
}

fn init_logging(cli: &Cli) {
    let level = if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    let destination = match &cli.log_file {
        Some(path) => LogDestination::Both(path.clone()),
        None => LogDestination::Terminal,
    };
    cardlist_logging::initialize(destination, level);
}

fn run(cli: &Cli) -> Result<()> {
    let mut config = RunConfig::load(cli.config.as_deref())?;
    config.apply_overrides(cli);

    let pipeline = CardListPipeline::new(config.into_pipeline_config());
    let summary = pipeline
        .run_blocking()
        .with_context(|| format!("updating card list from {}", pipeline.config().url))?;
    engine_info!(
        "Wrote {} cards with columns {:?} to {}",
        summary.row_count,
        summary.headers,
        summary.output_path.display()
    );

    if cli.summary {
        let stats = catalog_summary(&summary.output_path)?;
        engine_info!(
            "Catalog: {} cards across {} sets, {} kingdom supply piles",
            stats.total,
            stats.sets,
            stats.supply
        );
    }
    Ok(())
}

/// Read the freshly written card list back and count it.
fn catalog_summary(path: &Path) -> Result<CatalogSummary> {
    let cards = load_cards(path).with_context(|| format!("reading back {}", path.display()))?;
    Ok(summarize(&cards))
}
