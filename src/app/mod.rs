//! Application layer: wires config, catalog client and sweep engine together
//! and renders the results for the terminal.

pub mod report;

use crate::adapters::export::{self, ExportFormat};
use crate::adapters::scryfall::ScryfallClient;
use crate::core::catalog::SetCatalog;
use crate::core::reducer::AggregateState;
use crate::core::sweep::SweepEngine;
use crate::core::ConfigProvider;
use crate::domain::selection::SelectionStore;
use crate::utils::error::Result;
use crate::utils::monitor::RunMonitor;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::sync::Arc;

/// Sweeps every selected set and waits until all chains have settled.
pub async fn run_sweep<C: ConfigProvider>(config: &C, monitor: &RunMonitor) -> Result<AggregateState> {
    let client = Arc::new(ScryfallClient::new(
        config.catalog_base_url(),
        config.user_agent(),
    ));
    let selection: SelectionStore = config.selected_sets().iter().collect();

    tracing::info!(
        "🔍 Sweeping {} set(s): {}",
        selection.len(),
        selection.ids().collect::<Vec<_>>().join(", ")
    );

    let mut engine = SweepEngine::new(client, config.catalog_base_url());
    engine.initiate(selection.ids());
    let state = engine.settle().await.clone();

    monitor.log_stats("Sweep settled");
    Ok(state)
}

pub async fn load_sets<C: ConfigProvider>(config: &C) -> Result<SetCatalog> {
    let client = ScryfallClient::new(config.catalog_base_url(), config.user_agent());
    SetCatalog::load(&client, config.excluded_set_types(), config.include_digital()).await
}

/// Writes the settled cards to `path`.
pub fn export_cards(state: &AggregateState, path: &str, format: ExportFormat) -> Result<()> {
    let path = Path::new(path);
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let file = std::fs::File::create(path)?;
    let mut writer = BufWriter::new(file);
    export::write(format, state.cards(), &mut writer)?;
    writer.flush()?;
    tracing::info!("📁 Wrote {} card(s) to {}", state.cards().len(), path.display());
    Ok(())
}
