//! Transfer Dashboard - interactive views over the canonical transfer dataset.

use anyhow::{anyhow, Context};
use eframe::egui;
use transfer_history::config::AppConfig;
use transfer_history::data::Dataset;
use transfer_history::gui::TransferDashboardApp;
use transfer_history::logging::init_logging;

fn main() -> anyhow::Result<()> {
    init_logging();

    let config = AppConfig::load(None).context("Failed to load configuration")?;

    // The snapshot is loaded once, before any rendering.
    let dataset = Dataset::load(&config.dashboard.dataset_path)?;
    tracing::info!(
        rows = dataset.len(),
        path = %config.dashboard.dataset_path.display(),
        "loaded dataset"
    );

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 900.0])
            .with_min_inner_size([1000.0, 700.0])
            .with_title("Football Transfer History"),
        ..Default::default()
    };

    eframe::run_native(
        "Football Transfer History",
        options,
        Box::new(|cc| Ok(Box::new(TransferDashboardApp::new(cc, dataset)))),
    )
    .map_err(|e| anyhow!("Dashboard failed: {e}"))
}
