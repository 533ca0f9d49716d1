mod app;
mod color;
mod config;
mod data;
mod export;
mod state;
mod ui;

use anyhow::{anyhow, Context};
use app::DashboardApp;
use config::DashboardConfig;
use eframe::egui;
use state::AppState;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = DashboardConfig::default();

    // A dataset that can't be built halts startup; per-source defects don't.
    let report = data::loader::load_dir(&config.data_dir)
        .inspect_err(|e| log::error!("{e}"))
        .with_context(|| format!("loading weather data from {}", config.data_dir.display()))?;
    log::info!(
        "Dataset ready: {} observations from {} sources",
        report.dataset.len(),
        report.loaded.len()
    );

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(config.inner_size)
            .with_min_inner_size(config.min_inner_size),
        ..Default::default()
    };

    let state = AppState::new(&config, report);

    eframe::run_native(
        &config.title,
        options,
        Box::new(move |_cc| Ok(Box::new(DashboardApp::new(state)))),
    )
    .map_err(|e| anyhow!("running the dashboard window: {e}"))
}
