mod app;
mod color;
mod config;
mod data;
mod error;
mod state;
mod ui;

use anyhow::anyhow;
use app::DyingDialectsApp;
use clap::Parser;
use config::{Cli, DashboardConfig};
use eframe::egui;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = DashboardConfig::from_cli(Cli::parse())?;
    log::debug!("Starting with {config:?}");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 900.0])
            .with_min_inner_size([700.0, 500.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Dying Dialects – U-M ASIANLAN Enrollment Trends",
        options,
        Box::new(|cc| Ok(Box::new(DyingDialectsApp::new(cc, config)))),
    )
    .map_err(|e| anyhow!("{e}"))
}
