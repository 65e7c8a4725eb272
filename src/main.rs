mod app;
mod config;
mod upload;
mod utils;

use anyhow::Context;
use app::InoUploader;
use clap::Parser;
use config::{Cli, Settings};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    let settings = Settings::from_cli(Cli::parse())?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&settings.log_filter)?)
        .init();

    let runtime = tokio::runtime::Runtime::new().context("failed to start async runtime")?;
    let app = InoUploader::new(&settings, runtime)?;

    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_inner_size([520.0, 420.0])
            .with_min_inner_size([400.0, 320.0]),
        ..Default::default()
    };

    eframe::run_native("Ino Uploader", options, Box::new(move |_cc| Box::new(app)))
        .map_err(|e| anyhow::anyhow!("failed to open window: {e}"))
}
