use std::{path::PathBuf, sync::Arc};

use anyhow::{anyhow, Result};
use clap::Parser;
use client_core::{
    config::{load_settings, load_settings_from, normalize_api_url, ConsoleSettings},
    ConsoleSession, HttpSimulationBackend,
};
use crossbeam_channel::bounded;
use eframe::egui;
use tracing_subscriber::EnvFilter;

mod backend_bridge;
mod controller;
mod ui;

use backend_bridge::commands::BackendCommand;
use controller::events::UiEvent;
use ui::ConsoleApp;

const WINDOW_TITLE: &str = "Polaris - Crisis Response Simulation";

#[derive(Parser, Debug)]
#[command(name = "polaris-desktop", about = "Desktop console for the crisis response simulator")]
struct Args {
    /// Base URL of the simulation API, e.g. http://localhost:8000/api
    #[arg(long)]
    api_url: Option<String>,
    /// Settings file to use instead of ./console.toml
    #[arg(long)]
    config: Option<PathBuf>,
}

fn resolve_settings(args: &Args) -> Result<ConsoleSettings> {
    let mut settings = match &args.config {
        Some(path) => load_settings_from(path)?,
        None => load_settings(),
    };
    if let Some(api_url) = &args.api_url {
        settings.api_url = api_url.clone();
    }
    settings.api_url = normalize_api_url(&settings.api_url)?;
    Ok(settings)
}

fn main() -> Result<()> {
    let args = Args::parse();
    let settings = resolve_settings(&args)?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&settings.log_filter))
        .init();
    tracing::info!(api_url = %settings.api_url, "desktop console starting");

    let session = Arc::new(ConsoleSession::new(Arc::new(HttpSimulationBackend::new(
        settings.api_url.clone(),
    ))));

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(64);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(512);
    backend_bridge::runtime::launch(session.clone(), cmd_rx, ui_tx);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(WINDOW_TITLE)
            .with_inner_size([960.0, 720.0])
            .with_min_inner_size([640.0, 480.0]),
        ..Default::default()
    };
    eframe::run_native(
        WINDOW_TITLE,
        options,
        Box::new(move |_cc| Ok(Box::new(ConsoleApp::new(session, cmd_tx, ui_rx)))),
    )
    .map_err(|err| anyhow!("desktop console exited with error: {err}"))
}
