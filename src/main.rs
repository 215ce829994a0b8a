mod app;
mod color;
mod config;
mod data;
mod state;
mod ui;

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use app::TopicTrendsApp;
use clap::Parser;
use config::Config;
use data::filter::FilterController;
use eframe::egui;
use state::AppState;

fn main() -> Result<()> {
    env_logger::init();

    let config = Config::parse();

    match (&config.data, &config.export) {
        (Some(data), Some(out)) => export_headless(&config, data, out),
        _ => run_dashboard(config),
    }
}

/// Load, filter and write CSV without opening a window.
fn export_headless(config: &Config, data: &Path, out: &Path) -> Result<()> {
    let counts = data::load_topic_counts(data)
        .with_context(|| format!("loading {}", data.display()))?;
    let mut session = FilterController::new(Arc::new(counts));
    state::apply_cli_selection(&mut session, config)?;

    let view = session.current_view();
    data::export::write_csv(out, &view)?;
    println!("Wrote {} rows to {}", view.len(), out.display());
    Ok(())
}

fn run_dashboard(config: Config) -> Result<()> {
    let mut state = AppState::default();
    if let Some(path) = &config.data {
        state.load_path(path);
        if let Some(session) = &mut state.session {
            if let Err(e) = state::apply_cli_selection(session, &config) {
                log::warn!("Ignoring command-line year range: {e}");
            }
            let filters = session.state();
            state.year_input = (filters.year_min, filters.year_max);
        }
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 850.0])
            .with_min_inner_size([700.0, 450.0]),
        ..Default::default()
    };

    eframe::run_native(
        "📈 Congressional Topic Trends Over Time",
        options,
        Box::new(|_cc| Ok(Box::new(TopicTrendsApp::new(state)))),
    )
    .map_err(|e| anyhow::anyhow!("running dashboard: {e}"))
}
