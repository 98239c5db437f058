mod app;
mod color;
mod config;
mod data;
mod dispatch;
mod export;
mod state;
mod ui;
mod views;

use anyhow::{Context, Result};
use clap::Parser;
use eframe::egui;

use app::StudyPandaApp;
use config::Config;
use data::filter::ALL;
use data::store::DatasetStore;
use dispatch::{Dispatcher, FilterChange};
use state::AppState;

fn main() -> Result<()> {
    let config = Config::parse();

    env_logger::Builder::new()
        .filter_level(config.log_level())
        .parse_default_env()
        .init();

    let store = DatasetStore::load(&config.data)
        .with_context(|| format!("loading {}", config.data.display()))?;
    let dataset = store.dataset();

    let mut dispatcher = Dispatcher::new(dataset.clone());
    let total = dataset.len();
    dispatcher.subscribe(move |batch| {
        log::info!("Views updated: {} of {total} students match", batch.row_count());
    });

    // Startup filters go through the dispatcher so they are validated like
    // any selector change.
    for change in [
        FilterChange::Passed(config.passed.clone()),
        FilterChange::ParentEducation(config.parent_education.clone()),
    ] {
        let is_all = matches!(
            &change,
            FilterChange::Passed(v) | FilterChange::ParentEducation(v) if v == ALL
        );
        if !is_all {
            dispatcher
                .on_filter_change(change)
                .context("applying initial filter")?;
        }
    }

    if let Some(path) = &config.export {
        return export::write_views(&dispatcher.current(), path);
    }

    let state = AppState::new(dispatcher, usize::from(config.page_size), config.debug);
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 900.0])
            .with_min_inner_size([700.0, 500.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Study Panda – Student Performance Dashboard",
        options,
        Box::new(|_cc| Ok(Box::new(StudyPandaApp::new(state)))),
    )
    .map_err(|e| anyhow::anyhow!("UI error: {e}"))
}
