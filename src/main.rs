mod app;
mod color;
mod data;
mod state;
mod ui;

use std::path::PathBuf;

use app::BookInsightsApp;
use eframe::egui;
use state::AppState;

/// Default inventory file, looked up in the working directory at startup.
const DEFAULT_SOURCE: &str = "cleaned_books_data.csv";

fn main() -> eframe::Result {
    env_logger::init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Book Insights – Inventory Dashboard",
        options,
        Box::new(|_cc| {
            let mut state = AppState::default();
            let source = PathBuf::from(DEFAULT_SOURCE);
            if source.exists() {
                state.load_source(source);
            }
            Ok(Box::new(BookInsightsApp::new(state)))
        }),
    )
}
