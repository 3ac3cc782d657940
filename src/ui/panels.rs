use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::data::model::PriceCategory;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel ("control panel" in the original dashboard).
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.label("These filters update every visual.");
    ui.separator();

    if state.table.is_none() {
        ui.label("No inventory loaded.");
        return;
    }

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            price_range_widget(ui, state);
            ui.separator();
            category_widget(ui, state);
            ui.separator();
            rating_widget(ui, state);
            ui.separator();

            if ui.button("🔄 Reset all filters").clicked() {
                state.reset_filters();
            }
        });
}

fn price_range_widget(ui: &mut Ui, state: &mut AppState) {
    ui.strong("Price range ($)");
    let (lo, hi) = state.price_span;
    let mut min = state.criteria.price_min;
    let mut max = state.criteria.price_max;

    let changed = ui
        .add(egui::Slider::new(&mut min, lo..=hi).text("min").fixed_decimals(2))
        .changed()
        | ui
            .add(egui::Slider::new(&mut max, lo..=hi).text("max").fixed_decimals(2))
            .changed();
    if changed {
        state.set_price_range(min, max);
    }
}

fn category_widget(ui: &mut Ui, state: &mut AppState) {
    let n_selected = state.criteria.categories.len();
    ui.strong(format!("Price categories ({n_selected}/3)"));
    for category in PriceCategory::ALL {
        let mut checked = state.criteria.categories.contains(&category);
        let swatch = RichText::new(category.as_str()).color(crate::color::category_color(category));
        if ui.checkbox(&mut checked, swatch).changed() {
            state.toggle_category(category);
        }
    }
}

fn rating_widget(ui: &mut Ui, state: &mut AppState) {
    let n_selected = state.criteria.ratings.len();
    ui.strong(format!("Book ratings ({n_selected}/5)"));

    ui.horizontal(|ui: &mut Ui| {
        if ui.small_button("All").clicked() {
            state.criteria.ratings = (1..=5).collect();
            state.refilter();
        }
        if ui.small_button("None").clicked() {
            state.criteria.ratings.clear();
            state.refilter();
        }
    });

    for rating in 1..=5u8 {
        let mut checked = state.criteria.ratings.contains(&rating);
        let label = format!("{rating} ★");
        if ui.checkbox(&mut checked, label).changed() {
            state.toggle_rating(rating);
        }
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            if ui.button("Reload").clicked() {
                if let Some(path) = state.source_path.clone() {
                    state.cache.invalidate(&path);
                    state.load_source(path);
                }
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(table) = &state.table {
            ui.label(format!(
                "{} books loaded, {} visible",
                table.len(),
                state.visible_indices.len()
            ));
        }

        ui.separator();

        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open book inventory")
        .add_filter("CSV", &["csv"])
        .pick_file();

    if let Some(path) = file {
        state.load_source(path);
    }
}
