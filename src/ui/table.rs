use eframe::egui::{self, RichText, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::export;
use crate::data::model::BookTable;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Drill-through: raw filtered data + CSV download
// ---------------------------------------------------------------------------

const COLUMNS: [&str; 5] = ["Title", "Price ($)", "Title length", "Category", "Rating"];

/// Render the collapsible raw-data panel over the filtered view, with the
/// report download button.
pub fn drill_through(ui: &mut Ui, state: &mut AppState, table: &BookTable) {
    egui::CollapsingHeader::new(RichText::new("🔍 Drill through: detailed raw data").strong())
        .default_open(false)
        .show(ui, |ui: &mut Ui| {
            ui.label("The filtered dataset behind every visual above.");

            if ui.button("Download report (CSV)").clicked() {
                save_report(state, table);
            }
            ui.add_space(4.0);

            data_grid(ui, table, &state.visible_indices);
        });
}

fn data_grid(ui: &mut Ui, table: &BookTable, indices: &[usize]) {
    TableBuilder::new(ui)
        .striped(true)
        .column(Column::remainder().at_least(160.0))
        .columns(Column::auto().at_least(70.0), COLUMNS.len() - 1)
        .header(20.0, |mut header| {
            for title in COLUMNS {
                header.col(|ui: &mut Ui| {
                    ui.strong(title);
                });
            }
        })
        .body(|body| {
            body.rows(18.0, indices.len(), |mut row| {
                let record = &table.records[indices[row.index()]];
                row.col(|ui: &mut Ui| {
                    ui.label(&record.title);
                });
                row.col(|ui: &mut Ui| {
                    ui.label(format!("{:.2}", record.price));
                });
                row.col(|ui: &mut Ui| {
                    ui.label(record.title_length.to_string());
                });
                row.col(|ui: &mut Ui| {
                    ui.label(record.price_category.as_str());
                });
                row.col(|ui: &mut Ui| {
                    ui.label(format!("{} ★", record.rating_score));
                });
            });
        });
}

fn save_report(state: &mut AppState, table: &BookTable) {
    let file = rfd::FileDialog::new()
        .set_title("Save filtered report")
        .set_file_name(export::REPORT_FILE_NAME)
        .add_filter("CSV", &["csv"])
        .save_file();

    if let Some(path) = file {
        match export::write_csv_file(table, &state.visible_indices, &path) {
            Ok(()) => {
                log::info!(
                    "exported {} records to {}",
                    state.visible_indices.len(),
                    path.display()
                );
                state.status_message =
                    Some(format!("Report saved to {}", path.display()));
            }
            Err(e) => {
                log::error!("export failed: {e:#}");
                state.status_message = Some(format!("Export error: {e:#}"));
            }
        }
    }
}
