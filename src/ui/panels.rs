use std::path::Path;

use eframe::egui::{self, Color32, RichText, Ui};
use serde::Serialize;

use crate::color::series_color;
use crate::data::aggregate::{AggregateSeries, SeriesPoint};
use crate::data::catalog::{self, CATALOG};
use crate::data::export::write_series_csv;
use crate::state::AppState;
use crate::ui::plot::format_count;

// ---------------------------------------------------------------------------
// Left side panel – language selector and summary
// ---------------------------------------------------------------------------

/// Render the left selector panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Language");
    ui.separator();

    let current_value = state.selection().value().to_string();
    let current_label = catalog::label_for(state.selection()).to_string();

    egui::ComboBox::from_id_salt("language_select")
        .selected_text(current_label)
        .width(ui.available_width())
        .height(384.0)
        .show_ui(ui, |ui: &mut Ui| {
            for group in CATALOG {
                ui.label(RichText::new(group.label).small().weak());
                for entry in group.entries {
                    if ui
                        .selectable_label(current_value == entry.value, entry.label)
                        .clicked()
                    {
                        // Rejections are logged and shown in the status bar by the state.
                        let _ = state.on_language_selected(entry.value);
                    }
                }
                ui.add_space(4.0);
            }
        });

    ui.add_space(8.0);
    ui.label(format!("Years {}", state.year_range));
    if let Some(ds) = &state.dataset {
        if let Some((lo, hi)) = ds.observed_years {
            ui.label(RichText::new(format!("Data spans {lo}–{hi}")).weak());
        }
    }
    ui.separator();

    let last = state.year_range.last();
    if let (Some(term), Some(level)) = (state.by_term().get(last), state.by_level().get(last)) {
        ui.strong(format!("In {last}"));
        ui.label(format!(
            "{} students ({} Fall, {} Winter)",
            format_count(term.fall.saturating_add(term.winter)),
            format_count(term.fall),
            format_count(term.winter)
        ));
        ui.label(format!(
            "{} beginner, {} intermediate, {} advanced",
            format_count(level.beginner),
            format_count(level.intermediate),
            format_count(level.advanced)
        ));
        ui.separator();
    }

    ui.strong("Totals");
    totals_grid(ui, "term_totals", state.by_term());
    ui.add_space(4.0);
    totals_grid(ui, "level_totals", state.by_level());
}

fn totals_grid<P: SeriesPoint>(ui: &mut Ui, id: &str, series: &AggregateSeries<P>) {
    egui::Grid::new(id)
        .num_columns(2)
        .striped(true)
        .show(ui, |ui: &mut Ui| {
            for (idx, category) in P::CATEGORIES.iter().enumerate() {
                ui.label(RichText::new(*category).color(series_color(category)));
                ui.label(format_count(series.total(idx)));
                ui.end_row();
            }
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open dataset…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            ui.separator();
            if ui.button("Export term series…").clicked() {
                export_dialog(state, "enrollment_by_term.csv", AppState::by_term);
                ui.close_menu();
            }
            if ui.button("Export level series…").clicked() {
                export_dialog(state, "enrollment_by_level.csv", AppState::by_level);
                ui.close_menu();
            }
        });

        ui.separator();

        match &state.dataset {
            Some(ds) => {
                ui.label(format!(
                    "{} records loaded, {} match {}",
                    ds.len(),
                    state.matching_records,
                    catalog::label_for(state.selection())
                ));
            }
            None => {
                ui.label("No dataset loaded");
            }
        }

        ui.separator();

        if ui.selectable_label(state.show_tables, "Data tables").clicked() {
            state.show_tables = !state.show_tables;
        }

        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open enrollment data")
        .add_filter("Supported files", &["json", "csv", "parquet", "pq"])
        .add_filter("JSON", &["json"])
        .add_filter("CSV", &["csv"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        load_into(state, &path);
    }
}

/// Load `path` and hand it to the state, reporting failures in the status bar.
pub fn load_into(state: &mut AppState, path: &Path) {
    match crate::data::loader::load_file(path) {
        Ok(dataset) => {
            if dataset.is_empty() {
                log::warn!("{} contains no records", path.display());
            }
            log::info!(
                "Loaded {} records covering {} languages from {}",
                dataset.len(),
                dataset.languages.len(),
                path.display()
            );
            state.set_dataset(dataset);
        }
        Err(e) => {
            log::error!("Failed to load {}: {e:#}", path.display());
            state.status_message = Some(format!("Error: {e:#}"));
        }
    }
}

fn export_dialog<P, F>(state: &mut AppState, default_name: &str, pick: F)
where
    P: SeriesPoint + Serialize,
    F: Fn(&AppState) -> &AggregateSeries<P>,
{
    let file = rfd::FileDialog::new()
        .set_title("Export series")
        .set_file_name(default_name)
        .add_filter("CSV", &["csv"])
        .save_file();

    let Some(path) = file else {
        return;
    };

    if let Err(e) = write_series_csv(&path, pick(&*state)) {
        log::error!("Failed to export {}: {e:#}", path.display());
        state.status_message = Some(format!("Error: {e:#}"));
    }
}
