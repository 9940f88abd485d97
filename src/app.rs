use eframe::egui::{self, Ui};

use crate::config::DashboardConfig;
use crate::state::AppState;
use crate::ui::{panels, plot, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct DyingDialectsApp {
    pub state: AppState,
}

impl DyingDialectsApp {
    pub fn new(cc: &eframe::CreationContext<'_>, config: DashboardConfig) -> Self {
        cc.egui_ctx.set_visuals(egui::Visuals::dark());

        let mut state = AppState::new(config.year_range);
        if let Some(path) = &config.data_path {
            panels::load_into(&mut state, path);
        }

        Self { state }
    }
}

impl eframe::App for DyingDialectsApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: language selector ----
        egui::SidePanel::left("language_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: charts ----
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui: &mut Ui| {
                    let state = &self.state;

                    ui.vertical_centered(|ui: &mut Ui| {
                        ui.heading("Enrollment by Term (Fall vs Winter)");
                    });
                    plot::enrollment_chart(ui, "by_term_chart", state.by_term());
                    if state.show_tables {
                        table::series_table(ui, "by_term_table", state.by_term());
                    }

                    ui.add_space(24.0);

                    ui.vertical_centered(|ui: &mut Ui| {
                        ui.heading("Enrollment by Course Level (Beginner, Intermediate, Advanced)");
                    });
                    plot::enrollment_chart(ui, "by_level_chart", state.by_level());
                    if state.show_tables {
                        table::series_table(ui, "by_level_table", state.by_level());
                    }
                });
        });
    }
}
