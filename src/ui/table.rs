use eframe::egui::{RichText, Ui};
use egui_extras::{Column, TableBuilder};

use crate::color::series_color;
use crate::data::aggregate::{AggregateSeries, SeriesPoint};
use crate::ui::plot::format_count;

/// Tabular view of a series: one row per year, one column per category.
pub fn series_table<P: SeriesPoint>(ui: &mut Ui, id: &str, series: &AggregateSeries<P>) {
    ui.push_id(id, |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .max_scroll_height(240.0)
            .column(Column::exact(60.0))
            .columns(Column::remainder(), P::CATEGORIES.len())
            .header(20.0, |mut header| {
                header.col(|ui: &mut Ui| {
                    ui.strong("Year");
                });
                for category in P::CATEGORIES {
                    header.col(|ui: &mut Ui| {
                        ui.label(RichText::new(*category).strong().color(series_color(category)));
                    });
                }
            })
            .body(|body| {
                body.rows(18.0, series.len(), |mut row| {
                    let point = &series.points()[row.index()];
                    row.col(|ui: &mut Ui| {
                        ui.label(point.year().to_string());
                    });
                    for idx in 0..P::CATEGORIES.len() {
                        row.col(|ui: &mut Ui| {
                            ui.label(format_count(point.value(idx)));
                        });
                    }
                });
            });
    });
}
