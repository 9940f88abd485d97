use eframe::egui::Ui;
use egui_plot::{GridMark, Legend, Line, Plot, PlotPoint, PlotPoints};

use crate::color::series_color;
use crate::data::aggregate::{AggregateSeries, SeriesPoint};

// ---------------------------------------------------------------------------
// Value formatting
// ---------------------------------------------------------------------------

/// Render an integer count with thousands separators: `12345` → `12,345`.
pub fn format_count(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Axis tick label for an enrollment value. Fractional ticks are left blank.
fn count_tick(mark: GridMark, _range: &std::ops::RangeInclusive<f64>) -> String {
    let v = mark.value;
    if v < 0.0 || v.fract().abs() > f64::EPSILON {
        String::new()
    } else {
        format_count(v as u64)
    }
}

/// Axis tick label for a year. Only whole years are labelled.
fn year_tick(mark: GridMark, _range: &std::ops::RangeInclusive<f64>) -> String {
    let v = mark.value;
    if v.fract().abs() > f64::EPSILON {
        String::new()
    } else {
        format!("{}", v as i64)
    }
}

// ---------------------------------------------------------------------------
// Enrollment chart (central panel)
// ---------------------------------------------------------------------------

/// Render one line per category of `series`, years on the x axis.
pub fn enrollment_chart<P: SeriesPoint>(ui: &mut Ui, id: &str, series: &AggregateSeries<P>) {
    if series.is_empty() {
        ui.label("No years to show.");
        return;
    }

    Plot::new(id)
        .legend(Legend::default())
        .height(320.0)
        .x_axis_label("Years")
        .y_axis_label("Enrollments")
        .x_axis_formatter(year_tick)
        .y_axis_formatter(count_tick)
        .label_formatter(|name, value: &PlotPoint| {
            let year = value.x.round() as i64;
            let count = format_count(value.y.max(0.0).round() as u64);
            if name.is_empty() {
                format!("{year}\n{count}")
            } else {
                format!("{name}\n{year}: {count}")
            }
        })
        .include_y(0.0)
        .include_y(series.peak().max(10) as f64)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(false)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for (idx, category) in P::CATEGORIES.iter().enumerate() {
                let points: PlotPoints = series
                    .iter()
                    .map(|p| [p.year() as f64, p.value(idx) as f64])
                    .collect();

                let line = Line::new(points)
                    .name(*category)
                    .color(series_color(category))
                    .width(2.0);

                plot_ui.line(line);
            }
        });
}
