use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

// ---------------------------------------------------------------------------
// Series colours
// ---------------------------------------------------------------------------

/// Hues (degrees) of the named series colours.
const AMBER: f32 = 38.0;
const CYAN: f32 = 189.0;
const LIME: f32 = 84.0;
const VIOLET: f32 = 258.0;
const EMERALD: f32 = 160.0;

/// Convert an HSL triple to an egui colour.
pub fn hsl_to_color32(hue: f32, saturation: f32, lightness: f32) -> Color32 {
    let hsl = Hsl::new(hue, saturation, lightness);
    let rgb: Srgb = hsl.into_color();
    Color32::from_rgb(
        (rgb.red.clamp(0.0, 1.0) * 255.0).round() as u8,
        (rgb.green.clamp(0.0, 1.0) * 255.0).round() as u8,
        (rgb.blue.clamp(0.0, 1.0) * 255.0).round() as u8,
    )
}

/// Line colour for a chart category. Unknown categories fall back to grey.
pub fn series_color(category: &str) -> Color32 {
    let hue = match category {
        "Fall" => AMBER,
        "Winter" => CYAN,
        "Beginner" => LIME,
        "Intermediate" => VIOLET,
        "Advanced" => EMERALD,
        _ => return Color32::GRAY,
    };
    hsl_to_color32(hue, 0.85, 0.55)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::aggregate::{LevelPoint, SeriesPoint, TermPoint};

    #[test]
    fn pure_hues_convert_exactly() {
        assert_eq!(hsl_to_color32(0.0, 1.0, 0.5), Color32::from_rgb(255, 0, 0));
        assert_eq!(hsl_to_color32(120.0, 1.0, 0.5), Color32::from_rgb(0, 255, 0));
    }

    #[test]
    fn every_category_gets_a_distinct_colour() {
        let colors: Vec<Color32> = TermPoint::CATEGORIES
            .iter()
            .chain(LevelPoint::CATEGORIES)
            .map(|c| series_color(c))
            .collect();
        for (i, a) in colors.iter().enumerate() {
            assert_ne!(*a, Color32::GRAY);
            for b in &colors[i + 1..] {
                assert_ne!(a, b);
            }
        }
        assert_eq!(series_color("Spring"), Color32::GRAY);
    }
}
