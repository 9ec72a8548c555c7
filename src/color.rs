use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.55);
            let rgb: Srgb = hsl.into_color();
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Color mapping: booster category → Color32
// ---------------------------------------------------------------------------

/// Maps booster version categories to distinct colours for the scatter
/// chart and its side-panel legend.
#[derive(Debug, Clone)]
pub struct ColorMap {
    mapping: BTreeMap<String, Color32>,
    default_color: Color32,
}

impl ColorMap {
    /// Build a colour map over the dataset's distinct booster categories.
    pub fn new(categories: &[String]) -> Self {
        let palette = generate_palette(categories.len());
        let mapping: BTreeMap<String, Color32> = categories
            .iter()
            .cloned()
            .zip(palette.into_iter())
            .collect();

        ColorMap {
            mapping,
            default_color: Color32::GRAY,
        }
    }

    /// Look up the colour for a booster category.
    pub fn color_for(&self, category: &str) -> Color32 {
        self.mapping
            .get(category)
            .copied()
            .unwrap_or(self.default_color)
    }

    /// Return the legend entries (category label → colour) for the UI.
    pub fn legend_entries(&self) -> Vec<(String, Color32)> {
        self.mapping
            .iter()
            .map(|(category, color): (&String, &Color32)| (category.clone(), *color))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_has_requested_length() {
        assert!(generate_palette(0).is_empty());
        assert_eq!(generate_palette(5).len(), 5);
    }

    #[test]
    fn small_palettes_are_distinct() {
        let palette = generate_palette(6);
        for (i, a) in palette.iter().enumerate() {
            for b in &palette[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn unknown_category_falls_back_to_default() {
        let cm = ColorMap::new(&["FT".to_string(), "B4".to_string()]);

        assert_ne!(cm.color_for("FT"), cm.color_for("B4"));
        assert_eq!(cm.color_for("B9"), Color32::GRAY);
    }

    #[test]
    fn legend_covers_every_category() {
        let categories: Vec<String> =
            ["B4", "B5", "FT"].iter().map(|s| s.to_string()).collect();
        let cm = ColorMap::new(&categories);

        let labels: Vec<String> = cm.legend_entries().into_iter().map(|(l, _)| l).collect();
        assert_eq!(labels, categories);
    }
}
