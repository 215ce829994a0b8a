use std::collections::{BTreeMap, BTreeSet};

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
// Color mapping: topic → Color32
// ---------------------------------------------------------------------------

/// Assigns each observed topic a fixed colour, so a line keeps its colour
/// while other topics are toggled on and off.
#[derive(Debug, Clone, Default)]
pub struct TopicColors {
    mapping: BTreeMap<String, Color32>,
}

impl TopicColors {
    pub fn new(topics: &BTreeSet<String>) -> Self {
        let palette = generate_palette(topics.len());
        let mapping = topics.iter().cloned().zip(palette).collect();
        TopicColors { mapping }
    }

    pub fn color_for(&self, topic: &str) -> Color32 {
        self.mapping.get(topic).copied().unwrap_or(Color32::GRAY)
    }
}
