use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use crate::data::model::PassStatus;

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
            let hue = 210.0 + (i as f32 / n as f32) * 360.0;
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
// Series colours: pass status → Color32
// ---------------------------------------------------------------------------

/// Fixed colour per pass status so every chart uses the same legend.
#[derive(Debug, Clone)]
pub struct SeriesColors {
    passed: Color32,
    not_passed: Color32,
}

impl Default for SeriesColors {
    fn default() -> Self {
        let palette = generate_palette(2);
        SeriesColors {
            passed: palette[0],
            not_passed: palette[1],
        }
    }
}

impl SeriesColors {
    pub fn color_for(&self, status: PassStatus) -> Color32 {
        match status {
            PassStatus::Passed => self.passed,
            PassStatus::NotPassed => self.not_passed,
        }
    }

    /// Legend entries (label → colour) for the UI.
    pub fn legend_entries(&self) -> Vec<(String, Color32)> {
        [PassStatus::Passed, PassStatus::NotPassed]
            .into_iter()
            .map(|s| (s.label().to_string(), self.color_for(s)))
            .collect()
    }
}
