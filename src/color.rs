use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use crate::data::model::Variable;

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

fn hsl_to_color32(hue: f32, saturation: f32, lightness: f32) -> Color32 {
    let rgb: Srgb = Hsl::new(hue, saturation, lightness).into_color();
    Color32::from_rgb(
        (rgb.red * 255.0) as u8,
        (rgb.green * 255.0) as u8,
        (rgb.blue * 255.0) as u8,
    )
}

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    (0..n)
        .map(|i| hsl_to_color32((i as f32 / n as f32) * 360.0, 0.75, 0.55))
        .collect()
}

/// Line colour for a variable, stable across redraws.
pub fn variable_color(variable: Variable) -> Color32 {
    let idx = Variable::ALL
        .iter()
        .position(|v| *v == variable)
        .unwrap_or(0);
    generate_palette(Variable::ALL.len())[idx]
}

// ---------------------------------------------------------------------------
// Temperature gradient: value → Color32
// ---------------------------------------------------------------------------

/// Maps temperatures onto a blue→red gradient split into discrete bins.
#[derive(Debug, Clone, Copy)]
pub struct TemperatureScale {
    min: f64,
    max: f64,
    bins: usize,
}

impl TemperatureScale {
    /// Scale spanning the given values. `None` when there are no values.
    pub fn from_values(values: impl IntoIterator<Item = f64>, bins: usize) -> Option<Self> {
        let (min, max) = values
            .into_iter()
            .fold(None, |acc: Option<(f64, f64)>, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })?;
        Some(Self {
            min,
            max,
            bins: bins.max(1),
        })
    }

    pub fn bins(&self) -> usize {
        self.bins
    }

    /// Bin index of `value`, clamped to the scale.
    pub fn bin_of(&self, value: f64) -> usize {
        let range = self.max - self.min;
        if range.abs() < f64::EPSILON {
            return 0;
        }
        let t = ((value - self.min) / range).clamp(0.0, 1.0);
        ((t * self.bins as f64) as usize).min(self.bins - 1)
    }

    /// Colour of a bin: hue 240° (blue) for the coldest, 0° (red) for the warmest.
    pub fn bin_color(&self, bin: usize) -> Color32 {
        let t = if self.bins <= 1 {
            0.0
        } else {
            bin as f32 / (self.bins - 1) as f32
        };
        hsl_to_color32(240.0 * (1.0 - t), 0.8, 0.5)
    }

    /// Lower edge of a bin in value units, for legend labels.
    pub fn bin_start(&self, bin: usize) -> f64 {
        self.min + (self.max - self.min) * bin as f64 / self.bins as f64
    }
}
