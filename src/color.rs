use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use crate::data::model::PriceCategory;

// ---------------------------------------------------------------------------
// Category colors – fixed palette shared by every chart
// ---------------------------------------------------------------------------

/// The fixed per-category colors used across all charts, matching the
/// original dashboard palette (Low #636EFA, Medium #EF553B, High #00CC96).
pub fn category_color(category: PriceCategory) -> Color32 {
    match category {
        PriceCategory::Low => Color32::from_rgb(0x63, 0x6E, 0xFA),
        PriceCategory::Medium => Color32::from_rgb(0xEF, 0x55, 0x3B),
        PriceCategory::High => Color32::from_rgb(0x00, 0xCC, 0x96),
    }
}

// ---------------------------------------------------------------------------
// Series palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues. Used for
/// series without a fixed mapping, e.g. one bar per rating score.
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

/// Colour for one rating score (1..=5), drawn from a fixed five-hue palette
/// so the same score keeps the same colour as filters change.
pub fn rating_color(score: u8) -> Color32 {
    let palette = generate_palette(5);
    let idx = usize::from(score.clamp(1, 5)) - 1;
    palette[idx]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_is_distinct_and_sized() {
        let colors = generate_palette(5);
        assert_eq!(colors.len(), 5);
        for (i, a) in colors.iter().enumerate() {
            for b in colors.iter().skip(i + 1) {
                assert_ne!(a, b);
            }
        }
        assert!(generate_palette(0).is_empty());
    }

    #[test]
    fn rating_color_is_stable_per_score() {
        assert_eq!(rating_color(3), rating_color(3));
        assert_ne!(rating_color(1), rating_color(5));
        // Out-of-range scores clamp instead of panicking.
        assert_eq!(rating_color(0), rating_color(1));
        assert_eq!(rating_color(9), rating_color(5));
    }
}
