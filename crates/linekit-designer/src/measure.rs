//! Approximate text metrics for inline labels.
//!
//! Width is measured with real font metrics when a system face is
//! available, otherwise estimated from an average advance per character.
//! Height is always the text scale: labels are sized by cap height, so
//! descenders are allowed to hang outside the box.

use linekit_core::constants::{FONT_SIZE_FACTOR, PIXELS_PER_UNIT};
use linekit_core::units::round_to;
use rusttype::{point as rt_point, Scale};
use serde::{Deserialize, Serialize};

use crate::font_manager::{self, FontFamily};
use crate::model::TextSpec;

/// Width and height of a label in drawing units
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TextSize {
    pub width: f64,
    pub height: f64,
}

/// Source of text advance widths.
pub trait TextMeasurer {
    /// Advance width of `text` set at `font_size_px` pixels, in pixels.
    fn text_width_px(&self, text: &str, font_size_px: f64, family: FontFamily) -> f64;

    fn measure(&self, spec: &TextSpec) -> TextSize {
        let font_size_px = spec.scale * PIXELS_PER_UNIT * FONT_SIZE_FACTOR;
        let family = FontFamily::for_style(&spec.style);
        TextSize {
            width: self.text_width_px(&spec.content, font_size_px, family) / PIXELS_PER_UNIT,
            height: spec.scale,
        }
    }
}

/// Fixed average advance per character, as a fraction of the font size.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApproximateMeasurer;

impl ApproximateMeasurer {
    fn advance_ratio(family: FontFamily) -> f64 {
        match family {
            FontFamily::Sans => 0.55,
            FontFamily::Serif => 0.5,
            FontFamily::Monospace => 0.6,
        }
    }
}

impl TextMeasurer for ApproximateMeasurer {
    fn text_width_px(&self, text: &str, font_size_px: f64, family: FontFamily) -> f64 {
        text.chars().count() as f64 * font_size_px * Self::advance_ratio(family)
    }
}

/// Advance widths and kerning from installed system fonts.
#[derive(Debug, Clone, Copy, Default)]
pub struct FontMeasurer;

impl TextMeasurer for FontMeasurer {
    fn text_width_px(&self, text: &str, font_size_px: f64, family: FontFamily) -> f64 {
        let Some(font) = font_manager::font_for(family) else {
            return ApproximateMeasurer.text_width_px(text, font_size_px, family);
        };
        let scale = Scale::uniform(font_size_px as f32);
        font.layout(text, scale, rt_point(0.0, 0.0))
            .last()
            .map(|glyph| {
                glyph.position().x as f64
                    + glyph.unpositioned().h_metrics().advance_width as f64
            })
            .unwrap_or(0.0)
    }
}

/// Which measurer a session renders with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MeasureBackend {
    /// System fonts, falling back to approximate metrics per family
    #[default]
    System,
    /// Approximate metrics only; deterministic across machines
    Approximate,
}

impl MeasureBackend {
    pub fn measurer(self) -> &'static dyn TextMeasurer {
        match self {
            Self::System => &FontMeasurer,
            Self::Approximate => &ApproximateMeasurer,
        }
    }
}

/// Offsets that center the label on its placement point.
///
/// Returns `(x_offset, y_offset)` rounded to hundredths. The result depends
/// only on content, style and scale, so applying it twice changes nothing.
pub fn center_offsets(spec: &TextSpec, measurer: &dyn TextMeasurer) -> (f64, f64) {
    let size = measurer.measure(spec);
    (round_to(-size.width / 2.0, 2), round_to(-size.height / 2.0, 2))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_height_is_scale() {
        let spec = TextSpec::default();
        let size = ApproximateMeasurer.measure(&spec);
        assert_eq!(size.height, 0.1);
    }

    #[test]
    fn test_approximate_width() {
        // 4 chars at 0.14 units font size, 0.55 advance
        let size = ApproximateMeasurer.measure(&TextSpec::new("TEXT"));
        assert!((size.width - 4.0 * 0.14 * 0.55).abs() < 1e-9);

        let mut mono = TextSpec::new("TEXT");
        mono.style = "MONOTXT".into();
        let size = ApproximateMeasurer.measure(&mono);
        assert!((size.width - 4.0 * 0.14 * 0.6).abs() < 1e-9);
    }

    #[test]
    fn test_center_offsets_are_idempotent() {
        let mut spec = TextSpec::new("GAS");
        let first = center_offsets(&spec, &ApproximateMeasurer);
        spec.x_offset = first.0;
        spec.y_offset = first.1;
        assert_eq!(center_offsets(&spec, &ApproximateMeasurer), first);
        assert_eq!(first.1, -0.05);
    }

    #[test]
    fn test_font_measurer_is_positive_for_text() {
        let size = FontMeasurer.measure(&TextSpec::new("TEXT"));
        assert!(size.width > 0.0);
        let empty = FontMeasurer.measure(&TextSpec::new(""));
        assert_eq!(empty.width, 0.0);
    }
}
