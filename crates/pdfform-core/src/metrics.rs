//! Glyph width measurement seam
//!
//! Font metrics are not computed here. Callers plug in whatever font engine
//! they render with; anything `Fn(&str, &str, f64) -> f64` works.

pub trait FontMetrics {
    /// Width in points of `text` set in `font` at `font_size`
    fn string_width(&self, text: &str, font: &str, font_size: f64) -> f64;
}

impl<F> FontMetrics for F
where
    F: Fn(&str, &str, f64) -> f64,
{
    fn string_width(&self, text: &str, font: &str, font_size: f64) -> f64 {
        self(text, font, font_size)
    }
}

/// Every character advances by the same fraction of the font size, whatever the font
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedAdvance {
    pub em_fraction: f64,
}

impl Default for FixedAdvance {
    fn default() -> Self {
        Self { em_fraction: 0.5 }
    }
}

impl FontMetrics for FixedAdvance {
    fn string_width(&self, text: &str, _font: &str, font_size: f64) -> f64 {
        text.chars().count() as f64 * font_size * self.em_fraction
    }
}
