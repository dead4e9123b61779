//! Shared fixtures for unit tests: deterministic glyph metrics.

use std::convert::Infallible;
use std::rc::Rc;

use crate::consts::DEFAULT_FONT;
use crate::metrics::{GlyphMetrics, TextMeasure};

/// Glyph width at the 16px reference size; 10 units per glyph at 20px.
pub const FIXED_GLYPH_WIDTH: f64 = 8.0;

/// Measures every character as [`FIXED_GLYPH_WIDTH`] and counts calls.
#[derive(Debug, Default)]
pub struct FixedMeasure {
    pub calls: usize,
    pub fonts_seen: Vec<String>,
}

impl TextMeasure for FixedMeasure {
    type Error = Infallible;

    #[allow(clippy::cast_precision_loss)]
    fn measure(&mut self, font: &str, text: &str) -> Result<f64, Infallible> {
        self.calls += 1;
        if !self.fonts_seen.iter().any(|f| f == font) {
            self.fonts_seen.push(font.to_owned());
        }
        Ok(FIXED_GLYPH_WIDTH * text.chars().count() as f64)
    }
}

/// Metrics for [`DEFAULT_FONT`] where every glyph is the same width.
pub fn fixed_metrics() -> Rc<GlyphMetrics> {
    match GlyphMetrics::build(&mut FixedMeasure::default(), &[DEFAULT_FONT]) {
        Ok(metrics) => Rc::new(metrics),
        Err(never) => match never {},
    }
}
