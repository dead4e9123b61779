//! Glyph width cache built once per process from a text measurement backend.
//!
//! Measuring text through the browser is slow, so every registered font is
//! measured once at [`REFERENCE_FONT_SIZE`] for the 52 ASCII letters plus the
//! space character. Lookups scale the cached width linearly to the requested
//! size. The cache is owned by whoever builds it and handed to the layout
//! engine by reference.

#[cfg(test)]
#[path = "metrics_test.rs"]
mod metrics_test;

use std::collections::HashMap;

use crate::consts::{FALLBACK_GLYPH_RATIO, REFERENCE_FONT_SIZE};

/// Rendered-width measurement, implemented by the browser's 2-D context.
pub trait TextMeasure {
    type Error;

    /// Width of `text` rendered with the CSS font shorthand `font`.
    ///
    /// # Errors
    ///
    /// Returns the backend's error if measuring fails.
    fn measure(&mut self, font: &str, text: &str) -> Result<f64, Self::Error>;
}

/// Why a width lookup had to fall back to a default.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MetricsError {
    /// The font was never registered with [`GlyphMetrics::build`].
    #[error("font {0} has no cached metrics")]
    UnknownFont(String),
    /// The font is known but this character was not in the measured set.
    #[error("glyph {ch:?} was not measured for font {font}")]
    UnmeasuredGlyph { ch: char, font: String },
}

/// Cached glyph widths for every registered font, at the reference size.
#[derive(Debug, Clone, Default)]
pub struct GlyphMetrics {
    fonts: HashMap<String, HashMap<char, f64>>,
}

impl GlyphMetrics {
    /// Measure `a-z`, `A-Z` and space for every font in `fonts`.
    ///
    /// # Errors
    ///
    /// Returns the first measurement error reported by `measure`.
    pub fn build<M, S>(measure: &mut M, fonts: &[S]) -> Result<Self, M::Error>
    where
        M: TextMeasure,
        S: AsRef<str>,
    {
        let mut metrics = Self::default();
        for font in fonts {
            let family = font.as_ref();
            let css_font = format!("{REFERENCE_FONT_SIZE}px {family}");
            let mut widths = HashMap::with_capacity(53);
            for ch in ('a'..='z').chain('A'..='Z').chain(std::iter::once(' ')) {
                let width = measure.measure(&css_font, ch.encode_utf8(&mut [0; 4]))?;
                widths.insert(ch, width);
            }
            log::debug!("cached {} glyph widths for {family}", widths.len());
            metrics.fonts.insert(family.to_owned(), widths);
        }
        Ok(metrics)
    }

    /// Whether `font` was measured.
    #[must_use]
    pub fn has_font(&self, font: &str) -> bool {
        self.fonts.contains_key(font)
    }

    /// Width of `ch` in `font` at `size`, or a typed reason why it is unknown.
    ///
    /// # Errors
    ///
    /// [`MetricsError::UnknownFont`] when the font was never measured and
    /// [`MetricsError::UnmeasuredGlyph`] when the character is outside the
    /// measured set.
    pub fn try_glyph_width(&self, ch: char, font: &str, size: f64) -> Result<f64, MetricsError> {
        let widths = self
            .fonts
            .get(font)
            .ok_or_else(|| MetricsError::UnknownFont(font.to_owned()))?;
        let width = widths
            .get(&ch)
            .ok_or_else(|| MetricsError::UnmeasuredGlyph { ch, font: font.to_owned() })?;
        Ok(width * size / REFERENCE_FONT_SIZE)
    }

    /// Width of `ch` in `font` at `size`, never failing.
    ///
    /// Unmeasured characters take the width of a space; unknown fonts assume
    /// half an em per glyph.
    #[must_use]
    pub fn glyph_width(&self, ch: char, font: &str, size: f64) -> f64 {
        match self.try_glyph_width(ch, font, size) {
            Ok(width) => width,
            Err(MetricsError::UnmeasuredGlyph { .. }) => self
                .try_glyph_width(' ', font, size)
                .unwrap_or(size * FALLBACK_GLYPH_RATIO),
            Err(err) => {
                log::trace!("{err}; using fallback width");
                size * FALLBACK_GLYPH_RATIO
            }
        }
    }

    /// Sum of the glyph widths of `text`.
    #[must_use]
    pub fn text_width(&self, text: &str, font: &str, size: f64) -> f64 {
        text.chars().map(|ch| self.glyph_width(ch, font, size)).sum()
    }
}
