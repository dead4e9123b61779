#![allow(clippy::float_cmp)]

use super::*;
use crate::consts::DEFAULT_FONT;
use crate::test_support::{FixedMeasure, fixed_metrics};

const EPSILON: f64 = 1e-10;

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

/// Measurer reporting a distinct width per character and failing on demand.
struct TableMeasure {
    fail_on: Option<char>,
}

impl TextMeasure for TableMeasure {
    type Error = String;

    fn measure(&mut self, _font: &str, text: &str) -> Result<f64, String> {
        let ch = text.chars().next().unwrap_or(' ');
        if Some(ch) == self.fail_on {
            return Err(format!("cannot measure {ch}"));
        }
        Ok(match ch {
            ' ' => 4.0,
            'W' => 16.0,
            'i' => 3.0,
            _ => 8.0,
        })
    }
}

// =============================================================
// build
// =============================================================

#[test]
fn build_measures_letters_and_space_once_per_font() {
    let mut measure = FixedMeasure::default();
    let metrics = GlyphMetrics::build(&mut measure, &["'Rock Salt'", "serif"]).unwrap();
    assert_eq!(measure.calls, 2 * 53);
    assert!(metrics.has_font("'Rock Salt'"));
    assert!(metrics.has_font("serif"));
}

#[test]
fn build_uses_reference_size_font_spec() {
    let mut measure = FixedMeasure::default();
    GlyphMetrics::build(&mut measure, &["serif"]).unwrap();
    assert_eq!(measure.fonts_seen, vec!["16px serif".to_owned()]);
}

#[test]
fn build_with_no_fonts_is_empty() {
    let mut measure = FixedMeasure::default();
    let metrics = GlyphMetrics::build::<_, &str>(&mut measure, &[]).unwrap();
    assert_eq!(measure.calls, 0);
    assert!(!metrics.has_font(DEFAULT_FONT));
}

#[test]
fn build_propagates_measure_error() {
    let mut measure = TableMeasure { fail_on: Some('Q') };
    let err = GlyphMetrics::build(&mut measure, &["serif"]).unwrap_err();
    assert!(err.contains('Q'));
}

// =============================================================
// glyph widths
// =============================================================

#[test]
fn glyph_width_at_reference_size_is_cached_value() {
    let metrics = GlyphMetrics::build(&mut TableMeasure { fail_on: None }, &["serif"]).unwrap();
    assert_eq!(metrics.glyph_width('W', "serif", 16.0), 16.0);
    assert_eq!(metrics.glyph_width('i', "serif", 16.0), 3.0);
}

#[test]
fn glyph_width_scales_linearly_with_size() {
    let metrics = fixed_metrics();
    assert!(approx_eq(metrics.glyph_width('a', DEFAULT_FONT, 20.0), 10.0));
    assert!(approx_eq(metrics.glyph_width('a', DEFAULT_FONT, 32.0), 16.0));
}

#[test]
fn glyph_width_unknown_character_uses_space_width() {
    let metrics = GlyphMetrics::build(&mut TableMeasure { fail_on: None }, &["serif"]).unwrap();
    assert_eq!(metrics.glyph_width('?', "serif", 16.0), 4.0);
    assert_eq!(metrics.glyph_width('é', "serif", 32.0), 8.0);
}

#[test]
fn glyph_width_unknown_font_falls_back_to_half_em() {
    let metrics = fixed_metrics();
    assert_eq!(metrics.glyph_width('a', "Comic Sans", 20.0), 10.0);
}

#[test]
fn try_glyph_width_reports_unknown_font() {
    let metrics = fixed_metrics();
    assert_eq!(
        metrics.try_glyph_width('a', "Comic Sans", 20.0),
        Err(MetricsError::UnknownFont("Comic Sans".into()))
    );
}

#[test]
fn try_glyph_width_reports_unmeasured_glyph() {
    let metrics = fixed_metrics();
    assert_eq!(
        metrics.try_glyph_width('!', DEFAULT_FONT, 20.0),
        Err(MetricsError::UnmeasuredGlyph { ch: '!', font: DEFAULT_FONT.into() })
    );
}

#[test]
fn text_width_sums_glyphs() {
    let metrics = GlyphMetrics::build(&mut TableMeasure { fail_on: None }, &["serif"]).unwrap();
    assert_eq!(metrics.text_width("Wi i", "serif", 16.0), 16.0 + 3.0 + 4.0 + 3.0);
}

#[test]
fn text_width_of_empty_string_is_zero() {
    let metrics = fixed_metrics();
    assert_eq!(metrics.text_width("", DEFAULT_FONT, 20.0), 0.0);
}
