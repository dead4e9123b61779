//! Text layout: wrapping prepared text into note lines and mapping each glyph
//! onto the note's deformed boundary.
//!
//! Wrapping is greedy on spaces against the glyph width cache. Layout walks a
//! "scan curve" per line, blended between the top and bottom edge curves, so
//! text bends, tilts and stretches with the paper.

#[cfg(test)]
#[path = "layout_test.rs"]
mod layout_test;

use std::rc::Rc;

use crate::bezier::EdgeCurves;
use crate::consts::{ELLIPSIS, MAX_NOTE_LINES, NOTE_TEXT_INSET, NOTE_TEXT_WIDTH};
use crate::metrics::GlyphMetrics;

/// Text bound to the metrics of the surface it will be drawn on.
#[derive(Debug, Clone)]
pub struct PreparedText {
    text: String,
    metrics: Rc<GlyphMetrics>,
}

impl PreparedText {
    #[must_use]
    pub fn new(text: impl Into<String>, metrics: Rc<GlyphMetrics>) -> Self {
        Self { text: text.into(), metrics }
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Wrap the text into at most five lines that fit a note.
    ///
    /// The prepared text is left untouched, so it can be wrapped again for
    /// another note or font.
    #[must_use]
    pub fn for_note(&self, font: &str, font_size: f64) -> WrappedText {
        wrap_for_note(&self.text, font, font_size, &self.metrics)
    }
}

/// Result of wrapping text for a note.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct WrappedText {
    pub lines: Vec<String>,
    /// Set when text was cut to fit; the cut text is gone.
    pub truncated: bool,
}

/// Greedily wrap `text` on spaces into at most [`MAX_NOTE_LINES`] lines no
/// wider than [`NOTE_TEXT_WIDTH`].
///
/// When text remains after the last line, that line is shortened one
/// character at a time and suffixed with an ellipsis until it fits. A single
/// word wider than a whole line gets the same treatment on its own line.
#[must_use]
pub fn wrap_for_note(text: &str, font: &str, font_size: f64, metrics: &GlyphMetrics) -> WrappedText {
    let fits = |candidate: &str| metrics.text_width(candidate, font, font_size) <= NOTE_TEXT_WIDTH;

    let mut words = text.split(' ');
    let mut carry = words.next().map(str::to_owned);
    let mut lines = Vec::with_capacity(MAX_NOTE_LINES);
    let mut truncated = false;

    while lines.len() < MAX_NOTE_LINES {
        let Some(first) = carry.take() else {
            break;
        };
        let mut line = if fits(&first) {
            first
        } else {
            truncated = true;
            truncate_with_ellipsis(&first, &fits)
        };

        for word in words.by_ref() {
            let candidate = format!("{line} {word}");
            if fits(&candidate) {
                line = candidate;
            } else {
                carry = Some(word.to_owned());
                break;
            }
        }
        lines.push(line);
    }

    if carry.is_some() {
        truncated = true;
        if let Some(last) = lines.last_mut() {
            *last = truncate_with_ellipsis(last, &fits);
        }
    }

    WrappedText { lines, truncated }
}

/// Drop trailing characters from `line` until `line + "..."` fits.
fn truncate_with_ellipsis(line: &str, fits: &impl Fn(&str) -> bool) -> String {
    let chars: Vec<char> = line.chars().collect();
    for keep in (0..=chars.len()).rev() {
        let mut candidate: String = chars[..keep].iter().collect();
        candidate.push_str(ELLIPSIS);
        if fits(&candidate) {
            return candidate;
        }
    }
    ELLIPSIS.to_owned()
}

/// A single glyph placed on a note.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Glyph {
    pub ch: char,
    /// Baseline anchor in wall coordinates.
    pub x: f64,
    pub y: f64,
    /// Uniform scale applied when drawing; 1.0 on undeformed paper.
    pub scale: f64,
    /// Rotation in radians, following the scan curve's tangent.
    pub rotation: f64,
}

/// Font and box dimensions used when mapping lines onto curves.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextBox {
    pub font_size: f64,
    pub line_height: f64,
    pub width: f64,
    pub height: f64,
}

/// Place every glyph of `lines` on scan curves between the top and bottom edges.
///
/// Line `i` sits at ratio `(i + 1) * line_height / height` down the box. Each
/// glyph is anchored at the scan-curve point for its cumulative advance
/// (starting [`NOTE_TEXT_INSET`] in), rotated along the direction to the next
/// anchor, and scaled by its height above the previous line relative to the
/// line height.
#[must_use]
pub fn layout_on_curves(
    lines: &[String],
    font: &str,
    text_box: &TextBox,
    curves: &EdgeCurves,
    metrics: &GlyphMetrics,
) -> Vec<Vec<Glyph>> {
    let mut previous_line_y = curves.top.start().y;
    let mut laid_out = Vec::with_capacity(lines.len());

    for (i, line) in lines.iter().enumerate() {
        #[allow(clippy::cast_precision_loss)]
        let ratio = text_box.line_height * (i + 1) as f64 / text_box.height;
        let scan = curves.scan_curve(ratio);

        let mut offset = NOTE_TEXT_INSET;
        let mut anchor = scan.at(offset / text_box.width);
        let mut glyphs = Vec::with_capacity(line.len());

        for ch in line.chars() {
            let scale = (anchor.y - previous_line_y) / text_box.line_height;
            offset += metrics.glyph_width(ch, font, text_box.font_size);
            let next = scan.at(offset / text_box.width);
            let rotation = (next.y - anchor.y).atan2(next.x - anchor.x);
            glyphs.push(Glyph { ch, x: anchor.x, y: anchor.y, scale, rotation });
            anchor = next;
        }

        laid_out.push(glyphs);
        previous_line_y = scan.start().y;
    }

    laid_out
}
