//! The note ("sticky") model: position, corner lift, boundary curves and text.
//!
//! A note is a fixed-size square whose four corners can be lifted off the
//! wall. Corner heights drive the four edge curves, and the edge curves drive
//! where every glyph of the note's text lands. Whenever position or heights
//! change, curves and glyphs are recomputed together so they never go stale.

#[cfg(test)]
#[path = "note_test.rs"]
mod note_test;

use std::rc::Rc;

use uuid::Uuid;

use crate::bezier::{CubicBezier, EdgeCurves};
use crate::camera::Point;
use crate::consts::{
    HOVER_FADE_BAND, HOVER_LIFT_RANGE, LIFTED_HEIGHT, NOTE_FONT_SIZE, NOTE_LINE_HEIGHT, NOTE_SIDE, PAPER_COLOR,
    RESTING_BOTTOM_HEIGHT,
};
use crate::layout::{Glyph, PreparedText, TextBox, WrappedText, layout_on_curves};
use crate::metrics::GlyphMetrics;
use crate::render::{self, RenderSurface};

/// Unique identifier for a note.
pub type NoteId = Uuid;

const NOTE_TEXT_BOX: TextBox = TextBox {
    font_size: NOTE_FONT_SIZE,
    line_height: NOTE_LINE_HEIGHT,
    width: NOTE_SIDE,
    height: NOTE_SIDE,
};

/// How far each corner is lifted off the wall.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CornerHeights {
    pub top_left: f64,
    pub top_right: f64,
    pub bottom_left: f64,
    pub bottom_right: f64,
}

impl CornerHeights {
    /// Default pose: top pinned, bottom slightly curled.
    pub const RESTING: Self = Self {
        top_left: 0.0,
        top_right: 0.0,
        bottom_left: RESTING_BOTTOM_HEIGHT,
        bottom_right: RESTING_BOTTOM_HEIGHT,
    };

    /// Pose of a note held by the pointer.
    pub const LIFTED: Self = Self {
        top_left: LIFTED_HEIGHT,
        top_right: LIFTED_HEIGHT,
        bottom_left: LIFTED_HEIGHT,
        bottom_right: LIFTED_HEIGHT,
    };

    /// Interpolate every corner from `self` towards `target`.
    #[must_use]
    pub fn lerp(self, target: Self, ratio: f64) -> Self {
        let mix = |from: f64, to: f64| from + (to - from) * ratio;
        Self {
            top_left: mix(self.top_left, target.top_left),
            top_right: mix(self.top_right, target.top_right),
            bottom_left: mix(self.bottom_left, target.bottom_left),
            bottom_right: mix(self.bottom_right, target.bottom_right),
        }
    }
}

impl Default for CornerHeights {
    fn default() -> Self {
        Self::RESTING
    }
}

/// A single note on the wall.
#[derive(Debug, Clone)]
pub struct Note {
    id: NoteId,
    x: f64,
    y: f64,
    heights: CornerHeights,
    curves: EdgeCurves,
    lines: Vec<String>,
    glyphs: Vec<Vec<Glyph>>,
    font: String,
    color: String,
    metrics: Rc<GlyphMetrics>,
}

impl Note {
    /// Create a resting note with its top-left corner at `(x, y)`.
    #[must_use]
    pub fn new(x: f64, y: f64, font: impl Into<String>, metrics: Rc<GlyphMetrics>) -> Self {
        let mut note = Self {
            id: Uuid::new_v4(),
            x,
            y,
            heights: CornerHeights::RESTING,
            curves: EdgeCurves::default(),
            lines: Vec::new(),
            glyphs: Vec::new(),
            font: font.into(),
            color: PAPER_COLOR.to_owned(),
            metrics,
        };
        note.refresh();
        note
    }

    // --- Accessors ---

    #[must_use]
    pub fn id(&self) -> NoteId {
        self.id
    }

    /// Top-left corner of the undeformed square.
    #[must_use]
    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    #[must_use]
    pub fn heights(&self) -> CornerHeights {
        self.heights
    }

    #[must_use]
    pub fn curves(&self) -> &EdgeCurves {
        &self.curves
    }

    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    #[must_use]
    pub fn glyphs(&self) -> &[Vec<Glyph>] {
        &self.glyphs
    }

    #[must_use]
    pub fn font(&self) -> &str {
        &self.font
    }

    #[must_use]
    pub fn color(&self) -> &str {
        &self.color
    }

    pub fn set_color(&mut self, color: impl Into<String>) {
        self.color = color.into();
    }

    // --- Hit testing ---

    /// Whether `p` lies inside the note's undeformed square, edges included.
    #[must_use]
    pub fn contains_point(&self, p: Point) -> bool {
        p.x >= self.x && p.x <= self.x + NOTE_SIDE && p.y >= self.y && p.y <= self.y + NOTE_SIDE
    }

    // --- Deformation ---

    /// Curl the bottom corners towards a nearby pointer.
    ///
    /// Nothing lifts while the pointer is above the note's vertical midline.
    /// Below it, lift grows towards the bottom edge and fades out over
    /// [`HOVER_FADE_BAND`] units past it. Horizontally the lift is split
    /// between the two bottom corners by the pointer's position across the
    /// note, fading out over the same band past either side.
    pub fn set_hover_deform(&mut self, pointer: Point) {
        let half = NOTE_SIDE / 2.0;
        let y_dist = pointer.y - self.y;
        let (left, right, vertical) = if y_dist > half {
            let vertical = if y_dist >= NOTE_SIDE {
                1.0 - (y_dist - NOTE_SIDE) / HOVER_FADE_BAND
            } else {
                (y_dist - half) / half
            };

            let x_dist = pointer.x - self.x;
            let (left, right) = if x_dist <= 0.0 {
                (1.0 + x_dist / HOVER_FADE_BAND, 0.0)
            } else if x_dist >= NOTE_SIDE {
                (0.0, 1.0 - (x_dist - NOTE_SIDE) / HOVER_FADE_BAND)
            } else {
                (1.0 - x_dist / NOTE_SIDE, x_dist / NOTE_SIDE)
            };
            (left, right, vertical)
        } else {
            (0.0, 0.0, 0.0)
        };

        let vertical = vertical.clamp(0.0, 1.0);
        self.heights.bottom_left = RESTING_BOTTOM_HEIGHT + HOVER_LIFT_RANGE * left.clamp(0.0, 1.0) * vertical;
        self.heights.bottom_right = RESTING_BOTTOM_HEIGHT + HOVER_LIFT_RANGE * right.clamp(0.0, 1.0) * vertical;
        self.refresh();
    }

    /// Return to the resting pose.
    pub fn reset_deform(&mut self) {
        self.set_heights(CornerHeights::RESTING);
    }

    /// Pose at `progress` (0..=1) of the pick-up animation.
    pub fn pick_up_step(&mut self, progress: f64) {
        let heights = CornerHeights::RESTING.lerp(CornerHeights::LIFTED, progress.clamp(0.0, 1.0));
        self.set_heights(heights);
    }

    /// Pose at `progress` (0..=1) of the put-down animation.
    pub fn put_down_step(&mut self, progress: f64) {
        let heights = CornerHeights::LIFTED.lerp(CornerHeights::RESTING, progress.clamp(0.0, 1.0));
        self.set_heights(heights);
    }

    /// Set all four corner heights at once.
    pub fn set_heights(&mut self, heights: CornerHeights) {
        self.heights = heights;
        self.refresh();
    }

    // --- Position and text ---

    /// Move the note by `(dx, dy)`.
    pub fn translate(&mut self, dx: f64, dy: f64) {
        self.x += dx;
        self.y += dy;
        self.refresh();
    }

    /// Wrap `text` for this note and lay it out on the current curves.
    pub fn set_text(&mut self, text: &PreparedText) -> WrappedText {
        let wrapped = text.for_note(&self.font, NOTE_FONT_SIZE);
        self.lines.clone_from(&wrapped.lines);
        self.relayout();
        wrapped
    }

    // --- Rendering ---

    /// Draw shadow, paper and text.
    ///
    /// # Errors
    ///
    /// Returns the surface's error if a transform or text call fails.
    pub fn render<S: RenderSurface>(&self, surface: &mut S) -> Result<(), S::Error> {
        render::draw_note(surface, self)
    }

    // --- Internals ---

    fn refresh(&mut self) {
        self.curves = edge_curves(self.x, self.y, self.heights);
        self.relayout();
    }

    fn relayout(&mut self) {
        self.glyphs = layout_on_curves(&self.lines, &self.font, &NOTE_TEXT_BOX, &self.curves, &self.metrics);
    }
}

/// Boundary curves of a note at `(x, y)` with the given corner heights.
///
/// A lifted corner shifts right and up by its height. Control points sit at
/// the thirds of each edge, nudged by a third of the height difference
/// between the edge's two corners so the paper bows between them.
#[must_use]
pub fn edge_curves(x: f64, y: f64, h: CornerHeights) -> EdgeCurves {
    let s = NOTE_SIDE;
    let p = Point::new;

    let top_diff = h.top_left - h.top_right;
    let top = CubicBezier::new(
        p(x + h.top_left, y - h.top_left),
        p(x + s / 3.0 + h.top_left - top_diff / 3.0, y - h.top_left - top_diff / 3.0),
        p(x + s * 2.0 / 3.0 + h.top_left, y - h.top_left),
        p(x + s + h.top_right, y - h.top_right),
    );

    let right_diff = h.top_right - h.bottom_right;
    let right = CubicBezier::new(
        p(x + s + h.top_right, y - h.top_right),
        p(x + s + h.top_right, y + s / 3.0 - h.top_right),
        p(x + s + h.top_right - right_diff / 3.0, y + s * 2.0 / 3.0 - h.top_right - right_diff / 3.0),
        p(x + s + h.bottom_right, y + s - h.bottom_right),
    );

    let bottom_diff = h.bottom_right - h.bottom_left;
    let bottom = CubicBezier::new(
        p(x + s + h.bottom_right, y + s - h.bottom_right),
        p(x + s * 2.0 / 3.0 + h.bottom_right, y + s - h.bottom_right),
        p(x + s / 3.0 + h.bottom_right - bottom_diff / 3.0, y + s - h.bottom_left - bottom_diff / 3.0),
        p(x + h.bottom_left, y + s - h.bottom_left),
    );

    let left_diff = h.bottom_left - h.top_left;
    let left = CubicBezier::new(
        p(x + h.bottom_left, y + s - h.bottom_left),
        p(x + h.bottom_left - left_diff * 2.0 / 3.0, y + s * 2.0 / 3.0 - h.bottom_left - left_diff * 2.0 / 3.0),
        p(x + h.top_left, y + s / 3.0 - h.top_left),
        p(x + h.top_left, y - h.top_left),
    );

    EdgeCurves { top, right, bottom, left }
}
