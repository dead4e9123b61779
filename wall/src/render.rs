//! Rendering: draws notes and the whole wall onto a 2-D drawing surface.
//!
//! Drawing goes through the [`RenderSurface`] trait so the same code paints a
//! browser canvas or a [`RecordingSurface`] in tests. This module is also the
//! only place that touches [`web_sys::CanvasRenderingContext2d`]: it provides
//! the surface and text-measurement adapters for it.
//!
//! Any note edge whose two corners are at the same height is drawn as a
//! straight line; only edges between unequal corners use the cached curve.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use crate::camera::Point;
use crate::consts::{INK_COLOR, NOTE_FONT_SIZE, NOTE_SIDE, SHADOW_COLOR, STICKY_BAR_HEIGHT};
use crate::metrics::TextMeasure;
use crate::note::Note;

/// The 2-D drawing operations the wall needs from its host.
pub trait RenderSurface {
    type Error;

    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64);
    fn set_fill_style(&mut self, style: &str);
    fn set_stroke_style(&mut self, style: &str);
    fn set_font(&mut self, font: &str);
    fn begin_path(&mut self);
    fn move_to(&mut self, p: Point);
    fn line_to(&mut self, p: Point);
    fn bezier_curve_to(&mut self, c1: Point, c2: Point, end: Point);
    fn fill(&mut self);
    fn save(&mut self);
    fn restore(&mut self);

    /// # Errors
    ///
    /// Returns the surface's error if the transform is rejected.
    fn translate(&mut self, x: f64, y: f64) -> Result<(), Self::Error>;

    /// # Errors
    ///
    /// Returns the surface's error if the transform is rejected.
    fn rotate(&mut self, radians: f64) -> Result<(), Self::Error>;

    /// # Errors
    ///
    /// Returns the surface's error if the transform is rejected.
    fn scale(&mut self, x: f64, y: f64) -> Result<(), Self::Error>;

    /// # Errors
    ///
    /// Returns the surface's error if the text cannot be drawn.
    fn fill_text(&mut self, text: &str, x: f64, y: f64) -> Result<(), Self::Error>;

    /// # Errors
    ///
    /// Returns the surface's error if the text cannot be drawn.
    fn stroke_text(&mut self, text: &str, x: f64, y: f64) -> Result<(), Self::Error>;
}

/// Clear the surface and draw `notes` back to front.
///
/// # Errors
///
/// Returns the first surface error; later notes are not drawn.
pub fn draw_wall<'a, S, I>(surface: &mut S, notes: I, width: f64, height: f64) -> Result<(), S::Error>
where
    S: RenderSurface,
    I: IntoIterator<Item = &'a Note>,
{
    surface.clear_rect(0.0, 0.0, width, height);
    for note in notes {
        draw_note(surface, note)?;
    }
    Ok(())
}

/// Draw one note: shadow, then paper, then text.
///
/// # Errors
///
/// Returns the surface's error if a transform or text call fails.
pub fn draw_note<S: RenderSurface>(surface: &mut S, note: &Note) -> Result<(), S::Error> {
    draw_shadow(surface, note);
    draw_paper(surface, note);
    draw_text(surface, note)
}

fn same_height(a: f64, b: f64) -> bool {
    (a - b).abs() < f64::EPSILON
}

// =============================================================
// Note layers
// =============================================================

/// Darkened silhouette offset down-right by twice each corner's height.
fn draw_shadow<S: RenderSurface>(surface: &mut S, note: &Note) {
    let Point { x, y } = note.position();
    let h = note.heights();
    let s = NOTE_SIDE;
    let bar = STICKY_BAR_HEIGHT;
    let p = Point::new;

    surface.begin_path();
    surface.set_fill_style(SHADOW_COLOR);
    surface.move_to(p(x - h.top_left, y + h.top_left));

    // Top edge.
    if same_height(h.top_left, h.top_right) {
        surface.line_to(p(x + s + h.top_right * 2.0, y + h.top_right));
    } else {
        let d = h.top_left - h.top_right;
        surface.bezier_curve_to(
            p(x + s / 3.0 - h.top_left - d / 3.0, y + h.top_left - d / 3.0),
            p(x + s * 2.0 / 3.0 - h.top_left, y + h.top_left),
            p(x + s + h.top_right * 2.0, y + h.top_right),
        );
    }

    // Right edge, notched below a curled top corner.
    if same_height(h.top_right, h.bottom_right) {
        surface.line_to(p(x + s + h.bottom_right * 2.0, y + s + h.bottom_right));
    } else {
        let d = h.top_right - h.bottom_right;
        surface.line_to(p(x + s, y + bar));
        surface.bezier_curve_to(
            p(x + s + h.top_right * 2.0, y + s / 3.0 + h.top_right),
            p(x + s + h.top_right * 2.0 - d / 3.0, y + s * 2.0 / 3.0 + h.top_right - d / 3.0),
            p(x + s + h.bottom_right * 2.0, y + s + h.bottom_right),
        );
    }

    // Bottom edge.
    if same_height(h.bottom_right, h.bottom_left) {
        surface.line_to(p(x + h.bottom_left * 2.0, y + s + h.bottom_left));
    } else {
        let d = h.bottom_right - h.bottom_left;
        surface.bezier_curve_to(
            p(x + s * 2.0 / 3.0 + h.bottom_right * 2.0, y + s + h.bottom_right),
            p(x + s / 3.0 + h.bottom_right * 2.0 - d / 3.0, y + s + h.bottom_left - d / 3.0),
            p(x + h.bottom_left * 2.0, y + s + h.bottom_left),
        );
    }

    // Left edge back up to the start.
    if !same_height(h.top_left, h.bottom_left) {
        let d = h.bottom_left - h.top_left;
        surface.bezier_curve_to(
            p(x + h.bottom_left * 2.0 - d * 2.0 / 3.0, y + s * 2.0 / 3.0 + h.bottom_left - d * 2.0 / 3.0),
            p(x + h.top_left * 2.0, y + s / 3.0 + h.top_left),
            p(x + h.top_left * 2.0, y + h.top_left + bar),
        );
    }
    surface.line_to(p(x + h.top_left * 2.0, y + h.top_left));
    surface.fill();
}

/// The paper quadrilateral, following the cached edge curves.
fn draw_paper<S: RenderSurface>(surface: &mut S, note: &Note) {
    let h = note.heights();
    let c = note.curves();

    surface.set_fill_style(note.color());
    surface.begin_path();
    surface.move_to(c.top.start());

    let edges = [
        (h.top_left, h.top_right, &c.top),
        (h.top_right, h.bottom_right, &c.right),
        (h.bottom_right, h.bottom_left, &c.bottom),
        (h.bottom_left, h.top_left, &c.left),
    ];
    for (from, to, curve) in edges {
        if same_height(from, to) {
            surface.line_to(curve.end());
        } else {
            let [_, c1, c2, end] = curve.points;
            surface.bezier_curve_to(c1, c2, end);
        }
    }
    surface.fill();
}

/// Every glyph under its own translate + rotate + scale.
fn draw_text<S: RenderSurface>(surface: &mut S, note: &Note) -> Result<(), S::Error> {
    surface.set_font(&format!("{NOTE_FONT_SIZE}px {}", note.font()));
    surface.set_stroke_style(INK_COLOR);
    surface.set_fill_style(INK_COLOR);

    let mut buf = [0; 4];
    for glyph in note.glyphs().iter().flatten() {
        let text = glyph.ch.encode_utf8(&mut buf);
        surface.save();
        surface.translate(glyph.x, glyph.y)?;
        surface.rotate(glyph.rotation)?;
        surface.scale(glyph.scale, glyph.scale)?;
        surface.fill_text(text, 0.0, 0.0)?;
        surface.stroke_text(text, 0.0, 0.0)?;
        surface.restore();
    }
    Ok(())
}

// =============================================================
// Recording surface
// =============================================================

/// One recorded drawing call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    ClearRect { x: f64, y: f64, width: f64, height: f64 },
    FillStyle(String),
    StrokeStyle(String),
    Font(String),
    BeginPath,
    MoveTo(Point),
    LineTo(Point),
    BezierCurveTo(Point, Point, Point),
    Fill,
    Save,
    Restore,
    Translate(f64, f64),
    Rotate(f64),
    Scale(f64, f64),
    FillText(String, f64, f64),
    StrokeText(String, f64, f64),
}

/// Surface that records every call instead of drawing, for headless hosts and tests.
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    pub commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of recorded calls matching `pred`.
    #[must_use]
    pub fn count(&self, pred: impl Fn(&DrawCommand) -> bool) -> usize {
        self.commands.iter().filter(|c| pred(c)).count()
    }
}

impl RenderSurface for RecordingSurface {
    type Error = std::convert::Infallible;

    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.commands.push(DrawCommand::ClearRect { x, y, width, height });
    }

    fn set_fill_style(&mut self, style: &str) {
        self.commands.push(DrawCommand::FillStyle(style.to_owned()));
    }

    fn set_stroke_style(&mut self, style: &str) {
        self.commands.push(DrawCommand::StrokeStyle(style.to_owned()));
    }

    fn set_font(&mut self, font: &str) {
        self.commands.push(DrawCommand::Font(font.to_owned()));
    }

    fn begin_path(&mut self) {
        self.commands.push(DrawCommand::BeginPath);
    }

    fn move_to(&mut self, p: Point) {
        self.commands.push(DrawCommand::MoveTo(p));
    }

    fn line_to(&mut self, p: Point) {
        self.commands.push(DrawCommand::LineTo(p));
    }

    fn bezier_curve_to(&mut self, c1: Point, c2: Point, end: Point) {
        self.commands.push(DrawCommand::BezierCurveTo(c1, c2, end));
    }

    fn fill(&mut self) {
        self.commands.push(DrawCommand::Fill);
    }

    fn save(&mut self) {
        self.commands.push(DrawCommand::Save);
    }

    fn restore(&mut self) {
        self.commands.push(DrawCommand::Restore);
    }

    fn translate(&mut self, x: f64, y: f64) -> Result<(), Self::Error> {
        self.commands.push(DrawCommand::Translate(x, y));
        Ok(())
    }

    fn rotate(&mut self, radians: f64) -> Result<(), Self::Error> {
        self.commands.push(DrawCommand::Rotate(radians));
        Ok(())
    }

    fn scale(&mut self, x: f64, y: f64) -> Result<(), Self::Error> {
        self.commands.push(DrawCommand::Scale(x, y));
        Ok(())
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64) -> Result<(), Self::Error> {
        self.commands.push(DrawCommand::FillText(text.to_owned(), x, y));
        Ok(())
    }

    fn stroke_text(&mut self, text: &str, x: f64, y: f64) -> Result<(), Self::Error> {
        self.commands.push(DrawCommand::StrokeText(text.to_owned(), x, y));
        Ok(())
    }
}

// =============================================================
// Browser canvas adapters
// =============================================================

impl RenderSurface for CanvasRenderingContext2d {
    type Error = JsValue;

    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        CanvasRenderingContext2d::clear_rect(self, x, y, width, height);
    }

    fn set_fill_style(&mut self, style: &str) {
        self.set_fill_style_str(style);
    }

    fn set_stroke_style(&mut self, style: &str) {
        self.set_stroke_style_str(style);
    }

    fn set_font(&mut self, font: &str) {
        CanvasRenderingContext2d::set_font(self, font);
    }

    fn begin_path(&mut self) {
        CanvasRenderingContext2d::begin_path(self);
    }

    fn move_to(&mut self, p: Point) {
        CanvasRenderingContext2d::move_to(self, p.x, p.y);
    }

    fn line_to(&mut self, p: Point) {
        CanvasRenderingContext2d::line_to(self, p.x, p.y);
    }

    fn bezier_curve_to(&mut self, c1: Point, c2: Point, end: Point) {
        CanvasRenderingContext2d::bezier_curve_to(self, c1.x, c1.y, c2.x, c2.y, end.x, end.y);
    }

    fn fill(&mut self) {
        CanvasRenderingContext2d::fill(self);
    }

    fn save(&mut self) {
        CanvasRenderingContext2d::save(self);
    }

    fn restore(&mut self) {
        CanvasRenderingContext2d::restore(self);
    }

    fn translate(&mut self, x: f64, y: f64) -> Result<(), JsValue> {
        CanvasRenderingContext2d::translate(self, x, y)
    }

    fn rotate(&mut self, radians: f64) -> Result<(), JsValue> {
        CanvasRenderingContext2d::rotate(self, radians)
    }

    fn scale(&mut self, x: f64, y: f64) -> Result<(), JsValue> {
        CanvasRenderingContext2d::scale(self, x, y)
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64) -> Result<(), JsValue> {
        CanvasRenderingContext2d::fill_text(self, text, x, y)
    }

    fn stroke_text(&mut self, text: &str, x: f64, y: f64) -> Result<(), JsValue> {
        CanvasRenderingContext2d::stroke_text(self, text, x, y)
    }
}

impl TextMeasure for CanvasRenderingContext2d {
    type Error = JsValue;

    fn measure(&mut self, font: &str, text: &str) -> Result<f64, JsValue> {
        CanvasRenderingContext2d::set_font(self, font);
        Ok(self.measure_text(text)?.width())
    }
}
