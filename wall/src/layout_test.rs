#![allow(clippy::float_cmp)]

use super::*;
use crate::bezier::CubicBezier;
use crate::camera::Point;
use crate::consts::{DEFAULT_FONT, NOTE_FONT_SIZE, NOTE_LINE_HEIGHT, NOTE_SIDE};
use crate::test_support::fixed_metrics;

// Fixed metrics: every glyph is 10 units wide at 20px, so a line holds 13 glyphs.

const EPSILON: f64 = 1e-9;

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

fn wrap(text: &str) -> WrappedText {
    wrap_for_note(text, DEFAULT_FONT, NOTE_FONT_SIZE, &fixed_metrics())
}

fn straight(from: Point, to: Point) -> CubicBezier {
    CubicBezier::new(from, from.lerp(to, 1.0 / 3.0), from.lerp(to, 2.0 / 3.0), to)
}

fn flat_square() -> EdgeCurves {
    let (tl, tr) = (Point::new(0.0, 0.0), Point::new(150.0, 0.0));
    let (br, bl) = (Point::new(150.0, 150.0), Point::new(0.0, 150.0));
    EdgeCurves {
        top: straight(tl, tr),
        right: straight(tr, br),
        bottom: straight(br, bl),
        left: straight(bl, tl),
    }
}

fn note_box() -> TextBox {
    TextBox { font_size: NOTE_FONT_SIZE, line_height: NOTE_LINE_HEIGHT, width: NOTE_SIDE, height: NOTE_SIDE }
}

// =============================================================
// wrap_for_note
// =============================================================

#[test]
fn wrap_short_text_is_single_identical_line() {
    let wrapped = wrap("hello world");
    assert_eq!(wrapped.lines, vec!["hello world".to_owned()]);
    assert!(!wrapped.truncated);
}

#[test]
fn wrap_empty_text_is_single_empty_line() {
    let wrapped = wrap("");
    assert_eq!(wrapped.lines, vec![String::new()]);
    assert!(!wrapped.truncated);
}

#[test]
fn wrap_line_exactly_at_budget_fits() {
    let wrapped = wrap("abcdefghijklm");
    assert_eq!(wrapped.lines, vec!["abcdefghijklm".to_owned()]);
}

#[test]
fn wrap_breaks_before_overflowing_word() {
    let wrapped = wrap("aaaa bbbb cccc");
    assert_eq!(wrapped.lines, vec!["aaaa bbbb".to_owned(), "cccc".to_owned()]);
    assert!(!wrapped.truncated);
}

#[test]
fn wrap_keeps_at_most_five_lines_with_ellipsis() {
    let text = "aaaa bbbb cccc dddd eeee ffff gggg hhhh iiii jjjj kkkk llll mmmm nnnn";
    let wrapped = wrap(text);
    assert_eq!(wrapped.lines.len(), 5);
    assert!(wrapped.truncated);
    assert_eq!(wrapped.lines[0], "aaaa bbbb");
    assert_eq!(wrapped.lines[4], "iiii jjjj...");
}

#[test]
fn wrap_very_long_text_last_line_fits_budget() {
    let text = "lorem ipsum dolor sit amet ".repeat(40);
    let metrics = fixed_metrics();
    let wrapped = wrap_for_note(&text, DEFAULT_FONT, NOTE_FONT_SIZE, &metrics);
    assert_eq!(wrapped.lines.len(), 5);
    let last = &wrapped.lines[4];
    assert!(last.ends_with("..."));
    assert!(metrics.text_width(last, DEFAULT_FONT, NOTE_FONT_SIZE) <= NOTE_TEXT_WIDTH);
}

#[test]
fn wrap_every_line_fits_budget() {
    let text = "the quick brown fox jumps over the lazy dog again and again";
    let metrics = fixed_metrics();
    let wrapped = wrap_for_note(text, DEFAULT_FONT, NOTE_FONT_SIZE, &metrics);
    for line in &wrapped.lines {
        assert!(metrics.text_width(line, DEFAULT_FONT, NOTE_FONT_SIZE) <= NOTE_TEXT_WIDTH, "{line}");
    }
}

#[test]
fn wrap_last_line_grows_ellipsis_by_cutting_characters() {
    // Fifth line "abcdefghijkl" (12 glyphs) must lose two characters for the ellipsis.
    let text = "a b c d abcdefghijkl more";
    let wrapped = wrap(text);
    assert_eq!(wrapped.lines.len(), 3);

    let text = "aaaaaaaaaaaa bbbbbbbbbbbb cccccccccccc dddddddddddd eeeeeeeeeeee ffff";
    let wrapped = wrap(text);
    assert_eq!(wrapped.lines.len(), 5);
    assert_eq!(wrapped.lines[4], "eeeeeeeeee...");
}

#[test]
fn wrap_overlong_word_is_cut_on_its_own_line() {
    let wrapped = wrap("abcdefghijklmnopq xyz");
    assert_eq!(wrapped.lines[0], "abcdefghij...");
    assert_eq!(wrapped.lines[1], "xyz");
    assert!(wrapped.truncated);
}

#[test]
fn wrap_preserves_repeated_spaces() {
    let wrapped = wrap("a  b");
    assert_eq!(wrapped.lines, vec!["a  b".to_owned()]);
}

#[test]
fn prepared_text_is_reusable() {
    let prepared = PreparedText::new("aaaa bbbb cccc", fixed_metrics());
    let first = prepared.for_note(DEFAULT_FONT, NOTE_FONT_SIZE);
    let second = prepared.for_note(DEFAULT_FONT, NOTE_FONT_SIZE);
    assert_eq!(first, second);
    assert_eq!(prepared.text(), "aaaa bbbb cccc");
}

#[test]
fn prepared_text_smaller_font_fits_more() {
    let prepared = PreparedText::new("aaaa bbbb cccc", fixed_metrics());
    let wrapped = prepared.for_note(DEFAULT_FONT, 10.0);
    assert_eq!(wrapped.lines.len(), 1);
}

// =============================================================
// layout_on_curves
// =============================================================

#[test]
fn layout_produces_one_record_per_glyph() {
    let lines = vec!["abc".to_owned(), "de".to_owned()];
    let glyphs = layout_on_curves(&lines, DEFAULT_FONT, &note_box(), &flat_square(), &fixed_metrics());
    assert_eq!(glyphs.len(), 2);
    assert_eq!(glyphs[0].iter().map(|g| g.ch).collect::<String>(), "abc");
    assert_eq!(glyphs[1].iter().map(|g| g.ch).collect::<String>(), "de");
}

#[test]
fn layout_flat_paper_places_baselines_one_line_height_apart() {
    let lines = vec!["a".to_owned(), "b".to_owned(), "c".to_owned()];
    let glyphs = layout_on_curves(&lines, DEFAULT_FONT, &note_box(), &flat_square(), &fixed_metrics());
    assert!(approx_eq(glyphs[0][0].y, 25.0));
    assert!(approx_eq(glyphs[1][0].y, 50.0));
    assert!(approx_eq(glyphs[2][0].y, 75.0));
}

#[test]
fn layout_flat_paper_advances_by_glyph_width_from_inset() {
    let lines = vec!["abc".to_owned()];
    let glyphs = layout_on_curves(&lines, DEFAULT_FONT, &note_box(), &flat_square(), &fixed_metrics());
    assert!(approx_eq(glyphs[0][0].x, 10.0));
    assert!(approx_eq(glyphs[0][1].x, 20.0));
    assert!(approx_eq(glyphs[0][2].x, 30.0));
}

#[test]
fn layout_flat_paper_has_unit_scale_and_no_rotation() {
    let lines = vec!["hello".to_owned(), "world".to_owned()];
    let glyphs = layout_on_curves(&lines, DEFAULT_FONT, &note_box(), &flat_square(), &fixed_metrics());
    for glyph in glyphs.iter().flatten() {
        assert!(approx_eq(glyph.scale, 1.0), "scale {}", glyph.scale);
        assert!(glyph.rotation.abs() < 1e-9, "rotation {}", glyph.rotation);
    }
}

#[test]
fn layout_follows_offset_square() {
    let mut curves = flat_square();
    for edge in [&mut curves.top, &mut curves.right, &mut curves.bottom, &mut curves.left] {
        for p in &mut edge.points {
            p.x += 100.0;
            p.y += 200.0;
        }
    }
    let lines = vec!["a".to_owned()];
    let glyphs = layout_on_curves(&lines, DEFAULT_FONT, &note_box(), &curves, &fixed_metrics());
    assert!(approx_eq(glyphs[0][0].x, 110.0));
    assert!(approx_eq(glyphs[0][0].y, 225.0));
}

#[test]
fn layout_tilted_top_edge_rotates_first_line() {
    let mut curves = flat_square();
    // Raise the right end of the top edge: text on the first line tilts upwards.
    curves.top = straight(Point::new(0.0, 0.0), Point::new(150.0, -30.0));
    let lines = vec!["ab".to_owned()];
    let glyphs = layout_on_curves(&lines, DEFAULT_FONT, &note_box(), &curves, &fixed_metrics());
    assert!(glyphs[0][0].rotation < 0.0);
}

#[test]
fn layout_empty_lines_yield_empty_records() {
    let glyphs = layout_on_curves(&[], DEFAULT_FONT, &note_box(), &flat_square(), &fixed_metrics());
    assert!(glyphs.is_empty());
    let glyphs = layout_on_curves(&[String::new()], DEFAULT_FONT, &note_box(), &flat_square(), &fixed_metrics());
    assert_eq!(glyphs.len(), 1);
    assert!(glyphs[0].is_empty());
}
