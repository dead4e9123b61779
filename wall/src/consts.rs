//! Shared numeric constants for the wall crate.

// ── Note geometry ───────────────────────────────────────────────

/// Side length of every note, in wall units.
pub const NOTE_SIDE: f64 = 150.0;

/// Height of the "sticky bar" notch drawn into a curled shadow edge.
pub const STICKY_BAR_HEIGHT: f64 = 20.0;

/// Width of the band past the note's edges over which hover lift fades out.
pub const HOVER_FADE_BAND: f64 = 20.0;

/// Lift height shared by every corner of a resting note's bottom edge.
pub const RESTING_BOTTOM_HEIGHT: f64 = 2.0;

/// Extra lift a corner can gain from pointer proximity.
pub const HOVER_LIFT_RANGE: f64 = 13.0;

/// Corner height of a fully picked-up note.
pub const LIFTED_HEIGHT: f64 = 10.0;

// ── Text ────────────────────────────────────────────────────────

/// Font size used for note text.
pub const NOTE_FONT_SIZE: f64 = 20.0;

/// Distance between consecutive baselines of note text.
pub const NOTE_LINE_HEIGHT: f64 = 25.0;

/// Usable line width inside a note (side minus 10 units of padding per side).
pub const NOTE_TEXT_WIDTH: f64 = 130.0;

/// Horizontal inset of the first glyph from the note's left edge.
pub const NOTE_TEXT_INSET: f64 = 10.0;

/// Maximum number of text lines on a note.
pub const MAX_NOTE_LINES: usize = 5;

/// Suffix appended to a line that had to be cut short.
pub const ELLIPSIS: &str = "...";

/// Font size at which glyph widths are measured and cached.
pub const REFERENCE_FONT_SIZE: f64 = 16.0;

/// Width-per-size ratio assumed for fonts that were never measured.
pub const FALLBACK_GLYPH_RATIO: f64 = 0.5;

// ── Interaction ─────────────────────────────────────────────────

/// Default pick-up/put-down animation length in milliseconds.
pub const DEFAULT_ANIMATION_MS: f64 = 40.0;

/// Default hover buffer around notes, in screen pixels.
pub const DEFAULT_HOVER_BUFFER: f64 = 20.0;

// ── Colors ──────────────────────────────────────────────────────

/// Default note paper color.
pub const PAPER_COLOR: &str = "#FFFA9E";

/// Fill used for the drop shadow under every note.
pub const SHADOW_COLOR: &str = "rgba(0,0,0,0.15)";

/// Ink used for note text.
pub const INK_COLOR: &str = "#000000";

/// Font family preloaded when no configuration is given.
pub const DEFAULT_FONT: &str = "'Rock Salt'";
