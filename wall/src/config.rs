//! Wall configuration, supplied by the host page as optional JSON.
//!
//! Every field has a default, so `{}` (or no JSON at all) yields the stock
//! wall: Rock Salt notes on yellow paper with 40 ms gestures.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_ANIMATION_MS, DEFAULT_FONT, DEFAULT_HOVER_BUFFER, PAPER_COLOR};
use crate::error::WallError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WallConfig {
    /// Font families whose glyph widths are measured at startup.
    pub fonts: Vec<String>,
    /// Font family for new notes. Falls back to the first preloaded font.
    pub note_font: Option<String>,
    pub paper_color: String,
    /// Length of the pick-up and put-down animations.
    pub animation_ms: f64,
    /// Hover/pick buffer around notes at zoom 1, in wall units.
    pub hover_buffer: f64,
}

impl Default for WallConfig {
    fn default() -> Self {
        Self {
            fonts: vec![DEFAULT_FONT.to_owned()],
            note_font: None,
            paper_color: PAPER_COLOR.to_owned(),
            animation_ms: DEFAULT_ANIMATION_MS,
            hover_buffer: DEFAULT_HOVER_BUFFER,
        }
    }
}

impl WallConfig {
    /// Parse configuration JSON. Blank input yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns [`WallError::Config`] if the JSON is malformed, has fields of
    /// the wrong type, or sets a negative duration or buffer.
    pub fn from_json(json: &str) -> Result<Self, WallError> {
        if json.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Font family new notes are created with.
    #[must_use]
    pub fn note_font(&self) -> &str {
        self.note_font
            .as_deref()
            .or_else(|| self.fonts.first().map(String::as_str))
            .unwrap_or(DEFAULT_FONT)
    }

    fn validate(&self) -> Result<(), WallError> {
        if self.animation_ms < 0.0 {
            return Err(WallError::Config(format!("animation_ms must be >= 0, got {}", self.animation_ms)));
        }
        if self.hover_buffer < 0.0 {
            return Err(WallError::Config(format!("hover_buffer must be >= 0, got {}", self.hover_buffer)));
        }
        Ok(())
    }
}
