//! Crate error type.

use wasm_bindgen::JsValue;

use crate::note::NoteId;

// =============================================================================
// ERROR
// =============================================================================

/// Errors produced by wall operations.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum WallError {
    /// Text was prepared before any wall instance existed.
    #[error("no wall instance has been created")]
    NotInitialized,

    /// No element with the requested id exists in the document.
    #[error("surface element not found: {0}")]
    SurfaceNotFound(String),

    /// The element exists but is not a `<canvas>`.
    #[error("element is not a canvas: {0}")]
    NotACanvas(String),

    /// The canvas refused to hand out a 2-D context.
    #[error("canvas has no 2d context")]
    NoContext,

    /// Running outside a browser window.
    #[error("no global window")]
    NoWindow,

    /// The window has no document.
    #[error("window has no document")]
    NoDocument,

    /// The document has no `<body>` to size the canvas against.
    #[error("document has no body")]
    NoBody,

    /// A browser API call failed.
    #[error("browser call failed: {0}")]
    Js(String),

    /// No resting or active note has this id.
    #[error("unknown note: {0}")]
    UnknownNote(NoteId),

    /// A note id string could not be parsed.
    #[error("malformed note id: {0}")]
    MalformedNoteId(String),

    /// An animation was queued while another is still running.
    #[error("animation already running: {0}")]
    AnimationInFlight(&'static str),

    /// The configuration JSON could not be parsed.
    #[error("config parse failed: {0}")]
    Config(String),
}

impl WallError {
    /// Stable code for the error, surfaced to JS alongside the message.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::NotInitialized => "E_NOT_INITIALIZED",
            Self::SurfaceNotFound(_) => "E_SURFACE_NOT_FOUND",
            Self::NotACanvas(_) => "E_NOT_A_CANVAS",
            Self::NoContext => "E_NO_CONTEXT",
            Self::NoWindow => "E_NO_WINDOW",
            Self::NoDocument => "E_NO_DOCUMENT",
            Self::NoBody => "E_NO_BODY",
            Self::Js(_) => "E_JS",
            Self::UnknownNote(_) => "E_UNKNOWN_NOTE",
            Self::MalformedNoteId(_) => "E_MALFORMED_NOTE_ID",
            Self::AnimationInFlight(_) => "E_ANIMATION_IN_FLIGHT",
            Self::Config(_) => "E_CONFIG",
        }
    }
}

impl From<JsValue> for WallError {
    fn from(value: JsValue) -> Self {
        Self::Js(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }
}

impl From<serde_json::Error> for WallError {
    fn from(err: serde_json::Error) -> Self {
        Self::Config(err.to_string())
    }
}

impl From<uuid::Error> for WallError {
    fn from(err: uuid::Error) -> Self {
        Self::MalformedNoteId(err.to_string())
    }
}
