//! Entry points for the host page.
//!
//! [`WallApi`] creates walls and hands out text prepared against the glyph
//! metrics of the most recent one. The `#[wasm_bindgen]` items below wrap it
//! for JavaScript: `createInstance`, `prepareText`, and the [`WallHandle`]
//! returned for each wall. Errors cross the boundary as `JsError`s whose
//! message starts with the [`WallError::error_code`].

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{HtmlCanvasElement, HtmlElement};

use crate::animation::{Animation, AnimationDescriptor};
use crate::camera::Point;
use crate::config::WallConfig;
use crate::error::WallError;
use crate::layout::PreparedText;
use crate::metrics::{GlyphMetrics, TextMeasure};
use crate::note::NoteId;
use crate::wall::{Wall, WallCore, context_2d};

// =============================================================================
// API
// =============================================================================

/// Wall factory; remembers the glyph metrics of the last wall it created.
#[derive(Debug, Default)]
pub struct WallApi {
    metrics: Option<Rc<GlyphMetrics>>,
}

impl WallApi {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a wall has been created yet.
    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.metrics.is_some()
    }

    /// Bind a wall to the canvas with id `surface_id`.
    ///
    /// The canvas is resized to the offset size of `parent` (the document
    /// body when `parent` is `None`), and glyph widths are measured for
    /// every configured font before the wall is returned.
    ///
    /// # Errors
    ///
    /// Returns [`WallError::SurfaceNotFound`] or [`WallError::NotACanvas`]
    /// when the id does not name a canvas, and the browser's error when the
    /// context or measurement fails.
    pub fn create_instance(
        &mut self,
        surface_id: &str,
        parent: Option<&HtmlElement>,
        config: WallConfig,
    ) -> Result<Wall, WallError> {
        let window = web_sys::window().ok_or(WallError::NoWindow)?;
        let document = window.document().ok_or(WallError::NoDocument)?;
        let canvas = document
            .get_element_by_id(surface_id)
            .ok_or_else(|| WallError::SurfaceNotFound(surface_id.to_owned()))?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| WallError::NotACanvas(surface_id.to_owned()))?;

        let parent = match parent {
            Some(parent) => parent.clone(),
            None => document.body().ok_or(WallError::NoBody)?,
        };
        let (width, height) = surface_size(parent.offset_width(), parent.offset_height());
        canvas.set_width(width);
        canvas.set_height(height);

        let mut context = context_2d(&canvas)?;
        let metrics = Rc::new(GlyphMetrics::build(&mut context, &preload_fonts(&config))?);
        self.metrics = Some(Rc::clone(&metrics));
        Wall::new(canvas, metrics, config)
    }

    /// Build a canvas-free wall measured through `measure`.
    ///
    /// # Errors
    ///
    /// Returns the first measurement error.
    pub fn create_headless<M: TextMeasure>(
        &mut self,
        width: f64,
        height: f64,
        measure: &mut M,
        config: WallConfig,
    ) -> Result<WallCore, M::Error> {
        let metrics = Rc::new(GlyphMetrics::build(measure, &preload_fonts(&config))?);
        self.metrics = Some(Rc::clone(&metrics));
        Ok(WallCore::new(width, height, metrics, config))
    }

    /// Bind `text` to the metrics of the most recently created wall.
    ///
    /// # Errors
    ///
    /// Returns [`WallError::NotInitialized`] before any wall exists.
    pub fn prepare_text(&self, text: &str) -> Result<PreparedText, WallError> {
        let metrics = self.metrics.as_ref().ok_or(WallError::NotInitialized)?;
        Ok(PreparedText::new(text, Rc::clone(metrics)))
    }
}

/// Canvas pixel size for a parent's offset size; negative sizes become 0.
fn surface_size(offset_width: i32, offset_height: i32) -> (u32, u32) {
    (u32::try_from(offset_width).unwrap_or(0), u32::try_from(offset_height).unwrap_or(0))
}

/// Fonts to measure for `config`: the configured list, plus the note font if
/// the list leaves it out.
fn preload_fonts(config: &WallConfig) -> Vec<String> {
    let mut fonts = config.fonts.clone();
    let note_font = config.note_font();
    if !fonts.iter().any(|f| f == note_font) {
        fonts.push(note_font.to_owned());
    }
    fonts
}

/// Parse a note id handed back from JavaScript.
///
/// # Errors
///
/// Returns [`WallError::MalformedNoteId`] if `id` is not a UUID.
pub fn parse_note_id(id: &str) -> Result<NoteId, WallError> {
    Ok(NoteId::parse_str(id)?)
}

fn js_error(err: &WallError) -> JsError {
    JsError::new(&format!("{}: {err}", err.error_code()))
}

// =============================================================================
// WASM EXPORTS
// =============================================================================

thread_local! {
    static API: RefCell<WallApi> = RefCell::new(WallApi::new());
}

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if let Err(err) = console_log::init_with_level(log::Level::Info) {
        log::debug!("logger already installed: {err}");
    }
}

/// Create a wall on the canvas `surface_id`.
///
/// # Errors
///
/// Fails when the config JSON is invalid or the canvas cannot be used.
#[wasm_bindgen(js_name = createInstance)]
pub fn create_instance(
    surface_id: &str,
    parent: Option<HtmlElement>,
    config_json: Option<String>,
) -> Result<WallHandle, JsError> {
    let config = WallConfig::from_json(config_json.as_deref().unwrap_or_default()).map_err(|e| js_error(&e))?;
    let wall = API
        .with_borrow_mut(|api| api.create_instance(surface_id, parent.as_ref(), config))
        .map_err(|e| js_error(&e))?;
    Ok(WallHandle { wall })
}

/// # Errors
///
/// Fails before any wall has been created.
#[wasm_bindgen(js_name = prepareText)]
pub fn prepare_text(text: &str) -> Result<PreparedTextHandle, JsError> {
    let prepared = API.with_borrow(|api| api.prepare_text(text)).map_err(|e| js_error(&e))?;
    Ok(PreparedTextHandle { inner: prepared })
}

#[wasm_bindgen]
pub struct PreparedTextHandle {
    inner: PreparedText,
}

#[wasm_bindgen]
impl PreparedTextHandle {
    #[wasm_bindgen(getter)]
    pub fn text(&self) -> String {
        self.inner.text().to_owned()
    }
}

/// A live wall. Call `destroy` (or let JS free it) to detach listeners.
#[wasm_bindgen]
pub struct WallHandle {
    wall: Wall,
}

#[wasm_bindgen]
impl WallHandle {
    /// Add a resting note and return its id.
    #[wasm_bindgen(js_name = addNote)]
    pub fn add_note(&self, x: f64, y: f64) -> String {
        self.wall.add_note(x, y).to_string()
    }

    /// Wrap `text` onto note `id`. Returns `true` if it had to be cut.
    ///
    /// # Errors
    ///
    /// Fails on a malformed or unknown id.
    #[wasm_bindgen(js_name = setNoteText)]
    pub fn set_note_text(&self, id: &str, text: &PreparedTextHandle) -> Result<bool, JsError> {
        let id = parse_note_id(id).map_err(|e| js_error(&e))?;
        let wrapped = self.wall.set_note_text(id, &text.inner).map_err(|e| js_error(&e))?;
        Ok(wrapped.truncated)
    }

    pub fn draw(&self) {
        self.wall.draw();
    }

    /// Queue the animation named `name` at wall point (`x`, `y`) and play it
    /// for `duration_ms`. A running animation is finished first.
    ///
    /// # Errors
    ///
    /// Fails on an unknown animation name.
    #[wasm_bindgen(js_name = beginAnimation)]
    pub fn begin_animation(&self, name: &str, x: f64, y: f64, duration_ms: f64) -> Result<(), JsError> {
        let animation =
            Animation::from_name(name).ok_or_else(|| JsError::new(&format!("unknown animation: {name}")))?;
        {
            let mut core = self.wall.core_mut();
            if core.viewport.is_animating() {
                core.viewport.finish();
            }
            core.viewport
                .queue_animation(AnimationDescriptor::new(animation, Point::new(x, y)))
                .map_err(|e| js_error(&e))?;
        }
        self.wall.begin_animation(duration_ms);
        Ok(())
    }

    #[wasm_bindgen(js_name = noteCount)]
    pub fn note_count(&self) -> usize {
        self.wall.core().viewport.notes().count()
    }

    /// Remove listeners and stop any animation.
    pub fn destroy(&mut self) {
        self.wall.teardown();
    }
}
