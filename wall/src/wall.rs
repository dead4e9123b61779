//! The wall: a viewport plus pointer wiring, drawn onto a surface.
//!
//! [`WallCore`] holds everything that does not need a browser, so it can be
//! driven and drawn headlessly in tests. [`Wall`] binds a core to a
//! `<canvas>`: it installs the pointer listeners, runs the animation frame
//! loop, and tears both down when dropped.

#[cfg(test)]
#[path = "wall_test.rs"]
mod wall_test;

use std::cell::{Ref, RefCell, RefMut};
use std::rc::{Rc, Weak};

use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent};

use crate::animation::{AnimationClock, FrameStep};
use crate::camera::Point;
use crate::config::WallConfig;
use crate::error::WallError;
use crate::input::{Action, PointerTracker};
use crate::layout::{PreparedText, WrappedText};
use crate::metrics::GlyphMetrics;
use crate::note::NoteId;
use crate::render::{self, RenderSurface};
use crate::viewport::Viewport;

// =============================================================================
// CORE
// =============================================================================

/// Wall state and behavior that doesn't depend on the canvas element.
#[derive(Debug)]
pub struct WallCore {
    pub viewport: Viewport,
    pub pointer: PointerTracker,
    config: WallConfig,
}

impl WallCore {
    #[must_use]
    pub fn new(width: f64, height: f64, metrics: Rc<GlyphMetrics>, config: WallConfig) -> Self {
        Self {
            viewport: Viewport::new(width, height, metrics, &config),
            pointer: PointerTracker::new(config.animation_ms),
            config,
        }
    }

    #[must_use]
    pub fn config(&self) -> &WallConfig {
        &self.config
    }

    #[must_use]
    pub fn metrics(&self) -> Rc<GlyphMetrics> {
        Rc::clone(self.viewport.metrics())
    }

    /// Text bound to this wall's glyph metrics.
    #[must_use]
    pub fn prepare_text(&self, text: &str) -> PreparedText {
        PreparedText::new(text, self.metrics())
    }

    // --- Notes ---

    pub fn add_note(&mut self, x: f64, y: f64) -> NoteId {
        self.viewport.add_note(x, y)
    }

    /// Wrap and lay out `text` on note `id`.
    ///
    /// # Errors
    ///
    /// Returns [`WallError::UnknownNote`] if no note has this id.
    pub fn set_note_text(&mut self, id: NoteId, text: &PreparedText) -> Result<WrappedText, WallError> {
        let note = self.viewport.note_mut(id).ok_or(WallError::UnknownNote(id))?;
        Ok(note.set_text(text))
    }

    /// Clear `surface` and draw every note in render order.
    ///
    /// # Errors
    ///
    /// Returns the surface's first error.
    pub fn draw<S: RenderSurface>(&self, surface: &mut S) -> Result<(), S::Error> {
        let (width, height) = self.viewport.size();
        render::draw_wall(surface, self.viewport.notes(), width, height)
    }

    // --- Pointer ---

    pub fn on_pointer_move(&mut self, raw: Point) -> Vec<Action> {
        self.pointer.on_pointer_move(&mut self.viewport, raw)
    }

    pub fn on_pointer_down(&mut self, raw: Point) -> Vec<Action> {
        self.pointer.on_pointer_down(&mut self.viewport, raw)
    }

    pub fn on_pointer_up(&mut self, raw: Point) -> Vec<Action> {
        self.pointer.on_pointer_up(&mut self.viewport, raw)
    }

    // --- Animation ---

    /// Apply one frame of the running animation.
    ///
    /// Returns `true` while more frames are needed.
    pub fn step_animation(&mut self, step: FrameStep) -> bool {
        match step {
            FrameStep::Advance(progress) => self.viewport.advance(progress),
            FrameStep::Finish => {
                self.viewport.finish();
                false
            }
        }
    }
}

// =============================================================================
// BROWSER
// =============================================================================

type FrameCallback = Closure<dyn FnMut(f64)>;
type PointerCallback = Closure<dyn FnMut(MouseEvent)>;

/// Pending animation frame bookkeeping.
///
/// `generation` is bumped whenever a new animation starts or the wall is torn
/// down; a frame callback from an older generation does nothing.
#[derive(Default)]
struct FrameLoop {
    generation: u64,
    pending: Option<i32>,
    callback: Option<FrameCallback>,
}

struct Shared {
    canvas: HtmlCanvasElement,
    context: CanvasRenderingContext2d,
    core: RefCell<WallCore>,
    frames: RefCell<FrameLoop>,
}

impl Shared {
    fn draw(&self) {
        let mut context = self.context.clone();
        if let Err(err) = self.core.borrow().draw(&mut context) {
            log::warn!("draw failed: {err:?}");
        }
    }

    fn apply(this: &Rc<Self>, actions: Vec<Action>) {
        for action in actions {
            match action {
                Action::RenderNeeded => this.draw(),
                Action::BeginAnimation { duration_ms } => Self::begin_animation(this, duration_ms),
            }
        }
    }

    fn cancel_frames(&self) {
        let mut frames = self.frames.borrow_mut();
        frames.generation += 1;
        if let Some(id) = frames.pending.take() {
            if let Some(window) = web_sys::window() {
                if let Err(err) = window.cancel_animation_frame(id) {
                    log::warn!("cancel frame {id} failed: {err:?}");
                }
            }
        }
    }

    /// Run the queued animation for `duration_ms`, one step per display frame.
    fn begin_animation(this: &Rc<Self>, duration_ms: f64) {
        this.cancel_frames();
        let generation = this.frames.borrow().generation;
        let weak: Weak<Self> = Rc::downgrade(this);
        let mut clock = AnimationClock::new(duration_ms);

        let callback = Closure::wrap(Box::new(move |now_ms: f64| {
            let Some(shared) = weak.upgrade() else {
                return;
            };
            {
                let mut frames = shared.frames.borrow_mut();
                if frames.generation != generation {
                    return;
                }
                frames.pending = None;
            }
            let more = shared.core.borrow_mut().step_animation(clock.tick(now_ms));
            shared.draw();
            if more {
                shared.request_frame();
            }
        }) as Box<dyn FnMut(f64)>);

        this.frames.borrow_mut().callback = Some(callback);
        this.request_frame();
    }

    fn request_frame(&self) {
        let Some(window) = web_sys::window() else {
            log::warn!("no window: landing animation without frames");
            self.land_animation();
            return;
        };
        let requested = {
            let frames = self.frames.borrow();
            let Some(callback) = frames.callback.as_ref() else {
                return;
            };
            window.request_animation_frame(callback.as_ref().unchecked_ref())
        };
        match requested {
            Ok(id) => self.frames.borrow_mut().pending = Some(id),
            Err(err) => {
                log::warn!("animation frame request failed: {err:?}");
                self.land_animation();
            }
        }
    }

    /// Jump straight to the final frame.
    fn land_animation(&self) {
        self.core.borrow_mut().step_animation(FrameStep::Finish);
        self.draw();
    }
}

/// The canvas's 2-D rendering context.
///
/// # Errors
///
/// Returns [`WallError::NoContext`] if the canvas has none, or
/// [`WallError::Js`] if the browser rejects the request.
pub fn context_2d(canvas: &HtmlCanvasElement) -> Result<CanvasRenderingContext2d, WallError> {
    canvas
        .get_context("2d")?
        .ok_or(WallError::NoContext)?
        .dyn_into::<CanvasRenderingContext2d>()
        .map_err(|_| WallError::NoContext)
}

/// A wall bound to a browser canvas.
pub struct Wall {
    shared: Rc<Shared>,
    listeners: Vec<(&'static str, PointerCallback)>,
}

impl Wall {
    /// Bind a wall to `canvas`, sized to the canvas's current pixel size.
    ///
    /// # Errors
    ///
    /// Returns [`WallError::NoContext`] if the canvas has no 2-D context, or
    /// [`WallError::Js`] if a listener cannot be installed.
    pub fn new(canvas: HtmlCanvasElement, metrics: Rc<GlyphMetrics>, config: WallConfig) -> Result<Self, WallError> {
        let context = context_2d(&canvas)?;
        let core = WallCore::new(f64::from(canvas.width()), f64::from(canvas.height()), metrics, config);
        let shared = Rc::new(Shared {
            canvas,
            context,
            core: RefCell::new(core),
            frames: RefCell::new(FrameLoop::default()),
        });

        let mut wall = Self { shared, listeners: Vec::with_capacity(3) };
        wall.listen("mousemove", WallCore::on_pointer_move)?;
        wall.listen("mousedown", WallCore::on_pointer_down)?;
        wall.listen("mouseup", WallCore::on_pointer_up)?;
        log::info!("wall ready: {}x{}", wall.shared.canvas.width(), wall.shared.canvas.height());
        Ok(wall)
    }

    fn listen(&mut self, kind: &'static str, handler: fn(&mut WallCore, Point) -> Vec<Action>) -> Result<(), WallError> {
        let weak = Rc::downgrade(&self.shared);
        let callback = Closure::wrap(Box::new(move |event: MouseEvent| {
            let Some(shared) = weak.upgrade() else {
                return;
            };
            let raw = Point::new(f64::from(event.page_x()), f64::from(event.page_y()));
            let actions = handler(&mut shared.core.borrow_mut(), raw);
            Shared::apply(&shared, actions);
        }) as Box<dyn FnMut(MouseEvent)>);

        self.shared
            .canvas
            .add_event_listener_with_callback(kind, callback.as_ref().unchecked_ref())?;
        self.listeners.push((kind, callback));
        Ok(())
    }

    #[must_use]
    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.shared.canvas
    }

    #[must_use]
    pub fn context(&self) -> &CanvasRenderingContext2d {
        &self.shared.context
    }

    #[must_use]
    pub fn core(&self) -> Ref<'_, WallCore> {
        self.shared.core.borrow()
    }

    pub fn core_mut(&self) -> RefMut<'_, WallCore> {
        self.shared.core.borrow_mut()
    }

    pub fn add_note(&self, x: f64, y: f64) -> NoteId {
        self.core_mut().add_note(x, y)
    }

    /// # Errors
    ///
    /// Returns [`WallError::UnknownNote`] if no note has this id.
    pub fn set_note_text(&self, id: NoteId, text: &PreparedText) -> Result<WrappedText, WallError> {
        self.core_mut().set_note_text(id, text)
    }

    pub fn draw(&self) {
        self.shared.draw();
    }

    /// Play the queued animation for `duration_ms`, cancelling any frame loop
    /// already running.
    pub fn begin_animation(&self, duration_ms: f64) {
        Shared::begin_animation(&self.shared, duration_ms);
    }

    /// Remove listeners and cancel pending frames. Safe to call twice.
    pub fn teardown(&mut self) {
        for (kind, callback) in self.listeners.drain(..) {
            if let Err(err) = self
                .shared
                .canvas
                .remove_event_listener_with_callback(kind, callback.as_ref().unchecked_ref())
            {
                log::warn!("removing {kind} listener failed: {err:?}");
            }
        }
        self.shared.cancel_frames();
        self.shared.frames.borrow_mut().callback = None;
    }
}

impl Drop for Wall {
    fn drop(&mut self) {
        self.teardown();
    }
}
