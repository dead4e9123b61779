//! The viewport: owns every note on the wall, the note being held, the
//! spatial index, the pan/zoom frame, and the live animation.
//!
//! A note is either *resting* (in the back-to-front list and the index) or
//! *active* (held by the pointer and in neither). Only one note can be active
//! and only one animation can run at a time.

#[cfg(test)]
#[path = "viewport_test.rs"]
mod viewport_test;

use std::rc::Rc;

use crate::animation::{AnimationDescriptor, AnimationEntities, AnimationState, Completion};
use crate::camera::{Camera, Point};
use crate::config::WallConfig;
use crate::error::WallError;
use crate::metrics::GlyphMetrics;
use crate::note::{Note, NoteId};
use crate::quadtree::NoteIndex;

/// Where a note currently lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoteState {
    Resting,
    Active,
}

#[derive(Debug)]
pub struct Viewport {
    camera: Camera,
    width: f64,
    height: f64,
    /// Resting notes in insertion order, which is also render order.
    resting: Vec<Note>,
    active: Option<Note>,
    index: NoteIndex,
    animation: AnimationState,
    metrics: Rc<GlyphMetrics>,
    font: String,
    paper_color: String,
    hover_buffer: f64,
}

impl Viewport {
    #[must_use]
    pub fn new(width: f64, height: f64, metrics: Rc<GlyphMetrics>, config: &WallConfig) -> Self {
        Self {
            camera: Camera::default(),
            width,
            height,
            resting: Vec::new(),
            active: None,
            index: NoteIndex::new(width, height),
            animation: AnimationState::Idle,
            metrics,
            font: config.note_font().to_owned(),
            paper_color: config.paper_color.clone(),
            hover_buffer: config.hover_buffer,
        }
    }

    // --- Notes ---

    /// Create a resting note with its top-left corner at `(x, y)`.
    pub fn add_note(&mut self, x: f64, y: f64) -> NoteId {
        let mut note = Note::new(x, y, self.font.clone(), Rc::clone(&self.metrics));
        note.set_color(self.paper_color.clone());
        let id = note.id();
        self.index.insert(x, y, id);
        self.resting.push(note);
        log::debug!("added note {id} at ({x}, {y})");
        id
    }

    /// Every note in render order: resting back to front, then the active note.
    pub fn notes(&self) -> impl Iterator<Item = &Note> {
        self.resting.iter().chain(self.active.as_ref())
    }

    #[must_use]
    pub fn resting(&self) -> &[Note] {
        &self.resting
    }

    #[must_use]
    pub fn note(&self, id: NoteId) -> Option<&Note> {
        self.notes().find(|n| n.id() == id)
    }

    pub fn note_mut(&mut self, id: NoteId) -> Option<&mut Note> {
        self.resting.iter_mut().chain(self.active.as_mut()).find(|n| n.id() == id)
    }

    #[must_use]
    pub fn note_state(&self, id: NoteId) -> Option<NoteState> {
        if self.active.as_ref().is_some_and(|n| n.id() == id) {
            Some(NoteState::Active)
        } else if self.resting.iter().any(|n| n.id() == id) {
            Some(NoteState::Resting)
        } else {
            None
        }
    }

    /// Resting notes whose buffered square may contain `p`.
    #[must_use]
    pub fn notes_at(&self, p: Point) -> Vec<NoteId> {
        self.index.query_near(p.x, p.y, self.hover_buffer())
    }

    // --- Active note ---

    /// Pick up the topmost resting note containing `p`.
    ///
    /// Returns `false` when a note is already held or none contains `p`.
    pub fn pull_active(&mut self, p: Point) -> bool {
        if self.active.is_some() {
            return false;
        }
        let candidates = self.notes_at(p);
        let Some(pos) = self
            .resting
            .iter()
            .rposition(|n| candidates.contains(&n.id()) && n.contains_point(p))
        else {
            return false;
        };

        let note = self.resting.remove(pos);
        let anchor = note.position();
        self.index.remove(anchor.x, anchor.y, note.id());
        log::debug!("picked up note {} at ({}, {})", note.id(), p.x, p.y);
        self.active = Some(note);
        true
    }

    #[must_use]
    pub fn active(&self) -> Option<&Note> {
        self.active.as_ref()
    }

    pub fn active_mut(&mut self) -> Option<&mut Note> {
        self.active.as_mut()
    }

    #[must_use]
    pub fn has_active(&self) -> bool {
        self.active.is_some()
    }

    /// Put the active note back on top of the resting layer at its current position.
    ///
    /// Returns `false` if no note was held.
    pub fn release_active(&mut self) -> bool {
        let Some(note) = self.active.take() else {
            return false;
        };
        let anchor = note.position();
        self.index.insert(anchor.x, anchor.y, note.id());
        log::debug!("released note {} at ({}, {})", note.id(), anchor.x, anchor.y);
        self.resting.push(note);
        true
    }

    // --- Animation ---

    /// Start `desc` if no animation is running.
    ///
    /// # Errors
    ///
    /// Returns [`WallError::AnimationInFlight`] naming the running animation.
    pub fn queue_animation(&mut self, desc: AnimationDescriptor) -> Result<(), WallError> {
        if let AnimationState::Running(running) = &self.animation {
            return Err(WallError::AnimationInFlight(running.animation.name()));
        }
        log::debug!("queued {}", desc.animation.name());
        self.animation = AnimationState::Running(desc);
        Ok(())
    }

    /// Start `desc` unconditionally, returning the animation it superseded.
    ///
    /// The superseded animation's completion does not run.
    pub fn replace_animation(&mut self, desc: AnimationDescriptor) -> Option<AnimationDescriptor> {
        let previous = std::mem::replace(&mut self.animation, AnimationState::Running(desc));
        match previous {
            AnimationState::Running(old) => {
                log::debug!("{} superseded by {}", old.animation.name(), desc.animation.name());
                Some(old)
            }
            AnimationState::Idle => None,
        }
    }

    /// Pose the running animation's entities at `progress`.
    ///
    /// Returns `false` when idle.
    pub fn advance(&mut self, progress: f64) -> bool {
        let AnimationState::Running(desc) = self.animation else {
            return false;
        };
        let mut entities = AnimationEntities { active: self.active.as_mut() };
        desc.animation.step(&mut entities, desc.trigger, progress);
        true
    }

    /// Play the final frame, run the completion and go idle.
    ///
    /// Returns `false` when idle.
    pub fn finish(&mut self) -> bool {
        if !self.advance(1.0) {
            return false;
        }
        let AnimationState::Running(desc) = std::mem::take(&mut self.animation) else {
            return false;
        };
        log::debug!("finished {}", desc.animation.name());
        if let Some(Completion::ReleaseActive) = desc.on_finish {
            self.release_active();
        }
        true
    }

    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.animation.is_running()
    }

    #[must_use]
    pub fn animation(&self) -> Option<&AnimationDescriptor> {
        self.animation.descriptor()
    }

    // --- Frame ---

    /// Map a page-relative pointer position into wall coordinates.
    #[must_use]
    pub fn to_wall_point(&self, raw: Point) -> Point {
        self.camera.to_wall_point(raw)
    }

    /// Hover/pick buffer in wall units at the current zoom.
    #[must_use]
    pub fn hover_buffer(&self) -> f64 {
        self.camera.page_dist_to_wall(self.hover_buffer)
    }

    /// [`Self::hover_buffer`] rounded to whole wall units.
    #[must_use]
    pub fn factored_buffer(&self) -> f64 {
        self.hover_buffer().round()
    }

    #[must_use]
    pub fn camera(&self) -> Camera {
        self.camera
    }

    /// Replace the pan/zoom frame. A non-positive zoom is ignored.
    pub fn set_camera(&mut self, camera: Camera) {
        if camera.zoom > 0.0 {
            self.camera = camera;
        } else {
            log::warn!("ignoring camera with zoom {}", camera.zoom);
        }
    }

    #[must_use]
    pub fn index(&self) -> &NoteIndex {
        &self.index
    }

    #[must_use]
    pub fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    #[must_use]
    pub fn metrics(&self) -> &Rc<GlyphMetrics> {
        &self.metrics
    }
}
