//! Pointer input: the gesture state machine between raw pointer events and
//! the viewport.
//!
//! Moving the pointer curls the notes near it and drags the held note along.
//! Pressing over a note picks it up with a short lift animation; releasing
//! plays the matching drop animation, which puts the note back on the wall
//! when it completes. Handlers return [`Action`]s for the host to carry out.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use crate::animation::{Animation, AnimationDescriptor, Completion};
use crate::camera::Point;
use crate::note::{Note, NoteId};
use crate::viewport::Viewport;

/// Work the host must do after an input handler returns.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    /// Redraw the wall once.
    RenderNeeded,
    /// Start the frame loop for the queued animation.
    BeginAnimation { duration_ms: f64 },
}

/// Gesture in progress between pointer-down and pointer-up.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum InputState {
    /// No note held.
    #[default]
    Idle,
    /// A note was picked up and the pointer is still down.
    Holding {
        /// Id of the held note.
        note: NoteId,
        /// Wall position where the note was grabbed.
        grabbed_at: Point,
    },
}

/// Tracks pointer state across events.
#[derive(Debug, Clone, Default)]
pub struct PointerTracker {
    state: InputState,
    /// Wall position of the previous pointer event.
    last_wall: Option<Point>,
    /// Notes curled by the previous move.
    hovered: Vec<NoteId>,
    animation_ms: f64,
}

impl PointerTracker {
    #[must_use]
    pub fn new(animation_ms: f64) -> Self {
        Self { animation_ms, ..Self::default() }
    }

    #[must_use]
    pub fn state(&self) -> InputState {
        self.state
    }

    #[must_use]
    pub fn hovered(&self) -> &[NoteId] {
        &self.hovered
    }

    /// Curl notes near the pointer, flatten the ones it left, and drag the
    /// held note by the pointer's movement.
    pub fn on_pointer_move(&mut self, vp: &mut Viewport, raw: Point) -> Vec<Action> {
        let p = vp.to_wall_point(raw);
        let near = vp.notes_at(p);
        for id in &near {
            if let Some(note) = vp.note_mut(*id) {
                note.set_hover_deform(p);
            }
        }

        let active_id = vp.active().map(Note::id);
        for id in self.hovered.iter().filter(|id| !near.contains(*id)) {
            if Some(*id) == active_id {
                continue;
            }
            if let Some(note) = vp.note_mut(*id) {
                note.reset_deform();
            }
        }
        self.hovered = near;

        if let (Some(last), Some(active)) = (self.last_wall, vp.active_mut()) {
            active.translate(p.x - last.x, p.y - last.y);
        }
        self.last_wall = Some(p);
        vec![Action::RenderNeeded]
    }

    /// Pick up the note under the pointer and start the lift animation.
    pub fn on_pointer_down(&mut self, vp: &mut Viewport, raw: Point) -> Vec<Action> {
        let p = vp.to_wall_point(raw);
        self.last_wall = Some(p);
        if matches!(self.state, InputState::Holding { .. }) {
            return Vec::new();
        }

        // A drop still in flight must land before anything else is picked up.
        if vp.is_animating() {
            vp.finish();
        }
        if !vp.pull_active(p) {
            return Vec::new();
        }
        let Some(note) = vp.active().map(Note::id) else {
            return Vec::new();
        };

        if let Err(err) = vp.queue_animation(AnimationDescriptor::new(Animation::PickupActive, p)) {
            log::warn!("pick-up not animated: {err}");
            return vec![Action::RenderNeeded];
        }
        self.state = InputState::Holding { note, grabbed_at: p };
        vec![Action::BeginAnimation { duration_ms: self.animation_ms }]
    }

    /// Drop the held note and start the put-down animation, which releases
    /// the note when it completes.
    pub fn on_pointer_up(&mut self, vp: &mut Viewport, raw: Point) -> Vec<Action> {
        let InputState::Holding { note, .. } = std::mem::take(&mut self.state) else {
            return Vec::new();
        };
        let p = vp.to_wall_point(raw);
        self.last_wall = Some(p);

        if vp.is_animating() {
            vp.finish();
        }
        let drop = AnimationDescriptor::new(Animation::DropActive, p).then(Completion::ReleaseActive);
        if let Err(err) = vp.queue_animation(drop) {
            log::warn!("drop of {note} not animated: {err}");
            vp.release_active();
            return vec![Action::RenderNeeded];
        }
        vec![Action::BeginAnimation { duration_ms: self.animation_ms }]
    }
}
