//! Keyframe animations for pick-up and put-down gestures.
//!
//! An [`Animation`] is a named step that poses the entities it animates for a
//! given progress in `0.0..=1.0`. The viewport holds at most one
//! [`AnimationDescriptor`] at a time in its [`AnimationState`]; the frame loop
//! turns display-refresh timestamps into [`FrameStep`]s with an
//! [`AnimationClock`].

#[cfg(test)]
#[path = "animation_test.rs"]
mod animation_test;

use crate::camera::Point;
use crate::note::Note;

/// Every gesture animation the wall knows how to play.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Animation {
    /// Lift the active note off the wall.
    PickupActive,
    /// Lay the active note back down.
    DropActive,
}

impl Animation {
    /// Name used when animations are requested by string from JS.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::PickupActive => "pickupActive",
            Self::DropActive => "dropActive",
        }
    }

    /// Look up an animation by its JS-facing name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "pickupActive" => Some(Self::PickupActive),
            "dropActive" => Some(Self::DropActive),
            _ => None,
        }
    }

    /// Pose `entities` at `progress`. `trigger` is where the gesture started.
    ///
    /// Without an active note this does nothing.
    pub fn step(self, entities: &mut AnimationEntities<'_>, trigger: Point, progress: f64) {
        let Some(note) = entities.active.as_deref_mut() else {
            return;
        };
        log::trace!("{} at {progress:.2} from ({}, {})", self.name(), trigger.x, trigger.y);
        match self {
            Self::PickupActive => note.pick_up_step(progress),
            Self::DropActive => note.put_down_step(progress),
        }
    }
}

/// Mutable snapshot of what an animation may touch during one step.
#[derive(Debug, Default)]
pub struct AnimationEntities<'a> {
    pub active: Option<&'a mut Note>,
}

/// Work to run once an animation has played its final frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// Return the active note to the resting layer.
    ReleaseActive,
}

/// A queued or running animation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationDescriptor {
    pub animation: Animation,
    /// Wall position of the event that triggered the animation.
    pub trigger: Point,
    pub on_finish: Option<Completion>,
}

impl AnimationDescriptor {
    #[must_use]
    pub fn new(animation: Animation, trigger: Point) -> Self {
        Self { animation, trigger, on_finish: None }
    }

    #[must_use]
    pub fn then(mut self, completion: Completion) -> Self {
        self.on_finish = Some(completion);
        self
    }
}

/// Whether an animation is live.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum AnimationState {
    #[default]
    Idle,
    Running(AnimationDescriptor),
}

impl AnimationState {
    #[must_use]
    pub fn is_running(&self) -> bool {
        matches!(self, Self::Running(_))
    }

    #[must_use]
    pub fn descriptor(&self) -> Option<&AnimationDescriptor> {
        match self {
            Self::Idle => None,
            Self::Running(desc) => Some(desc),
        }
    }
}

/// What a frame callback should do with the current animation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FrameStep {
    /// Pose at this progress (in `0.0..1.0`) and request another frame.
    Advance(f64),
    /// Duration elapsed: finish the animation and draw one last time.
    Finish,
}

/// Converts frame timestamps into animation progress.
///
/// The first tick fixes the start time, so the first frame is always
/// `Advance(0.0)` for a positive duration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationClock {
    duration_ms: f64,
    start_ms: Option<f64>,
}

impl AnimationClock {
    #[must_use]
    pub fn new(duration_ms: f64) -> Self {
        Self { duration_ms, start_ms: None }
    }

    #[must_use]
    pub fn duration_ms(&self) -> f64 {
        self.duration_ms
    }

    /// Step for a frame stamped `now_ms`.
    pub fn tick(&mut self, now_ms: f64) -> FrameStep {
        let start = *self.start_ms.get_or_insert(now_ms);
        let elapsed = (now_ms - start).max(0.0);
        if self.duration_ms <= 0.0 || elapsed >= self.duration_ms {
            FrameStep::Finish
        } else {
            FrameStep::Advance(elapsed / self.duration_ms)
        }
    }
}
