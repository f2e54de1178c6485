//! Per-character strategy plugged into the fixed tick algorithm.

use cgx_core::{AnimationClip, AnimationId, Vec2};

/// Behaviour a character class supplies without changing how ticks resolve.
pub trait Archetype {
    /// Name used in diagnostics.
    fn name(&self) -> &str {
        "player"
    }

    /// Runs when the action fires while airborne.
    ///
    /// `velocity` already holds this tick's smoothed horizontal speed; any
    /// change is integrated with gravity and moved this same tick.
    fn ability(&mut self, _velocity: &mut Vec2) {}

    /// Maps a selected clip to the identifier handed to the animation sink.
    fn animation(&mut self, clip: AnimationClip) -> AnimationId {
        clip.id()
    }
}

/// Archetype with no ability and canonical clip identifiers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BaseArchetype;

impl Archetype for BaseArchetype {}
