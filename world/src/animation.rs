//! Animation sink that records instead of rendering.

use cgx_core::{AnimationClip, AnimationId, AnimationSink};

/// Records every animation identifier it is asked to play, oldest first.
///
/// Clips registered as non-looping stay pending once started until
/// [`finish_current`](AnimationLog::finish_current) reports their completion,
/// standing in for an animator's end-of-clip callback.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnimationLog {
    played: Vec<AnimationId>,
    non_looping: Vec<AnimationId>,
    pending: Option<PendingClip>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct PendingClip {
    id: AnimationId,
    frames: usize,
}

impl Default for AnimationLog {
    fn default() -> Self {
        Self::with_non_looping([AnimationClip::Ability.id()])
    }
}

impl AnimationLog {
    /// Creates an empty log where only the canonical ability clip is non-looping.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty log treating exactly `ids` as non-looping clips.
    #[must_use]
    pub fn with_non_looping(ids: impl IntoIterator<Item = AnimationId>) -> Self {
        Self {
            played: Vec::new(),
            non_looping: ids.into_iter().collect(),
            pending: None,
        }
    }

    /// Every identifier played so far.
    #[must_use]
    pub fn played(&self) -> &[AnimationId] {
        &self.played
    }

    /// Identifier most recently played, which is the clip on screen.
    #[must_use]
    pub fn current(&self) -> Option<AnimationId> {
        self.played.last().copied()
    }

    /// Non-looping clip that has started and not yet completed.
    #[must_use]
    pub fn pending(&self) -> Option<AnimationId> {
        self.pending.map(|clip| clip.id)
    }

    /// Completes the pending non-looping clip, returning it.
    ///
    /// Returns `None` when nothing is pending, so calling it twice in a row is
    /// harmless. Hosts forward a `Some` to the controller's `animation_end`.
    pub fn finish_current(&mut self) -> Option<AnimationId> {
        self.pending.take().map(|clip| clip.id)
    }

    /// Counts one rendered frame for the pending clip and completes it once it
    /// has been on screen for `clip_frames` frames, including the frame it
    /// started on.
    pub fn advance_frame(&mut self, clip_frames: usize) -> Option<AnimationId> {
        let clip = self.pending.as_mut()?;
        clip.frames = clip.frames.saturating_add(1);
        if clip.frames >= clip_frames {
            self.finish_current()
        } else {
            None
        }
    }

    /// Forgets recorded history, including any pending clip.
    pub fn clear(&mut self) {
        self.played.clear();
        self.pending = None;
    }
}

impl AnimationSink for AnimationLog {
    fn play(&mut self, animation: AnimationId) {
        self.played.push(animation);
        if self.non_looping.contains(&animation) {
            self.pending = Some(PendingClip {
                id: animation,
                frames: 0,
            });
        }
    }
}
