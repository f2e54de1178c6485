//! Replayable action-key timelines.

use cgx_core::InputSource;

/// Action key state for a single tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InputSample {
    /// The key is down during the tick.
    pub held: bool,
    /// The key went down on this tick.
    pub pressed: bool,
}

impl InputSample {
    /// Key up.
    pub const RELEASED: Self = Self {
        held: false,
        pressed: false,
    };
    /// Key went down this tick.
    pub const PRESSED: Self = Self {
        held: true,
        pressed: true,
    };
    /// Key stays down from an earlier tick.
    pub const HELD: Self = Self {
        held: true,
        pressed: false,
    };
}

/// Input source that replays one sample per tick.
///
/// Hosts call [`advance`](ScriptedInput::advance) after every tick. Once the
/// timeline runs out the key reads as released.
#[derive(Clone, Debug, Default)]
pub struct ScriptedInput {
    timeline: Timeline,
    cursor: usize,
}

#[derive(Clone, Debug)]
enum Timeline {
    Samples(Vec<InputSample>),
    /// Sorted, deduplicated press ticks; held state is derived on demand.
    Presses {
        presses: Vec<usize>,
        hold_ticks: usize,
    },
}

impl Default for Timeline {
    fn default() -> Self {
        Self::Samples(Vec::new())
    }
}

impl Timeline {
    fn sample(&self, tick: usize) -> InputSample {
        match self {
            Self::Samples(samples) => samples
                .get(tick)
                .copied()
                .unwrap_or(InputSample::RELEASED),
            Self::Presses {
                presses,
                hold_ticks,
            } => {
                let started = presses.partition_point(|&press| press <= tick);
                let Some(&latest) = started.checked_sub(1).and_then(|i| presses.get(i)) else {
                    return InputSample::RELEASED;
                };
                InputSample {
                    held: tick - latest < *hold_ticks,
                    pressed: latest == tick,
                }
            }
        }
    }
}

impl ScriptedInput {
    /// Creates a timeline from explicit samples, first sample on tick zero.
    #[must_use]
    pub fn new(samples: Vec<InputSample>) -> Self {
        Self {
            timeline: Timeline::Samples(samples),
            cursor: 0,
        }
    }

    /// Builds a timeline where each tick in `presses` fires an edge and keeps
    /// the key down for `hold_ticks` ticks in total (at least the press tick).
    ///
    /// Only the press ticks are stored, so arbitrarily late presses cost
    /// nothing until the cursor reaches them.
    #[must_use]
    pub fn from_presses(presses: &[usize], hold_ticks: usize) -> Self {
        let mut presses = presses.to_vec();
        presses.sort_unstable();
        presses.dedup();
        Self {
            timeline: Timeline::Presses {
                presses,
                hold_ticks: hold_ticks.max(1),
            },
            cursor: 0,
        }
    }

    /// Moves to the next tick's sample.
    pub fn advance(&mut self) {
        self.cursor = self.cursor.saturating_add(1);
    }

    /// Index of the tick whose sample is currently exposed.
    #[must_use]
    pub fn tick_index(&self) -> usize {
        self.cursor
    }

    /// Sample exposed for the current tick.
    #[must_use]
    pub fn current(&self) -> InputSample {
        self.timeline.sample(self.cursor)
    }
}

impl InputSource for ScriptedInput {
    fn action_held(&self) -> bool {
        self.current().held
    }

    fn action_pressed(&self) -> bool {
        self.current().pressed
    }
}
