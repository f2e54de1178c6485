#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the CGX character systems.
//!
//! This crate defines the surface that connects a host engine to the pure
//! character systems. Hosts supply collaborator capabilities ([`Mover`],
//! [`InputSource`], [`AnimationSink`]) when constructing a controller, drive
//! it one tick at a time, and receive [`ControllerEvent`] values describing
//! what the tick resolved. Collision and trigger contacts flow back through
//! [`CollisionObserver`], whose default behaviour is diagnostic logging.

pub mod config;

pub use config::{AgentConfig, ConfigError, MovementConfig};
pub use glam::Vec2;

use serde::{Deserialize, Serialize};

/// Integer identifier handed to an [`AnimationSink`] when a clip is selected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AnimationId(u32);

impl AnimationId {
    /// Creates a new animation identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Discrete animation states the controller selects between.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AnimationClip {
    /// Grounded locomotion.
    Run,
    /// Take-off from the ground.
    Jump,
    /// Airborne descent while no ability is playing.
    Fall,
    /// Airborne ability activation. Non-looping; the sink must report completion.
    Ability,
}

impl AnimationClip {
    /// Canonical integer identifier used when an archetype does not remap the clip.
    #[must_use]
    pub const fn id(self) -> AnimationId {
        match self {
            Self::Run => AnimationId::new(1),
            Self::Jump => AnimationId::new(2),
            Self::Fall => AnimationId::new(3),
            Self::Ability => AnimationId::new(4),
        }
    }

    /// Human readable clip name used in traces.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Run => "run",
            Self::Jump => "jump",
            Self::Fall => "fall",
            Self::Ability => "ability",
        }
    }
}

/// Movement phase derived from the controller state after a tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MovementPhase {
    /// The mover reports the character resting on a surface.
    Grounded,
    /// Airborne with positive vertical velocity.
    Rising,
    /// Airborne with zero or negative vertical velocity.
    Falling,
    /// An ability animation is playing and has not reported completion.
    AbilityActive,
}

/// Gravity tier selected for vertical integration on a tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GravityTier {
    /// Neither falling nor holding the action during ascent.
    Base,
    /// Rising while the action is held; lets longer presses jump higher.
    JumpStart,
    /// Falling.
    JumpEnd,
}

/// Horizontal facing derived from the sign of the horizontal scale.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Facing {
    /// Negative horizontal scale.
    Left,
    /// Zero or positive horizontal scale.
    Right,
}

impl Facing {
    /// Derives the facing from a horizontal scale value.
    #[must_use]
    pub fn from_scale(scale_x: f32) -> Self {
        if scale_x < 0.0 {
            Self::Left
        } else {
            Self::Right
        }
    }
}

/// Result of the mover blocking movement along one axis.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CollisionHit {
    /// Surface normal at the contact point.
    pub normal: Vec2,
    /// Name of the collider that was hit.
    pub collider: String,
}

impl CollisionHit {
    /// Creates a new collision record.
    #[must_use]
    pub fn new(normal: Vec2, collider: impl Into<String>) -> Self {
        Self {
            normal,
            collider: collider.into(),
        }
    }

    /// Reports whether the hit is a plain ground contact (normal pointing straight up).
    #[must_use]
    pub fn is_ground(&self) -> bool {
        self.normal.y == 1.0
    }
}

/// Trigger volume the character entered or left.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TriggerCollider {
    /// Name of the trigger volume.
    pub name: String,
}

impl TriggerCollider {
    /// Creates a trigger reference with the provided name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Contact reported by a mover after resolving a movement request.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Contact {
    /// The mover was blocked by a solid collider.
    Hit(CollisionHit),
    /// The character started overlapping a trigger volume.
    TriggerEnter(TriggerCollider),
    /// The character stopped overlapping a trigger volume.
    TriggerExit(TriggerCollider),
}

/// Events emitted by the platformer controller while resolving a tick.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum ControllerEvent {
    /// A negative horizontal scale was mirrored to positive.
    FacingCorrected {
        /// Scale after the correction.
        scale_x: f32,
    },
    /// An animation clip was selected and forwarded to the sink.
    AnimationSelected {
        /// Clip the controller selected.
        clip: AnimationClip,
        /// Identifier the archetype mapped the clip to.
        id: AnimationId,
    },
    /// A grounded jump fired.
    Jumped {
        /// Initial vertical velocity applied.
        impulse: f32,
    },
    /// An airborne ability fired.
    AbilityTriggered,
    /// Gravity tier chosen for this tick's vertical integration.
    GravitySelected {
        /// Selected tier.
        tier: GravityTier,
        /// Gravity value applied, in units per second squared.
        gravity: f32,
    },
    /// The movement delta was handed to the mover.
    Moved {
        /// Displacement requested from the mover.
        delta: Vec2,
        /// Velocity read back from the mover after collision resolution.
        velocity: Vec2,
    },
}

/// Host capability that applies movement and resolves collisions.
pub trait Mover {
    /// Reports whether the character rests on a surface.
    fn is_grounded(&self) -> bool;

    /// Applies the displacement, resolving collisions. `delta_time` is the
    /// tick length the displacement was computed for.
    fn move_by(&mut self, delta: Vec2, delta_time: f32);

    /// Velocity after the last move, corrected for collisions.
    fn velocity(&self) -> Vec2;
}

/// Host capability exposing the single action key.
pub trait InputSource {
    /// Level state: the action key is currently down.
    fn action_held(&self) -> bool;

    /// Edge state: the action key went down on this tick.
    fn action_pressed(&self) -> bool;
}

/// Host capability that plays animations.
///
/// Sinks must report completion of every [`AnimationClip::Ability`] clip they
/// play back to the controller, otherwise the controller stays in
/// [`MovementPhase::AbilityActive`].
pub trait AnimationSink {
    /// Starts playing the animation with the provided identifier.
    fn play(&mut self, animation: AnimationId);
}

/// Receiver for contacts reported by the host mover.
///
/// The default methods only log. Plain ground hits are ignored entirely.
pub trait CollisionObserver {
    /// Name used to attribute diagnostics to this observer.
    fn observer_name(&self) -> &str;

    /// Called for every solid collider the mover was blocked by. Ground hits
    /// stop here; everything else goes on to [`on_obstacle`](Self::on_obstacle).
    fn on_collision(&mut self, hit: &CollisionHit) {
        if hit.is_ground() {
            return;
        }
        self.on_obstacle(hit);
    }

    /// Called for solid hits that are not plain ground.
    fn on_obstacle(&mut self, hit: &CollisionHit) {
        log::debug!(
            "{}: hit {} with normal {}",
            self.observer_name(),
            hit.collider,
            hit.normal
        );
    }

    /// Called when the character starts overlapping a trigger.
    fn on_trigger_enter(&mut self, collider: &TriggerCollider) {
        log::info!("{}: trigger enter {}", self.observer_name(), collider.name);
    }

    /// Called when the character stops overlapping a trigger.
    fn on_trigger_exit(&mut self, collider: &TriggerCollider) {
        log::info!("{}: trigger exit {}", self.observer_name(), collider.name);
    }

    /// Routes a contact to the matching callback.
    fn observe(&mut self, contact: &Contact) {
        match contact {
            Contact::Hit(hit) => self.on_collision(hit),
            Contact::TriggerEnter(collider) => self.on_trigger_enter(collider),
            Contact::TriggerExit(collider) => self.on_trigger_exit(collider),
        }
    }
}

impl<T: Mover + ?Sized> Mover for Box<T> {
    fn is_grounded(&self) -> bool {
        (**self).is_grounded()
    }

    fn move_by(&mut self, delta: Vec2, delta_time: f32) {
        (**self).move_by(delta, delta_time);
    }

    fn velocity(&self) -> Vec2 {
        (**self).velocity()
    }
}

impl<T: InputSource + ?Sized> InputSource for Box<T> {
    fn action_held(&self) -> bool {
        (**self).action_held()
    }

    fn action_pressed(&self) -> bool {
        (**self).action_pressed()
    }
}

impl<T: AnimationSink + ?Sized> AnimationSink for Box<T> {
    fn play(&mut self, animation: AnimationId) {
        (**self).play(animation);
    }
}

#[cfg(test)]
mod tests {
    use super::{
        AnimationClip, CollisionHit, CollisionObserver, Contact, Facing, TriggerCollider, Vec2,
    };

    #[derive(Default)]
    struct Counting {
        enters: u32,
        exits: u32,
        obstacles: Vec<String>,
    }

    impl CollisionObserver for Counting {
        fn observer_name(&self) -> &str {
            "counting"
        }

        fn on_obstacle(&mut self, hit: &CollisionHit) {
            self.obstacles.push(hit.collider.clone());
        }

        fn on_trigger_enter(&mut self, _collider: &TriggerCollider) {
            self.enters += 1;
        }

        fn on_trigger_exit(&mut self, _collider: &TriggerCollider) {
            self.exits += 1;
        }
    }

    #[test]
    fn canonical_clip_ids_match_legacy_numbering() {
        assert_eq!(AnimationClip::Run.id().get(), 1);
        assert_eq!(AnimationClip::Jump.id().get(), 2);
        assert_eq!(AnimationClip::Fall.id().get(), 3);
        assert_eq!(AnimationClip::Ability.id().get(), 4);
    }

    #[test]
    fn only_straight_up_normals_count_as_ground() {
        assert!(CollisionHit::new(Vec2::Y, "floor").is_ground());
        assert!(!CollisionHit::new(Vec2::new(0.6, 0.8), "ramp").is_ground());
        assert!(!CollisionHit::new(Vec2::NEG_X, "wall").is_ground());
    }

    #[test]
    fn facing_follows_scale_sign() {
        assert_eq!(Facing::from_scale(-1.0), Facing::Left);
        assert_eq!(Facing::from_scale(0.0), Facing::Right);
        assert_eq!(Facing::from_scale(2.5), Facing::Right);
    }

    #[test]
    fn observe_routes_trigger_contacts() {
        let mut observer = Counting::default();
        let gate = TriggerCollider::new("gate");
        observer.observe(&Contact::TriggerEnter(gate.clone()));
        observer.observe(&Contact::TriggerExit(gate));
        observer.observe(&Contact::Hit(CollisionHit::new(Vec2::X, "wall")));
        assert_eq!(observer.enters, 1);
        assert_eq!(observer.exits, 1);
        assert_eq!(observer.obstacles, vec!["wall".to_owned()]);
    }

    #[test]
    fn ground_hits_never_reach_obstacle_handling() {
        let mut observer = Counting::default();
        observer.observe(&Contact::Hit(CollisionHit::new(Vec2::Y, "floor")));
        observer.observe(&Contact::Hit(CollisionHit::new(Vec2::new(0.6, 0.8), "ramp")));
        observer.observe(&Contact::Hit(CollisionHit::new(Vec2::NEG_Y, "ceiling")));
        observer.observe(&Contact::Hit(CollisionHit::new(Vec2::Y, "floor")));

        assert_eq!(
            observer.obstacles,
            vec!["ramp".to_owned(), "ceiling".to_owned()]
        );
    }
}
