#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Frame-stepped platformer controller.
//!
//! The controller owns the character velocity and resolves one tick per call
//! to [`PlatformerController::tick`]: it reads the grounded flag and the action
//! key, smooths horizontal speed, fires jumps and airborne abilities, selects
//! an animation, picks a gravity tier, and hands the resulting displacement to
//! the host [`Mover`]. The host owns the loop.

pub mod archetype;
pub mod kinematics;

pub use archetype::{Archetype, BaseArchetype};

use cgx_core::{
    AnimationClip, AnimationSink, CollisionObserver, ConfigError, ControllerEvent, Facing,
    GravityTier, InputSource, MovementConfig, MovementPhase, Mover, Vec2,
};

/// Host capabilities the controller is wired to at construction.
#[derive(Debug)]
pub struct Collaborators<M, I, A> {
    /// Applies movement and resolves collisions.
    pub mover: M,
    /// Supplies the action key state.
    pub input: I,
    /// Plays selected animations.
    pub animations: A,
}

/// Platformer character controller driven one tick at a time.
#[derive(Debug)]
pub struct PlatformerController<M, I, A, K = BaseArchetype> {
    config: MovementConfig,
    mover: M,
    input: I,
    animations: A,
    archetype: K,
    velocity: Vec2,
    normalized_horizontal_speed: f32,
    scale_x: f32,
    ability_animating: bool,
    gravity_tier: GravityTier,
    effective_gravity: f32,
}

impl<M, I, A> PlatformerController<M, I, A, BaseArchetype>
where
    M: Mover,
    I: InputSource,
    A: AnimationSink,
{
    /// Creates a controller at rest, facing right, using [`BaseArchetype`].
    pub fn new(
        config: MovementConfig,
        collaborators: Collaborators<M, I, A>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let Collaborators {
            mover,
            input,
            animations,
        } = collaborators;
        Ok(Self {
            effective_gravity: config.base_gravity,
            config,
            mover,
            input,
            animations,
            archetype: BaseArchetype,
            velocity: Vec2::ZERO,
            normalized_horizontal_speed: 0.0,
            scale_x: 1.0,
            ability_animating: false,
            gravity_tier: GravityTier::Base,
        })
    }
}

impl<M, I, A, K> PlatformerController<M, I, A, K>
where
    M: Mover,
    I: InputSource,
    A: AnimationSink,
    K: Archetype,
{
    /// Replaces the archetype, keeping all other state.
    #[must_use]
    pub fn with_archetype<K2: Archetype>(
        self,
        archetype: K2,
    ) -> PlatformerController<M, I, A, K2> {
        PlatformerController {
            config: self.config,
            mover: self.mover,
            input: self.input,
            animations: self.animations,
            archetype,
            velocity: self.velocity,
            normalized_horizontal_speed: self.normalized_horizontal_speed,
            scale_x: self.scale_x,
            ability_animating: self.ability_animating,
            gravity_tier: self.gravity_tier,
            effective_gravity: self.effective_gravity,
        }
    }

    /// Resolves a single frame of `delta_time` seconds, appending what happened to `out`.
    ///
    /// A non-finite or negative `delta_time` is treated as zero. A zero-length
    /// tick still resolves animation and gravity selection but does not call
    /// the mover, so the velocity carries over unchanged.
    pub fn tick(&mut self, delta_time: f32, out: &mut Vec<ControllerEvent>) {
        let dt = sanitize_delta(delta_time);
        let grounded = self.mover.is_grounded();
        let pressed = self.input.action_pressed();
        let held = self.input.action_held();

        if grounded {
            self.velocity.y = 0.0;
        }

        self.normalized_horizontal_speed = 1.0;
        let damping = if grounded {
            self.config.ground_damping
        } else {
            self.config.in_air_damping
        };
        self.velocity.x = kinematics::lerp(
            self.velocity.x,
            self.normalized_horizontal_speed * self.config.run_speed,
            dt * damping,
        );

        // Only ever mirrors toward the right; nothing flips the character back.
        if self.scale_x < 0.0 {
            self.scale_x = -self.scale_x;
            out.push(ControllerEvent::FacingCorrected {
                scale_x: self.scale_x,
            });
        }

        if grounded {
            self.select_animation(AnimationClip::Run, out);

            if pressed {
                // Gravity still holds the tier picked on the previous tick.
                let impulse =
                    kinematics::jump_impulse(self.config.jump_height, self.effective_gravity);
                self.velocity.y = impulse;
                self.select_animation(AnimationClip::Jump, out);
                out.push(ControllerEvent::Jumped { impulse });
            }
        } else {
            if pressed {
                self.select_animation(AnimationClip::Ability, out);
                self.ability_animating = true;
                out.push(ControllerEvent::AbilityTriggered);
                self.archetype.ability(&mut self.velocity);
            }

            if self.velocity.y < 0.0 && !self.ability_animating {
                self.select_animation(AnimationClip::Fall, out);
            }
        }

        self.gravity_tier = kinematics::select_gravity(self.velocity.y, held);
        self.effective_gravity = kinematics::gravity_for(self.gravity_tier, &self.config);
        out.push(ControllerEvent::GravitySelected {
            tier: self.gravity_tier,
            gravity: self.effective_gravity,
        });
        self.velocity.y += self.effective_gravity * dt;

        if dt == 0.0 {
            return;
        }

        let delta = self.velocity * dt;
        self.mover.move_by(delta, dt);
        self.velocity = self.mover.velocity();
        out.push(ControllerEvent::Moved {
            delta,
            velocity: self.velocity,
        });
    }

    /// Completion callback for non-looping ability animations. Idempotent.
    pub fn animation_end(&mut self) {
        self.ability_animating = false;
    }

    /// Writes the horizontal scale the host renders the character with.
    pub fn set_facing_scale(&mut self, scale_x: f32) {
        self.scale_x = scale_x;
    }

    /// Movement phase implied by the current state.
    #[must_use]
    pub fn phase(&self) -> MovementPhase {
        if self.ability_animating {
            MovementPhase::AbilityActive
        } else if self.mover.is_grounded() {
            MovementPhase::Grounded
        } else if self.velocity.y > 0.0 {
            MovementPhase::Rising
        } else {
            MovementPhase::Falling
        }
    }

    /// Velocity carried into the next tick.
    #[must_use]
    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    /// Normalized horizontal input applied on the last tick.
    #[must_use]
    pub fn normalized_horizontal_speed(&self) -> f32 {
        self.normalized_horizontal_speed
    }

    /// Gravity tier selected on the last tick.
    #[must_use]
    pub fn gravity_tier(&self) -> GravityTier {
        self.gravity_tier
    }

    /// Gravity integrated on the last tick, which is also the gravity the next
    /// jump impulse is computed from.
    #[must_use]
    pub fn effective_gravity(&self) -> f32 {
        self.effective_gravity
    }

    /// Whether an ability animation is waiting for its completion callback.
    #[must_use]
    pub fn is_ability_animating(&self) -> bool {
        self.ability_animating
    }

    /// Horizontal scale after the last facing correction.
    #[must_use]
    pub fn facing_scale(&self) -> f32 {
        self.scale_x
    }

    /// Facing derived from the horizontal scale.
    #[must_use]
    pub fn facing(&self) -> Facing {
        Facing::from_scale(self.scale_x)
    }

    /// Movement tuning in use.
    #[must_use]
    pub fn config(&self) -> &MovementConfig {
        &self.config
    }

    /// Host mover.
    #[must_use]
    pub fn mover(&self) -> &M {
        &self.mover
    }

    /// Mutable access to the host mover, for hosts that drain contacts between ticks.
    pub fn mover_mut(&mut self) -> &mut M {
        &mut self.mover
    }

    /// Host input source.
    #[must_use]
    pub fn input(&self) -> &I {
        &self.input
    }

    /// Mutable access to the input source, for hosts that feed samples between ticks.
    pub fn input_mut(&mut self) -> &mut I {
        &mut self.input
    }

    /// Host animation sink.
    #[must_use]
    pub fn animations(&self) -> &A {
        &self.animations
    }

    /// Mutable access to the animation sink.
    pub fn animations_mut(&mut self) -> &mut A {
        &mut self.animations
    }

    /// Archetype in use.
    #[must_use]
    pub fn archetype(&self) -> &K {
        &self.archetype
    }

    fn select_animation(&mut self, clip: AnimationClip, out: &mut Vec<ControllerEvent>) {
        let id = self.archetype.animation(clip);
        self.animations.play(id);
        out.push(ControllerEvent::AnimationSelected { clip, id });
    }
}

impl<M, I, A, K> CollisionObserver for PlatformerController<M, I, A, K>
where
    K: Archetype,
{
    fn observer_name(&self) -> &str {
        self.archetype.name()
    }
}

fn sanitize_delta(delta_time: f32) -> f32 {
    if delta_time.is_finite() && delta_time >= 0.0 {
        return delta_time;
    }
    log::warn!("ignoring unusable tick length {delta_time}, resolving as zero");
    0.0
}

#[cfg(test)]
mod tests {
    use super::sanitize_delta;

    #[test]
    fn unusable_tick_lengths_become_zero() {
        assert_eq!(sanitize_delta(f32::NAN), 0.0);
        assert_eq!(sanitize_delta(f32::INFINITY), 0.0);
        assert_eq!(sanitize_delta(-0.016), 0.0);
        assert_eq!(sanitize_delta(0.016), 0.016);
    }
}
