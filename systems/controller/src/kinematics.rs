//! Pure formulas behind the per-tick integration.

use cgx_core::{GravityTier, MovementConfig};

/// Linear interpolation with the parameter clamped to `[0, 1]`.
///
/// Used as exponential-style smoothing: stepping `current` toward `target`
/// by `t` each tick never overshoots the target.
#[must_use]
pub fn lerp(current: f32, target: f32, t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    current + (target - current) * t
}

/// Initial vertical velocity that reaches `jump_height` under `gravity`.
///
/// Negative heights and non-downward gravity produce no impulse.
#[must_use]
pub fn jump_impulse(jump_height: f32, gravity: f32) -> f32 {
    let lift = 2.0 * jump_height.max(0.0) * -gravity;
    if lift > 0.0 {
        lift.sqrt()
    } else {
        0.0
    }
}

/// Chooses the gravity tier from the vertical velocity sign and the held action.
#[must_use]
pub fn select_gravity(velocity_y: f32, action_held: bool) -> GravityTier {
    if velocity_y < 0.0 {
        GravityTier::JumpEnd
    } else if velocity_y > 0.0 && action_held {
        GravityTier::JumpStart
    } else {
        GravityTier::Base
    }
}

/// Gravity value configured for a tier.
#[must_use]
pub fn gravity_for(tier: GravityTier, config: &MovementConfig) -> f32 {
    match tier {
        GravityTier::Base => config.base_gravity,
        GravityTier::JumpStart => config.jump_start_gravity,
        GravityTier::JumpEnd => config.jump_end_gravity,
    }
}

#[cfg(test)]
mod tests {
    use super::{gravity_for, jump_impulse, lerp, select_gravity};
    use approx::assert_relative_eq;
    use cgx_core::{GravityTier, MovementConfig};

    #[test]
    fn impulse_reaches_configured_apex() {
        assert_relative_eq!(jump_impulse(3.0, -25.0), 150.0_f32.sqrt());
    }

    #[test]
    fn impulse_is_zero_for_negative_height_or_upward_gravity() {
        assert_eq!(jump_impulse(-3.0, -25.0), 0.0);
        assert_eq!(jump_impulse(3.0, 25.0), 0.0);
        assert_eq!(jump_impulse(0.0, -25.0), 0.0);
    }

    #[test]
    fn lerp_clamps_parameter() {
        assert_relative_eq!(lerp(0.0, 8.0, 0.25), 2.0);
        assert_relative_eq!(lerp(0.0, 8.0, 4.0), 8.0);
        assert_relative_eq!(lerp(3.0, 8.0, -1.0), 3.0);
    }

    #[test]
    fn lerp_approaches_target_without_overshoot() {
        let mut speed = 0.0;
        let mut previous = speed;
        for _ in 0..200 {
            speed = lerp(speed, 8.0, 0.016 * 20.0);
            assert!(speed >= previous);
            assert!(speed <= 8.0);
            previous = speed;
        }
        assert_relative_eq!(speed, 8.0, epsilon = 1e-3);
    }

    #[test]
    fn gravity_tier_depends_only_on_sign_and_hold() {
        assert_eq!(select_gravity(-0.1, true), GravityTier::JumpEnd);
        assert_eq!(select_gravity(-0.1, false), GravityTier::JumpEnd);
        assert_eq!(select_gravity(4.0, true), GravityTier::JumpStart);
        assert_eq!(select_gravity(4.0, false), GravityTier::Base);
        assert_eq!(select_gravity(0.0, true), GravityTier::Base);
        assert_eq!(select_gravity(0.0, false), GravityTier::Base);
    }

    #[test]
    fn tiers_map_to_configured_values() {
        let config = MovementConfig {
            base_gravity: -30.0,
            jump_start_gravity: -12.0,
            jump_end_gravity: -45.0,
            ..MovementConfig::default()
        };
        assert_eq!(gravity_for(GravityTier::Base, &config), -30.0);
        assert_eq!(gravity_for(GravityTier::JumpStart, &config), -12.0);
        assert_eq!(gravity_for(GravityTier::JumpEnd, &config), -45.0);
    }
}
