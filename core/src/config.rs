//! Tunable values for characters, loaded once and validated at construction.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Movement tuning for the platformer controller.
///
/// Gravity values are signed accelerations (negative pulls down). Defaults
/// match the shipped character tuning.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementConfig {
    /// Gravity applied when neither rising with the action held nor falling.
    pub base_gravity: f32,
    /// Gravity applied while rising with the action held.
    pub jump_start_gravity: f32,
    /// Gravity applied while falling.
    pub jump_end_gravity: f32,
    /// Horizontal target speed at full normalized input.
    pub run_speed: f32,
    /// Smoothing rate toward the target speed while grounded. Higher turns faster.
    pub ground_damping: f32,
    /// Smoothing rate toward the target speed while airborne.
    pub in_air_damping: f32,
    /// Apex height of a jump under the gravity in effect when it starts.
    pub jump_height: f32,
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            base_gravity: -25.0,
            jump_start_gravity: -25.0,
            jump_end_gravity: -25.0,
            run_speed: 8.0,
            ground_damping: 20.0,
            in_air_damping: 5.0,
            jump_height: 3.0,
        }
    }
}

impl MovementConfig {
    /// Checks that every value is usable by the tick integrator.
    pub fn validate(&self) -> Result<(), ConfigError> {
        ensure_finite("base_gravity", self.base_gravity)?;
        ensure_finite("jump_start_gravity", self.jump_start_gravity)?;
        ensure_finite("jump_end_gravity", self.jump_end_gravity)?;
        ensure_finite("run_speed", self.run_speed)?;
        ensure_finite("jump_height", self.jump_height)?;
        ensure_damping("ground_damping", self.ground_damping)?;
        ensure_damping("in_air_damping", self.in_air_damping)
    }
}

/// Starting stats for a status agent.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    /// Starting health.
    pub health: f32,
    /// Starting movement speed.
    pub move_speed: f32,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            health: 10.0,
            move_speed: 8.0,
        }
    }
}

impl AgentConfig {
    /// Checks that the starting stats are finite numbers.
    pub fn validate(&self) -> Result<(), ConfigError> {
        ensure_finite("health", self.health)?;
        ensure_finite("move_speed", self.move_speed)
    }
}

/// Reasons a configuration is rejected at construction.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ConfigError {
    /// The field holds NaN or an infinity.
    #[error("`{field}` must be a finite number")]
    NonFinite {
        /// Name of the offending field.
        field: &'static str,
    },
    /// A damping factor is negative, which would steer away from the target.
    #[error("`{field}` must not be negative, got {value}")]
    NegativeDamping {
        /// Name of the offending field.
        field: &'static str,
        /// Rejected value.
        value: f32,
    },
}

fn ensure_finite(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NonFinite { field })
    }
}

fn ensure_damping(field: &'static str, value: f32) -> Result<(), ConfigError> {
    ensure_finite(field, value)?;
    if value < 0.0 {
        return Err(ConfigError::NegativeDamping { field, value });
    }
    Ok(())
}
