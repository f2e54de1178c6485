#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Health and movement-impairment state for a spawned character.

use cgx_core::{AgentConfig, CollisionObserver, ConfigError};

/// Status state attached to a character for its whole lifetime.
///
/// Health is not clamped: damage can drive it below zero and nothing reacts
/// when it does. Callers that need a death transition check [`health`]
/// themselves.
///
/// [`health`]: StatusAgent::health
#[derive(Clone, Debug, PartialEq)]
pub struct StatusAgent {
    name: String,
    health: f32,
    move_speed: f32,
}

impl StatusAgent {
    /// Creates an agent with the provided starting stats.
    pub fn new(name: impl Into<String>, config: AgentConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            name: name.into(),
            health: config.health,
            move_speed: config.move_speed,
        })
    }

    /// Name used when attributing diagnostics to this agent.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current health. May be negative.
    #[must_use]
    pub fn health(&self) -> f32 {
        self.health
    }

    /// Current movement speed.
    #[must_use]
    pub fn move_speed(&self) -> f32 {
        self.move_speed
    }

    /// Reduces health by `amount`.
    pub fn damage(&mut self, amount: f32) {
        self.health -= amount;
        log::debug!("{}: took {amount} damage, health {}", self.name, self.health);
    }

    /// Pins the agent in place until something else restores its speed.
    pub fn root(&mut self) {
        self.move_speed = 0.0;
    }

    /// Slows the agent down. Not implemented yet; leaves speed unchanged.
    pub fn slow_down(&mut self) {
        log::trace!("{}: slow_down has no effect", self.name);
    }

    /// Speeds the agent up. Not implemented yet; leaves speed unchanged.
    pub fn speed_up(&mut self) {
        log::trace!("{}: speed_up has no effect", self.name);
    }

    /// Knocks the agent up and back. Not implemented yet; no impulse is produced.
    pub fn knock_back(&mut self) {
        log::trace!("{}: knock_back has no effect", self.name);
    }
}

impl CollisionObserver for StatusAgent {
    fn observer_name(&self) -> &str {
        &self.name
    }
}
