#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Headless stand-in for the host engine.
//!
//! [`Stage`] resolves movement against axis-aligned planes and trigger boxes,
//! [`ScriptedInput`] replays a recorded action-key timeline and
//! [`AnimationLog`] records every clip the controller selects. Together they
//! let the controller run deterministically without an engine.

pub mod animation;
pub mod input;

pub use animation::AnimationLog;
pub use input::{InputSample, ScriptedInput};

use cgx_core::{CollisionHit, Contact, Mover, TriggerCollider, Vec2};

const FLOOR_COLLIDER: &str = "floor";
const CEILING_COLLIDER: &str = "ceiling";
const LEFT_WALL_COLLIDER: &str = "left wall";
const RIGHT_WALL_COLLIDER: &str = "right wall";

/// Named axis-aligned box that reports enter and exit contacts.
#[derive(Clone, Debug, PartialEq)]
pub struct TriggerZone {
    name: String,
    min: Vec2,
    max: Vec2,
}

impl TriggerZone {
    /// Creates a trigger spanning the two corners, in any order.
    #[must_use]
    pub fn new(name: impl Into<String>, corner_a: Vec2, corner_b: Vec2) -> Self {
        Self {
            name: name.into(),
            min: corner_a.min(corner_b),
            max: corner_a.max(corner_b),
        }
    }

    /// Name reported in trigger contacts.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Reports whether the point lies inside the box, edges included.
    #[must_use]
    pub fn contains(&self, point: Vec2) -> bool {
        point.cmpge(self.min).all() && point.cmple(self.max).all()
    }
}

/// Point-sized character mover bounded by a floor and optional ceiling and walls.
///
/// The tracked position is the character's feet.
#[derive(Clone, Debug)]
pub struct Stage {
    position: Vec2,
    velocity: Vec2,
    grounded: bool,
    floor: f32,
    ceiling: Option<f32>,
    walls: Option<(f32, f32)>,
    triggers: Vec<TriggerZone>,
    overlapping: Vec<bool>,
    contacts: Vec<Contact>,
}

impl Stage {
    /// Creates a stage with the floor at zero and the character at `spawn`.
    #[must_use]
    pub fn new(spawn: Vec2) -> Self {
        Self {
            position: spawn,
            velocity: Vec2::ZERO,
            grounded: spawn.y <= 0.0,
            floor: 0.0,
            ceiling: None,
            walls: None,
            triggers: Vec::new(),
            overlapping: Vec::new(),
            contacts: Vec::new(),
        }
    }

    /// Moves the floor to `height`.
    #[must_use]
    pub fn with_floor(mut self, height: f32) -> Self {
        self.floor = height;
        self.grounded = self.position.y <= height;
        self
    }

    /// Adds a ceiling at `height`.
    #[must_use]
    pub fn with_ceiling(mut self, height: f32) -> Self {
        self.ceiling = Some(height);
        self
    }

    /// Adds walls bounding horizontal movement to `left..=right`.
    #[must_use]
    pub fn with_walls(mut self, left: f32, right: f32) -> Self {
        self.walls = Some((left.min(right), left.max(right)));
        self
    }

    /// Adds a trigger zone. A spawn inside the zone does not report an enter.
    #[must_use]
    pub fn with_trigger(mut self, zone: TriggerZone) -> Self {
        self.overlapping.push(zone.contains(self.position));
        self.triggers.push(zone);
        self
    }

    /// Current feet position.
    #[must_use]
    pub fn position(&self) -> Vec2 {
        self.position
    }

    /// Contacts recorded since the last drain, in the order they happened.
    ///
    /// Repeated identical hits collapse into the first one, so a character
    /// resting on the floor between drains leaves a single floor hit.
    #[must_use]
    pub fn pending_contacts(&self) -> &[Contact] {
        &self.contacts
    }

    /// Hands over every recorded contact, leaving the stage with none.
    pub fn drain_contacts(&mut self) -> Vec<Contact> {
        std::mem::take(&mut self.contacts)
    }

    fn hit(&mut self, normal: Vec2, collider: &str) {
        let contact = Contact::Hit(CollisionHit::new(normal, collider));
        if !self.contacts.contains(&contact) {
            self.contacts.push(contact);
        }
    }

    fn update_triggers(&mut self) {
        for (zone, was_inside) in self.triggers.iter().zip(self.overlapping.iter_mut()) {
            let inside = zone.contains(self.position);
            if inside == *was_inside {
                continue;
            }
            *was_inside = inside;
            let collider = TriggerCollider::new(zone.name());
            self.contacts.push(if inside {
                Contact::TriggerEnter(collider)
            } else {
                Contact::TriggerExit(collider)
            });
        }
    }
}

impl Mover for Stage {
    fn is_grounded(&self) -> bool {
        self.grounded
    }

    fn move_by(&mut self, delta: Vec2, delta_time: f32) {
        let mut target = self.position + delta;

        self.grounded = target.y <= self.floor;
        if self.grounded {
            target.y = self.floor;
            if delta.y < 0.0 {
                self.hit(Vec2::Y, FLOOR_COLLIDER);
            }
        }

        if let Some(ceiling) = self.ceiling {
            if target.y > ceiling {
                target.y = ceiling;
                self.hit(Vec2::NEG_Y, CEILING_COLLIDER);
            }
        }

        if let Some((left, right)) = self.walls {
            if target.x < left {
                target.x = left;
                self.hit(Vec2::X, LEFT_WALL_COLLIDER);
            } else if target.x > right {
                target.x = right;
                self.hit(Vec2::NEG_X, RIGHT_WALL_COLLIDER);
            }
        }

        let applied = target - self.position;
        self.position = target;
        self.velocity = if delta_time > 0.0 {
            applied / delta_time
        } else {
            Vec2::ZERO
        };
        log::trace!(
            "stage moved to {} (grounded: {})",
            self.position,
            self.grounded
        );

        self.update_triggers();
    }

    fn velocity(&self) -> Vec2 {
        self.velocity
    }
}
