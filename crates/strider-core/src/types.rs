//! Core types used throughout Strider

use glam::Vec3;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for characters, used as a non-owning reference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityId(pub Uuid);

impl EntityId {
    /// Create a new random entity ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for EntityId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Kinematic state of a single character.
///
/// Owned by exactly one controller and written once per tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CharacterState {
    /// Feet position in world space
    pub position: Vec3,
    /// Facing angle around the vertical axis, in radians
    pub yaw: f32,
    /// Velocity requested for the current tick
    pub velocity: Vec3,
    /// Ground contact reported by the collision resolver last tick
    pub grounded: bool,
}

impl Default for CharacterState {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            yaw: 0.0,
            velocity: Vec3::ZERO,
            grounded: true,
        }
    }
}

impl CharacterState {
    /// Create a state standing at the given position
    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Velocity with the vertical component removed
    pub fn horizontal_velocity(&self) -> Vec3 {
        Vec3::new(self.velocity.x, 0.0, self.velocity.z)
    }

    /// Speed on the horizontal plane
    pub fn horizontal_speed(&self) -> f32 {
        self.horizontal_velocity().length()
    }
}
