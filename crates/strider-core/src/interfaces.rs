//! Collaborator interfaces
//!
//! The locomotion core never reaches into a scene graph. Everything it needs
//! from the host (collision, navigation, animation playback, camera output,
//! target positions) arrives through these traits, injected by whoever
//! builds the controllers.

use std::collections::HashMap;

use glam::Vec3;

use crate::types::EntityId;

/// Result of pushing a character through the collision world for one tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedMotion {
    /// Feet position after collision response
    pub position: Vec3,
    /// Whether the character is touching ground after the move
    pub grounded: bool,
}

/// Moves a character with collision response
pub trait CollisionResolver {
    /// Apply `desired_velocity` for `dt` seconds starting at `position`
    fn resolve(&mut self, position: Vec3, desired_velocity: Vec3, dt: f32) -> ResolvedMotion;
}

/// Supplies path-following waypoints
pub trait NavigationProvider {
    /// Next point to head for on the way from `from` to `target`.
    ///
    /// May return `target` itself when no intermediate waypoint is needed.
    fn next_waypoint(&mut self, from: Vec3, target: Vec3) -> Vec3;
}

/// Accepts animation clip requests
pub trait AnimationSink {
    /// Play `clip`, blending from the current clip over `blend_time` seconds.
    ///
    /// Must tolerate being asked for the clip that is already playing.
    fn play(&mut self, clip: &str, blend_time: f32);
}

/// Everything a renderer needs to place the camera
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraView {
    pub yaw: f32,
    pub pitch: f32,
    pub position: Vec3,
    /// Vertical field of view in degrees
    pub fov: f32,
}

/// Receives the camera placement at the end of each tick
pub trait CameraSink {
    fn present(&mut self, view: CameraView);
}

/// Read-only position lookup for non-owning target references
pub trait TargetLookup {
    /// Current position of `id`, or `None` if it no longer exists
    fn position_of(&self, id: EntityId) -> Option<Vec3>;
}

impl AnimationSink for () {
    fn play(&mut self, _clip: &str, _blend_time: f32) {}
}

impl CameraSink for () {
    fn present(&mut self, _view: CameraView) {}
}

impl TargetLookup for HashMap<EntityId, Vec3> {
    fn position_of(&self, id: EntityId) -> Option<Vec3> {
        self.get(&id).copied()
    }
}
