//! Angle and horizontal-plane helpers

use std::f32::consts::{PI, TAU};

use glam::Vec3;

/// Wrap an angle into `[-PI, PI)`
pub fn wrap_angle(angle: f32) -> f32 {
    (angle + PI).rem_euclid(TAU) - PI
}

/// Interpolate between two angles along the shortest arc.
///
/// `weight` of 0 returns `from`, 1 lands on `to` (modulo a full turn).
pub fn lerp_angle(from: f32, to: f32, weight: f32) -> f32 {
    let difference = (to - from) % TAU;
    let shortest = (2.0 * difference) % TAU - difference;
    from + shortest * weight
}

/// Drop the vertical component of a vector
pub fn flatten(v: Vec3) -> Vec3 {
    Vec3::new(v.x, 0.0, v.z)
}

/// Unit direction from `from` to `to` on the horizontal plane.
///
/// Returns `None` when the points coincide horizontally (squared distance below `epsilon`).
pub fn horizontal_direction(from: Vec3, to: Vec3, epsilon: f32) -> Option<Vec3> {
    let offset = flatten(to - from);
    if offset.length_squared() <= epsilon {
        return None;
    }
    Some(offset.normalize())
}

/// Yaw that points a model's +Z axis along `direction` (vertical component ignored)
pub fn yaw_from_direction(direction: Vec3) -> f32 {
    direction.x.atan2(direction.z)
}
