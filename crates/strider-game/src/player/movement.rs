//! Horizontal movement solver and facing smoothing

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};
use strider_core::math::{flatten, lerp_angle, wrap_angle, yaw_from_direction};

use crate::camera::HorizontalBasis;

/// Movement configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementConfig {
    /// Walking speed in meters per second
    pub walk_speed: f32,
    /// How quickly the model turns toward its velocity (0 = never)
    pub rotation_smoothness: f32,
    /// Squared length below which a direction counts as zero
    pub input_epsilon: f32,
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            walk_speed: 5.0,
            rotation_smoothness: 12.0,
            input_epsilon: 1e-4,
        }
    }
}

/// Map stick/WASD axes onto the camera basis.
///
/// `axes.x` steers along `basis.right`, `axes.y` along `basis.forward`. The
/// result is horizontal, either exactly zero or exactly `speed` long.
pub fn compute_velocity(axes: Vec2, basis: HorizontalBasis, speed: f32, epsilon: f32) -> Vec3 {
    debug_assert!(
        axes.x.abs() <= 1.0 + 1e-3 && axes.y.abs() <= 1.0 + 1e-3,
        "movement axes out of range: {axes:?}"
    );

    // Diagonals would otherwise be faster than straight lines
    let axes = if axes.length_squared() > 1.0 {
        axes.normalize()
    } else {
        axes
    };

    let direction = basis.right * axes.x + basis.forward * axes.y;
    if direction.length_squared() < epsilon {
        return Vec3::ZERO;
    }
    direction.normalize() * speed
}

/// Turn `current_yaw` toward the direction of `velocity` along the shortest arc.
///
/// A stationary character keeps its last facing.
pub fn smooth_facing(current_yaw: f32, velocity: Vec3, smoothness: f32, dt: f32, epsilon: f32) -> f32 {
    let horizontal = flatten(velocity);
    if horizontal.length_squared() <= epsilon {
        return current_yaw;
    }

    let target_yaw = yaw_from_direction(horizontal);
    let weight = (smoothness * dt).clamp(0.0, 1.0);
    wrap_angle(lerp_angle(current_yaw, target_yaw, weight))
}
