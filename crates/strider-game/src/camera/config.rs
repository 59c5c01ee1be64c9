//! Camera configuration

use serde::{Deserialize, Serialize};

/// Camera configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Mouse sensitivity (radians per pixel)
    pub sensitivity: f32,
    /// Minimum pitch angle in degrees
    pub pitch_min: f32,
    /// Maximum pitch angle in degrees
    pub pitch_max: f32,
    /// Height of the pivot above the character's feet
    pub pivot_height: f32,
    /// Narrowest field of view in degrees
    pub fov_min: f32,
    /// Widest field of view in degrees
    pub fov_max: f32,
    /// Field of view at spawn, in degrees
    pub default_fov: f32,
    /// Degrees of field of view per wheel notch
    pub zoom_step: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            sensitivity: 0.002,
            pitch_min: -30.0,
            pitch_max: 45.0,
            pivot_height: 1.6,
            fov_min: 60.0,
            fov_max: 90.0,
            default_fov: 75.0,
            zoom_step: 5.0,
        }
    }
}

impl CameraConfig {
    /// Pitch limits in radians, `(min, max)`
    pub fn pitch_bounds(&self) -> (f32, f32) {
        (self.pitch_min.to_radians(), self.pitch_max.to_radians())
    }
}
