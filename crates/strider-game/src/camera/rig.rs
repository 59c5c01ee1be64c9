//! Orbit camera rig with clamped pitch and field-of-view zoom

use glam::{Vec2, Vec3};
use strider_core::CameraView;

use super::CameraConfig;

/// Camera-relative movement axes on the horizontal plane.
///
/// Derived from yaw only, so looking up or down never tilts movement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HorizontalBasis {
    /// Unit vector the camera looks along, flattened
    pub forward: Vec3,
    /// Unit vector to the camera's right, flattened
    pub right: Vec3,
}

impl HorizontalBasis {
    /// Basis for a camera yawed by `yaw` radians (yaw 0 looks down -Z)
    pub fn from_yaw(yaw: f32) -> Self {
        let (sin, cos) = yaw.sin_cos();
        Self {
            forward: Vec3::new(-sin, 0.0, -cos),
            right: Vec3::new(cos, 0.0, -sin),
        }
    }
}

/// Yaw, pitch and field of view of the rig
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraOrientation {
    /// Horizontal rotation in radians
    pub yaw: f32,
    /// Vertical rotation in radians
    pub pitch: f32,
    /// Vertical field of view in degrees
    pub fov: f32,
}

impl CameraOrientation {
    /// Orientation after a mouse movement of `delta` pixels.
    ///
    /// Pitch is clamped after every delta, so small deltas can never creep past a limit.
    pub fn with_mouse_delta(self, delta: Vec2, sensitivity: f32, pitch_bounds: (f32, f32)) -> Self {
        let (pitch_min, pitch_max) = pitch_bounds;
        let pitch = (self.pitch + delta.y * sensitivity).clamp(pitch_min, pitch_max);
        Self {
            yaw: self.yaw - delta.x * sensitivity,
            pitch,
            ..self
        }
    }

    /// Orientation after zooming by `step` degrees (positive narrows the view)
    pub fn with_zoom(self, step: f32, fov_min: f32, fov_max: f32) -> Self {
        Self {
            fov: (self.fov - step).clamp(fov_min, fov_max),
            ..self
        }
    }
}

/// Camera rig following a character
pub struct CameraRig {
    /// Configuration
    pub config: CameraConfig,
    orientation: CameraOrientation,
    /// Point the camera orbits, above the character's feet
    pivot: Vec3,
}

impl CameraRig {
    /// Create a rig with the default orientation
    pub fn new(config: CameraConfig) -> Self {
        let orientation = Self::default_orientation(&config);
        Self {
            config,
            orientation,
            pivot: Vec3::ZERO,
        }
    }

    fn default_orientation(config: &CameraConfig) -> CameraOrientation {
        let (pitch_min, pitch_max) = config.pitch_bounds();
        CameraOrientation {
            yaw: 0.0,
            pitch: 0.0_f32.clamp(pitch_min, pitch_max),
            fov: config.default_fov.clamp(config.fov_min, config.fov_max),
        }
    }

    /// Current orientation
    pub fn orientation(&self) -> CameraOrientation {
        self.orientation
    }

    /// Current yaw in radians
    pub fn yaw(&self) -> f32 {
        self.orientation.yaw
    }

    /// Current pitch in radians
    pub fn pitch(&self) -> f32 {
        self.orientation.pitch
    }

    /// Current field of view in degrees
    pub fn fov(&self) -> f32 {
        self.orientation.fov
    }

    /// Current pivot position
    pub fn pivot(&self) -> Vec3 {
        self.pivot
    }

    /// Handle mouse look input
    pub fn apply_mouse_delta(&mut self, delta: Vec2) {
        self.orientation = self.orientation.with_mouse_delta(
            delta,
            self.config.sensitivity,
            self.config.pitch_bounds(),
        );
    }

    /// Zoom the field of view by `step` degrees
    pub fn zoom(&mut self, step: f32) {
        self.orientation = self
            .orientation
            .with_zoom(step, self.config.fov_min, self.config.fov_max);
    }

    /// Zoom by whole wheel notches (positive = scroll up = narrower view)
    pub fn zoom_notches(&mut self, notches: i32) {
        if notches != 0 {
            self.zoom(notches as f32 * self.config.zoom_step);
        }
    }

    /// Movement basis for the current yaw
    pub fn horizontal_basis(&self) -> HorizontalBasis {
        HorizontalBasis::from_yaw(self.orientation.yaw)
    }

    /// Move the pivot to sit above `character_position`.
    ///
    /// Only the position is tracked; the body's facing never reaches the rig.
    pub fn follow(&mut self, character_position: Vec3) {
        self.pivot = character_position + Vec3::Y * self.config.pivot_height;
    }

    /// Snapshot for a camera sink
    pub fn view(&self) -> CameraView {
        CameraView {
            yaw: self.orientation.yaw,
            pitch: self.orientation.pitch,
            position: self.pivot,
            fov: self.orientation.fov,
        }
    }

    /// Restore the default yaw, pitch and field of view
    pub fn reset(&mut self) {
        self.orientation = Self::default_orientation(&self.config);
    }
}

impl Default for CameraRig {
    fn default() -> Self {
        Self::new(CameraConfig::default())
    }
}
