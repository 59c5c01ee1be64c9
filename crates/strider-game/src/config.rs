//! Gameplay configuration loaded from TOML

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::animation::AnimationConfig;
use crate::camera::CameraConfig;
use crate::enemy::EnemyConfig;
use crate::player::{JumpConfig, MovementConfig};

/// Errors from loading or validating gameplay configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid value for `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// All locomotion and behavior tuning
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GameplayConfig {
    pub camera: CameraConfig,
    pub movement: MovementConfig,
    pub jump: JumpConfig,
    pub animation: AnimationConfig,
    pub enemy: EnemyConfig,
}

fn invalid(field: &'static str, reason: impl Into<String>) -> ConfigError {
    ConfigError::Invalid {
        field,
        reason: reason.into(),
    }
}

impl GameplayConfig {
    /// Parse and validate from TOML text. Missing sections and fields take their defaults.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Serialize to TOML text
    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Every float field with its dotted name
    fn float_fields(&self) -> [(&'static str, f32); 19] {
        let (camera, movement, jump) = (&self.camera, &self.movement, &self.jump);
        [
            ("camera.sensitivity", camera.sensitivity),
            ("camera.pitch_min", camera.pitch_min),
            ("camera.pitch_max", camera.pitch_max),
            ("camera.pivot_height", camera.pivot_height),
            ("camera.fov_min", camera.fov_min),
            ("camera.fov_max", camera.fov_max),
            ("camera.default_fov", camera.default_fov),
            ("camera.zoom_step", camera.zoom_step),
            ("movement.walk_speed", movement.walk_speed),
            ("movement.rotation_smoothness", movement.rotation_smoothness),
            ("movement.input_epsilon", movement.input_epsilon),
            ("jump.jump_velocity", jump.jump_velocity),
            ("jump.gravity", jump.gravity),
            ("jump.ground_stick_velocity", jump.ground_stick_velocity),
            ("animation.run_threshold", self.animation.run_threshold),
            ("animation.blend_time", self.animation.blend_time),
            ("enemy.speed", self.enemy.speed),
            ("enemy.chase_range", self.enemy.chase_range),
            ("enemy.attack_range", self.enemy.attack_range),
        ]
    }

    /// Check ranges and orderings that the controllers rely on
    pub fn validate(&self) -> Result<(), ConfigError> {
        // Ordered comparisons below are all false for NaN
        for (field, value) in self.float_fields() {
            if !value.is_finite() {
                return Err(invalid(field, format!("{value} is not a finite number")));
            }
        }

        let camera = &self.camera;
        if camera.pitch_min > camera.pitch_max {
            return Err(invalid(
                "camera.pitch_min",
                format!("{} is above pitch_max {}", camera.pitch_min, camera.pitch_max),
            ));
        }
        if camera.fov_min > camera.fov_max {
            return Err(invalid(
                "camera.fov_min",
                format!("{} is above fov_max {}", camera.fov_min, camera.fov_max),
            ));
        }
        if !(camera.fov_min..=camera.fov_max).contains(&camera.default_fov) {
            return Err(invalid(
                "camera.default_fov",
                format!("{} is outside [{}, {}]", camera.default_fov, camera.fov_min, camera.fov_max),
            ));
        }
        if camera.sensitivity < 0.0 {
            return Err(invalid("camera.sensitivity", "must not be negative"));
        }

        if self.movement.walk_speed <= 0.0 {
            return Err(invalid("movement.walk_speed", "must be positive"));
        }
        if self.movement.input_epsilon <= 0.0 {
            return Err(invalid("movement.input_epsilon", "must be positive"));
        }

        if self.jump.gravity <= 0.0 {
            return Err(invalid("jump.gravity", "must be positive"));
        }
        if self.jump.jump_velocity <= 0.0 {
            return Err(invalid("jump.jump_velocity", "must be positive"));
        }
        if self.jump.ground_stick_velocity > 0.0 {
            return Err(invalid("jump.ground_stick_velocity", "must not be positive"));
        }

        if self.enemy.speed <= 0.0 {
            return Err(invalid("enemy.speed", "must be positive"));
        }
        if self.enemy.attack_range > self.enemy.chase_range {
            return Err(invalid(
                "enemy.attack_range",
                format!(
                    "{} is beyond chase_range {}",
                    self.enemy.attack_range, self.enemy.chase_range
                ),
            ));
        }

        Ok(())
    }
}
