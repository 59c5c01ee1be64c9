//! Strider Game - Character locomotion and enemy behavior
//!
//! Provides the camera rig, camera-relative movement, the jump/gravity state
//! machine, locomotion animation selection, enemy chase/attack behavior, and
//! the input adapter that feeds them.

pub mod animation;
pub mod camera;
pub mod config;
pub mod enemy;
pub mod input;
pub mod player;

pub use animation::{AnimationConfig, ClipLatch, LocomotionAnim};
pub use camera::{CameraConfig, CameraOrientation, CameraRig, HorizontalBasis};
pub use config::{ConfigError, GameplayConfig};
pub use enemy::{
    DirectPath, EnemyBehavior, EnemyConfig, EnemyController, EnemyDecision, EnemyTick, WaypointPath,
};
pub use input::{InputAction, InputBindings, InputHandler, InputSnapshot};
pub use player::{
    CaptureMode, JumpConfig, MovementConfig, PlayerController, TickReport, VerticalMotionState,
};
