//! Strider Core - Core types and utilities for the Strider locomotion layer
//!
//! This crate provides the foundational types used throughout the workspace:
//! - Mathematical primitives (re-exported from glam)
//! - Per-character state and entity identifiers
//! - Angle helpers for yaw smoothing and horizontal-plane math
//! - Fixed timestep clock
//! - Collaborator interfaces implemented by the host (physics, navigation, animation, camera)

pub mod interfaces;
pub mod math;
pub mod time;
pub mod types;

pub use glam::{Vec2, Vec3};
pub use interfaces::{
    AnimationSink, CameraSink, CameraView, CollisionResolver, NavigationProvider, ResolvedMotion,
    TargetLookup,
};
pub use time::{GameTime, TimeConfig};
pub use types::{CharacterState, EntityId};
