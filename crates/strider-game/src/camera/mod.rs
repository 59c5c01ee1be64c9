//! Camera rig module
//!
//! Third-person orbit rig: mouse-driven yaw/pitch around a pivot that follows
//! the character, plus wheel zoom on the field of view.

mod config;
mod rig;

pub use config::CameraConfig;
pub use rig::{CameraOrientation, CameraRig, HorizontalBasis};
