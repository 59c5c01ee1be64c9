//! Player locomotion module
//!
//! Camera-relative movement, the jump/gravity state machine, and the
//! controller that runs them in order each tick.

mod controller;
pub mod movement;
pub mod vertical;

pub use controller::{CaptureMode, PlayerController, TickReport};
pub use movement::MovementConfig;
pub use vertical::{JumpConfig, VerticalInput, VerticalMotionState, VerticalStep};
