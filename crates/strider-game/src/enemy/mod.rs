//! Enemy behavior module
//!
//! Distance-threshold chase/attack AI for non-player characters.

mod behavior;
mod controller;
pub mod navigation;

pub use behavior::{EnemyBehavior, EnemyConfig, EnemyDecision, Steering};
pub use controller::{EnemyController, EnemyTick};
pub use navigation::{DirectPath, WaypointPath};
