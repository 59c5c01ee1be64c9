//! Locomotion animation selection

use serde::{Deserialize, Serialize};
use strider_core::AnimationSink;

/// Animation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    /// Horizontal speed above which a grounded character runs
    pub run_threshold: f32,
    /// Cross-fade time passed to the sink, in seconds
    pub blend_time: f32,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            run_threshold: 0.1,
            blend_time: 0.2,
        }
    }
}

/// Discrete locomotion animation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LocomotionAnim {
    Idle,
    Run,
    Jump,
    Fall,
}

impl LocomotionAnim {
    /// Clip name understood by the animation sink
    pub fn clip_name(&self) -> &'static str {
        match self {
            LocomotionAnim::Idle => "Idle",
            LocomotionAnim::Run => "Run",
            LocomotionAnim::Jump => "Jump",
            LocomotionAnim::Fall => "Fall",
        }
    }
}

/// Pick the locomotion animation for the current motion.
///
/// Airborne states win over ground states; rising is `Jump`, anything else in the air is `Fall`.
pub fn select(
    grounded: bool,
    vertical_velocity: f32,
    horizontal_speed: f32,
    run_threshold: f32,
) -> LocomotionAnim {
    if !grounded {
        if vertical_velocity > 0.0 {
            LocomotionAnim::Jump
        } else {
            LocomotionAnim::Fall
        }
    } else if horizontal_speed > run_threshold {
        LocomotionAnim::Run
    } else {
        LocomotionAnim::Idle
    }
}

/// Remembers the last clip sent to a sink so repeated requests are dropped
#[derive(Debug, Clone, Default)]
pub struct ClipLatch {
    current: Option<&'static str>,
}

impl ClipLatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clip most recently sent, if any
    pub fn current(&self) -> Option<&'static str> {
        self.current
    }

    /// Send `clip` to `sink` unless it is already playing. Returns true if the sink was called.
    pub fn request(&mut self, sink: &mut impl AnimationSink, clip: &'static str, blend_time: f32) -> bool {
        if self.current == Some(clip) {
            return false;
        }
        sink.play(clip, blend_time);
        self.current = Some(clip);
        true
    }

    /// Forget the last clip so the next request always reaches the sink
    pub fn clear(&mut self) {
        self.current = None;
    }
}
