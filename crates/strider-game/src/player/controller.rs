//! Player controller: runs camera, movement, vertical motion, collision and
//! animation in a fixed order each tick

use glam::{Vec2, Vec3};
use strider_core::{AnimationSink, CameraSink, CharacterState, CollisionResolver, EntityId};
use tracing::{debug, trace};

use crate::animation::{self, AnimationConfig, ClipLatch, LocomotionAnim};
use crate::camera::CameraRig;
use crate::config::GameplayConfig;
use crate::input::InputSnapshot;

use super::movement::{compute_velocity, smooth_facing};
use super::vertical::{VerticalInput, VerticalMotionState};
use super::{JumpConfig, MovementConfig};

/// Whether mouse motion steers the camera
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CaptureMode {
    /// Cursor hidden and locked; mouse motion turns the camera
    #[default]
    Captured,
    /// Cursor released; mouse motion is ignored
    Visible,
}

/// What happened during one tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickReport {
    pub animation: LocomotionAnim,
    pub vertical: VerticalMotionState,
    pub grounded: bool,
    pub velocity: Vec3,
    pub position: Vec3,
}

/// Player controller handling input, camera and movement
pub struct PlayerController {
    pub id: EntityId,
    /// Movement configuration
    pub movement: MovementConfig,
    /// Jump and gravity configuration
    pub jump: JumpConfig,
    /// Animation configuration
    pub animation: AnimationConfig,
    /// Camera rig following this player
    pub camera: CameraRig,
    state: CharacterState,
    vertical: VerticalMotionState,
    capture: CaptureMode,
    clips: ClipLatch,
}

impl PlayerController {
    /// Create a player standing at `position`
    pub fn new(config: &GameplayConfig, position: Vec3) -> Self {
        let mut camera = CameraRig::new(config.camera.clone());
        camera.follow(position);

        Self {
            id: EntityId::new(),
            movement: config.movement.clone(),
            jump: config.jump.clone(),
            animation: config.animation.clone(),
            camera,
            state: CharacterState::at(position),
            vertical: VerticalMotionState::Grounded,
            capture: CaptureMode::Captured,
            clips: ClipLatch::new(),
        }
    }

    pub fn state(&self) -> &CharacterState {
        &self.state
    }

    pub fn position(&self) -> Vec3 {
        self.state.position
    }

    pub fn vertical_state(&self) -> VerticalMotionState {
        self.vertical
    }

    pub fn capture_mode(&self) -> CaptureMode {
        self.capture
    }

    /// Apply mouse motion as it arrives from an event callback.
    ///
    /// Hosts that poll should put the motion in [`InputSnapshot::mouse_delta`] instead.
    pub fn on_mouse_motion(&mut self, delta: Vec2) {
        if self.capture == CaptureMode::Captured {
            self.camera.apply_mouse_delta(delta);
        }
    }

    fn update_capture(&mut self, input: &InputSnapshot) {
        let next = if input.cancel_pressed {
            CaptureMode::Visible
        } else if input.mouse_clicked && self.capture == CaptureMode::Visible {
            CaptureMode::Captured
        } else {
            self.capture
        };

        if next != self.capture {
            debug!(from = ?self.capture, to = ?next, "mouse capture changed");
            self.capture = next;
        }
    }

    /// Advance one fixed tick
    pub fn tick(
        &mut self,
        input: &InputSnapshot,
        dt: f32,
        collision: &mut impl CollisionResolver,
        animation_sink: &mut impl AnimationSink,
        camera_sink: &mut impl CameraSink,
    ) -> TickReport {
        debug_assert!(dt.is_finite() && dt >= 0.0, "invalid dt: {dt}");

        // 1) Camera
        self.update_capture(input);
        self.on_mouse_motion(input.mouse_delta);
        self.camera.zoom_notches(input.wheel);

        // 2) Horizontal movement relative to the camera
        let horizontal = compute_velocity(
            input.move_axes,
            self.camera.horizontal_basis(),
            self.movement.walk_speed,
            self.movement.input_epsilon,
        );

        // 3) Jump and gravity
        let step = self.vertical.advance(
            self.state.velocity.y,
            VerticalInput {
                jump_pressed: input.jump_pressed,
                grounded: self.state.grounded,
            },
            &self.jump,
            dt,
        );
        self.log_vertical_transition(step.state);
        self.vertical = step.state;
        self.state.velocity = Vec3::new(horizontal.x, step.vertical_velocity, horizontal.z);

        // 4) Face the direction of travel
        self.state.yaw = smooth_facing(
            self.state.yaw,
            self.state.velocity,
            self.movement.rotation_smoothness,
            dt,
            self.movement.input_epsilon,
        );

        // 5) Collision
        let resolved = collision.resolve(self.state.position, self.state.velocity, dt);
        self.state.position = resolved.position;
        self.state.grounded = resolved.grounded;

        // 6) Animation
        let anim = animation::select(
            self.state.grounded,
            self.state.velocity.y,
            self.state.horizontal_speed(),
            self.animation.run_threshold,
        );
        self.clips
            .request(animation_sink, anim.clip_name(), self.animation.blend_time);

        // 7) Camera output
        self.camera.follow(self.state.position);
        camera_sink.present(self.camera.view());

        trace!(
            position = ?self.state.position,
            velocity = ?self.state.velocity,
            grounded = self.state.grounded,
            "player tick"
        );

        TickReport {
            animation: anim,
            vertical: self.vertical,
            grounded: self.state.grounded,
            velocity: self.state.velocity,
            position: self.state.position,
        }
    }

    fn log_vertical_transition(&self, next: VerticalMotionState) {
        match (self.vertical, next) {
            (VerticalMotionState::JumpOverride { .. }, VerticalMotionState::JumpOverride { .. }) => {}
            (_, VerticalMotionState::JumpOverride { override_value }) => {
                debug!(override_value, "jump started");
            }
            (VerticalMotionState::Grounded, VerticalMotionState::Grounded) => {}
            (_, VerticalMotionState::Grounded) => debug!("landed"),
            (VerticalMotionState::Grounded, VerticalMotionState::Falling) => debug!("left ground"),
            _ => {}
        }
    }

    /// Reset body, vertical motion and camera at `position`
    pub fn respawn(&mut self, position: Vec3) {
        self.state = CharacterState::at(position);
        self.vertical = VerticalMotionState::Grounded;
        self.camera.reset();
        self.camera.follow(position);
        self.clips.clear();
        debug!(?position, "player respawned");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strider_core::{CameraView, ResolvedMotion};

    /// Flat floor at y = 0
    struct Floor;

    impl CollisionResolver for Floor {
        fn resolve(&mut self, position: Vec3, desired_velocity: Vec3, dt: f32) -> ResolvedMotion {
            let mut next = position + desired_velocity * dt;
            let grounded = next.y <= 0.0;
            if grounded {
                next.y = 0.0;
            }
            ResolvedMotion {
                position: next,
                grounded,
            }
        }
    }

    #[derive(Default)]
    struct Clips(Vec<String>);

    impl AnimationSink for Clips {
        fn play(&mut self, clip: &str, _blend_time: f32) {
            self.0.push(clip.to_string());
        }
    }

    #[derive(Default)]
    struct LastView(Option<CameraView>);

    impl CameraSink for LastView {
        fn present(&mut self, view: CameraView) {
            self.0 = Some(view);
        }
    }

    fn player() -> PlayerController {
        PlayerController::new(&GameplayConfig::default(), Vec3::ZERO)
    }

    #[test]
    fn test_player_controller_creation() {
        let player = player();
        assert_eq!(player.position(), Vec3::ZERO);
        assert_eq!(player.vertical_state(), VerticalMotionState::Grounded);
        assert_eq!(player.capture_mode(), CaptureMode::Captured);
    }

    #[test]
    fn test_walk_forward_runs() {
        let mut player = player();
        let mut clips = Clips::default();
        let input = InputSnapshot {
            move_axes: Vec2::new(0.0, 1.0),
            ..Default::default()
        };

        let report = player.tick(&input, 0.1, &mut Floor, &mut clips, &mut ());
        assert_eq!(report.animation, LocomotionAnim::Run);
        assert!((report.position - Vec3::new(0.0, 0.0, -0.5)).length() < 1e-5);
        assert_eq!(clips.0, vec!["Run".to_string()]);

        let report = player.tick(&InputSnapshot::default(), 0.1, &mut Floor, &mut clips, &mut ());
        assert_eq!(report.animation, LocomotionAnim::Idle);
        assert_eq!(clips.0, vec!["Run".to_string(), "Idle".to_string()]);
    }

    #[test]
    fn test_jump_arc_returns_to_ground() {
        let mut player = player();
        let mut clips = Clips::default();
        let jump = InputSnapshot {
            jump_pressed: true,
            ..Default::default()
        };

        let report = player.tick(&jump, 0.1, &mut Floor, &mut clips, &mut ());
        assert_eq!(report.velocity.y, 5.0);
        assert_eq!(report.animation, LocomotionAnim::Jump);
        assert!(matches!(report.vertical, VerticalMotionState::JumpOverride { .. }));

        let mut landed = false;
        for _ in 0..100 {
            let report = player.tick(&InputSnapshot::default(), 0.1, &mut Floor, &mut clips, &mut ());
            if report.vertical == VerticalMotionState::Grounded {
                landed = true;
                break;
            }
        }
        assert!(landed);
        assert_eq!(player.vertical_state().override_value(), 0.0);
        assert!(clips.0.contains(&"Fall".to_string()));
    }

    #[test]
    fn test_mouse_ignored_while_released() {
        let mut player = player();
        let cancel = InputSnapshot {
            cancel_pressed: true,
            mouse_delta: Vec2::new(100.0, 0.0),
            ..Default::default()
        };
        player.tick(&cancel, 0.1, &mut Floor, &mut (), &mut ());
        assert_eq!(player.capture_mode(), CaptureMode::Visible);
        assert_eq!(player.camera.yaw(), 0.0);

        let click = InputSnapshot {
            mouse_clicked: true,
            ..Default::default()
        };
        player.tick(&click, 0.1, &mut Floor, &mut (), &mut ());
        assert_eq!(player.capture_mode(), CaptureMode::Captured);

        player.on_mouse_motion(Vec2::new(100.0, 0.0));
        assert!(player.camera.yaw() < 0.0);
    }

    #[test]
    fn test_camera_view_follows_player() {
        let mut player = player();
        let mut view = LastView::default();
        let input = InputSnapshot {
            move_axes: Vec2::new(1.0, 0.0),
            wheel: 1,
            ..Default::default()
        };
        player.tick(&input, 0.1, &mut Floor, &mut (), &mut view);

        let view = view.0.unwrap();
        assert!((view.position - (player.position() + Vec3::Y * 1.6)).length() < 1e-5);
        assert_eq!(view.fov, 70.0);
    }

    #[test]
    fn test_respawn_resets_everything() {
        let mut player = player();
        let input = InputSnapshot {
            move_axes: Vec2::new(1.0, 1.0),
            jump_pressed: true,
            mouse_delta: Vec2::new(40.0, 40.0),
            ..Default::default()
        };
        player.tick(&input, 0.1, &mut Floor, &mut (), &mut ());
        player.respawn(Vec3::new(0.0, 2.0, 0.0));

        assert_eq!(player.position(), Vec3::new(0.0, 2.0, 0.0));
        assert_eq!(player.vertical_state(), VerticalMotionState::Grounded);
        assert_eq!(player.state().velocity, Vec3::ZERO);
        assert_eq!(player.camera.yaw(), 0.0);
        assert_eq!(player.camera.pitch(), 0.0);
    }
}
