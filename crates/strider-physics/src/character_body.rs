//! Kinematic character body using rapier3d's kinematic character controller

use glam::Vec3;
use rapier3d::control::{CharacterAutostep, CharacterLength, KinematicCharacterController};
use rapier3d::prelude::*;
use strider_core::{CollisionResolver, ResolvedMotion};
use tracing::trace;

use crate::PhysicsWorld;

/// Capsule shape and sweep tolerances
#[derive(Debug, Clone)]
pub struct CharacterBodyConfig {
    /// Feet to head, meters
    pub height: f32,
    pub radius: f32,
    /// Steepest walkable slope, degrees
    pub max_slope_angle: f32,
    /// Ledges up to this height are stepped onto
    pub step_height: f32,
    /// Gap kept between the capsule and whatever it touches
    pub skin_width: f32,
    /// Maximum ground snap distance, `None` disables snapping
    pub ground_snap_distance: Option<f32>,
}

impl Default for CharacterBodyConfig {
    fn default() -> Self {
        Self {
            height: 1.8,
            radius: 0.4,
            max_slope_angle: 45.0,
            step_height: 0.25,
            skin_width: 0.02,
            ground_snap_distance: Some(0.2),
        }
    }
}

/// Capsule collider that can be swept through a [`PhysicsWorld`]
pub struct CharacterBody {
    /// Configuration
    pub config: CharacterBodyConfig,
    /// The collider handle for this character, set by [`CharacterBody::spawn`]
    pub collider_handle: Option<ColliderHandle>,
    controller: KinematicCharacterController,
}

impl CharacterBody {
    pub fn new() -> Self {
        Self::with_config(CharacterBodyConfig::default())
    }

    pub fn with_config(config: CharacterBodyConfig) -> Self {
        let mut controller = KinematicCharacterController::default();
        controller.max_slope_climb_angle = config.max_slope_angle.to_radians();
        controller.min_slope_slide_angle = config.max_slope_angle.to_radians();
        controller.autostep = Some(CharacterAutostep {
            max_height: CharacterLength::Absolute(config.step_height),
            min_width: CharacterLength::Relative(0.5),
            include_dynamic_bodies: true,
        });
        controller.snap_to_ground = config.ground_snap_distance.map(CharacterLength::Absolute);
        controller.offset = CharacterLength::Absolute(config.skin_width);

        Self {
            config,
            collider_handle: None,
            controller,
        }
    }

    /// Insert the capsule collider into the world with its feet at `position`
    pub fn spawn(&mut self, physics: &mut PhysicsWorld, position: Vec3) -> ColliderHandle {
        let half_height = (self.config.height - 2.0 * self.config.radius) / 2.0;
        let center = self.center_of(position);
        let collider = ColliderBuilder::capsule_y(half_height.max(0.01), self.config.radius)
            .translation(vector![center.x, center.y, center.z])
            .friction(0.0)
            .restitution(0.0)
            .build();

        let handle = physics.add_static_collider(collider);
        self.collider_handle = Some(handle);
        handle
    }

    /// Remove the capsule from the world
    pub fn despawn(&mut self, physics: &mut PhysicsWorld) {
        if let Some(handle) = self.collider_handle.take() {
            physics.remove_collider(handle);
        }
    }

    /// Borrow this body together with the world it lives in, as a [`CollisionResolver`]
    pub fn bind<'a>(&'a mut self, physics: &'a mut PhysicsWorld) -> BoundBody<'a> {
        BoundBody {
            body: self,
            physics,
        }
    }

    fn center_of(&self, feet: Vec3) -> Vec3 {
        feet + Vec3::Y * (self.config.height / 2.0)
    }

    /// Sweep the capsule from `position` by `velocity * dt`
    fn move_character(
        &mut self,
        physics: &mut PhysicsWorld,
        position: Vec3,
        velocity: Vec3,
        dt: f32,
    ) -> ResolvedMotion {
        let unresolved = ResolvedMotion {
            position: position + velocity * dt,
            grounded: false,
        };

        let Some(collider_handle) = self.collider_handle else {
            return unresolved;
        };

        let Some(collider) = physics.collider_set.get(collider_handle) else {
            return unresolved;
        };

        let center = self.center_of(position);
        let current_pos = Isometry::translation(center.x, center.y, center.z);
        let desired = velocity * dt;

        let movement = self.controller.move_shape(
            dt,
            &physics.rigid_body_set,
            &physics.collider_set,
            &physics.query_pipeline,
            collider.shape(),
            &current_pos,
            vector![desired.x, desired.y, desired.z],
            QueryFilter::default().exclude_collider(collider_handle),
            |_| {},
        );

        let corrected = Vec3::new(
            movement.translation.x,
            movement.translation.y,
            movement.translation.z,
        );
        let new_position = position + corrected;
        trace!(?desired, ?corrected, grounded = movement.grounded, "character swept");

        let new_center = self.center_of(new_position);
        if let Some(collider) = physics.collider_set.get_mut(collider_handle) {
            collider.set_translation(vector![new_center.x, new_center.y, new_center.z]);
        }

        ResolvedMotion {
            position: new_position,
            grounded: movement.grounded,
        }
    }
}

impl Default for CharacterBody {
    fn default() -> Self {
        Self::new()
    }
}

/// A [`CharacterBody`] paired with its world for one tick
pub struct BoundBody<'a> {
    body: &'a mut CharacterBody,
    physics: &'a mut PhysicsWorld,
}

impl CollisionResolver for BoundBody<'_> {
    fn resolve(&mut self, position: Vec3, desired_velocity: Vec3, dt: f32) -> ResolvedMotion {
        self.body
            .move_character(self.physics, position, desired_velocity, dt)
    }
}
