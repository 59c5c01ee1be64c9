//! Strider Physics - Collision resolution using rapier3d
//!
//! Holds the static arena geometry and kinematic character bodies. Only the
//! move-with-collision query is used: gravity and jumping live in the
//! locomotion core, not here.

mod character_body;

pub use character_body::{BoundBody, CharacterBody, CharacterBodyConfig};

use glam::Vec3;
use nalgebra::Unit;
use rapier3d::prelude::*;

/// Static collision geometry plus the query structures character bodies sweep against
pub struct PhysicsWorld {
    /// Always empty; rapier's queries still want one
    pub rigid_body_set: RigidBodySet,
    /// Arena geometry and character capsules
    pub collider_set: ColliderSet,
    island_manager: IslandManager,
    query_pipeline: QueryPipeline,
}

impl PhysicsWorld {
    pub fn new() -> Self {
        Self {
            rigid_body_set: RigidBodySet::new(),
            collider_set: ColliderSet::new(),
            island_manager: IslandManager::new(),
            query_pipeline: QueryPipeline::new(),
        }
    }

    /// Refresh the query structure; call once per tick before sweeping bodies
    pub fn update_queries(&mut self) {
        self.query_pipeline.update(&self.collider_set);
    }

    /// Insert a collider that never moves on its own
    pub fn add_static_collider(&mut self, collider: Collider) -> ColliderHandle {
        self.collider_set.insert(collider)
    }

    pub fn remove_collider(&mut self, handle: ColliderHandle) {
        self.collider_set
            .remove(handle, &mut self.island_manager, &mut self.rigid_body_set, true);
    }

    pub fn get_collider(&self, handle: ColliderHandle) -> Option<&Collider> {
        self.collider_set.get(handle)
    }

    /// Infinite floor at height `y`
    pub fn create_ground(&mut self, y: f32) -> ColliderHandle {
        let up = Unit::new_normalize(vector![0.0, 1.0, 0.0]);
        let ground = ColliderBuilder::halfspace(up)
            .translation(vector![0.0, y, 0.0])
            .friction(0.7)
            .restitution(0.0)
            .build();
        self.add_static_collider(ground)
    }

    /// Axis-aligned block centered at `center`
    pub fn create_static_box(&mut self, half_extents: Vec3, center: Vec3) -> ColliderHandle {
        let block = ColliderBuilder::cuboid(half_extents.x, half_extents.y, half_extents.z)
            .translation(vector![center.x, center.y, center.z])
            .friction(0.7)
            .build();
        self.add_static_collider(block)
    }

    /// Height of the first surface below `from`, looking down at most `max_drop`.
    ///
    /// Uses the query structure as of the last [`PhysicsWorld::update_queries`].
    pub fn probe_ground(&self, from: Vec3, max_drop: f32) -> Option<f32> {
        let ray = Ray::new(point![from.x, from.y, from.z], vector![0.0, -1.0, 0.0]);
        self.query_pipeline
            .cast_ray(
                &self.rigid_body_set,
                &self.collider_set,
                &ray,
                max_drop,
                true,
                QueryFilter::default(),
            )
            .map(|(_, toi)| from.y - toi)
    }
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new()
    }
}
