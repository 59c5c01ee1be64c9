//! Per-enemy controller: behavior, body state and animation output

use glam::Vec3;
use strider_core::{
    AnimationSink, CharacterState, CollisionResolver, EntityId, NavigationProvider, TargetLookup,
};

use crate::animation::ClipLatch;

use super::{EnemyBehavior, EnemyConfig, EnemyDecision};

/// Summary of one enemy tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnemyTick {
    pub decision: EnemyDecision,
    pub velocity: Vec3,
    pub position: Vec3,
}

/// Owns one enemy's state; shares nothing mutable with other characters
pub struct EnemyController {
    pub id: EntityId,
    pub behavior: EnemyBehavior,
    /// Cross-fade time for decision clips
    pub blend_time: f32,
    state: CharacterState,
    clips: ClipLatch,
}

impl EnemyController {
    /// Spawn an enemy at `position` hunting `target`, cross-fading clips over `blend_time`
    pub fn new(
        config: EnemyConfig,
        blend_time: f32,
        position: Vec3,
        target: Option<EntityId>,
    ) -> Self {
        Self {
            id: EntityId::new(),
            behavior: EnemyBehavior::new(config, target),
            blend_time,
            state: CharacterState::at(position),
            clips: ClipLatch::new(),
        }
    }

    pub fn state(&self) -> &CharacterState {
        &self.state
    }

    pub fn position(&self) -> Vec3 {
        self.state.position
    }

    /// Run one tick of decision, steering and collision
    pub fn tick(
        &mut self,
        targets: &impl TargetLookup,
        navigation: &mut impl NavigationProvider,
        collision: &mut impl CollisionResolver,
        animation: &mut impl AnimationSink,
        dt: f32,
    ) -> EnemyTick {
        let steering = self.behavior.evaluate(self.state.position, targets, navigation);

        if let Some(yaw) = steering.facing {
            self.state.yaw = yaw;
        }
        self.state.velocity = steering.velocity;

        let resolved = collision.resolve(self.state.position, self.state.velocity, dt);
        self.state.position = resolved.position;
        self.state.grounded = resolved.grounded;

        self.clips
            .request(animation, steering.decision.clip_name(), self.blend_time);

        EnemyTick {
            decision: steering.decision,
            velocity: steering.velocity,
            position: self.state.position,
        }
    }

    /// Put the enemy back at `position`, idle
    pub fn respawn(&mut self, position: Vec3) {
        self.state = CharacterState::at(position);
        self.behavior.reset();
        self.clips.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enemy::DirectPath;
    use std::collections::HashMap;
    use strider_core::ResolvedMotion;

    struct OpenGround;

    impl CollisionResolver for OpenGround {
        fn resolve(&mut self, position: Vec3, desired_velocity: Vec3, dt: f32) -> ResolvedMotion {
            ResolvedMotion {
                position: position + desired_velocity * dt,
                grounded: true,
            }
        }
    }

    #[derive(Default)]
    struct Clips(Vec<(String, f32)>);

    impl AnimationSink for Clips {
        fn play(&mut self, clip: &str, blend_time: f32) {
            self.0.push((clip.to_string(), blend_time));
        }
    }

    impl Clips {
        fn names(&self) -> Vec<&str> {
            self.0.iter().map(|(clip, _)| clip.as_str()).collect()
        }
    }

    #[test]
    fn test_enemy_closes_in_then_attacks() {
        let player = EntityId::new();
        let mut positions = HashMap::new();
        positions.insert(player, Vec3::new(0.0, 0.0, 10.0));

        let mut enemy = EnemyController::new(EnemyConfig::default(), 0.2, Vec3::ZERO, Some(player));
        let mut clips = Clips::default();

        let first = enemy.tick(&positions, &mut DirectPath, &mut OpenGround, &mut clips, 0.1);
        assert_eq!(first.decision, EnemyDecision::Chase);
        assert!((first.position.z - 0.35).abs() < 1e-5);

        let mut last = first;
        for _ in 0..100 {
            last = enemy.tick(&positions, &mut DirectPath, &mut OpenGround, &mut clips, 0.1);
        }
        assert_eq!(last.decision, EnemyDecision::Attack);
        assert!(enemy.position().distance(Vec3::new(0.0, 0.0, 10.0)) < 1.2);
        assert_eq!(clips.names(), vec!["Run", "Attack"]);
    }

    #[test]
    fn test_enemy_without_target_stays_put() {
        let positions: HashMap<EntityId, Vec3> = HashMap::new();
        let mut enemy = EnemyController::new(EnemyConfig::default(), 0.2, Vec3::new(2.0, 0.0, 2.0), None);

        let tick = enemy.tick(&positions, &mut DirectPath, &mut OpenGround, &mut (), 0.1);
        assert_eq!(tick.decision, EnemyDecision::Idle);
        assert_eq!(enemy.position(), Vec3::new(2.0, 0.0, 2.0));
    }

    #[test]
    fn test_respawn_resets_behavior_and_replays_clip() {
        let player = EntityId::new();
        let mut positions = HashMap::new();
        positions.insert(player, Vec3::new(0.0, 0.0, 10.0));

        let spawn = Vec3::new(0.0, 0.0, -2.0);
        let mut enemy = EnemyController::new(EnemyConfig::default(), 0.35, spawn, Some(player));
        let mut clips = Clips::default();

        for _ in 0..5 {
            enemy.tick(&positions, &mut DirectPath, &mut OpenGround, &mut clips, 0.1);
        }
        assert_eq!(enemy.behavior.decision(), EnemyDecision::Chase);
        assert!(enemy.behavior.last_waypoint().is_some());
        assert_ne!(enemy.position(), spawn);
        assert_eq!(clips.0, vec![("Run".to_string(), 0.35)]);

        enemy.respawn(spawn);
        assert_eq!(enemy.position(), spawn);
        assert_eq!(enemy.state().velocity, Vec3::ZERO);
        assert_eq!(enemy.behavior.decision(), EnemyDecision::Idle);
        assert_eq!(enemy.behavior.last_waypoint(), None);

        enemy.tick(&positions, &mut DirectPath, &mut OpenGround, &mut clips, 0.1);
        assert_eq!(clips.names(), vec!["Run", "Run"]);
    }
}
