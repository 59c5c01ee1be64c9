//! Chase/attack decision and steering

use glam::Vec3;
use serde::{Deserialize, Serialize};
use strider_core::math::{horizontal_direction, yaw_from_direction};
use strider_core::{EntityId, NavigationProvider, TargetLookup};
use tracing::debug;

/// Squared horizontal distance below which two points count as coincident
const DIRECTION_EPSILON: f32 = 1e-4;

/// Enemy tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyConfig {
    /// Chase speed in meters per second
    pub speed: f32,
    /// Distance under which the enemy starts chasing
    pub chase_range: f32,
    /// Distance under which the enemy attacks instead of chasing
    pub attack_range: f32,
}

impl Default for EnemyConfig {
    fn default() -> Self {
        Self {
            speed: 3.5,
            chase_range: 20.0,
            attack_range: 1.2,
        }
    }
}

/// What an enemy is doing this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum EnemyDecision {
    #[default]
    Idle,
    Chase,
    Attack,
}

impl EnemyDecision {
    /// Decision for a target `distance` away. Attack wins over chase.
    pub fn decide(distance: f32, config: &EnemyConfig) -> Self {
        if distance < config.attack_range {
            EnemyDecision::Attack
        } else if distance < config.chase_range {
            EnemyDecision::Chase
        } else {
            EnemyDecision::Idle
        }
    }

    /// Clip name for the animation sink
    pub fn clip_name(&self) -> &'static str {
        match self {
            EnemyDecision::Idle => "Idle",
            EnemyDecision::Chase => "Run",
            EnemyDecision::Attack => "Attack",
        }
    }
}

/// Output of one behavior evaluation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Steering {
    pub decision: EnemyDecision,
    /// Desired horizontal velocity
    pub velocity: Vec3,
    /// Yaw that faces the target, `None` to keep the current facing
    pub facing: Option<f32>,
}

impl Steering {
    fn idle() -> Self {
        Self {
            decision: EnemyDecision::Idle,
            velocity: Vec3::ZERO,
            facing: None,
        }
    }
}

/// Per-enemy behavior state
#[derive(Debug, Clone)]
pub struct EnemyBehavior {
    /// Tuning
    pub config: EnemyConfig,
    /// Looked up every tick, never owned
    target: Option<EntityId>,
    decision: EnemyDecision,
    last_waypoint: Option<Vec3>,
}

impl EnemyBehavior {
    /// Create a behavior chasing `target`
    pub fn new(config: EnemyConfig, target: Option<EntityId>) -> Self {
        Self {
            config,
            target,
            decision: EnemyDecision::Idle,
            last_waypoint: None,
        }
    }

    pub fn target(&self) -> Option<EntityId> {
        self.target
    }

    pub fn set_target(&mut self, target: Option<EntityId>) {
        self.target = target;
    }

    /// Decision from the most recent evaluation
    pub fn decision(&self) -> EnemyDecision {
        self.decision
    }

    /// Waypoint requested during the most recent chase
    pub fn last_waypoint(&self) -> Option<Vec3> {
        self.last_waypoint
    }

    /// Forget the current decision and path
    pub fn reset(&mut self) {
        self.decision = EnemyDecision::Idle;
        self.last_waypoint = None;
    }

    /// Decide and steer for an enemy standing at `position`.
    ///
    /// A missing or despawned target is not an error: the enemy idles in place.
    pub fn evaluate(
        &mut self,
        position: Vec3,
        targets: &impl TargetLookup,
        navigation: &mut impl NavigationProvider,
    ) -> Steering {
        let Some(target_position) = self.target.and_then(|id| targets.position_of(id)) else {
            self.set_decision(EnemyDecision::Idle);
            return Steering::idle();
        };

        let distance = position.distance(target_position);
        let decision = EnemyDecision::decide(distance, &self.config);
        self.set_decision(decision);

        let facing = horizontal_direction(position, target_position, DIRECTION_EPSILON)
            .map(yaw_from_direction);

        let velocity = match decision {
            EnemyDecision::Chase => {
                let waypoint = navigation.next_waypoint(position, target_position);
                self.last_waypoint = Some(waypoint);
                horizontal_direction(position, waypoint, DIRECTION_EPSILON)
                    .map_or(Vec3::ZERO, |direction| direction * self.config.speed)
            }
            EnemyDecision::Idle | EnemyDecision::Attack => Vec3::ZERO,
        };

        Steering {
            decision,
            velocity,
            facing,
        }
    }

    fn set_decision(&mut self, decision: EnemyDecision) {
        if decision != self.decision {
            debug!(from = ?self.decision, to = ?decision, "enemy decision changed");
            self.decision = decision;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enemy::DirectPath;
    use std::collections::HashMap;

    fn world_with(target: Vec3) -> (EntityId, HashMap<EntityId, Vec3>) {
        let id = EntityId::new();
        let mut positions = HashMap::new();
        positions.insert(id, target);
        (id, positions)
    }

    #[test]
    fn test_decision_priority() {
        let config = EnemyConfig {
            attack_range: 1.2,
            chase_range: 20.0,
            ..Default::default()
        };
        assert_eq!(EnemyDecision::decide(0.5, &config), EnemyDecision::Attack);
        assert_eq!(EnemyDecision::decide(5.0, &config), EnemyDecision::Chase);
        assert_eq!(EnemyDecision::decide(25.0, &config), EnemyDecision::Idle);
    }

    #[test]
    fn test_chase_moves_horizontally_toward_waypoint() {
        let (id, positions) = world_with(Vec3::new(0.0, 3.0, 10.0));
        let mut behavior = EnemyBehavior::new(EnemyConfig::default(), Some(id));

        let steering = behavior.evaluate(Vec3::ZERO, &positions, &mut DirectPath);
        assert_eq!(steering.decision, EnemyDecision::Chase);
        assert!((steering.velocity - Vec3::new(0.0, 0.0, 3.5)).length() < 1e-5);
        assert_eq!(behavior.last_waypoint(), Some(Vec3::new(0.0, 3.0, 10.0)));
        assert!(steering.facing.unwrap().abs() < 1e-6);
    }

    #[test]
    fn test_reset_forgets_decision_and_path() {
        let (id, positions) = world_with(Vec3::new(0.0, 0.0, 10.0));
        let mut behavior = EnemyBehavior::new(EnemyConfig::default(), Some(id));
        behavior.evaluate(Vec3::ZERO, &positions, &mut DirectPath);
        assert_eq!(behavior.decision(), EnemyDecision::Chase);

        behavior.reset();
        assert_eq!(behavior.decision(), EnemyDecision::Idle);
        assert_eq!(behavior.last_waypoint(), None);
        assert_eq!(behavior.target(), Some(id));
    }

    #[test]
    fn test_attack_stands_still_and_faces_target() {
        let (id, positions) = world_with(Vec3::new(1.0, 0.0, 0.0));
        let mut behavior = EnemyBehavior::new(EnemyConfig::default(), Some(id));

        let steering = behavior.evaluate(Vec3::ZERO, &positions, &mut DirectPath);
        assert_eq!(steering.decision, EnemyDecision::Attack);
        assert_eq!(steering.velocity, Vec3::ZERO);
        assert!((steering.facing.unwrap() - std::f32::consts::FRAC_PI_2).abs() < 1e-5);
    }

    #[test]
    fn test_idle_faces_target_out_of_range() {
        let (id, positions) = world_with(Vec3::new(0.0, 0.0, -40.0));
        let mut behavior = EnemyBehavior::new(EnemyConfig::default(), Some(id));

        let steering = behavior.evaluate(Vec3::ZERO, &positions, &mut DirectPath);
        assert_eq!(steering.decision, EnemyDecision::Idle);
        assert_eq!(steering.velocity, Vec3::ZERO);
        assert!(steering.facing.is_some());
    }

    #[test]
    fn test_missing_target_idles() {
        let (_, positions) = world_with(Vec3::new(0.0, 0.0, 5.0));
        let mut behavior = EnemyBehavior::new(EnemyConfig::default(), Some(EntityId::new()));

        let steering = behavior.evaluate(Vec3::ZERO, &positions, &mut DirectPath);
        assert_eq!(steering, Steering::idle());

        behavior.set_target(None);
        let steering = behavior.evaluate(Vec3::ZERO, &positions, &mut DirectPath);
        assert_eq!(steering.decision, EnemyDecision::Idle);
    }

    #[test]
    fn test_target_directly_overhead_does_not_produce_nan() {
        let (id, positions) = world_with(Vec3::new(0.0, 5.0, 0.0));
        let mut behavior = EnemyBehavior::new(EnemyConfig::default(), Some(id));

        let steering = behavior.evaluate(Vec3::ZERO, &positions, &mut DirectPath);
        assert_eq!(steering.decision, EnemyDecision::Chase);
        assert_eq!(steering.velocity, Vec3::ZERO);
        assert!(steering.facing.is_none());
    }
}
