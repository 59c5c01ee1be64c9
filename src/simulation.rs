//! Headless arena: one player, a handful of enemies, static collision geometry

use std::collections::HashMap;

use glam::Vec3;
use rand::Rng;
use strider_core::{AnimationSink, CameraSink, CameraView, EntityId};
use strider_game::{
    DirectPath, EnemyController, EnemyDecision, GameplayConfig, InputSnapshot, PlayerController,
    TickReport,
};
use strider_physics::{CharacterBody, PhysicsWorld};
use tracing::{debug, info, warn};

/// Characters falling below this height are respawned
pub const DEFAULT_KILL_HEIGHT: f32 = -20.0;

/// Spawn height above the ground so bodies settle onto it
const SPAWN_LIFT: f32 = 0.05;

/// Height spawn points are probed down from
const PROBE_HEIGHT: f32 = 20.0;

/// Logs every clip change for one character
pub struct LoggedAnimation {
    label: String,
}

impl LoggedAnimation {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
        }
    }
}

impl AnimationSink for LoggedAnimation {
    fn play(&mut self, clip: &str, blend_time: f32) {
        info!(character = %self.label, clip, blend_time, "play animation");
    }
}

/// Keeps the most recent camera placement
#[derive(Debug, Default)]
pub struct LastView(pub Option<CameraView>);

impl CameraSink for LastView {
    fn present(&mut self, view: CameraView) {
        self.0 = Some(view);
    }
}

struct Enemy {
    controller: EnemyController,
    body: CharacterBody,
    navigation: DirectPath,
    animation: LoggedAnimation,
    spawn: Vec3,
}

/// Composition root wiring controllers to physics, navigation and sinks
pub struct Simulation {
    physics: PhysicsWorld,
    player: PlayerController,
    player_body: CharacterBody,
    player_spawn: Vec3,
    player_animation: LoggedAnimation,
    camera: LastView,
    enemies: Vec<Enemy>,
    positions: HashMap<EntityId, Vec3>,
    config: GameplayConfig,
    /// Anything whose feet drop below this height is respawned
    pub kill_height: f32,
}

impl Simulation {
    /// Build the arena with `enemy_count` enemies scattered around the player
    pub fn new(config: &GameplayConfig, enemy_count: usize, rng: &mut impl Rng) -> Self {
        let mut physics = PhysicsWorld::new();
        physics.create_ground(0.0);
        physics.create_static_box(Vec3::new(2.0, 1.0, 0.5), Vec3::new(0.0, 1.0, -12.0));
        physics.create_static_box(Vec3::new(0.5, 0.5, 3.0), Vec3::new(6.0, 0.5, 0.0));
        physics.create_static_box(Vec3::new(1.0, 0.25, 1.0), Vec3::new(-4.0, 0.25, -4.0));
        physics.update_queries();

        let player_spawn = Vec3::Y * SPAWN_LIFT;
        let player = PlayerController::new(config, player_spawn);
        let mut player_body = CharacterBody::new();
        player_body.spawn(&mut physics, player_spawn);

        let mut positions = HashMap::new();
        positions.insert(player.id, player_spawn);

        let mut simulation = Self {
            physics,
            player,
            player_body,
            player_spawn,
            player_animation: LoggedAnimation::new("player"),
            camera: LastView::default(),
            enemies: Vec::with_capacity(enemy_count),
            positions,
            config: config.clone(),
            kill_height: DEFAULT_KILL_HEIGHT,
        };

        for _ in 0..enemy_count {
            let angle = rng.gen_range(0.0..std::f32::consts::TAU);
            let distance = rng.gen_range(8.0..18.0);
            let column = Vec3::new(angle.sin() * distance, PROBE_HEIGHT, angle.cos() * distance);
            let floor = simulation
                .physics
                .probe_ground(column, PROBE_HEIGHT * 2.0)
                .unwrap_or(0.0);
            simulation.spawn_enemy(Vec3::new(column.x, floor + SPAWN_LIFT, column.z));
        }

        simulation.physics.update_queries();
        info!(enemies = enemy_count, "arena ready");
        simulation
    }

    /// Add an enemy at `position` hunting the player
    pub fn spawn_enemy(&mut self, position: Vec3) -> EntityId {
        let controller = EnemyController::new(
            self.config.enemy.clone(),
            self.config.animation.blend_time,
            position,
            Some(self.player.id),
        );
        let id = controller.id;
        let mut body = CharacterBody::new();
        body.spawn(&mut self.physics, position);

        debug!(%id, ?position, "enemy spawned");
        self.positions.insert(id, position);
        self.enemies.push(Enemy {
            controller,
            body,
            navigation: DirectPath,
            animation: LoggedAnimation::new(format!("enemy-{}", self.enemies.len())),
            spawn: position,
        });
        id
    }

    pub fn player(&self) -> &PlayerController {
        &self.player
    }

    /// Most recent camera placement
    pub fn view(&self) -> Option<CameraView> {
        self.camera.0
    }

    /// Current decision of every enemy, in spawn order
    pub fn enemy_decisions(&self) -> Vec<EnemyDecision> {
        self.enemies
            .iter()
            .map(|e| e.controller.behavior.decision())
            .collect()
    }

    /// Current position of every enemy, in spawn order
    pub fn enemy_positions(&self) -> Vec<Vec3> {
        self.enemies.iter().map(|e| e.controller.position()).collect()
    }

    /// Advance the whole arena one fixed tick
    pub fn tick(&mut self, input: &InputSnapshot, dt: f32) -> TickReport {
        self.physics.update_queries();

        let report = {
            let mut body = self.player_body.bind(&mut self.physics);
            self.player.tick(
                input,
                dt,
                &mut body,
                &mut self.player_animation,
                &mut self.camera,
            )
        };
        if report.position.y < self.kill_height {
            warn!(position = ?report.position, "player fell out of the world");
            self.player.respawn(self.player_spawn);
        }
        self.positions.insert(self.player.id, self.player.position());

        for enemy in &mut self.enemies {
            let tick = {
                let mut body = enemy.body.bind(&mut self.physics);
                enemy.controller.tick(
                    &self.positions,
                    &mut enemy.navigation,
                    &mut body,
                    &mut enemy.animation,
                    dt,
                )
            };
            if tick.position.y < self.kill_height {
                warn!(id = %enemy.controller.id, "enemy fell out of the world");
                enemy.controller.respawn(enemy.spawn);
            }
            self.positions
                .insert(enemy.controller.id, enemy.controller.position());
        }

        report
    }
}
