// Game world: owns every entity and runs one simulation tick

use glam::Vec2;
use log::{debug, info};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::collections::HashMap;

use super::characters::{Character, CharacterSounds, LocomotionState};
use super::config::GameConfig;
use super::effects::CameraShake;
use super::enemies::EnemyWalker;
use super::explosion::{debris_forces, Debris};
use super::projectiles::SnotBall;
use super::score::Score;
use crate::engine::input::ControlFrame;
use crate::engine::physics::{presets, ColliderHandle, PhysicsWorld, Vector};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scene {
    Playing,
    /// Round over; waiting for a restart
    Menu,
}

/// What a collider belongs to, looked up through the physics entity map
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Player,
    Enemy,
    Ball,
    Platform,
}

/// Something that happened during a tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    ProjectileFired { position: Vec2 },
    Scored { total: u32 },
    EnemyExploded { position: Vec2, debris: usize },
    PlayerCaught,
}

pub struct GameWorld {
    config: GameConfig,
    physics: PhysicsWorld,
    rng: ChaCha8Rng,
    scene: Scene,

    player: Option<Character>,
    enemies: Vec<EnemyWalker>,
    balls: Vec<SnotBall>,
    debris: Vec<Debris>,

    kinds: HashMap<u64, EntityKind>,
    next_id: u64,

    score: Score,
    camera: CameraShake,
    camera_offset: Vec2,
}

impl GameWorld {
    pub fn new(config: GameConfig, seed: u64) -> Self {
        let mut world = Self {
            config,
            physics: PhysicsWorld::new(),
            rng: ChaCha8Rng::seed_from_u64(seed),
            scene: Scene::Playing,
            player: None,
            enemies: Vec::new(),
            balls: Vec::new(),
            debris: Vec::new(),
            kinds: HashMap::new(),
            next_id: 0,
            score: Score::default(),
            camera: CameraShake::new(),
            camera_offset: Vec2::ZERO,
        };
        world.populate();
        world
    }

    /// Rebuild the level and start a new round. The best score survives.
    pub fn restart(&mut self) {
        self.physics = PhysicsWorld::new();
        self.player = None;
        self.enemies.clear();
        self.balls.clear();
        self.debris.clear();
        self.kinds.clear();
        self.score.reset();
        self.camera = CameraShake::new();
        self.camera_offset = Vec2::ZERO;
        self.scene = Scene::Playing;
        self.populate();
    }

    fn populate(&mut self) {
        let level = self.config.level.clone();

        for platform in &level.platforms {
            let body = self.physics.add_rigid_body(presets::platform_body(
                platform.position.x,
                platform.position.y,
            ));
            let collider = self.physics.add_collider(
                presets::platform_collider(platform.width, platform.height),
                body,
            );
            self.register(collider, EntityKind::Platform);
        }

        let player = Character::new(
            self.config.controller,
            self.config.animations.clone(),
            CharacterSounds::from_config(&self.config.audio),
            &self.config.projectiles,
            &mut self.physics,
            level.player_spawn,
        );
        self.register(player.collider_handle, EntityKind::Player);
        self.player = Some(player);

        for spawn in &level.enemy_spawns {
            self.spawn_enemy(*spawn);
        }

        self.physics.refresh_queries();
        info!(
            "Level ready: {} platforms, {} enemies",
            level.platforms.len(),
            self.enemies.len()
        );
    }

    fn register(&mut self, collider: ColliderHandle, kind: EntityKind) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.kinds.insert(id, kind);
        self.physics.set_entity_mapping(collider, id);
        id
    }

    fn kind_of(&self, collider: ColliderHandle) -> Option<(u64, EntityKind)> {
        let id = self.physics.entity_for(collider)?;
        self.kinds.get(&id).map(|kind| (id, *kind))
    }

    pub fn spawn_enemy(&mut self, position: Vec2) {
        let settings = self.config.enemies;
        let body = self
            .physics
            .add_rigid_body(presets::enemy_body(position.x, position.y));
        let collider = self.physics.add_collider(
            presets::enemy_collider(settings.width, settings.height),
            body,
        );
        let id = self.register(collider, EntityKind::Enemy);
        self.enemies
            .push(EnemyWalker::new(id, body, settings.walking_speed));
    }

    /// Add a snot ball with a launch impulse, sized by the shooter's scale
    pub fn spawn_ball(&mut self, position: Vec2, impulse: Vec2, scale: f32) -> u64 {
        let settings = self.config.projectiles;
        let body = self
            .physics
            .add_rigid_body(presets::projectile_body(position.x, position.y));
        let collider = self.physics.add_collider(
            presets::projectile_collider(settings.scaled_radius(scale), settings.mass),
            body,
        );
        self.physics
            .launch(body, Vector::new(impulse.x, impulse.y), settings.mass);

        let id = self.register(collider, EntityKind::Ball);
        self.balls
            .push(SnotBall::new(id, body, settings.bounces));
        id
    }

    /// Advance the world by one fixed step
    pub fn tick(&mut self, controls: &ControlFrame, dt: f32) -> Vec<GameEvent> {
        let mut events = Vec::new();

        if self.scene == Scene::Playing {
            self.update_player(controls, dt, &mut events);
        }

        let target = self.player_position();
        self.update_enemies(target, dt);

        self.physics.step();
        self.route_collisions(&mut events);

        self.age_debris(dt);
        self.camera_offset = self.camera.update(dt, &mut self.rng);

        events
    }

    fn update_player(&mut self, controls: &ControlFrame, dt: f32, events: &mut Vec<GameEvent>) {
        let Some(player) = self.player.as_mut() else {
            return;
        };
        let tick = player.update(controls, &mut self.physics, &mut self.rng, dt);

        if let Some((amount, duration)) = tick.shake {
            self.camera.shake(amount, duration);
        }
        if let Some(spawn) = tick.projectile {
            // One-step force: impulse = force * dt
            self.spawn_ball(spawn.position, spawn.force * dt, spawn.scale);
            events.push(GameEvent::ProjectileFired {
                position: spawn.position,
            });
        }
    }

    fn update_enemies(&mut self, target: Option<Vec2>, dt: f32) {
        for enemy in &self.enemies {
            let Some(current) = self.physics.translation(enemy.body_handle) else {
                continue;
            };
            let next = enemy.step_towards(Vec2::new(current.x, current.y), target, dt);
            self.physics
                .set_next_translation(enemy.body_handle, Vector::new(next.x, next.y));
        }
    }

    fn route_collisions(&mut self, events: &mut Vec<GameEvent>) {
        for event in self.physics.drain_collision_events() {
            if !event.is_started() {
                continue;
            }
            let (collider1, collider2) = event.colliders();
            // Entities removed earlier in this pass no longer resolve
            let (Some((id1, kind1)), Some((id2, kind2))) =
                (self.kind_of(collider1), self.kind_of(collider2))
            else {
                continue;
            };

            match (kind1, kind2) {
                (EntityKind::Ball, EntityKind::Enemy) => self.ball_hits_enemy(id1, id2, events),
                (EntityKind::Enemy, EntityKind::Ball) => self.ball_hits_enemy(id2, id1, events),
                (EntityKind::Enemy, EntityKind::Player) | (EntityKind::Player, EntityKind::Enemy) => {
                    self.catch_player(events)
                }
                // Sensor overlaps are not bounces
                _ if event.is_sensor() => {}
                (EntityKind::Ball, EntityKind::Ball) => {
                    self.ball_contact(id1, collider2);
                    self.ball_contact(id2, collider1);
                }
                (EntityKind::Ball, _) => self.ball_contact(id1, collider2),
                (_, EntityKind::Ball) => self.ball_contact(id2, collider1),
                _ => {}
            }
        }
    }

    fn ball_hits_enemy(&mut self, ball_id: u64, enemy_id: u64, events: &mut Vec<GameEvent>) {
        let total = self.score.add_point();
        events.push(GameEvent::Scored { total });
        self.explode_enemy(enemy_id, events);
        self.remove_ball(ball_id);
    }

    fn ball_contact(&mut self, ball_id: u64, other: ColliderHandle) {
        let Some(other_y) = self.physics.collider_translation(other).map(|t| t.y) else {
            return;
        };
        let Some(ball) = self.balls.iter_mut().find(|b| b.id == ball_id) else {
            return;
        };
        let Some(own_y) = self.physics.translation(ball.body_handle).map(|t| t.y) else {
            return;
        };

        if ball.on_contact(own_y, other_y) {
            self.remove_ball(ball_id);
        } else {
            debug!("Ball {} bounced, {} left", ball_id, ball.bounces());
        }
    }

    fn remove_ball(&mut self, ball_id: u64) {
        let Some(index) = self.balls.iter().position(|b| b.id == ball_id) else {
            return;
        };
        let ball = self.balls.remove(index);
        self.physics.remove_rigid_body(ball.body_handle);
        self.kinds.remove(&ball_id);
    }

    fn explode_enemy(&mut self, enemy_id: u64, events: &mut Vec<GameEvent>) {
        let Some(index) = self.enemies.iter().position(|e| e.id == enemy_id) else {
            return;
        };
        let enemy = self.enemies.remove(index);
        let position = self
            .physics
            .translation(enemy.body_handle)
            .map(|t| Vec2::new(t.x, t.y))
            .unwrap_or_default();

        let settings = self.config.explosion;
        let dt = self.physics.timestep();
        let forces = debris_forces(&settings, &mut self.rng);
        for force in &forces {
            let body = self
                .physics
                .add_rigid_body(presets::debris_body(position.x, position.y));
            self.physics.add_collider(
                presets::debris_collider(settings.debris_half_size, settings.debris_mass),
                body,
            );
            let impulse = *force * dt;
            self.physics
                .launch(body, Vector::new(impulse.x, impulse.y), settings.debris_mass);
            self.debris.push(Debris::new(body, settings.debris_lifetime));
        }

        self.physics.remove_rigid_body(enemy.body_handle);
        self.kinds.remove(&enemy_id);
        debug!("Enemy {} exploded into {} pieces", enemy_id, forces.len());

        events.push(GameEvent::EnemyExploded {
            position,
            debris: forces.len(),
        });
    }

    fn catch_player(&mut self, events: &mut Vec<GameEvent>) {
        let Some(player) = self.player.take() else {
            return;
        };
        // Look the id up before the body (and its mapping) is gone
        if let Some((id, _)) = self.kind_of(player.collider_handle) {
            self.kinds.remove(&id);
        }
        player.despawn(&mut self.physics);
        self.scene = Scene::Menu;
        info!("Caught! Final score {}", self.score.points());
        events.push(GameEvent::PlayerCaught);
    }

    fn age_debris(&mut self, dt: f32) {
        let physics = &mut self.physics;
        self.debris.retain_mut(|piece| {
            if piece.age(dt) {
                physics.remove_rigid_body(piece.body_handle);
                false
            } else {
                true
            }
        });
    }

    pub fn scene(&self) -> Scene {
        self.scene
    }

    pub fn score(&self) -> &Score {
        &self.score
    }

    pub fn player(&self) -> Option<&Character> {
        self.player.as_ref()
    }

    pub fn player_position(&self) -> Option<Vec2> {
        self.player.as_ref()?.position(&self.physics)
    }

    pub fn player_state(&self) -> Option<LocomotionState> {
        self.player.as_ref().map(|p| p.state())
    }

    pub fn enemy_count(&self) -> usize {
        self.enemies.len()
    }

    pub fn ball_count(&self) -> usize {
        self.balls.len()
    }

    pub fn debris_count(&self) -> usize {
        self.debris.len()
    }

    pub fn camera_offset(&self) -> Vec2 {
        self.camera_offset
    }
}
