// Snot ball projectiles

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::engine::physics::RigidBodyHandle;

/// Projectile tuning
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectileSettings {
    /// Seconds of continuous firing between two shots
    pub shoot_delay: f32,
    /// Launch force when facing right; x is mirrored when facing left
    pub launch_force: Vec2,
    pub radius: f32,
    pub mass: f32,
    /// Floor contacts a ball survives
    pub bounces: i32,
}

impl ProjectileSettings {
    /// Ball radius for a shooter of the given scale
    pub fn scaled_radius(&self, scale: f32) -> f32 {
        self.radius * scale.abs()
    }
}

impl Default for ProjectileSettings {
    fn default() -> Self {
        Self {
            shoot_delay: 0.5,
            launch_force: Vec2::new(1000.0, -600.0),
            radius: 0.25,
            mass: 1.0,
            bounces: 2,
        }
    }
}

/// A projectile waiting to be added to the world
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectileSpawn {
    pub position: Vec2,
    /// Force applied once at launch
    pub force: Vec2,
    /// Copied from the shooter
    pub scale: f32,
}

/// Rate-limited projectile source.
///
/// The timer only advances while `fire` is being called, so holding the
/// button shoots every `shoot_delay` seconds and the first shot of a fresh
/// launcher waits one full delay.
#[derive(Debug, Clone)]
pub struct ProjectileLauncher {
    shoot_delay: f32,
    launch_force: Vec2,
    time_elapsed: f32,
}

impl ProjectileLauncher {
    pub fn new(settings: &ProjectileSettings) -> Self {
        Self {
            shoot_delay: settings.shoot_delay,
            launch_force: settings.launch_force,
            time_elapsed: 0.0,
        }
    }

    pub fn fire(
        &mut self,
        facing_right: bool,
        position: Vec2,
        scale: f32,
        dt: f32,
    ) -> Option<ProjectileSpawn> {
        let mut spawn = None;

        if self.time_elapsed > self.shoot_delay {
            let direction = if facing_right { 1.0 } else { -1.0 };
            spawn = Some(ProjectileSpawn {
                position,
                force: Vec2::new(self.launch_force.x * direction, self.launch_force.y),
                scale,
            });
            self.time_elapsed = 0.0;
        }

        self.time_elapsed += dt;
        spawn
    }
}

impl Default for ProjectileLauncher {
    fn default() -> Self {
        Self::new(&ProjectileSettings::default())
    }
}

/// A live snot ball
#[derive(Debug, Clone)]
pub struct SnotBall {
    pub id: u64,
    pub body_handle: RigidBodyHandle,
    bounces: i32,
}

impl SnotBall {
    pub fn new(id: u64, body_handle: RigidBodyHandle, bounces: i32) -> Self {
        Self {
            id,
            body_handle,
            bounces,
        }
    }

    /// Register a solid contact. Only contacts with something below the ball
    /// count as a bounce. Returns true once the ball is used up.
    pub fn on_contact(&mut self, own_y: f32, other_y: f32) -> bool {
        if other_y < own_y {
            self.bounces -= 1;
        }
        self.bounces <= 0
    }

    pub fn bounces(&self) -> i32 {
        self.bounces
    }
}
