// Enemy explosions and the debris they leave behind

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::engine::physics::RigidBodyHandle;

/// Explosion tuning
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExplosionSettings {
    /// Pieces per explosion; 0 disables debris
    pub total_debris: u32,
    /// Seconds a piece stays in the world
    pub debris_lifetime: f32,
    pub debris_half_size: f32,
    pub debris_mass: f32,
}

impl Default for ExplosionSettings {
    fn default() -> Self {
        Self {
            total_debris: 10,
            debris_lifetime: 3.0,
            debris_half_size: 0.15,
            debris_mass: 1.0,
        }
    }
}

/// Horizontal force range, max exclusive
pub const DEBRIS_FORCE_X: std::ops::Range<i32> = -1000..1000;
/// Vertical force range, max exclusive
pub const DEBRIS_FORCE_Y: std::ops::Range<i32> = 500..2000;

/// One force per debris piece
pub fn debris_forces<R: Rng + ?Sized>(settings: &ExplosionSettings, rng: &mut R) -> Vec<Vec2> {
    (0..settings.total_debris)
        .map(|_| {
            Vec2::new(
                rng.gen_range(DEBRIS_FORCE_X) as f32,
                rng.gen_range(DEBRIS_FORCE_Y) as f32,
            )
        })
        .collect()
}

/// A debris piece ageing towards removal
#[derive(Debug, Clone)]
pub struct Debris {
    pub body_handle: RigidBodyHandle,
    age: f32,
    lifetime: f32,
}

impl Debris {
    pub fn new(body_handle: RigidBodyHandle, lifetime: f32) -> Self {
        Self {
            body_handle,
            age: 0.0,
            lifetime,
        }
    }

    /// Age the piece; true once it should be removed
    pub fn age(&mut self, dt: f32) -> bool {
        self.age += dt;
        self.age >= self.lifetime
    }
}
