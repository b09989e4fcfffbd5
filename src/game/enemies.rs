// Enemy walkers

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::engine::physics::RigidBodyHandle;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemySettings {
    /// Units per second
    pub walking_speed: f32,
    pub width: f32,
    pub height: f32,
}

impl Default for EnemySettings {
    fn default() -> Self {
        Self {
            walking_speed: 2.0,
            width: 1.0,
            height: 1.0,
        }
    }
}

/// Walks straight at its target. The target is handed in every tick
/// by whoever owns the enemy.
#[derive(Debug, Clone)]
pub struct EnemyWalker {
    pub id: u64,
    pub body_handle: RigidBodyHandle,
    walking_speed: f32,
}

impl EnemyWalker {
    pub fn new(id: u64, body_handle: RigidBodyHandle, walking_speed: f32) -> Self {
        Self {
            id,
            body_handle,
            walking_speed,
        }
    }

    /// Next position from `position`. Stands still without a target and
    /// never steps past it.
    pub fn step_towards(&self, position: Vec2, target: Option<Vec2>, dt: f32) -> Vec2 {
        let Some(target) = target else {
            return position;
        };

        let to_target = target - position;
        let distance = to_target.length();
        let step = self.walking_speed * dt;

        if distance <= step || distance == 0.0 {
            target
        } else {
            position + to_target / distance * step
        }
    }
}
