// Level layout

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Static box in the level
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlatformSpec {
    /// Center
    pub position: Vec2,
    pub width: f32,
    pub height: f32,
}

impl PlatformSpec {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            position: Vec2::new(x, y),
            width,
            height,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelLayout {
    pub platforms: Vec<PlatformSpec>,
    pub player_spawn: Vec2,
    pub enemy_spawns: Vec<Vec2>,
}

impl Default for LevelLayout {
    fn default() -> Self {
        Self {
            platforms: vec![
                // Ground
                PlatformSpec::new(0.0, -0.5, 60.0, 1.0),
                // Walls
                PlatformSpec::new(-30.5, 10.0, 1.0, 20.0),
                PlatformSpec::new(30.5, 10.0, 1.0, 20.0),
                // Ledges
                PlatformSpec::new(-8.0, 3.0, 6.0, 0.5),
                PlatformSpec::new(9.0, 5.0, 5.0, 0.5),
            ],
            player_spawn: Vec2::new(0.0, 1.5),
            enemy_spawns: vec![
                Vec2::new(-20.0, 0.6),
                Vec2::new(18.0, 0.6),
                Vec2::new(26.0, 6.0),
            ],
        }
    }
}

/// Small layouts for world tests
#[cfg(test)]
impl LevelLayout {
    /// Just a floor, with the player standing in the middle
    pub fn flat(width: f32) -> Self {
        Self {
            platforms: vec![PlatformSpec::new(0.0, -0.5, width, 1.0)],
            player_spawn: Vec2::new(0.0, 1.5),
            enemy_spawns: Vec::new(),
        }
    }

    pub fn with_enemy(mut self, position: Vec2) -> Self {
        self.enemy_spawns.push(position);
        self
    }
}
