// Gameplay: the snot character, enemies, projectiles and the world tying them together

pub mod characters;
pub mod config;
pub mod effects;
pub mod enemies;
pub mod explosion;
pub mod level;
pub mod projectiles;
pub mod score;
pub mod world;

pub use config::GameConfig;
pub use world::{GameEvent, GameWorld, Scene};
