// Physics system using rapier2d

pub mod body;
mod collision;
mod world;

pub use body::{presets, ColliderHandle, RigidBodyHandle};
pub use world::PhysicsWorld;

// Rapier's vector type, for positions crossing into the physics world
pub use rapier2d::prelude::Vector;
