// Character system
//
// - Controller settings (speeds, gravity, jump tuning)
// - Locomotion state mapping from input to state, velocity and side effects
// - Animation playback with frame events and bones
// - The player character tying it to physics, audio and projectiles

pub mod animation;
pub mod character;
pub mod state;
pub mod stats;

pub use animation::AnimationNames;
pub use character::{Character, CharacterSounds};
pub use state::LocomotionState;
pub use stats::ControllerSettings;
