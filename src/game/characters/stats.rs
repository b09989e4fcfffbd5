// Character controller tuning
//
// Speeds are in world units per second, the jump window in seconds.

use serde::{Deserialize, Serialize};

/// Movement and jump tuning for the player character
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerSettings {
    // Moving
    /// Speed for small stick deflections
    pub walk_speed: f32,
    /// Speed once |x| exceeds `run_threshold`
    pub run_speed: f32,
    /// Downward acceleration (units/s²)
    pub gravity: f32,
    /// Axis magnitude above which walking becomes running
    pub run_threshold: f32,

    // Jumping
    /// Vertical velocity set by a jump
    pub jump_speed: f32,
    /// Window after a jump in which releasing the button cuts it short
    pub jump_duration: f32,
    /// Rate at which an interrupted jump loses upward speed (units/s²)
    pub jump_interrupt_factor: f32,

    // Dimensions (for the physics capsule)
    pub width: f32,
    pub height: f32,
    /// Character scale, passed on to the snot balls it sneezes
    pub scale: f32,
}

pub const BASE_SETTINGS: ControllerSettings = ControllerSettings {
    walk_speed: 4.0,
    run_speed: 10.0,
    gravity: 65.0,
    run_threshold: 0.6,

    jump_speed: 25.0,
    jump_duration: 0.5,
    jump_interrupt_factor: 100.0,

    width: 1.0,
    height: 2.0,
    scale: 1.0,
};

impl Default for ControllerSettings {
    fn default() -> Self {
        BASE_SETTINGS
    }
}

impl ControllerSettings {
    /// Vertical velocity held while standing on the ground
    pub fn resting_velocity(&self, dt: f32) -> f32 {
        -self.gravity * dt
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = ControllerSettings::default();
        assert_eq!(settings.walk_speed, 4.0);
        assert_eq!(settings.run_speed, 10.0);
        assert_eq!(settings.gravity, 65.0);
        assert_eq!(settings.jump_speed, 25.0);
        assert_eq!(settings.jump_duration, 0.5);
        assert_eq!(settings.jump_interrupt_factor, 100.0);
        assert_eq!(settings.run_threshold, 0.6);
        assert_eq!(settings.scale, 1.0);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let settings: ControllerSettings =
            serde_json::from_str(r#"{ "run_speed": 12.0 }"#).unwrap();
        assert_eq!(settings.run_speed, 12.0);
        assert_eq!(settings.walk_speed, BASE_SETTINGS.walk_speed);
    }

    #[test]
    fn test_resting_velocity() {
        let settings = ControllerSettings::default();
        approx::assert_relative_eq!(settings.resting_velocity(0.1), -6.5);
    }
}
