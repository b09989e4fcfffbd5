// Virtual axes built from pairs of digital actions

use super::action::Action;
use serde::{Deserialize, Serialize};

/// Ramp settings for a virtual axis
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AxisSettings {
    /// Units per second the value moves towards a held direction
    pub sensitivity: f32,
    /// Units per second the value falls back to zero when released
    pub gravity: f32,
    /// Jump straight to zero when the opposite direction is pressed
    pub snap: bool,
}

impl Default for AxisSettings {
    fn default() -> Self {
        Self {
            sensitivity: 3.0,
            gravity: 3.0,
            snap: true,
        }
    }
}

/// A smoothed [-1, 1] axis driven by a negative and a positive action
#[derive(Debug, Clone)]
pub struct VirtualAxis {
    negative: Action,
    positive: Action,
    settings: AxisSettings,
    value: f32,
}

impl VirtualAxis {
    pub fn new(negative: Action, positive: Action, settings: AxisSettings) -> Self {
        Self {
            negative,
            positive,
            settings,
            value: 0.0,
        }
    }

    /// Horizontal axis (MoveLeft / MoveRight)
    pub fn horizontal(settings: AxisSettings) -> Self {
        Self::new(Action::MoveLeft, Action::MoveRight, settings)
    }

    /// Vertical axis (MoveDown / MoveUp)
    pub fn vertical(settings: AxisSettings) -> Self {
        Self::new(Action::MoveDown, Action::MoveUp, settings)
    }

    pub fn negative(&self) -> Action {
        self.negative
    }

    pub fn positive(&self) -> Action {
        self.positive
    }

    /// Current axis value in [-1, 1]
    pub fn value(&self) -> f32 {
        self.value
    }

    /// Advance the axis given which of its two actions are held
    pub fn update(&mut self, negative_held: bool, positive_held: bool, dt: f32) {
        let target = match (negative_held, positive_held) {
            (true, false) => -1.0,
            (false, true) => 1.0,
            // Both or neither: settle back to rest
            _ => 0.0,
        };

        if target == 0.0 {
            self.value = crate::core::math::move_towards(self.value, 0.0, self.settings.gravity * dt);
            return;
        }

        if self.settings.snap && self.value != 0.0 && self.value.signum() != target {
            self.value = 0.0;
        }

        self.value =
            crate::core::math::move_towards(self.value, target, self.settings.sensitivity * dt);
    }

    pub fn reset(&mut self) {
        self.value = 0.0;
    }
}
