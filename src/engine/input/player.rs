// Per-player input state management

use super::action::Action;
use super::axis::{AxisSettings, VirtualAxis};
use std::collections::HashSet;

/// One tick's worth of player controls, ready for gameplay code
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ControlFrame {
    /// Horizontal axis in [-1, 1]
    pub horizontal: f32,
    /// Vertical axis in [-1, 1]
    pub vertical: f32,
    /// Jump went down since the previous tick
    pub jump_pressed: bool,
    /// Jump went up since the previous tick
    pub jump_released: bool,
    /// Fart button is held
    pub fart_held: bool,
    /// Sneeze button is held
    pub sneeze_held: bool,
}

/// Represents the input state for a single player
#[derive(Debug)]
pub struct PlayerInput {
    /// Actions that are currently pressed
    pressed: HashSet<Action>,

    /// Actions pressed since the last tick consumed edges
    just_pressed: HashSet<Action>,

    /// Actions released since the last tick consumed edges
    just_released: HashSet<Action>,

    horizontal: VirtualAxis,
    vertical: VirtualAxis,
}

impl PlayerInput {
    pub fn new(axis_settings: AxisSettings) -> Self {
        Self {
            pressed: HashSet::new(),
            just_pressed: HashSet::new(),
            just_released: HashSet::new(),
            horizontal: VirtualAxis::horizontal(axis_settings),
            vertical: VirtualAxis::vertical(axis_settings),
        }
    }

    /// Check if an action is currently pressed
    pub fn is_pressed(&self, action: Action) -> bool {
        self.pressed.contains(&action)
    }

    /// Check if an action was pressed since the last tick
    pub fn just_pressed(&self, action: Action) -> bool {
        self.just_pressed.contains(&action)
    }

    /// Check if an action was released since the last tick
    pub fn just_released(&self, action: Action) -> bool {
        self.just_released.contains(&action)
    }

    /// Register an action press
    pub(crate) fn press(&mut self, action: Action) {
        if self.pressed.insert(action) {
            self.just_pressed.insert(action);
        }
    }

    /// Register an action release
    pub(crate) fn release(&mut self, action: Action) {
        if self.pressed.remove(&action) {
            self.just_released.insert(action);
        }
    }

    /// Advance the virtual axes and snapshot this tick's controls.
    /// Consumes the press/release edges so each is seen by exactly one tick.
    pub fn sample(&mut self, dt: f32) -> ControlFrame {
        let (left, right) = (
            self.is_pressed(self.horizontal.negative()),
            self.is_pressed(self.horizontal.positive()),
        );
        self.horizontal.update(left, right, dt);

        let (down, up) = (
            self.is_pressed(self.vertical.negative()),
            self.is_pressed(self.vertical.positive()),
        );
        self.vertical.update(down, up, dt);

        let frame = ControlFrame {
            horizontal: self.horizontal.value(),
            vertical: self.vertical.value(),
            jump_pressed: self.just_pressed(Action::Jump),
            jump_released: self.just_released(Action::Jump),
            fart_held: self.is_pressed(Action::Fart),
            sneeze_held: self.is_pressed(Action::Sneeze),
        };

        self.end_tick();
        frame
    }

    /// Clear edge state for a new tick
    pub(crate) fn end_tick(&mut self) {
        self.just_pressed.clear();
        self.just_released.clear();
    }

    /// Reset all input state
    pub fn reset(&mut self) {
        self.pressed.clear();
        self.just_pressed.clear();
        self.just_released.clear();
        self.horizontal.reset();
        self.vertical.reset();
    }
}

impl Default for PlayerInput {
    fn default() -> Self {
        Self::new(AxisSettings::default())
    }
}
