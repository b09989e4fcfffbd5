// Input manager - turns window events into per-tick control frames

use super::action::{Action, InputSource};
use super::config::InputConfig;
use super::player::{ControlFrame, PlayerInput};
use winit::event::{ElementState, KeyEvent, MouseButton};
use winit::keyboard::PhysicalKey;

/// Actions handled by the application shell rather than the player
const META_ACTIONS: [Action; 2] = [Action::Pause, Action::Menu];

/// Main input manager
pub struct InputManager {
    config: InputConfig,
    player: PlayerInput,
    /// Meta actions pressed since the shell last drained them
    meta_pressed: Vec<Action>,
}

impl InputManager {
    pub fn new(config: InputConfig) -> Self {
        let player = PlayerInput::new(config.axis_settings());
        Self {
            config,
            player,
            meta_pressed: Vec::new(),
        }
    }

    /// Process a keyboard event from winit
    pub fn process_keyboard_event(&mut self, event: &KeyEvent) {
        let PhysicalKey::Code(key_code) = event.physical_key else {
            return;
        };
        // Key repeat would otherwise re-trigger jumps
        if event.repeat {
            return;
        }
        self.apply(InputSource::key(key_code), event.state);
    }

    /// Process a mouse button event from winit
    pub fn process_mouse_button(&mut self, button: MouseButton, state: ElementState) {
        self.apply(InputSource::mouse(button), state);
    }

    fn apply(&mut self, source: InputSource, state: ElementState) {
        let Some(action) = self.config.action(source) else {
            return;
        };

        match state {
            ElementState::Pressed => {
                if META_ACTIONS.contains(&action) && !self.player.is_pressed(action) {
                    self.meta_pressed.push(action);
                }
                self.player.press(action);
            }
            ElementState::Released => self.player.release(action),
        }
    }

    /// Snapshot the controls for one simulation tick
    pub fn sample(&mut self, dt: f32) -> ControlFrame {
        self.player.sample(dt)
    }

    /// Take the meta actions (pause, menu) pressed since the last call
    pub fn drain_meta_actions(&mut self) -> Vec<Action> {
        std::mem::take(&mut self.meta_pressed)
    }

    /// Release everything (e.g. on focus loss)
    pub fn reset(&mut self) {
        self.player.reset();
        self.meta_pressed.clear();
    }
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new(InputConfig::default())
    }
}
