// Game action definitions and default bindings

use winit::event::MouseButton;
use winit::keyboard::KeyCode;

/// Represents all possible in-game actions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    // Movement (drive the horizontal/vertical virtual axes)
    MoveLeft,
    MoveRight,
    MoveUp,
    MoveDown,
    Jump,

    // Abilities
    Fart,   // Fire1
    Sneeze, // Fire2

    // Meta actions
    Pause,
    Menu,
}

/// Represents an input source (keyboard key or mouse button)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputSource {
    Keyboard(KeyCode),
    Mouse(MouseButton),
}

impl InputSource {
    /// Create a keyboard input source
    pub fn key(code: KeyCode) -> Self {
        Self::Keyboard(code)
    }

    /// Create a mouse button input source
    pub fn mouse(button: MouseButton) -> Self {
        Self::Mouse(button)
    }
}

/// Default keyboard/mouse bindings for the player
///
/// Mirrors the classic Horizontal/Vertical/Jump/Fire1/Fire2 layout:
/// WASD or arrows to move, Space to jump, Left Ctrl or left mouse to fart,
/// Left Alt or right mouse to sneeze.
pub fn default_bindings() -> Vec<(InputSource, Action)> {
    vec![
        (InputSource::key(KeyCode::KeyA), Action::MoveLeft),
        (InputSource::key(KeyCode::ArrowLeft), Action::MoveLeft),
        (InputSource::key(KeyCode::KeyD), Action::MoveRight),
        (InputSource::key(KeyCode::ArrowRight), Action::MoveRight),
        (InputSource::key(KeyCode::KeyW), Action::MoveUp),
        (InputSource::key(KeyCode::ArrowUp), Action::MoveUp),
        (InputSource::key(KeyCode::KeyS), Action::MoveDown),
        (InputSource::key(KeyCode::ArrowDown), Action::MoveDown),
        (InputSource::key(KeyCode::Space), Action::Jump),
        (InputSource::key(KeyCode::ControlLeft), Action::Fart),
        (InputSource::mouse(MouseButton::Left), Action::Fart),
        (InputSource::key(KeyCode::AltLeft), Action::Sneeze),
        (InputSource::mouse(MouseButton::Right), Action::Sneeze),
    ]
}

/// Global bindings (always active, checked after player bindings)
pub fn global_bindings() -> Vec<(InputSource, Action)> {
    vec![
        (InputSource::key(KeyCode::Escape), Action::Menu),
        (InputSource::key(KeyCode::KeyP), Action::Pause),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_source_keyboard_creation() {
        let source = InputSource::key(KeyCode::KeyA);
        assert_eq!(source, InputSource::Keyboard(KeyCode::KeyA));
    }

    #[test]
    fn test_input_source_mouse_creation() {
        let source = InputSource::mouse(MouseButton::Left);
        assert_eq!(source, InputSource::Mouse(MouseButton::Left));
    }

    #[test]
    fn test_abilities_bound_to_fire_buttons() {
        let bindings = default_bindings();
        let fart_on_left_mouse = bindings
            .iter()
            .any(|b| *b == (InputSource::Mouse(MouseButton::Left), Action::Fart));
        let sneeze_on_right_mouse = bindings
            .iter()
            .any(|b| *b == (InputSource::Mouse(MouseButton::Right), Action::Sneeze));

        assert!(fart_on_left_mouse);
        assert!(sneeze_on_right_mouse);
    }

    #[test]
    fn test_every_movement_action_has_two_keys() {
        let bindings = default_bindings();
        for action in [
            Action::MoveLeft,
            Action::MoveRight,
            Action::MoveUp,
            Action::MoveDown,
        ] {
            let count = bindings.iter().filter(|(_, a)| *a == action).count();
            assert_eq!(count, 2, "{:?} should have WASD and arrow bindings", action);
        }
    }

    #[test]
    fn test_no_duplicate_sources() {
        let mut seen_sources = std::collections::HashSet::new();
        for (source, _) in default_bindings().into_iter().chain(global_bindings()) {
            assert!(
                seen_sources.insert(source),
                "Duplicate input source found: {:?}",
                source
            );
        }
    }
}
