// Input configuration and remapping

use super::action::{default_bindings, global_bindings, Action, InputSource};
use super::axis::AxisSettings;
use std::collections::HashMap;

/// A remappable set of source -> action bindings
#[derive(Debug, Clone, Default)]
pub struct BindingMap {
    bindings: HashMap<InputSource, Action>,
}

impl BindingMap {
    pub fn from_bindings(bindings: impl IntoIterator<Item = (InputSource, Action)>) -> Self {
        let mut map = Self::default();
        for (source, action) in bindings {
            map.bind(source, action);
        }
        map
    }

    /// Bind a source to an action, replacing whatever it was bound to
    pub fn bind(&mut self, source: InputSource, action: Action) {
        self.bindings.insert(source, action);
    }

    pub fn action(&self, source: InputSource) -> Option<Action> {
        self.bindings.get(&source).copied()
    }
}

/// Full input configuration: player bindings, global bindings and axis ramps
#[derive(Debug, Clone)]
pub struct InputConfig {
    player: BindingMap,
    global: BindingMap,
    axis: AxisSettings,
}

impl InputConfig {
    pub fn new(player: BindingMap, global: BindingMap, axis: AxisSettings) -> Self {
        Self {
            player,
            global,
            axis,
        }
    }

    /// Resolve a source, player bindings first, then global bindings
    pub fn action(&self, source: InputSource) -> Option<Action> {
        self.player
            .action(source)
            .or_else(|| self.global.action(source))
    }

    pub fn axis_settings(&self) -> AxisSettings {
        self.axis
    }

    pub fn set_axis_settings(&mut self, axis: AxisSettings) {
        self.axis = axis;
    }
}

impl Default for InputConfig {
    fn default() -> Self {
        Self::new(
            BindingMap::from_bindings(default_bindings()),
            BindingMap::from_bindings(global_bindings()),
            AxisSettings::default(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use winit::event::MouseButton;
    use winit::keyboard::KeyCode;

    #[test]
    fn test_bind_action() {
        let mut map = BindingMap::default();
        let source = InputSource::key(KeyCode::KeyJ);
        map.bind(source, Action::Sneeze);
        assert_eq!(map.action(source), Some(Action::Sneeze));
    }

    #[test]
    fn test_rebind_source_replaces_action() {
        let mut map = BindingMap::default();
        let source = InputSource::key(KeyCode::KeyJ);

        map.bind(source, Action::Fart);
        map.bind(source, Action::Sneeze);

        assert_eq!(map.action(source), Some(Action::Sneeze));
    }

    #[test]
    fn test_default_ability_bindings() {
        let config = InputConfig::default();
        for source in [
            InputSource::key(KeyCode::ControlLeft),
            InputSource::mouse(MouseButton::Left),
        ] {
            assert_eq!(config.action(source), Some(Action::Fart));
        }
        assert_eq!(
            config.action(InputSource::mouse(MouseButton::Right)),
            Some(Action::Sneeze)
        );
        assert_eq!(config.action(InputSource::key(KeyCode::Space)), Some(Action::Jump));
    }

    #[test]
    fn test_player_bindings_shadow_global() {
        let mut config = InputConfig::default();
        let escape = InputSource::key(KeyCode::Escape);
        assert_eq!(config.action(escape), Some(Action::Menu));

        config.player.bind(escape, Action::Jump);
        assert_eq!(config.action(escape), Some(Action::Jump));
    }
}
