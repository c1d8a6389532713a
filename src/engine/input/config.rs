// Key bindings: which physical key triggers which action

use super::action::{Action, KeyInput, KeyState, DEFAULT_BINDINGS};
use std::collections::HashMap;
use winit::keyboard::KeyCode;

/// Key map. One action per key, any number of keys per action.
#[derive(Debug, Clone, Default)]
pub struct InputConfig {
    bindings: HashMap<KeyCode, Action>,
}

impl InputConfig {
    /// A key map with nothing bound
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_defaults() -> Self {
        let mut config = Self::new();
        config.reset_to_defaults();
        config
    }

    pub fn action_for(&self, key: KeyCode) -> Option<Action> {
        self.bindings.get(&key).copied()
    }

    /// Turn a raw key event into a `KeyInput`; unbound keys are ignored
    pub fn translate(&self, key: KeyCode, state: KeyState, repeat: bool) -> Option<KeyInput> {
        let action = self.action_for(key)?;
        let input = match state {
            KeyState::Pressed => KeyInput::pressed(action),
            KeyState::Released => KeyInput::released(action),
        };
        Some(if repeat { input.repeated() } else { input })
    }

    pub fn reset_to_defaults(&mut self) {
        self.bindings = DEFAULT_BINDINGS.into_iter().collect();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = InputConfig::with_defaults();
        assert_eq!(config.action_for(KeyCode::KeyA), Some(Action::MoveLeft));
        assert_eq!(config.action_for(KeyCode::KeyD), Some(Action::MoveRight));
        assert_eq!(config.action_for(KeyCode::Space), Some(Action::Jump));
        assert_eq!(config.action_for(KeyCode::Escape), Some(Action::Quit));
    }

    #[test]
    fn test_both_shift_keys_dash() {
        let config = InputConfig::with_defaults();
        assert_eq!(config.action_for(KeyCode::ShiftLeft), Some(Action::Dash));
        assert_eq!(config.action_for(KeyCode::ShiftRight), Some(Action::Dash));
    }

    #[test]
    fn test_translate_bound_key() {
        let config = InputConfig::with_defaults();
        assert_eq!(
            config.translate(KeyCode::Space, KeyState::Pressed, false),
            Some(KeyInput::pressed(Action::Jump))
        );
        assert_eq!(
            config.translate(KeyCode::KeyD, KeyState::Pressed, true),
            Some(KeyInput::pressed(Action::MoveRight).repeated())
        );
    }

    #[test]
    fn test_translate_unbound_key() {
        let config = InputConfig::with_defaults();
        assert!(config.translate(KeyCode::KeyZ, KeyState::Pressed, false).is_none());
    }

    #[test]
    fn test_reset_to_defaults() {
        let mut config = InputConfig::new();
        assert!(config.action_for(KeyCode::KeyA).is_none());
        config.reset_to_defaults();

        assert_eq!(config.action_for(KeyCode::KeyA), Some(Action::MoveLeft));
    }
}
