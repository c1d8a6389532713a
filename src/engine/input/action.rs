// Game action definitions and default bindings

use winit::keyboard::KeyCode;

/// Represents all possible in-game actions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    // Movement
    MoveLeft,
    MoveRight,
    Jump,
    Dash,

    // Side effects
    ReloadLevel,
    PlaySound,

    // Meta actions
    Start,
    Quit,
}

/// Whether a key went down or came up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyState {
    Pressed,
    Released,
}

/// One discrete key event, already mapped to an action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyInput {
    pub action: Action,
    pub state: KeyState,
    /// OS auto-repeat of a held key
    pub repeat: bool,
}

impl KeyInput {
    pub fn pressed(action: Action) -> Self {
        Self {
            action,
            state: KeyState::Pressed,
            repeat: false,
        }
    }

    pub fn released(action: Action) -> Self {
        Self {
            action,
            state: KeyState::Released,
            repeat: false,
        }
    }

    /// Mark this input as an auto-repeat
    pub fn repeated(mut self) -> Self {
        self.repeat = true;
        self
    }
}

/// Keys the game ships with
pub const DEFAULT_BINDINGS: [(KeyCode, Action); 9] = [
    (KeyCode::KeyA, Action::MoveLeft),
    (KeyCode::KeyD, Action::MoveRight),
    (KeyCode::Space, Action::Jump),
    (KeyCode::ShiftLeft, Action::Dash),
    (KeyCode::ShiftRight, Action::Dash),
    (KeyCode::KeyR, Action::ReloadLevel),
    (KeyCode::KeyS, Action::PlaySound),
    (KeyCode::Enter, Action::Start),
    (KeyCode::Escape, Action::Quit),
];
