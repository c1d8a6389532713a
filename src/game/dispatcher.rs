// Input dispatcher: applies queued key intents to the character
//
// Each intent mutates the character synchronously. Anything that reaches
// outside the character (level reload, sound, quitting) is handed back to the
// caller as an `Effect`.

use super::characters::{Character, Facing, MovementTuning};
use crate::engine::input::{Action, KeyInput, KeyState};
use log::debug;

/// Side effects requested by an input, carried out by the game owner
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Replace the tile grid with the named map
    ReloadLevel(String),
    /// Play the named sound once
    PlaySound(String),
    /// Stop the frame loop
    Quit,
    /// Leave the menu and start playing
    StartGame,
}

/// Routes key intents to character mutations
#[derive(Debug, Clone)]
pub struct InputDispatcher {
    tuning: MovementTuning,
    /// Map loaded by the reload key
    alternate_level: String,
    /// Sound played by the sound key
    action_sound: String,
}

impl InputDispatcher {
    pub fn new(
        tuning: MovementTuning,
        alternate_level: impl Into<String>,
        action_sound: impl Into<String>,
    ) -> Self {
        Self {
            tuning,
            alternate_level: alternate_level.into(),
            action_sound: action_sound.into(),
        }
    }

    /// Apply one intent during play
    pub fn dispatch(&self, character: &mut Character, input: KeyInput) -> Option<Effect> {
        debug!("Input {:?}", input);
        match input.state {
            KeyState::Pressed => self.key_down(character, input),
            KeyState::Released => self.key_up(character, input.action),
        }
    }

    fn key_down(&self, character: &mut Character, input: KeyInput) -> Option<Effect> {
        match input.action {
            Action::MoveRight => {
                character.set_facing(Facing::Normal);
                let vx = self.ramp(character.velocity().x);
                character.set_velocity_x(vx);
                character.start_walking();
                None
            }
            Action::MoveLeft => {
                character.set_facing(Facing::Mirrored);
                let vx = -self.ramp(-character.velocity().x);
                character.set_velocity_x(vx);
                character.start_walking();
                None
            }
            Action::Dash => {
                // Holding the key must not extend the dash
                if !(input.repeat && character.is_dashing) {
                    character.start_dash(self.tuning.dash_scale);
                }
                None
            }
            Action::Jump => {
                character.arm_jump();
                None
            }
            Action::ReloadLevel => Some(Effect::ReloadLevel(self.alternate_level.clone())),
            Action::PlaySound => Some(Effect::PlaySound(self.action_sound.clone())),
            Action::Start | Action::Quit => None,
        }
    }

    fn key_up(&self, character: &mut Character, action: Action) -> Option<Effect> {
        match action {
            Action::MoveRight | Action::MoveLeft => {
                character.set_velocity_x(0.0);
                character.stop_walking();
                None
            }
            Action::Quit => Some(Effect::Quit),
            _ => None,
        }
    }

    /// Next speed in the direction of travel for one movement key-down
    fn ramp(&self, speed: f32) -> f32 {
        let tuning = &self.tuning;
        if speed < tuning.walk_start_speed {
            tuning.walk_start_speed
        } else {
            (speed + tuning.walk_ramp_step).min(tuning.walk_max_speed)
        }
    }
}

/// Apply one intent while the menu is showing
pub fn dispatch_menu(input: KeyInput) -> Option<Effect> {
    match (input.action, input.state) {
        (Action::Start, KeyState::Pressed) if !input.repeat => Some(Effect::StartGame),
        (Action::Quit, KeyState::Released) => Some(Effect::Quit),
        _ => None,
    }
}
