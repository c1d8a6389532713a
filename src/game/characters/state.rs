// Character animation state machine

/// Which animation the character is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AnimationState {
    /// Standing still
    #[default]
    Idle,
    /// Moving horizontally under input
    Walking,
    /// Jump clip, plays once and holds its last frame
    Jumping,
    /// Dash burst in progress
    Dashing,
}

impl AnimationState {
    /// Short name used in logs and debug overlays
    pub fn clip_name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Walking => "walk",
            Self::Jumping => "jump",
            Self::Dashing => "dash",
        }
    }
}

/// State machine that tracks the active animation state
#[derive(Debug, Clone, Default)]
pub struct AnimationStateMachine {
    current_state: AnimationState,
}

impl AnimationStateMachine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the current state
    pub fn state(&self) -> AnimationState {
        self.current_state
    }

    /// Transition to a new state, returns whether the state changed
    pub fn transition(&mut self, new_state: AnimationState) -> bool {
        if self.current_state == new_state {
            return false;
        }
        log::debug!(
            "Animation {} -> {}",
            self.current_state.clip_name(),
            new_state.clip_name()
        );
        self.current_state = new_state;
        true
    }

    /// Jump armed. A dash in progress keeps its clip.
    pub fn jump(&mut self) -> bool {
        self.current_state != AnimationState::Dashing && self.transition(AnimationState::Jumping)
    }

    pub fn dash(&mut self) -> bool {
        self.transition(AnimationState::Dashing)
    }

    pub fn end_dash(&mut self) -> bool {
        self.current_state == AnimationState::Dashing && self.transition(AnimationState::Idle)
    }
}
