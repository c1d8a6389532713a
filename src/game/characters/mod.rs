// Character system
//
// This module contains everything related to the controllable character:
// - Character entity (position, velocity, scale, action flags)
// - Movement tuning constants
// - Animation state machine
// - Animation clips and their on-disk layout

pub mod animation;
pub mod character;
pub mod state;
pub mod tuning;

// Re-export commonly used types
pub use animation::{ClipLoadError, ClipSet, ClipSpec, STANDARD_CLIPS};
pub use character::{Character, Facing, Scale};
pub use state::AnimationState;
pub use tuning::{MovementTuning, BASE_TUNING};
