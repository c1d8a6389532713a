// Movement tuning - every constant the physics step and input dispatcher use
//
// Units: pixels and milliseconds. Velocities are pixels per millisecond,
// positive y points down the screen.

/// Movement and physics constants for the controllable character
#[derive(Debug, Clone, PartialEq)]
pub struct MovementTuning {
    // Vertical
    /// Added to vertical velocity per elapsed millisecond
    pub gravity: f32,
    /// Subtracted from vertical velocity once per jump
    pub jump_impulse: f32,
    /// The impulse is only applied while vertical velocity is above this
    pub jump_velocity_floor: f32,

    // Horizontal ramp on movement key presses
    /// Speed a movement key snaps to when starting slower than this
    pub walk_start_speed: f32,
    /// Speed added by each further key-down (auto-repeat) event
    pub walk_ramp_step: f32,
    /// Top walking speed
    pub walk_max_speed: f32,

    // Dash
    /// How long one dash lasts
    pub dash_duration_ms: f32,
    /// Visual scale factor while dashing
    pub dash_scale: f32,

    // Presentation
    /// Animation playback rate, independent of physical speed
    pub animation_rate: f32,
}

/// The tuning the game ships with
pub const BASE_TUNING: MovementTuning = MovementTuning {
    gravity: 0.0003,
    jump_impulse: 0.3,
    jump_velocity_floor: -1.0,

    walk_start_speed: 0.5,
    walk_ramp_step: 0.1,
    walk_max_speed: 1.0,

    // One pass of the 16-frame, 19ms dash clip
    dash_duration_ms: 304.0,
    dash_scale: 0.9,

    animation_rate: 1.0,
};

impl Default for MovementTuning {
    fn default() -> Self {
        BASE_TUNING
    }
}
