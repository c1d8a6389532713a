// Character entity

use glam::Vec2;

use super::animation::{AnimationClip, ClipSet, Frame};
use super::state::{AnimationState, AnimationStateMachine};
use crate::core::math::Rect;

/// Horizontal orientation of the sprite
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Facing {
    /// Drawn as authored (looking right)
    #[default]
    Normal,
    /// Drawn flipped horizontally
    Mirrored,
}

/// Visual scale of the sprite. Does not affect the bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scale {
    pub facing: Facing,
    pub factor: f32,
}

impl Default for Scale {
    fn default() -> Self {
        Self {
            facing: Facing::Normal,
            factor: 1.0,
        }
    }
}

/// The single controllable character
#[derive(Debug, Clone)]
pub struct Character {
    /// Top-left of the bounding box, in pixels
    position: Vec2,
    /// Pixels per millisecond
    velocity: Vec2,
    scale: Scale,

    clips: ClipSet,
    state_machine: AnimationStateMachine,

    /// Set by a grounding collision, cleared when a jump is armed
    pub can_jump: bool,
    /// A jump impulse is armed and not yet applied
    pub is_jumping: bool,
    pub is_dashing: bool,
    /// Horizontal velocity captured when the current dash started
    pub dash_velocity: f32,
    /// Time spent in the current dash
    pub dash_elapsed_ms: f32,
}

impl Character {
    /// Create a character at `spawn` with zero velocity, showing the idle clip
    pub fn new(clips: ClipSet, spawn: Vec2) -> Self {
        let mut character = Self {
            position: spawn,
            velocity: Vec2::ZERO,
            scale: Scale::default(),
            clips,
            state_machine: AnimationStateMachine::new(),
            can_jump: false,
            is_jumping: false,
            is_dashing: false,
            dash_velocity: 0.0,
            dash_elapsed_ms: 0.0,
        };
        character.clips.get_mut(AnimationState::Idle).restart();
        character
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn set_position(&mut self, position: Vec2) {
        debug_assert!(position.is_finite(), "non-finite position {:?}", position);
        self.position = position;
    }

    pub fn set_x(&mut self, x: f32) {
        self.set_position(Vec2::new(x, self.position.y));
    }

    pub fn set_y(&mut self, y: f32) {
        self.set_position(Vec2::new(self.position.x, y));
    }

    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    pub fn set_velocity(&mut self, velocity: Vec2) {
        debug_assert!(velocity.is_finite(), "non-finite velocity {:?}", velocity);
        self.velocity = velocity;
    }

    pub fn set_velocity_x(&mut self, vx: f32) {
        self.set_velocity(Vec2::new(vx, self.velocity.y));
    }

    pub fn set_velocity_y(&mut self, vy: f32) {
        self.set_velocity(Vec2::new(self.velocity.x, vy));
    }

    pub fn scale(&self) -> Scale {
        self.scale
    }

    pub fn set_facing(&mut self, facing: Facing) {
        self.scale.facing = facing;
    }

    pub fn set_scale_factor(&mut self, factor: f32) {
        debug_assert!(factor.is_finite() && factor > 0.0, "bad scale {}", factor);
        self.scale.factor = factor;
    }

    /// Width of the current animation frame
    pub fn width(&self) -> f32 {
        self.current_frame().width()
    }

    /// Height of the current animation frame
    pub fn height(&self) -> f32 {
        self.current_frame().height()
    }

    /// Bounding box from the position and the current frame size
    pub fn bounding_box(&self) -> Rect {
        let frame = self.current_frame();
        Rect::new(
            self.position.x,
            self.position.y,
            frame.width(),
            frame.height(),
        )
    }

    pub fn animation_state(&self) -> AnimationState {
        self.state_machine.state()
    }

    pub fn current_clip(&self) -> &AnimationClip {
        self.clips.get(self.state_machine.state())
    }

    pub fn current_frame(&self) -> &Frame {
        self.current_clip().current_frame()
    }

    /// Switch to the clip for `state`; a new clip starts from its first frame
    pub fn set_animation(&mut self, state: AnimationState) {
        if self.state_machine.transition(state) {
            self.clips.get_mut(state).restart();
        }
    }

    /// Movement key down: walk unless a jump impulse is still armed
    pub fn start_walking(&mut self) {
        if !self.is_jumping {
            self.set_animation(AnimationState::Walking);
        }
    }

    /// Movement key up: stand unless a jump impulse is still armed
    pub fn stop_walking(&mut self) {
        if !self.is_jumping {
            self.set_animation(AnimationState::Idle);
        }
    }

    /// Arm a jump if grounded. Returns whether the jump was armed.
    pub fn arm_jump(&mut self) -> bool {
        if !self.can_jump {
            return false;
        }
        self.can_jump = false;
        self.is_jumping = true;
        if self.state_machine.jump() {
            self.clips.get_mut(AnimationState::Jumping).restart();
        }
        true
    }

    /// Begin a dash at the current horizontal velocity
    pub fn start_dash(&mut self, dash_scale: f32) {
        self.dash_velocity = self.velocity.x;
        self.dash_elapsed_ms = 0.0;
        self.is_dashing = true;
        self.set_scale_factor(dash_scale);
        self.set_animation(AnimationState::Dashing);
    }

    /// Dash sub-step: drive horizontal velocity from `snapshot` and report
    /// whether the dash is still running after `elapsed_ms`
    pub fn dash(&mut self, elapsed_ms: f32, snapshot: f32, duration_ms: f32) -> bool {
        self.dash_elapsed_ms += elapsed_ms;
        if self.dash_elapsed_ms >= duration_ms {
            return false;
        }
        self.set_velocity_x(snapshot);
        true
    }

    /// Dash over: back to idle at normal scale
    pub fn finish_dash(&mut self) {
        self.is_dashing = false;
        self.dash_elapsed_ms = 0.0;
        self.set_scale_factor(1.0);
        if self.state_machine.end_dash() {
            self.clips.get_mut(AnimationState::Idle).restart();
        }
    }

    /// Feet on the tile row whose top edge is at `ground_y`.
    /// The animation is left alone; only input or a finished dash changes it.
    pub fn land_on(&mut self, ground_y: f32) {
        self.set_velocity_y(0.0);
        self.set_y(ground_y - self.height());
        self.can_jump = true;
        self.is_jumping = false;
    }

    /// Advance the clip at `animation_rate` and integrate position
    pub fn update(&mut self, elapsed_ms: f32, animation_rate: f32) {
        let state = self.state_machine.state();
        self.clips.get_mut(state).advance(elapsed_ms * animation_rate);

        let position = self.position + self.velocity * elapsed_ms;
        self.set_position(position);
    }
}

#[cfg(test)]
mod tests {
    use super::super::animation::tests::test_clip_set;
    use super::*;
    use approx::assert_relative_eq;

    fn character() -> Character {
        Character::new(test_clip_set(), Vec2::new(100.0, 500.0))
    }

    #[test]
    fn test_new_character() {
        let c = character();
        assert_eq!(c.position(), Vec2::new(100.0, 500.0));
        assert_eq!(c.velocity(), Vec2::ZERO);
        assert_eq!(c.animation_state(), AnimationState::Idle);
        assert_eq!(c.scale(), Scale::default());
        assert!(!c.can_jump);
        assert!(!c.is_jumping);
        assert!(!c.is_dashing);
    }

    #[test]
    fn test_bounding_box_follows_position_and_frame() {
        let mut c = character();
        assert_eq!(c.bounding_box(), Rect::new(100.0, 500.0, 32.0, 64.0));

        c.set_x(40.0);
        c.set_y(60.0);
        assert_eq!(c.bounding_box(), Rect::new(40.0, 60.0, 32.0, 64.0));
    }

    #[test]
    fn test_scale_does_not_change_bounding_box() {
        let mut c = character();
        c.set_scale_factor(0.9);
        assert_eq!(c.bounding_box().width, 32.0);
    }

    #[test]
    fn test_set_animation_restarts_new_clip() {
        let mut c = character();
        c.set_animation(AnimationState::Walking);
        c.update(130.0, 1.0);
        assert_eq!(c.current_clip().frame_index(), 2);

        c.set_animation(AnimationState::Idle);
        c.set_animation(AnimationState::Walking);
        assert_eq!(c.current_clip().frame_index(), 0);
    }

    #[test]
    fn test_set_same_animation_keeps_frame() {
        let mut c = character();
        c.update(130.0, 1.0);
        c.set_animation(AnimationState::Idle);
        assert_eq!(c.current_clip().frame_index(), 2);
    }

    #[test]
    fn test_update_integrates_position() {
        let mut c = character();
        c.set_velocity(Vec2::new(0.5, -0.25));
        c.update(16.0, 1.0);
        assert_relative_eq!(c.position().x, 108.0);
        assert_relative_eq!(c.position().y, 496.0);
    }

    #[test]
    fn test_arm_jump_requires_ground() {
        let mut c = character();
        assert!(!c.arm_jump());
        assert_eq!(c.animation_state(), AnimationState::Idle);

        c.can_jump = true;
        assert!(c.arm_jump());
        assert!(!c.can_jump);
        assert!(c.is_jumping);
        assert_eq!(c.animation_state(), AnimationState::Jumping);
    }

    #[test]
    fn test_start_dash_snapshots_velocity() {
        let mut c = character();
        c.set_velocity_x(0.7);
        c.start_dash(0.9);

        assert!(c.is_dashing);
        assert_eq!(c.dash_velocity, 0.7);
        assert_eq!(c.scale().factor, 0.9);
        assert_eq!(c.animation_state(), AnimationState::Dashing);
    }

    #[test]
    fn test_dash_step_runs_for_duration() {
        let mut c = character();
        c.set_velocity_x(0.7);
        c.start_dash(0.9);
        c.set_velocity_x(0.0);

        assert!(c.dash(100.0, 0.7, 304.0));
        assert_eq!(c.velocity().x, 0.7);
        assert!(c.dash(100.0, 0.7, 304.0));
        assert!(c.dash(100.0, 0.7, 304.0));
        assert!(!c.dash(100.0, 0.7, 304.0));
    }

    #[test]
    fn test_finish_dash() {
        let mut c = character();
        c.start_dash(0.9);
        c.finish_dash();

        assert!(!c.is_dashing);
        assert_eq!(c.scale().factor, 1.0);
        assert_eq!(c.animation_state(), AnimationState::Idle);
    }

    #[test]
    fn test_land_on() {
        let mut c = character();
        c.set_velocity_y(0.4);
        c.is_jumping = true;
        c.land_on(640.0);

        assert_eq!(c.velocity().y, 0.0);
        assert_eq!(c.position().y, 576.0);
        assert!(c.can_jump);
        assert!(!c.is_jumping);
    }

    #[test]
    fn test_landing_keeps_jump_animation() {
        let mut c = character();
        c.can_jump = true;
        c.arm_jump();
        c.set_velocity_x(0.5);
        c.land_on(640.0);
        assert_eq!(c.animation_state(), AnimationState::Jumping);
        assert!(c.can_jump);
    }

    #[test]
    fn test_landing_keeps_dash_animation() {
        let mut c = character();
        c.start_dash(0.9);
        c.land_on(640.0);
        assert_eq!(c.animation_state(), AnimationState::Dashing);
    }

    #[test]
    fn test_walking_gated_on_armed_jump() {
        let mut c = character();
        c.can_jump = true;
        c.arm_jump();
        c.start_walking();
        assert_eq!(c.animation_state(), AnimationState::Jumping);

        // impulse applied, jump animation no longer protected
        c.is_jumping = false;
        c.start_walking();
        assert_eq!(c.animation_state(), AnimationState::Walking);
        assert_eq!(c.current_clip().frame_index(), 0);
        c.stop_walking();
        assert_eq!(c.animation_state(), AnimationState::Idle);
    }
}
