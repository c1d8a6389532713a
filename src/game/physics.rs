// Per-frame physics and collision step for the character
//
// Order within one step:
//   1. armed jump impulse (single shot)
//   2. dash sub-step
//   3. gravity
//   4. clip advance at the fixed animation rate, position integration
//   5. screen-edge clamps
//   6. two-point tile collision (top-left bounce, bottom-left grounding)

use super::characters::{AnimationState, Character, MovementTuning};
use crate::core::math::grid_cell;
use crate::engine::tilemap::TileMap;
use log::debug;

/// Which screen edges clamped the character this step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EdgeContacts {
    pub bottom: bool,
    pub left: bool,
    pub right: bool,
}

/// Which tile samples hit solid tiles this step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TileContacts {
    /// Top-left corner inside a solid tile, vertical velocity was inverted
    pub top_left: bool,
    /// Bottom-left corner inside a solid tile, the character was grounded
    pub bottom_left: bool,
}

/// What happened during one step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepReport {
    pub jump_impulse_applied: bool,
    pub dash_finished: bool,
    pub edges: EdgeContacts,
    pub tiles: TileContacts,
}

/// Physics & collision step parameters
#[derive(Debug, Clone)]
pub struct PhysicsStep {
    pub tuning: MovementTuning,
    /// Right-hand limit for the character, in pixels
    pub viewport_width: f32,
}

impl PhysicsStep {
    pub fn new(tuning: MovementTuning, viewport_width: f32) -> Self {
        Self {
            tuning,
            viewport_width,
        }
    }

    /// Run one frame of simulation
    pub fn step(&self, character: &mut Character, map: &TileMap, elapsed_ms: f32) -> StepReport {
        debug_assert!(
            elapsed_ms.is_finite() && elapsed_ms >= 0.0,
            "invalid elapsed time {}",
            elapsed_ms
        );

        let mut report = StepReport {
            jump_impulse_applied: self.apply_jump_impulse(character),
            ..StepReport::default()
        };

        if character.is_dashing {
            let snapshot = character.dash_velocity;
            if character.dash(elapsed_ms, snapshot, self.tuning.dash_duration_ms) {
                character.set_scale_factor(self.tuning.dash_scale);
                character.set_animation(AnimationState::Dashing);
            } else {
                character.finish_dash();
                report.dash_finished = true;
            }
        }

        let vy = character.velocity().y + self.tuning.gravity * elapsed_ms;
        character.set_velocity_y(vy);

        character.update(elapsed_ms, self.tuning.animation_rate);

        report.edges = self.handle_screen_edge(character, map);
        report.tiles = check_tile_collision(character, map);
        report
    }

    /// Apply the armed jump impulse once, if vertical velocity allows it.
    /// An armed jump stays armed until it can be applied or the character lands.
    pub fn apply_jump_impulse(&self, character: &mut Character) -> bool {
        if !character.is_jumping || character.velocity().y <= self.tuning.jump_velocity_floor {
            return false;
        }
        let vy = character.velocity().y - self.tuning.jump_impulse;
        character.set_velocity_y(vy);
        character.is_jumping = false;
        true
    }

    /// Keep the character inside the map height and the viewport width.
    /// Each edge is checked independently.
    pub fn handle_screen_edge(&self, character: &mut Character, map: &TileMap) -> EdgeContacts {
        let mut contacts = EdgeContacts::default();
        let width = character.width();
        let height = character.height();
        let map_height = map.pixel_height() as f32;

        if character.bounding_box().bottom() > map_height {
            debug!("Screen edge collision: bottom");
            character.set_y(map_height - height - 1.0);
            character.set_velocity_y(0.0);
            contacts.bottom = true;
        }

        if character.position().x < 0.0 {
            debug!("Screen edge collision: left");
            character.set_x(0.0);
            // Vertical, not horizontal, velocity is cleared on the left edge
            character.set_velocity_y(0.0);
            contacts.left = true;
        }

        if character.position().x > self.viewport_width - width {
            debug!("Screen edge collision: right");
            character.set_x(self.viewport_width - width);
            character.set_velocity_x(0.0);
            contacts.right = true;
        }

        contacts
    }
}

/// Sample the top-left and bottom-left corners of the bounding box against the map
pub fn check_tile_collision(character: &mut Character, map: &TileMap) -> TileContacts {
    let mut contacts = TileContacts::default();
    let tile_width = map.tile_width() as f32;
    let tile_height = map.tile_height() as f32;
    let position = character.position();

    let col = grid_cell(position.x, tile_width);
    let top_row = grid_cell(position.y, tile_height);

    if map.is_solid(col, top_row) {
        debug!("Tile collision: top-left at ({}, {})", col, top_row);
        let vy = character.velocity().y;
        character.set_velocity_y(-vy);
        contacts.top_left = true;
    }

    let bottom_row = grid_cell(position.y + character.height(), tile_height);

    if map.is_solid(col, bottom_row) {
        debug!("Tile collision: bottom-left at ({}, {})", col, bottom_row);
        character.land_on(bottom_row as f32 * tile_height);
        contacts.bottom_left = true;
    }

    contacts
}
