// Game-wide configuration

use super::characters::{ClipSpec, MovementTuning, BASE_TUNING, STANDARD_CLIPS};
use glam::Vec2;
use std::path::PathBuf;

/// Everything the game reads at startup
#[derive(Debug, Clone)]
pub struct GameConfig {
    // Window
    pub viewport_width: f32,
    pub viewport_height: f32,

    /// Character start position (top-left of the bounding box)
    pub spawn: Vec2,
    pub tuning: MovementTuning,

    // Assets, relative to `asset_root` and their type directory
    pub asset_root: PathBuf,
    pub level: String,
    /// Map swapped in by the reload key
    pub alternate_level: String,
    pub background: String,
    pub menu_map: String,
    pub play_button: String,
    pub action_sound: String,
    pub clips: Vec<ClipSpec>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            viewport_width: 1920.0,
            viewport_height: 980.0,
            spawn: Vec2::new(100.0, 500.0),
            tuning: BASE_TUNING,
            asset_root: PathBuf::from("assets"),
            level: "map.txt".to_string(),
            alternate_level: "map2.txt".to_string(),
            background: "background.png".to_string(),
            menu_map: "menu.txt".to_string(),
            play_button: "LargeButtons/PlayButton.png".to_string(),
            action_sound: "caw.wav".to_string(),
            clips: STANDARD_CLIPS.to_vec(),
        }
    }
}

impl GameConfig {
    /// Default configuration with assets read from `root`
    pub fn with_asset_root(root: impl Into<PathBuf>) -> Self {
        Self {
            asset_root: root.into(),
            ..Self::default()
        }
    }
}
