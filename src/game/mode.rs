// Game owner and its Menu / Play modes
//
// Assets for a mode are loaded once on entry through the path-keyed cache.
// `update` drains the intent queue once, then steps the active mode. `draw`
// only reads state.

use super::characters::{Character, ClipLoadError, ClipSet, Scale};
use super::config::GameConfig;
use super::dispatcher::{dispatch_menu, Effect, InputDispatcher};
use super::physics::{PhysicsStep, StepReport};
use crate::core::math::Rect;
use crate::engine::assets::{AssetCache, AssetError, AssetType, FrameImage};
use crate::engine::audio::AudioSink;
use crate::engine::input::{IntentQueue, KeyInput};
use crate::engine::tilemap::TileMap;
use glam::Vec2;
use log::{debug, error, info};
use std::collections::HashMap;
use std::sync::Arc;

/// RGBA color
pub type Color = [u8; 4];

pub const DEBUG_TEXT_COLOR: Color = [0, 0, 255, 255];
pub const BOUNDING_BOX_COLOR: Color = [255, 0, 0, 255];

/// Decoded image for each tile code of a map
pub type TileImages = HashMap<char, FrameImage>;

/// Where a frame gets drawn. Implementations never touch game state.
pub trait RenderSurface {
    fn draw_image(&mut self, image: &FrameImage, position: Vec2, scale: Scale);
    fn draw_tile_map(&mut self, map: &TileMap, tiles: &TileImages, offset: Vec2);
    fn draw_rect(&mut self, rect: Rect, color: Color);
    fn draw_text(&mut self, text: &str, position: Vec2, color: Color);
}

/// Errors entering a mode
#[derive(Debug, thiserror::Error)]
pub enum GameError {
    #[error("failed to load {what}: {source}")]
    Asset {
        what: String,
        #[source]
        source: AssetError,
    },

    #[error("failed to load character animation: {0}")]
    Clips(#[from] ClipLoadError),
}

fn asset_context(what: &str) -> impl FnOnce(AssetError) -> GameError + '_ {
    move |source| GameError::Asset {
        what: what.to_string(),
        source,
    }
}

/// Load the image declared for every tile code of `map`, from the map's own directory
fn load_tile_images(
    assets: &mut AssetCache,
    asset_type: AssetType,
    map: &TileMap,
) -> Result<TileImages, GameError> {
    let mut images = TileImages::new();
    let codes: Vec<char> = map.solid_tiles().map(|(_, _, code)| code).collect();
    for code in codes {
        if images.contains_key(&code) {
            continue;
        }
        if let Some(name) = map.tile_image(code) {
            let image = assets
                .load_image(asset_type, name)
                .map_err(asset_context(name))?;
            images.insert(code, image);
        }
    }
    Ok(images)
}

/// Title screen: menu map and a play button
pub struct MenuMode {
    map: Arc<TileMap>,
    tile_images: TileImages,
    play_button: FrameImage,
}

impl MenuMode {
    pub fn enter(config: &GameConfig, assets: &mut AssetCache) -> Result<Self, GameError> {
        let map = assets
            .load_map(AssetType::Menu, &config.menu_map)
            .map_err(asset_context(&config.menu_map))?;
        let tile_images = load_tile_images(assets, AssetType::Menu, &map)?;
        let play_button = assets
            .load_image(AssetType::Menu, &config.play_button)
            .map_err(asset_context(&config.play_button))?;

        info!("Entered menu");
        Ok(Self {
            map,
            tile_images,
            play_button,
        })
    }

    /// Nothing moves on the menu
    pub fn update(&mut self, _elapsed_ms: f32) {}

    pub fn draw(&self, surface: &mut dyn RenderSurface) {
        surface.draw_tile_map(&self.map, &self.tile_images, Vec2::ZERO);
        surface.draw_image(&self.play_button, Vec2::ZERO, Scale::default());
    }
}

/// Gameplay: one character on one tile map
pub struct PlayMode {
    character: Character,
    map: Arc<TileMap>,
    tile_images: TileImages,
    background: FrameImage,
    physics: PhysicsStep,
    last_step: StepReport,
}

impl PlayMode {
    pub fn enter(config: &GameConfig, assets: &mut AssetCache) -> Result<Self, GameError> {
        let map = assets
            .load_map(AssetType::Map, &config.level)
            .map_err(asset_context(&config.level))?;
        let tile_images = load_tile_images(assets, AssetType::Map, &map)?;
        let background = assets
            .load_image(AssetType::Map, &config.background)
            .map_err(asset_context(&config.background))?;
        let clips = ClipSet::load(assets, &config.clips)?;

        info!(
            "Entered play on {} ({}x{} px)",
            config.level,
            map.pixel_width(),
            map.pixel_height()
        );

        Ok(Self {
            character: Character::new(clips, config.spawn),
            map,
            tile_images,
            background,
            physics: PhysicsStep::new(config.tuning.clone(), config.viewport_width),
            last_step: StepReport::default(),
        })
    }

    pub fn character(&self) -> &Character {
        &self.character
    }

    pub fn character_mut(&mut self) -> &mut Character {
        &mut self.character
    }

    pub fn map(&self) -> &TileMap {
        &self.map
    }

    /// What the most recent physics step reported
    pub fn last_step(&self) -> StepReport {
        self.last_step
    }

    /// Swap in a freshly loaded level; the character keeps its state
    pub fn replace_map(&mut self, map: Arc<TileMap>, tile_images: TileImages) {
        self.map = map;
        self.tile_images = tile_images;
    }

    pub fn update(&mut self, elapsed_ms: f32) -> StepReport {
        self.last_step = self.physics.step(&mut self.character, &self.map, elapsed_ms);
        if self.last_step.dash_finished {
            debug!(
                "Dash finished, showing {}",
                self.character.animation_state().clip_name()
            );
        }
        self.last_step
    }

    pub fn draw(&self, surface: &mut dyn RenderSurface) {
        surface.draw_image(&self.background, Vec2::ZERO, Scale::default());

        let frame = self.character.current_frame();
        surface.draw_image(&frame.image, self.character.position(), self.character.scale());

        surface.draw_tile_map(&self.map, &self.tile_images, Vec2::ZERO);

        for (i, line) in debug_lines(&self.character).iter().enumerate() {
            let position = Vec2::new(100.0, 100.0 + 20.0 * i as f32);
            surface.draw_text(line, position, DEBUG_TEXT_COLOR);
        }
        surface.draw_rect(self.character.bounding_box(), BOUNDING_BOX_COLOR);
    }
}

/// Debug overlay text for the character
pub fn debug_lines(character: &Character) -> [String; 4] {
    [
        format!("Player Y : {}", character.position().y as i32),
        format!("Player Y Velocity : {}", character.velocity().y),
        format!("Can jump : {}", character.can_jump),
        format!("Dash : {}", character.is_dashing),
    ]
}

/// The active mode
pub enum GameMode {
    Menu(MenuMode),
    Play(PlayMode),
}

impl GameMode {
    pub fn name(&self) -> &'static str {
        match self {
            GameMode::Menu(_) => "menu",
            GameMode::Play(_) => "play",
        }
    }

    pub fn update(&mut self, elapsed_ms: f32) {
        match self {
            GameMode::Menu(menu) => menu.update(elapsed_ms),
            GameMode::Play(play) => {
                play.update(elapsed_ms);
            }
        }
    }

    pub fn draw(&self, surface: &mut dyn RenderSurface) {
        match self {
            GameMode::Menu(menu) => menu.draw(surface),
            GameMode::Play(play) => play.draw(surface),
        }
    }
}

/// Owns every piece of game state; driven by the frame loop
pub struct Game {
    config: GameConfig,
    assets: AssetCache,
    audio: Box<dyn AudioSink>,
    intents: IntentQueue,
    dispatcher: InputDispatcher,
    mode: GameMode,
    running: bool,
}

impl Game {
    /// Load the menu and start there
    pub fn new(config: GameConfig, audio: Box<dyn AudioSink>) -> Result<Self, GameError> {
        let mut assets = AssetCache::new(&config.asset_root);
        let mode = GameMode::Menu(MenuMode::enter(&config, &mut assets)?);
        let dispatcher = InputDispatcher::new(
            config.tuning.clone(),
            config.alternate_level.clone(),
            config.action_sound.clone(),
        );

        Ok(Self {
            config,
            assets,
            audio,
            intents: IntentQueue::new(),
            dispatcher,
            mode,
            running: true,
        })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn mode(&self) -> &GameMode {
        &self.mode
    }

    pub fn assets(&self) -> &AssetCache {
        &self.assets
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Queue a key intent for the next update
    pub fn handle_key(&mut self, input: KeyInput) {
        self.intents.push(input);
    }

    /// Apply queued intents in arrival order, then step the active mode
    pub fn update(&mut self, elapsed_ms: f32) -> Result<(), GameError> {
        let inputs: Vec<KeyInput> = self.intents.drain().collect();
        for input in inputs {
            let effect = match &mut self.mode {
                GameMode::Menu(_) => dispatch_menu(input),
                GameMode::Play(play) => self.dispatcher.dispatch(play.character_mut(), input),
            };
            if let Some(effect) = effect {
                self.apply(effect)?;
            }
        }

        self.mode.update(elapsed_ms);
        Ok(())
    }

    pub fn draw(&self, surface: &mut dyn RenderSurface) {
        self.mode.draw(surface);
    }

    fn apply(&mut self, effect: Effect) -> Result<(), GameError> {
        match effect {
            Effect::ReloadLevel(name) => self.reload_level(&name),
            Effect::PlaySound(name) => {
                let path = self.assets.loader().resolve_path(AssetType::Sound, &name);
                self.audio.play(&path);
            }
            Effect::Quit => {
                info!("Quit requested");
                self.running = false;
            }
            Effect::StartGame => {
                if let GameMode::Menu(_) = self.mode {
                    self.mode = GameMode::Play(PlayMode::enter(&self.config, &mut self.assets)?);
                }
            }
        }
        Ok(())
    }

    /// Runtime level swap; a failure keeps the current map
    fn reload_level(&mut self, name: &str) {
        let GameMode::Play(play) = &mut self.mode else {
            return;
        };

        let loaded = self
            .assets
            .reload_map(AssetType::Map, name)
            .map_err(asset_context(name))
            .and_then(|map| {
                let tiles = load_tile_images(&mut self.assets, AssetType::Map, &map)?;
                Ok((map, tiles))
            });

        match loaded {
            Ok((map, tiles)) => {
                info!("Reloaded level {}", name);
                play.replace_map(map, tiles);
            }
            Err(e) => error!("Level reload failed, keeping current map: {}", e),
        }
    }
}
