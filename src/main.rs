use anyhow::{Context, Result};
use log::{info, trace};
use winit::{
    event::{ElementState, Event, KeyEvent, WindowEvent},
    event_loop::{ControlFlow, EventLoop},
    keyboard::PhysicalKey,
    window::WindowBuilder,
};

mod core;
mod engine;
mod game;

use crate::core::math::Rect;
use engine::assets::FrameImage;
use engine::audio::{AudioSink, LogAudio};
use engine::game_loop::FrameClock;
use engine::input::{InputConfig, KeyState};
use engine::tilemap::TileMap;
use game::characters::Scale;
use game::config::GameConfig;
use game::mode::{Color, Game, RenderSurface, TileImages};
use glam::Vec2;

/// Frames between window title refreshes
const TITLE_REFRESH_FRAMES: u64 = 60;

/// Surface used while no GPU renderer is attached: counts draw calls
#[derive(Default)]
struct HeadlessSurface {
    draw_calls: usize,
}

impl RenderSurface for HeadlessSurface {
    fn draw_image(&mut self, _image: &FrameImage, _position: Vec2, _scale: Scale) {
        self.draw_calls += 1;
    }

    fn draw_tile_map(&mut self, _map: &TileMap, _tiles: &TileImages, _offset: Vec2) {
        self.draw_calls += 1;
    }

    fn draw_rect(&mut self, _rect: Rect, _color: Color) {
        self.draw_calls += 1;
    }

    fn draw_text(&mut self, text: &str, _position: Vec2, _color: Color) {
        trace!("{}", text);
        self.draw_calls += 1;
    }
}

fn audio_sink() -> Box<dyn AudioSink> {
    #[cfg(feature = "audio")]
    match engine::audio::RodioAudio::new() {
        Ok(sink) => return Box::new(sink),
        Err(e) => log::warn!("No audio output, sounds will only be logged: {}", e),
    }
    Box::new(LogAudio)
}

fn main() -> Result<()> {
    // Initialize logger, RUST_LOG overrides the default level
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    info!("Starting Blue Dash...");

    let config = match std::env::args().nth(1) {
        Some(root) => GameConfig::with_asset_root(root),
        None => GameConfig::default(),
    };
    info!("Reading assets from {}", config.asset_root.display());

    // Create event loop and window
    let event_loop = EventLoop::new()?;
    let window = WindowBuilder::new()
        .with_title("Blue Dash")
        .with_inner_size(winit::dpi::LogicalSize::new(
            config.viewport_width,
            config.viewport_height,
        ))
        .with_resizable(false)
        .build(&event_loop)?;

    info!("Window created successfully");

    let mut game = Game::new(config, audio_sink()).context("Failed to start the menu")?;
    let bindings = InputConfig::with_defaults();
    let mut clock = FrameClock::new();
    let mut failure = None;

    event_loop.set_control_flow(ControlFlow::Poll);

    // Main event loop
    event_loop
        .run(|event, elwt| match event {
            Event::WindowEvent {
                event: WindowEvent::CloseRequested,
                ..
            } => {
                info!("Close requested, shutting down...");
                elwt.exit();
            }
            Event::WindowEvent {
                event:
                    WindowEvent::KeyboardInput {
                        event:
                            KeyEvent {
                                physical_key: PhysicalKey::Code(code),
                                state,
                                repeat,
                                ..
                            },
                        ..
                    },
                ..
            } => {
                let state = match state {
                    ElementState::Pressed => KeyState::Pressed,
                    ElementState::Released => KeyState::Released,
                };
                if let Some(input) = bindings.translate(code, state, repeat) {
                    game.handle_key(input);
                }
            }
            Event::WindowEvent {
                event: WindowEvent::Focused(focused),
                ..
            } => {
                if focused {
                    clock.resume();
                } else {
                    clock.pause();
                }
            }
            Event::WindowEvent {
                event: WindowEvent::RedrawRequested,
                ..
            } => {
                let mut surface = HeadlessSurface::default();
                game.draw(&mut surface);
                trace!("Frame drew {} calls", surface.draw_calls);
            }
            Event::AboutToWait => {
                let elapsed_ms = clock.begin_frame();
                if let Err(e) = game.update(elapsed_ms) {
                    failure = Some(e);
                    elwt.exit();
                    return;
                }
                if !game.is_running() {
                    elwt.exit();
                    return;
                }

                if clock.frame_count() % TITLE_REFRESH_FRAMES == 0 {
                    window.set_title(&format!(
                        "Blue Dash - {} - {:.0} fps{}",
                        game.mode().name(),
                        clock.fps(),
                        if clock.is_paused() { " (paused)" } else { "" }
                    ));
                }
                window.request_redraw();
            }
            _ => {}
        })
        .map_err(|e| anyhow::anyhow!("Event loop error: {}", e))?;

    if let Some(e) = failure {
        return Err(e).context("Failed to enter play mode");
    }

    let stats = game.assets().stats();
    info!(
        "Shut down after {} frames ({:.1}s), {} images and {} maps cached",
        clock.frame_count(),
        clock.elapsed().as_secs_f32(),
        stats.image_count,
        stats.map_count
    );
    Ok(())
}
