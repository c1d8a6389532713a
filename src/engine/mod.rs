// Engine modules: assets, audio, frame timing, input, tile grid

pub mod assets;
pub mod audio;
pub mod game_loop;
pub mod input;
pub mod tilemap;
