// Game modules: character, physics, input dispatch, modes

pub mod characters;
pub mod config;
pub mod dispatcher;
pub mod mode;
pub mod physics;
