// Engine modules: game loop, input, physics, audio, assets

pub mod assets;
pub mod audio;
pub mod game_loop;
pub mod input;
pub mod physics;
