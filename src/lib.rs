pub mod app;
pub mod audio;
pub mod config;
pub mod creature;
pub mod error;
pub mod game;
pub mod input;
pub mod renderer;
pub mod scheduler;
pub mod settings;
pub mod spawner;
pub mod surface;
pub mod terminal_runtime;

pub use error::{Error, Result};
