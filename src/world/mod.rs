//! World module - level data, construction, and the side camera.

mod builder;
mod camera;
mod data;
mod plugin;


pub use data::{CurrentLevel, LevelDefinition, LevelRegistry};
pub use plugin::WorldPlugin;
