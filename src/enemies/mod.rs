//! Enemies module - melee enemy perception, combat state machine, and spawning.

mod ai;
mod animation;
mod components;
pub mod data;
mod plugin;
mod spawning;


pub use components::*;
pub use data::EnemyRegistry;
pub use plugin::EnemyPlugin;
pub use spawning::spawn_enemy;
