//! Player module - side-on locomotion, double jump, dash, and respawn.

mod abilities;
mod components;
mod input;
mod locomotion;
mod plugin;
mod presentation;
mod respawn;
mod spawning;

#[cfg(test)]
mod tests;

pub use abilities::{commit_jump, dash_direction, jumps_available, try_jump};
pub use components::*;
pub use locomotion::{advance, apply_ground_contact, is_running, step_speed};
pub use plugin::PlayerPlugin;
pub use presentation::snapshot;
pub use respawn::{freeze_movement, RespawnPoint};
pub use spawning::spawn_player;
