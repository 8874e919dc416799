//! Combat module - vulnerability, knockback, hazards, checkpoints, and damage routing.

mod components;
mod plugin;
mod systems;


pub use components::*;
pub use plugin::{CombatPlugin, CombatSystems};
