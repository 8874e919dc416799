//! Emberfall - a side-on action platformer in Bevy.
//!
//! The player runs, double-jumps and dashes through a level viewed from the
//! side while melee enemies patrol, spot, pursue and swing at them.
//!
//! # Architecture
//!
//! The game is organized into plugins, each handling a specific aspect:
//!
//! - **Core**: Game states, global events, the continuation scheduler and
//!   fixed-step ordering
//! - **Player**: Input, locomotion, jump/dash abilities, respawn
//! - **Combat**: Vulnerability, knockback, trigger volumes, damage routing
//! - **Enemies**: Perception, the melee state machine, swing timeline
//! - **World**: Level data, level construction, the side camera

pub mod combat;
pub mod core;
pub mod enemies;
pub mod player;
pub mod world;

use bevy::prelude::*;

/// Main game plugin that adds all sub-plugins.
pub struct EmberfallPlugin;

impl Plugin for EmberfallPlugin {
    fn build(&self, app: &mut App) {
        app
            // Core systems (must be first)
            .add_plugins(core::CorePlugin)

            // Player systems
            .add_plugins(player::PlayerPlugin)

            // Combat systems
            .add_plugins(combat::CombatPlugin)

            // Enemy systems
            .add_plugins(enemies::EnemyPlugin)

            // World systems
            .add_plugins(world::WorldPlugin);
    }
}
