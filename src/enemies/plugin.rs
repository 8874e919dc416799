//! Enemy plugin - registers all enemy systems.

use bevy::prelude::*;

use super::ai;
use super::animation;
use super::components::HitVolumeTrigger;
use super::data::{load_enemy_definitions, EnemyRegistry};
use crate::combat::CombatSystems;
use crate::core::SimSet;

/// Enemy plugin - handles enemy perception, combat, damage and removal.
pub struct EnemyPlugin;

impl Plugin for EnemyPlugin {
    fn build(&self, app: &mut App) {
        app
            .init_resource::<EnemyRegistry>()
            .add_event::<HitVolumeTrigger>()
            .add_systems(Startup, load_enemy_definitions)
            .add_systems(
                FixedUpdate,
                (ai::handle_enemy_continuations, animation::run_swing_window)
                    .in_set(SimSet::Continuations),
            )
            .add_systems(
                FixedUpdate,
                (
                    ai::perceive_player,
                    ai::enemy_think,
                    animation::schedule_swing_window,
                    ai::apply_hit_volume_triggers,
                )
                    .chain()
                    .in_set(SimSet::Ai),
            )
            .add_systems(
                FixedUpdate,
                ai::apply_enemy_damage
                    .after(CombatSystems)
                    .in_set(SimSet::Damage),
            );
    }
}
