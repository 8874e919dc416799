//! Player plugin - input, locomotion, abilities, and respawn.

use bevy::prelude::*;

use super::abilities;
use super::components::*;
use super::input;
use super::locomotion;
use super::presentation;
use super::respawn::{self, RespawnPoint};
use crate::core::{GameState, SimSet};

/// Player plugin - handles the player's fixed-step simulation and its
/// presentation-step input and facing.
pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        app
            .init_resource::<InputFrame>()
            .init_resource::<RespawnPoint>()
            .init_resource::<PlayerTuning>()
            .add_systems(Startup, load_player_tuning)

            // Presentation step
            .add_systems(
                Update,
                (
                    input::sample_input,
                    locomotion::snap_facing,
                    presentation::publish_snapshot,
                )
                    .chain()
                    .run_if(in_state(GameState::InGame)),
            )

            // Fixed simulation step
            .add_systems(FixedUpdate, locomotion::ground_check.in_set(SimSet::Probe))
            .add_systems(
                FixedUpdate,
                abilities::handle_player_continuations.in_set(SimSet::Continuations),
            )
            .add_systems(FixedUpdate, locomotion::apply_locomotion.in_set(SimSet::Locomotion))
            .add_systems(
                FixedUpdate,
                (abilities::apply_jump, abilities::apply_dash, input::consume_input)
                    .chain()
                    .in_set(SimSet::Abilities),
            )
            .add_systems(
                FixedUpdate,
                (respawn::record_checkpoints, respawn::respawn_player)
                    .chain()
                    .in_set(SimSet::Damage)
                    .after(crate::combat::CombatSystems),
            );
    }
}
