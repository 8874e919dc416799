//! Combat plugin - contact routing, trigger volumes, and player damage.

use bevy::prelude::*;

use super::components::*;
use super::systems;
use crate::core::SimSet;

/// Label for the combat systems inside `SimSet::Damage`.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct CombatSystems;

/// Combat plugin - handles all damage and trigger-volume systems.
pub struct CombatPlugin;

impl Plugin for CombatPlugin {
    fn build(&self, app: &mut App) {
        app
            .init_resource::<CameraShake>()
            .add_systems(
                FixedUpdate,
                (
                    systems::handle_trigger_volumes,
                    systems::route_hit_volume_contacts,
                    systems::apply_player_damage,
                )
                    .chain()
                    .in_set(CombatSystems)
                    .in_set(SimSet::Damage),
            );
    }
}
