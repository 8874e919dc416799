//! Respawn at the last checkpoint after a death.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use super::components::*;
use crate::core::{CheckpointSetEvent, PlayerDeathEvent, Scheduler, Task, Wait};

/// Seconds the player stays frozen after respawning.
pub const RESPAWN_FREEZE: f32 = 0.5;

/// Where the player reappears after dying.
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct RespawnPoint(pub Vec3);

/// Freeze the player in place: no speed, no direction, no momentum.
pub fn freeze_movement(kinematics: &mut ActorKinematics, lock: &mut MovementLock, velocity: &mut Velocity) {
    lock.locked = true;
    kinematics.velocity = 0.0;
    kinematics.last_direction = 0.0;
    velocity.linvel = Vec3::ZERO;
    velocity.angvel = Vec3::ZERO;
}

/// Move the respawn point to each checkpoint the player reaches.
pub fn record_checkpoints(
    mut checkpoint_events: EventReader<CheckpointSetEvent>,
    mut respawn: ResMut<RespawnPoint>,
) {
    for event in checkpoint_events.read() {
        respawn.0 = event.position;
        info!("Checkpoint set at {:?}", event.position);
    }
}

/// Teleport the dead player to the respawn point and hold input briefly.
pub fn respawn_player(
    mut death_events: EventReader<PlayerDeathEvent>,
    respawn: Res<RespawnPoint>,
    mut scheduler: ResMut<Scheduler>,
    mut player_query: Query<
        (&mut Transform, &mut ActorKinematics, &mut MovementLock, &mut Velocity),
        With<Player>,
    >,
) {
    for event in death_events.read() {
        let Ok((mut transform, mut kinematics, mut lock, mut velocity)) = player_query.get_mut(event.player) else {
            continue;
        };

        transform.translation = respawn.0;
        freeze_movement(&mut kinematics, &mut lock, &mut velocity);
        scheduler.reschedule(event.player, Task::EndMovementLock, Wait::Seconds(RESPAWN_FREEZE));

        info!("Player respawned at {:?}", respawn.0);
    }
}
