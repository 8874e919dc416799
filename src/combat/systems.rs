//! Combat systems - contact routing, trigger volumes, and player damage.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use super::components::*;
use crate::core::{
    CheckpointSetEvent, DamageEvent, PlayerDamagedEvent, PlayerDeathEvent, Scheduler, Task, Wait,
};
use crate::enemies::{Enemy, EnemyHitVolume, EnemyStats};
use crate::player::{DashHitVolume, Player, PlayerTuning};

/// Order the two colliders of a contact so `first` matches the predicate.
fn pick<F: Fn(Entity) -> bool>(a: Entity, b: Entity, is_first: F) -> Option<(Entity, Entity)> {
    if is_first(a) {
        Some((a, b))
    } else if is_first(b) {
        Some((b, a))
    } else {
        None
    }
}

/// Handle checkpoint and hazard contacts for the player.
pub fn handle_trigger_volumes(
    mut commands: Commands,
    mut collision_events: EventReader<CollisionEvent>,
    mut scheduler: ResMut<Scheduler>,
    mut checkpoint_query: Query<(&mut Checkpoint, &GlobalTransform)>,
    hazard_query: Query<(), With<Hazard>>,
    mut player_query: Query<&mut Vulnerability, With<Player>>,
    mut checkpoint_events: EventWriter<CheckpointSetEvent>,
    mut death_events: EventWriter<PlayerDeathEvent>,
) {
    for event in collision_events.read() {
        let CollisionEvent::Started(a, b, _) = *event else {
            continue;
        };
        let Some((player, other)) = pick(a, b, |e| player_query.contains(e)) else {
            continue;
        };

        if let Ok((mut checkpoint, transform)) = checkpoint_query.get_mut(other) {
            if checkpoint.reached {
                continue;
            }
            checkpoint.reached = true;
            commands.entity(other).insert(ColliderDisabled);
            checkpoint_events.send(CheckpointSetEvent {
                checkpoint: other,
                position: transform.translation(),
            });
        } else if hazard_query.contains(other) {
            let Ok(mut vulnerability) = player_query.get_mut(player) else {
                continue;
            };
            if vulnerability.take_death() {
                scheduler.reschedule(player, Task::EndInvulnerability, Wait::Seconds(INVULNERABILITY_TIME));
                death_events.send(PlayerDeathEvent { player });
                info!("Player died on a hazard");
            }
        }
    }
}

/// Turn hit-volume contacts into damage requests.
///
/// Enemy swing volumes damage the player; the player's dash volume damages
/// enemies.
pub fn route_hit_volume_contacts(
    mut collision_events: EventReader<CollisionEvent>,
    tuning: Res<PlayerTuning>,
    enemy_volumes: Query<&EnemyHitVolume>,
    dash_volumes: Query<&DashHitVolume>,
    enemy_query: Query<(&GlobalTransform, &EnemyStats), With<Enemy>>,
    player_query: Query<&GlobalTransform, With<Player>>,
    mut damage_events: EventWriter<DamageEvent>,
) {
    for event in collision_events.read() {
        let CollisionEvent::Started(a, b, _) = *event else {
            continue;
        };

        if let Some((volume, other)) = pick(a, b, |e| enemy_volumes.contains(e)) {
            let Ok(owner) = enemy_volumes.get(volume).map(|v| v.owner) else {
                continue;
            };
            if !player_query.contains(other) {
                continue;
            }
            let Ok((attacker, stats)) = enemy_query.get(owner) else {
                continue;
            };
            damage_events.send(DamageEvent {
                target: other,
                source: owner,
                amount: stats.damage,
                attacker_position: attacker.translation(),
            });
        } else if let Some((volume, other)) = pick(a, b, |e| dash_volumes.contains(e)) {
            let Ok(owner) = dash_volumes.get(volume).map(|v| v.owner) else {
                continue;
            };
            if !enemy_query.contains(other) {
                continue;
            }
            let Ok(attacker) = player_query.get(owner) else {
                continue;
            };
            damage_events.send(DamageEvent {
                target: other,
                source: owner,
                amount: tuning.dash_damage,
                attacker_position: attacker.translation(),
            });
        }
    }
}

/// Apply damage requests aimed at the player.
pub fn apply_player_damage(
    mut damage_events: EventReader<DamageEvent>,
    mut scheduler: ResMut<Scheduler>,
    mut player_query: Query<(&GlobalTransform, &mut Vulnerability, &mut Velocity), With<Player>>,
    mut damaged_events: EventWriter<PlayerDamagedEvent>,
) {
    for event in damage_events.read() {
        let Ok((transform, mut vulnerability, mut velocity)) = player_query.get_mut(event.target) else {
            continue;
        };

        let outcome = vulnerability.take_damage(event.amount, transform.translation(), event.attacker_position);
        let DamageOutcome::Staggered { knockback } = outcome else {
            continue;
        };

        velocity.linvel = knockback;
        scheduler.reschedule(event.target, Task::EndInvulnerability, Wait::Seconds(INVULNERABILITY_TIME));
        damaged_events.send(PlayerDamagedEvent {
            player: event.target,
            amount: event.amount,
        });
        debug!("Player took {} damage, knockback {:?}", event.amount, knockback);
    }
}
