//! Enemy AI behavior systems.
//!
//! Each fixed step an enemy updates its sight of the player, runs its
//! `MeleeBrain`, and moves along the depth axis. Attacks, hit reactions and
//! removal continue through scheduled continuations.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use super::components::*;
use crate::combat::{DamageOutcome, Damageable};
use crate::core::{AnimationSignal, DamageEvent, Scheduler, Signal, Task, TaskDue, Wait};
use crate::player::{Facing, Player};

/// Seconds between committing to an attack and the swing.
pub const ATTACK_WINDUP: f32 = 0.5;

/// Seconds a dead enemy stays in the world before removal.
pub const DESPAWN_DELAY: f32 = 2.0;

/// Height of the sight ray above the enemy's origin.
const EYE_HEIGHT: f32 = 0.5;

/// Depth-axis offset below which pursuit stops pushing.
const PURSUIT_DEADZONE: f32 = 0.05;

/// Update each enemy's sight of the player.
///
/// The player is seen when within detection range and nothing solid lies
/// between the enemy's eyes and the player.
pub fn perceive_player(
    rapier_context: Query<&RapierContext>,
    player_query: Query<(Entity, &GlobalTransform), (With<Player>, Without<Enemy>)>,
    mut enemy_query: Query<
        (Entity, &GlobalTransform, &EnemyStats, &AttackState, &mut Perception),
        (With<Enemy>, Without<Player>),
    >,
    mut signals: EventWriter<AnimationSignal>,
) {
    let Ok((player_entity, player_transform)) = player_query.get_single() else {
        return;
    };
    let context = rapier_context.get_single().ok();
    let player_pos = player_transform.translation();

    for (entity, transform, stats, attack, mut perception) in enemy_query.iter_mut() {
        if attack.is_dead {
            continue;
        }

        let eye = transform.translation() + Vec3::Y * EYE_HEIGHT;
        let to_player = player_pos - eye;
        let distance = to_player.length();

        let sees = distance <= stats.detection_range
            && context.map_or(true, |context| {
                context
                    .cast_ray(
                        eye,
                        to_player.normalize_or_zero(),
                        distance,
                        true,
                        QueryFilter::default().exclude_rigid_body(entity).exclude_sensors(),
                    )
                    .map_or(true, |(hit, _)| hit == player_entity)
            });

        if perception.update(sees) {
            signals.send(AnimationSignal {
                entity,
                signal: Signal::CanSeePlayer(sees),
            });
        }
    }
}

/// Run the melee state machine and move each enemy.
pub fn enemy_think(
    time: Res<Time>,
    mut scheduler: ResMut<Scheduler>,
    player_query: Query<&GlobalTransform, (With<Player>, Without<Enemy>)>,
    mut enemy_query: Query<
        (
            Entity,
            &mut Transform,
            &EnemyStats,
            &Perception,
            &mut AttackState,
            &mut MeleeBrain,
            &mut PatrolRoute,
            &mut Velocity,
        ),
        (With<Enemy>, Without<Player>),
    >,
) {
    let Ok(player_transform) = player_query.get_single() else {
        return;
    };
    let player_pos = player_transform.translation();
    let dt = time.delta_secs();

    for (entity, mut transform, stats, perception, mut attack, mut brain, mut patrol, mut velocity) in
        enemy_query.iter_mut()
    {
        let position = transform.translation;
        let in_range = position.distance(player_pos) <= stats.attack_range;
        let previous = brain.state;

        let intent = brain.think(perception, &mut *attack, in_range);

        if brain.state != previous {
            if brain.state == AiState::Alert {
                patrol.clear_pause();
            }
            debug!("Enemy {:?}: {:?} -> {:?}", entity, previous, brain.state);
        }

        if intent.face_player {
            transform.rotation = Facing::toward(position.z, player_pos.z).rotation();
        }

        if intent.start_attack {
            scheduler.schedule(entity, Task::AttackWindup, Wait::Seconds(ATTACK_WINDUP));
        }

        match intent.locomotion {
            Locomotion::Passive => {}
            Locomotion::Hold => velocity.linvel.z = 0.0,
            Locomotion::Patrol => {
                let direction = patrol.steer(position.z, dt, stats.patrol_pause);
                if direction != 0.0 {
                    transform.rotation = Facing::toward(0.0, direction).rotation();
                }
                velocity.linvel.z = direction * stats.patrol_speed;
            }
            Locomotion::Pursue => {
                let offset = player_pos.z - position.z;
                velocity.linvel.z = if offset.abs() > PURSUIT_DEADZONE {
                    offset.signum() * stats.move_speed
                } else {
                    0.0
                };
            }
        }
    }
}

/// Run enemies' due continuations.
pub fn handle_enemy_continuations(
    mut commands: Commands,
    mut due_events: EventReader<TaskDue>,
    mut scheduler: ResMut<Scheduler>,
    mut enemy_query: Query<(&EnemyStats, &mut AttackState, &mut MeleeBrain), With<Enemy>>,
    mut signals: EventWriter<AnimationSignal>,
) {
    for due in due_events.read() {
        let Ok((stats, mut attack, mut brain)) = enemy_query.get_mut(due.owner) else {
            continue;
        };

        match due.task {
            Task::AttackWindup => {
                if attack.is_dead {
                    continue;
                }
                signals.send(AnimationSignal {
                    entity: due.owner,
                    signal: Signal::Attack,
                });
                scheduler.schedule(due.owner, Task::AttackCooldown, Wait::Seconds(stats.attack_cooldown));
            }
            Task::AttackCooldown => attack.finish_cooldown(),
            Task::EndHitReaction => brain.recover(),
            Task::Despawn => {
                scheduler.cancel_owner(due.owner);
                commands.entity(due.owner).despawn_recursive();
                debug!("Removed dead enemy {:?}", due.owner);
            }
            _ => {}
        }
    }
}

/// Apply damage requests aimed at enemies.
pub fn apply_enemy_damage(
    mut commands: Commands,
    mut damage_events: EventReader<DamageEvent>,
    mut scheduler: ResMut<Scheduler>,
    mut enemy_query: Query<
        (
            &GlobalTransform,
            &EnemyStats,
            &mut AttackState,
            &mut MeleeBrain,
            &mut Velocity,
            &HitVolumeLink,
        ),
        With<Enemy>,
    >,
    mut signals: EventWriter<AnimationSignal>,
) {
    for event in damage_events.read() {
        let Ok((transform, stats, mut attack, mut brain, mut velocity, hit_volume)) =
            enemy_query.get_mut(event.target)
        else {
            continue;
        };

        match attack.take_damage(event.amount, transform.translation(), event.attacker_position) {
            DamageOutcome::Ignored => {}
            DamageOutcome::Staggered { knockback } => {
                brain.react_to_hit();
                velocity.linvel = knockback;
                scheduler.reschedule(event.target, Task::EndHitReaction, Wait::Seconds(stats.hit_reaction_time));
                signals.send(AnimationSignal {
                    entity: event.target,
                    signal: Signal::TakeDamage,
                });
            }
            DamageOutcome::Killed => {
                brain.die();
                velocity.linvel = Vec3::ZERO;
                velocity.angvel = Vec3::ZERO;
                commands
                    .entity(event.target)
                    .insert((ColliderDisabled, RigidBody::KinematicPositionBased));
                commands.entity(hit_volume.0).insert(ColliderDisabled);
                scheduler.schedule(event.target, Task::Despawn, Wait::Seconds(DESPAWN_DELAY));
                signals.send(AnimationSignal {
                    entity: event.target,
                    signal: Signal::Die,
                });
                info!("Enemy {:?} died (health {})", event.target, attack.health);
            }
        }
    }
}

/// Open or close an enemy's swing hit-volume. Dead enemies keep it closed.
pub fn apply_hit_volume_triggers(
    mut commands: Commands,
    mut triggers: EventReader<HitVolumeTrigger>,
    enemy_query: Query<(&AttackState, &HitVolumeLink), With<Enemy>>,
) {
    for trigger in triggers.read() {
        let Ok((attack, hit_volume)) = enemy_query.get(trigger.enemy) else {
            continue;
        };
        if attack.is_dead {
            continue;
        }

        if trigger.enabled {
            commands.entity(hit_volume.0).remove::<ColliderDisabled>();
        } else {
            commands.entity(hit_volume.0).insert(ColliderDisabled);
        }
    }
}
