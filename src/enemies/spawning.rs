//! Enemy entity construction.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use super::components::*;
use super::data::EnemyDefinition;
use crate::combat::layers;
use crate::core::SimActor;

/// Spawn a melee enemy patrolling between its position and `patrol_to_z`.
pub fn spawn_enemy(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    enemy_type: &str,
    definition: &EnemyDefinition,
    position: Vec3,
    patrol_to_z: f32,
) -> Entity {
    let collider = definition.collider.clone().unwrap_or_default();
    let swing = definition.swing.unwrap_or_default();

    let enemy = commands
        .spawn((
            (
                Enemy,
                SimActor,
                EnemyType(enemy_type.to_string()),
                definition.to_stats(),
                AttackState::new(definition.max_health),
                MeleeBrain::default(),
                Perception::default(),
                PatrolRoute::new(position.z, patrol_to_z),
            ),
            Mesh3d(meshes.add(Capsule3d::new(collider.radius, collider.half_height * 2.0))),
            MeshMaterial3d(materials.add(Color::srgb(0.55, 0.15, 0.15))),
            Transform::from_translation(position),
            RigidBody::Dynamic,
            Collider::capsule_y(collider.half_height, collider.radius),
            LockedAxes::ROTATION_LOCKED | LockedAxes::TRANSLATION_LOCKED_X,
            Velocity::zero(),
            CollisionGroups::new(layers::ENEMY, Group::ALL),
        ))
        .id();

    // Swing volume sits in front of the enemy (+Z is forward)
    let hit_volume = commands
        .spawn((
            EnemyHitVolume { owner: enemy },
            Transform::from_xyz(0.0, 0.0, swing.reach),
            Collider::ball(swing.reach * 0.6),
            Sensor,
            ColliderMassProperties::Density(0.0),
            ColliderDisabled,
            CollisionGroups::new(layers::TRIGGER, layers::PLAYER),
            ActiveEvents::COLLISION_EVENTS,
        ))
        .id();

    commands
        .entity(enemy)
        .add_child(hit_volume)
        .insert(HitVolumeLink(hit_volume));

    info!("Spawned {} at {:?}", definition.name, position);

    enemy
}
