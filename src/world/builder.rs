//! Level construction from data definitions.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use super::data::{BoxDef, LevelDefinition};
use crate::combat::{layers, Checkpoint, Hazard};
use crate::enemies::{spawn_enemy, EnemyRegistry};
use crate::player::{spawn_player, RespawnPoint};

/// Marker for all level geometry that should be cleaned up.
#[derive(Component)]
pub struct LevelGeometry;

/// Build a level and its actors. Returns the player entity.
pub fn build_level_from_data(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    level: &LevelDefinition,
    enemy_registry: &EnemyRegistry,
    respawn: &mut RespawnPoint,
) -> Entity {
    setup_environment(commands);

    let platform_material = materials.add(Color::srgb(0.35, 0.33, 0.3));
    for platform in &level.platforms {
        commands.spawn((
            LevelGeometry,
            Mesh3d(meshes.add(cuboid_mesh(platform))),
            MeshMaterial3d(platform_material.clone()),
            Transform::from_translation(platform.center()),
            RigidBody::Fixed,
            cuboid_collider(platform),
            CollisionGroups::new(layers::WORLD, Group::ALL),
        ));
    }

    let hazard_material = materials.add(Color::srgb(0.8, 0.2, 0.1));
    for hazard in &level.hazards {
        commands.spawn((
            LevelGeometry,
            Hazard,
            Mesh3d(meshes.add(cuboid_mesh(hazard))),
            MeshMaterial3d(hazard_material.clone()),
            Transform::from_translation(hazard.center()),
            RigidBody::Fixed,
            cuboid_collider(hazard),
            CollisionGroups::new(layers::HAZARD, Group::ALL),
            ActiveEvents::COLLISION_EVENTS,
        ));
    }

    for checkpoint in &level.checkpoints {
        commands.spawn((
            LevelGeometry,
            Checkpoint::default(),
            Transform::from_translation(checkpoint.center()),
            cuboid_collider(checkpoint),
            Sensor,
            CollisionGroups::new(layers::TRIGGER, layers::PLAYER),
            ActiveEvents::COLLISION_EVENTS,
        ));
    }

    for spawn in &level.enemies {
        let Some(definition) = enemy_registry.get(&spawn.enemy_type) else {
            warn!("Unknown enemy type in level {}: {}", level.name, spawn.enemy_type);
            continue;
        };
        let enemy = spawn_enemy(
            commands,
            meshes,
            materials,
            &spawn.enemy_type,
            definition,
            spawn.position(),
            spawn.patrol_to,
        );
        commands.entity(enemy).insert(LevelGeometry);
    }

    let start = level.player_start();
    respawn.0 = start;
    let player = spawn_player(commands, meshes, materials, start);
    commands.entity(player).insert(LevelGeometry);

    info!(
        "Built level {}: {} platforms, {} hazards, {} checkpoints, {} enemies",
        level.name,
        level.platforms.len(),
        level.hazards.len(),
        level.checkpoints.len(),
        level.enemies.len()
    );

    player
}

fn cuboid_mesh(def: &BoxDef) -> Cuboid {
    Cuboid::from_size(def.half_extents() * 2.0)
}

fn cuboid_collider(def: &BoxDef) -> Collider {
    let half = def.half_extents();
    Collider::cuboid(half.x, half.y, half.z)
}

/// Ambient fill plus one key light.
fn setup_environment(commands: &mut Commands) {
    commands.insert_resource(AmbientLight {
        color: Color::srgb(0.6, 0.6, 0.7),
        brightness: 300.0,
    });

    commands.spawn((
        DirectionalLight {
            illuminance: 6000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_rotation(Quat::from_euler(
            EulerRot::XYZ,
            -std::f32::consts::FRAC_PI_3,
            std::f32::consts::FRAC_PI_6,
            0.0,
        )),
        LevelGeometry,
    ));
}
