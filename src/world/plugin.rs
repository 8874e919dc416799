//! World plugin - level loading, physics setup, and the camera.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use crate::core::GameState;
use crate::enemies::EnemyRegistry;
use crate::player::{PlayerTuning, RespawnPoint};

use super::builder::{build_level_from_data, LevelGeometry};
use super::camera::{follow_player, spawn_camera};
use super::data::{load_level_definitions, CurrentLevel, LevelRegistry};

/// World plugin - handles level loading and world setup.
pub struct WorldPlugin;

impl Plugin for WorldPlugin {
    fn build(&self, app: &mut App) {
        app
            .init_resource::<LevelRegistry>()
            .init_resource::<CurrentLevel>()
            .add_systems(Startup, load_level_definitions)
            // Built once when loading ends, so leaving the pause menu keeps the level
            .add_systems(OnExit(GameState::Loading), (configure_physics, setup_level))
            .add_systems(OnEnter(GameState::Paused), pause_physics)
            .add_systems(OnExit(GameState::Paused), resume_physics)
            .add_systems(Update, follow_player.run_if(in_state(GameState::InGame)));
    }
}

/// Set up the level from data.
fn setup_level(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut respawn: ResMut<RespawnPoint>,
    level_registry: Res<LevelRegistry>,
    current_level: Res<CurrentLevel>,
    enemy_registry: Res<EnemyRegistry>,
    existing: Query<Entity, With<LevelGeometry>>,
) {
    for entity in existing.iter() {
        commands.entity(entity).despawn_recursive();
    }

    let Some(level) = level_registry.get(&current_level.name) else {
        error!("Level '{}' not found in registry!", current_level.name);
        return;
    };

    info!("Building level: {}", level.name);

    build_level_from_data(
        &mut commands,
        &mut meshes,
        &mut materials,
        level,
        &enemy_registry,
        &mut respawn,
    );

    spawn_camera(&mut commands, level.player_start());
}

/// Apply tuned gravity to the physics world.
fn configure_physics(tuning: Res<PlayerTuning>, mut config_query: Query<&mut RapierConfiguration>) {
    for mut config in config_query.iter_mut() {
        config.gravity = tuning.gravity();
    }
}

fn pause_physics(mut config_query: Query<&mut RapierConfiguration>) {
    for mut config in config_query.iter_mut() {
        config.physics_pipeline_active = false;
    }
}

fn resume_physics(mut config_query: Query<&mut RapierConfiguration>) {
    for mut config in config_query.iter_mut() {
        config.physics_pipeline_active = true;
    }
}
