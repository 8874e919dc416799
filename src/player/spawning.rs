//! Player entity construction.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use super::components::*;
use crate::combat::{layers, player_collision_groups, Vulnerability};
use crate::core::SimActor;

const PLAYER_HALF_HEIGHT: f32 = 0.5;
const PLAYER_RADIUS: f32 = 0.3;
const DASH_VOLUME_RADIUS: f32 = 0.9;

/// Distance from the player's origin down to the bottom of its capsule.
pub const PLAYER_FOOT_OFFSET: f32 = PLAYER_HALF_HEIGHT + PLAYER_RADIUS;

/// Spawn the player body and its dash hit-volume.
pub fn spawn_player(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    position: Vec3,
) -> Entity {
    let player = commands
        .spawn((
            (
                Player,
                SimActor,
                ActorKinematics::default(),
                JumpState::default(),
                DashState::default(),
                Vulnerability::default(),
                MovementLock::default(),
                PlayerSnapshot::default(),
            ),
            Mesh3d(meshes.add(Capsule3d::new(PLAYER_RADIUS, PLAYER_HALF_HEIGHT * 2.0))),
            MeshMaterial3d(materials.add(Color::srgb(0.85, 0.75, 0.55))),
            Transform::from_translation(position),
            // Rapier physics components
            RigidBody::Dynamic,
            Collider::capsule_y(PLAYER_HALF_HEIGHT, PLAYER_RADIUS),
            // Impulses are tuned against a unit mass
            ColliderMassProperties::Mass(1.0),
            // Movement happens in the Y/Z plane; X is the camera axis
            LockedAxes::ROTATION_LOCKED | LockedAxes::TRANSLATION_LOCKED_X,
            Velocity::zero(),
            ExternalImpulse::default(),
            Friction::coefficient(0.0),
            player_collision_groups(true),
            ActiveEvents::COLLISION_EVENTS,
        ))
        .id();

    let dash_volume = commands
        .spawn((
            DashHitVolume { owner: player },
            Transform::default(),
            Collider::ball(DASH_VOLUME_RADIUS),
            Sensor,
            ColliderMassProperties::Density(0.0),
            ColliderDisabled,
            CollisionGroups::new(layers::TRIGGER, layers::ENEMY),
            ActiveEvents::COLLISION_EVENTS,
        ))
        .id();

    commands
        .entity(player)
        .add_child(dash_volume)
        .insert(DashVolumeLink(dash_volume));

    info!("Spawned player at {:?}", position);

    player
}
