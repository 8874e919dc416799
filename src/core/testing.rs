//! Headless app for driving the fixed simulation step in tests.
//!
//! Time is advanced by hand, one 64 Hz step per call, so step counts are
//! exact.

use bevy::prelude::*;
use bevy::state::app::StatesPlugin;
use bevy_rapier3d::prelude::*;
use std::time::Duration;

use super::{CorePlugin, GameState, SimActor};
use crate::combat::{player_collision_groups, CombatPlugin, Vulnerability};
use crate::enemies::EnemyPlugin;
use crate::player::{
    ActorKinematics, DashState, DashVolumeLink, JumpState, MovementLock, Player, PlayerPlugin,
};

/// One 64 Hz fixed step.
pub(crate) const FIXED_DT: Duration = Duration::from_micros(15_625);

/// Simulation plugins on top of `MinimalPlugins`, already in `InGame`.
pub(crate) fn sim_app() -> App {
    let mut app = App::new();
    app.add_plugins((MinimalPlugins, StatesPlugin))
        .add_event::<CollisionEvent>()
        .add_plugins((CorePlugin, PlayerPlugin, CombatPlugin, EnemyPlugin));
    app.world_mut().insert_resource(State::new(GameState::InGame));
    app
}

/// Run one fixed step.
pub(crate) fn step(app: &mut App) {
    app.world_mut().resource_mut::<Time>().advance_by(FIXED_DT);
    app.world_mut().run_schedule(FixedUpdate);
}

pub(crate) fn step_n(app: &mut App, steps: u32) {
    for _ in 0..steps {
        step(app);
    }
}

/// Every `E` sent so far.
pub(crate) fn sent<E: Event + Clone>(app: &App) -> Vec<E> {
    app.world()
        .resource::<Events<E>>()
        .iter_current_update_events()
        .cloned()
        .collect()
}

/// Player body without mesh or collider, standing at the origin with the
/// dash armed. Returns the player and its dash volume.
pub(crate) fn spawn_test_player(app: &mut App) -> (Entity, Entity) {
    let world = app.world_mut();
    let volume = world.spawn((Transform::default(), ColliderDisabled)).id();
    let player = world
        .spawn((
            (
                Player,
                SimActor,
                ActorKinematics::default(),
                JumpState::default(),
                DashState {
                    armed: true,
                    active: false,
                },
                Vulnerability::default(),
                MovementLock::default(),
                DashVolumeLink(volume),
            ),
            Transform::default(),
            GlobalTransform::default(),
            Velocity::zero(),
            ExternalImpulse::default(),
            player_collision_groups(true),
        ))
        .id();
    (player, volume)
}
