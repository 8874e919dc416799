//! Core plugin that sets up game states, events, and the fixed-step ordering.

use bevy::prelude::*;

use super::events::*;
use super::schedule::{advance_scheduler, Scheduler, TaskDue};
use super::states::*;

/// Fixed-step ordering shared by every simulation module.
///
/// Runs in `FixedUpdate`, chained in this order, only while `InGame`.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum SimSet {
    /// Ground probes and other physics queries
    Probe,
    /// Scheduler advance
    Timers,
    /// Handlers for continuations that came due
    Continuations,
    /// Player velocity law
    Locomotion,
    /// Jump and dash activation
    Abilities,
    /// Enemy perception, combat decisions and movement
    Ai,
    /// Damage application and trigger volumes
    Damage,
}

/// Marker for every simulated actor. Removing it (or despawning the entity)
/// drops the actor's pending continuations.
#[derive(Component, Debug, Default)]
pub struct SimActor;

/// Core plugin - must be added first as other plugins depend on it.
///
/// This plugin sets up:
/// - Game states (Loading, InGame, Paused)
/// - Global events (DamageEvent, notifications, animation signals)
/// - The continuation scheduler and the `SimSet` ordering
pub struct CorePlugin;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        app
            .init_state::<GameState>()
            .init_resource::<Scheduler>()

            .add_event::<DamageEvent>()
            .add_event::<PlayerDamagedEvent>()
            .add_event::<PlayerDeathEvent>()
            .add_event::<CheckpointSetEvent>()
            .add_event::<AnimationSignal>()
            .add_event::<TaskDue>()

            .configure_sets(
                FixedUpdate,
                (
                    SimSet::Probe,
                    SimSet::Timers,
                    SimSet::Continuations,
                    SimSet::Locomotion,
                    SimSet::Abilities,
                    SimSet::Ai,
                    SimSet::Damage,
                )
                    .chain()
                    .run_if(in_state(GameState::InGame)),
            )
            .add_systems(FixedUpdate, advance_scheduler.in_set(SimSet::Timers))
            .add_systems(Last, drop_orphaned_continuations)

            // Data is read synchronously at startup, so go straight in
            .add_systems(OnEnter(GameState::Loading), transition_to_game)
            .add_systems(
                Update,
                handle_pause_input.run_if(in_state(GameState::InGame).or(in_state(GameState::Paused))),
            );
    }
}

fn transition_to_game(mut next_state: ResMut<NextState<GameState>>) {
    next_state.set(GameState::InGame);
}

/// Handle Escape key to pause/unpause the game.
fn handle_pause_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    current_state: Res<State<GameState>>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    if keyboard.just_pressed(KeyCode::Escape) {
        match current_state.get() {
            GameState::InGame => next_state.set(GameState::Paused),
            GameState::Paused => next_state.set(GameState::InGame),
            GameState::Loading => {}
        }
    }
}

/// Drop continuations that reference actors removed from the simulation.
fn drop_orphaned_continuations(
    mut removed: RemovedComponents<SimActor>,
    mut scheduler: ResMut<Scheduler>,
) {
    for entity in removed.read() {
        let dropped = scheduler.cancel_owner(entity);
        if dropped > 0 {
            debug!("Dropped {} pending continuations for removed actor {:?}", dropped, entity);
        }
    }
}
