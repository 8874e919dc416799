//! Presentation read-model for the animator.

use bevy::prelude::*;

use super::components::*;
use crate::core::{Scheduler, Task};

/// Build the snapshot the animator reads this frame.
pub fn snapshot(
    kinematics: &ActorKinematics,
    jump: &JumpState,
    dash: &DashState,
    input: &InputFrame,
    dash_remaining: f32,
) -> PlayerSnapshot {
    PlayerSnapshot {
        walking: input.is_moving(),
        grounded: kinematics.grounded,
        jumping: jump.jumping,
        double_jumping: jump.double_jumping,
        dashing: dash.active,
        attacking: input.attack_pressed,
        movement: input.move_x,
        velocity: kinematics.velocity,
        dash_remaining: if dash.active { dash_remaining } else { 0.0 },
    }
}

/// Publish the player's presentation state. Runs on the presentation step.
pub fn publish_snapshot(
    input: Res<InputFrame>,
    scheduler: Res<Scheduler>,
    mut player_query: Query<
        (Entity, &ActorKinematics, &JumpState, &DashState, &MovementLock, &mut PlayerSnapshot),
        With<Player>,
    >,
) {
    for (entity, kinematics, jump, dash, lock, mut published) in player_query.iter_mut() {
        let idle = InputFrame::default();
        let input = if lock.locked { &idle } else { &*input };
        let dash_remaining = scheduler.remaining(entity, Task::EndDash).unwrap_or(0.0);
        published.set_if_neq(snapshot(kinematics, jump, dash, input, dash_remaining));
    }
}
