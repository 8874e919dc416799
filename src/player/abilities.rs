//! Timed abilities: double jump and dash.
//!
//! Both abilities apply an instantaneous impulse and finish through a
//! scheduled continuation. The jump decrement waits one physics step so the
//! ground probe of the launch step cannot undo it; the dash ends after
//! `dash_time` and restores every rule it suspended.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use super::components::*;
use crate::combat::{player_collision_groups, CameraShake, Vulnerability};
use crate::core::{Scheduler, SimActor, Task, TaskDue, Wait};

/// Camera noise while dashing.
const DASH_SHAKE: (f32, f32) = (3.0, 1.0);

/// Jumps that can still be started this tick.
pub fn jumps_available(kinematics: &ActorKinematics, jump: &JumpState) -> u8 {
    kinematics.jumps_remaining.saturating_sub(jump.pending)
}

/// Start a jump if one is available.
///
/// Marks the double jump when this is the last available jump and reserves
/// the decrement, which `commit_jump` applies after the next physics step.
pub fn try_jump(kinematics: &ActorKinematics, jump: &mut JumpState) -> bool {
    let available = jumps_available(kinematics, jump);
    if available == 0 {
        return false;
    }
    if available == 1 {
        jump.double_jumping = true;
    }
    jump.pending += 1;
    true
}

/// Deferred half of a jump: consume the jump and raise the jumping flag.
pub fn commit_jump(kinematics: &mut ActorKinematics, jump: &mut JumpState) {
    jump.pending = jump.pending.saturating_sub(1);
    kinematics.jumps_remaining = kinematics.jumps_remaining.saturating_sub(1);
    jump.jumping = true;
}

/// Local-frame dash direction (+Z forward, +Y up) from the movement input.
pub fn dash_direction(move_x: f32, move_y: f32) -> Vec3 {
    if move_y > 0.0 && move_x != 0.0 {
        Vec3::new(0.0, (move_y * 0.5).abs(), (move_x * 0.5).abs())
    } else if move_y > 0.0 {
        Vec3::new(0.0, move_y * 0.7, 0.0)
    } else {
        Vec3::Z
    }
}

impl DashState {
    /// Activate if armed and idle. Re-triggering an active dash is a no-op.
    pub fn try_activate(&mut self) -> bool {
        if !self.armed || self.active {
            return false;
        }
        self.armed = false;
        self.active = true;
        true
    }

    /// Deactivate. Returns false if no dash was active.
    pub fn finish(&mut self) -> bool {
        if !self.active {
            return false;
        }
        self.active = false;
        true
    }
}

fn reset_forces(velocity: &mut Velocity) {
    velocity.linvel = Vec3::ZERO;
    velocity.angvel = Vec3::ZERO;
}

/// Handle the jump press on the fixed step.
pub fn apply_jump(
    input: Res<InputFrame>,
    tuning: Res<PlayerTuning>,
    mut scheduler: ResMut<Scheduler>,
    mut player_query: Query<
        (Entity, &Transform, &ActorKinematics, &mut JumpState, &MovementLock, &mut Velocity, &mut ExternalImpulse),
        With<Player>,
    >,
) {
    if !input.jump_pressed {
        return;
    }

    for (entity, transform, kinematics, mut jump, lock, mut velocity, mut impulse) in player_query.iter_mut() {
        if lock.locked || !try_jump(kinematics, &mut jump) {
            continue;
        }

        reset_forces(&mut velocity);
        impulse.impulse = transform.up().as_vec3() * tuning.jump_force;
        scheduler.schedule(entity, Task::ConsumeJump, Wait::FixedSteps(1));

        debug!(
            "Jump: {} available before, double jump = {}",
            jumps_available(kinematics, &jump) + 1,
            jump.double_jumping
        );
    }
}

/// Handle the dash press on the fixed step.
pub fn apply_dash(
    mut commands: Commands,
    input: Res<InputFrame>,
    tuning: Res<PlayerTuning>,
    mut scheduler: ResMut<Scheduler>,
    mut shake: ResMut<CameraShake>,
    mut player_query: Query<
        (
            Entity,
            &ActorKinematics,
            &mut DashState,
            &mut Vulnerability,
            &MovementLock,
            &DashVolumeLink,
            &mut Velocity,
            &mut ExternalImpulse,
        ),
        With<Player>,
    >,
) {
    if !input.dash_pressed {
        return;
    }

    for (entity, kinematics, mut dash, mut vulnerability, lock, volume, mut velocity, mut impulse) in
        player_query.iter_mut()
    {
        if lock.locked || !dash.try_activate() {
            continue;
        }

        commands.entity(entity).insert(player_collision_groups(false));
        vulnerability.set_dashing(true);
        commands.entity(volume.0).remove::<ColliderDisabled>();
        reset_forces(&mut velocity);
        shake.set(DASH_SHAKE.0, DASH_SHAKE.1);

        let local = dash_direction(input.move_x, input.move_y);
        impulse.impulse = kinematics.facing.to_world(local) * tuning.dash_force;
        scheduler.schedule(entity, Task::EndDash, Wait::Seconds(tuning.dash_time));

        debug!("Dash: direction {:?}, facing {:?}", local, kinematics.facing);
    }
}

/// Run the player's due continuations.
pub fn handle_player_continuations(
    mut commands: Commands,
    mut due_events: EventReader<TaskDue>,
    mut shake: ResMut<CameraShake>,
    mut player_query: Query<
        (
            &mut ActorKinematics,
            &mut JumpState,
            &mut DashState,
            &mut Vulnerability,
            &mut MovementLock,
            &DashVolumeLink,
            &mut Velocity,
        ),
        (With<Player>, With<SimActor>),
    >,
) {
    for due in due_events.read() {
        let Ok((mut kinematics, mut jump, mut dash, mut vulnerability, mut lock, volume, mut velocity)) =
            player_query.get_mut(due.owner)
        else {
            continue;
        };

        match due.task {
            Task::ConsumeJump => commit_jump(&mut kinematics, &mut jump),
            Task::EndDash => {
                if !dash.finish() {
                    continue;
                }
                commands.entity(due.owner).insert(player_collision_groups(true));
                vulnerability.set_dashing(false);
                commands.entity(volume.0).insert(ColliderDisabled);
                shake.set(0.0, 0.0);
                reset_forces(&mut velocity);
                debug!("Dash finished");
            }
            Task::EndInvulnerability => vulnerability.set_vulnerable(true),
            Task::EndMovementLock => lock.locked = false,
            _ => {}
        }
    }
}
