//! Side-on locomotion: speed ramps, coasting, facing and the ground probe.
//!
//! The player moves along the world depth axis (Z). Forward speed is a
//! scalar ramped by acceleration/deceleration; direction comes from the
//! horizontal input, or the last input while coasting to a stop.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use super::components::*;
use super::spawning::PLAYER_FOOT_OFFSET;

const PROBE_SKIN: f32 = 0.05;

/// Advance the forward speed by one tick.
///
/// Speed rises toward `run_speed` or `walk_speed` while moving and falls
/// toward zero without input. Both caps are hard clamps.
pub fn step_speed(speed: f32, moving: bool, running: bool, tuning: &PlayerTuning, dt: f32) -> f32 {
    if !moving {
        return (speed - tuning.deceleration * dt).max(0.0);
    }

    if running {
        return (speed + tuning.acceleration * dt).min(tuning.run_speed);
    }

    if speed <= tuning.walk_speed {
        (speed + tuning.acceleration * dt).min(tuning.walk_speed)
    } else {
        speed - tuning.deceleration * dt
    }
}

/// Run only counts while there is horizontal input.
pub fn is_running(input: &InputFrame) -> bool {
    input.run_held && input.is_moving()
}

/// Apply one locomotion tick to the kinematic state and return the
/// depth-axis velocity to write to the body.
pub fn advance(kinematics: &mut ActorKinematics, input: &InputFrame, tuning: &PlayerTuning, dt: f32) -> f32 {
    let moving = input.is_moving();
    kinematics.velocity = step_speed(kinematics.velocity, moving, is_running(input), tuning, dt);

    if moving {
        kinematics.last_direction = input.move_x;
    }

    kinematics.last_direction * tuning.speed_multiplier * kinematics.velocity
}

/// Record the ground probe result. Landing restores both jumps and arms the dash.
pub fn apply_ground_contact(
    grounded: bool,
    kinematics: &mut ActorKinematics,
    jump: &mut JumpState,
    dash: &mut DashState,
) {
    kinematics.grounded = grounded;

    if grounded {
        kinematics.jumps_remaining = MAX_JUMPS;
        jump.jumping = false;
        jump.double_jumping = false;
        dash.armed = !dash.active;
    }
}

/// Probe for ground directly below the player's origin.
pub fn ground_check(
    tuning: Res<PlayerTuning>,
    rapier_context: Query<&RapierContext>,
    mut player_query: Query<
        (Entity, &Transform, &mut ActorKinematics, &mut JumpState, &mut DashState),
        With<Player>,
    >,
) {
    let Ok(context) = rapier_context.get_single() else {
        return;
    };

    for (entity, transform, mut kinematics, mut jump, mut dash) in player_query.iter_mut() {
        // Start just inside the capsule bottom so the probe length stays the tuned distance
        let ray_origin = transform.translation - Vec3::Y * (PLAYER_FOOT_OFFSET - PROBE_SKIN);
        let grounded = context
            .cast_ray(
                ray_origin,
                Vec3::NEG_Y,
                tuning.ground_probe_distance + PROBE_SKIN,
                true,
                QueryFilter::default().exclude_rigid_body(entity).exclude_sensors(),
            )
            .is_some();

        apply_ground_contact(grounded, &mut kinematics, &mut jump, &mut dash);
    }
}

/// Fixed-step velocity law. Bypassed entirely while dashing or locked.
pub fn apply_locomotion(
    time: Res<Time>,
    input: Res<InputFrame>,
    tuning: Res<PlayerTuning>,
    mut player_query: Query<
        (&mut ActorKinematics, &DashState, &MovementLock, &mut Velocity),
        With<Player>,
    >,
) {
    let dt = time.delta_secs();

    for (mut kinematics, dash, lock, mut velocity) in player_query.iter_mut() {
        if dash.active || lock.locked {
            continue;
        }

        velocity.linvel.z = advance(&mut kinematics, &input, &tuning, dt);
    }
}

/// Snap the player to face the horizontal input. Runs on the presentation step.
pub fn snap_facing(
    input: Res<InputFrame>,
    mut player_query: Query<(&mut Transform, &mut ActorKinematics, &MovementLock), With<Player>>,
) {
    let Some(facing) = Facing::from_input(input.move_x) else {
        return;
    };

    for (mut transform, mut kinematics, lock) in player_query.iter_mut() {
        if lock.locked {
            continue;
        }
        kinematics.facing = facing;
        transform.rotation = facing.rotation();
    }
}
