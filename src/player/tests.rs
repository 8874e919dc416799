//! Tests for the player movement engine and abilities.

use super::*;
use crate::combat::{layers, CameraShake, Vulnerability};
use crate::core::testing::{sim_app, spawn_test_player, step};
use crate::core::{Scheduler, Task, TaskDue};
use bevy::prelude::*;
use bevy_rapier3d::prelude::{ColliderDisabled, CollisionGroups, ExternalImpulse};

const DT: f32 = 1.0 / 64.0;

fn tuning() -> PlayerTuning {
    PlayerTuning::default()
}

fn moving(move_x: f32, run: bool) -> InputFrame {
    InputFrame {
        move_x,
        run_held: run,
        ..default()
    }
}

#[test]
fn test_speed_decays_to_zero_without_input() {
    let tuning = tuning();
    let mut speed = 6.0;
    let mut previous = speed;

    for _ in 0..200 {
        speed = step_speed(speed, false, false, &tuning, DT);
        assert!(speed <= previous);
        assert!(speed >= 0.0);
        previous = speed;
    }

    assert_eq!(speed, 0.0);
}

#[test]
fn test_walk_speed_is_clamped() {
    let tuning = tuning();
    let mut speed = 0.0;

    for _ in 0..500 {
        speed = step_speed(speed, true, false, &tuning, DT);
        assert!(speed <= tuning.walk_speed);
    }

    assert_eq!(speed, tuning.walk_speed);
}

#[test]
fn test_run_speed_is_clamped() {
    let tuning = tuning();
    let mut speed = 0.0;

    for _ in 0..500 {
        speed = step_speed(speed, true, true, &tuning, DT);
        assert!(speed <= tuning.run_speed);
    }

    assert_eq!(speed, tuning.run_speed);
}

#[test]
fn test_releasing_run_slows_back_to_walk() {
    let tuning = tuning();
    let mut speed = tuning.run_speed;

    speed = step_speed(speed, true, false, &tuning, DT);
    assert!(speed < tuning.run_speed);
    assert!(speed > tuning.walk_speed);

    for _ in 0..500 {
        speed = step_speed(speed, true, false, &tuning, DT);
    }
    assert_eq!(speed, tuning.walk_speed);
}

#[test]
fn test_run_needs_horizontal_input() {
    assert!(!is_running(&moving(0.0, true)));
    assert!(is_running(&moving(1.0, true)));
    assert!(!is_running(&moving(-1.0, false)));
}

#[test]
fn test_coasting_keeps_last_direction() {
    let tuning = tuning();
    let mut kinematics = ActorKinematics::default();

    for _ in 0..64 {
        advance(&mut kinematics, &moving(-1.0, false), &tuning, DT);
    }
    assert_eq!(kinematics.last_direction, -1.0);

    let coasting = advance(&mut kinematics, &InputFrame::default(), &tuning, DT);
    assert!(coasting < 0.0);
    assert_eq!(kinematics.last_direction, -1.0);
}

#[test]
fn test_two_jumps_then_third_ignored() {
    let mut kinematics = ActorKinematics::default();
    let mut jump = JumpState::default();

    assert!(try_jump(&kinematics, &mut jump));
    assert!(!jump.double_jumping);
    commit_jump(&mut kinematics, &mut jump);
    assert!(jump.jumping);
    assert_eq!(kinematics.jumps_remaining, 1);

    assert!(try_jump(&kinematics, &mut jump));
    assert!(jump.double_jumping);
    commit_jump(&mut kinematics, &mut jump);
    assert_eq!(kinematics.jumps_remaining, 0);

    assert!(!try_jump(&kinematics, &mut jump));
    assert_eq!(jump.pending, 0);
}

#[test]
fn test_pending_jumps_count_against_availability() {
    let kinematics = ActorKinematics::default();
    let mut jump = JumpState::default();

    // Both presses land before either decrement is committed
    assert!(try_jump(&kinematics, &mut jump));
    assert!(try_jump(&kinematics, &mut jump));
    assert!(!try_jump(&kinematics, &mut jump));

    assert_eq!(jump.pending, 2);
    assert_eq!(jumps_available(&kinematics, &jump), 0);
}

#[test]
fn test_ground_contact_restores_jumps_and_arms_dash() {
    let mut kinematics = ActorKinematics {
        jumps_remaining: 0,
        grounded: false,
        ..default()
    };
    let mut jump = JumpState {
        jumping: true,
        double_jumping: true,
        pending: 0,
    };
    let mut dash = DashState::default();

    apply_ground_contact(true, &mut kinematics, &mut jump, &mut dash);

    assert!(kinematics.grounded);
    assert_eq!(kinematics.jumps_remaining, MAX_JUMPS);
    assert!(!jump.jumping);
    assert!(!jump.double_jumping);
    assert!(dash.armed);
}

#[test]
fn test_airborne_keeps_jump_state() {
    let mut kinematics = ActorKinematics {
        jumps_remaining: 1,
        ..default()
    };
    let mut jump = JumpState {
        jumping: true,
        ..default()
    };
    let mut dash = DashState::default();

    apply_ground_contact(false, &mut kinematics, &mut jump, &mut dash);

    assert!(!kinematics.grounded);
    assert_eq!(kinematics.jumps_remaining, 1);
    assert!(jump.jumping);
    assert!(!dash.armed);
}

#[test]
fn test_landing_mid_dash_does_not_rearm() {
    let mut kinematics = ActorKinematics::default();
    let mut jump = JumpState::default();
    let mut dash = DashState { armed: true, active: false };

    assert!(dash.try_activate());
    apply_ground_contact(true, &mut kinematics, &mut jump, &mut dash);

    assert!(dash.active);
    assert!(!dash.armed);
}

#[test]
fn test_dash_cannot_retrigger_while_active() {
    let mut dash = DashState { armed: true, active: false };

    assert!(dash.try_activate());
    assert!(!dash.try_activate());

    assert!(dash.finish());
    assert!(!dash.finish());
    assert!(!dash.active);
}

#[test]
fn test_dash_direction() {
    assert_eq!(dash_direction(0.0, 1.0), Vec3::new(0.0, 0.7, 0.0));
    assert_eq!(dash_direction(-1.0, 1.0), Vec3::new(0.0, 0.5, 0.5));
    assert_eq!(dash_direction(1.0, 0.0), Vec3::Z);
    assert_eq!(dash_direction(0.0, -1.0), Vec3::Z);
}

#[test]
fn test_dash_direction_follows_facing() {
    let forward = dash_direction(1.0, 0.0);

    assert_eq!(Facing::Right.to_world(forward), Vec3::Z);
    assert_eq!(Facing::Left.to_world(forward), Vec3::NEG_Z);
    assert_eq!(Facing::Left.to_world(dash_direction(0.0, 1.0)), Vec3::new(0.0, 0.7, 0.0));
}

#[test]
fn test_facing_from_input() {
    assert_eq!(Facing::from_input(-0.5), Some(Facing::Left));
    assert_eq!(Facing::from_input(1.0), Some(Facing::Right));
    assert_eq!(Facing::from_input(0.0), None);
    assert_eq!(Facing::toward(5.0, 2.0), Facing::Left);
    assert_eq!(Facing::toward(2.0, 5.0), Facing::Right);
}

#[test]
fn test_freeze_movement_clears_momentum() {
    let mut kinematics = ActorKinematics {
        velocity: 5.0,
        last_direction: 1.0,
        ..default()
    };
    let mut lock = MovementLock::default();
    let mut velocity = bevy_rapier3d::prelude::Velocity::linear(Vec3::new(0.0, -3.0, 6.0));

    freeze_movement(&mut kinematics, &mut lock, &mut velocity);

    assert!(lock.locked);
    assert_eq!(kinematics.velocity, 0.0);
    assert_eq!(kinematics.last_direction, 0.0);
    assert_eq!(velocity.linvel, Vec3::ZERO);
}

#[test]
fn test_snapshot_reports_flags() {
    let kinematics = ActorKinematics {
        velocity: 3.0,
        grounded: false,
        ..default()
    };
    let jump = JumpState {
        jumping: true,
        double_jumping: true,
        pending: 0,
    };
    let dash = DashState { armed: false, active: true };

    let published = snapshot(&kinematics, &jump, &dash, &moving(1.0, false), 0.125);

    assert!(published.walking);
    assert!(!published.grounded);
    assert!(published.jumping && published.double_jumping);
    assert!(published.dashing);
    assert_eq!(published.movement, 1.0);
    assert_eq!(published.velocity, 3.0);
    assert_eq!(published.dash_remaining, 0.125);
}

#[test]
fn test_snapshot_hides_stale_dash_time() {
    let published = snapshot(
        &ActorKinematics::default(),
        &JumpState::default(),
        &DashState::default(),
        &InputFrame::default(),
        0.1,
    );

    assert!(!published.dashing);
    assert_eq!(published.dash_remaining, 0.0);
}

#[test]
fn test_shipped_tuning_parses() {
    let tuning: PlayerTuning = crate::core::load_ron(PlayerTuning::PATH).unwrap();
    assert!(tuning.run_speed > tuning.walk_speed);
    assert!(tuning.dash_time > 0.0);
    assert!(tuning.gravity().y < 0.0);
}

fn press_jump(app: &mut App) {
    app.world_mut().resource_mut::<InputFrame>().jump_pressed = true;
}

fn jump_counts(app: &App, player: Entity) -> (u8, u8) {
    let kinematics = app.world().get::<ActorKinematics>(player).unwrap();
    let jump = app.world().get::<JumpState>(player).unwrap();
    (kinematics.jumps_remaining, jump.pending)
}

#[test]
fn test_jump_decrement_lands_one_step_after_launch() {
    let mut app = sim_app();
    let (player, _) = spawn_test_player(&mut app);
    let jump_force = app.world().resource::<PlayerTuning>().jump_force;

    press_jump(&mut app);
    step(&mut app);

    assert_eq!(jump_counts(&app, player), (2, 1));
    assert!(!app.world().get::<JumpState>(player).unwrap().jumping);
    assert_eq!(
        app.world().get::<ExternalImpulse>(player).unwrap().impulse,
        Vec3::Y * jump_force
    );
    assert!(!app.world().resource::<InputFrame>().jump_pressed);

    step(&mut app);

    assert_eq!(jump_counts(&app, player), (1, 0));
    let jump = app.world().get::<JumpState>(player).unwrap();
    assert!(jump.jumping);
    assert!(!jump.double_jumping);
}

#[test]
fn test_third_jump_press_is_ignored_in_the_air() {
    let mut app = sim_app();
    let (player, _) = spawn_test_player(&mut app);

    press_jump(&mut app);
    step(&mut app);
    step(&mut app);
    press_jump(&mut app);
    step(&mut app);
    step(&mut app);

    assert_eq!(jump_counts(&app, player), (0, 0));
    assert!(app.world().get::<JumpState>(player).unwrap().double_jumping);

    press_jump(&mut app);
    step(&mut app);

    assert_eq!(jump_counts(&app, player), (0, 0));
    assert!(!app.world().resource::<Scheduler>().is_pending(player, Task::ConsumeJump));
}

fn hazards_enabled(app: &App, player: Entity) -> bool {
    app.world()
        .get::<CollisionGroups>(player)
        .unwrap()
        .filters
        .contains(layers::HAZARD)
}

#[test]
fn test_dash_restores_every_rule_after_dash_time() {
    let mut app = sim_app();
    let (player, volume) = spawn_test_player(&mut app);
    let dash_force = app.world().resource::<PlayerTuning>().dash_force;

    app.world_mut().resource_mut::<InputFrame>().dash_pressed = true;
    step(&mut app);

    let dash = app.world().get::<DashState>(player).unwrap();
    assert!(dash.active && !dash.armed);
    assert!(!app.world().get::<Vulnerability>(player).unwrap().is_vulnerable());
    assert!(!hazards_enabled(&app, player));
    assert!(app.world().get::<ColliderDisabled>(volume).is_none());
    assert!(app.world().resource::<CameraShake>().is_active());
    assert_eq!(
        app.world().get::<ExternalImpulse>(player).unwrap().impulse,
        Vec3::Z * dash_force
    );
    assert_eq!(
        app.world().resource::<Scheduler>().remaining(player, Task::EndDash),
        Some(0.25)
    );

    // A second press mid-dash changes nothing
    app.world_mut().resource_mut::<InputFrame>().dash_pressed = true;

    // 0.25 s is 16 steps at 64 Hz
    for _ in 0..15 {
        step(&mut app);
        assert!(app.world().get::<DashState>(player).unwrap().active);
    }
    assert_eq!(app.world().resource::<Scheduler>().pending_count(), 1);

    step(&mut app);

    assert!(!app.world().get::<DashState>(player).unwrap().active);
    assert!(app.world().get::<Vulnerability>(player).unwrap().is_vulnerable());
    assert!(hazards_enabled(&app, player));
    assert!(app.world().get::<ColliderDisabled>(volume).is_some());
    assert!(!app.world().resource::<CameraShake>().is_active());
}

#[test]
fn test_repeated_dash_end_is_ignored() {
    let mut app = sim_app();
    let (player, volume) = spawn_test_player(&mut app);

    app.world_mut().resource_mut::<InputFrame>().dash_pressed = true;
    step(&mut app);
    for _ in 0..16 {
        step(&mut app);
    }
    assert!(!app.world().get::<DashState>(player).unwrap().active);

    // Reopen what a second restore would close
    app.world_mut().entity_mut(volume).remove::<ColliderDisabled>();
    app.world_mut().resource_mut::<CameraShake>().set(1.0, 1.0);
    app.world_mut().send_event(TaskDue {
        owner: player,
        task: Task::EndDash,
    });
    step(&mut app);

    assert!(app.world().get::<ColliderDisabled>(volume).is_none());
    assert!(app.world().resource::<CameraShake>().is_active());
}
