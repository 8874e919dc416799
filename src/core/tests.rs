//! Tests for the continuation scheduler and data loading.

use super::*;
use bevy::prelude::Entity;
use serde::Deserialize;
use std::fs;
use std::time::Duration;

// One 64 Hz fixed step
const DT: Duration = Duration::from_micros(15_625);

fn actor(index: u32) -> Entity {
    Entity::from_raw(index)
}

/// Advance until `task` for `owner` comes due. Returns the step count.
fn steps_until(scheduler: &mut Scheduler, owner: Entity, task: Task, limit: u32) -> Option<u32> {
    for step in 1..=limit {
        let due = scheduler.advance(DT);
        if due.contains(&TaskDue { owner, task }) {
            return Some(step);
        }
    }
    None
}

#[test]
fn test_scheduler_starts_empty() {
    let scheduler = Scheduler::default();
    assert_eq!(scheduler.pending_count(), 0);
    assert_eq!(scheduler.steps(), 0);
}

#[test]
fn test_seconds_wait_fires_on_the_exact_step() {
    let mut scheduler = Scheduler::default();
    let enemy = actor(1);

    scheduler.schedule(enemy, Task::Despawn, Wait::Seconds(2.0));

    // 2 s at 64 Hz
    assert_eq!(steps_until(&mut scheduler, enemy, Task::Despawn, 500), Some(128));
    assert_eq!(scheduler.pending_count(), 0);
}

#[test]
fn test_fixed_steps_wait() {
    let mut scheduler = Scheduler::default();
    let player = actor(1);

    scheduler.schedule(player, Task::ConsumeJump, Wait::FixedSteps(1));
    assert!(scheduler.is_pending(player, Task::ConsumeJump));

    let due = scheduler.advance(DT);
    assert_eq!(due, vec![TaskDue { owner: player, task: Task::ConsumeJump }]);
}

#[test]
fn test_zero_fixed_steps_still_waits_one_step() {
    let mut scheduler = Scheduler::default();
    let player = actor(1);

    scheduler.schedule(player, Task::ConsumeJump, Wait::FixedSteps(0));

    assert!(scheduler.is_pending(player, Task::ConsumeJump));
    assert_eq!(scheduler.advance(DT).len(), 1);
}

#[test]
fn test_due_tasks_keep_schedule_order() {
    let mut scheduler = Scheduler::default();
    let enemy = actor(1);

    scheduler.schedule(enemy, Task::HitVolumeOff, Wait::FixedSteps(2));
    scheduler.schedule(enemy, Task::HitVolumeOn, Wait::FixedSteps(2));
    scheduler.schedule(enemy, Task::AttackCooldown, Wait::FixedSteps(1));

    assert_eq!(
        scheduler.advance(DT),
        vec![TaskDue { owner: enemy, task: Task::AttackCooldown }]
    );
    assert_eq!(
        scheduler.advance(DT),
        vec![
            TaskDue { owner: enemy, task: Task::HitVolumeOff },
            TaskDue { owner: enemy, task: Task::HitVolumeOn },
        ]
    );
}

#[test]
fn test_reschedule_replaces_pending_window() {
    let mut scheduler = Scheduler::default();
    let player = actor(1);

    scheduler.schedule(player, Task::EndInvulnerability, Wait::Seconds(1.0));
    for _ in 0..32 {
        scheduler.advance(DT);
    }
    scheduler.reschedule(player, Task::EndInvulnerability, Wait::Seconds(1.0));

    assert_eq!(scheduler.pending_count(), 1);
    let remaining = scheduler.remaining(player, Task::EndInvulnerability).unwrap();
    assert!((remaining - 1.0).abs() < 1e-4, "remaining = {}", remaining);

    // Fires a full second after the restart, not after the first schedule
    assert_eq!(steps_until(&mut scheduler, player, Task::EndInvulnerability, 200), Some(64));
}

#[test]
fn test_cancel_only_touches_matching_task() {
    let mut scheduler = Scheduler::default();
    let enemy = actor(1);

    scheduler.schedule(enemy, Task::AttackWindup, Wait::Seconds(0.5));
    scheduler.schedule(enemy, Task::EndHitReaction, Wait::Seconds(0.4));

    assert_eq!(scheduler.cancel(enemy, Task::AttackWindup), 1);
    assert!(!scheduler.is_pending(enemy, Task::AttackWindup));
    assert!(scheduler.is_pending(enemy, Task::EndHitReaction));
}

#[test]
fn test_cancel_owner_drops_every_task_of_removed_actor() {
    let mut scheduler = Scheduler::default();
    let removed = actor(1);
    let survivor = actor(2);

    scheduler.schedule(removed, Task::AttackWindup, Wait::Seconds(0.5));
    scheduler.schedule(removed, Task::Despawn, Wait::Seconds(2.0));
    scheduler.schedule(survivor, Task::EndDash, Wait::Seconds(0.25));

    assert_eq!(scheduler.cancel_owner(removed), 2);
    assert_eq!(scheduler.pending_count(), 1);

    let fired: Vec<TaskDue> = (0..200).flat_map(|_| scheduler.advance(DT)).collect();
    assert_eq!(fired, vec![TaskDue { owner: survivor, task: Task::EndDash }]);
}

#[test]
fn test_remaining_counts_down_with_each_step() {
    let mut scheduler = Scheduler::default();
    let player = actor(1);

    scheduler.schedule(player, Task::EndDash, Wait::Seconds(0.25));
    for _ in 0..8 {
        scheduler.advance(DT);
    }

    assert_eq!(scheduler.remaining(player, Task::EndDash), Some(0.125));
}

#[test]
fn test_zero_second_wait_fires_next_step() {
    let mut scheduler = Scheduler::default();
    let enemy = actor(1);

    scheduler.schedule(enemy, Task::HitVolumeOn, Wait::Seconds(0.0));

    assert_eq!(scheduler.advance(DT), vec![TaskDue { owner: enemy, task: Task::HitVolumeOn }]);
}

#[test]
fn test_remaining_is_none_for_step_waits() {
    let mut scheduler = Scheduler::default();
    let player = actor(1);

    scheduler.schedule(player, Task::ConsumeJump, Wait::FixedSteps(3));

    assert_eq!(scheduler.remaining(player, Task::ConsumeJump), None);
    assert_eq!(scheduler.remaining(player, Task::EndDash), None);
}

#[derive(Debug, Deserialize, PartialEq)]
struct Sample {
    name: String,
    value: f32,
}

#[test]
fn test_load_ron_missing_file() {
    let result = load_ron::<Sample>("assets/data/does_not_exist.ron");
    assert!(matches!(result, Err(DataLoadError::FileNotFound(_))));
}

#[test]
fn test_load_ron_parses_and_reports_errors() {
    let dir = std::env::temp_dir().join(format!("emberfall-load-ron-{}", std::process::id()));
    fs::create_dir_all(&dir).unwrap();

    let good = dir.join("good.ron");
    fs::write(&good, "(name: \"sample\", value: 2.5)").unwrap();
    let parsed: Sample = load_ron(&good).unwrap();
    assert_eq!(parsed, Sample { name: "sample".to_string(), value: 2.5 });

    let bad = dir.join("bad.ron");
    fs::write(&bad, "(name: \"sample\", value: )").unwrap();
    let err = load_ron::<Sample>(&bad).unwrap_err();
    assert!(matches!(err, DataLoadError::ParseError { .. }));
    assert!(err.to_string().contains("bad.ron"));

    fs::remove_dir_all(&dir).unwrap();
}
