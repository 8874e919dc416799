//! Swing timeline.
//!
//! Stands in for the attack animation's timeline events: every `Attack`
//! signal opens the enemy's hit-volume at `swing.active_start` and closes it
//! at `swing.active_end`.

use bevy::prelude::*;

use super::components::{Enemy, EnemyType, HitVolumeTrigger};
use super::data::EnemyRegistry;
use crate::core::{AnimationSignal, Scheduler, Signal, Task, TaskDue, Wait};

/// Schedule the active-damage window of each swing that starts.
pub fn schedule_swing_window(
    mut signals: EventReader<AnimationSignal>,
    mut scheduler: ResMut<Scheduler>,
    registry: Res<EnemyRegistry>,
    enemy_query: Query<&EnemyType, With<Enemy>>,
) {
    for event in signals.read() {
        if event.signal != Signal::Attack {
            continue;
        }
        let Ok(enemy_type) = enemy_query.get(event.entity) else {
            continue;
        };

        let swing = registry.swing(&enemy_type.0);
        scheduler.schedule(event.entity, Task::HitVolumeOn, Wait::Seconds(swing.active_start));
        scheduler.schedule(event.entity, Task::HitVolumeOff, Wait::Seconds(swing.active_end));
    }
}

/// Fire the hit-volume triggers when a swing window opens or closes.
pub fn run_swing_window(
    mut due_events: EventReader<TaskDue>,
    mut triggers: EventWriter<HitVolumeTrigger>,
) {
    for due in due_events.read() {
        let enabled = match due.task {
            Task::HitVolumeOn => true,
            Task::HitVolumeOff => false,
            _ => continue,
        };
        triggers.send(HitVolumeTrigger {
            enemy: due.owner,
            enabled,
        });
    }
}
