//! Continuation scheduler.
//!
//! Every "wait, then act" sequence in the simulation is a single-shot
//! continuation registered here. The scheduler is advanced once per fixed
//! step and hands due continuations back as `TaskDue` events; the owning
//! module's handler performs the action.

use bevy::prelude::*;
use std::time::Duration;

/// Work that runs when a continuation comes due.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Task {
    /// Apply a jump decrement after the physics step that launched it.
    ConsumeJump,
    /// Finish a dash and restore collision/vulnerability.
    EndDash,
    /// Close an invulnerability window.
    EndInvulnerability,
    /// Release the input lock after a respawn.
    EndMovementLock,
    /// Enemy windup finished, fire the attack.
    AttackWindup,
    /// Enemy cooldown finished, allow the next attack.
    AttackCooldown,
    /// Enemy hit reaction finished.
    EndHitReaction,
    /// Swing timeline: open the enemy hit volume.
    HitVolumeOn,
    /// Swing timeline: close the enemy hit volume.
    HitVolumeOff,
    /// Remove the actor from the simulation.
    Despawn,
}

/// How long a continuation waits before it runs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Wait {
    /// Simulated seconds.
    Seconds(f32),
    /// Fixed simulation steps.
    FixedSteps(u32),
}

/// A continuation that came due this step.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskDue {
    pub owner: Entity,
    pub task: Task,
}

#[derive(Debug, Clone)]
enum Due {
    After(Timer),
    Step(u64),
}

#[derive(Debug, Clone)]
struct Continuation {
    owner: Entity,
    task: Task,
    due: Due,
}

/// Tick-driven timer service holding all pending continuations, in the
/// order they were scheduled.
#[derive(Resource, Debug, Default)]
pub struct Scheduler {
    steps: u64,
    pending: Vec<Continuation>,
}

impl Scheduler {
    /// Fixed steps advanced so far.
    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Register a single-shot continuation for `owner`.
    pub fn schedule(&mut self, owner: Entity, task: Task, wait: Wait) {
        let due = match wait {
            Wait::Seconds(seconds) => Due::After(Timer::from_seconds(seconds.max(0.0), TimerMode::Once)),
            Wait::FixedSteps(steps) => Due::Step(self.steps + steps.max(1) as u64),
        };
        self.pending.push(Continuation { owner, task, due });
    }

    /// Replace any pending `task` for `owner` with a fresh one.
    ///
    /// Used for windows that restart instead of stacking.
    pub fn reschedule(&mut self, owner: Entity, task: Task, wait: Wait) {
        self.cancel(owner, task);
        self.schedule(owner, task, wait);
    }

    /// Drop pending `task` continuations for `owner`. Returns how many were dropped.
    pub fn cancel(&mut self, owner: Entity, task: Task) -> usize {
        let before = self.pending.len();
        self.pending.retain(|c| !(c.owner == owner && c.task == task));
        before - self.pending.len()
    }

    /// Drop every continuation owned by a removed actor.
    pub fn cancel_owner(&mut self, owner: Entity) -> usize {
        let before = self.pending.len();
        self.pending.retain(|c| c.owner != owner);
        before - self.pending.len()
    }

    pub fn is_pending(&self, owner: Entity, task: Task) -> bool {
        self.pending.iter().any(|c| c.owner == owner && c.task == task)
    }

    /// Seconds left on a time-based continuation, if one is pending.
    pub fn remaining(&self, owner: Entity, task: Task) -> Option<f32> {
        self.pending
            .iter()
            .filter(|c| c.owner == owner && c.task == task)
            .find_map(|c| match &c.due {
                Due::After(timer) => Some(timer.remaining_secs()),
                Due::Step(_) => None,
            })
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Advance by one fixed step of `delta` and return the continuations
    /// that came due, in the order they were scheduled.
    pub fn advance(&mut self, delta: Duration) -> Vec<TaskDue> {
        self.steps += 1;
        let steps = self.steps;

        let mut due = Vec::new();
        self.pending.retain_mut(|c| {
            let finished = match &mut c.due {
                Due::After(timer) => timer.tick(delta).finished(),
                Due::Step(step) => *step <= steps,
            };
            if finished {
                due.push(TaskDue {
                    owner: c.owner,
                    task: c.task,
                });
            }
            !finished
        });
        due
    }
}

/// Advance the scheduler by the fixed timestep and publish due continuations.
pub(crate) fn advance_scheduler(
    time: Res<Time>,
    mut scheduler: ResMut<Scheduler>,
    mut due_events: EventWriter<TaskDue>,
) {
    for due in scheduler.advance(time.delta()) {
        due_events.send(due);
    }
}
