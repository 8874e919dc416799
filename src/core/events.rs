//! Global events used for cross-actor communication.
//!
//! Actors never mutate each other directly. Damage travels as a
//! `DamageEvent` and is applied by the target's own system; notifications
//! and animation signals are fire-and-forget broadcasts with any number of
//! readers.

use bevy::prelude::*;

/// Request to damage another actor.
///
/// The target's damage system decides whether the hit lands (invulnerability,
/// death) and computes knockback from `attacker_position`.
#[derive(Event, Debug, Clone, Copy)]
pub struct DamageEvent {
    /// Entity receiving damage
    pub target: Entity,
    /// Entity that caused the damage
    pub source: Entity,
    /// Damage amount
    pub amount: f32,
    /// Attacker position at the moment of the hit
    pub attacker_position: Vec3,
}

/// Sent after the player accepted a hit.
#[derive(Event, Debug, Clone, Copy)]
pub struct PlayerDamagedEvent {
    pub player: Entity,
    pub amount: f32,
}

/// Sent when the player dies (hazard contact).
#[derive(Event, Debug, Clone, Copy)]
pub struct PlayerDeathEvent {
    pub player: Entity,
}

/// Sent once per checkpoint volume the player enters.
#[derive(Event, Debug, Clone, Copy)]
pub struct CheckpointSetEvent {
    pub checkpoint: Entity,
    pub position: Vec3,
}

/// State signals consumed by the animation backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    TakeDamage,
    Die,
    Attack,
    CanSeePlayer(bool),
}

/// Fire-and-forget animation signal. The simulation never waits on these.
#[derive(Event, Debug, Clone, Copy)]
pub struct AnimationSignal {
    pub entity: Entity,
    pub signal: Signal,
}
