//! Combat-related components: vulnerability, knockback, collision layers.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

/// Knockback speed applied along the depth axis.
pub const KNOCKBACK_FACTOR: f32 = 40.0;

/// Seconds of invulnerability after a hit or a death.
pub const INVULNERABILITY_TIME: f32 = 1.0;

/// Collision layers used by the physics backend.
pub mod layers {
    use bevy_rapier3d::prelude::Group;

    pub const PLAYER: Group = Group::GROUP_1;
    pub const HAZARD: Group = Group::GROUP_2;
    pub const ENEMY: Group = Group::GROUP_3;
    pub const WORLD: Group = Group::GROUP_4;
    pub const TRIGGER: Group = Group::GROUP_5;
}

/// Collision groups for the player body, with or without hazard contact.
pub fn player_collision_groups(hazards_enabled: bool) -> CollisionGroups {
    let filters = if hazards_enabled {
        Group::ALL
    } else {
        Group::ALL.difference(layers::HAZARD)
    };
    CollisionGroups::new(layers::PLAYER, filters)
}

/// Knockback velocity pushing the actor away from the attacker along the depth axis.
///
/// Overwrites the actor's velocity. Zero offset yields no push.
pub fn knockback_velocity(actor: Vec3, attacker: Vec3) -> Vec3 {
    let offset = actor.z - attacker.z;
    if offset == 0.0 {
        return Vec3::ZERO;
    }
    Vec3::new(0.0, 0.0, offset.signum() * KNOCKBACK_FACTOR)
}

/// Result of a damage request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DamageOutcome {
    /// Invulnerable or already dead; nothing changed.
    Ignored,
    /// Hit landed and the actor survives.
    Staggered { knockback: Vec3 },
    /// Hit landed and the actor died.
    Killed,
}

/// Shared damage contract for anything that can be hit.
pub trait Damageable {
    fn take_damage(&mut self, amount: f32, position: Vec3, attacker_position: Vec3) -> DamageOutcome;
}

/// Player vulnerability gate.
///
/// Two independent gates: the hit window, whose expiry is a scheduled
/// `EndInvulnerability` continuation (restarting it replaces the pending
/// one), and the dash, held for exactly as long as the dash is active.
#[derive(Component, Debug, Clone)]
pub struct Vulnerability {
    vulnerable: bool,
    dashing: bool,
}

impl Default for Vulnerability {
    fn default() -> Self {
        Self {
            vulnerable: true,
            dashing: false,
        }
    }
}

impl Vulnerability {
    pub fn is_vulnerable(&self) -> bool {
        self.vulnerable && !self.dashing
    }

    /// Open or close the hit window gate.
    pub fn set_vulnerable(&mut self, vulnerable: bool) {
        self.vulnerable = vulnerable;
    }

    pub fn set_dashing(&mut self, dashing: bool) {
        self.dashing = dashing;
    }

    /// Accept a lethal event if vulnerable. Starts the invulnerability window.
    pub fn take_death(&mut self) -> bool {
        if !self.is_vulnerable() {
            return false;
        }
        self.vulnerable = false;
        true
    }
}

impl Damageable for Vulnerability {
    fn take_damage(&mut self, _amount: f32, position: Vec3, attacker_position: Vec3) -> DamageOutcome {
        if !self.is_vulnerable() {
            return DamageOutcome::Ignored;
        }
        self.vulnerable = false;
        DamageOutcome::Staggered {
            knockback: knockback_velocity(position, attacker_position),
        }
    }
}

/// Trigger volume that records a respawn point. One-shot.
#[derive(Component, Debug, Default)]
pub struct Checkpoint {
    pub reached: bool,
}

/// Solid collider that kills the player on contact.
#[derive(Component, Debug, Default)]
pub struct Hazard;

/// Camera noise settings driven by gameplay (dash feedback).
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq)]
pub struct CameraShake {
    pub amplitude: f32,
    pub frequency: f32,
}

impl CameraShake {
    pub fn set(&mut self, amplitude: f32, frequency: f32) {
        self.amplitude = amplitude;
        self.frequency = frequency;
    }

    pub fn is_active(&self) -> bool {
        self.amplitude > 0.0 && self.frequency > 0.0
    }

    /// Noise offset for a camera at time `t` seconds.
    pub fn offset(&self, t: f32, jitter: Vec2) -> Vec3 {
        if !self.is_active() {
            return Vec3::ZERO;
        }
        let phase = t * self.frequency * std::f32::consts::TAU;
        let scale = self.amplitude * 0.05;
        Vec3::new(
            (phase.sin() + jitter.x) * scale,
            ((phase * 1.3).cos() + jitter.y) * scale,
            0.0,
        )
    }
}
