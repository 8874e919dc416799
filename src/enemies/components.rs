//! Enemy-related components.

use bevy::prelude::*;

use crate::combat::{knockback_velocity, DamageOutcome, Damageable};

/// Marker component for all enemies.
#[derive(Component)]
pub struct Enemy;

/// Enemy type identifier (matches RON file name).
#[derive(Component, Clone)]
pub struct EnemyType(pub String);

/// Melee AI states.
#[derive(Default, PartialEq, Eq, Clone, Copy, Debug)]
pub enum AiState {
    /// Walking the patrol route, player not seen.
    #[default]
    Patrol,
    /// Just spotted the player; lasts one tick.
    Alert,
    /// Moving toward the player.
    Pursuing,
    /// Holding position while an attack winds up or cools down in range.
    Attacking,
    /// Recoiling from a hit.
    HitReaction,
    /// Terminal. Waiting for removal.
    Dying,
}

/// Enemy stats loaded from RON data files.
#[derive(Component, Clone, Debug)]
pub struct EnemyStats {
    pub max_health: f32,
    pub damage: f32,
    pub move_speed: f32,
    pub patrol_speed: f32,
    pub patrol_pause: f32,
    pub detection_range: f32,
    pub attack_range: f32,
    pub attack_cooldown: f32,
    pub hit_reaction_time: f32,
}

impl Default for EnemyStats {
    fn default() -> Self {
        Self {
            max_health: 30.0,
            damage: 10.0,
            move_speed: 3.0,
            patrol_speed: 1.5,
            patrol_pause: 1.0,
            detection_range: 8.0,
            attack_range: 1.6,
            attack_cooldown: 1.5,
            hit_reaction_time: 0.4,
        }
    }
}

/// Sight capability.
pub trait Perceives {
    fn can_see_player(&self) -> bool;
}

/// Attack capability.
pub trait Combatant {
    /// Start an attack if allowed. Starting puts the attack on cooldown.
    fn try_attack(&mut self) -> bool;
}

/// Whether the enemy currently sees the player.
#[derive(Component, Debug, Default, Clone)]
pub struct Perception {
    can_see_player: bool,
}

impl Perception {
    /// Record the latest sight result. Returns true when visibility changed.
    pub fn update(&mut self, sees: bool) -> bool {
        let changed = self.can_see_player != sees;
        self.can_see_player = sees;
        changed
    }
}

impl Perceives for Perception {
    fn can_see_player(&self) -> bool {
        self.can_see_player
    }
}

/// Enemy attack and health state. Frozen once `is_dead` is set.
#[derive(Component, Debug, Clone)]
pub struct AttackState {
    pub can_attack: bool,
    pub is_dead: bool,
    pub health: f32,
}

impl AttackState {
    pub fn new(health: f32) -> Self {
        Self {
            can_attack: true,
            is_dead: false,
            health,
        }
    }

    /// Cooldown elapsed; allow the next attack.
    pub fn finish_cooldown(&mut self) {
        if !self.is_dead {
            self.can_attack = true;
        }
    }
}

impl Combatant for AttackState {
    fn try_attack(&mut self) -> bool {
        if self.is_dead || !self.can_attack {
            return false;
        }
        self.can_attack = false;
        true
    }
}

impl Damageable for AttackState {
    fn take_damage(&mut self, amount: f32, position: Vec3, attacker_position: Vec3) -> DamageOutcome {
        if self.is_dead {
            return DamageOutcome::Ignored;
        }

        self.health -= amount;

        if self.health > 0.0 {
            DamageOutcome::Staggered {
                knockback: knockback_velocity(position, attacker_position),
            }
        } else {
            self.is_dead = true;
            self.can_attack = false;
            DamageOutcome::Killed
        }
    }
}

/// Two depth-axis waypoints walked back and forth with a pause at each end.
#[derive(Component, Debug, Clone)]
pub struct PatrolRoute {
    pub waypoints: [f32; 2],
    pub target: usize,
    pub pause_remaining: f32,
}

/// Distance at which a waypoint counts as reached.
const ARRIVE_DISTANCE: f32 = 0.1;

impl PatrolRoute {
    pub fn new(from_z: f32, to_z: f32) -> Self {
        Self {
            waypoints: [from_z, to_z],
            target: 1,
            pause_remaining: 0.0,
        }
    }

    /// Direction to walk this tick (-1, 0 or 1) from depth position `z`.
    pub fn steer(&mut self, z: f32, dt: f32, pause: f32) -> f32 {
        if self.pause_remaining > 0.0 {
            self.pause_remaining = (self.pause_remaining - dt).max(0.0);
            return 0.0;
        }

        let offset = self.waypoints[self.target] - z;
        if offset.abs() <= ARRIVE_DISTANCE {
            self.target = 1 - self.target;
            self.pause_remaining = pause;
            return 0.0;
        }

        offset.signum()
    }

    /// Drop any pending pause; used when the enemy becomes alert.
    pub fn clear_pause(&mut self) {
        self.pause_remaining = 0.0;
    }
}

/// How an enemy moves this tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Locomotion {
    /// Leave velocity to physics (knockback, death).
    Passive,
    /// Stand still.
    Hold,
    Patrol,
    Pursue,
}

/// Decisions produced by one AI tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Intent {
    pub face_player: bool,
    pub start_attack: bool,
    pub locomotion: Locomotion,
}

impl Intent {
    const FROZEN: Intent = Intent {
        face_player: false,
        start_attack: false,
        locomotion: Locomotion::Passive,
    };
}

/// Perception/combat state machine for a melee enemy.
#[derive(Component, Debug, Clone)]
pub struct MeleeBrain {
    pub state: AiState,
    /// Cleared while an attack holds the enemy in place.
    pub can_move: bool,
}

impl Default for MeleeBrain {
    fn default() -> Self {
        Self {
            state: AiState::Patrol,
            can_move: true,
        }
    }
}

impl MeleeBrain {
    /// Run one tick of the state machine.
    pub fn think(
        &mut self,
        perception: &impl Perceives,
        combat: &mut (impl Combatant + DeathState),
        in_attack_range: bool,
    ) -> Intent {
        if self.state == AiState::Dying || combat.is_dead() {
            self.state = AiState::Dying;
            return Intent::FROZEN;
        }

        let sees = perception.can_see_player();

        if self.state == AiState::HitReaction {
            return Intent {
                face_player: sees,
                ..Intent::FROZEN
            };
        }

        if !sees {
            self.state = AiState::Patrol;
            self.can_move = true;
            return Intent {
                locomotion: Locomotion::Patrol,
                ..Intent::FROZEN
            };
        }

        if self.state == AiState::Patrol {
            self.state = AiState::Alert;
            return Intent {
                face_player: true,
                locomotion: Locomotion::Hold,
                ..Intent::FROZEN
            };
        }

        let mut start_attack = false;
        if in_attack_range && combat.try_attack() {
            self.can_move = false;
            start_attack = true;
        }

        if !self.can_move && !in_attack_range {
            self.can_move = true;
        }

        self.state = if self.can_move {
            AiState::Pursuing
        } else {
            AiState::Attacking
        };

        Intent {
            face_player: true,
            start_attack,
            locomotion: if self.can_move {
                Locomotion::Pursue
            } else {
                Locomotion::Hold
            },
        }
    }

    /// Start a hit reaction unless already dying.
    pub fn react_to_hit(&mut self) -> bool {
        if self.state == AiState::Dying {
            return false;
        }
        self.state = AiState::HitReaction;
        true
    }

    /// Hit reaction elapsed; resume pursuit (the next tick re-checks sight).
    pub fn recover(&mut self) {
        if self.state == AiState::HitReaction {
            self.state = AiState::Pursuing;
        }
    }

    pub fn die(&mut self) {
        self.state = AiState::Dying;
        self.can_move = false;
    }
}

/// Terminal-state query shared by combat capabilities.
pub trait DeathState {
    fn is_dead(&self) -> bool;
}

impl DeathState for AttackState {
    fn is_dead(&self) -> bool {
        self.is_dead
    }
}

/// Links an enemy to its attack hit-volume child.
#[derive(Component)]
pub struct HitVolumeLink(pub Entity);

/// Sensor that damages the player during the active window of a swing.
#[derive(Component)]
pub struct EnemyHitVolume {
    pub owner: Entity,
}

/// External trigger bracketing a swing's active-damage window.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct HitVolumeTrigger {
    pub enemy: Entity,
    pub enabled: bool,
}
