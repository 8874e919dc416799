//! Player-related components and resources.

use bevy::prelude::*;
use serde::Deserialize;

use crate::core::load_ron;

/// Marker component for the player entity.
#[derive(Component)]
pub struct Player;

/// Facing along the depth axis. Right looks down +Z, Left down -Z.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Facing {
    Left,
    #[default]
    Right,
}

impl Facing {
    /// Facing implied by horizontal input, if any.
    pub fn from_input(move_x: f32) -> Option<Self> {
        if move_x < 0.0 {
            Some(Facing::Left)
        } else if move_x > 0.0 {
            Some(Facing::Right)
        } else {
            None
        }
    }

    /// Facing that looks from `from_z` toward `to_z`.
    pub fn toward(from_z: f32, to_z: f32) -> Self {
        if to_z < from_z {
            Facing::Left
        } else {
            Facing::Right
        }
    }

    pub fn sign(self) -> f32 {
        match self {
            Facing::Left => -1.0,
            Facing::Right => 1.0,
        }
    }

    /// Yaw-only rotation for this facing.
    pub fn rotation(self) -> Quat {
        match self {
            Facing::Left => Quat::from_rotation_y(std::f32::consts::PI),
            Facing::Right => Quat::IDENTITY,
        }
    }

    /// Map a direction in the actor's local frame (+Z forward) to world space.
    pub fn to_world(self, local: Vec3) -> Vec3 {
        Vec3::new(local.x * self.sign(), local.y, local.z * self.sign())
    }
}

/// Locomotion state owned by the movement engine.
#[derive(Component, Debug, Clone)]
pub struct ActorKinematics {
    /// Forward speed, never negative
    pub velocity: f32,
    /// Last nonzero horizontal input, used to coast to a stop
    pub last_direction: f32,
    pub facing: Facing,
    pub grounded: bool,
    /// Jumps left before touching the ground again (0..=2)
    pub jumps_remaining: u8,
}

impl Default for ActorKinematics {
    fn default() -> Self {
        Self {
            velocity: 0.0,
            last_direction: 0.0,
            facing: Facing::Right,
            grounded: true,
            jumps_remaining: MAX_JUMPS,
        }
    }
}

/// Jumps granted by each ground contact.
pub const MAX_JUMPS: u8 = 2;

/// Jump flags read by presentation, plus jumps still waiting for their
/// deferred decrement.
#[derive(Component, Debug, Clone, Default)]
pub struct JumpState {
    pub jumping: bool,
    pub double_jumping: bool,
    pub pending: u8,
}

/// Dash arming and activity. `active` implies `!armed`.
#[derive(Component, Debug, Clone, Default)]
pub struct DashState {
    pub armed: bool,
    pub active: bool,
}

/// Links the player to its dash hit-volume child.
#[derive(Component)]
pub struct DashVolumeLink(pub Entity);

/// Sensor that damages enemies while a dash is active.
#[derive(Component)]
pub struct DashHitVolume {
    pub owner: Entity,
}

/// Blocks all input-driven movement while set (respawn freeze).
#[derive(Component, Debug, Default)]
pub struct MovementLock {
    pub locked: bool,
}

/// Input snapshot for the current tick.
///
/// Axes are sampled every frame. The pressed flags latch until a fixed step
/// consumes them so a press is never lost between fixed steps.
#[derive(Resource, Debug, Clone, Default, PartialEq)]
pub struct InputFrame {
    pub move_x: f32,
    pub move_y: f32,
    pub jump_pressed: bool,
    pub dash_pressed: bool,
    pub run_held: bool,
    pub attack_pressed: bool,
}

impl InputFrame {
    pub fn is_moving(&self) -> bool {
        self.move_x != 0.0
    }

    /// Clear the edge-triggered flags once a fixed step has used them.
    pub fn consume_presses(&mut self) {
        self.jump_pressed = false;
        self.dash_pressed = false;
    }
}

/// Presentation read-model published every frame for the animator.
#[derive(Component, Debug, Clone, Default, PartialEq)]
pub struct PlayerSnapshot {
    pub walking: bool,
    pub grounded: bool,
    pub jumping: bool,
    pub double_jumping: bool,
    pub dashing: bool,
    pub attacking: bool,
    pub movement: f32,
    pub velocity: f32,
    /// Seconds until the active dash ends, zero when not dashing
    pub dash_remaining: f32,
}

/// Player tuning loaded from assets/data/player/tuning.ron.
#[derive(Resource, Debug, Clone, Deserialize)]
pub struct PlayerTuning {
    /// Scales the forward speed into world units per second
    pub speed_multiplier: f32,
    pub walk_speed: f32,
    pub run_speed: f32,
    /// Speed gained per second while moving
    pub acceleration: f32,
    /// Speed lost per second while coasting
    pub deceleration: f32,
    pub jump_force: f32,
    pub dash_force: f32,
    /// Seconds a dash stays active
    pub dash_time: f32,
    /// Damage the dash hit-volume deals to enemies
    pub dash_damage: f32,
    pub gravity: (f32, f32, f32),
    /// Length of the downward ground probe
    pub ground_probe_distance: f32,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            speed_multiplier: 1.0,
            walk_speed: 4.0,
            run_speed: 7.0,
            acceleration: 12.0,
            deceleration: 16.0,
            jump_force: 7.0,
            dash_force: 18.0,
            dash_time: 0.25,
            dash_damage: 10.0,
            gravity: (0.0, -20.0, 0.0),
            ground_probe_distance: 0.1,
        }
    }
}

impl PlayerTuning {
    pub const PATH: &'static str = "assets/data/player/tuning.ron";

    /// Load tuning from disk, falling back to defaults.
    pub fn load() -> Self {
        match load_ron(Self::PATH) {
            Ok(tuning) => {
                info!("Loaded player tuning from {}", Self::PATH);
                tuning
            }
            Err(e) => {
                warn!("{}. Using default player tuning.", e);
                Self::default()
            }
        }
    }

    pub fn gravity(&self) -> Vec3 {
        Vec3::new(self.gravity.0, self.gravity.1, self.gravity.2)
    }
}

/// System to load player tuning at startup.
pub fn load_player_tuning(mut commands: Commands) {
    commands.insert_resource(PlayerTuning::load());
}
