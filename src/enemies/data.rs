//! Enemy data loading from RON files.

use bevy::prelude::*;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use super::components::EnemyStats;
use crate::core::load_ron;

/// Collider configuration for an enemy type.
#[derive(Deserialize, Clone, Debug)]
pub struct ColliderConfig {
    pub half_height: f32,
    pub radius: f32,
}

impl Default for ColliderConfig {
    fn default() -> Self {
        Self {
            half_height: 0.5,
            radius: 0.35,
        }
    }
}

/// Active-damage window of a swing, in seconds after the attack signal.
#[derive(Deserialize, Clone, Copy, Debug)]
pub struct SwingConfig {
    pub active_start: f32,
    pub active_end: f32,
    /// Hit-volume reach in front of the enemy
    pub reach: f32,
}

impl Default for SwingConfig {
    fn default() -> Self {
        Self {
            active_start: 0.15,
            active_end: 0.35,
            reach: 0.8,
        }
    }
}

/// Enemy definition loaded from RON file.
#[derive(Deserialize, Clone, Debug)]
pub struct EnemyDefinition {
    pub name: String,
    pub max_health: f32,
    pub damage: f32,
    pub move_speed: f32,
    pub patrol_speed: f32,
    pub patrol_pause: f32,
    pub detection_range: f32,
    pub attack_range: f32,
    pub attack_cooldown: f32,
    pub hit_reaction_time: f32,
    #[serde(default)]
    pub collider: Option<ColliderConfig>,
    #[serde(default)]
    pub swing: Option<SwingConfig>,
}

impl EnemyDefinition {
    /// Convert to EnemyStats component.
    pub fn to_stats(&self) -> EnemyStats {
        EnemyStats {
            max_health: self.max_health,
            damage: self.damage,
            move_speed: self.move_speed,
            patrol_speed: self.patrol_speed,
            patrol_pause: self.patrol_pause,
            detection_range: self.detection_range,
            attack_range: self.attack_range,
            attack_cooldown: self.attack_cooldown,
            hit_reaction_time: self.hit_reaction_time,
        }
    }
}

/// Resource holding all loaded enemy definitions.
#[derive(Resource, Default)]
pub struct EnemyRegistry {
    pub definitions: HashMap<String, EnemyDefinition>,
}

impl EnemyRegistry {
    /// Get an enemy definition by type name.
    pub fn get(&self, enemy_type: &str) -> Option<&EnemyDefinition> {
        self.definitions.get(enemy_type)
    }

    /// Swing window for an enemy type, or the default.
    pub fn swing(&self, enemy_type: &str) -> SwingConfig {
        self.get(enemy_type)
            .and_then(|def| def.swing)
            .unwrap_or_default()
    }
}

/// Load all enemy definitions from the assets/data/enemies/ directory.
pub fn load_enemy_definitions(mut registry: ResMut<EnemyRegistry>) {
    let enemies_dir = Path::new("assets/data/enemies");

    let Ok(entries) = fs::read_dir(enemies_dir) else {
        warn!("Enemy definitions directory not found: {:?}", enemies_dir);
        return;
    };

    for entry in entries.flatten() {
        let path = entry.path();

        if !path.extension().is_some_and(|ext| ext == "ron") {
            continue;
        }

        let enemy_type = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("unknown")
            .to_string();

        match load_ron::<EnemyDefinition>(&path) {
            Ok(definition) => {
                info!("Loaded enemy definition: {} ({})", definition.name, enemy_type);
                registry.definitions.insert(enemy_type, definition);
            }
            Err(e) => error!("{}", e),
        }
    }

    info!("Loaded {} enemy definitions", registry.definitions.len());
}
