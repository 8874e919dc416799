//! Level data structures and RON loading.

use bevy::prelude::*;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::core::load_ron;

/// Axis-aligned box given by its center and full size.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct BoxDef {
    pub center: (f32, f32, f32),
    pub size: (f32, f32, f32),
}

impl BoxDef {
    pub fn center(&self) -> Vec3 {
        Vec3::new(self.center.0, self.center.1, self.center.2)
    }

    pub fn half_extents(&self) -> Vec3 {
        Vec3::new(self.size.0, self.size.1, self.size.2) * 0.5
    }
}

/// One enemy placement. The enemy patrols between its spawn depth and `patrol_to`.
#[derive(Debug, Clone, Deserialize)]
pub struct EnemySpawnDef {
    pub enemy_type: String,
    pub position: (f32, f32, f32),
    pub patrol_to: f32,
}

impl EnemySpawnDef {
    pub fn position(&self) -> Vec3 {
        Vec3::new(self.position.0, self.position.1, self.position.2)
    }
}

/// A side-on level: solid platforms, lethal hazards, checkpoints and enemies.
#[derive(Debug, Clone, Deserialize)]
pub struct LevelDefinition {
    pub name: String,
    pub player_start: (f32, f32, f32),
    #[serde(default)]
    pub platforms: Vec<BoxDef>,
    #[serde(default)]
    pub hazards: Vec<BoxDef>,
    #[serde(default)]
    pub checkpoints: Vec<BoxDef>,
    #[serde(default)]
    pub enemies: Vec<EnemySpawnDef>,
}

impl LevelDefinition {
    pub fn player_start(&self) -> Vec3 {
        Vec3::new(self.player_start.0, self.player_start.1, self.player_start.2)
    }
}

/// Resource storing all loaded level definitions.
#[derive(Resource, Default)]
pub struct LevelRegistry {
    pub levels: HashMap<String, LevelDefinition>,
}

impl LevelRegistry {
    /// Get a level by name.
    pub fn get(&self, name: &str) -> Option<&LevelDefinition> {
        self.levels.get(name)
    }
}

/// Resource indicating which level to build.
#[derive(Resource)]
pub struct CurrentLevel {
    pub name: String,
}

impl Default for CurrentLevel {
    fn default() -> Self {
        Self {
            name: "foundry".to_string(),
        }
    }
}

/// Load all level definitions from assets/data/levels/.
pub fn load_level_definitions(mut registry: ResMut<LevelRegistry>) {
    let levels_path = Path::new("assets/data/levels");

    let Ok(entries) = fs::read_dir(levels_path) else {
        warn!("Levels directory not found: {:?}", levels_path);
        return;
    };

    for entry in entries.flatten() {
        let path = entry.path();
        if !path.extension().is_some_and(|ext| ext == "ron") {
            continue;
        }
        let Some(level_name) = path.file_stem().map(|stem| stem.to_string_lossy().to_string()) else {
            continue;
        };

        match load_ron::<LevelDefinition>(&path) {
            Ok(level) => {
                info!("Loaded level: {}", level_name);
                registry.levels.insert(level_name, level);
            }
            Err(e) => error!("{}", e),
        }
    }

    info!("Loaded {} level(s)", registry.levels.len());
}
