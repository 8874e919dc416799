//! Emberfall - Entry Point
//!
//! Controls:
//! - A/D or Left/Right: Move
//! - Shift: Run
//! - Space: Jump (press again in the air to double jump)
//! - K: Dash (with W/S to aim up or diagonally)
//! - J: Attack
//! - Escape: Pause/Unpause

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

fn main() {
    App::new()
        // Bevy default plugins
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Emberfall".to_string(),
                resolution: (1280.0, 720.0).into(),
                ..default()
            }),
            ..default()
        }))

        // Physics steps with the fixed simulation
        .add_plugins(RapierPhysicsPlugin::<NoUserData>::default().in_fixed_schedule())

        // Our game plugin
        .add_plugins(emberfall::EmberfallPlugin)

        .run();
}
