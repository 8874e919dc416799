//! Keyboard sampling into the per-tick `InputFrame`.
//!
//! Controls:
//! - A/D or Left/Right: move along the path
//! - W/S or Up/Down: aim (dash upward)
//! - Space: jump
//! - Shift: run
//! - K: dash
//! - J: attack

use bevy::prelude::*;

use super::components::InputFrame;

fn axis(keyboard: &ButtonInput<KeyCode>, negative: [KeyCode; 2], positive: [KeyCode; 2]) -> f32 {
    let mut value = 0.0;
    if keyboard.any_pressed(negative) {
        value -= 1.0;
    }
    if keyboard.any_pressed(positive) {
        value += 1.0;
    }
    value
}

/// Sample the keyboard on the presentation step.
pub fn sample_input(keyboard: Res<ButtonInput<KeyCode>>, mut input: ResMut<InputFrame>) {
    input.move_x = axis(&keyboard, [KeyCode::KeyA, KeyCode::ArrowLeft], [KeyCode::KeyD, KeyCode::ArrowRight]);
    input.move_y = axis(&keyboard, [KeyCode::KeyS, KeyCode::ArrowDown], [KeyCode::KeyW, KeyCode::ArrowUp]);
    input.run_held = keyboard.any_pressed([KeyCode::ShiftLeft, KeyCode::ShiftRight]);
    input.attack_pressed = keyboard.just_pressed(KeyCode::KeyJ);

    // Latched until a fixed step consumes them
    input.jump_pressed |= keyboard.just_pressed(KeyCode::Space);
    input.dash_pressed |= keyboard.just_pressed(KeyCode::KeyK);
}

/// Clear the latched presses after the fixed step's abilities ran.
pub fn consume_input(mut input: ResMut<InputFrame>) {
    input.consume_presses();
}
