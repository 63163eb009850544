//! Movement domain: input sampling for locomotion.

use bevy::prelude::*;

use crate::movement::MovementInput;

const JUMP_KEYS: [KeyCode; 2] = [KeyCode::Space, KeyCode::KeyK];
const DASH_KEYS: [KeyCode; 2] = [KeyCode::ShiftLeft, KeyCode::KeyJ];
const DIVE_KEYS: [KeyCode; 2] = [KeyCode::KeyS, KeyCode::ArrowDown];

pub(crate) fn read_input(keyboard: Res<ButtonInput<KeyCode>>, mut input: ResMut<MovementInput>) {
    // Horizontal axis
    let mut x = 0.0;
    if keyboard.pressed(KeyCode::KeyA) || keyboard.pressed(KeyCode::ArrowLeft) {
        x -= 1.0;
    }
    if keyboard.pressed(KeyCode::KeyD) || keyboard.pressed(KeyCode::ArrowRight) {
        x += 1.0;
    }

    // Vertical axis (swimming). Down wins when both are held.
    let y = if keyboard.any_pressed([KeyCode::KeyS, KeyCode::ArrowDown]) {
        -1.0
    } else if keyboard.any_pressed([KeyCode::KeyW, KeyCode::ArrowUp]) {
        1.0
    } else {
        0.0
    };

    input.axis = Vec2::new(x, y);
    input.jump_just_pressed = keyboard.any_just_pressed(JUMP_KEYS);
    input.jump_just_released = keyboard.any_just_released(JUMP_KEYS);
    input.jump_held = keyboard.any_pressed(JUMP_KEYS);
    input.dash_just_pressed = keyboard.any_just_pressed(DASH_KEYS);
    input.dive_just_pressed = keyboard.any_just_pressed(DIVE_KEYS);
}
