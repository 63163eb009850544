//! Debug domain: hotkeys for progression and motion tracing.

use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::prelude::*;

use crate::abilities::{
    AbilityKind, AbilityUnlockedEvent, MilestoneReachedEvent, UnlockAbilityEvent,
};
use crate::debug::state::DebugState;
use crate::movement::{Action, AirJump, MotionState, Player, RespawnPlayerEvent, WaterContact};

const UNLOCK_KEYS: [KeyCode; 4] = [
    KeyCode::Digit1,
    KeyCode::Digit2,
    KeyCode::Digit3,
    KeyCode::Digit4,
];

/// Handle keyboard shortcuts for debug actions. All require Ctrl.
pub(crate) fn handle_debug_hotkeys(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut debug_state: ResMut<DebugState>,
    mut unlock_requests: MessageWriter<UnlockAbilityEvent>,
    mut milestones: MessageWriter<MilestoneReachedEvent>,
    mut respawns: MessageWriter<RespawnPlayerEvent>,
) {
    let ctrl = keyboard.pressed(KeyCode::ControlLeft) || keyboard.pressed(KeyCode::ControlRight);
    if !ctrl {
        return;
    }

    // Ctrl+1..4: unlock DoubleJump, WallStick, Dash, Diving
    for (key, kind) in UNLOCK_KEYS.into_iter().zip(AbilityKind::ALL) {
        if keyboard.just_pressed(key) {
            info!("[DEBUG] Requesting unlock of {}", kind.name());
            unlock_requests.write(UnlockAbilityEvent {
                name: kind.name().to_string(),
            });
        }
    }

    // Ctrl+M: fire the next story milestone
    if keyboard.just_pressed(KeyCode::KeyM) {
        let story_point = debug_state.next_milestone;
        debug_state.next_milestone += 1;
        info!("[DEBUG] Milestone {} reached", story_point);
        milestones.write(MilestoneReachedEvent { story_point });
    }

    // Ctrl+R: respawn
    if keyboard.just_pressed(KeyCode::KeyR) {
        info!("[DEBUG] Respawn");
        respawns.write(RespawnPlayerEvent);
    }

    // Ctrl+T: toggle motion tracing
    if keyboard.just_pressed(KeyCode::KeyT) {
        debug_state.trace_motion = !debug_state.trace_motion;
        info!(
            "[DEBUG] Motion trace {}",
            if debug_state.trace_motion { "ON" } else { "OFF" }
        );
    }
}

pub(crate) fn report_unlocks(mut unlocked: MessageReader<AbilityUnlockedEvent>) {
    for event in unlocked.read() {
        info!("[DEBUG] {} is now available", event.name);
    }
}

/// Logs the player's discrete motion state whenever it changes.
pub(crate) fn trace_motion_state(
    mut last: Local<Option<(Action, WaterContact, AirJump)>>,
    query: Query<&MotionState, With<Player>>,
) {
    let Ok(state) = query.single() else {
        return;
    };

    // Timers tick every frame; compare variants only.
    let action = match state.action {
        Action::Dashing { .. } => Action::Dashing { time_left: 0.0 },
        Action::WallSticking { .. } => Action::WallSticking { timer: 0.0 },
        other => other,
    };
    let current = (action, state.water, state.air_jump);

    if *last != Some(current) {
        info!(
            "[DEBUG] action={:?} water={:?} air_jump={:?} facing={:?} speed={:.1}",
            state.action, state.water, state.air_jump, state.facing, state.current_speed
        );
        *last = Some(current);
    }
}
