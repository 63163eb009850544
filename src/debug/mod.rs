//! Debug tooling for fast iteration (dev-tools feature).
//!
//! Hotkeys (hold Ctrl):
//! - 1..4: unlock DoubleJump, WallStick, Dash, Diving
//! - M: fire the next story milestone
//! - R: respawn the player
//! - T: toggle motion state tracing

mod state;
mod systems;

pub use state::DebugState;

use bevy::prelude::*;

use crate::abilities::ProgressionSet;
use crate::debug::systems::{handle_debug_hotkeys, report_unlocks, trace_motion_state};
use crate::movement::MotionSet;

pub struct DebugPlugin;

impl Plugin for DebugPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<DebugState>()
            .add_systems(Update, handle_debug_hotkeys.before(ProgressionSet))
            .add_systems(Update, report_unlocks.after(ProgressionSet))
            .add_systems(
                Update,
                trace_motion_state
                    .after(MotionSet::Decision)
                    .run_if(|state: Res<DebugState>| state.trace_motion),
            );
    }
}
