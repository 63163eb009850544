//! Debug domain: state for debug tooling.

use bevy::prelude::*;

/// Resource tracking debug mode state
#[derive(Resource, Debug)]
pub struct DebugState {
    /// Log every change of the player's motion state
    pub trace_motion: bool,
    /// Story point fired by the next Ctrl+M
    pub next_milestone: u32,
}

impl Default for DebugState {
    fn default() -> Self {
        Self {
            trace_motion: false,
            next_milestone: 1,
        }
    }
}
