//! Movement domain: the player motion controller and its ECS wiring.
//!
//! Per render frame (`Update`): sample input, then run the decision phase.
//! Per physics step (`FixedUpdate`): run the integration phase. Avian steps
//! the world afterwards in `FixedPostUpdate`.

mod components;
pub mod controller;
mod dev;
mod events;
mod resources;
mod state;
mod systems;
#[cfg(test)]
mod tests;

pub use components::{GameLayer, Ground, PLAYER_SIZE, Player, SpawnPoint, Wall, Water};
pub use controller::{BodyCommand, Decision, DecisionProbes, Integration, IntegrationProbes};
pub use events::RespawnPlayerEvent;
pub use resources::{MotionTuning, MovementInput, TuningError};
pub use state::{Action, AirJump, Facing, MotionPhase, MotionState, Transition, WaterContact};

use bevy::prelude::*;

use crate::abilities::ProgressionSet;
use crate::movement::dev::{spawn_player, spawn_test_room};
use crate::movement::systems::{
    handle_respawn, read_input, run_decision_phase, run_integration_phase,
};

#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum MotionSet {
    /// Keyboard to [`MovementInput`].
    Input,
    /// Edge-triggered transitions, once per frame.
    Decision,
    /// Continuous velocity and forces, once per fixed step.
    Integration,
}

pub struct MovementPlugin;

impl Plugin for MovementPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<MotionTuning>()
            .init_resource::<MovementInput>()
            .add_message::<RespawnPlayerEvent>()
            .configure_sets(
                Update,
                (MotionSet::Input, MotionSet::Decision)
                    .chain()
                    .after(ProgressionSet),
            )
            .add_systems(Startup, (spawn_test_room, spawn_player))
            .add_systems(Update, read_input.in_set(MotionSet::Input))
            .add_systems(
                Update,
                (handle_respawn, run_decision_phase)
                    .chain()
                    .in_set(MotionSet::Decision),
            )
            .add_systems(
                FixedUpdate,
                run_integration_phase.in_set(MotionSet::Integration),
            );
    }
}
