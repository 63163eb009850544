//! Movement domain: system modules for locomotion updates.

pub(crate) mod input;
pub(crate) mod motion;
pub(crate) mod probes;

pub(crate) use input::read_input;
pub(crate) use motion::{handle_respawn, run_decision_phase, run_integration_phase};
