//! Movement domain: messages consumed by locomotion systems.

use bevy::ecs::message::Message;

/// Ask for the player to be reset to its spawn point (death, level restart).
#[derive(Debug, Clone, Copy, Default)]
pub struct RespawnPlayerEvent;

impl Message for RespawnPlayerEvent {}
