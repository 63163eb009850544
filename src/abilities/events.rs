//! Abilities domain: progression messages in and unlock notifications out.

use bevy::ecs::message::Message;

/// Request to unlock a single ability by name (pickups, scripted rewards).
#[derive(Debug, Clone)]
pub struct UnlockAbilityEvent {
    pub name: String,
}

impl Message for UnlockAbilityEvent {}

/// Fired by story logic when the player reaches a milestone.
#[derive(Debug, Clone, Copy)]
pub struct MilestoneReachedEvent {
    pub story_point: u32,
}

impl Message for MilestoneReachedEvent {}

/// Fired once for each ability that actually changed from locked to unlocked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AbilityUnlockedEvent {
    pub name: String,
}

impl Message for AbilityUnlockedEvent {}
