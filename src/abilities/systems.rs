//! Abilities domain: applies progression messages to the ledger.

use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::prelude::*;

use crate::abilities::AbilityRegistry;
use crate::abilities::events::{AbilityUnlockedEvent, MilestoneReachedEvent, UnlockAbilityEvent};

/// Sole writer of the [`AbilityRegistry`]. Scheduled ahead of the motion
/// decision phase, so readers always see a settled ledger.
pub(crate) fn apply_progression(
    mut registry: ResMut<AbilityRegistry>,
    mut unlock_requests: MessageReader<UnlockAbilityEvent>,
    mut milestones: MessageReader<MilestoneReachedEvent>,
    mut unlocked: MessageWriter<AbilityUnlockedEvent>,
) {
    for request in unlock_requests.read() {
        if registry.unlock(&request.name) {
            unlocked.write(AbilityUnlockedEvent {
                name: request.name.clone(),
            });
        }
    }

    for milestone in milestones.read() {
        let names = registry.on_milestone(milestone.story_point);
        if names.is_empty() {
            debug!(
                "Milestone {} reached, nothing new to unlock",
                milestone.story_point
            );
        }
        for name in names {
            unlocked.write(AbilityUnlockedEvent { name });
        }
    }
}
