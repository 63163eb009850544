//! Abilities domain: unlock ledger, progression messages, capability gates.

mod events;
mod registry;
mod systems;

pub use events::{AbilityUnlockedEvent, MilestoneReachedEvent, UnlockAbilityEvent};
pub use registry::{Ability, AbilityKind, AbilityRegistry, Capabilities, RegistryError};

use bevy::prelude::*;

use crate::abilities::systems::apply_progression;

/// Ledger writes happen in this set; motion systems order themselves after it.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProgressionSet;

pub struct AbilitiesPlugin;

impl Plugin for AbilitiesPlugin {
    fn build(&self, app: &mut App) {
        // ContentPlugin normally inserts the loaded ledger first; an empty
        // ledger keeps every ability locked.
        app.init_resource::<AbilityRegistry>()
            .add_message::<UnlockAbilityEvent>()
            .add_message::<MilestoneReachedEvent>()
            .add_message::<AbilityUnlockedEvent>()
            .add_systems(Update, apply_progression.in_set(ProgressionSet));
    }
}
