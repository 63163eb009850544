//! Abilities domain: the unlock ledger and the per-frame capability snapshot.

use bevy::prelude::*;
use thiserror::Error;

use crate::content::AbilityDef;

/// Abilities the motion controller consults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AbilityKind {
    DoubleJump,
    WallStick,
    Dash,
    Diving,
}

impl AbilityKind {
    pub const ALL: [AbilityKind; 4] = [
        AbilityKind::DoubleJump,
        AbilityKind::WallStick,
        AbilityKind::Dash,
        AbilityKind::Diving,
    ];

    /// Name used for this ability in the ledger and in content files.
    pub fn name(self) -> &'static str {
        match self {
            AbilityKind::DoubleJump => "DoubleJump",
            AbilityKind::WallStick => "WallStick",
            AbilityKind::Dash => "Dash",
            AbilityKind::Diving => "Diving",
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("ability '{0}' is defined more than once")]
    DuplicateName(String),
}

/// One entry of the ledger. The unlock flag only ever goes from locked to
/// unlocked, so it is only reachable through [`AbilityRegistry`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ability {
    name: String,
    unlocked: bool,
    unlock_milestone: u32,
}

impl Ability {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_unlocked(&self) -> bool {
        self.unlocked
    }

    pub fn unlock_milestone(&self) -> u32 {
        self.unlock_milestone
    }
}

/// Session-wide ability ledger.
///
/// Lookups by unknown name are treated as locked and unlocking an unknown
/// name does nothing; callers never have to handle a missing ability.
#[derive(Resource, Debug, Clone, Default)]
pub struct AbilityRegistry {
    abilities: Vec<Ability>,
}

impl AbilityRegistry {
    /// Build the ledger from content definitions. Names must be unique.
    pub fn new(defs: impl IntoIterator<Item = AbilityDef>) -> Result<Self, RegistryError> {
        let mut abilities: Vec<Ability> = Vec::new();
        for def in defs {
            if abilities.iter().any(|a| a.name == def.name) {
                return Err(RegistryError::DuplicateName(def.name));
            }
            abilities.push(Ability {
                name: def.name,
                unlocked: def.unlocked,
                unlock_milestone: def.unlock_milestone,
            });
        }
        Ok(Self { abilities })
    }

    /// Mark an ability unlocked. Returns true only if this call flipped it.
    pub fn unlock(&mut self, name: &str) -> bool {
        match self.abilities.iter_mut().find(|a| a.name == name) {
            Some(ability) if !ability.unlocked => {
                ability.unlocked = true;
                info!("Ability unlocked: {}", name);
                true
            }
            Some(_) => false,
            None => {
                debug!("Ignoring unlock of unknown ability '{}'", name);
                false
            }
        }
    }

    pub fn is_unlocked(&self, name: &str) -> bool {
        self.get(name).is_some_and(Ability::is_unlocked)
    }

    pub fn is_kind_unlocked(&self, kind: AbilityKind) -> bool {
        self.is_unlocked(kind.name())
    }

    /// Unlock every still-locked ability tied to `story_point`.
    /// Returns the names unlocked by this call, in ledger order.
    pub fn on_milestone(&mut self, story_point: u32) -> Vec<String> {
        let mut unlocked = Vec::new();
        for ability in &mut self.abilities {
            if ability.unlock_milestone == story_point && !ability.unlocked {
                ability.unlocked = true;
                info!(
                    "Ability unlocked: {} (milestone {})",
                    ability.name, story_point
                );
                unlocked.push(ability.name.clone());
            }
        }
        unlocked
    }

    pub fn get(&self, name: &str) -> Option<&Ability> {
        self.abilities.iter().find(|a| a.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Ability> {
        self.abilities.iter()
    }

    pub fn len(&self) -> usize {
        self.abilities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.abilities.is_empty()
    }
}

/// Which gated abilities are usable this tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Capabilities {
    pub double_jump: bool,
    pub wall_stick: bool,
    pub dash: bool,
    pub diving: bool,
}

impl Capabilities {
    pub fn from_registry(registry: &AbilityRegistry) -> Self {
        Self {
            double_jump: registry.is_kind_unlocked(AbilityKind::DoubleJump),
            wall_stick: registry.is_kind_unlocked(AbilityKind::WallStick),
            dash: registry.is_kind_unlocked(AbilityKind::Dash),
            diving: registry.is_kind_unlocked(AbilityKind::Diving),
        }
    }

    pub fn all() -> Self {
        Self {
            double_jump: true,
            wall_stick: true,
            dash: true,
            diving: true,
        }
    }

    pub fn none() -> Self {
        Self::default()
    }
}
