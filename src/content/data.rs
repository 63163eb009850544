//! Data definitions for the RON content files.
//!
//! These structs mirror assets/data/*.ron. Motion tuning is a single struct
//! and deserializes straight into [`crate::movement::MotionTuning`].

use serde::{Deserialize, Serialize};

// ============================================================================
// Common wrapper for RON files with schema_version and items
// ============================================================================

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DataFile<T> {
    pub schema_version: u32,
    pub items: Vec<T>,
}

// ============================================================================
// Abilities (abilities.ron)
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct AbilityDef {
    pub name: String,
    /// Story point that unlocks this ability.
    pub unlock_milestone: u32,
    /// Start the session already unlocked.
    #[serde(default)]
    pub unlocked: bool,
}

impl AbilityDef {
    pub fn locked(name: impl Into<String>, unlock_milestone: u32) -> Self {
        Self {
            name: name.into(),
            unlock_milestone,
            unlocked: false,
        }
    }

    /// Ability table used when abilities.ron cannot be loaded.
    pub fn builtin() -> Vec<AbilityDef> {
        vec![
            AbilityDef::locked("DoubleJump", 1),
            AbilityDef::locked("Dash", 2),
            AbilityDef::locked("WallStick", 3),
            AbilityDef::locked("Diving", 4),
        ]
    }
}
