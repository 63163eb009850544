//! Content domain: RON data for abilities and motion tuning.

mod data;
mod loader;
mod validation;

pub use data::{AbilityDef, DataFile};
pub use loader::{
    ContentLoadError, LoadedContent, load_all_content, parse_abilities, parse_motion_tuning,
};
pub use validation::{ValidationWarning, validate_content};

use bevy::prelude::*;
use std::path::PathBuf;

use crate::abilities::AbilityRegistry;
use crate::movement::MotionTuning;

pub const DEFAULT_DATA_DIR: &str = "assets/data";

/// Loads content while the app is being built, so the ledger and tuning exist
/// before any system runs. Failures fall back to built-in defaults.
pub struct ContentPlugin {
    pub data_dir: PathBuf,
}

impl Default for ContentPlugin {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
        }
    }
}

impl Plugin for ContentPlugin {
    fn build(&self, app: &mut App) {
        let (abilities, tuning) = match load_all_content(&self.data_dir) {
            Ok(content) => {
                info!(
                    "Content loaded from {}: {} abilities",
                    self.data_dir.display(),
                    content.abilities.len()
                );
                (content.abilities, content.tuning)
            }
            Err(errors) => {
                for e in &errors {
                    error!("{}", e);
                }
                warn!("Content not available, using built-in abilities and default tuning");
                (builtin_registry(), MotionTuning::default())
            }
        };

        for warning in validate_content(&abilities, &tuning) {
            warn!("Content validation: {}", warning);
        }

        app.insert_resource(Time::<Fixed>::from_hz(tuning.fixed_hz))
            .insert_resource(abilities)
            .insert_resource(tuning);
    }
}

/// Ledger used when abilities.ron cannot be loaded.
pub fn builtin_registry() -> AbilityRegistry {
    // The built-in table has unique names by construction.
    AbilityRegistry::new(AbilityDef::builtin()).unwrap_or_default()
}
