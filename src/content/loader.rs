//! Loader for RON content files at startup.

use ron::Options;
use std::fs;
use std::path::Path;
use thiserror::Error;

use super::data::*;
use crate::abilities::{AbilityRegistry, RegistryError};
use crate::movement::{MotionTuning, TuningError};

/// Error type for content loading failures.
#[derive(Debug, Error)]
pub enum ContentLoadError {
    #[error("Failed to load {file}: IO error: {source}")]
    Io {
        file: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to load {file}: Parse error: {message}")]
    Parse { file: String, message: String },
    #[error("Invalid ability table: {0}")]
    Registry(#[from] RegistryError),
    #[error("Invalid motion tuning: {0}")]
    Tuning(#[from] TuningError),
}

/// Create RON options with extensions enabled for more flexible parsing.
fn ron_options() -> Options {
    Options::default().with_default_extension(ron::extensions::Extensions::IMPLICIT_SOME)
}

fn read_file(path: &Path) -> Result<String, ContentLoadError> {
    fs::read_to_string(path).map_err(|source| ContentLoadError::Io {
        file: path.display().to_string(),
        source,
    })
}

/// Parse a RON string containing a DataFile<T> wrapper.
pub fn parse_data_file<T>(file: &str, contents: &str) -> Result<Vec<T>, ContentLoadError>
where
    T: for<'de> serde::Deserialize<'de>,
{
    let data: DataFile<T> =
        ron_options()
            .from_str(contents)
            .map_err(|e| ContentLoadError::Parse {
                file: file.to_string(),
                message: e.to_string(),
            })?;

    Ok(data.items)
}

/// Parse a single RON struct (not wrapped in DataFile).
pub fn parse_single_file<T>(file: &str, contents: &str) -> Result<T, ContentLoadError>
where
    T: for<'de> serde::Deserialize<'de>,
{
    ron_options()
        .from_str(contents)
        .map_err(|e| ContentLoadError::Parse {
            file: file.to_string(),
            message: e.to_string(),
        })
}

/// Build the ability ledger from abilities.ron source text.
pub fn parse_abilities(file: &str, contents: &str) -> Result<AbilityRegistry, ContentLoadError> {
    let defs = parse_data_file::<AbilityDef>(file, contents)?;
    Ok(AbilityRegistry::new(defs)?)
}

/// Parse and validate motion_tuning.ron source text.
pub fn parse_motion_tuning(file: &str, contents: &str) -> Result<MotionTuning, ContentLoadError> {
    let tuning = parse_single_file::<MotionTuning>(file, contents)?;
    tuning.validate()?;
    Ok(tuning)
}

/// Everything the motion game needs from assets/data.
#[derive(Debug)]
pub struct LoadedContent {
    pub abilities: AbilityRegistry,
    pub tuning: MotionTuning,
}

/// Load all content from assets/data/*.ron.
/// Returns errors for any files that fail to load.
pub fn load_all_content(base_path: &Path) -> Result<LoadedContent, Vec<ContentLoadError>> {
    let mut errors = Vec::new();

    let abilities_path = base_path.join("abilities.ron");
    let abilities = read_file(&abilities_path)
        .and_then(|text| parse_abilities(&abilities_path.display().to_string(), &text))
        .map_err(|e| errors.push(e))
        .ok();

    let tuning_path = base_path.join("motion_tuning.ron");
    let tuning = read_file(&tuning_path)
        .and_then(|text| parse_motion_tuning(&tuning_path.display().to_string(), &text))
        .map_err(|e| errors.push(e))
        .ok();

    match (abilities, tuning) {
        (Some(abilities), Some(tuning)) if errors.is_empty() => {
            Ok(LoadedContent { abilities, tuning })
        }
        _ => Err(errors),
    }
}
