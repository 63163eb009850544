//! Validation for cross-references between content and the controller.

use crate::abilities::{AbilityKind, AbilityRegistry};
use crate::movement::{MotionTuning, PLAYER_SIZE};

/// A content problem that does not stop the game but is worth a warning.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationWarning {
    /// The controller gates on this ability but the table never defines it,
    /// so it can never be unlocked.
    MissingAbility { name: &'static str },
    /// Two abilities share a milestone; they unlock together.
    SharedMilestone { milestone: u32, names: Vec<String> },
    /// The wall ray starts at the body centre and ends inside the collider,
    /// so a wall touching the body goes undetected.
    ShortWallProbe { distance: f32, body_half_width: f32 },
}

impl std::fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationWarning::MissingAbility { name } => write!(
                f,
                "ability '{}' is used by the motion controller but not defined; it stays locked",
                name
            ),
            ValidationWarning::SharedMilestone { milestone, names } => write!(
                f,
                "milestone {} unlocks several abilities at once: {}",
                milestone,
                names.join(", ")
            ),
            ValidationWarning::ShortWallProbe {
                distance,
                body_half_width,
            } => write!(
                f,
                "wall_check_distance {} does not reach past the player's half width {}",
                distance, body_half_width
            ),
        }
    }
}

/// Check the loaded ledger and tuning against what the controller expects.
/// Returns a list of warnings, empty if everything lines up.
pub fn validate_content(
    registry: &AbilityRegistry,
    tuning: &MotionTuning,
) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    for kind in AbilityKind::ALL {
        if registry.get(kind.name()).is_none() {
            warnings.push(ValidationWarning::MissingAbility { name: kind.name() });
        }
    }

    let mut milestones: Vec<u32> = registry.iter().map(|a| a.unlock_milestone()).collect();
    milestones.sort_unstable();
    milestones.dedup();
    for milestone in milestones {
        let names: Vec<String> = registry
            .iter()
            .filter(|a| a.unlock_milestone() == milestone)
            .map(|a| a.name().to_string())
            .collect();
        if names.len() > 1 {
            warnings.push(ValidationWarning::SharedMilestone { milestone, names });
        }
    }

    let body_half_width = PLAYER_SIZE.x / 2.0;
    if tuning.wall_check_distance <= body_half_width {
        warnings.push(ValidationWarning::ShortWallProbe {
            distance: tuning.wall_check_distance,
            body_half_width,
        });
    }

    warnings
}
