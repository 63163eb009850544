//! Movement domain: tuning and input resources.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Every knob of the motion controller. Loaded from
/// assets/data/motion_tuning.ron; missing fields take the defaults below.
///
/// Distances and speeds are in world units (pixels), times in seconds.
#[derive(Resource, Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct MotionTuning {
    // Horizontal movement
    pub walk_speed: f32,
    pub jump_peak_speed_multiplier: f32,
    pub speed_transition_smoothness: f32,

    // Ground probe, relative to the body centre
    pub ground_check_offset: f32,
    pub ground_check_half_width: f32,
    pub ground_check_half_height: f32,

    // Jumping
    pub jump_force: f32,
    pub fall_multiplier: f32,
    pub low_jump_multiplier: f32,
    pub max_fall_speed: f32,
    /// |vy| below this counts as the peak of a jump (hang-time speed bonus).
    pub jump_peak_threshold: f32,
    /// Applied to upward velocity when jump is released early.
    pub jump_cut_factor: f32,
    pub double_jump_factor: f32,
    pub water_exit_jump_factor: f32,
    /// Wall-jump push away from the wall, as a multiple of walk speed.
    pub wall_jump_push_factor: f32,

    // Dash
    pub dash_speed: f32,
    pub dash_duration: f32,
    /// Airborne dashes need at least this much horizontal speed.
    pub dash_min_speed: f32,

    // Dive
    pub dive_force: f32,
    /// How far below the body the dive trigger looks for water.
    pub dive_lookahead: f32,
    /// How far below the body a landed dive looks before it is cancelled.
    pub dive_exit_lookahead: f32,

    // Wall stick
    pub wall_stick_time: f32,
    pub wall_check_distance: f32,
    pub wall_slide_speed: f32,

    // Water
    pub water_surface_speed: f32,
    pub underwater_speed: f32,
    pub buoyancy_force: f32,
    pub water_drag: f32,
    pub water_probe_half_extent: f32,
    /// Body within this distance below the water top is on the surface.
    pub surface_tolerance: f32,

    /// Integration phase rate.
    pub fixed_hz: f64,
}

impl Default for MotionTuning {
    fn default() -> Self {
        Self {
            walk_speed: 320.0,
            jump_peak_speed_multiplier: 1.5,
            speed_transition_smoothness: 5.0,
            ground_check_offset: 24.0,
            ground_check_half_width: 10.0,
            ground_check_half_height: 3.0,
            jump_force: 680.0,
            fall_multiplier: 2.5,
            low_jump_multiplier: 2.0,
            max_fall_speed: 900.0,
            jump_peak_threshold: 40.0,
            jump_cut_factor: 0.5,
            double_jump_factor: 0.8,
            water_exit_jump_factor: 0.7,
            wall_jump_push_factor: 1.2,
            dash_speed: 900.0,
            dash_duration: 0.2,
            dash_min_speed: 4.0,
            dive_force: 900.0,
            dive_lookahead: 64.0,
            dive_exit_lookahead: 32.0,
            wall_stick_time: 0.5,
            wall_check_distance: 18.0,
            wall_slide_speed: 60.0,
            water_surface_speed: 150.0,
            underwater_speed: 120.0,
            buoyancy_force: 600.0,
            water_drag: 2.0,
            water_probe_half_extent: 12.0,
            surface_tolerance: 10.0,
            fixed_hz: 50.0,
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum TuningError {
    #[error("tuning field '{field}' must be a finite number, got {value}")]
    NotFinite { field: &'static str, value: f64 },
    #[error("tuning field '{field}' must be positive, got {value}")]
    NonPositive { field: &'static str, value: f64 },
    #[error("tuning field '{field}' must be at least 1.0, got {value}")]
    BelowOne { field: &'static str, value: f64 },
    #[error("tuning field '{field}' must not be negative, got {value}")]
    Negative { field: &'static str, value: f64 },
}

impl MotionTuning {
    /// Reject values the controller cannot run with. Called once when content
    /// loads; the per-frame path assumes a validated tuning.
    pub fn validate(&self) -> Result<(), TuningError> {
        let positive = [
            ("walk_speed", self.walk_speed),
            ("jump_force", self.jump_force),
            ("max_fall_speed", self.max_fall_speed),
            ("dash_speed", self.dash_speed),
            ("dash_duration", self.dash_duration),
            ("dive_force", self.dive_force),
            ("dive_lookahead", self.dive_lookahead),
            ("dive_exit_lookahead", self.dive_exit_lookahead),
            ("wall_check_distance", self.wall_check_distance),
            ("underwater_speed", self.underwater_speed),
            ("water_surface_speed", self.water_surface_speed),
            ("ground_check_half_width", self.ground_check_half_width),
            ("ground_check_half_height", self.ground_check_half_height),
            ("water_probe_half_extent", self.water_probe_half_extent),
        ];
        for (field, value) in positive {
            check_finite(field, value)?;
            if value <= 0.0 {
                return Err(TuningError::NonPositive {
                    field,
                    value: value as f64,
                });
            }
        }
        if !self.fixed_hz.is_finite() {
            return Err(TuningError::NotFinite {
                field: "fixed_hz",
                value: self.fixed_hz,
            });
        }
        if self.fixed_hz <= 0.0 {
            return Err(TuningError::NonPositive {
                field: "fixed_hz",
                value: self.fixed_hz,
            });
        }

        let multipliers = [
            ("jump_peak_speed_multiplier", self.jump_peak_speed_multiplier),
            ("fall_multiplier", self.fall_multiplier),
            ("low_jump_multiplier", self.low_jump_multiplier),
        ];
        for (field, value) in multipliers {
            check_finite(field, value)?;
            if value < 1.0 {
                return Err(TuningError::BelowOne {
                    field,
                    value: value as f64,
                });
            }
        }

        let non_negative = [
            ("speed_transition_smoothness", self.speed_transition_smoothness),
            ("jump_peak_threshold", self.jump_peak_threshold),
            ("jump_cut_factor", self.jump_cut_factor),
            ("double_jump_factor", self.double_jump_factor),
            ("water_exit_jump_factor", self.water_exit_jump_factor),
            ("wall_jump_push_factor", self.wall_jump_push_factor),
            ("dash_min_speed", self.dash_min_speed),
            ("wall_stick_time", self.wall_stick_time),
            ("wall_slide_speed", self.wall_slide_speed),
            ("buoyancy_force", self.buoyancy_force),
            ("water_drag", self.water_drag),
            ("surface_tolerance", self.surface_tolerance),
            ("ground_check_offset", self.ground_check_offset),
        ];
        for (field, value) in non_negative {
            check_finite(field, value)?;
            if value < 0.0 {
                return Err(TuningError::Negative {
                    field,
                    value: value as f64,
                });
            }
        }

        Ok(())
    }
}

/// RON accepts `NaN` and `inf`; neither survives the controller's arithmetic.
fn check_finite(field: &'static str, value: f32) -> Result<(), TuningError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(TuningError::NotFinite {
            field,
            value: value as f64,
        })
    }
}

/// Raw input for one frame. Edge flags (`*_just_*`) are true only on the
/// frame the key changed.
#[derive(Resource, Debug, Clone, Default)]
pub struct MovementInput {
    /// x: horizontal walk axis, y: vertical swim axis. Both in [-1, 1].
    pub axis: Vec2,
    pub jump_just_pressed: bool,
    pub jump_just_released: bool,
    pub jump_held: bool,
    pub dash_just_pressed: bool,
    pub dive_just_pressed: bool,
}

impl MovementInput {
    /// Vertical swim direction: -1, 0 or 1.
    pub fn swim_direction(&self) -> f32 {
        if self.axis.y > 0.1 {
            1.0
        } else if self.axis.y < -0.1 {
            -1.0
        } else {
            0.0
        }
    }
}
