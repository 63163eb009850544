//! Movement domain: the per-character motion state and its transitions.
//!
//! The mutually exclusive abilities (dash, wall stick, dive) share one
//! [`Action`] slot, so "dashing while wall-sticking" cannot be represented.
//! Water contact and double-jump eligibility are separate enums because they
//! legitimately overlap with the action (a dive continues underwater).

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::movement::MotionTuning;

/// Dash time left below this counts as expired.
const DASH_EXPIRY_EPSILON: f32 = 1e-4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Facing {
    #[default]
    Right,
    Left,
}

impl Facing {
    pub fn sign(self) -> f32 {
        match self {
            Facing::Right => 1.0,
            Facing::Left => -1.0,
        }
    }
}

/// The one exclusive ability in progress.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Action {
    #[default]
    Free,
    Dashing {
        time_left: f32,
    },
    WallSticking {
        timer: f32,
    },
    Diving,
}

/// Inputs to [`Action::next`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Transition {
    BeginDash { duration: f32 },
    /// Dash integration consumed `dt` of the remaining time.
    DashTick { dt: f32 },
    /// Wall contact held for another `dt` while still under budget.
    HoldWall { dt: f32 },
    ReleaseWall,
    BeginDive,
    EndDive,
}

impl Action {
    /// The single transition table for exclusive abilities. Pairs that are
    /// not listed leave the action unchanged.
    pub fn next(self, transition: Transition) -> Action {
        use Action::*;
        use Transition::*;

        match (self, transition) {
            // A dash runs to completion; nothing else may take the slot.
            (Dashing { time_left }, DashTick { dt }) => {
                let remaining = time_left - dt;
                if remaining > DASH_EXPIRY_EPSILON {
                    Dashing {
                        time_left: remaining,
                    }
                } else {
                    Free
                }
            }
            (Dashing { .. }, _) => self,

            (_, BeginDash { duration }) => Dashing {
                time_left: duration,
            },

            (WallSticking { timer }, HoldWall { dt }) => WallSticking { timer: timer + dt },
            (Free | Diving, HoldWall { dt }) => WallSticking { timer: dt },
            (WallSticking { .. }, ReleaseWall) => Free,

            (Free | WallSticking { .. }, BeginDive) => Diving,
            (Diving, EndDive) => Free,

            _ => self,
        }
    }

    pub fn is_dashing(&self) -> bool {
        matches!(self, Action::Dashing { .. })
    }

    pub fn is_wall_sticking(&self) -> bool {
        matches!(self, Action::WallSticking { .. })
    }

    pub fn is_diving(&self) -> bool {
        matches!(self, Action::Diving)
    }

    /// Remaining dash time, only while dashing.
    pub fn dash_time_left(&self) -> Option<f32> {
        match self {
            Action::Dashing { time_left } => Some(*time_left),
            _ => None,
        }
    }

    /// Time spent on the current wall; zero when not sticking.
    pub fn wall_stick_timer(&self) -> f32 {
        match self {
            Action::WallSticking { timer } => *timer,
            _ => 0.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WaterContact {
    #[default]
    Dry,
    Submerged,
    Surface,
}

impl WaterContact {
    pub fn is_in_water(self) -> bool {
        !matches!(self, WaterContact::Dry)
    }

    pub fn is_on_surface(self) -> bool {
        matches!(self, WaterContact::Surface)
    }

    pub fn is_submerged(self) -> bool {
        matches!(self, WaterContact::Submerged)
    }
}

/// Double-jump eligibility. Only a grounded jump makes it `Ready` again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AirJump {
    #[default]
    Ready,
    Spent,
}

/// Seven-way view of what the character is doing, for logs and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MotionPhase {
    Grounded,
    Airborne,
    Dashing,
    WallSticking,
    Diving,
    SwimmingSurface,
    SwimmingSubmerged,
}

/// Controller state for one character. Requires the rigid body components the
/// controller writes, so a controller cannot be spawned without a body.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
#[require(RigidBody, LinearVelocity, LinearDamping, ConstantForce)]
pub struct MotionState {
    pub facing: Facing,
    /// Smoothed horizontal speed magnitude; input supplies the sign.
    pub current_speed: f32,
    pub action: Action,
    pub water: WaterContact,
    pub air_jump: AirJump,
    /// Set when the wall-stick budget ran out while still touching the wall.
    /// Cleared when contact breaks, so the same wall cannot be re-stuck.
    pub wall_stick_spent: bool,
}

impl MotionState {
    /// Grounded, idle, facing right, moving at walk speed once input arrives.
    pub fn new(tuning: &MotionTuning) -> Self {
        Self {
            facing: Facing::Right,
            current_speed: tuning.walk_speed,
            action: Action::Free,
            water: WaterContact::Dry,
            air_jump: AirJump::Ready,
            wall_stick_spent: false,
        }
    }

    pub fn reset(&mut self, tuning: &MotionTuning) {
        *self = Self::new(tuning);
    }

    pub fn is_dashing(&self) -> bool {
        self.action.is_dashing()
    }

    pub fn is_wall_sticking(&self) -> bool {
        self.action.is_wall_sticking()
    }

    pub fn is_diving(&self) -> bool {
        self.action.is_diving()
    }

    pub fn is_in_water(&self) -> bool {
        self.water.is_in_water()
    }

    pub fn is_on_water_surface(&self) -> bool {
        self.water.is_on_surface()
    }

    pub fn can_double_jump(&self) -> bool {
        self.air_jump == AirJump::Ready
    }

    pub fn has_double_jumped(&self) -> bool {
        self.air_jump == AirJump::Spent
    }

    pub fn phase(&self, grounded: bool) -> MotionPhase {
        match (self.action, self.water) {
            (Action::Dashing { .. }, _) => MotionPhase::Dashing,
            (Action::WallSticking { .. }, _) => MotionPhase::WallSticking,
            (Action::Diving, _) => MotionPhase::Diving,
            (Action::Free, WaterContact::Surface) => MotionPhase::SwimmingSurface,
            (Action::Free, WaterContact::Submerged) => MotionPhase::SwimmingSubmerged,
            (Action::Free, WaterContact::Dry) if grounded => MotionPhase::Grounded,
            (Action::Free, WaterContact::Dry) => MotionPhase::Airborne,
        }
    }
}
