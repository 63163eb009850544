//! Movement domain: the motion controller as two pure steps.
//!
//! [`decide`] runs once per rendered frame and reacts to input edges.
//! [`integrate`] runs once per fixed physics step and applies continuous
//! velocity changes. Neither touches the ECS: callers hand in snapshots of
//! input, probes and capabilities and write the returned values back.

use bevy::prelude::*;

use crate::abilities::Capabilities;
use crate::movement::state::Transition;
use crate::movement::{AirJump, Facing, MotionState, MotionTuning, MovementInput, WaterContact};

/// Environment probe results gathered for a decision step.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DecisionProbes {
    pub grounded: bool,
    /// Wall ray in the facing direction hit a wall.
    pub wall_ahead: bool,
    /// Top of the overlapped water volume, if any.
    pub water_top: Option<f32>,
    /// Water found within the dive lookahead below the body.
    pub water_below: bool,
    pub body_y: f32,
}

/// Environment probe results gathered for an integration step.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct IntegrationProbes {
    pub grounded: bool,
    /// Water found within the dive-exit lookahead below the body.
    pub water_below: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Decision {
    pub state: MotionState,
    pub velocity: Vec2,
}

/// What the physics body should carry into the next solver step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyCommand {
    pub velocity: Vec2,
    /// Force to apply for this step only.
    pub force: Vec2,
    /// Linear drag coefficient.
    pub drag: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Integration {
    pub state: MotionState,
    pub body: BodyCommand,
}

/// Decision phase: water, wall, ability triggers, jump, facing, in that order.
pub fn decide(
    tuning: &MotionTuning,
    state: &MotionState,
    input: &MovementInput,
    probes: &DecisionProbes,
    caps: Capabilities,
    velocity: Vec2,
    dt: f32,
) -> Decision {
    let mut s = *state;
    let mut v = velocity;

    update_water_contact(tuning, &mut s, probes);
    update_wall_stick(tuning, &mut s, probes, caps, &mut v, dt);
    trigger_abilities(tuning, &mut s, input, probes, caps, &mut v);
    resolve_jump(tuning, &mut s, input, probes, caps, &mut v);
    update_facing(&mut s, input);

    Decision {
        state: s,
        velocity: v,
    }
}

fn update_water_contact(tuning: &MotionTuning, s: &mut MotionState, probes: &DecisionProbes) {
    s.water = match probes.water_top {
        Some(top) if probes.body_y >= top - tuning.surface_tolerance => WaterContact::Surface,
        Some(_) => WaterContact::Submerged,
        None => WaterContact::Dry,
    };

    // A dive only lives while wet.
    if !s.water.is_in_water() {
        s.action = s.action.next(Transition::EndDive);
    }
}

fn update_wall_stick(
    tuning: &MotionTuning,
    s: &mut MotionState,
    probes: &DecisionProbes,
    caps: Capabilities,
    v: &mut Vec2,
    dt: f32,
) {
    // Dashing owns the action slot; water releases any grip outright.
    if s.action.is_dashing() {
        return;
    }
    if s.water.is_in_water() {
        s.action = s.action.next(Transition::ReleaseWall);
        s.wall_stick_spent = false;
        return;
    }

    let contact = probes.wall_ahead && !probes.grounded && caps.wall_stick;
    if !contact {
        s.action = s.action.next(Transition::ReleaseWall);
        s.wall_stick_spent = false;
        return;
    }

    if s.wall_stick_spent {
        return;
    }

    if s.action.wall_stick_timer() < tuning.wall_stick_time {
        s.action = s.action.next(Transition::HoldWall { dt });
        *v = Vec2::new(0.0, v.y.clamp(-tuning.wall_slide_speed, 0.0));
    } else {
        s.action = s.action.next(Transition::ReleaseWall);
        s.wall_stick_spent = true;
    }
}

fn trigger_abilities(
    tuning: &MotionTuning,
    s: &mut MotionState,
    input: &MovementInput,
    probes: &DecisionProbes,
    caps: Capabilities,
    v: &mut Vec2,
) {
    if input.dash_just_pressed
        && caps.dash
        && !s.water.is_in_water()
        && !s.action.is_dashing()
        && (probes.grounded || v.x.abs() > tuning.dash_min_speed)
    {
        s.action = s.action.next(Transition::BeginDash {
            duration: tuning.dash_duration,
        });
    }

    if input.dive_just_pressed && caps.diving && !probes.grounded {
        if !s.action.is_diving() && !s.action.is_dashing() && !s.water.is_in_water() {
            if probes.water_below {
                s.action = s.action.next(Transition::BeginDive);
                *v = Vec2::new(0.0, -tuning.dive_force);
            }
        } else if s.water.is_submerged() {
            // Already underwater: dive deeper instead.
            *v = Vec2::new(0.0, -tuning.underwater_speed);
        }
    }

    if probes.grounded {
        s.action = s.action.next(Transition::EndDive);
    }
}

fn resolve_jump(
    tuning: &MotionTuning,
    s: &mut MotionState,
    input: &MovementInput,
    probes: &DecisionProbes,
    caps: Capabilities,
    v: &mut Vec2,
) {
    // Variable jump height.
    if input.jump_just_released && v.y > 0.0 && !s.water.is_in_water() {
        v.y *= tuning.jump_cut_factor;
    }

    if !input.jump_just_pressed {
        return;
    }

    // Strict priority: the first matching branch is the only one that fires.
    if s.water.is_on_surface() && s.action.is_diving() {
        s.action = s.action.next(Transition::EndDive);
        v.y = tuning.jump_force * tuning.water_exit_jump_factor;
    } else if probes.grounded {
        v.y = tuning.jump_force;
        s.air_jump = AirJump::Ready;
        s.action = s.action.next(Transition::EndDive);
    } else if caps.double_jump && s.can_double_jump() && !s.water.is_in_water() {
        v.y = tuning.jump_force * tuning.double_jump_factor;
        s.air_jump = AirJump::Spent;
        s.action = s.action.next(Transition::EndDive);
    } else if s.action.is_wall_sticking() && caps.wall_stick {
        *v = Vec2::new(
            -s.facing.sign() * tuning.walk_speed * tuning.wall_jump_push_factor,
            tuning.jump_force,
        );
        s.action = s.action.next(Transition::ReleaseWall);
        s.wall_stick_spent = false;
    } else if s.water.is_submerged() {
        v.y = tuning.underwater_speed;
    }
}

fn update_facing(s: &mut MotionState, input: &MovementInput) {
    if s.action.is_diving() {
        return;
    }
    if input.axis.x < 0.0 {
        s.facing = Facing::Left;
    } else if input.axis.x > 0.0 {
        s.facing = Facing::Right;
    }
}

/// Integration phase: walk, jump gravity shaping, fall clamp, dash, dive
/// exit, water, in that order. `gravity_y` is the world gravity (negative
/// pointing down) and `dt` the fixed timestep.
pub fn integrate(
    tuning: &MotionTuning,
    state: &MotionState,
    input: &MovementInput,
    probes: &IntegrationProbes,
    velocity: Vec2,
    gravity_y: f32,
    dt: f32,
) -> Integration {
    let mut s = *state;
    let mut v = velocity;
    let wet = s.water.is_in_water();

    if !s.action.is_dashing() && !s.action.is_wall_sticking() {
        walk(tuning, &mut s, input, probes, &mut v, dt);
    }

    if !s.action.is_wall_sticking() && !wet {
        if v.y < 0.0 {
            v.y += gravity_y * (tuning.fall_multiplier - 1.0) * dt;
        } else if v.y > 0.0 && !input.jump_held {
            v.y += gravity_y * (tuning.low_jump_multiplier - 1.0) * dt;
        }
    }

    if v.y < -tuning.max_fall_speed && !wet {
        v.y = -tuning.max_fall_speed;
    }

    if s.action.is_dashing() {
        v = Vec2::new(tuning.dash_speed * s.facing.sign(), 0.0);
        s.action = s.action.next(Transition::DashTick { dt });
    }

    // Landed out of a dive that never reached water.
    if s.action.is_diving() && !wet && probes.grounded && !probes.water_below {
        s.action = s.action.next(Transition::EndDive);
    }

    let mut force = Vec2::ZERO;
    let drag = if wet {
        if !s.action.is_diving() && v.y < 0.0 {
            force = Vec2::Y * tuning.buoyancy_force;
        }
        if s.water.is_submerged() && !s.action.is_diving() {
            v.x = input.axis.x * tuning.underwater_speed;
            let swim = input.swim_direction();
            if swim != 0.0 {
                v.y = swim * tuning.underwater_speed;
            }
        }
        tuning.water_drag
    } else {
        0.0
    };

    Integration {
        state: s,
        body: BodyCommand {
            velocity: v,
            force,
            drag,
        },
    }
}

fn walk(
    tuning: &MotionTuning,
    s: &mut MotionState,
    input: &MovementInput,
    probes: &IntegrationProbes,
    v: &mut Vec2,
    dt: f32,
) {
    if s.action.is_diving() && s.water.is_on_surface() {
        *v = Vec2::new(input.axis.x * tuning.water_surface_speed, 0.0);
        return;
    }

    let mut target = tuning.walk_speed;
    // Hang-time bonus near the apex of a jump.
    if !probes.grounded && v.y.abs() < tuning.jump_peak_threshold && !s.water.is_in_water() {
        target *= tuning.jump_peak_speed_multiplier;
    }

    let t = (tuning.speed_transition_smoothness * dt).clamp(0.0, 1.0);
    s.current_speed += (target - s.current_speed) * t;
    v.x = s.current_speed * input.axis.x;
}
