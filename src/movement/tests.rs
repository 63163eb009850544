//! Movement domain: tests for the decision and integration steps.
//!
//! Everything runs on synthetic probe snapshots; no physics world needed.

use avian2d::prelude::*;
use bevy::prelude::*;

use super::controller::{DecisionProbes, IntegrationProbes, decide, integrate};
use super::{
    Action, AirJump, Facing, MotionPhase, MotionState, MotionTuning, MovementInput, Player,
    RespawnPlayerEvent, SpawnPoint, Transition, WaterContact,
};
use super::systems::handle_respawn;
use crate::abilities::Capabilities;

const FRAME_DT: f32 = 1.0 / 60.0;
const FIXED_DT: f32 = 0.02;
const GRAVITY_Y: f32 = -1800.0;

fn tuning() -> MotionTuning {
    MotionTuning::default()
}

fn idle() -> MotionState {
    MotionState::new(&tuning())
}

fn grounded() -> DecisionProbes {
    DecisionProbes {
        grounded: true,
        ..default()
    }
}

fn airborne() -> DecisionProbes {
    DecisionProbes::default()
}

/// Body overlapping a water volume whose top is `depth` above the body.
fn in_water(depth: f32) -> DecisionProbes {
    DecisionProbes {
        water_top: Some(depth),
        body_y: 0.0,
        ..default()
    }
}

fn press_jump() -> MovementInput {
    MovementInput {
        jump_just_pressed: true,
        jump_held: true,
        ..default()
    }
}

fn only(caps: impl FnOnce(&mut Capabilities)) -> Capabilities {
    let mut c = Capabilities::none();
    caps(&mut c);
    c
}

fn step_decide(
    state: &MotionState,
    input: &MovementInput,
    probes: &DecisionProbes,
    caps: Capabilities,
    velocity: Vec2,
) -> (MotionState, Vec2) {
    let d = decide(&tuning(), state, input, probes, caps, velocity, FRAME_DT);
    (d.state, d.velocity)
}

// -----------------------------------------------------------------------------
// Jumping
// -----------------------------------------------------------------------------

#[test]
fn test_grounded_jump_without_double_jump() {
    let t = tuning();
    let caps = Capabilities::none();

    let (state, velocity) = step_decide(&idle(), &press_jump(), &grounded(), caps, Vec2::ZERO);
    assert_eq!(velocity.y, t.jump_force);
    assert!(state.can_double_jump());

    // Mid-air press with DoubleJump locked does nothing.
    let rising = Vec2::new(0.0, 300.0);
    let (state, velocity) = step_decide(&state, &press_jump(), &airborne(), caps, rising);
    assert_eq!(velocity, rising);
    assert!(!state.has_double_jumped());
}

#[test]
fn test_double_jump_once_per_landing() {
    let t = tuning();
    let caps = only(|c| c.double_jump = true);
    let falling = Vec2::new(50.0, -120.0);

    let (state, velocity) = step_decide(&idle(), &press_jump(), &airborne(), caps, falling);
    assert_eq!(velocity.y, t.jump_force * t.double_jump_factor);
    assert_eq!(velocity.x, falling.x);
    assert!(state.has_double_jumped());
    assert!(!state.can_double_jump());

    let (state, second) = step_decide(&state, &press_jump(), &airborne(), caps, falling);
    assert_eq!(second, falling);
    assert_eq!(state.air_jump, AirJump::Spent);
}

#[test]
fn test_double_jump_eligibility_resets_only_on_grounded_jump() {
    let caps = only(|c| c.double_jump = true);
    let mut state = idle();
    state.air_jump = AirJump::Spent;

    // Landing alone does not restore it.
    let (state, _) = step_decide(&state, &MovementInput::default(), &grounded(), caps, Vec2::ZERO);
    assert_eq!(state.air_jump, AirJump::Spent);

    let (state, _) = step_decide(&state, &press_jump(), &grounded(), caps, Vec2::ZERO);
    assert!(state.can_double_jump());
    assert!(!state.has_double_jumped());
}

#[test]
fn test_no_double_jump_in_water() {
    let t = tuning();
    let caps = Capabilities::all();

    let (state, velocity) = step_decide(&idle(), &press_jump(), &in_water(100.0), caps, Vec2::ZERO);

    // Falls through to the swim-up branch instead.
    assert_eq!(velocity.y, t.underwater_speed);
    assert_eq!(state.air_jump, AirJump::Ready);
}

#[test]
fn test_releasing_jump_cuts_ascent() {
    let t = tuning();
    let release = MovementInput {
        jump_just_released: true,
        ..default()
    };

    let (_, velocity) = step_decide(
        &idle(),
        &release,
        &airborne(),
        Capabilities::none(),
        Vec2::new(0.0, 400.0),
    );
    assert_eq!(velocity.y, 400.0 * t.jump_cut_factor);

    // Falling or swimming keeps its velocity.
    let (_, velocity) = step_decide(
        &idle(),
        &release,
        &airborne(),
        Capabilities::none(),
        Vec2::new(0.0, -400.0),
    );
    assert_eq!(velocity.y, -400.0);

    let (_, velocity) = step_decide(
        &idle(),
        &release,
        &in_water(100.0),
        Capabilities::none(),
        Vec2::new(0.0, 100.0),
    );
    assert_eq!(velocity.y, 100.0);
}

#[test]
fn test_jump_out_of_dive_at_surface() {
    let t = tuning();
    let mut state = idle();
    state.action = Action::Diving;

    // Body 5 below the top: within surface tolerance.
    let (state, velocity) = step_decide(
        &state,
        &press_jump(),
        &in_water(5.0),
        Capabilities::all(),
        Vec2::new(30.0, 0.0),
    );

    assert!(!state.is_diving());
    assert!(state.is_on_water_surface());
    assert_eq!(velocity.y, t.jump_force * t.water_exit_jump_factor);
    assert_eq!(state.air_jump, AirJump::Ready);
}

// -----------------------------------------------------------------------------
// Wall stick and wall jump
// -----------------------------------------------------------------------------

fn wall_contact() -> DecisionProbes {
    DecisionProbes {
        wall_ahead: true,
        ..default()
    }
}

#[test]
fn test_wall_stick_holds_and_slows_slide() {
    let t = tuning();
    let caps = only(|c| c.wall_stick = true);

    let (state, velocity) = step_decide(
        &idle(),
        &MovementInput::default(),
        &wall_contact(),
        caps,
        Vec2::new(200.0, -500.0),
    );

    assert!(state.is_wall_sticking());
    assert_eq!(state.action.wall_stick_timer(), FRAME_DT);
    assert_eq!(velocity, Vec2::new(0.0, -t.wall_slide_speed));
}

#[test]
fn test_wall_stick_needs_ability_and_air() {
    let (state, _) = step_decide(
        &idle(),
        &MovementInput::default(),
        &wall_contact(),
        Capabilities::none(),
        Vec2::ZERO,
    );
    assert!(!state.is_wall_sticking());

    let on_ground = DecisionProbes {
        grounded: true,
        wall_ahead: true,
        ..default()
    };
    let (state, _) = step_decide(
        &idle(),
        &MovementInput::default(),
        &on_ground,
        Capabilities::all(),
        Vec2::ZERO,
    );
    assert!(!state.is_wall_sticking());
}

#[test]
fn test_wall_stick_expires_under_continued_contact() {
    let t = tuning();
    let caps = only(|c| c.wall_stick = true);
    let dt = 0.1;
    let mut state = idle();
    let mut released_at = None;

    for frame in 0..12 {
        let d = decide(
            &t,
            &state,
            &MovementInput::default(),
            &wall_contact(),
            caps,
            Vec2::new(0.0, -10.0),
            dt,
        );
        state = d.state;

        if frame == 0 {
            assert!(state.is_wall_sticking());
        }
        match released_at {
            None if !state.is_wall_sticking() => released_at = Some(frame),
            Some(_) => assert!(!state.is_wall_sticking(), "re-stuck at frame {}", frame),
            None => {}
        }
    }

    let released_at = released_at.expect("wall stick never expired");
    assert!((5..=6).contains(&released_at));
    assert_eq!(state.action.wall_stick_timer(), 0.0);
    assert!(state.wall_stick_spent);

    // Breaking contact re-arms the grip.
    let d = decide(
        &t,
        &state,
        &MovementInput::default(),
        &airborne(),
        caps,
        Vec2::ZERO,
        dt,
    );
    assert!(!d.state.wall_stick_spent);
    let d = decide(
        &t,
        &d.state,
        &MovementInput::default(),
        &wall_contact(),
        caps,
        Vec2::ZERO,
        dt,
    );
    assert!(d.state.is_wall_sticking());
}

#[test]
fn test_wall_jump_pushes_away_from_wall() {
    let t = tuning();
    let caps = only(|c| c.wall_stick = true);

    let (state, velocity) = step_decide(
        &idle(),
        &MovementInput::default(),
        &wall_contact(),
        caps,
        Vec2::new(0.0, -30.0),
    );
    assert!(state.is_wall_sticking());
    assert_eq!(state.facing, Facing::Right);

    let (state, velocity) = step_decide(&state, &press_jump(), &wall_contact(), caps, velocity);

    assert_eq!(
        velocity,
        Vec2::new(
            -Facing::Right.sign() * t.walk_speed * t.wall_jump_push_factor,
            t.jump_force
        )
    );
    assert!(!state.is_wall_sticking());
    assert_eq!(state.action.wall_stick_timer(), 0.0);
}

#[test]
fn test_double_jump_outranks_wall_jump() {
    let t = tuning();
    let caps = Capabilities::all();

    let (state, velocity) = step_decide(
        &idle(),
        &MovementInput::default(),
        &wall_contact(),
        caps,
        Vec2::ZERO,
    );
    let (state, velocity) = step_decide(&state, &press_jump(), &wall_contact(), caps, velocity);

    assert_eq!(velocity.x, 0.0);
    assert_eq!(velocity.y, t.jump_force * t.double_jump_factor);
    assert!(state.has_double_jumped());
    assert!(state.is_wall_sticking());
}

#[test]
fn test_water_suppresses_wall_stick() {
    let mut state = idle();
    state.action = Action::WallSticking { timer: 0.2 };
    let probes = DecisionProbes {
        wall_ahead: true,
        water_top: Some(100.0),
        ..default()
    };

    let (state, _) = step_decide(
        &state,
        &MovementInput::default(),
        &probes,
        Capabilities::all(),
        Vec2::ZERO,
    );

    assert!(!state.is_wall_sticking());
    assert_eq!(state.action.wall_stick_timer(), 0.0);
}

// -----------------------------------------------------------------------------
// Dash
// -----------------------------------------------------------------------------

fn press_dash() -> MovementInput {
    MovementInput {
        dash_just_pressed: true,
        axis: Vec2::X,
        ..default()
    }
}

#[test]
fn test_dash_gating() {
    let t = tuning();
    let caps = only(|c| c.dash = true);

    let (state, _) = step_decide(&idle(), &press_dash(), &grounded(), caps, Vec2::ZERO);
    assert_eq!(state.action.dash_time_left(), Some(t.dash_duration));

    // Airborne and standing still: no dash.
    let (state, _) = step_decide(&idle(), &press_dash(), &airborne(), caps, Vec2::ZERO);
    assert!(!state.is_dashing());

    // Airborne while already moving: dash.
    let (state, _) = step_decide(&idle(), &press_dash(), &airborne(), caps, Vec2::new(100.0, 0.0));
    assert!(state.is_dashing());

    // Locked or wet: no dash.
    let (state, _) = step_decide(
        &idle(),
        &press_dash(),
        &grounded(),
        Capabilities::none(),
        Vec2::ZERO,
    );
    assert!(!state.is_dashing());
    let (state, _) = step_decide(&idle(), &press_dash(), &in_water(100.0), caps, Vec2::new(100.0, 0.0));
    assert!(!state.is_dashing());
}

#[test]
fn test_dash_lasts_ten_fixed_steps() {
    let t = MotionTuning {
        dash_duration: 0.2,
        ..tuning()
    };
    let input = press_dash();
    let d = decide(
        &t,
        &idle(),
        &input,
        &grounded(),
        only(|c| c.dash = true),
        Vec2::ZERO,
        FRAME_DT,
    );
    let mut state = d.state;
    let mut velocity = d.velocity;
    let probes = IntegrationProbes {
        grounded: true,
        ..default()
    };

    for step in 1..=10 {
        assert!(state.is_dashing(), "dash ended early at step {}", step);
        let i = integrate(&t, &state, &input, &probes, velocity, GRAVITY_Y, FIXED_DT);
        state = i.state;
        velocity = i.body.velocity;
        assert_eq!(velocity, Vec2::new(t.dash_speed, 0.0));
    }
    assert!(!state.is_dashing());

    let i = integrate(&t, &state, &input, &probes, velocity, GRAVITY_Y, FIXED_DT);
    assert_eq!(i.body.velocity.x, i.state.current_speed * input.axis.x);
    assert_eq!(i.body.velocity.x, t.walk_speed);
}

#[test]
fn test_dashing_excludes_wall_stick() {
    let t = tuning();
    let caps = Capabilities::all();
    let mut state = idle();
    state.action = Action::Dashing { time_left: 0.1 };

    let (state, _) = step_decide(
        &state,
        &MovementInput::default(),
        &wall_contact(),
        caps,
        Vec2::new(t.dash_speed, 0.0),
    );

    assert!(state.is_dashing());
    assert!(!state.is_wall_sticking());
}

#[test]
fn test_dash_and_wall_stick_never_coexist() {
    let caps_options = [Capabilities::none(), Capabilities::all()];
    let probe_options = [
        airborne(),
        grounded(),
        wall_contact(),
        in_water(100.0),
        in_water(5.0),
    ];
    let inputs = [
        MovementInput::default(),
        press_jump(),
        press_dash(),
        MovementInput {
            dive_just_pressed: true,
            ..default()
        },
    ];
    let actions = [
        Action::Free,
        Action::Dashing { time_left: 0.1 },
        Action::WallSticking { timer: 0.1 },
        Action::Diving,
    ];

    for caps in caps_options {
        for probes in &probe_options {
            for input in &inputs {
                for action in actions {
                    let mut state = idle();
                    state.action = action;
                    let (next, _) =
                        step_decide(&state, input, probes, caps, Vec2::new(100.0, -10.0));
                    assert!(!(next.is_dashing() && next.is_wall_sticking()));
                    if next.is_on_water_surface() {
                        assert!(next.is_in_water());
                    }
                }
            }
        }
    }
}

#[test]
fn test_transition_table() {
    let dashing = Action::Dashing { time_left: 0.1 };
    assert_eq!(dashing.next(Transition::HoldWall { dt: 0.1 }), dashing);
    assert_eq!(dashing.next(Transition::BeginDive), dashing);
    assert_eq!(dashing.next(Transition::DashTick { dt: 0.1 }), Action::Free);

    let sticking = Action::WallSticking { timer: 0.3 };
    assert_eq!(
        sticking.next(Transition::BeginDash { duration: 0.2 }),
        Action::Dashing { time_left: 0.2 }
    );
    assert_eq!(sticking.next(Transition::ReleaseWall), Action::Free);
    assert_eq!(
        Action::Diving.next(Transition::HoldWall { dt: 0.1 }),
        Action::WallSticking { timer: 0.1 }
    );
    assert_eq!(Action::Free.next(Transition::EndDive), Action::Free);
}

// -----------------------------------------------------------------------------
// Dive and water
// -----------------------------------------------------------------------------

fn press_dive() -> MovementInput {
    MovementInput {
        dive_just_pressed: true,
        axis: Vec2::new(0.0, -1.0),
        ..default()
    }
}

#[test]
fn test_dive_needs_water_below() {
    let t = tuning();
    let caps = only(|c| c.diving = true);
    let above_pool = DecisionProbes {
        water_below: true,
        ..default()
    };

    let (state, velocity) = step_decide(&idle(), &press_dive(), &above_pool, caps, Vec2::new(80.0, 50.0));
    assert!(state.is_diving());
    assert_eq!(velocity, Vec2::new(0.0, -t.dive_force));

    let (state, _) = step_decide(&idle(), &press_dive(), &airborne(), caps, Vec2::ZERO);
    assert!(!state.is_diving());

    let (state, _) = step_decide(
        &idle(),
        &press_dive(),
        &above_pool,
        Capabilities::none(),
        Vec2::ZERO,
    );
    assert!(!state.is_diving());
}

#[test]
fn test_dive_press_underwater_swims_down() {
    let t = tuning();
    let (state, velocity) = step_decide(
        &idle(),
        &press_dive(),
        &in_water(100.0),
        only(|c| c.diving = true),
        Vec2::new(40.0, 0.0),
    );

    assert!(!state.is_diving());
    assert_eq!(velocity, Vec2::new(0.0, -t.underwater_speed));
}

#[test]
fn test_dive_cancelled_by_ground_and_by_leaving_water() {
    let mut state = idle();
    state.action = Action::Diving;
    state.water = WaterContact::Submerged;

    let (left_water, _) = step_decide(
        &state,
        &MovementInput::default(),
        &airborne(),
        Capabilities::all(),
        Vec2::ZERO,
    );
    assert!(!left_water.is_diving());

    let wet_floor = DecisionProbes {
        grounded: true,
        water_top: Some(100.0),
        ..default()
    };
    let (landed, _) = step_decide(
        &state,
        &MovementInput::default(),
        &wet_floor,
        Capabilities::all(),
        Vec2::ZERO,
    );
    assert!(!landed.is_diving());
}

#[test]
fn test_facing_locked_while_diving() {
    let left = MovementInput {
        axis: Vec2::new(-1.0, 0.0),
        ..default()
    };

    let (state, _) = step_decide(&idle(), &left, &airborne(), Capabilities::none(), Vec2::ZERO);
    assert_eq!(state.facing, Facing::Left);

    let mut diving = idle();
    diving.action = Action::Diving;
    let (state, _) = step_decide(&diving, &left, &in_water(100.0), Capabilities::all(), Vec2::ZERO);
    assert!(state.is_diving());
    assert_eq!(state.facing, Facing::Right);
}

#[test]
fn test_surface_detection() {
    let (state, _) = step_decide(
        &idle(),
        &MovementInput::default(),
        &in_water(tuning().surface_tolerance),
        Capabilities::none(),
        Vec2::ZERO,
    );
    assert_eq!(state.water, WaterContact::Surface);

    let (state, _) = step_decide(
        &idle(),
        &MovementInput::default(),
        &in_water(tuning().surface_tolerance + 1.0),
        Capabilities::none(),
        Vec2::ZERO,
    );
    assert_eq!(state.water, WaterContact::Submerged);
}

#[test]
fn test_buoyancy_and_drag_follow_water_contact() {
    let t = tuning();
    let input = MovementInput::default();
    let falling = Vec2::new(0.0, -200.0);

    let (wet, velocity) = step_decide(&idle(), &input, &in_water(100.0), Capabilities::none(), falling);
    assert!(wet.is_in_water());

    let step = integrate(&t, &wet, &input, &IntegrationProbes::default(), velocity, GRAVITY_Y, FIXED_DT);
    assert_eq!(step.body.force, Vec2::new(0.0, t.buoyancy_force));
    assert_eq!(step.body.drag, t.water_drag);

    let (dry, velocity) = step_decide(&step.state, &input, &airborne(), Capabilities::none(), step.body.velocity);
    assert!(!dry.is_in_water());

    let step = integrate(&t, &dry, &input, &IntegrationProbes::default(), velocity, GRAVITY_Y, FIXED_DT);
    assert_eq!(step.body.force, Vec2::ZERO);
    assert_eq!(step.body.drag, 0.0);
}

#[test]
fn test_no_buoyancy_while_diving_or_rising() {
    let t = tuning();
    let mut state = idle();
    state.water = WaterContact::Submerged;
    state.action = Action::Diving;
    let input = MovementInput::default();
    let probes = IntegrationProbes::default();

    let step = integrate(&t, &state, &input, &probes, Vec2::new(0.0, -300.0), GRAVITY_Y, FIXED_DT);
    assert_eq!(step.body.force, Vec2::ZERO);
    assert_eq!(step.body.drag, t.water_drag);

    state.action = Action::Free;
    let step = integrate(&t, &state, &input, &probes, Vec2::new(0.0, 50.0), GRAVITY_Y, FIXED_DT);
    assert_eq!(step.body.force, Vec2::ZERO);
}

#[test]
fn test_underwater_swimming() {
    let t = tuning();
    let mut state = idle();
    state.water = WaterContact::Submerged;
    let input = MovementInput {
        axis: Vec2::new(1.0, 1.0),
        ..default()
    };

    let step = integrate(
        &t,
        &state,
        &input,
        &IntegrationProbes::default(),
        Vec2::new(0.0, -40.0),
        GRAVITY_Y,
        FIXED_DT,
    );
    assert_eq!(
        step.body.velocity,
        Vec2::new(t.underwater_speed, t.underwater_speed)
    );

    // No vertical key: vertical velocity is left alone.
    let drift = MovementInput {
        axis: Vec2::new(-1.0, 0.0),
        ..default()
    };
    let step = integrate(
        &t,
        &state,
        &drift,
        &IntegrationProbes::default(),
        Vec2::new(0.0, -40.0),
        GRAVITY_Y,
        FIXED_DT,
    );
    assert_eq!(step.body.velocity, Vec2::new(-t.underwater_speed, -40.0));
}

#[test]
fn test_surface_dive_moves_linearly() {
    let t = tuning();
    let mut state = idle();
    state.water = WaterContact::Surface;
    state.action = Action::Diving;
    let input = MovementInput {
        axis: Vec2::X,
        ..default()
    };

    let step = integrate(
        &t,
        &state,
        &input,
        &IntegrationProbes::default(),
        Vec2::new(10.0, -80.0),
        GRAVITY_Y,
        FIXED_DT,
    );

    assert_eq!(step.body.velocity, Vec2::new(t.water_surface_speed, 0.0));
    assert_eq!(step.state.current_speed, state.current_speed);
}

#[test]
fn test_dive_ends_on_dry_landing() {
    let t = tuning();
    let mut state = idle();
    state.action = Action::Diving;
    let input = MovementInput::default();

    let landed = IntegrationProbes {
        grounded: true,
        water_below: false,
    };
    let step = integrate(&t, &state, &input, &landed, Vec2::ZERO, GRAVITY_Y, FIXED_DT);
    assert!(!step.state.is_diving());

    let over_water = IntegrationProbes {
        grounded: true,
        water_below: true,
    };
    let step = integrate(&t, &state, &input, &over_water, Vec2::ZERO, GRAVITY_Y, FIXED_DT);
    assert!(step.state.is_diving());
}

// -----------------------------------------------------------------------------
// Integration: walking and gravity shaping
// -----------------------------------------------------------------------------

#[test]
fn test_fall_and_low_jump_gravity() {
    let t = tuning();
    let state = idle();
    let probes = IntegrationProbes::default();

    let step = integrate(
        &t,
        &state,
        &MovementInput::default(),
        &probes,
        Vec2::new(0.0, -100.0),
        GRAVITY_Y,
        FIXED_DT,
    );
    assert_eq!(
        step.body.velocity.y,
        -100.0 + GRAVITY_Y * (t.fall_multiplier - 1.0) * FIXED_DT
    );

    let step = integrate(
        &t,
        &state,
        &MovementInput::default(),
        &probes,
        Vec2::new(0.0, 100.0),
        GRAVITY_Y,
        FIXED_DT,
    );
    assert_eq!(
        step.body.velocity.y,
        100.0 + GRAVITY_Y * (t.low_jump_multiplier - 1.0) * FIXED_DT
    );

    let held = MovementInput {
        jump_held: true,
        ..default()
    };
    let step = integrate(&t, &state, &held, &probes, Vec2::new(0.0, 100.0), GRAVITY_Y, FIXED_DT);
    assert_eq!(step.body.velocity.y, 100.0);
}

#[test]
fn test_fall_speed_clamped_out_of_water() {
    let t = tuning();
    let step = integrate(
        &t,
        &idle(),
        &MovementInput::default(),
        &IntegrationProbes::default(),
        Vec2::new(0.0, -5000.0),
        GRAVITY_Y,
        FIXED_DT,
    );
    assert_eq!(step.body.velocity.y, -t.max_fall_speed);

    let mut wet = idle();
    wet.water = WaterContact::Submerged;
    let step = integrate(
        &t,
        &wet,
        &MovementInput::default(),
        &IntegrationProbes::default(),
        Vec2::new(0.0, -5000.0),
        GRAVITY_Y,
        FIXED_DT,
    );
    assert_eq!(step.body.velocity.y, -5000.0);
}

#[test]
fn test_hang_time_speed_bonus() {
    let t = tuning();
    let input = MovementInput {
        axis: Vec2::X,
        ..default()
    };
    let blend = t.speed_transition_smoothness * FIXED_DT;
    let peak_target = t.walk_speed * t.jump_peak_speed_multiplier;

    let step = integrate(
        &t,
        &idle(),
        &input,
        &IntegrationProbes::default(),
        Vec2::ZERO,
        GRAVITY_Y,
        FIXED_DT,
    );
    let expected = t.walk_speed + (peak_target - t.walk_speed) * blend;
    assert_eq!(step.state.current_speed, expected);
    assert_eq!(step.body.velocity.x, expected);

    // Grounded: speed stays at walk speed.
    let step = integrate(
        &t,
        &idle(),
        &input,
        &IntegrationProbes {
            grounded: true,
            ..default()
        },
        Vec2::ZERO,
        GRAVITY_Y,
        FIXED_DT,
    );
    assert_eq!(step.body.velocity.x, t.walk_speed);
}

#[test]
fn test_wall_stick_skips_walk_and_gravity() {
    let t = tuning();
    let mut state = idle();
    state.action = Action::WallSticking { timer: 0.1 };
    let input = MovementInput {
        axis: Vec2::X,
        ..default()
    };

    let step = integrate(
        &t,
        &state,
        &input,
        &IntegrationProbes::default(),
        Vec2::new(0.0, -20.0),
        GRAVITY_Y,
        FIXED_DT,
    );
    assert_eq!(step.body.velocity, Vec2::new(0.0, -20.0));
    assert!(step.state.is_wall_sticking());
}

// -----------------------------------------------------------------------------
// State helpers
// -----------------------------------------------------------------------------

#[test]
fn test_motion_phase_classification() {
    let mut state = idle();
    assert_eq!(state.phase(true), MotionPhase::Grounded);
    assert_eq!(state.phase(false), MotionPhase::Airborne);

    state.water = WaterContact::Surface;
    assert_eq!(state.phase(false), MotionPhase::SwimmingSurface);
    state.water = WaterContact::Submerged;
    assert_eq!(state.phase(false), MotionPhase::SwimmingSubmerged);

    state.action = Action::Diving;
    assert_eq!(state.phase(false), MotionPhase::Diving);
    state.action = Action::Dashing { time_left: 0.1 };
    assert_eq!(state.phase(true), MotionPhase::Dashing);
    state.action = Action::WallSticking { timer: 0.1 };
    assert_eq!(state.phase(false), MotionPhase::WallSticking);
}

#[test]
fn test_reset_restores_idle_defaults() {
    let t = tuning();
    let mut state = MotionState {
        facing: Facing::Left,
        current_speed: 12.0,
        action: Action::Diving,
        water: WaterContact::Submerged,
        air_jump: AirJump::Spent,
        wall_stick_spent: true,
    };

    state.reset(&t);

    assert_eq!(state, MotionState::new(&t));
    assert_eq!(state.current_speed, t.walk_speed);
    assert_eq!(state.facing, Facing::Right);
    assert!(state.can_double_jump());
}

#[test]
fn test_respawn_clears_body_and_state() {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins)
        .insert_resource(tuning())
        .add_message::<RespawnPlayerEvent>()
        .add_systems(Update, handle_respawn);

    let mut swimming = idle();
    swimming.action = Action::Diving;
    swimming.water = WaterContact::Submerged;
    let spawn = Vec2::new(10.0, 20.0);
    let player = app
        .world_mut()
        .spawn((
            Player,
            SpawnPoint(spawn),
            Transform::from_xyz(400.0, -100.0, 0.0),
            swimming,
            LinearVelocity(Vec2::new(0.0, -300.0)),
            LinearDamping(tuning().water_drag),
            ConstantForce(Vec2::new(0.0, tuning().buoyancy_force)),
        ))
        .id();

    app.world_mut().write_message(RespawnPlayerEvent);
    app.update();

    let world = app.world();
    assert_eq!(
        world.get::<Transform>(player).unwrap().translation.truncate(),
        spawn
    );
    assert_eq!(*world.get::<MotionState>(player).unwrap(), idle());
    assert_eq!(world.get::<LinearVelocity>(player).unwrap().0, Vec2::ZERO);
    assert_eq!(world.get::<LinearDamping>(player).unwrap().0, 0.0);
    assert_eq!(world.get::<ConstantForce>(player).unwrap().0, Vec2::ZERO);
}
