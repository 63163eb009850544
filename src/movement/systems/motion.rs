//! Movement domain: ECS glue around the pure decision and integration steps.

use avian2d::prelude::*;
use bevy::ecs::message::MessageReader;
use bevy::prelude::*;

use crate::abilities::{AbilityRegistry, Capabilities};
use crate::movement::controller::{DecisionProbes, IntegrationProbes, decide, integrate};
use crate::movement::systems::probes::{probe_ground, probe_wall, probe_water, probe_water_below};
use crate::movement::{
    MotionState, MotionTuning, MovementInput, Player, RespawnPlayerEvent, SpawnPoint, Water,
};

pub(crate) fn run_decision_phase(
    time: Res<Time>,
    spatial_query: SpatialQuery,
    input: Res<MovementInput>,
    tuning: Res<MotionTuning>,
    registry: Res<AbilityRegistry>,
    water_bounds: Query<&ColliderAabb, With<Water>>,
    mut query: Query<(&Transform, &mut MotionState, &mut LinearVelocity), With<Player>>,
) {
    let dt = time.delta_secs();
    let caps = Capabilities::from_registry(&registry);

    for (transform, mut state, mut velocity) in &mut query {
        let position = transform.translation.truncate();
        let grounded = probe_ground(&spatial_query, position, &tuning);

        let probes = DecisionProbes {
            grounded,
            wall_ahead: probe_wall(&spatial_query, position, state.facing, &tuning),
            water_top: probe_water(&spatial_query, &water_bounds, position, &tuning),
            // Only the dive trigger reads this; skip the ray otherwise.
            water_below: input.dive_just_pressed
                && probe_water_below(&spatial_query, position, tuning.dive_lookahead),
            body_y: position.y,
        };

        let decision = decide(&tuning, &state, &input, &probes, caps, velocity.0, dt);

        let before = state.phase(grounded);
        let after = decision.state.phase(grounded);
        if before != after {
            debug!(
                "Motion phase {:?} -> {:?}, velocity=({:.1}, {:.1})",
                before, after, decision.velocity.x, decision.velocity.y
            );
        }

        *state = decision.state;
        velocity.0 = decision.velocity;
    }
}

pub(crate) fn run_integration_phase(
    time: Res<Time>,
    spatial_query: SpatialQuery,
    input: Res<MovementInput>,
    tuning: Res<MotionTuning>,
    gravity: Res<Gravity>,
    mut query: Query<
        (
            &Transform,
            &mut MotionState,
            &mut LinearVelocity,
            &mut LinearDamping,
            &mut ConstantForce,
        ),
        With<Player>,
    >,
) {
    let dt = time.delta_secs();

    for (transform, mut state, mut velocity, mut damping, mut force) in &mut query {
        let position = transform.translation.truncate();
        let probes = IntegrationProbes {
            grounded: probe_ground(&spatial_query, position, &tuning),
            water_below: state.is_diving()
                && probe_water_below(&spatial_query, position, tuning.dive_exit_lookahead),
        };

        let step = integrate(
            &tuning,
            &state,
            &input,
            &probes,
            velocity.0,
            gravity.0.y,
            dt,
        );

        if state.is_dashing() && !step.state.is_dashing() {
            debug!("Dash finished");
        }

        *state = step.state;
        velocity.0 = step.body.velocity;
        force.0 = step.body.force;
        damping.0 = step.body.drag;
    }
}

/// Put the player back on its spawn point with idle motion state.
pub(crate) fn handle_respawn(
    mut events: MessageReader<RespawnPlayerEvent>,
    tuning: Res<MotionTuning>,
    mut query: Query<
        (
            &SpawnPoint,
            &mut Transform,
            &mut MotionState,
            &mut LinearVelocity,
            &mut LinearDamping,
            &mut ConstantForce,
        ),
        With<Player>,
    >,
) {
    if events.read().count() == 0 {
        return;
    }

    for (spawn, mut transform, mut state, mut velocity, mut damping, mut force) in &mut query {
        transform.translation = spawn.0.extend(transform.translation.z);
        state.reset(&tuning);
        velocity.0 = Vec2::ZERO;
        damping.0 = 0.0;
        force.0 = Vec2::ZERO;
        info!("Player respawned at ({:.0}, {:.0})", spawn.0.x, spawn.0.y);
    }
}
