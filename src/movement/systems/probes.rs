//! Movement domain: environment probes against the physics world.
//!
//! Each probe is a best-effort geometry query. Finding nothing is a plain
//! `false` / `None`, never an error.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::movement::{Facing, GameLayer, MotionTuning, Water};

/// Box overlap at the feet anchor against the Ground layer.
pub(crate) fn probe_ground(spatial_query: &SpatialQuery, position: Vec2, tuning: &MotionTuning) -> bool {
    let ground_filter = SpatialQueryFilter::from_mask(GameLayer::Ground);
    let anchor = position - Vec2::new(0.0, tuning.ground_check_offset);
    let shape = Collider::rectangle(
        tuning.ground_check_half_width * 2.0,
        tuning.ground_check_half_height * 2.0,
    );

    !spatial_query
        .shape_intersections(&shape, anchor, 0.0, &ground_filter)
        .is_empty()
}

/// Ray from the body centre in the facing direction against the Wall layer.
pub(crate) fn probe_wall(
    spatial_query: &SpatialQuery,
    position: Vec2,
    facing: Facing,
    tuning: &MotionTuning,
) -> bool {
    let wall_filter = SpatialQueryFilter::from_mask(GameLayer::Wall);
    let direction = match facing {
        Facing::Right => Dir2::X,
        Facing::Left => Dir2::NEG_X,
    };

    spatial_query
        .cast_ray(
            position,
            direction,
            tuning.wall_check_distance,
            true,
            &wall_filter,
        )
        .is_some()
}

/// Box overlap around the body against the Water layer. Returns the highest
/// top edge among the overlapped volumes.
pub(crate) fn probe_water(
    spatial_query: &SpatialQuery,
    water_bounds: &Query<&ColliderAabb, With<Water>>,
    position: Vec2,
    tuning: &MotionTuning,
) -> Option<f32> {
    let water_filter = SpatialQueryFilter::from_mask(GameLayer::Water);
    let size = tuning.water_probe_half_extent * 2.0;
    let shape = Collider::rectangle(size, size);

    spatial_query
        .shape_intersections(&shape, position, 0.0, &water_filter)
        .into_iter()
        .filter_map(|entity| water_bounds.get(entity).ok())
        .map(|aabb| aabb.max.y)
        .reduce(f32::max)
}

/// Downward ray against the Water layer.
pub(crate) fn probe_water_below(spatial_query: &SpatialQuery, position: Vec2, distance: f32) -> bool {
    let water_filter = SpatialQueryFilter::from_mask(GameLayer::Water);

    spatial_query
        .cast_ray(position, Dir2::NEG_Y, distance, true, &water_filter)
        .is_some()
}
