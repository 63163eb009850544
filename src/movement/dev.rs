//! Movement domain: player spawn and the dev test room.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::movement::{
    GameLayer, Ground, MotionState, MotionTuning, PLAYER_SIZE, Player, SpawnPoint, Wall, Water,
};

const PLAYER_SPAWN: Vec2 = Vec2::new(0.0, 100.0);

pub(crate) fn spawn_player(mut commands: Commands, tuning: Res<MotionTuning>) {
    info!(
        "Spawning player at ({}, {}): walk_speed={}, jump_force={}",
        PLAYER_SPAWN.x, PLAYER_SPAWN.y, tuning.walk_speed, tuning.jump_force
    );

    commands.spawn((
        // Identity & Movement
        (
            Player,
            MotionState::new(&tuning),
            SpawnPoint(PLAYER_SPAWN),
        ),
        // Rendering
        Sprite {
            color: Color::srgb(0.9, 0.9, 0.9),
            custom_size: Some(PLAYER_SIZE),
            ..default()
        },
        Transform::from_translation(PLAYER_SPAWN.extend(0.0)),
        // Physics. World gravity applies; the controller only shapes it.
        (
            RigidBody::Dynamic,
            Collider::rectangle(PLAYER_SIZE.x, PLAYER_SIZE.y),
            LockedAxes::ROTATION_LOCKED,
            // Unit mass so buoyancy_force reads as an acceleration.
            Mass(1.0),
            Friction::new(0.0),
            LinearDamping(0.0),
            CollisionLayers::new(GameLayer::Player, [GameLayer::Ground, GameLayer::Wall]),
        ),
    ));
}

pub(crate) fn spawn_test_room(mut commands: Commands) {
    let wall_color = Color::srgb(0.3, 0.3, 0.4);
    let ground_color = Color::srgb(0.4, 0.5, 0.4);
    let platform_color = Color::srgb(0.5, 0.4, 0.3);
    let water_color = Color::srgba(0.2, 0.4, 0.9, 0.45);

    let ground_layers = CollisionLayers::new(GameLayer::Ground, [GameLayer::Player]);
    let wall_layers = CollisionLayers::new(GameLayer::Wall, [GameLayer::Player]);
    let water_layers = CollisionLayers::new(GameLayer::Water, [GameLayer::Player]);

    let mut solid = |marker_is_wall: bool, position: Vec2, size: Vec2, color: Color| {
        let mut entity = commands.spawn((
            Sprite {
                color,
                custom_size: Some(size),
                ..default()
            },
            Transform::from_translation(position.extend(0.0)),
            RigidBody::Static,
            Collider::rectangle(size.x, size.y),
        ));
        if marker_is_wall {
            entity.insert((Wall, wall_layers));
        } else {
            entity.insert((Ground, ground_layers));
        }
    };

    // Floor
    solid(false, Vec2::new(0.0, -200.0), Vec2::new(1200.0, 40.0), ground_color);

    // Outer walls
    solid(true, Vec2::new(-620.0, 50.0), Vec2::new(40.0, 500.0), wall_color);
    solid(true, Vec2::new(620.0, 50.0), Vec2::new(40.0, 500.0), wall_color);

    // Platforms for jump and double-jump practice
    solid(false, Vec2::new(-250.0, -50.0), Vec2::new(150.0, 20.0), platform_color);
    solid(false, Vec2::new(-40.0, 50.0), Vec2::new(150.0, 20.0), platform_color);
    solid(false, Vec2::new(-250.0, 150.0), Vec2::new(120.0, 20.0), platform_color);

    // Pillar for wall-stick and wall-jump practice
    solid(true, Vec2::new(-450.0, -80.0), Vec2::new(30.0, 200.0), wall_color);

    // Diving platform above the pool
    solid(false, Vec2::new(330.0, 60.0), Vec2::new(100.0, 20.0), platform_color);

    // Pool resting on the floor; the volume is a sensor so it never blocks.
    let pool_size = Vec2::new(360.0, 160.0);
    commands.spawn((
        Water,
        Sprite {
            color: water_color,
            custom_size: Some(pool_size),
            ..default()
        },
        Transform::from_xyz(400.0, -100.0, 1.0),
        RigidBody::Static,
        Collider::rectangle(pool_size.x, pool_size.y),
        Sensor,
        water_layers,
    ));
}
