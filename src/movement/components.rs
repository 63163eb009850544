//! Movement domain: components and physics layers for locomotion.

use avian2d::prelude::*;
use bevy::prelude::*;

/// Physics layers for collision filtering and probes
#[derive(PhysicsLayer, Clone, Copy, Debug, Default)]
pub enum GameLayer {
    #[default]
    Default,
    /// Ground surfaces (floors, platforms)
    Ground,
    /// Wall surfaces the player can stick to
    Wall,
    /// Water volumes - sensors, never block movement
    Water,
    /// Player character
    Player,
}

/// Player collider size. Probes are cast from the body centre.
pub const PLAYER_SIZE: Vec2 = Vec2::new(24.0, 48.0);

#[derive(Component, Debug)]
pub struct Player;

/// Marker for ground colliders
#[derive(Component, Debug)]
pub struct Ground;

/// Marker for wall colliders
#[derive(Component, Debug)]
pub struct Wall;

/// Marker for water volumes
#[derive(Component, Debug)]
pub struct Water;

/// Where the player returns to on respawn
#[derive(Component, Debug, Clone, Copy)]
pub struct SpawnPoint(pub Vec2);
