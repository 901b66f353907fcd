//! ECS components for hecs entities.
//!
//! Components are plain data structs with no methods.
//! Game logic lives in systems, not components.

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::enums::ShotKind;
use crate::types::Position;

/// Marks an entity as a shootable target and carries its stable pool id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Target {
    pub id: u32,
}

/// Per-target health record. A target is alive while `health > 0`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TargetHealth {
    pub max_health: f64,
    pub health: f64,
    /// Delay between death and respawn (seconds).
    pub respawn_delay_secs: f64,
}

/// Death/respawn choreography state. While `dead`, the ship is hidden:
/// it neither moves nor registers contacts.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ShipState {
    pub dead: bool,
}

/// Steering toward a fixed point on the horizontal plane.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Navigator {
    pub reach_point: Position,
    pub move_speed: f64,
    pub stop_distance: f64,
}

/// Where a ship reappears after its respawn delay.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SpawnPoint {
    pub position: Position,
}

/// Marks an entity as subject to gravity during movement integration.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Ballistic;

/// Facing direction (unit vector) for rendering collaborators.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Orientation {
    pub forward: DVec3,
}

/// Per-projectile hit-resolution state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub id: u32,
    pub kind: ShotKind,
    pub damage: f64,
    /// Whether the projectile retargets after its first hit.
    pub chain: bool,
    /// Target ids already damaged by this projectile, in hit order.
    pub hit_targets: Vec<u32>,
    /// Simulation time of the last accepted hit.
    pub last_hit_secs: Option<f64>,
    /// Simulation time the projectile was launched.
    pub spawned_at_secs: f64,
}
