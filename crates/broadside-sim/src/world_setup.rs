//! Entity spawn factories for setting up the simulation world.
//!
//! Creates ship entities with their target, health, navigation, and
//! respawn component bundles.

use hecs::{Entity, World};
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use broadside_core::components::*;
use broadside_core::config::{FleetConfig, ShipSpec};
use broadside_core::constants::REACH_POINT_RADIUS_FACTOR;
use broadside_core::types::{Position, Velocity};

use crate::health;

/// Spawn the configured fleet, returning entities in pool order.
/// Ids are assigned from `next_target_id` upward.
pub fn spawn_fleet(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    fleet: &FleetConfig,
    center: &Position,
    next_target_id: &mut u32,
) -> Vec<Entity> {
    let specs = if fleet.ships.is_empty() {
        generate_ring(rng, fleet, center)
    } else {
        fleet.ships.clone()
    };

    specs
        .iter()
        .map(|spec| {
            let id = *next_target_id;
            *next_target_id += 1;
            spawn_ship(world, spec, id)
        })
        .collect()
}

/// Spawn one alive ship described by `spec`.
pub fn spawn_ship(world: &mut World, spec: &ShipSpec, id: u32) -> Entity {
    world.spawn((
        Target { id },
        health::new_health(spec.max_health, spec.respawn_delay_secs),
        ShipState::default(),
        Navigator {
            reach_point: spec.reach_point,
            move_speed: spec.move_speed,
            stop_distance: spec.stop_distance,
        },
        SpawnPoint {
            position: spec.position,
        },
        spec.position,
        Velocity::zero(),
    ))
}

/// Scatter `generated_count` ships on a jittered ring around `center`, each
/// steering halfway in along its own bearing.
pub fn generate_ring(rng: &mut ChaCha8Rng, fleet: &FleetConfig, center: &Position) -> Vec<ShipSpec> {
    let count = fleet.generated_count;
    let jitter = fleet.spawn_jitter;

    (0..count)
        .map(|i| {
            let mut bearing = i as f64 / count as f64 * std::f64::consts::TAU;
            let mut radius = fleet.spawn_radius;
            if jitter > 0.0 {
                radius += rng.gen_range(-jitter..jitter);
                if fleet.spawn_radius > 0.0 {
                    bearing += rng.gen_range(-jitter..jitter) / fleet.spawn_radius;
                }
            }
            let radius = radius.max(0.0);
            let (sin, cos) = bearing.sin_cos();

            ShipSpec {
                position: Position::new(center.x + radius * cos, center.y + radius * sin, 0.0),
                reach_point: Position::new(
                    center.x + radius * REACH_POINT_RADIUS_FACTOR * cos,
                    center.y + radius * REACH_POINT_RADIUS_FACTOR * sin,
                    0.0,
                ),
                ..ShipSpec::default()
            }
        })
        .collect()
}
