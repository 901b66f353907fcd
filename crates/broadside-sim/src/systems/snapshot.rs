//! Snapshot system: queries the ECS world and builds a complete GameStateSnapshot.
//!
//! This system is read-only and never modifies the world.

use hecs::World;

use broadside_core::components::*;
use broadside_core::config::BandTable;
use broadside_core::enums::GamePhase;
use broadside_core::events::CombatEvent;
use broadside_core::state::*;
use broadside_core::types::{Position, SimTime, Velocity};

use crate::health;

/// Build a complete GameStateSnapshot from the current world state.
pub fn build_snapshot(
    world: &World,
    time: &SimTime,
    phase: GamePhase,
    charge: ChargeView,
    bands: &BandTable,
    current_target: Option<u32>,
    events: Vec<CombatEvent>,
) -> GameStateSnapshot {
    GameStateSnapshot {
        time: *time,
        phase,
        charge,
        bands: build_bands(bands),
        current_target,
        targets: build_targets(world),
        projectiles: build_projectiles(world),
        events,
    }
}

/// Band markers in priority order, with min/max normalized.
fn build_bands(bands: &BandTable) -> Vec<BandView> {
    bands
        .by_priority()
        .map(|(kind, band)| {
            let (min, max) = band.normalized();
            BandView {
                kind,
                min,
                max,
                hold_secs: band.hold_secs,
            }
        })
        .collect()
}

fn build_targets(world: &World) -> Vec<TargetView> {
    let mut targets: Vec<TargetView> = world
        .query::<(&Target, &TargetHealth, &Position)>()
        .iter()
        .map(|(_, (target, h, pos))| TargetView {
            id: target.id,
            position: *pos,
            health: h.health,
            max_health: h.max_health,
            health_fill: health::fill(h),
            alive: health::is_alive(h),
        })
        .collect();

    // Sort by id for stable ordering
    targets.sort_by_key(|t| t.id);
    targets
}

fn build_projectiles(world: &World) -> Vec<ProjectileView> {
    let mut projectiles: Vec<ProjectileView> = world
        .query::<(&Projectile, &Position, &Velocity)>()
        .iter()
        .map(|(_, (p, pos, vel))| ProjectileView {
            id: p.id,
            kind: p.kind,
            position: *pos,
            velocity: *vel,
            hits: p.hit_targets.len() as u32,
        })
        .collect();

    projectiles.sort_by_key(|p| p.id);
    projectiles
}
