//! Death and respawn choreography for ships.
//!
//! A killed ship is hidden in place, then brought back at its spawn point
//! with full health once its respawn delay has elapsed.

use hecs::{Entity, World};

use broadside_core::components::{ShipState, SpawnPoint, Target, TargetHealth};
use broadside_core::events::CombatEvent;
use broadside_core::types::{Position, Velocity};

use crate::health;
use crate::scheduler::{DelayedAction, Scheduler};

/// Hide a freshly killed ship and schedule its respawn.
/// Returns `false` when the entity is gone or already hidden.
pub fn begin_death(world: &mut World, scheduler: &mut Scheduler, entity: Entity, now: f64) -> bool {
    let Ok(delay) = world.get::<&TargetHealth>(entity).map(|h| h.respawn_delay_secs) else {
        return false;
    };

    {
        let Ok(mut ship) = world.get::<&mut ShipState>(entity) else {
            return false;
        };
        if ship.dead {
            return false;
        }
        ship.dead = true;
    }

    if let Ok(mut vel) = world.get::<&mut Velocity>(entity) {
        *vel = Velocity::zero();
    }

    scheduler.schedule(DelayedAction::Respawn { target: entity }, delay, now);
    true
}

/// Restore a hidden ship at its spawn point. Returns `false` if the
/// entity no longer exists or is not hidden.
pub fn respawn(world: &mut World, entity: Entity, events: &mut Vec<CombatEvent>) -> bool {
    let Ok((target, spawn, ship, h, pos, vel)) = world.query_one_mut::<(
        &Target,
        &SpawnPoint,
        &mut ShipState,
        &mut TargetHealth,
        &mut Position,
        &mut Velocity,
    )>(entity) else {
        return false;
    };

    if !ship.dead {
        return false;
    }

    ship.dead = false;
    health::reset(h);
    *pos = spawn.position;
    *vel = Velocity::zero();

    tracing::info!(target_id = target.id, "target respawned");
    events.push(CombatEvent::HealthChanged {
        target_id: target.id,
        health: h.health,
        fill: health::fill(h),
    });
    events.push(CombatEvent::TargetRespawned {
        target_id: target.id,
        position: spawn.position,
    });
    true
}
