//! Cleanup system: retires projectiles that outlived their lifetime.

use hecs::{Entity, World};

use broadside_core::components::Projectile;
use broadside_core::enums::RetireReason;
use broadside_core::events::CombatEvent;

/// Despawn every projectile alive for at least `max_lifetime_secs`.
/// Uses a pre-allocated buffer to avoid per-tick allocation.
pub fn run(
    world: &mut World,
    now: f64,
    max_lifetime_secs: f64,
    events: &mut Vec<CombatEvent>,
    despawn_buffer: &mut Vec<Entity>,
) {
    despawn_buffer.clear();

    for (entity, projectile) in world.query_mut::<&Projectile>() {
        if now - projectile.spawned_at_secs >= max_lifetime_secs {
            despawn_buffer.push(entity);
            events.push(CombatEvent::ProjectileRetired {
                projectile_id: projectile.id,
                reason: RetireReason::Expired,
            });
        }
    }

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}
