//! Contact detection between projectiles and live ships.
//!
//! Produces the per-tick contact list consumed by the projectile resolver.
//! Dead (hidden) ships register no contacts.

use hecs::{Entity, World};

use broadside_core::components::{Projectile, ShipState, Target};
use broadside_core::types::Position;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    pub projectile: Entity,
    pub target: Entity,
    pub distance: f64,
}

/// Collect every projectile/target pair closer than `radius` into `buffer`,
/// ordered by projectile id, then distance.
pub fn detect(world: &World, radius: f64, buffer: &mut Vec<Contact>) {
    buffer.clear();

    let ships: Vec<(Entity, Position)> = world
        .query::<(&Position, &Target, &ShipState)>()
        .iter()
        .filter(|(_, (_, _, ship))| !ship.dead)
        .map(|(e, (pos, _, _))| (e, *pos))
        .collect();

    let mut keyed: Vec<(u32, Contact)> = Vec::new();
    for (projectile, (pos, p)) in world.query::<(&Position, &Projectile)>().iter() {
        for (target, ship_pos) in &ships {
            let distance = pos.range_to(ship_pos);
            if distance <= radius {
                keyed.push((
                    p.id,
                    Contact {
                        projectile,
                        target: *target,
                        distance,
                    },
                ));
            }
        }
    }

    keyed.sort_by(|(a_id, a), (b_id, b)| a_id.cmp(b_id).then(a.distance.total_cmp(&b.distance)));
    buffer.extend(keyed.into_iter().map(|(_, c)| c));
}
