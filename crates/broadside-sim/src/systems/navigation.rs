//! Ship steering: head for the reach point on the horizontal plane and
//! stop once inside the stop distance.

use glam::DVec3;
use hecs::World;

use broadside_core::components::{Navigator, ShipState};
use broadside_core::types::{Position, Velocity};

pub fn run(world: &mut World) {
    for (_entity, (nav, pos, vel, ship)) in
        world.query_mut::<(&Navigator, &Position, &mut Velocity, &ShipState)>()
    {
        if ship.dead {
            *vel = Velocity::zero();
            continue;
        }

        let to = DVec3::new(nav.reach_point.x - pos.x, nav.reach_point.y - pos.y, 0.0);
        let distance = to.length();

        if distance <= nav.stop_distance || distance <= f64::EPSILON {
            *vel = Velocity::zero();
        } else {
            *vel = Velocity::from(to / distance * nav.move_speed);
        }
    }
}
