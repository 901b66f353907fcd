//! Kinematic integration system.
//!
//! Ballistic bodies take an exact constant-acceleration step so their
//! arcs match the launch solution at every tick. Everything else moves
//! at constant velocity.

use hecs::World;

use broadside_core::components::{Ballistic, Orientation, ShipState};
use broadside_core::constants::ORIENT_EPSILON_SQ;
use broadside_core::types::{Position, Velocity};

/// Integrate one step of `dt` seconds under downward acceleration `gravity`.
pub fn run(world: &mut World, gravity: f64, dt: f64) {
    for (_entity, (pos, vel, orientation, _ballistic)) in
        world.query_mut::<(&mut Position, &mut Velocity, Option<&mut Orientation>, &Ballistic)>()
    {
        pos.x += vel.x * dt;
        pos.y += vel.y * dt;
        pos.z += vel.z * dt - 0.5 * gravity * dt * dt;
        vel.z -= gravity * dt;

        if let Some(orientation) = orientation {
            let v = vel.as_dvec3();
            if v.length_squared() > ORIENT_EPSILON_SQ {
                orientation.forward = v.normalize();
            }
        }
    }

    for (_entity, (pos, vel, ship)) in
        world.query_mut::<(&mut Position, &Velocity, &ShipState)>().without::<&Ballistic>()
    {
        if ship.dead {
            continue;
        }
        pos.x += vel.x * dt;
        pos.y += vel.y * dt;
        pos.z += vel.z * dt;
    }
}
