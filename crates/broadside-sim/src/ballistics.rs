//! Launch velocity solver.
//!
//! Flight time is derived from horizontal distance (near shots arrive
//! quickly, far shots hang longer), scaled per shot kind, then the launch
//! velocity is solved so a body under constant downward acceleration
//! reaches the destination exactly at that time.

use glam::DVec3;

use broadside_core::config::BallisticsConfig;
use broadside_core::constants::*;
use broadside_core::types::{Position, Velocity};

#[derive(Debug, Clone, Copy)]
pub struct BallisticsSolver {
    config: BallisticsConfig,
}

impl BallisticsSolver {
    pub fn new(config: BallisticsConfig) -> Self {
        Self { config }
    }

    /// Magnitude of downward gravitational acceleration (m/s²).
    pub fn gravity(&self) -> f64 {
        self.config.gravity
    }

    /// Flight time for a shot between two points, floored at `MIN_FLIGHT_TIME_FLOOR`.
    pub fn flight_time(&self, origin: &Position, destination: &Position, time_multiplier: f64) -> f64 {
        let distance = origin.horizontal_range_to(destination);

        let t01 = if self.config.distance_for_max_time <= DISTANCE_REFERENCE_EPSILON {
            1.0
        } else {
            (distance / self.config.distance_for_max_time).clamp(0.0, 1.0)
        };

        let base = lerp(self.config.min_flight_time, self.config.max_flight_time, t01);
        (base * time_multiplier).max(MIN_FLIGHT_TIME_FLOOR)
    }

    /// Launch velocity that lands on `destination` after `flight_time(..)` seconds.
    pub fn solve(&self, origin: &Position, destination: &Position, time_multiplier: f64) -> Velocity {
        let t = self.flight_time(origin, destination, time_multiplier);
        self.solve_for_time(origin, destination, t)
    }

    /// Launch velocity for an explicit flight time `t` (> 0).
    pub fn solve_for_time(&self, origin: &Position, destination: &Position, t: f64) -> Velocity {
        let to = destination.as_dvec3() - origin.as_dvec3();
        let planar = DVec3::new(to.x, to.y, 0.0);

        let horizontal = if planar.length() < HORIZONTAL_EPSILON {
            DVec3::ZERO
        } else {
            planar / t
        };

        // z(t) = z0 + vz·t - ½·g·t²  →  vz = Δz/t + ½·g·t
        let vz = to.z / t + 0.5 * self.config.gravity * t;

        Velocity::from(horizontal + DVec3::Z * vz)
    }
}

/// Closed-form position of a ballistic body after `t` seconds.
pub fn predict_position(origin: &Position, velocity: &Velocity, gravity: f64, t: f64) -> Position {
    let accel = DVec3::new(0.0, 0.0, -gravity);
    Position::from(origin.as_dvec3() + velocity.as_dvec3() * t + 0.5 * accel * t * t)
}

fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}
