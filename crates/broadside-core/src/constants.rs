//! Simulation constants and numeric guards.
//!
//! Tunable gameplay values live in [`crate::config`]; these are the
//! fixed-rate and floating-point guard values the engine relies on.

/// Simulation tick rate (Hz).
pub const TICK_RATE: u32 = 60;

/// Seconds per tick.
pub const DT: f64 = 1.0 / TICK_RATE as f64;

// --- Ballistics ---

/// Hard floor on the solved flight time (seconds).
pub const MIN_FLIGHT_TIME_FLOOR: f64 = 0.05;

/// Horizontal distance below which the planar velocity is zeroed (meters).
pub const HORIZONTAL_EPSILON: f64 = 1e-4;

/// `distance_for_max_time` at or below this is treated as "always max time".
pub const DISTANCE_REFERENCE_EPSILON: f64 = 1e-3;

/// Squared speed above which a projectile's forward vector follows its velocity.
pub const ORIENT_EPSILON_SQ: f64 = 1e-3;

// --- Charge ---

/// Lower clamp of the charge value.
pub const CHARGE_MIN: f64 = 0.0;

/// Upper clamp of the charge value.
pub const CHARGE_MAX: f64 = 1.0;

// --- Defaults ---

/// Default launch point height above the water line (meters).
pub const DEFAULT_MUZZLE_HEIGHT: f64 = 2.0;

/// Default number of ships generated when no explicit fleet is configured.
pub const DEFAULT_FLEET_SIZE: usize = 3;

/// Default ring radius for generated fleets (meters).
pub const DEFAULT_SPAWN_RADIUS: f64 = 20.0;

/// Fraction of the spawn radius generated ships sail in to.
pub const REACH_POINT_RADIUS_FACTOR: f64 = 0.5;
