//! Gameplay tuning, loadable from JSON.
//!
//! Every section carries the stock tuning as its `Default`, so a partial
//! document only needs the fields it overrides. [`GameConfig::validate`] is
//! the single gate for malformed values; nothing downstream re-checks them.

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::enums::ShotKind;
use crate::error::ConfigError;
use crate::types::Position;

/// Complete simulation configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// RNG seed for generated fleet layouts. Same seed = same scene.
    pub seed: u64,
    pub charge: ChargeConfig,
    pub bands: BandTable,
    pub shots: ShotTable,
    pub ballistics: BallisticsConfig,
    pub projectile: ProjectileConfig,
    pub cannon: CannonConfig,
    pub fleet: FleetConfig,
}

/// Pump/leak integration of the charge bar.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct ChargeConfig {
    /// Charge gained per second while pressed.
    pub pump_rate: f64,
    /// Charge lost per second while released.
    pub leak_rate: f64,
    /// Exponential easing rate toward the raw increment. 0 = none.
    pub smoothing: f64,
    /// Charge at or below which a fired cycle re-arms.
    pub reset_threshold: f64,
}

/// One charge range with the hold time needed to fire.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BandConfig {
    pub min: f64,
    pub max: f64,
    pub hold_secs: f64,
}

/// The three bands. Each field maps to the [`ShotKind`] of the same name.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct BandTable {
    pub low: BandConfig,
    pub mid: BandConfig,
    pub high: BandConfig,
}

/// Per-kind weapon behavior.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ShotProfile {
    pub damage: f64,
    /// Scales the distance-derived flight time. < 1 = faster, flatter shot.
    pub time_multiplier: f64,
    /// Projectiles per fire request.
    pub shot_count: u32,
    /// Delay between consecutive projectiles of one request (seconds).
    pub follow_up_delay_secs: f64,
    /// Retarget the nearest untouched target after the first hit.
    pub chain: bool,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct ShotTable {
    pub low: ShotProfile,
    pub mid: ShotProfile,
    pub high: ShotProfile,
}

/// Flight-time curve for the launch velocity solver.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct BallisticsConfig {
    /// Flight time at zero horizontal distance (seconds).
    pub min_flight_time: f64,
    /// Flight time at `distance_for_max_time` and beyond (seconds).
    pub max_flight_time: f64,
    /// Horizontal distance at which flight time saturates (meters).
    pub distance_for_max_time: f64,
    /// Magnitude of downward gravitational acceleration (m/s²).
    pub gravity: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectileConfig {
    /// Projectiles retire after this long regardless of hits (seconds).
    pub max_lifetime_secs: f64,
    /// Contacts closer than this to the previous accepted hit are ignored (seconds).
    pub hit_cooldown_secs: f64,
    /// Projectile-to-target distance that counts as contact (meters).
    pub contact_radius: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct CannonConfig {
    pub muzzle: Position,
}

/// One enemy ship placed in the scene.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct ShipSpec {
    pub position: Position,
    pub reach_point: Position,
    pub max_health: f64,
    pub respawn_delay_secs: f64,
    pub move_speed: f64,
    pub stop_distance: f64,
}

/// Fleet layout. Explicit `ships` win; otherwise `generated_count` ships are
/// scattered on a ring around the cannon.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FleetConfig {
    pub ships: Vec<ShipSpec>,
    pub generated_count: usize,
    pub spawn_radius: f64,
    /// Random radial/tangential offset applied to generated ships (meters).
    pub spawn_jitter: f64,
    /// Pool index of the first current target (clamped into range).
    pub start_index: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            charge: ChargeConfig::default(),
            bands: BandTable::default(),
            shots: ShotTable::default(),
            ballistics: BallisticsConfig::default(),
            projectile: ProjectileConfig::default(),
            cannon: CannonConfig::default(),
            fleet: FleetConfig::default(),
        }
    }
}

impl Default for ChargeConfig {
    fn default() -> Self {
        Self {
            pump_rate: 0.9,
            leak_rate: 0.35,
            smoothing: 0.0,
            reset_threshold: 0.05,
        }
    }
}

impl Default for BandTable {
    fn default() -> Self {
        Self {
            low: BandConfig {
                min: 0.15,
                max: 0.40,
                hold_secs: 0.6,
            },
            mid: BandConfig {
                min: 0.40,
                max: 0.75,
                hold_secs: 0.8,
            },
            high: BandConfig {
                min: 0.75,
                max: 1.00,
                hold_secs: 1.0,
            },
        }
    }
}

impl Default for ShotTable {
    fn default() -> Self {
        Self {
            low: ShotProfile {
                damage: 10.0,
                time_multiplier: 1.4,
                shot_count: 1,
                follow_up_delay_secs: 0.0,
                chain: false,
            },
            mid: ShotProfile {
                damage: 18.0,
                time_multiplier: 1.0,
                shot_count: 1,
                follow_up_delay_secs: 0.0,
                chain: true,
            },
            high: ShotProfile {
                damage: 30.0,
                time_multiplier: 0.6,
                shot_count: 2,
                follow_up_delay_secs: 0.12,
                chain: false,
            },
        }
    }
}

impl Default for BallisticsConfig {
    fn default() -> Self {
        Self {
            min_flight_time: 0.25,
            max_flight_time: 1.0,
            distance_for_max_time: 25.0,
            gravity: 9.81,
        }
    }
}

impl Default for ProjectileConfig {
    fn default() -> Self {
        Self {
            max_lifetime_secs: 10.0,
            hit_cooldown_secs: 0.05,
            contact_radius: 1.5,
        }
    }
}

impl Default for CannonConfig {
    fn default() -> Self {
        Self {
            muzzle: Position::new(0.0, 0.0, DEFAULT_MUZZLE_HEIGHT),
        }
    }
}

impl Default for ShipSpec {
    fn default() -> Self {
        Self {
            position: Position::default(),
            reach_point: Position::default(),
            max_health: 100.0,
            respawn_delay_secs: 3.0,
            move_speed: 2.0,
            stop_distance: 1.0,
        }
    }
}

impl Default for FleetConfig {
    fn default() -> Self {
        Self {
            ships: Vec::new(),
            generated_count: DEFAULT_FLEET_SIZE,
            spawn_radius: DEFAULT_SPAWN_RADIUS,
            spawn_jitter: 2.0,
            start_index: 0,
        }
    }
}

impl BandConfig {
    /// `(min, max)` with the bounds put in order.
    pub fn normalized(&self) -> (f64, f64) {
        (self.min.min(self.max), self.min.max(self.max))
    }

    /// Inclusive containment against the normalized range.
    pub fn contains(&self, value: f64) -> bool {
        let (lo, hi) = self.normalized();
        value >= lo && value <= hi
    }
}

impl BandTable {
    pub fn band(&self, kind: ShotKind) -> &BandConfig {
        match kind {
            ShotKind::Low => &self.low,
            ShotKind::Mid => &self.mid,
            ShotKind::High => &self.high,
        }
    }

    /// Bands in evaluation priority order: High, Mid, Low.
    pub fn by_priority(&self) -> impl Iterator<Item = (ShotKind, &BandConfig)> {
        ShotKind::PRIORITY.into_iter().map(move |k| (k, self.band(k)))
    }

    /// Pairs of bands whose ranges share more than a boundary point.
    /// Priority order still decides between them, but callers usually
    /// expect disjoint bands.
    pub fn overlapping(&self) -> Vec<(ShotKind, ShotKind)> {
        let mut pairs = Vec::new();
        let kinds = ShotKind::PRIORITY;
        for (i, &a) in kinds.iter().enumerate() {
            for &b in &kinds[i + 1..] {
                let (a_lo, a_hi) = self.band(a).normalized();
                let (b_lo, b_hi) = self.band(b).normalized();
                if a_lo < b_hi && b_lo < a_hi {
                    pairs.push((a, b));
                }
            }
        }
        pairs
    }
}

impl ShotTable {
    pub fn profile(&self, kind: ShotKind) -> &ShotProfile {
        match kind {
            ShotKind::Low => &self.low,
            ShotKind::Mid => &self.mid,
            ShotKind::High => &self.high,
        }
    }
}

impl GameConfig {
    /// Parse a (possibly partial) JSON document and validate it.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the simulation cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let c = &self.charge;
        non_negative("charge.pump_rate", c.pump_rate)?;
        non_negative("charge.leak_rate", c.leak_rate)?;
        non_negative("charge.smoothing", c.smoothing)?;
        unit("charge.reset_threshold", c.reset_threshold)?;

        for (kind, band) in self.bands.by_priority() {
            let name = kind_name(kind);
            unit(&format!("bands.{name}.min"), band.min)?;
            unit(&format!("bands.{name}.max"), band.max)?;
            non_negative(&format!("bands.{name}.hold_secs"), band.hold_secs)?;
        }

        for kind in ShotKind::PRIORITY {
            let name = kind_name(kind);
            let shot = self.shots.profile(kind);
            non_negative(&format!("shots.{name}.damage"), shot.damage)?;
            // Degenerate multipliers fall back to the solver flight-time floor.
            finite(&format!("shots.{name}.time_multiplier"), shot.time_multiplier)?;
            non_negative(
                &format!("shots.{name}.follow_up_delay_secs"),
                shot.follow_up_delay_secs,
            )?;
            if shot.shot_count == 0 {
                return Err(ConfigError::EmptyVolley {
                    kind: name.to_string(),
                });
            }
        }

        let b = &self.ballistics;
        positive("ballistics.min_flight_time", b.min_flight_time)?;
        positive("ballistics.max_flight_time", b.max_flight_time)?;
        if b.min_flight_time > b.max_flight_time {
            return Err(ConfigError::FlightTimeOrder {
                min: b.min_flight_time,
                max: b.max_flight_time,
            });
        }
        non_negative("ballistics.distance_for_max_time", b.distance_for_max_time)?;
        positive("ballistics.gravity", b.gravity)?;

        let p = &self.projectile;
        positive("projectile.max_lifetime_secs", p.max_lifetime_secs)?;
        non_negative("projectile.hit_cooldown_secs", p.hit_cooldown_secs)?;
        positive("projectile.contact_radius", p.contact_radius)?;

        finite_position("cannon.muzzle", &self.cannon.muzzle)?;

        let f = &self.fleet;
        non_negative("fleet.spawn_radius", f.spawn_radius)?;
        non_negative("fleet.spawn_jitter", f.spawn_jitter)?;
        for (i, ship) in f.ships.iter().enumerate() {
            finite_position(&format!("fleet.ships[{i}].position"), &ship.position)?;
            finite_position(&format!("fleet.ships[{i}].reach_point"), &ship.reach_point)?;
            positive(&format!("fleet.ships[{i}].max_health"), ship.max_health)?;
            non_negative(
                &format!("fleet.ships[{i}].respawn_delay_secs"),
                ship.respawn_delay_secs,
            )?;
            non_negative(&format!("fleet.ships[{i}].move_speed"), ship.move_speed)?;
            non_negative(&format!("fleet.ships[{i}].stop_distance"), ship.stop_distance)?;
        }

        Ok(())
    }
}

fn kind_name(kind: ShotKind) -> &'static str {
    match kind {
        ShotKind::Low => "low",
        ShotKind::Mid => "mid",
        ShotKind::High => "high",
    }
}

fn finite(field: &str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NonFinite {
            field: field.to_string(),
        })
    }
}

fn non_negative(field: &str, value: f64) -> Result<(), ConfigError> {
    finite(field, value)?;
    if value < 0.0 {
        return Err(ConfigError::OutOfRange {
            field: field.to_string(),
            value,
            expected: ">= 0",
        });
    }
    Ok(())
}

fn positive(field: &str, value: f64) -> Result<(), ConfigError> {
    finite(field, value)?;
    if value <= 0.0 {
        return Err(ConfigError::OutOfRange {
            field: field.to_string(),
            value,
            expected: "> 0",
        });
    }
    Ok(())
}

fn unit(field: &str, value: f64) -> Result<(), ConfigError> {
    finite(field, value)?;
    if !(CHARGE_MIN..=CHARGE_MAX).contains(&value) {
        return Err(ConfigError::OutOfRange {
            field: field.to_string(),
            value,
            expected: "[0, 1]",
        });
    }
    Ok(())
}

fn finite_position(field: &str, p: &Position) -> Result<(), ConfigError> {
    finite(&format!("{field}.x"), p.x)?;
    finite(&format!("{field}.y"), p.y)?;
    finite(&format!("{field}.z"), p.z)
}
