//! Charge/band firing state machine, ticked once per fixed step.
//!
//! Once a band has been held for its required time the controller reports
//! a fire request and locks out further requests until the charge is driven
//! back down to the reset threshold (or out of every band at that level).

use broadside_core::config::{BandTable, ChargeConfig};
use broadside_core::constants::{CHARGE_MAX, CHARGE_MIN};
use broadside_core::enums::ShotKind;
use broadside_core::state::ChargeView;

use crate::bands::{classify, hold_required};

/// Result of one controller tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChargeUpdate {
    /// Charge after integration (and after the fire reset, if one happened).
    pub charge: f64,
    /// Band the integrated charge was classified into this tick.
    pub band: Option<ShotKind>,
    /// Shot to dispatch, at most one per satisfied hold.
    pub fire: Option<ShotKind>,
}

#[derive(Debug, Clone)]
pub struct ChargeBandController {
    config: ChargeConfig,
    bands: BandTable,
    charge: f64,
    current_band: Option<ShotKind>,
    band_lock: Option<ShotKind>,
    hold_elapsed: f64,
    fired_this_cycle: bool,
}

impl ChargeBandController {
    pub fn new(config: ChargeConfig, bands: BandTable) -> Self {
        Self {
            config,
            bands,
            charge: 0.0,
            current_band: None,
            band_lock: None,
            hold_elapsed: 0.0,
            fired_this_cycle: false,
        }
    }

    pub fn charge(&self) -> f64 {
        self.charge
    }

    pub fn band(&self) -> Option<ShotKind> {
        self.current_band
    }

    pub fn band_lock(&self) -> Option<ShotKind> {
        self.band_lock
    }

    pub fn hold_elapsed(&self) -> f64 {
        self.hold_elapsed
    }

    pub fn fired_this_cycle(&self) -> bool {
        self.fired_this_cycle
    }

    pub fn bands(&self) -> &BandTable {
        &self.bands
    }

    pub fn view(&self) -> ChargeView {
        ChargeView {
            fill: self.charge,
            band: self.current_band,
            hold_elapsed: self.hold_elapsed,
            fired_this_cycle: self.fired_this_cycle,
        }
    }

    /// Advance one step with the sampled input.
    pub fn tick(&mut self, pressed: bool, dt: f64) -> ChargeUpdate {
        self.charge = integrate(&self.config, self.charge, pressed, dt);

        let band = classify(&self.bands, self.charge);
        self.current_band = band;

        let Some(kind) = band else {
            self.hold_elapsed = 0.0;
            self.band_lock = None;
            if self.charge <= self.config.reset_threshold {
                self.fired_this_cycle = false;
            }
            return self.update(None, None);
        };

        if self.fired_this_cycle {
            return self.update(band, None);
        }

        if self.band_lock != Some(kind) {
            tracing::debug!(?kind, charge = self.charge, "charge entered band");
            self.band_lock = Some(kind);
            self.hold_elapsed = 0.0;
        }

        self.hold_elapsed += dt;

        if self.hold_elapsed >= hold_required(&self.bands, kind) {
            self.fired_this_cycle = true;
            self.charge = CHARGE_MIN;
            self.hold_elapsed = 0.0;
            self.band_lock = None;
            self.current_band = classify(&self.bands, self.charge);
            return self.update(self.current_band, Some(kind));
        }

        self.update(band, None)
    }

    fn update(&self, band: Option<ShotKind>, fire: Option<ShotKind>) -> ChargeUpdate {
        ChargeUpdate {
            charge: self.charge,
            band,
            fire,
        }
    }
}

/// Pump while pressed, leak while released, clamp to [0, 1].
///
/// With `smoothing > 0` only the fraction `1 - e^(-smoothing·dt)` of the raw
/// increment is applied per step; the clamp and the resting points are unchanged.
pub fn integrate(config: &ChargeConfig, charge: f64, pressed: bool, dt: f64) -> f64 {
    let rate = if pressed {
        config.pump_rate
    } else {
        -config.leak_rate
    };
    let delta = rate * dt;

    let step = if config.smoothing > 0.0 {
        delta * (1.0 - (-config.smoothing * dt).exp())
    } else {
        delta
    };

    (charge + step).clamp(CHARGE_MIN, CHARGE_MAX)
}
