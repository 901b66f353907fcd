#[cfg(test)]
mod tests {
    use broadside_core::config::{BandTable, ChargeConfig};
    use broadside_core::constants::DT;
    use broadside_core::enums::ShotKind;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    use crate::bands::classify;
    use crate::controller::{integrate, ChargeBandController};

    fn controller() -> ChargeBandController {
        ChargeBandController::new(ChargeConfig::default(), BandTable::default())
    }

    /// Hover around `target` the way a player would: press below it, release above.
    fn hover(ctrl: &mut ChargeBandController, target: f64) -> Option<ShotKind> {
        let pressed = ctrl.charge() < target;
        ctrl.tick(pressed, DT).fire
    }

    #[test]
    fn test_charge_stays_bounded() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..20 {
            let config = ChargeConfig {
                pump_rate: rng.gen_range(0.0..20.0),
                leak_rate: rng.gen_range(0.0..20.0),
                smoothing: if rng.gen_bool(0.5) {
                    rng.gen_range(0.0..10.0)
                } else {
                    0.0
                },
                reset_threshold: 0.05,
            };
            let mut ctrl = ChargeBandController::new(config, BandTable::default());
            for _ in 0..2_000 {
                let dt = rng.gen_range(0.0..0.2);
                let update = ctrl.tick(rng.gen_bool(0.6), dt);
                assert!(
                    (0.0..=1.0).contains(&update.charge),
                    "charge left [0, 1]: {}",
                    update.charge
                );
            }
        }
    }

    #[test]
    fn test_priority_high_over_mid() {
        let mut bands = BandTable::default();
        bands.mid.max = 0.9;
        assert_eq!(classify(&bands, 0.8), Some(ShotKind::High));
        assert_eq!(classify(&bands, 0.6), Some(ShotKind::Mid));
        assert_eq!(classify(&bands, 0.2), Some(ShotKind::Low));
        assert_eq!(classify(&bands, 0.1), None);
    }

    #[test]
    fn test_shared_boundary_goes_to_higher_band() {
        let bands = BandTable::default();
        assert_eq!(classify(&bands, 0.40), Some(ShotKind::Mid));
        assert_eq!(classify(&bands, 0.75), Some(ShotKind::High));
        assert_eq!(classify(&bands, 0.15), Some(ShotKind::Low));
    }

    #[test]
    fn test_low_band_fires_after_hold() {
        let mut ctrl = controller();
        let mut entry_tick = None;
        let mut fire_tick = None;

        for tick in 0..300u32 {
            let fire = hover(&mut ctrl, 0.2);
            if entry_tick.is_none() && ctrl.band() == Some(ShotKind::Low) {
                entry_tick = Some(tick);
            }
            if let Some(kind) = fire {
                assert_eq!(kind, ShotKind::Low);
                fire_tick = Some(tick);
                break;
            }
        }

        let entry = entry_tick.expect("never entered the low band");
        let fire = fire_tick.expect("low band never fired");
        // The entry tick counts toward the hold.
        let held = (fire - entry + 1) as f64 * DT;
        assert!(
            (held - 0.6).abs() <= DT + 1e-9,
            "low band should fire after ~0.6s, fired after {held}"
        );
        assert_eq!(ctrl.charge(), 0.0, "firing spends the charge");
        assert!(ctrl.fired_this_cycle());
    }

    #[test]
    fn test_leaving_band_resets_hold() {
        // A fast leak lets the charge drop out of the band within a tick or two.
        let config = ChargeConfig {
            leak_rate: 6.0,
            ..ChargeConfig::default()
        };
        let mut ctrl = ChargeBandController::new(config, BandTable::default());

        // Enter the low band and hold for 0.5s.
        while ctrl.band() != Some(ShotKind::Low) {
            assert!(hover(&mut ctrl, 0.3).is_none());
        }
        let mut held = DT;
        while held < 0.5 {
            assert!(hover(&mut ctrl, 0.3).is_none());
            held += DT;
        }
        assert!(ctrl.hold_elapsed() > 0.45);

        // Release until the charge drops below the band.
        while ctrl.band().is_some() {
            assert!(ctrl.tick(false, DT).fire.is_none());
        }
        assert_eq!(ctrl.hold_elapsed(), 0.0);
        assert_eq!(ctrl.band_lock(), None);

        // Re-enter: the first band tick starts from zero again.
        while ctrl.band().is_none() {
            assert!(ctrl.tick(true, DT).fire.is_none());
        }
        assert!((ctrl.hold_elapsed() - DT).abs() < 1e-12);

        // No partial credit: nothing fires for the next 0.5s.
        let mut elapsed = DT;
        while elapsed < 0.5 {
            assert!(hover(&mut ctrl, 0.3).is_none(), "fired with carried-over hold");
            elapsed += DT;
        }
        let mut fired = false;
        for _ in 0..30 {
            if hover(&mut ctrl, 0.3) == Some(ShotKind::Low) {
                fired = true;
                break;
            }
        }
        assert!(fired, "low band should fire after a full hold on re-entry");
    }

    #[test]
    fn test_band_change_relocks_without_carry_over() {
        let mut ctrl = controller();
        while ctrl.band() != Some(ShotKind::Low) {
            ctrl.tick(true, DT);
        }
        while ctrl.band() == Some(ShotKind::Low) {
            ctrl.tick(true, DT);
        }
        assert_eq!(ctrl.band(), Some(ShotKind::Mid));
        assert_eq!(ctrl.band_lock(), Some(ShotKind::Mid));
        assert!((ctrl.hold_elapsed() - DT).abs() < 1e-12);
    }

    #[test]
    fn test_high_band_fires_when_hovering_at_0_9() {
        let mut ctrl = controller();
        let mut fired = Vec::new();
        for _ in 0..240 {
            if let Some(kind) = hover(&mut ctrl, 0.9) {
                fired.push(kind);
                break;
            }
        }
        assert_eq!(fired, vec![ShotKind::High]);
    }

    #[test]
    fn test_fire_tick_reports_reset_charge() {
        let mut ctrl = controller();
        for _ in 0..240 {
            let pressed = ctrl.charge() < 0.9;
            let update = ctrl.tick(pressed, DT);
            if update.fire.is_some() {
                assert_eq!(update.charge, 0.0);
                assert_eq!(update.band, None);
                let view = ctrl.view();
                assert_eq!(view.fill, 0.0);
                assert_eq!(view.band, None);
                assert!(view.fired_this_cycle);
                return;
            }
        }
        panic!("high band never fired");
    }

    #[test]
    fn test_fired_cycle_blocks_until_reset() {
        let config = ChargeConfig {
            reset_threshold: 0.0,
            ..ChargeConfig::default()
        };
        let mut ctrl = ChargeBandController::new(config, BandTable::default());

        let mut fires = 0;
        for _ in 0..600 {
            if hover(&mut ctrl, 0.9).is_some() {
                fires += 1;
            }
        }
        assert_eq!(fires, 1, "only one fire per cycle");
        assert!(ctrl.fired_this_cycle());
        assert_eq!(ctrl.hold_elapsed(), 0.0, "timer frozen while fired");

        // Drain to zero to re-arm.
        while ctrl.charge() > 0.0 {
            ctrl.tick(false, DT);
        }
        ctrl.tick(false, DT);
        assert!(!ctrl.fired_this_cycle());

        let mut fired_again = false;
        for _ in 0..600 {
            if hover(&mut ctrl, 0.9).is_some() {
                fired_again = true;
                break;
            }
        }
        assert!(fired_again, "re-armed controller should fire again");
    }

    #[test]
    fn test_default_threshold_rearms_right_after_fire() {
        let mut ctrl = controller();
        while hover(&mut ctrl, 0.2).is_none() {}
        // The fire reset drops the charge to 0, under the reset threshold.
        ctrl.tick(true, DT);
        assert!(!ctrl.fired_this_cycle());
    }

    #[test]
    fn test_smoothing_keeps_bounds_and_rest_points() {
        let config = ChargeConfig {
            smoothing: 4.0,
            ..ChargeConfig::default()
        };
        let raw = integrate(&ChargeConfig::default(), 0.5, true, DT);
        let eased = integrate(&config, 0.5, true, DT);
        assert!(eased > 0.5 && eased < raw, "easing slows but keeps direction");

        let mut charge = 0.0;
        for _ in 0..10_000 {
            charge = integrate(&config, charge, true, DT);
        }
        assert_eq!(charge, 1.0);
        for _ in 0..10_000 {
            charge = integrate(&config, charge, false, DT);
        }
        assert_eq!(charge, 0.0);
    }

    #[test]
    fn test_zero_hold_fires_on_entry() {
        let mut bands = BandTable::default();
        bands.low.hold_secs = 0.0;
        let mut ctrl = ChargeBandController::new(ChargeConfig::default(), bands);
        let mut fired = None;
        for _ in 0..60 {
            let update = ctrl.tick(true, DT);
            if update.fire.is_some() {
                fired = update.fire;
                break;
            }
        }
        assert_eq!(fired, Some(ShotKind::Low));
    }
}
