//! # Prediction Laws
//!
//! Properties every harmonic predictor must satisfy regardless of station:
//! epoch boundary condition, periodicity, boundedness, the degenerate empty
//! profile, and continuity across the epoch for negative elapsed time.

use crate::constituent::{speeds, HarmonicConstituent};
use crate::predictor::HarmonicPredictor;
use crate::station::{StationProfile, PORT_SAN_LUIS};
use crate::time::CalendarInstant;
use approx::assert_relative_eq;
use proptest::prelude::*;
use std::borrow::Cow;

const EPOCH: CalendarInstant = CalendarInstant::new(2024, 1, 1, 0, 0, 0);

fn profile_with(mean_sea_level: f64, constituents: Vec<HarmonicConstituent>) -> StationProfile {
    StationProfile {
        constituents: Cow::Owned(constituents),
        ..StationProfile::flat(mean_sea_level, EPOCH)
    }
}

fn single(speed: f64, amplitude: f64, phase: f64, mean_sea_level: f64) -> HarmonicPredictor {
    HarmonicPredictor::new(profile_with(
        mean_sea_level,
        vec![HarmonicConstituent::new("T", speed, amplitude, phase)],
    ))
}

/// Test the worked scenario: one 30°/h constituent over a 5.0 datum.
#[test]
fn scenario_thirty_degree_constituent() {
    let p = single(30.0, 1.0, 0.0, 5.0);
    assert_relative_eq!(p.predict_at_hours(0.0), 6.0, epsilon = 1e-12);
    assert_relative_eq!(p.predict_at_hours(3.0), 5.0, epsilon = 1e-12);
    assert_relative_eq!(p.predict_at_hours(6.0), 4.0, epsilon = 1e-12);
}

/// Test that the epoch reproduces the calibration phases exactly.
#[test]
fn epoch_reproduces_calibration_phases() {
    let constituents = vec![
        HarmonicConstituent::new("M2", speeds::M2, 1.6, 324.9),
        HarmonicConstituent::new("K1", speeds::K1, 1.1, 269.8),
        HarmonicConstituent::new("O1", speeds::O1, 0.7, 145.4),
        HarmonicConstituent::new("S2", speeds::S2, 0.4, 87.4),
    ];
    let expected = 2.0
        + constituents
            .iter()
            .map(|c| c.amplitude * c.phase.to_radians().cos())
            .sum::<f64>();
    let p = HarmonicPredictor::new(profile_with(2.0, constituents));
    assert_relative_eq!(p.predict_height(&EPOCH), expected, epsilon = 1e-12);
}

/// Test the epoch boundary with node corrections applied.
#[test]
fn epoch_includes_node_corrections() {
    let p = HarmonicPredictor::port_san_luis();
    let expected = PORT_SAN_LUIS.mean_sea_level
        + PORT_SAN_LUIS
            .constituents
            .iter()
            .map(|c| {
                let node = c.node();
                c.amplitude * node.factor * (c.phase + node.argument).to_radians().cos()
            })
            .sum::<f64>();
    assert_relative_eq!(
        p.predict_height(&PORT_SAN_LUIS.reference_epoch),
        expected,
        epsilon = 1e-12
    );
}

/// Test that a profile with no constituents is flat at mean sea level.
#[test]
fn empty_profile_is_flat() {
    let p = HarmonicPredictor::new(StationProfile::flat(-0.75, EPOCH));
    for instant in [
        EPOCH,
        CalendarInstant::new(1950, 6, 1, 12, 0, 0),
        CalendarInstant::new(2099, 12, 31, 23, 59, 59),
    ] {
        assert_eq!(p.predict_height(&instant), -0.75);
    }
}

/// Test that a zero-amplitude constituent changes nothing.
#[test]
fn zero_amplitude_constituent_is_inert() {
    let base = single(speeds::M2, 1.2, 40.0, 1.0);
    let padded = HarmonicPredictor::new(profile_with(
        1.0,
        vec![
            HarmonicConstituent::new("T", speeds::M2, 1.2, 40.0),
            HarmonicConstituent::new("Z", speeds::K1, 0.0, 123.0),
        ],
    ));
    for h in [-500.0, -3.3, 0.0, 11.1, 9_000.0] {
        assert_eq!(base.predict_at_hours(h), padded.predict_at_hours(h));
    }
}

/// Test periodicity on the calendar: 12 h is one period at 30°/h.
#[test]
fn calendar_periodicity_across_midnight() {
    let p = single(30.0, 1.3, 75.0, 0.4);
    let a = CalendarInstant::new(2024, 3, 9, 18, 25, 0);
    let b = CalendarInstant::new(2024, 3, 10, 6, 25, 0);
    assert_relative_eq!(p.predict_height(&a), p.predict_height(&b), epsilon = 1e-9);
}

/// Test continuity across the epoch using calendar instants before it.
#[test]
fn calendar_instants_before_epoch_wrap() {
    let p = single(30.0, 1.0, 20.0, 0.0);
    let before = CalendarInstant::new(2023, 12, 31, 21, 0, 0); // epoch - 3 h
    let after = CalendarInstant::new(2024, 1, 1, 9, 0, 0); // epoch + (12 h - 3 h)
    assert_relative_eq!(
        p.predict_height(&before),
        p.predict_height(&after),
        epsilon = 1e-9
    );
}

/// Test that re-anchoring leaves the predicted curve unchanged.
#[test]
fn reanchored_profile_predicts_the_same_curve() {
    let original = HarmonicPredictor::port_san_luis();
    let moved = HarmonicPredictor::new(
        PORT_SAN_LUIS.reanchored(CalendarInstant::new(2026, 7, 1, 0, 0, 0)),
    );
    for instant in [
        CalendarInstant::new(2024, 1, 1, 0, 0, 0),
        CalendarInstant::new(2025, 4, 12, 7, 33, 0),
        CalendarInstant::new(2026, 7, 1, 0, 0, 0),
        CalendarInstant::new(2027, 2, 28, 23, 0, 0),
    ] {
        assert_relative_eq!(
            original.predict_height(&instant),
            moved.predict_height(&instant),
            epsilon = 1e-6
        );
    }
}

/// Test that Port San Luis stays within its physical envelope all year.
#[test]
fn port_san_luis_stays_within_envelope() {
    let p = HarmonicPredictor::port_san_luis();
    let msl = PORT_SAN_LUIS.mean_sea_level;
    let reach = PORT_SAN_LUIS.max_excursion() + 1e-9;

    let (mut low, mut high) = (f64::INFINITY, f64::NEG_INFINITY);
    for hour in 0..(366 * 24) {
        let h = p.predict_elapsed_seconds(hour * 3_600);
        assert!((msl - reach..=msl + reach).contains(&h), "hour {hour}: {h}");
        low = low.min(h);
        high = high.max(h);
    }
    // Great diurnal range at Port San Luis is a little over 5 ft
    assert!(
        (4.5..=10.0).contains(&(high - low)),
        "annual range {}",
        high - low
    );
}

proptest! {
    /// One full period later the height repeats.
    #[test]
    fn periodicity_law(
        speed in 0.5f64..120.0,
        amplitude in 0.0f64..5.0,
        phase in 0.0f64..360.0,
        hours in -20_000.0f64..20_000.0,
    ) {
        let p = single(speed, amplitude, phase, 0.0);
        let period = 360.0 / speed;
        let a = p.predict_at_hours(hours);
        let b = p.predict_at_hours(hours + period);
        prop_assert!((a - b).abs() <= 1e-6 * (1.0 + amplitude), "{a} vs {b}");
    }

    /// A single constituent over a zero datum never leaves [-A, A].
    #[test]
    fn boundedness_law(
        speed in 0.01f64..120.0,
        amplitude in 0.0f64..10.0,
        phase in 0.0f64..360.0,
        secs in -3_000_000_000i64..3_000_000_000,
    ) {
        let p = single(speed, amplitude, phase, 0.0);
        let h = p.predict_elapsed_seconds(secs);
        prop_assert!(h.abs() <= amplitude, "{h} outside ±{amplitude}");
    }

    /// Before the epoch the curve is the wrapped continuation of the one after.
    #[test]
    fn negative_elapsed_time_wraps(
        delta in 0i64..43_200,
        amplitude in 0.0f64..5.0,
        phase in 0.0f64..360.0,
    ) {
        let p = single(30.0, amplitude, phase, 1.0);
        let before = p.predict_elapsed_seconds(-delta);
        let after = p.predict_elapsed_seconds(43_200 - delta);
        prop_assert!((before - after).abs() <= 1e-9, "{before} vs {after}");
    }

    /// Identical inputs give bit-identical heights.
    #[test]
    fn prediction_is_deterministic(secs in -1_000_000_000i64..1_000_000_000) {
        let p = HarmonicPredictor::port_san_luis();
        let instant = PORT_SAN_LUIS.reference_epoch.add_seconds(secs);
        prop_assert_eq!(
            p.predict_height(&instant).to_bits(),
            p.predict_height(&instant).to_bits()
        );
    }

    /// An empty profile returns mean sea level for any instant.
    #[test]
    fn empty_profile_law(msl in -10.0f64..10.0, secs in -4_000_000_000i64..4_000_000_000) {
        let p = HarmonicPredictor::new(StationProfile::flat(msl, EPOCH));
        prop_assert_eq!(p.predict_elapsed_seconds(secs), msl);
    }
}
