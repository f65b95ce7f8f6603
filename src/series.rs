//! # Sampled Tide Series
//!
//! Builds the fixed-grid series the chart and the JSON dump consume, by
//! calling the predictor at regular offsets around "now".
//!
//! ## Temporal Resolution
//! The default window is 12 hours either side of now at 10-minute steps,
//! 145 samples in all. The sample with `mins_rel == 0` is the current height.
//! All offsets are applied to the elapsed-second count, not the calendar, so
//! sampling never has to normalise dates.

use crate::predictor::HarmonicPredictor;
use crate::time::CalendarInstant;
use crate::{Sample, TideSeries};
use log::warn;
use serde::{Deserialize, Serialize};

pub const DEFAULT_WINDOW_HOURS: i64 = 12;
pub const DEFAULT_STEP_MINUTES: i64 = 10;
/// Largest window whose minute offsets still fit a `Sample`.
pub const MAX_WINDOW_HOURS: i64 = 72;

/// Sample the predictor from `now - window` to `now + window` inclusive.
///
/// `window_hours` is clamped to `1..=MAX_WINDOW_HOURS` and `step_minutes`
/// to at least one minute. Samples sit on whole steps either side of now;
/// when the step does not divide the window the ends fall short of it by the
/// same amount.
///
/// # Example
/// ```
/// use tide_port_san_luis::{series, CalendarInstant, HarmonicPredictor};
///
/// let predictor = HarmonicPredictor::port_san_luis();
/// let now = CalendarInstant::new(2024, 3, 10, 9, 0, 0);
/// let s = series::around(&predictor, &now, 12, 10);
/// assert_eq!(s.samples.len(), 145);
/// ```
pub fn around(
    predictor: &HarmonicPredictor,
    now: &CalendarInstant,
    window_hours: i64,
    step_minutes: i64,
) -> TideSeries {
    let window = window_hours.clamp(1, MAX_WINDOW_HOURS);
    let step = step_minutes.max(1);
    if window != window_hours || step != step_minutes {
        warn!(
            "series window {}h/{}min out of range, using {}h/{}min",
            window_hours, step_minutes, window, step
        );
    }

    // Grid anchored on now, so there is always a `mins_rel == 0` sample
    let steps_each_side = window * 60 / step;
    let base = predictor.elapsed_seconds(now);
    let mut samples = Vec::with_capacity((2 * steps_each_side + 1) as usize);
    samples.extend((-steps_each_side..=steps_each_side).map(|k| {
        let mins = k * step;
        Sample {
            mins_rel: mins as i16,
            height: predictor.predict_elapsed_seconds(base + mins * 60) as f32,
        }
    }));

    TideSeries {
        now: *now,
        unit: predictor.profile().unit,
        samples,
        degraded: !predictor.accuracy(now).is_nominal(),
    }
}

/// The default 24-hour, 10-minute series around `now`.
pub fn daily(predictor: &HarmonicPredictor, now: &CalendarInstant) -> TideSeries {
    around(predictor, now, DEFAULT_WINDOW_HOURS, DEFAULT_STEP_MINUTES)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExtremumKind {
    High,
    Low,
}

/// A local high or low water found in a series.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Extremum {
    pub kind: ExtremumKind,
    pub mins_rel: i16,
    pub height: f32,
}

/// Local highs and lows, in time order.
///
/// A sample is an extremum when the curve turns on it. On a flat top or
/// bottom the first sample of the plateau is reported. Endpoints never are.
pub fn extrema(series: &TideSeries) -> Vec<Extremum> {
    series
        .samples
        .windows(3)
        .filter_map(|w| {
            let (prev, here, next) = (w[0].height, w[1].height, w[2].height);
            let kind = if here > prev && here >= next {
                ExtremumKind::High
            } else if here < prev && here <= next {
                ExtremumKind::Low
            } else {
                return None;
            };
            Some(Extremum {
                kind,
                mins_rel: w[1].mins_rel,
                height: here,
            })
        })
        .collect()
}
