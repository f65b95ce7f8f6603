//! # Port San Luis Tide Predictor
//!
//! This library predicts instantaneous tide height at Port San Luis, California
//! from nothing but a calendar instant. It is designed for small boards with no
//! network access: the calibration is compiled in, and a prediction is a short
//! loop over eight cosines with no allocation.
//!
//! ## Design Philosophy
//!
//! ### Pure Prediction
//! - **No hidden state**: [`HarmonicPredictor::predict_height`] is a pure function of
//!   the instant and an immutable [`StationProfile`]
//! - **Exact epoch arithmetic**: elapsed time is an `i64` second count, converted to
//!   hours once, so multi-year spans carry no accumulated rounding
//! - **Bounded arguments**: every constituent angle is wrapped into `[0, 360)` before
//!   the cosine, whether the instant is before or after the epoch
//!
//! ### Explicit Conventions
//! - **Time**: [`CalendarInstant`] is zone-less; the profile's [`TimeReference`] says
//!   which clock it is read on. Port San Luis uses Pacific Standard Time all year.
//! - **Height**: feet above Mean Lower Low Water; `mean_sea_level` is the MLLW→MSL offset
//! - **Accuracy**: [`Accuracy`] reports whether an instant is inside the profile's
//!   horizon instead of failing outside it
//!
//! ### Data Flow
//! 1. **Clock**: host or RTC supplies a `CalendarInstant` in station time
//! 2. **Predict**: `predict_height` → `f64` height
//! 3. **Present**: optional 24-hour [`TideSeries`] → ASCII chart or JSON
//!
//! ## Core Types
//! - [`HarmonicConstituent`]: one astronomical component (speed, amplitude, phase)
//! - [`StationProfile`]: the complete calibration for a station
//! - [`HarmonicPredictor`]: the predictor
//! - [`Sample`] / [`TideSeries`]: a sampled window for display

use serde::{Deserialize, Serialize};

// Module declarations
pub mod config;
pub mod constituent;
pub mod error;
pub mod predictor;
pub mod renderer;
pub mod series;
pub mod station;
pub mod time;

#[cfg(test)]
mod tests;

pub use constituent::{HarmonicConstituent, NodeCorrection};
pub use error::{ConfigError, ProfileError};
pub use predictor::{Accuracy, HarmonicPredictor};
pub use station::{HeightUnit, StationProfile, PORT_SAN_LUIS};
pub use time::{CalendarInstant, TimeReference};

/// A single predicted height at a time relative to "now".
///
/// Sized for memory efficiency:
/// - `i16` for time (±72 hours in minutes fits in 16 bits)
/// - `f32` for height (ample for centimetre-level tide display)
/// - Total size: 8 bytes per sample with alignment
///
/// # Example
/// ```
/// use tide_port_san_luis::Sample;
///
/// // Current tide height
/// let now_sample = Sample { mins_rel: 0, height: 3.2 };
///
/// // Tide 2 hours ago
/// let past_sample = Sample { mins_rel: -120, height: 1.8 };
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    /// Minutes relative to `TideSeries::now`
    pub mins_rel: i16,
    /// Height in the series unit
    pub height: f32,
}

/// A window of predicted heights centred on one instant.
///
/// # Degraded Accuracy
/// When `degraded = true`, `now` lies outside the station profile's accuracy
/// horizon. The curve is still the harmonic prediction, but node corrections
/// are stale and the display flags it.
///
/// # Example
/// ```
/// use tide_port_san_luis::{CalendarInstant, HeightUnit, Sample, TideSeries};
///
/// let series = TideSeries {
///     now: CalendarInstant::new(2024, 1, 1, 0, 0, 0),
///     unit: HeightUnit::Feet,
///     samples: vec![
///         Sample { mins_rel: -10, height: 2.1 },
///         Sample { mins_rel: 0, height: 2.3 },
///         Sample { mins_rel: 10, height: 2.5 },
///     ],
///     degraded: false,
/// };
///
/// assert_eq!(series.samples.len(), 3);
/// assert_eq!(series.now_sample().map(|s| s.height), Some(2.3));
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TideSeries {
    /// Instant the window is centred on, in station time
    pub now: CalendarInstant,
    /// Unit of every sample height
    pub unit: HeightUnit,
    /// Samples in chronological order
    pub samples: Vec<Sample>,
    /// True if `now` is outside the profile's accuracy horizon
    pub degraded: bool,
}

impl TideSeries {
    /// The sample at `mins_rel == 0`, if the grid includes it.
    pub fn now_sample(&self) -> Option<&Sample> {
        self.samples.iter().find(|s| s.mins_rel == 0)
    }

    /// Lowest and highest sample heights, `None` for an empty series.
    pub fn bounds(&self) -> Option<(f32, f32)> {
        if self.samples.is_empty() {
            return None;
        }
        Some(
            self.samples
                .iter()
                .fold((f32::INFINITY, f32::NEG_INFINITY), |(min, max), s| {
                    (min.min(s.height), max.max(s.height))
                }),
        )
    }
}
