//! # Station Profiles
//!
//! A [`StationProfile`] is the complete calibration for one tide station:
//! the constituent table, the vertical offset of the datum, the epoch the
//! phases are anchored to, and the clock convention the epoch is read on.
//!
//! ## Port San Luis, CA (NOAA 9412110)
//! The compiled-in [`PORT_SAN_LUIS`] profile keeps the eight dominant
//! constituents, which carry nearly all of the tidal variance on this part of
//! the coast (mixed, mainly semidiurnal):
//!
//! | Constituent | Amplitude (ft) | Period (h) |
//! |---|---|---|
//! | M2 | 1.637 | 12.42 |
//! | K1 | 1.154 | 23.93 |
//! | O1 | 0.729 | 25.82 |
//! | S2 | 0.437 | 12.00 |
//! | N2 | 0.368 | 12.66 |
//! | P1 | 0.357 | 24.07 |
//! | Q1 | 0.129 | 26.87 |
//! | K2 | 0.119 | 11.97 |
//!
//! Heights are feet above Mean Lower Low Water. Times are Pacific Standard
//! Time (UTC-8) all year; daylight saving is never applied.
//!
//! ## Re-anchoring
//! Phase error grows with distance from the epoch, and the node corrections
//! only hold for about a year. [`StationProfile::reanchored`] moves the epoch
//! forward without changing the predicted curve.

use crate::constituent::{normalize360, speeds, HarmonicConstituent, NodeCorrection};
use crate::error::ProfileError;
use crate::time::{CalendarInstant, TimeReference, SECONDS_PER_HOUR};
use log::debug;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;

/// Default span around the epoch within which predictions are nominal.
pub const DEFAULT_HORIZON_DAYS: u32 = 366;

/// Unit of every height in a profile and of every prediction made from it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeightUnit {
    Feet,
    Meters,
}

impl HeightUnit {
    pub fn abbreviation(&self) -> &'static str {
        match self {
            HeightUnit::Feet => "ft",
            HeightUnit::Meters => "m",
        }
    }
}

impl fmt::Display for HeightUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.abbreviation())
    }
}

fn default_horizon_days() -> u32 {
    DEFAULT_HORIZON_DAYS
}

/// Immutable harmonic calibration for a single station.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StationProfile {
    /// Human-readable station name
    pub name: Cow<'static, str>,
    /// Height unit of amplitudes, datum offset, and predictions
    pub unit: HeightUnit,
    /// Clock the epoch (and every input instant) is read on
    pub time_reference: TimeReference,
    /// Instant all constituent phases are anchored to
    pub reference_epoch: CalendarInstant,
    /// Mean sea level above the station datum, added to the harmonic sum
    pub mean_sea_level: f64,
    /// Days either side of the epoch with nominal accuracy
    #[serde(default = "default_horizon_days")]
    pub accuracy_horizon_days: u32,
    /// Constituent table; order does not affect the result
    pub constituents: Cow<'static, [HarmonicConstituent]>,
}

impl StationProfile {
    /// A profile with no constituents predicts `mean_sea_level` everywhere.
    pub fn flat(mean_sea_level: f64, reference_epoch: CalendarInstant) -> Self {
        StationProfile {
            name: Cow::Borrowed("flat"),
            unit: HeightUnit::Feet,
            time_reference: TimeReference::Utc,
            reference_epoch,
            mean_sea_level,
            accuracy_horizon_days: DEFAULT_HORIZON_DAYS,
            constituents: Cow::Owned(Vec::new()),
        }
    }

    /// Check every constituent and epoch invariant.
    ///
    /// The compiled-in profiles satisfy these by construction; anything read
    /// from configuration goes through here before it reaches a predictor.
    pub fn validate(&self) -> Result<(), ProfileError> {
        if !self.mean_sea_level.is_finite() {
            return Err(ProfileError::NonFinite {
                field: "mean_sea_level".to_string(),
            });
        }
        if self.reference_epoch.to_naive().is_none() {
            return Err(ProfileError::InvalidEpoch(self.reference_epoch.to_string()));
        }

        for (index, c) in self.constituents.iter().enumerate() {
            let name = || c.name.to_string();
            let correction = c.correction.unwrap_or(NodeCorrection::NONE);
            for (field, value) in [
                ("speed", c.speed),
                ("amplitude", c.amplitude),
                ("phase", c.phase),
                ("node factor", correction.factor),
                ("node argument", correction.argument),
            ] {
                if !value.is_finite() {
                    return Err(ProfileError::NonFinite {
                        field: format!("constituent {index} ({}) {field}", c.name),
                    });
                }
            }
            if c.speed <= 0.0 {
                return Err(ProfileError::NonPositiveSpeed {
                    index,
                    name: name(),
                    speed: c.speed,
                });
            }
            if c.amplitude < 0.0 {
                return Err(ProfileError::NegativeAmplitude {
                    index,
                    name: name(),
                    amplitude: c.amplitude,
                });
            }
            if !(0.0..360.0).contains(&c.phase) {
                return Err(ProfileError::PhaseOutOfRange {
                    index,
                    name: name(),
                    phase: c.phase,
                });
            }
            if correction.factor < 0.0 {
                return Err(ProfileError::NegativeNodeFactor {
                    index,
                    name: name(),
                    factor: correction.factor,
                });
            }
        }
        Ok(())
    }

    /// An equivalent profile anchored at `new_epoch`.
    ///
    /// Each phase is advanced by `speed * Δt` so the predicted curve is
    /// unchanged up to rounding. Node corrections are carried over as-is.
    pub fn reanchored(&self, new_epoch: CalendarInstant) -> StationProfile {
        let shift_secs = new_epoch.seconds_since(&self.reference_epoch);
        let hours = shift_secs as f64 / SECONDS_PER_HOUR;
        debug!(
            "re-anchoring {} from {} to {} ({:+.1} h)",
            self.name, self.reference_epoch, new_epoch, hours
        );

        let constituents: Vec<HarmonicConstituent> = self
            .constituents
            .iter()
            .map(|c| HarmonicConstituent {
                phase: normalize360(c.speed * hours + c.phase),
                ..c.clone()
            })
            .collect();

        StationProfile {
            reference_epoch: new_epoch,
            constituents: Cow::Owned(constituents),
            ..self.clone()
        }
    }

    /// Sum of effective amplitudes, the largest possible excursion from MSL.
    pub fn max_excursion(&self) -> f64 {
        self.constituents
            .iter()
            .map(HarmonicConstituent::effective_amplitude)
            .sum()
    }
}

// Node factors and arguments for 2024 (lunar node near 21°).
const M2_NODE: NodeCorrection = NodeCorrection {
    factor: 0.966,
    argument: -0.8,
};
const K1_NODE: NodeCorrection = NodeCorrection {
    factor: 1.108,
    argument: -2.7,
};
const O1_NODE: NodeCorrection = NodeCorrection {
    factor: 1.174,
    argument: 3.1,
};
const K2_NODE: NodeCorrection = NodeCorrection {
    factor: 1.297,
    argument: -5.9,
};

static PORT_SAN_LUIS_CONSTITUENTS: [HarmonicConstituent; 8] = [
    HarmonicConstituent::corrected("M2", speeds::M2, 1.637, 324.9, M2_NODE),
    HarmonicConstituent::new("S2", speeds::S2, 0.437, 87.4),
    HarmonicConstituent::corrected("N2", speeds::N2, 0.368, 168.2, M2_NODE),
    HarmonicConstituent::corrected("K2", speeds::K2, 0.119, 295.1, K2_NODE),
    HarmonicConstituent::corrected("K1", speeds::K1, 1.154, 269.8, K1_NODE),
    HarmonicConstituent::corrected("O1", speeds::O1, 0.729, 145.4, O1_NODE),
    HarmonicConstituent::new("P1", speeds::P1, 0.357, 252.0),
    HarmonicConstituent::corrected("Q1", speeds::Q1, 0.129, 332.2, O1_NODE),
];

/// Compiled-in calibration for Port San Luis, CA.
///
/// Feet above MLLW, Pacific Standard Time, epoch 2024-01-01 00:00:00 PST.
pub static PORT_SAN_LUIS: StationProfile = StationProfile {
    name: Cow::Borrowed("Port San Luis, CA"),
    unit: HeightUnit::Feet,
    time_reference: TimeReference::LocalStandard {
        utc_offset_minutes: -480,
    },
    reference_epoch: CalendarInstant::new(2024, 1, 1, 0, 0, 0),
    mean_sea_level: 2.867,
    accuracy_horizon_days: DEFAULT_HORIZON_DAYS,
    constituents: Cow::Borrowed(&PORT_SAN_LUIS_CONSTITUENTS),
};
