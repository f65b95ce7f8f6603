//! # Harmonic Tide Predictor
//!
//! Reconstructs sea-surface height by superposing the station's constituents:
//!
//! ```text
//! height(t) = MSL + Σ f·A · cos(speed·t + phase + u)
//! ```
//!
//! with `t` in hours since the profile epoch, and `f`, `u` the optional node
//! correction (1 and 0 when absent).
//!
//! ## Numeric Behaviour
//! - Elapsed time is an exact `i64` second count; it becomes `f64` hours once.
//! - Every angle is reduced into `[0, 360)` before `cos`, for any sign of `t`.
//! - No allocation, I/O, or branching on the data; cost is linear in the
//!   constituent count.
//!
//! ## Accuracy Horizon
//! `f64` keeps the phase of the fastest constituent here (K2, ~30°/h) to well
//! under a millidegree for centuries, so rounding is never the limit. The
//! node corrections are, drifting by several percent per year. [`Accuracy`]
//! reports whether an instant is inside the profile's horizon; beyond it the
//! prediction degrades gracefully and the remedy is a re-anchored profile.

use crate::error::ProfileError;
use crate::station::{StationProfile, PORT_SAN_LUIS};
use crate::time::{CalendarInstant, SECONDS_PER_DAY, SECONDS_PER_HOUR};
use log::info;

/// How much trust to put in a prediction for a given instant.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Accuracy {
    /// Inside the profile's accuracy horizon
    Nominal,
    /// Outside the horizon; `days_from_epoch` is signed
    Degraded { days_from_epoch: i64 },
}

impl Accuracy {
    pub fn is_nominal(&self) -> bool {
        matches!(self, Accuracy::Nominal)
    }
}

/// Pure tide-height predictor over one immutable station profile.
#[derive(Clone, Debug)]
pub struct HarmonicPredictor {
    profile: StationProfile,
}

impl HarmonicPredictor {
    /// Wrap a profile without checking it. Use for trusted, compiled-in data.
    pub fn new(profile: StationProfile) -> Self {
        HarmonicPredictor { profile }
    }

    /// Wrap a profile after [`StationProfile::validate`].
    pub fn try_new(profile: StationProfile) -> Result<Self, ProfileError> {
        profile.validate()?;
        info!(
            "predictor ready for {} ({} constituents, epoch {})",
            profile.name,
            profile.constituents.len(),
            profile.reference_epoch
        );
        Ok(Self::new(profile))
    }

    /// Predictor for the compiled-in Port San Luis calibration.
    pub fn port_san_luis() -> Self {
        Self::new(PORT_SAN_LUIS.clone())
    }

    /// Read-only view of the calibration.
    pub fn profile(&self) -> &StationProfile {
        &self.profile
    }

    /// Predicted height at `now`, in the profile's unit above its datum.
    ///
    /// `now` must be read on the profile's [`TimeReference`](crate::time::TimeReference)
    /// and be a real calendar instant; anything else gives an unspecified height.
    ///
    /// # Example
    /// ```
    /// use tide_port_san_luis::{CalendarInstant, HarmonicPredictor};
    ///
    /// let predictor = HarmonicPredictor::port_san_luis();
    /// let height = predictor.predict_height(&CalendarInstant::new(2024, 6, 21, 12, 0, 0));
    /// assert!(height > -3.0 && height < 9.0);
    /// ```
    #[inline]
    pub fn predict_height(&self, now: &CalendarInstant) -> f64 {
        self.predict_elapsed_seconds(self.elapsed_seconds(now))
    }

    /// Predicted height `secs` seconds after the epoch (before, if negative).
    #[inline]
    pub fn predict_elapsed_seconds(&self, secs: i64) -> f64 {
        self.predict_at_hours(secs as f64 / SECONDS_PER_HOUR)
    }

    /// Predicted height `hours` after the epoch.
    pub fn predict_at_hours(&self, hours: f64) -> f64 {
        self.profile.mean_sea_level
            + self
                .profile
                .constituents
                .iter()
                .map(|c| c.contribution_at(hours))
                .sum::<f64>()
    }

    /// Signed whole seconds from the profile epoch to `now`.
    #[inline]
    pub fn elapsed_seconds(&self, now: &CalendarInstant) -> i64 {
        now.seconds_since(&self.profile.reference_epoch)
    }

    /// Whether `now` lies inside the accuracy horizon.
    pub fn accuracy(&self, now: &CalendarInstant) -> Accuracy {
        let secs = self.elapsed_seconds(now);
        let horizon = self.horizon_seconds();
        if (-horizon..=horizon).contains(&secs) {
            Accuracy::Nominal
        } else {
            Accuracy::Degraded {
                days_from_epoch: secs / SECONDS_PER_DAY,
            }
        }
    }

    /// First instant of the accuracy horizon.
    pub fn valid_from(&self) -> CalendarInstant {
        self.profile
            .reference_epoch
            .add_seconds(-self.horizon_seconds())
    }

    /// Last instant of the accuracy horizon.
    pub fn valid_until(&self) -> CalendarInstant {
        self.profile
            .reference_epoch
            .add_seconds(self.horizon_seconds())
    }

    fn horizon_seconds(&self) -> i64 {
        i64::from(self.profile.accuracy_horizon_days) * SECONDS_PER_DAY
    }
}

impl Default for HarmonicPredictor {
    fn default() -> Self {
        Self::port_san_luis()
    }
}
