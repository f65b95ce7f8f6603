//! # Harmonic Constituents
//!
//! A tide is modelled as a sum of cosines, one per astronomical constituent.
//! Each constituent has an angular speed fixed by celestial mechanics and an
//! amplitude/phase pair calibrated for the station.
//!
//! ## Angle Convention
//! All angles are degrees. A constituent's instantaneous argument is
//! `speed * t + phase` with `t` in hours since the profile epoch, reduced into
//! `[0, 360)` before the cosine is taken so the trigonometric argument stays small.
//!
//! ## Node Corrections
//! The lunar node regresses over 18.61 years, slowly modulating the lunar
//! constituents. A profile may carry a per-constituent [`NodeCorrection`] that is
//! valid for the year around its epoch. Minimal embedded profiles can leave it out.

use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// Standard constituent speeds in degrees per mean solar hour.
///
/// These are the NOAA speeds for the 37 constituents published with each
/// station's harmonic constants.
pub mod speeds {
    pub const M2: f64 = 28.984_104_2;
    pub const S2: f64 = 30.0;
    pub const N2: f64 = 28.439_729_5;
    pub const K1: f64 = 15.041_068_6;
    pub const M4: f64 = 57.968_208_4;
    pub const O1: f64 = 13.943_035_6;
    pub const M6: f64 = 86.952_312_7;
    pub const MK3: f64 = 44.025_172_9;
    pub const S4: f64 = 60.0;
    pub const MN4: f64 = 57.423_833_7;
    pub const NU2: f64 = 28.512_583_1;
    pub const S6: f64 = 90.0;
    pub const MU2: f64 = 27.968_208_4;
    pub const TWO_N2: f64 = 27.895_354_8;
    pub const OO1: f64 = 16.139_101_7;
    pub const LAM2: f64 = 29.455_625_3;
    pub const S1: f64 = 15.0;
    pub const M1: f64 = 14.496_693_9;
    pub const J1: f64 = 15.585_443_3;
    pub const MM: f64 = 0.544_374_7;
    pub const SSA: f64 = 0.082_137_3;
    pub const SA: f64 = 0.041_068_6;
    pub const MSF: f64 = 1.015_895_8;
    pub const MF: f64 = 1.098_033_1;
    pub const RHO1: f64 = 13.471_514_5;
    pub const Q1: f64 = 13.398_660_9;
    pub const T2: f64 = 29.958_933_3;
    pub const R2: f64 = 30.041_066_7;
    pub const TWO_Q1: f64 = 12.854_286_2;
    pub const P1: f64 = 14.958_931_4;
    pub const TWO_MK3: f64 = 42.927_139_8;
    pub const M8: f64 = 115.936_416_6;
    pub const MS4: f64 = 58.984_104_2;
    pub const K2: f64 = 30.082_137_3;
    pub const L2: f64 = 29.528_478_9;
    pub const M3: f64 = 43.476_156_3;
}

/// Reduce an angle in degrees into `[0, 360)`.
///
/// Negative inputs wrap the same way positive ones do, so elapsed times
/// before the epoch need no special handling.
#[inline]
pub fn normalize360(degrees: f64) -> f64 {
    let wrapped = degrees.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

/// Long-period node/satellite correction for one constituent.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct NodeCorrection {
    /// Node factor `f`, multiplies the amplitude
    pub factor: f64,
    /// Nodal argument `u` in degrees, added to the constituent angle
    pub argument: f64,
}

impl NodeCorrection {
    /// The identity correction (`f = 1`, `u = 0`).
    pub const NONE: NodeCorrection = NodeCorrection {
        factor: 1.0,
        argument: 0.0,
    };
}

/// One astronomical tidal component calibrated for a station.
///
/// # Example
/// ```
/// use tide_port_san_luis::constituent::{speeds, HarmonicConstituent};
///
/// let m2 = HarmonicConstituent::new("M2", speeds::M2, 1.64, 310.2);
/// assert_eq!(m2.angle_at(0.0), 310.2);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HarmonicConstituent {
    /// Short label such as "M2"
    pub name: Cow<'static, str>,
    /// Angular speed, degrees per mean solar hour
    pub speed: f64,
    /// Station amplitude in the profile's height unit
    pub amplitude: f64,
    /// Phase lag at the profile epoch, degrees in `[0, 360)`
    pub phase: f64,
    /// Optional node/satellite correction for the epoch year
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub correction: Option<NodeCorrection>,
}

impl HarmonicConstituent {
    /// Build an uncorrected constituent. Usable in `const` tables.
    pub const fn new(name: &'static str, speed: f64, amplitude: f64, phase: f64) -> Self {
        HarmonicConstituent {
            name: Cow::Borrowed(name),
            speed,
            amplitude,
            phase,
            correction: None,
        }
    }

    /// Build a constituent carrying a node correction. Usable in `const` tables.
    pub const fn corrected(
        name: &'static str,
        speed: f64,
        amplitude: f64,
        phase: f64,
        correction: NodeCorrection,
    ) -> Self {
        HarmonicConstituent {
            name: Cow::Borrowed(name),
            speed,
            amplitude,
            phase,
            correction: Some(correction),
        }
    }

    /// Attach a node correction.
    pub fn with_correction(mut self, factor: f64, argument: f64) -> Self {
        self.correction = Some(NodeCorrection { factor, argument });
        self
    }

    /// The correction in effect, identity when none is set.
    #[inline]
    pub fn node(&self) -> NodeCorrection {
        self.correction.unwrap_or(NodeCorrection::NONE)
    }

    /// Period of one full cycle in hours.
    pub fn period_hours(&self) -> f64 {
        360.0 / self.speed
    }

    /// Instantaneous angle in `[0, 360)` at `hours` since the epoch.
    #[inline]
    pub fn angle_at(&self, hours: f64) -> f64 {
        normalize360(self.speed * hours + self.phase + self.node().argument)
    }

    /// Amplitude after the node factor, if any.
    #[inline]
    pub fn effective_amplitude(&self) -> f64 {
        self.amplitude * self.node().factor
    }

    /// Height contribution of this constituent at `hours` since the epoch.
    #[inline]
    pub fn contribution_at(&self, hours: f64) -> f64 {
        self.effective_amplitude() * self.angle_at(hours).to_radians().cos()
    }
}
