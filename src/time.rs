//! # Calendar Instants and Station Time
//!
//! The predictor works on a plain calendar tuple rather than any platform
//! clock type, so it can be fed by an RTC peripheral, a GPS receiver, or
//! `chrono` on a host. A [`CalendarInstant`] carries no zone. The profile's
//! [`TimeReference`] says which clock the fields are read on, and every caller
//! must hand in instants on that same clock.
//!
//! Elapsed time is computed from whole days and seconds in `i64`, so spans of
//! centuries are exact before the single conversion to floating-point hours.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, Timelike, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const SECONDS_PER_DAY: i64 = 86_400;
pub const SECONDS_PER_HOUR: f64 = 3_600.0;

/// A zone-less calendar instant with one-second resolution.
///
/// Field ranges are the caller's responsibility: month 1–12, day valid for
/// the month, hour 0–23, minute 0–59, second 0–59.
///
/// # Example
/// ```
/// use tide_port_san_luis::time::CalendarInstant;
///
/// let a = CalendarInstant::new(2024, 1, 1, 0, 0, 0);
/// let b = CalendarInstant::new(2024, 1, 2, 6, 0, 0);
/// assert_eq!(b.seconds_since(&a), 30 * 3600);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CalendarInstant {
    pub year: i32,
    pub month: u8,
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
}

impl CalendarInstant {
    pub const fn new(year: i32, month: u8, day: u8, hour: u8, minute: u8, second: u8) -> Self {
        CalendarInstant {
            year,
            month,
            day,
            hour,
            minute,
            second,
        }
    }

    /// Seconds since 1970-01-01 00:00:00 on the same (unnamed) clock.
    pub fn seconds_since_unix_epoch(&self) -> i64 {
        let days = days_from_civil(self.year, self.month, self.day);
        days * SECONDS_PER_DAY
            + i64::from(self.hour) * 3_600
            + i64::from(self.minute) * 60
            + i64::from(self.second)
    }

    /// Signed seconds from `earlier` to `self`; negative when `self` comes first.
    pub fn seconds_since(&self, earlier: &CalendarInstant) -> i64 {
        self.seconds_since_unix_epoch() - earlier.seconds_since_unix_epoch()
    }

    /// Inverse of [`seconds_since_unix_epoch`](Self::seconds_since_unix_epoch).
    pub fn from_seconds_since_unix_epoch(secs: i64) -> Self {
        let days = secs.div_euclid(SECONDS_PER_DAY);
        let rem = secs.rem_euclid(SECONDS_PER_DAY);
        let (year, month, day) = civil_from_days(days);
        CalendarInstant {
            year,
            month,
            day,
            hour: (rem / 3_600) as u8,
            minute: (rem % 3_600 / 60) as u8,
            second: (rem % 60) as u8,
        }
    }

    /// The instant `secs` seconds later (earlier when negative).
    pub fn add_seconds(&self, secs: i64) -> Self {
        Self::from_seconds_since_unix_epoch(self.seconds_since_unix_epoch() + secs)
    }

    /// Convert to a `chrono` value, `None` if the fields are not a real date.
    pub fn to_naive(&self) -> Option<NaiveDateTime> {
        NaiveDate::from_ymd_opt(self.year, u32::from(self.month), u32::from(self.day))?.and_hms_opt(
            u32::from(self.hour),
            u32::from(self.minute),
            u32::from(self.second),
        )
    }
}

impl From<NaiveDateTime> for CalendarInstant {
    fn from(dt: NaiveDateTime) -> Self {
        CalendarInstant {
            year: dt.year(),
            month: dt.month() as u8,
            day: dt.day() as u8,
            hour: dt.hour() as u8,
            minute: dt.minute() as u8,
            // leap seconds fold into :59
            second: dt.second().min(59) as u8,
        }
    }
}

impl fmt::Display for CalendarInstant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02} {:02}:{:02}:{:02}",
            self.year, self.month, self.day, self.hour, self.minute, self.second
        )
    }
}

/// Which clock a station's calendar instants are read on.
///
/// NOAA publishes harmonic constants in both GMT and local standard time.
/// Local standard time never observes daylight saving, so it is a fixed offset.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TimeReference {
    /// Coordinated Universal Time
    Utc,
    /// Fixed-offset local standard time, e.g. -480 for PST
    LocalStandard { utc_offset_minutes: i32 },
}

impl TimeReference {
    /// Offset from UTC in seconds.
    pub fn offset_seconds(&self) -> i64 {
        match self {
            TimeReference::Utc => 0,
            TimeReference::LocalStandard { utc_offset_minutes } => {
                i64::from(*utc_offset_minutes) * 60
            }
        }
    }

    /// Read a UTC instant on this clock.
    pub fn instant_from_utc(&self, now: DateTime<Utc>) -> CalendarInstant {
        CalendarInstant::from_seconds_since_unix_epoch(now.timestamp() + self.offset_seconds())
    }

    /// Short label for display, e.g. "UTC" or "UTC-08:00".
    pub fn label(&self) -> String {
        match self {
            TimeReference::Utc => "UTC".to_string(),
            TimeReference::LocalStandard { utc_offset_minutes } => {
                let sign = if *utc_offset_minutes < 0 { '-' } else { '+' };
                let abs = utc_offset_minutes.unsigned_abs();
                format!("UTC{}{:02}:{:02}", sign, abs / 60, abs % 60)
            }
        }
    }
}

/// Days from 1970-01-01 to the given proleptic Gregorian date.
fn days_from_civil(year: i32, month: u8, day: u8) -> i64 {
    let (m, d) = (i64::from(month), i64::from(day));
    let y = i64::from(year) - i64::from(m <= 2);
    let era = if y >= 0 { y } else { y - 399 } / 400;
    let yoe = y - era * 400;
    let mp = (m + 9) % 12; // March = 0
    let doy = (153 * mp + 2) / 5 + d - 1;
    let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy;
    era * 146_097 + doe - 719_468
}

/// Proleptic Gregorian date for a day count from 1970-01-01.
fn civil_from_days(days: i64) -> (i32, u8, u8) {
    let z = days + 719_468;
    let era = if z >= 0 { z } else { z - 146_096 } / 146_097;
    let doe = z - era * 146_097;
    let yoe = (doe - doe / 1_460 + doe / 36_524 - doe / 146_096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let day = doy - (153 * mp + 2) / 5 + 1;
    let month = if mp < 10 { mp + 3 } else { mp - 9 };
    let year = yoe + era * 400 + i64::from(month <= 2);
    (year as i32, month as u8, day as u8)
}
