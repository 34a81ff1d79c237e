//! Astronomical sunrise computation.
//!
//! Implements the classic solar almanac algorithm: mean anomaly for the day,
//! ecliptic longitude, right ascension, declination, then the hour angle at
//! which the sun's upper limb crosses the horizon (zenith 90.833°, which
//! folds in the solar radius and standard atmospheric refraction).
//! Deterministic, no I/O. Polar day and polar night are values, not errors.

use chrono::{Datelike, Duration, NaiveDate, NaiveTime};
use serde::Serialize;

use crate::error::{AppError, AppResult};

/// Zenith angle for official sunrise (upper limb + refraction), degrees.
const ZENITH_OFFICIAL: f64 = 90.833;

/// A validated geographic coordinate in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
}

impl Location {
    /// Rejects out-of-range coordinates instead of clamping them.
    pub fn new(latitude: f64, longitude: f64) -> AppResult<Self> {
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(AppError::InvalidLocation(format!(
                "latitude {latitude} outside [-90, 90]"
            )));
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(AppError::InvalidLocation(format!(
                "longitude {longitude} outside [-180, 180]"
            )));
        }
        Ok(Self { latitude, longitude })
    }
}

/// Outcome of a sunrise computation for one date and location.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SunriseEvent {
    /// The sun rises at this time.
    Rises(NaiveTime),
    /// The sun never sets on this date (no rising event).
    PolarDay,
    /// The sun never rises on this date.
    PolarNight,
}

impl SunriseEvent {
    pub fn time(self) -> Option<NaiveTime> {
        match self {
            SunriseEvent::Rises(t) => Some(t),
            _ => None,
        }
    }
}

fn sin_deg(d: f64) -> f64 {
    d.to_radians().sin()
}

fn cos_deg(d: f64) -> f64 {
    d.to_radians().cos()
}

fn normalize_degrees(mut d: f64) -> f64 {
    d %= 360.0;
    if d < 0.0 {
        d += 360.0;
    }
    d
}

fn normalize_hours(mut h: f64) -> f64 {
    h %= 24.0;
    if h < 0.0 {
        h += 24.0;
    }
    h
}

/// Sunrise in UTC for the given date and location.
pub fn sunrise_utc(date: NaiveDate, location: Location) -> SunriseEvent {
    let day_of_year = f64::from(date.ordinal());
    let lng_hour = location.longitude / 15.0;

    // Approximate time of the rising event, in fractional days.
    let t = day_of_year + ((6.0 - lng_hour) / 24.0);

    // Sun's mean anomaly and true ecliptic longitude.
    let mean_anomaly = (0.9856 * t) - 3.289;
    let ecliptic_lon = normalize_degrees(
        mean_anomaly
            + (1.916 * sin_deg(mean_anomaly))
            + (0.020 * sin_deg(2.0 * mean_anomaly))
            + 282.634,
    );

    // Right ascension, folded into the same quadrant as the longitude,
    // expressed in hours.
    let mut right_ascension =
        normalize_degrees((0.91764 * ecliptic_lon.to_radians().tan()).atan().to_degrees());
    let lon_quadrant = (ecliptic_lon / 90.0).floor() * 90.0;
    let ra_quadrant = (right_ascension / 90.0).floor() * 90.0;
    right_ascension = (right_ascension + (lon_quadrant - ra_quadrant)) / 15.0;

    // Solar declination.
    let sin_dec = 0.39782 * sin_deg(ecliptic_lon);
    let cos_dec = sin_dec.asin().cos();

    // Local hour angle of the rising event.
    let cos_h = (cos_deg(ZENITH_OFFICIAL) - (sin_dec * sin_deg(location.latitude)))
        / (cos_dec * cos_deg(location.latitude));

    if cos_h > 1.0 {
        return SunriseEvent::PolarNight;
    }
    if cos_h < -1.0 {
        return SunriseEvent::PolarDay;
    }

    let hour_angle = (360.0 - cos_h.acos().to_degrees()) / 15.0;

    // Local mean time of rising, then back to UTC.
    let local_mean = hour_angle + right_ascension - (0.06571 * t) - 6.622;
    let utc_hours = normalize_hours(local_mean - lng_hour);

    let seconds = (utc_hours * 3600.0).round() as u32 % 86_400;
    // seconds < 86_400 always holds after the modulo
    let time = NaiveTime::from_num_seconds_from_midnight_opt(seconds, 0)
        .unwrap_or(NaiveTime::MIN);
    SunriseEvent::Rises(time)
}

/// Sunrise in civil local time, shifted by the user's UTC offset.
/// `NaiveTime` addition wraps around midnight, which is the desired
/// behavior for offsets that push the event across a date boundary.
pub fn sunrise_local(date: NaiveDate, location: Location, utc_offset_minutes: i32) -> SunriseEvent {
    match sunrise_utc(date, location) {
        SunriseEvent::Rises(t) => {
            SunriseEvent::Rises(t + Duration::minutes(i64::from(utc_offset_minutes)))
        }
        other => other,
    }
}
