//! First-order solar ephemeris.
//!
//! Declination follows a cosine of the day of year with the southern
//! solstice phased to December 21st; the sub-solar longitude follows UTC at
//! 15°/hour with the Sun over Greenwich at 12:00 UTC. No equation of time
//! and no eccentricity correction.

use std::f64::consts::TAU;

use daylight_frames::{GeoPoint, normalize_360, wrap_longitude_deg};
use daylight_time::UtcTime;

/// Amplitude of the seasonal declination swing (axial tilt), degrees.
pub const AXIAL_TILT_DEG: f64 = 23.45;

/// Days from the declination minimum to January 0.
const SOLSTICE_PHASE_DAYS: f64 = 10.0;

/// Mean tropical year used by the declination cosine.
const YEAR_DAYS: f64 = 365.25;

/// Sun's apparent rotation across the sky, degrees of longitude per hour.
const DEG_PER_HOUR: f64 = 15.0;

/// Solar declination in degrees for an ordinal day of the year.
///
/// δ = −23.45° · cos(2π · (day_of_year + 10) / 365.25)
pub fn solar_declination_deg(day_of_year: u32) -> f64 {
    -AXIAL_TILT_DEG * (TAU * (f64::from(day_of_year) + SOLSTICE_PHASE_DAYS) / YEAR_DAYS).cos()
}

/// Longitude in (-180, 180] where the Sun is overhead at `utc_hour`.
///
/// `λs = −(utc_hour − 12)·15°`, written so that noon gives +0.0.
pub fn subsolar_longitude_deg(utc_hour: f64) -> f64 {
    wrap_longitude_deg((12.0 - utc_hour) * DEG_PER_HOUR)
}

/// The point on Earth directly beneath the Sun at `instant`.
pub fn subsolar_point(instant: &UtcTime) -> GeoPoint {
    let n = instant.normalize();
    GeoPoint::wrapped(
        solar_declination_deg(n.day_of_year),
        subsolar_longitude_deg(n.utc_hour_fraction),
    )
}

/// Sun's apparent ecliptic longitude in degrees [0, 360), `d` days after
/// J2000.0.
///
/// Mean longitude plus the two leading equation-of-centre terms.
pub fn sun_apparent_longitude_deg(d: f64) -> f64 {
    let mean_longitude = normalize_360(280.460 + 0.985_647_36 * d);
    let mean_anomaly = normalize_360(357.529 + 0.985_600_28 * d).to_radians();
    normalize_360(
        mean_longitude + 1.915 * mean_anomaly.sin() + 0.020 * (2.0 * mean_anomaly).sin(),
    )
}
