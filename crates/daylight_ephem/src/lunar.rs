//! Truncated periodic-term lunar theory.
//!
//! Mean elements grow linearly from J2000.0; the ecliptic longitude keeps
//! the six largest periodic terms (evection, variation, annual equation)
//! and the latitude the three largest. The result is rotated to the
//! equator and referred to Greenwich sidereal time to get the sub-lunar
//! point. Accuracy is about one degree, which is what a map glyph needs.
//!
//! Source: the abridged series in Meeus, *Astronomical Algorithms*, ch. 47.

use daylight_frames::{
    GeoPoint, OBLIQUITY_DEG, ecliptic_to_equatorial_deg, normalize_360,
    wrap_longitude_stepwise_deg,
};
use daylight_time::{J2000_JD, UtcTime, greenwich_sidereal_time_deg};

use crate::solar::sun_apparent_longitude_deg;

/// Fundamental arguments of the lunar theory, degrees in [0, 360).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LunarArguments {
    /// Moon's mean longitude L'.
    pub mean_longitude_deg: f64,
    /// Moon's mean anomaly M'.
    pub mean_anomaly_deg: f64,
    /// Sun's mean anomaly M.
    pub sun_mean_anomaly_deg: f64,
    /// Moon's argument of latitude F.
    pub argument_of_latitude_deg: f64,
}

impl LunarArguments {
    /// Mean elements `d` days after J2000.0.
    pub fn at(d: f64) -> Self {
        Self {
            mean_longitude_deg: normalize_360(218.316 + 13.176_396 * d),
            mean_anomaly_deg: normalize_360(134.963 + 13.064_993 * d),
            sun_mean_anomaly_deg: normalize_360(357.529 + 0.985_600_28 * d),
            argument_of_latitude_deg: normalize_360(93.272 + 13.229_350 * d),
        }
    }

    /// Geocentric ecliptic longitude λ in degrees (not reduced).
    pub fn ecliptic_longitude_deg(&self) -> f64 {
        let mm = self.mean_anomaly_deg.to_radians();
        let ms = self.sun_mean_anomaly_deg.to_radians();
        let f = self.argument_of_latitude_deg.to_radians();
        self.mean_longitude_deg
            + 6.289 * mm.sin()
            + 1.274 * (2.0 * f - mm).sin()
            + 0.658 * (2.0 * f).sin()
            + 0.214 * (2.0 * mm).sin()
            - 0.186 * ms.sin()
            - 0.114 * (2.0 * f).sin()
    }

    /// Geocentric ecliptic latitude β in degrees.
    pub fn ecliptic_latitude_deg(&self) -> f64 {
        let mm = self.mean_anomaly_deg.to_radians();
        let f = self.argument_of_latitude_deg.to_radians();
        5.128 * f.sin() + 0.280 * (mm + f).sin() + 0.277 * (mm - f).sin()
    }
}

/// Where the Moon is and how much of it is lit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LunarPosition {
    /// Point on Earth with the Moon at the zenith.
    pub sub_point: GeoPoint,
    /// Moon-minus-Sun ecliptic longitude, degrees in [0, 360).
    pub elongation_deg: f64,
    /// Illuminated fraction of the disk, in [0, 1].
    pub illuminated_fraction: f64,
    /// Geocentric ecliptic longitude, degrees in [0, 360).
    pub ecliptic_longitude_deg: f64,
    /// Geocentric ecliptic latitude, degrees.
    pub ecliptic_latitude_deg: f64,
    /// Right ascension, degrees in [0, 360).
    pub right_ascension_deg: f64,
    /// Declination, degrees. Equal to the sub-point latitude.
    pub declination_deg: f64,
}

impl LunarPosition {
    /// Waxing while the Moon is less than 180° east of the Sun.
    pub fn is_waxing(&self) -> bool {
        self.elongation_deg < 180.0
    }
}

/// Illuminated fraction for a given elongation.
///
/// `k = (1 + cos(180° − e)) / 2`: 0 at new moon, 1 at full moon and
/// symmetric about 180°.
pub fn illuminated_fraction(elongation_deg: f64) -> f64 {
    let k = (1.0 + (180.0 - elongation_deg).to_radians().cos()) / 2.0;
    k.clamp(0.0, 1.0)
}

/// Lunar position at a Julian Date (UTC).
pub fn lunar_position_jd(jd: f64) -> LunarPosition {
    let d = jd - J2000_JD;
    let args = LunarArguments::at(d);
    let lambda = args.ecliptic_longitude_deg();
    let beta = args.ecliptic_latitude_deg();

    let eq = ecliptic_to_equatorial_deg(lambda, beta, OBLIQUITY_DEG);
    let gst = greenwich_sidereal_time_deg(jd);
    let longitude = wrap_longitude_stepwise_deg(eq.right_ascension_deg - gst);

    let elongation = normalize_360(lambda - sun_apparent_longitude_deg(d));

    LunarPosition {
        sub_point: GeoPoint::wrapped(eq.declination_deg, longitude),
        elongation_deg: elongation,
        illuminated_fraction: illuminated_fraction(elongation),
        ecliptic_longitude_deg: normalize_360(lambda),
        ecliptic_latitude_deg: beta,
        right_ascension_deg: eq.right_ascension_deg,
        declination_deg: eq.declination_deg,
    }
}

/// Lunar position at `instant`.
pub fn lunar_position(instant: &UtcTime) -> LunarPosition {
    lunar_position_jd(instant.to_jd())
}
