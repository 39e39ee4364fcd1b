//! Types for sunrise/sunset and twilight queries.

use daylight_frames::GeoPoint;
use daylight_time::UtcTime;

/// Mean Earth radius, meters.
const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Horizon crossings of the Sun, twilight limits included.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RiseSetEvent {
    /// Upper limb of the Sun on the horizon, after refraction.
    Sunrise,
    /// Upper limb disappears below the horizon.
    Sunset,
    /// Sun centre 6° below the horizon, morning.
    CivilDawn,
    /// Sun centre 6° below the horizon, evening.
    CivilDusk,
    /// Sun centre 12° below the horizon, morning.
    NauticalDawn,
    /// Sun centre 12° below the horizon, evening.
    NauticalDusk,
    /// Sun centre 18° below the horizon, morning.
    AstronomicalDawn,
    /// Sun centre 18° below the horizon, evening.
    AstronomicalDusk,
}

impl RiseSetEvent {
    /// Every event in chronological order through a normal day.
    pub const CHRONOLOGICAL: [RiseSetEvent; 8] = [
        Self::AstronomicalDawn,
        Self::NauticalDawn,
        Self::CivilDawn,
        Self::Sunrise,
        Self::Sunset,
        Self::CivilDusk,
        Self::NauticalDusk,
        Self::AstronomicalDusk,
    ];

    /// Nominal depression below the geometric horizon in degrees.
    ///
    /// 50′ for sunrise/sunset (34′ refraction + 16′ semidiameter), the
    /// standard 6°/12°/18° for the twilight events.
    pub fn depression_deg(self) -> f64 {
        match self {
            Self::Sunrise | Self::Sunset => 50.0 / 60.0,
            Self::CivilDawn | Self::CivilDusk => 6.0,
            Self::NauticalDawn | Self::NauticalDusk => 12.0,
            Self::AstronomicalDawn | Self::AstronomicalDusk => 18.0,
        }
    }

    /// Whether this is a morning event.
    pub fn is_rising(self) -> bool {
        matches!(
            self,
            Self::Sunrise | Self::CivilDawn | Self::NauticalDawn | Self::AstronomicalDawn
        )
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Sunrise => "sunrise",
            Self::Sunset => "sunset",
            Self::CivilDawn => "civil dawn",
            Self::CivilDusk => "civil dusk",
            Self::NauticalDawn => "nautical dawn",
            Self::NauticalDusk => "nautical dusk",
            Self::AstronomicalDawn => "astronomical dawn",
            Self::AstronomicalDusk => "astronomical dusk",
        }
    }
}

/// An observer on the ground.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Observer {
    pub location: GeoPoint,
    /// Height above mean sea level in meters.
    pub altitude_m: f64,
}

impl Observer {
    pub fn new(location: GeoPoint, altitude_m: f64) -> Self {
        Self {
            location,
            altitude_m,
        }
    }
}

impl From<GeoPoint> for Observer {
    fn from(location: GeoPoint) -> Self {
        Self::new(location, 0.0)
    }
}

/// Horizon parameters for rise/set computation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RiseSetConfig {
    /// Atmospheric refraction at the horizon in arcminutes. Default: 34.0.
    pub refraction_arcmin: f64,
    /// Solar angular semidiameter in arcminutes. Default: 16.0.
    pub semidiameter_arcmin: f64,
    /// Apply geometric dip for observer altitude, `sqrt(2h/R)` radians.
    /// Default: true.
    pub altitude_correction: bool,
}

impl Default for RiseSetConfig {
    fn default() -> Self {
        Self {
            refraction_arcmin: 34.0,
            semidiameter_arcmin: 16.0,
            altitude_correction: true,
        }
    }
}

impl RiseSetConfig {
    /// Total horizon depression for sunrise/sunset in degrees.
    ///
    /// `h0 = (refraction + semidiameter) / 60 + dip_deg`
    pub fn horizon_depression_deg(&self, altitude_m: f64) -> f64 {
        let dip_deg = if self.altitude_correction && altitude_m > 0.0 {
            (2.0 * altitude_m / EARTH_RADIUS_M).sqrt().to_degrees()
        } else {
            0.0
        };
        (self.refraction_arcmin + self.semidiameter_arcmin) / 60.0 + dip_deg
    }

    /// Target solar altitude (negative, below the horizon) for `event`.
    ///
    /// Twilight depressions are fixed; sunrise/sunset use the configured
    /// horizon.
    pub fn target_altitude_deg(&self, event: RiseSetEvent, altitude_m: f64) -> f64 {
        match event {
            RiseSetEvent::Sunrise | RiseSetEvent::Sunset => -self.horizon_depression_deg(altitude_m),
            other => -other.depression_deg(),
        }
    }
}

/// Result of a single rise/set computation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RiseSetResult {
    /// Event occurs at the given instant.
    Event { time: UtcTime, event: RiseSetEvent },
    /// Sun stays below the target altitude all day.
    NeverRises,
    /// Sun stays above the target altitude all day.
    NeverSets,
}

impl RiseSetResult {
    pub fn time(&self) -> Option<UtcTime> {
        match self {
            Self::Event { time, .. } => Some(*time),
            _ => None,
        }
    }
}

/// Sunrise and sunset for one observer and date.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SunTimes {
    Daily {
        sunrise: UtcTime,
        sunset: UtcTime,
        day_length_hours: f64,
    },
    /// Midnight sun: the Sun never sets.
    PolarDay,
    /// The Sun never rises.
    PolarNight,
}

impl SunTimes {
    /// Hours of daylight, including the 24/0 of the polar cases.
    pub fn day_length_hours(&self) -> f64 {
        match self {
            Self::Daily {
                day_length_hours, ..
            } => *day_length_hours,
            Self::PolarDay => 24.0,
            Self::PolarNight => 0.0,
        }
    }

    pub fn is_polar(&self) -> bool {
        !matches!(self, Self::Daily { .. })
    }
}
