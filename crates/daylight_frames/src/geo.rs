//! Geographic points.

use serde::{Deserialize, Serialize};

use crate::angle::wrap_longitude_stepwise_deg;
use crate::error::GeoError;

/// A point on the Earth's surface.
///
/// Latitude is in [-90, 90] degrees (north positive); longitude is in
/// (-180, 180] degrees (east positive). Every constructor restores the
/// longitude range, so arithmetic results can be fed back in safely.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude_deg: f64,
    pub longitude_deg: f64,
}

impl GeoPoint {
    /// Validate user-supplied coordinates.
    ///
    /// Latitude must lie in [-90, 90] and longitude in [-180, 180]; -180 is
    /// accepted and stored as 180.
    pub fn new(latitude_deg: f64, longitude_deg: f64) -> Result<Self, GeoError> {
        if !latitude_deg.is_finite() {
            return Err(GeoError::NotFinite("latitude"));
        }
        if !longitude_deg.is_finite() {
            return Err(GeoError::NotFinite("longitude"));
        }
        if !(-90.0..=90.0).contains(&latitude_deg) {
            return Err(GeoError::LatitudeOutOfRange(latitude_deg));
        }
        if !(-180.0..=180.0).contains(&longitude_deg) {
            return Err(GeoError::LongitudeOutOfRange(longitude_deg));
        }
        Ok(Self {
            latitude_deg,
            longitude_deg: wrap_longitude_stepwise_deg(longitude_deg),
        })
    }

    /// Build from computed coordinates: latitude is clamped to [-90, 90]
    /// and longitude wrapped into (-180, 180].
    pub fn wrapped(latitude_deg: f64, longitude_deg: f64) -> Self {
        Self {
            latitude_deg: latitude_deg.clamp(-90.0, 90.0),
            longitude_deg: wrap_longitude_stepwise_deg(longitude_deg),
        }
    }

    /// Re-check the invariants on a value that may have been built by hand
    /// (e.g. deserialized).
    pub fn validated(self) -> Result<Self, GeoError> {
        Self::new(self.latitude_deg, self.longitude_deg)
    }

    /// Latitude in radians.
    pub fn latitude_rad(&self) -> f64 {
        self.latitude_deg.to_radians()
    }

    /// Longitude in radians (east positive).
    pub fn longitude_rad(&self) -> f64 {
        self.longitude_deg.to_radians()
    }
}

impl std::fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.1}°, {:.1}°", self.latitude_deg, self.longitude_deg)
    }
}
