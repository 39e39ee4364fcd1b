//! Error types for geographic input validation.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Rejected latitude/longitude input.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum GeoError {
    /// Coordinate is NaN or infinite.
    NotFinite(&'static str),
    /// Latitude outside [-90, 90] degrees.
    LatitudeOutOfRange(f64),
    /// Longitude outside [-180, 180] degrees.
    LongitudeOutOfRange(f64),
}

impl Display for GeoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFinite(which) => write!(f, "{which} is not a finite number"),
            Self::LatitudeOutOfRange(v) => write!(f, "latitude {v} outside [-90, 90]"),
            Self::LongitudeOutOfRange(v) => write!(f, "longitude {v} outside [-180, 180]"),
        }
    }
}

impl Error for GeoError {}
