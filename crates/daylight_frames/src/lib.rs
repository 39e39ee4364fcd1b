//! Frame helpers for the day/night map.
//!
//! Provides geographic points with the longitude wraparound invariant,
//! angle normalization, and the ecliptic → equatorial rotation.

pub mod angle;
pub mod ecliptic;
pub mod error;
pub mod geo;

pub use angle::{normalize_360, wrap_longitude_deg, wrap_longitude_stepwise_deg};
pub use ecliptic::{EquatorialCoords, OBLIQUITY_DEG, ecliptic_to_equatorial_deg};
pub use error::GeoError;
pub use geo::GeoPoint;
