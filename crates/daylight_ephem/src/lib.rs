//! Low-order ephemerides for the day/night map.
//!
//! This crate provides:
//! - Sub-solar point from a first-order declination/hour-angle model
//! - Sub-lunar point, elongation and illuminated fraction from a truncated
//!   periodic-term lunar theory (~1° accuracy)
//! - Eight-sector moon phase classification
//! - Solar elevation of any ground point
//! - Sunrise/sunset and twilight times with polar sentinels
//!
//! Every quantity is recomputed from the instant passed in; nothing is
//! cached between calls.

pub mod elevation;
pub mod lunar;
pub mod moon_phase;
pub mod riseset;
pub mod riseset_types;
pub mod solar;

pub use elevation::{elevation_deg, solar_elevation_deg};
pub use lunar::{LunarArguments, LunarPosition, illuminated_fraction, lunar_position, lunar_position_jd};
pub use moon_phase::MoonPhase;
pub use riseset::{approximate_local_noon_jd, compute_all_events, compute_rise_set, sun_times};
pub use riseset_types::{Observer, RiseSetConfig, RiseSetEvent, RiseSetResult, SunTimes};
pub use solar::{
    solar_declination_deg, subsolar_longitude_deg, subsolar_point, sun_apparent_longitude_deg,
};
