//! UTC instants, calendar ↔ Julian Date conversion and sidereal time.
//!
//! This crate provides:
//! - `UtcTime`, the immutable instant every render cycle is computed from
//! - Gregorian calendar ↔ Julian Date conversion (Fliegel–Van Flandern)
//! - Normalization of an instant into day-of-year, UTC hour and Julian Date
//! - Greenwich sidereal time for the lunar sub-point
//! - `TimeSource`, a total clock (system time or a fixed override)

pub mod clock;
pub mod error;
pub mod julian;
pub mod sidereal;
pub mod utc_time;

pub use clock::TimeSource;
pub use error::TimeError;
pub use julian::{
    J2000_JD, SECONDS_PER_DAY, UNIX_EPOCH_JD, calendar_to_jd, day_of_year, days_in_month,
    jd_to_calendar, julian_day_number,
};
pub use sidereal::greenwich_sidereal_time_deg;
pub use utc_time::{NormalizedTime, UtcTime};
