//! UTC calendar date/time with sub-second precision.
//!
//! Provides `UtcTime`, the instant every render cycle is computed from,
//! and `NormalizedTime`, the quantities the celestial formulas consume.

use std::str::FromStr;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::TimeError;
use crate::julian::{
    SECONDS_PER_DAY, UNIX_EPOCH_JD, calendar_to_jd, day_of_year, days_in_month,
    julian_day_number,
};

/// Julian Day Number of 1970-01-01.
const UNIX_EPOCH_JDN: i64 = 2_440_588;

/// Timestamps below this value (2100-01-01T00:00:00Z in seconds) are read
/// as seconds, anything larger as milliseconds.
const SECONDS_TIMESTAMP_LIMIT: i64 = 4_102_444_800;

/// UTC calendar date with sub-second precision.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UtcTime {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    pub second: f64,
}

/// An instant reduced to the inputs of the solar and lunar formulas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalizedTime {
    /// Ordinal day of the year, 1 for January 1st.
    pub day_of_year: u32,
    /// Hours elapsed since 00:00 UTC, in [0, 24).
    pub utc_hour_fraction: f64,
    /// Julian Date (UTC).
    pub julian_date: f64,
}

impl UtcTime {
    pub fn new(year: i32, month: u32, day: u32, hour: u32, minute: u32, second: f64) -> Self {
        Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
        }
    }

    /// Build an instant, rejecting fields outside their calendar ranges.
    pub fn checked(
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        second: f64,
    ) -> Result<Self, TimeError> {
        let t = Self::new(year, month, day, hour, minute, second);
        t.validate()?;
        Ok(t)
    }

    /// Check every field against its calendar range.
    pub fn validate(&self) -> Result<(), TimeError> {
        if !(1..=12).contains(&self.month) {
            return Err(TimeError::FieldOutOfRange("month"));
        }
        if self.day == 0 || self.day > days_in_month(self.year, self.month) {
            return Err(TimeError::FieldOutOfRange("day"));
        }
        if self.hour > 23 {
            return Err(TimeError::FieldOutOfRange("hour"));
        }
        if self.minute > 59 {
            return Err(TimeError::FieldOutOfRange("minute"));
        }
        if !self.second.is_finite() || !(0.0..60.0).contains(&self.second) {
            return Err(TimeError::FieldOutOfRange("second"));
        }
        Ok(())
    }

    /// Instant from seconds since 1970-01-01T00:00:00Z (may be negative).
    pub fn from_unix_seconds(secs: f64) -> Self {
        let whole = secs.floor();
        let sub = secs - whole;
        let whole = whole as i64;
        let days = whole.div_euclid(86_400);
        let sod = whole.rem_euclid(86_400);
        let (year, month, day) = civil_from_days(days);
        Self {
            year,
            month,
            day,
            hour: (sod / 3600) as u32,
            minute: ((sod % 3600) / 60) as u32,
            second: (sod % 60) as f64 + sub,
        }
    }

    /// Instant from an integer Unix timestamp in either seconds or
    /// milliseconds. Values before year 2100 when read as seconds are
    /// taken as seconds.
    pub fn from_unix_timestamp_auto(timestamp: i64) -> Self {
        if timestamp < SECONDS_TIMESTAMP_LIMIT {
            Self::from_unix_seconds(timestamp as f64)
        } else {
            Self::from_unix_seconds(timestamp as f64 / 1000.0)
        }
    }

    /// Current system time. Never fails: a clock set before 1970 yields a
    /// pre-epoch instant.
    pub fn now() -> Self {
        let secs = match SystemTime::now().duration_since(UNIX_EPOCH) {
            Ok(d) => d.as_secs_f64(),
            Err(e) => -e.duration().as_secs_f64(),
        };
        Self::from_unix_seconds(secs)
    }

    /// Seconds since 1970-01-01T00:00:00Z.
    pub fn to_unix_seconds(&self) -> f64 {
        let days = julian_day_number(self.year, self.month, self.day) - UNIX_EPOCH_JDN;
        days as f64 * SECONDS_PER_DAY
            + f64::from(self.hour) * 3600.0
            + f64::from(self.minute) * 60.0
            + self.second
    }

    /// Julian Date (UTC).
    pub fn to_jd(&self) -> f64 {
        let day_frac = f64::from(self.day) + self.utc_hour_fraction() / 24.0;
        calendar_to_jd(self.year, self.month, day_frac)
    }

    /// Instant from a Julian Date (UTC), rounded to the microsecond.
    pub fn from_jd(jd: f64) -> Self {
        let secs = (jd - UNIX_EPOCH_JD) * SECONDS_PER_DAY;
        Self::from_unix_seconds((secs * 1e6).round() / 1e6)
    }

    /// Ordinal day of the year, 1 for January 1st.
    pub fn day_of_year(&self) -> u32 {
        day_of_year(self.year, self.month, self.day)
    }

    /// Hours since 00:00 UTC as a decimal.
    pub fn utc_hour_fraction(&self) -> f64 {
        f64::from(self.hour) + f64::from(self.minute) / 60.0 + self.second / 3600.0
    }

    /// Day-of-year, UTC hour and Julian Date in one pass.
    pub fn normalize(&self) -> NormalizedTime {
        NormalizedTime {
            day_of_year: self.day_of_year(),
            utc_hour_fraction: self.utc_hour_fraction(),
            julian_date: self.to_jd(),
        }
    }

    /// 00:00 UTC of the same calendar day.
    pub fn start_of_day(&self) -> Self {
        Self::new(self.year, self.month, self.day, 0, 0, 0.0)
    }
}

/// Proleptic Gregorian date from days since 1970-01-01.
///
/// Source: H. Hinnant, "chrono-Compatible Low-Level Date Algorithms".
fn civil_from_days(days: i64) -> (i32, u32, u32) {
    let z = days + 719_468;
    let era = z.div_euclid(146_097);
    let doe = z - era * 146_097;
    let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let day = doy - (153 * mp + 2) / 5 + 1;
    let month = if mp < 10 { mp + 3 } else { mp - 9 };
    let year = yoe + era * 400 + i64::from(month <= 2);
    (year as i32, month as u32, day as u32)
}

fn parse_field<T: FromStr>(s: &str, name: &str) -> Result<T, TimeError> {
    s.parse()
        .map_err(|_| TimeError::Parse(format!("invalid {name}: '{s}'")))
}

impl FromStr for UtcTime {
    type Err = TimeError;

    /// Parse `YYYY-MM-DD`, `YYYY-MM-DDThh:mm`, `YYYY-MM-DDThh:mm:ss[.fff]`
    /// (trailing `Z` optional), or a bare integer Unix timestamp in
    /// seconds or milliseconds.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit()) {
            let ts: i64 = parse_field(s, "timestamp")?;
            return Ok(Self::from_unix_timestamp_auto(ts));
        }

        let s = s.trim_end_matches('Z');
        let (date, time) = match s.split_once(['T', ' ']) {
            Some((d, t)) => (d, Some(t)),
            None => (s, None),
        };

        let date_parts: Vec<&str> = date.split('-').collect();
        if date_parts.len() != 3 {
            return Err(TimeError::Parse(format!(
                "expected YYYY-MM-DD[Thh:mm:ss]Z, got '{s}'"
            )));
        }
        let year: i32 = parse_field(date_parts[0], "year")?;
        let month: u32 = parse_field(date_parts[1], "month")?;
        let day: u32 = parse_field(date_parts[2], "day")?;

        let (hour, minute, second) = match time {
            None => (0, 0, 0.0),
            Some(t) => {
                let time_parts: Vec<&str> = t.split(':').collect();
                match time_parts.as_slice() {
                    [h, m] => (parse_field(h, "hour")?, parse_field(m, "minute")?, 0.0),
                    [h, m, sec] => (
                        parse_field(h, "hour")?,
                        parse_field(m, "minute")?,
                        parse_field(sec, "second")?,
                    ),
                    _ => return Err(TimeError::Parse(format!("invalid time of day: '{t}'"))),
                }
            }
        };

        Self::checked(year, month, day, hour, minute, second)
    }
}

impl std::fmt::Display for UtcTime {
    /// Seconds are printed to the microsecond, capped at 59.999999 so the
    /// text never reaches an out-of-range `60`.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let total_micros = ((self.second * 1e6).round() as u32).min(59_999_999);
        let whole = total_micros / 1_000_000;
        let micros = total_micros % 1_000_000;
        write!(
            f,
            "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}",
            self.year, self.month, self.day, self.hour, self.minute, whole
        )?;
        if micros > 0 {
            write!(f, ".{micros:06}")?;
        }
        f.write_str("Z")
    }
}
