//! Proleptic Gregorian calendar ↔ Julian Date.
//!
//! Integer day numbers use the Fliegel–Van Flandern form: the year is
//! shifted so that March is month 3 and February (with its leap day) is
//! the last month, which reduces month lengths to `floor((153·m + 2) / 5)`.
//!
//! Source: Fliegel & Van Flandern, CACM 11(10), 1968.

/// Julian Date of the J2000.0 epoch (2000-01-01T12:00:00 TT, used here as UTC).
pub const J2000_JD: f64 = 2_451_545.0;

/// Julian Date of the Unix epoch (1970-01-01T00:00:00Z).
pub const UNIX_EPOCH_JD: f64 = 2_440_587.5;

/// Seconds in one civil day.
pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// Julian Day Number of a calendar date (the JD at noon of that day).
///
/// `a = (14 − month) / 12`, `y = year + 4800 − a`, `m = month + 12a − 3`,
/// `JDN = day + (153m + 2) / 5 + 365y + y/4 − y/100 + y/400 − 32045`.
pub fn julian_day_number(year: i32, month: u32, day: u32) -> i64 {
    let month = i64::from(month);
    let a = (14 - month) / 12;
    let y = i64::from(year) + 4800 - a;
    let m = month + 12 * a - 3;
    i64::from(day) + (153 * m + 2) / 5 + 365 * y + y.div_euclid(4) - y.div_euclid(100)
        + y.div_euclid(400)
        - 32045
}

/// Julian Date from a calendar date with fractional day.
///
/// `day_frac` is the day of month plus the elapsed fraction of that day,
/// so `calendar_to_jd(2000, 1, 1.5)` is J2000.0. The result is continuous
/// across midnight: the last instant of one day and the first of the next
/// differ only by the elapsed time.
pub fn calendar_to_jd(year: i32, month: u32, day_frac: f64) -> f64 {
    let day = day_frac.floor();
    let frac = day_frac - day;
    julian_day_number(year, month, day as u32) as f64 - 0.5 + frac
}

/// Calendar date `(year, month, day_frac)` from a Julian Date.
///
/// Inverse of [`calendar_to_jd`].
pub fn jd_to_calendar(jd: f64) -> (i32, u32, f64) {
    let z = (jd + 0.5).floor();
    let frac = jd + 0.5 - z;

    let mut l = z as i64 + 68_569;
    let n = 4 * l / 146_097;
    l -= (146_097 * n + 3) / 4;
    let i = 4000 * (l + 1) / 1_461_001;
    l = l - 1461 * i / 4 + 31;
    let j = 80 * l / 2447;
    let day = l - 2447 * j / 80;
    l = j / 11;
    let month = j + 2 - 12 * l;
    let year = 100 * (n - 49) + i + l;

    (year as i32, month as u32, day as f64 + frac)
}

/// Whether a proleptic Gregorian year is a leap year.
pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Number of days in a month, or 0 for an invalid month.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => 0,
    }
}

/// Ordinal day of the year, 1 for January 1st.
pub fn day_of_year(year: i32, month: u32, day: u32) -> u32 {
    (julian_day_number(year, month, day) - julian_day_number(year, 1, 1) + 1) as u32
}
