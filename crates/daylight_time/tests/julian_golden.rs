//! Golden Julian Dates against published USNO values.

use daylight_time::{UtcTime, calendar_to_jd, jd_to_calendar};

fn jd_of(s: &str) -> f64 {
    s.parse::<UtcTime>().unwrap().to_jd()
}

#[test]
fn usno_reference_dates() {
    let cases = [
        ("1957-10-04T19:26:24Z", 2_436_116.31),
        ("2000-01-01T12:00:00Z", 2_451_545.0),
        ("1999-01-01T00:00:00Z", 2_451_179.5),
        ("1987-01-27T00:00:00Z", 2_446_822.5),
        ("1988-06-19T12:00:00Z", 2_447_332.0),
        ("2024-01-10T12:00:00Z", 2_460_320.0),
    ];
    for (date, expected) in cases {
        let jd = jd_of(date);
        assert!(
            (jd - expected).abs() < 1e-6,
            "{date}: JD {jd}, expected {expected}"
        );
    }
}

#[test]
fn julian_date_has_no_midnight_step() {
    // Walk across a midnight in one-second steps; each step must be one second.
    let start = UtcTime::new(2024, 3, 31, 23, 59, 50.0).to_unix_seconds();
    let mut prev = UtcTime::from_unix_seconds(start).to_jd();
    for i in 1..=20 {
        let jd = UtcTime::from_unix_seconds(start + f64::from(i)).to_jd();
        let step_s = (jd - prev) * 86_400.0;
        assert!((step_s - 1.0).abs() < 1e-3, "step {i}: {step_s} s");
        prev = jd;
    }
}

#[test]
fn calendar_inverse_over_a_century() {
    let mut jd = calendar_to_jd(1950, 1, 1.25);
    while jd < calendar_to_jd(2050, 1, 1.0) {
        let (y, m, d) = jd_to_calendar(jd);
        let back = calendar_to_jd(y, m, d);
        assert!((back - jd).abs() < 1e-8, "JD {jd} -> {y}-{m}-{d} -> {back}");
        jd += 97.3;
    }
}

#[test]
fn day_of_year_matches_normalized() {
    let t: UtcTime = "2024-12-31T23:59:59Z".parse().unwrap();
    let n = t.normalize();
    assert_eq!(n.day_of_year, 366);
    assert!(n.utc_hour_fraction < 24.0);
}
