//! Greenwich Mean Sidereal Time.
//!
//! Used to turn the Moon's right ascension into the longitude of the
//! sub-lunar point. UT1 is approximated by UTC.
//!
//! Source: Meeus, *Astronomical Algorithms* (2nd ed.), Eq. 12.4, with the
//! cubic term dropped.

use crate::julian::J2000_JD;

/// Greenwich Mean Sidereal Time in degrees, in [0, 360).
///
/// GST = 280.46061837 + 360.98564736629·d + 0.000387933·T²
/// where d = JD − 2451545.0 and T = d / 36525.
pub fn greenwich_sidereal_time_deg(jd: f64) -> f64 {
    let d = jd - J2000_JD;
    let t = d / 36_525.0;
    let gst = 280.460_618_37 + 360.985_647_366_29 * d + 0.000_387_933 * t * t;
    gst.rem_euclid(360.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gst_at_j2000() {
        let g = greenwich_sidereal_time_deg(J2000_JD);
        assert!((g - 280.460_618_37).abs() < 1e-9, "GST = {g}");
    }

    #[test]
    fn gst_j2000_midnight() {
        // 2000-01-01 0h UT: GMST ≈ 6h 39m 51s ≈ 99.97°
        let g = greenwich_sidereal_time_deg(2_451_544.5);
        assert!((g - 99.97).abs() < 0.1, "GST = {g}");
    }

    #[test]
    fn gst_advances_about_one_degree_per_day() {
        let g1 = greenwich_sidereal_time_deg(2_460_000.5);
        let g2 = greenwich_sidereal_time_deg(2_460_001.5);
        let step = (g2 - g1).rem_euclid(360.0);
        assert!((step - 0.9856).abs() < 0.001, "daily step = {step}");
    }

    #[test]
    fn gst_range() {
        for &jd in &[2_451_545.0, 2_451_544.5, 2_460_000.5, 2_440_000.5, 2_300_000.0] {
            let g = greenwich_sidereal_time_deg(jd);
            assert!((0.0..360.0).contains(&g), "GST out of range: {g}");
        }
    }
}
