//! Angle normalization.

/// Normalize an angle to [0, 360) degrees.
pub fn normalize_360(deg: f64) -> f64 {
    let r = deg.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if r >= 360.0 { 0.0 } else { r }
}

/// Wrap a longitude into (-180, 180] degrees.
pub fn wrap_longitude_deg(deg: f64) -> f64 {
    let r = normalize_360(deg);
    if r > 180.0 { r - 360.0 } else { r }
}

/// Wrap a longitude into (-180, 180] by whole-turn steps.
///
/// Unlike [`wrap_longitude_deg`] this does not round-trip through [0, 360),
/// so an input already in range is returned bit-for-bit and values near
/// the ±180 seam keep their sign. Inputs more than a few turns out are
/// reduced with a remainder first.
pub fn wrap_longitude_stepwise_deg(mut deg: f64) -> f64 {
    if !deg.is_finite() {
        return deg;
    }
    if deg.abs() > 3600.0 {
        deg %= 360.0;
    }
    while deg > 180.0 {
        deg -= 360.0;
    }
    while deg <= -180.0 {
        deg += 360.0;
    }
    deg
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_zero() {
        assert_eq!(normalize_360(0.0), 0.0);
    }

    #[test]
    fn normalize_360_wraps() {
        assert_eq!(normalize_360(360.0), 0.0);
    }

    #[test]
    fn normalize_negative() {
        assert!((normalize_360(-10.0) - 350.0).abs() < 1e-12);
    }

    #[test]
    fn normalize_tiny_negative_stays_below_360() {
        let r = normalize_360(-1e-15);
        assert!((0.0..360.0).contains(&r), "got {r}");
    }

    #[test]
    fn normalize_large() {
        assert!((normalize_360(730.0) - 10.0).abs() < 1e-10);
        assert!((normalize_360(-370.0) - 350.0).abs() < 1e-10);
    }

    #[test]
    fn wrap_half_open() {
        assert_eq!(wrap_longitude_deg(180.0), 180.0);
        assert_eq!(wrap_longitude_deg(-180.0), 180.0);
        assert!((wrap_longitude_deg(181.0) - (-179.0)).abs() < 1e-12);
        assert!((wrap_longitude_deg(-181.0) - 179.0).abs() < 1e-12);
        assert!((wrap_longitude_deg(540.0) - 180.0).abs() < 1e-12);
    }

    #[test]
    fn stepwise_matches_modulo() {
        for i in -2000..2000 {
            let deg = f64::from(i) * 0.37;
            let a = wrap_longitude_deg(deg);
            let b = wrap_longitude_stepwise_deg(deg);
            assert!((a - b).abs() < 1e-9, "{deg}: {a} vs {b}");
        }
    }

    #[test]
    fn stepwise_keeps_in_range_input() {
        assert_eq!(wrap_longitude_stepwise_deg(-179.999_999), -179.999_999);
        assert_eq!(wrap_longitude_stepwise_deg(-180.0), 180.0);
    }
}
