//! Ecliptic → equatorial rotation.
//!
//! A rotation about the x-axis (vernal equinox direction) by the
//! obliquity of the ecliptic, expressed in spherical form.

/// Mean obliquity of the ecliptic used by the low-order lunar theory.
pub const OBLIQUITY_DEG: f64 = 23.439;

/// Equatorial coordinates of a direction on the celestial sphere.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EquatorialCoords {
    /// Right ascension in degrees, range [0, 360).
    pub right_ascension_deg: f64,
    /// Declination in degrees, range [-90, 90].
    pub declination_deg: f64,
}

/// Convert ecliptic longitude/latitude to right ascension/declination.
///
/// α = atan2(sin λ·cos ε − tan β·sin ε, cos λ)
/// δ = asin(sin β·cos ε + cos β·sin ε·sin λ)
pub fn ecliptic_to_equatorial_deg(
    longitude_deg: f64,
    latitude_deg: f64,
    obliquity_deg: f64,
) -> EquatorialCoords {
    let lambda = longitude_deg.to_radians();
    let beta = latitude_deg.to_radians();
    let (sin_e, cos_e) = obliquity_deg.to_radians().sin_cos();

    let alpha = (lambda.sin() * cos_e - beta.tan() * sin_e).atan2(lambda.cos());
    let sin_delta = beta.sin() * cos_e + beta.cos() * sin_e * lambda.sin();
    let delta = sin_delta.clamp(-1.0, 1.0).asin();

    let mut ra = alpha.to_degrees();
    if ra < 0.0 {
        ra += 360.0;
    }
    EquatorialCoords {
        right_ascension_deg: if ra >= 360.0 { 0.0 } else { ra },
        declination_deg: delta.to_degrees(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn equinox_is_origin() {
        let c = ecliptic_to_equatorial_deg(0.0, 0.0, OBLIQUITY_DEG);
        assert!(c.right_ascension_deg.abs() < EPS);
        assert!(c.declination_deg.abs() < EPS);
    }

    #[test]
    fn summer_solstice_point() {
        let c = ecliptic_to_equatorial_deg(90.0, 0.0, OBLIQUITY_DEG);
        assert!((c.right_ascension_deg - 90.0).abs() < EPS);
        assert!((c.declination_deg - OBLIQUITY_DEG).abs() < EPS);
    }

    #[test]
    fn winter_solstice_point() {
        let c = ecliptic_to_equatorial_deg(270.0, 0.0, OBLIQUITY_DEG);
        assert!((c.right_ascension_deg - 270.0).abs() < EPS);
        assert!((c.declination_deg + OBLIQUITY_DEG).abs() < EPS);
    }

    #[test]
    fn ecliptic_pole() {
        let c = ecliptic_to_equatorial_deg(0.0, 90.0 - 1e-9, OBLIQUITY_DEG);
        assert!((c.declination_deg - (90.0 - OBLIQUITY_DEG)).abs() < 1e-6);
    }

    #[test]
    fn zero_obliquity_is_identity() {
        let c = ecliptic_to_equatorial_deg(123.0, 4.5, 0.0);
        assert!((c.right_ascension_deg - 123.0).abs() < EPS);
        assert!((c.declination_deg - 4.5).abs() < EPS);
    }

    #[test]
    fn ra_always_in_range() {
        for i in 0..720 {
            let c = ecliptic_to_equatorial_deg(f64::from(i) * 0.5, 5.0, OBLIQUITY_DEG);
            assert!((0.0..360.0).contains(&c.right_ascension_deg));
        }
    }
}
