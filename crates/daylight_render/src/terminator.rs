//! Day/night terminator polyline.
//!
//! On the terminator the solar elevation is zero, which gives the closed
//! form `tan φ = −cos(λ − λs) / tan δs` for the latitude at each
//! longitude. The curve degenerates to a meridian pair at the equinoxes,
//! so the declination is kept at least `MIN_DECLINATION_DEG` away from 0.

use daylight_frames::GeoPoint;

use crate::projection::{PixelPoint, ProjectionMapper};

/// Longitude step between terminator samples, degrees.
pub const TERMINATOR_STEP_DEG: f64 = 2.0;

const MIN_DECLINATION_DEG: f64 = 1e-3;

/// Latitude of the terminator at `lng_deg` for a Sun over `sun`.
pub fn terminator_latitude_deg(sun: &GeoPoint, lng_deg: f64) -> f64 {
    let dec = if sun.latitude_deg.abs() < MIN_DECLINATION_DEG {
        MIN_DECLINATION_DEG.copysign(sun.latitude_deg)
    } else {
        sun.latitude_deg
    };
    let tan_dec = dec.to_radians().tan();
    let c = (lng_deg - sun.longitude_deg).to_radians().cos();
    (-c / tan_dec).atan().to_degrees()
}

/// Projected terminator, split into runs of visible points.
///
/// Samples every [`TERMINATOR_STEP_DEG`] from 180° W to 180° E. Points
/// that fall off the canvas rows break the line so no segment jumps across
/// the hidden part.
pub fn terminator_points(sun: &GeoPoint, mapper: &ProjectionMapper) -> Vec<Vec<PixelPoint>> {
    let steps = (360.0 / TERMINATOR_STEP_DEG) as usize;
    let mut runs = Vec::new();
    let mut current = Vec::new();

    for i in 0..=steps {
        let lng = -180.0 + i as f64 * TERMINATOR_STEP_DEG;
        let lat = terminator_latitude_deg(sun, lng);
        // Longitude stays unwrapped so +180° lands on the right edge
        let p = mapper
            .projection
            .geo_to_pixel(lat, lng, mapper.width, mapper.height);
        if mapper.is_visible(p) {
            current.push(p);
        } else if !current.is_empty() {
            runs.push(std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        runs.push(current);
    }
    runs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projection::Projection;
    use daylight_ephem::solar_elevation_deg;

    #[test]
    fn terminator_has_zero_elevation() {
        for &(dec, slng) in &[(23.0, 0.0), (-15.0, 100.0), (5.0, -170.0), (0.0, 30.0)] {
            let sun = GeoPoint::wrapped(dec, slng);
            for i in 0..36 {
                let lng = -180.0 + f64::from(i) * 10.0;
                let lat = terminator_latitude_deg(&sun, lng);
                let e = solar_elevation_deg(&GeoPoint::wrapped(lat, lng), &sun);
                assert!(e.abs() < 2e-3, "dec {dec}, lng {lng}: elevation {e}");
            }
        }
    }

    #[test]
    fn equirectangular_is_one_full_run() {
        let m = ProjectionMapper::new(Projection::Equirectangular, 720, 360);
        let runs = terminator_points(&GeoPoint::wrapped(20.0, 0.0), &m);
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].len(), 181);
        assert!((runs[0][0].x).abs() < 1e-9);
        assert!((runs[0][180].x - 720.0).abs() < 1e-9);
    }

    #[test]
    fn mercator_drops_high_latitudes() {
        let m = ProjectionMapper::new(Projection::Mercator, 1000, 500);
        let runs = terminator_points(&GeoPoint::wrapped(22.0, 0.0), &m);
        let total: usize = runs.iter().map(Vec::len).sum();
        assert!(total < 181);
        assert!(runs.iter().flatten().all(|p| (0.0..=500.0).contains(&p.y)));
    }
}
