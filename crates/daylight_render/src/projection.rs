//! Map projections between geographic and canvas coordinates.
//!
//! Longitude maps linearly onto x for both projections, with x = 0 at
//! 180° W and x = width at 180° E. Canvas y grows downwards.
//!
//! Equirectangular covers the whole globe. Mercator diverges at the poles,
//! so its inverse is restricted to |latitude| ≤ 85°; samples outside that
//! band are reported as not projectable rather than as an error.

use std::f64::consts::{FRAC_PI_4, TAU};

use daylight_frames::{GeoPoint, wrap_longitude_deg};
use serde::{Deserialize, Serialize};

/// Supported map projections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Projection {
    Equirectangular,
    #[default]
    Mercator,
}

/// A position on the canvas in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelPoint {
    pub x: f64,
    pub y: f64,
}

impl PixelPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl Projection {
    /// Latitude limit of the Mercator inverse, degrees.
    pub const MERCATOR_MAX_LAT_DEG: f64 = 85.0;

    /// Forward Mercator clamps latitude to this so the poles stay finite.
    const MERCATOR_POLE_LAT_DEG: f64 = 90.0 - 1e-9;

    /// Project a latitude/longitude onto a `width × height` canvas.
    ///
    /// Always returns finite coordinates for finite input: Mercator pins
    /// the poles just short of ±90°, far outside the canvas rows. Callers
    /// decide visibility with [`ProjectionMapper::is_visible`].
    ///
    /// 180° E lands on x = width, the same meridian as x = 0.
    pub fn geo_to_pixel(self, lat_deg: f64, lng_deg: f64, width: f64, height: f64) -> PixelPoint {
        let x = (lng_deg + 180.0) * (width / 360.0);
        let y = match self {
            Self::Equirectangular => (90.0 - lat_deg) * (height / 180.0),
            Self::Mercator => {
                let phi = lat_deg
                    .clamp(-Self::MERCATOR_POLE_LAT_DEG, Self::MERCATOR_POLE_LAT_DEG)
                    .to_radians();
                height / 2.0 - width * (FRAC_PI_4 + phi / 2.0).tan().ln() / TAU
            }
        };
        PixelPoint::new(x, y)
    }

    /// Inverse projection of a canvas position.
    ///
    /// `None` when the position has no geographic counterpart: outside
    /// [0, height] for equirectangular, beyond ±85° for Mercator. The
    /// longitude is wrapped into (-180, 180], so x = 0 comes back as 180°
    /// and reprojects to x = width.
    pub fn pixel_to_geo(self, x: f64, y: f64, width: f64, height: f64) -> Option<GeoPoint> {
        if !x.is_finite() || !y.is_finite() {
            return None;
        }
        let lng = wrap_longitude_deg(x * (360.0 / width) - 180.0);
        let lat = match self {
            Self::Equirectangular => {
                let lat = 90.0 - y * (180.0 / height);
                if !(-90.0..=90.0).contains(&lat) {
                    return None;
                }
                lat
            }
            Self::Mercator => {
                let lat = ((height / 2.0 - y) * TAU / width).sinh().atan().to_degrees();
                if lat.abs() > Self::MERCATOR_MAX_LAT_DEG {
                    return None;
                }
                lat
            }
        };
        Some(GeoPoint::wrapped(lat, lng))
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Equirectangular => "equirectangular",
            Self::Mercator => "mercator",
        }
    }
}

/// A projection bound to a canvas size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectionMapper {
    pub projection: Projection,
    pub width: f64,
    pub height: f64,
}

impl ProjectionMapper {
    pub fn new(projection: Projection, width: u32, height: u32) -> Self {
        Self {
            projection,
            width: f64::from(width),
            height: f64::from(height),
        }
    }

    pub fn geo_to_pixel(&self, point: &GeoPoint) -> PixelPoint {
        self.projection
            .geo_to_pixel(point.latitude_deg, point.longitude_deg, self.width, self.height)
    }

    pub fn pixel_to_geo(&self, x: f64, y: f64) -> Option<GeoPoint> {
        self.projection.pixel_to_geo(x, y, self.width, self.height)
    }

    /// Whether a projected point lands on the canvas rows.
    ///
    /// Only y is checked: x is always in range for a wrapped longitude.
    pub fn is_visible(&self, p: PixelPoint) -> bool {
        p.y.is_finite() && (0.0..=self.height).contains(&p.y)
    }

    /// Project `point`, or `None` if it falls off the canvas.
    pub fn project_visible(&self, point: &GeoPoint) -> Option<PixelPoint> {
        let p = self.geo_to_pixel(point);
        self.is_visible(p).then_some(p)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const W: f64 = 1000.0;
    const H: f64 = 500.0;

    #[test]
    fn origin_maps_to_centre() {
        for proj in [Projection::Equirectangular, Projection::Mercator] {
            let p = proj.geo_to_pixel(0.0, 0.0, W, H);
            assert!((p.x - 500.0).abs() < 1e-9);
            assert!((p.y - 250.0).abs() < 1e-9, "{proj:?}: {p:?}");
        }
    }

    #[test]
    fn equirectangular_corners() {
        let p = Projection::Equirectangular.geo_to_pixel(90.0, -180.0, W, H);
        assert_eq!((p.x, p.y), (0.0, 0.0));
        let p = Projection::Equirectangular.geo_to_pixel(-90.0, 180.0, W, H);
        assert!((p.x - W).abs() < 1e-9 && (p.y - H).abs() < 1e-9, "{p:?}");
    }

    #[test]
    fn equirectangular_inverse_out_of_rows() {
        assert!(Projection::Equirectangular.pixel_to_geo(10.0, -1.0, W, H).is_none());
        assert!(Projection::Equirectangular.pixel_to_geo(10.0, H + 1.0, W, H).is_none());
        assert!(Projection::Equirectangular.pixel_to_geo(10.0, H, W, H).is_some());
    }

    #[test]
    fn mercator_north_is_up() {
        let north = Projection::Mercator.geo_to_pixel(45.0, 0.0, W, H);
        let south = Projection::Mercator.geo_to_pixel(-45.0, 0.0, W, H);
        assert!(north.y < 250.0 && south.y > 250.0);
        assert!((north.y + south.y - 500.0).abs() < 1e-9);
    }

    #[test]
    fn mercator_inverse_rejects_polar_rows() {
        // A tall canvas reaches past 85°
        let tall = 2000.0;
        let top = Projection::Mercator.pixel_to_geo(0.0, 0.0, W, tall);
        assert!(top.is_none());
        let centre = Projection::Mercator.pixel_to_geo(0.0, tall / 2.0, W, tall);
        assert!(centre.is_some());
    }

    #[test]
    fn left_edge_wraps_to_antimeridian() {
        let g = Projection::Equirectangular.pixel_to_geo(0.0, 250.0, W, H);
        assert_eq!(g.map(|g| g.longitude_deg), Some(180.0));
    }

    #[test]
    fn mapper_visibility() {
        let m = ProjectionMapper::new(Projection::Mercator, 1000, 500);
        assert!(m.project_visible(&GeoPoint::wrapped(30.0, 10.0)).is_some());
        // ±66.5° is the edge of a 2:1 Mercator canvas
        assert!(m.project_visible(&GeoPoint::wrapped(80.0, 10.0)).is_none());
        assert!(m.pixel_to_geo(f64::NAN, 1.0).is_none());
    }

    #[test]
    fn serde_names() {
        assert_eq!(Projection::default(), Projection::Mercator);
        assert_eq!(Projection::Equirectangular.name(), "equirectangular");
    }
}
