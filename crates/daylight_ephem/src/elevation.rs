//! Solar elevation of a ground point.

use daylight_frames::GeoPoint;

/// Elevation of the Sun above the horizon at `point`, in degrees [-90, 90].
///
/// The elevation is 90° minus the great-circle distance to the sub-solar
/// point. The distance is taken as `atan2(|u × v|, u · v)` of the two unit
/// vectors, which stays exact at both the sub-solar and anti-solar points
/// where `asin` of the spherical-cosine sine loses half its digits.
pub fn solar_elevation_deg(point: &GeoPoint, sun: &GeoPoint) -> f64 {
    elevation_deg(
        point.latitude_deg,
        point.longitude_deg,
        sun.latitude_deg,
        sun.longitude_deg,
    )
}

/// Raw-coordinate form of [`solar_elevation_deg`] for per-pixel callers.
#[inline]
pub fn elevation_deg(lat_deg: f64, lng_deg: f64, sun_lat_deg: f64, sun_lng_deg: f64) -> f64 {
    let (sin_lat, cos_lat) = lat_deg.to_radians().sin_cos();
    let (sin_dec, cos_dec) = sun_lat_deg.to_radians().sin_cos();
    let (sin_ha, cos_ha) = (lng_deg - sun_lng_deg).to_radians().sin_cos();

    // Ground point rotated so the Sun sits on the prime meridian.
    let (ux, uy, uz) = (cos_lat * cos_ha, cos_lat * sin_ha, sin_lat);
    let (vx, vz) = (cos_dec, sin_dec);

    let cx = uy * vz;
    let cy = uz * vx - ux * vz;
    let cz = -uy * vx;
    let cross = (cx * cx + cy * cy + cz * cz).sqrt();
    let dot = ux * vx + uz * vz;

    (90.0 - cross.atan2(dot).to_degrees()).clamp(-90.0, 90.0)
}
