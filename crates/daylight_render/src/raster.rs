//! Twilight overlay rasterizer.
//!
//! Samples the canvas every `stride` pixels, inverse-projects the sample,
//! shades it from the Sun's elevation there and fills the whole
//! `stride × stride` block. The result is a fresh transparent buffer that
//! the caller composites onto its surface in one pass.

use daylight_ephem::elevation_deg;
use daylight_frames::GeoPoint;
use image::{Rgba, RgbaImage};

use crate::projection::ProjectionMapper;
use crate::twilight::ShadingTable;

/// Paint the night-side overlay for a Sun at `sun`.
///
/// Samples with no geographic counterpart (Mercator beyond ±85°) are
/// left transparent. A `stride` of 0 is treated as 1.
pub fn rasterize_twilight(
    mapper: &ProjectionMapper,
    sun: &GeoPoint,
    table: &ShadingTable,
    stride: u32,
) -> RgbaImage {
    let width = mapper.width as u32;
    let height = mapper.height as u32;
    let stride = stride.max(1);
    let mut buffer = RgbaImage::new(width, height);

    for y in (0..height).step_by(stride as usize) {
        let y_end = y.saturating_add(stride).min(height);
        for x in (0..width).step_by(stride as usize) {
            let Some(point) = mapper.pixel_to_geo(f64::from(x), f64::from(y)) else {
                continue;
            };
            let elevation = elevation_deg(
                point.latitude_deg,
                point.longitude_deg,
                sun.latitude_deg,
                sun.longitude_deg,
            );
            let sample = table.shade(elevation);
            if sample.alpha_byte() == 0 {
                continue;
            }
            let pixel = Rgba(sample.rgba());
            let x_end = x.saturating_add(stride).min(width);
            for by in y..y_end {
                for bx in x..x_end {
                    buffer.put_pixel(bx, by, pixel);
                }
            }
        }
    }

    buffer
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projection::Projection;

    fn mapper(p: Projection) -> ProjectionMapper {
        ProjectionMapper::new(p, 360, 180)
    }

    #[test]
    fn subsolar_pixel_is_clear_antipode_dark() {
        let m = mapper(Projection::Equirectangular);
        let sun = GeoPoint::wrapped(0.0, 0.0);
        let img = rasterize_twilight(&m, &sun, &ShadingTable::color(), 2);
        // (lat 0, lng 0) is x = 180, y = 90
        assert_eq!(img.get_pixel(180, 90).0[3], 0);
        // (lat 0, lng ±180) is x = 0 / 359
        assert_eq!(img.get_pixel(0, 90).0, [0, 0, 30, 153]);
        assert_eq!(img.get_pixel(359, 90).0, [0, 0, 30, 153]);
    }

    #[test]
    fn blocks_are_uniform() {
        let m = mapper(Projection::Equirectangular);
        let sun = GeoPoint::wrapped(10.0, 45.0);
        let img = rasterize_twilight(&m, &sun, &ShadingTable::color(), 4);
        for by in (0..180).step_by(4) {
            for bx in (0..360).step_by(4) {
                let top_left = img.get_pixel(bx, by).0;
                for dy in 0..4 {
                    for dx in 0..4 {
                        assert_eq!(img.get_pixel(bx + dx, by + dy).0, top_left);
                    }
                }
            }
        }
    }

    #[test]
    fn stride_not_dividing_canvas_clips() {
        let m = ProjectionMapper::new(Projection::Equirectangular, 101, 51);
        let sun = GeoPoint::wrapped(0.0, 0.0);
        let img = rasterize_twilight(&m, &sun, &ShadingTable::grayscale(), 3);
        assert_eq!(img.dimensions(), (101, 51));
        // Last column belongs to the block sampled at x = 99 (lng ≈ 173°)
        assert_eq!(img.get_pixel(100, 25).0, img.get_pixel(99, 24).0);
    }

    #[test]
    fn zero_stride_behaves_as_one() {
        let m = mapper(Projection::Equirectangular);
        let sun = GeoPoint::wrapped(0.0, 0.0);
        let a = rasterize_twilight(&m, &sun, &ShadingTable::grayscale(), 0);
        let b = rasterize_twilight(&m, &sun, &ShadingTable::grayscale(), 1);
        assert_eq!(a, b);
    }

    #[test]
    fn mercator_skips_polar_rows() {
        // 1:1 canvas reaches ±85° well before the top edge
        let m = ProjectionMapper::new(Projection::Mercator, 200, 400);
        let sun = GeoPoint::wrapped(-23.0, 0.0);
        let img = rasterize_twilight(&m, &sun, &ShadingTable::color(), 1);
        // Northern winter: the north polar cap is night, but beyond 85° is skipped
        assert_eq!(img.get_pixel(100, 0).0[3], 0);
        let row = Projection::Mercator.geo_to_pixel(80.0, 0.0, 200.0, 400.0).y as u32;
        assert!(img.get_pixel(100, row).0[3] > 0);
    }
}
