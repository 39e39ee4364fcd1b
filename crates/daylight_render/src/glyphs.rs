//! Sun and moon map markers.

use std::f64::consts::TAU;

use crate::projection::PixelPoint;
use crate::silhouette::{MoonSilhouette, draw_moon_phase};
use crate::surface::{Color, DrawSurface};
use crate::twilight::ShadingProfile;

const SUN_GOLD: Color = [255, 215, 0, 255];
const SUN_GLOW_INNER: Color = [255, 215, 0, 204];
const SUN_GLOW_OUTER: Color = [255, 215, 0, 0];
const SUN_GLOW_RADIUS: f64 = 30.0;
const SUN_CORE_RADIUS: f64 = 10.0;

const MONO_SUN_RADIUS: f64 = 12.0;
const MONO_SUN_BORDER: f64 = 2.0;
const MONO_RAY_INNER: f64 = 15.0;
const MONO_RAY_OUTER: f64 = 20.0;
const MONO_RAY_COUNT: usize = 8;

const MOON_GLOW_INNER: Color = [220, 220, 220, 204];
const MOON_GLOW_OUTER: Color = [220, 220, 220, 0];
const MOON_GLOW_RADIUS: f64 = 25.0;

const BLACK: Color = [0, 0, 0, 255];
const WHITE: Color = [255, 255, 255, 255];

/// Segments used to stroke circle outlines.
const OUTLINE_SEGMENTS: usize = 64;

/// Draw the Sun marker at `at`.
///
/// Colour: a golden glow fading out to radius 30 around a solid core of
/// radius 10. Grayscale: a white disk with a black rim and eight rays.
pub fn draw_sun_glyph<S: DrawSurface + ?Sized>(
    surface: &mut S,
    at: PixelPoint,
    profile: &ShadingProfile,
) {
    if profile.is_grayscale() {
        surface.fill_disk(at.x, at.y, MONO_SUN_RADIUS, WHITE);
        let outline: Vec<_> = (0..=OUTLINE_SEGMENTS)
            .map(|i| {
                let a = TAU * i as f64 / OUTLINE_SEGMENTS as f64;
                (at.x + MONO_SUN_RADIUS * a.cos(), at.y + MONO_SUN_RADIUS * a.sin())
            })
            .collect();
        surface.stroke_polyline(&outline, MONO_SUN_BORDER, BLACK);
        for i in 0..MONO_RAY_COUNT {
            let a = TAU * i as f64 / MONO_RAY_COUNT as f64;
            let (s, c) = a.sin_cos();
            surface.stroke_polyline(
                &[
                    (at.x + MONO_RAY_INNER * c, at.y + MONO_RAY_INNER * s),
                    (at.x + MONO_RAY_OUTER * c, at.y + MONO_RAY_OUTER * s),
                ],
                1.0,
                BLACK,
            );
        }
    } else {
        surface.fill_radial_gradient(at.x, at.y, SUN_GLOW_RADIUS, SUN_GLOW_INNER, SUN_GLOW_OUTER);
        surface.fill_disk(at.x, at.y, SUN_CORE_RADIUS, SUN_GOLD);
    }
}

/// Shadow and lit colours of the moon disk for a profile.
pub fn moon_colors(profile: &ShadingProfile) -> (Color, Color) {
    if profile.is_grayscale() {
        (BLACK, WHITE)
    } else {
        ([0x60, 0x60, 0x60, 255], [0xF0, 0xF0, 0xF0, 255])
    }
}

/// Draw the Moon marker at `at`: a soft glow, then the phase silhouette.
pub fn draw_moon_glyph<S: DrawSurface + ?Sized>(
    surface: &mut S,
    at: PixelPoint,
    silhouette: &MoonSilhouette,
    profile: &ShadingProfile,
) {
    surface.fill_radial_gradient(at.x, at.y, MOON_GLOW_RADIUS, MOON_GLOW_INNER, MOON_GLOW_OUTER);
    let (shadow, lit) = moon_colors(profile);
    draw_moon_phase(surface, at.x, at.y, silhouette, shadow, lit);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::PixelSurface;

    const SEA: Color = [10, 40, 90, 255];

    #[test]
    fn color_sun_core_is_gold() {
        let mut s = PixelSurface::new(80, 80, SEA);
        draw_sun_glyph(&mut s, PixelPoint::new(40.0, 40.0), &ShadingProfile::color());
        assert_eq!(s.pixel(40, 40), Some(SUN_GOLD));
        // Inside the glow, outside the core: tinted but not gold
        let glow = s.pixel(40, 60).unwrap_or(SEA);
        assert_ne!(glow, SEA);
        assert_ne!(glow, SUN_GOLD);
        assert_eq!(s.pixel(0, 0), Some(SEA));
    }

    #[test]
    fn grayscale_sun_has_rim_and_rays() {
        let mut s = PixelSurface::new(60, 60, SEA);
        draw_sun_glyph(&mut s, PixelPoint::new(30.0, 30.0), &ShadingProfile::grayscale());
        assert_eq!(s.pixel(30, 30), Some(WHITE));
        // Rim at radius 12 on the +x axis
        assert_eq!(s.pixel(41, 29), Some(BLACK));
        // Ray along +x between 15 and 20
        assert_eq!(s.pixel(47, 29), Some(BLACK));
    }

    #[test]
    fn moon_disk_centre_uses_profile_colours() {
        let full = MoonSilhouette::new(1.0, true, 10.0);
        let mut s = PixelSurface::new(60, 60, SEA);
        draw_moon_glyph(&mut s, PixelPoint::new(30.0, 30.0), &full, &ShadingProfile::grayscale());
        assert_eq!(s.pixel(30, 30), Some(WHITE));

        let new = MoonSilhouette::new(0.0, true, 10.0);
        let mut s = PixelSurface::new(60, 60, SEA);
        draw_moon_glyph(&mut s, PixelPoint::new(30.0, 30.0), &new, &ShadingProfile::color());
        assert_eq!(s.pixel(30, 30), Some([0x60, 0x60, 0x60, 255]));
    }
}
