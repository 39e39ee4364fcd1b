//! Moon-phase silhouette as an explicit lit-region polygon.
//!
//! The lit part of the disk lies between the bright limb, a semicircle
//! `x = ±r·sin θ`, and the terminator, the projected half-ellipse
//! `x = ±(1 − 2f)·r·sin θ` for `y = −r·cos θ`, θ ∈ [0, π]. For f < ½ the
//! terminator bulges towards the bright limb (crescent); for f > ½ it
//! bulges away (gibbous); at f = ½ it is the vertical diameter. The
//! region's area is exactly `f·π·r²` and varies continuously with `f`.
//!
//! Waxing moons are lit on the right (east of the sky for a northern
//! observer), waning moons on the left.

use std::f64::consts::PI;

use crate::surface::{Color, DrawSurface};

/// Samples along each of the limb and terminator curves.
const CURVE_STEPS: usize = 48;

/// Illuminated region of a moon disk, in coordinates relative to its
/// centre (x right, y down).
#[derive(Debug, Clone, PartialEq)]
pub enum LitRegion {
    /// New moon: nothing lit.
    Dark,
    /// Full moon: the whole disk.
    Full,
    /// Closed polygon bounding the lit area.
    Polygon(Vec<(f64, f64)>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct MoonSilhouette {
    pub radius: f64,
    pub illuminated_fraction: f64,
    pub waxing: bool,
    pub lit: LitRegion,
}

impl MoonSilhouette {
    /// Build the silhouette for fraction `f` (clamped to [0, 1]).
    pub fn new(illuminated_fraction: f64, waxing: bool, radius: f64) -> Self {
        let f = if illuminated_fraction.is_nan() {
            0.0
        } else {
            illuminated_fraction.clamp(0.0, 1.0)
        };
        let lit = if f <= 0.0 || radius <= 0.0 {
            LitRegion::Dark
        } else if f >= 1.0 {
            LitRegion::Full
        } else {
            LitRegion::Polygon(lit_polygon(f, waxing, radius))
        };
        Self {
            radius,
            illuminated_fraction: f,
            waxing,
            lit,
        }
    }

    /// Semi-minor axis of the terminator ellipse, `r·|1 − 2f|`.
    pub fn terminator_half_width(&self) -> f64 {
        self.radius * (1.0 - 2.0 * self.illuminated_fraction).abs()
    }
}

fn lit_polygon(f: f64, waxing: bool, radius: f64) -> Vec<(f64, f64)> {
    let side = if waxing { 1.0 } else { -1.0 };
    let k = 1.0 - 2.0 * f;
    let mut points = Vec::with_capacity(2 * CURVE_STEPS + 2);

    // Bright limb, top to bottom
    for i in 0..=CURVE_STEPS {
        let theta = PI * i as f64 / CURVE_STEPS as f64;
        points.push((side * radius * theta.sin(), -radius * theta.cos()));
    }
    // Terminator, bottom to top; the poles are shared with the limb
    for i in (1..CURVE_STEPS).rev() {
        let theta = PI * i as f64 / CURVE_STEPS as f64;
        points.push((side * k * radius * theta.sin(), -radius * theta.cos()));
    }
    points
}

/// Paint the moon disk centred at `(cx, cy)`: shadow first, then the lit
/// region over it.
pub fn draw_moon_phase<S: DrawSurface + ?Sized>(
    surface: &mut S,
    cx: f64,
    cy: f64,
    silhouette: &MoonSilhouette,
    shadow: Color,
    lit: Color,
) {
    surface.fill_disk(cx, cy, silhouette.radius, shadow);
    match &silhouette.lit {
        LitRegion::Dark => {}
        LitRegion::Full => surface.fill_disk(cx, cy, silhouette.radius, lit),
        LitRegion::Polygon(points) => {
            let placed: Vec<_> = points.iter().map(|&(x, y)| (cx + x, cy + y)).collect();
            surface.fill_polygon(&placed, lit);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn area(points: &[(f64, f64)]) -> f64 {
        let n = points.len();
        let twice: f64 = (0..n)
            .map(|i| {
                let (x0, y0) = points[i];
                let (x1, y1) = points[(i + 1) % n];
                x0 * y1 - x1 * y0
            })
            .sum();
        twice.abs() / 2.0
    }

    #[test]
    fn extremes() {
        assert_eq!(MoonSilhouette::new(0.0, true, 10.0).lit, LitRegion::Dark);
        assert_eq!(MoonSilhouette::new(1.0, false, 10.0).lit, LitRegion::Full);
        assert_eq!(MoonSilhouette::new(-0.2, true, 10.0).lit, LitRegion::Dark);
        assert_eq!(MoonSilhouette::new(f64::NAN, true, 10.0).lit, LitRegion::Dark);
    }

    #[test]
    fn area_tracks_fraction() {
        let r = 10.0;
        for i in 1..20 {
            let f = f64::from(i) / 20.0;
            let s = MoonSilhouette::new(f, true, r);
            let LitRegion::Polygon(p) = &s.lit else {
                panic!("polygon expected at f = {f}");
            };
            let expected = f * PI * r * r;
            // Polygonal approximation of the curves loses < 1%
            assert!((area(p) - expected).abs() < 0.01 * PI * r * r, "f = {f}");
        }
    }

    #[test]
    fn half_is_straight_diameter() {
        let s = MoonSilhouette::new(0.5, true, 10.0);
        assert_eq!(s.terminator_half_width(), 0.0);
        let LitRegion::Polygon(p) = &s.lit else {
            panic!("polygon expected");
        };
        assert!(p.iter().all(|&(x, _)| x >= -1e-12));
    }

    #[test]
    fn continuous_through_half() {
        let below = MoonSilhouette::new(0.5 - 1e-9, true, 10.0);
        let above = MoonSilhouette::new(0.5 + 1e-9, true, 10.0);
        let (LitRegion::Polygon(a), LitRegion::Polygon(b)) = (&below.lit, &above.lit) else {
            panic!("polygons expected");
        };
        assert_eq!(a.len(), b.len());
        for (p, q) in a.iter().zip(b) {
            assert!((p.0 - q.0).abs() < 1e-6 && (p.1 - q.1).abs() < 1e-6);
        }
    }

    #[test]
    fn waxing_right_waning_left() {
        let wax = MoonSilhouette::new(0.25, true, 10.0);
        let wane = MoonSilhouette::new(0.25, false, 10.0);
        let (LitRegion::Polygon(a), LitRegion::Polygon(b)) = (&wax.lit, &wane.lit) else {
            panic!("polygons expected");
        };
        assert!(a.iter().all(|&(x, _)| x >= -1e-12));
        assert!(b.iter().all(|&(x, _)| x <= 1e-12));
    }

    #[test]
    fn gibbous_crosses_centre() {
        let s = MoonSilhouette::new(0.8, true, 10.0);
        let LitRegion::Polygon(p) = &s.lit else {
            panic!("polygon expected");
        };
        let min_x = p.iter().map(|q| q.0).fold(f64::INFINITY, f64::min);
        assert!((min_x + 6.0).abs() < 0.1, "{min_x}");
    }
}
