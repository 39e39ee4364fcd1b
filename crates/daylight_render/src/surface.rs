//! Host drawing surface.
//!
//! The renderer talks to its output through [`DrawSurface`]: one bulk
//! composite of the shading overlay plus a handful of vector primitives
//! for glyphs. [`PixelSurface`] implements it on an `image::RgbaImage`
//! with source-over blending, sampling each primitive at pixel centres.

use image::{Rgba, RgbaImage};

/// An RGBA colour, straight (non-premultiplied) alpha.
pub type Color = [u8; 4];

/// Sink for a rendered frame.
pub trait DrawSurface {
    fn width(&self) -> u32;
    fn height(&self) -> u32;
    /// Reset to the background.
    fn clear(&mut self);
    /// Blend a full-canvas overlay in one pass.
    fn composite(&mut self, overlay: &RgbaImage);
    /// Fill a closed polygon (even-odd rule).
    fn fill_polygon(&mut self, points: &[(f64, f64)], color: Color);
    fn fill_disk(&mut self, cx: f64, cy: f64, radius: f64, color: Color);
    /// Disk whose colour runs linearly from `inner` at the centre to
    /// `outer` at the rim.
    fn fill_radial_gradient(&mut self, cx: f64, cy: f64, radius: f64, inner: Color, outer: Color);
    /// Open polyline of the given stroke width.
    fn stroke_polyline(&mut self, points: &[(f64, f64)], width: f64, color: Color);
}

/// In-memory raster surface.
#[derive(Debug, Clone)]
pub struct PixelSurface {
    image: RgbaImage,
    background: Background,
}

#[derive(Debug, Clone)]
enum Background {
    Solid(Color),
    Image(RgbaImage),
}

impl PixelSurface {
    /// Surface cleared to a solid colour.
    pub fn new(width: u32, height: u32, background: Color) -> Self {
        Self {
            image: RgbaImage::from_pixel(width, height, Rgba(background)),
            background: Background::Solid(background),
        }
    }

    /// Surface whose background is a base map; `clear` restores it.
    pub fn with_base_map(base: RgbaImage) -> Self {
        Self {
            image: base.clone(),
            background: Background::Image(base),
        }
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn into_image(self) -> RgbaImage {
        self.image
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        (x < self.image.width() && y < self.image.height()).then(|| self.image.get_pixel(x, y).0)
    }

    /// Pixel index range `[lo, hi)` whose centres may fall in `[min, max]`.
    fn span(min: f64, max: f64, limit: u32) -> (u32, u32) {
        let lo = (min - 0.5).floor().max(0.0);
        let hi = (max + 0.5).ceil().min(f64::from(limit));
        if lo.is_nan() || hi.is_nan() || lo >= hi {
            return (0, 0);
        }
        (lo as u32, hi as u32)
    }

    fn blend(&mut self, x: u32, y: u32, src: Color) {
        let dst = self.image.get_pixel_mut(x, y);
        dst.0 = source_over(src, dst.0);
    }

    /// Blend `color` into every pixel whose centre satisfies `inside`,
    /// restricted to a bounding box. Each pixel is touched at most once.
    fn fill_where<F>(&mut self, bbox: (f64, f64, f64, f64), color: Color, inside: F)
    where
        F: Fn(f64, f64) -> bool,
    {
        let (x0, x1) = Self::span(bbox.0, bbox.2, self.image.width());
        let (y0, y1) = Self::span(bbox.1, bbox.3, self.image.height());
        for y in y0..y1 {
            let py = f64::from(y) + 0.5;
            for x in x0..x1 {
                if inside(f64::from(x) + 0.5, py) {
                    self.blend(x, y, color);
                }
            }
        }
    }
}

impl DrawSurface for PixelSurface {
    fn width(&self) -> u32 {
        self.image.width()
    }

    fn height(&self) -> u32 {
        self.image.height()
    }

    fn clear(&mut self) {
        match &self.background {
            Background::Solid(c) => {
                for p in self.image.pixels_mut() {
                    p.0 = *c;
                }
            }
            Background::Image(base) => self.image.clone_from(base),
        }
    }

    fn composite(&mut self, overlay: &RgbaImage) {
        let w = self.image.width().min(overlay.width());
        let h = self.image.height().min(overlay.height());
        for y in 0..h {
            for x in 0..w {
                let src = overlay.get_pixel(x, y).0;
                if src[3] > 0 {
                    self.blend(x, y, src);
                }
            }
        }
    }

    fn fill_polygon(&mut self, points: &[(f64, f64)], color: Color) {
        if points.len() < 3 {
            return;
        }
        let (min_y, max_y) = points
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| (lo.min(p.1), hi.max(p.1)));
        let (y0, y1) = Self::span(min_y, max_y, self.image.height());
        let width = self.image.width();
        let mut crossings = Vec::new();

        for y in y0..y1 {
            let py = f64::from(y) + 0.5;
            crossings.clear();
            for i in 0..points.len() {
                let (ax, ay) = points[i];
                let (bx, by) = points[(i + 1) % points.len()];
                // Half-open rule so shared vertices count once
                if (ay <= py) != (by <= py) {
                    crossings.push(ax + (py - ay) / (by - ay) * (bx - ax));
                }
            }
            crossings.sort_by(f64::total_cmp);
            for pair in crossings.chunks_exact(2) {
                // Pixel centres x + 0.5 in [pair[0], pair[1])
                let start = (pair[0] - 0.5).ceil().max(0.0);
                let end = (pair[1] - 0.5).ceil().min(f64::from(width));
                let mut x = start;
                while x < end {
                    self.blend(x as u32, y, color);
                    x += 1.0;
                }
            }
        }
    }

    fn fill_disk(&mut self, cx: f64, cy: f64, radius: f64, color: Color) {
        let r2 = radius * radius;
        self.fill_where(
            (cx - radius, cy - radius, cx + radius, cy + radius),
            color,
            |x, y| (x - cx).powi(2) + (y - cy).powi(2) <= r2,
        );
    }

    fn fill_radial_gradient(&mut self, cx: f64, cy: f64, radius: f64, inner: Color, outer: Color) {
        if radius <= 0.0 {
            return;
        }
        let (x0, x1) = Self::span(cx - radius, cx + radius, self.image.width());
        let (y0, y1) = Self::span(cy - radius, cy + radius, self.image.height());
        for y in y0..y1 {
            let py = f64::from(y) + 0.5;
            for x in x0..x1 {
                let d = ((f64::from(x) + 0.5 - cx).powi(2) + (py - cy).powi(2)).sqrt();
                if d <= radius {
                    self.blend(x, y, lerp_color(inner, outer, d / radius));
                }
            }
        }
    }

    fn stroke_polyline(&mut self, points: &[(f64, f64)], width: f64, color: Color) {
        if points.len() < 2 || width <= 0.0 {
            return;
        }
        let half = width / 2.0;
        let (img_w, img_h) = (self.image.width(), self.image.height());

        // Mark coverage segment by segment, each within its own bounding
        // box, then blend every covered pixel once.
        let mut covered = vec![false; img_w as usize * img_h as usize];
        for seg in points.windows(2) {
            let (a, b) = (seg[0], seg[1]);
            let (x0, x1) = Self::span(a.0.min(b.0) - half, a.0.max(b.0) + half, img_w);
            let (y0, y1) = Self::span(a.1.min(b.1) - half, a.1.max(b.1) + half, img_h);
            for y in y0..y1 {
                let py = f64::from(y) + 0.5;
                let row = y as usize * img_w as usize;
                for x in x0..x1 {
                    let cell = &mut covered[row + x as usize];
                    if !*cell && distance_to_segment((f64::from(x) + 0.5, py), a, b) <= half {
                        *cell = true;
                    }
                }
            }
        }

        for (i, _) in covered.iter().enumerate().filter(|(_, c)| **c) {
            let i = i as u32;
            self.blend(i % img_w, i / img_w, color);
        }
    }
}

/// Porter–Duff source-over on straight-alpha RGBA8.
pub fn source_over(src: Color, dst: Color) -> Color {
    let sa = f64::from(src[3]) / 255.0;
    if sa <= 0.0 {
        return dst;
    }
    let da = f64::from(dst[3]) / 255.0;
    let out_a = sa + da * (1.0 - sa);
    if out_a <= 0.0 {
        return [0, 0, 0, 0];
    }
    let mut out = [0u8; 4];
    for c in 0..3 {
        let v = (f64::from(src[c]) * sa + f64::from(dst[c]) * da * (1.0 - sa)) / out_a;
        out[c] = v.round().clamp(0.0, 255.0) as u8;
    }
    out[3] = (out_a * 255.0).round().clamp(0.0, 255.0) as u8;
    out
}

fn lerp_color(a: Color, b: Color, t: f64) -> Color {
    let t = t.clamp(0.0, 1.0);
    let mut out = [0u8; 4];
    for i in 0..4 {
        let v = f64::from(a[i]) + (f64::from(b[i]) - f64::from(a[i])) * t;
        out[i] = v.round().clamp(0.0, 255.0) as u8;
    }
    out
}

fn distance_to_segment(p: (f64, f64), a: (f64, f64), b: (f64, f64)) -> f64 {
    let (dx, dy) = (b.0 - a.0, b.1 - a.1);
    let len2 = dx * dx + dy * dy;
    let t = if len2 > 0.0 {
        (((p.0 - a.0) * dx + (p.1 - a.1) * dy) / len2).clamp(0.0, 1.0)
    } else {
        0.0
    };
    let (qx, qy) = (a.0 + t * dx, a.1 + t * dy);
    ((p.0 - qx).powi(2) + (p.1 - qy).powi(2)).sqrt()
}
