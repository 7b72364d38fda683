//! Software raster target.
//!
//! Every simulation paints into a `Surface`: an owned, non-premultiplied
//! RGBA8 buffer with source-over blending. The host reads the bytes out
//! once per frame and blits them into a canvas, the same way the host
//! reads the flat vertex buffers in a GPU-backed build.
//!
//! All painting clips to the surface bounds, and every operation is a
//! no-op on a zero-area surface, so a half-torn-down view never faults.

use glam::Vec2;

use super::color::Rgba;

pub struct Surface {
    width: u32,
    height: u32,
    pixels: Vec<Rgba>,
}

impl Surface {
    pub fn new(width: u32, height: u32) -> Self {
        Surface {
            width,
            height,
            pixels: vec![Rgba::TRANSPARENT; (width * height) as usize],
        }
    }

    /// Reallocate for new dimensions. Existing content is discarded;
    /// callers regenerate their populations in the same resize pass.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.pixels.clear();
        self.pixels.resize((width * height) as usize, Rgba::TRANSPARENT);
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// A surface with no drawable area (before first resize, or a
    /// collapsed window). Painting on it is skipped entirely.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn clear(&mut self) {
        self.pixels.fill(Rgba::TRANSPARENT);
    }

    /// Raw RGBA bytes, row-major, for the host blit.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    pub fn pixel(&self, x: u32, y: u32) -> Rgba {
        self.pixels[(y * self.width + x) as usize]
    }

    // ── Blending ─────────────────────────────────────────────────────

    fn blend(&mut self, x: i32, y: i32, color: Rgba, coverage: f32) {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return;
        }
        let sa = color.alpha_f32() * coverage.clamp(0.0, 1.0);
        if sa <= 0.0 {
            return;
        }
        let idx = (y as u32 * self.width + x as u32) as usize;
        let dst = self.pixels[idx];
        let da = dst.alpha_f32();
        let out_a = sa + da * (1.0 - sa);
        if out_a <= 0.0 {
            self.pixels[idx] = Rgba::TRANSPARENT;
            return;
        }
        let mix = |s: u8, d: u8| {
            let s = s as f32;
            let d = d as f32;
            (((s * sa) + d * da * (1.0 - sa)) / out_a) as u8
        };
        self.pixels[idx] = Rgba {
            r: mix(color.r, dst.r),
            g: mix(color.g, dst.g),
            b: mix(color.b, dst.b),
            a: (out_a * 255.0) as u8,
        };
    }

    /// Source-over fill of the whole surface. With a low-alpha color this
    /// is the per-tick motion-trail fade pass.
    pub fn fill(&mut self, color: Rgba) {
        for y in 0..self.height as i32 {
            for x in 0..self.width as i32 {
                self.blend(x, y, color, 1.0);
            }
        }
    }

    /// Source-over blend of an equally-sized surface onto this one.
    /// Mismatched dimensions (mid-resize) skip the blit.
    pub fn composite(&mut self, src: &Surface) {
        if src.width != self.width || src.height != self.height {
            return;
        }
        for y in 0..self.height as i32 {
            for x in 0..self.width as i32 {
                let c = src.pixels[(y as u32 * src.width + x as u32) as usize];
                if c.a > 0 {
                    self.blend(x, y, c, 1.0);
                }
            }
        }
    }

    // ── Shapes ───────────────────────────────────────────────────────

    fn bbox(&self, min: Vec2, max: Vec2) -> Option<(i32, i32, i32, i32)> {
        if self.is_empty() {
            return None;
        }
        let x0 = (min.x.floor() as i32).max(0);
        let y0 = (min.y.floor() as i32).max(0);
        let x1 = (max.x.ceil() as i32).min(self.width as i32 - 1);
        let y1 = (max.y.ceil() as i32).min(self.height as i32 - 1);
        if x0 > x1 || y0 > y1 {
            return None;
        }
        Some((x0, y0, x1, y1))
    }

    /// Anti-aliased filled disc.
    pub fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba) {
        if radius <= 0.0 {
            return;
        }
        let r = Vec2::splat(radius);
        let Some((x0, y0, x1, y1)) = self.bbox(center - r, center + r) else {
            return;
        };
        for y in y0..=y1 {
            for x in x0..=x1 {
                let d = Vec2::new(x as f32 + 0.5, y as f32 + 0.5).distance(center);
                let coverage = (radius - d + 0.5).clamp(0.0, 1.0);
                if coverage > 0.0 {
                    self.blend(x, y, color, coverage);
                }
            }
        }
    }

    /// Three-stop radial gradient: `inner` at the center, `mid` at the
    /// half radius, transparent at the edge. The glow/nebula primitive.
    pub fn fill_radial(&mut self, center: Vec2, radius: f32, inner: Rgba, mid: Rgba) {
        if radius <= 0.0 {
            return;
        }
        let r = Vec2::splat(radius);
        let Some((x0, y0, x1, y1)) = self.bbox(center - r, center + r) else {
            return;
        };
        let edge = mid.with_alpha(0.0);
        for y in y0..=y1 {
            for x in x0..=x1 {
                let d = Vec2::new(x as f32 + 0.5, y as f32 + 0.5).distance(center);
                let t = d / radius;
                if t >= 1.0 {
                    continue;
                }
                let color = if t < 0.5 {
                    Rgba::lerp(inner, mid, t * 2.0)
                } else {
                    Rgba::lerp(mid, edge, (t - 0.5) * 2.0)
                };
                self.blend(x, y, color, 1.0);
            }
        }
    }

    /// Round-capped stroked segment (a capsule of the given width).
    pub fn stroke_segment(&mut self, a: Vec2, b: Vec2, width: f32, color: Rgba) {
        self.stroke_segment_gradient(a, b, width, color, color);
    }

    /// Capsule stroke whose color interpolates `from` at `a` to `to` at
    /// `b` along the segment axis. Comet tails and body trails use this.
    pub fn stroke_segment_gradient(
        &mut self,
        a: Vec2,
        b: Vec2,
        width: f32,
        from: Rgba,
        to: Rgba,
    ) {
        let half = (width / 2.0).max(0.0);
        if half <= 0.0 {
            return;
        }
        let pad = Vec2::splat(half + 1.0);
        let Some((x0, y0, x1, y1)) = self.bbox(a.min(b) - pad, a.max(b) + pad) else {
            return;
        };
        let ab = b - a;
        let len_sq = ab.length_squared();
        for y in y0..=y1 {
            for x in x0..=x1 {
                let p = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
                let t = if len_sq > 0.0 {
                    ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0)
                } else {
                    0.0
                };
                let d = p.distance(a + ab * t);
                let coverage = (half - d + 0.5).clamp(0.0, 1.0);
                if coverage > 0.0 {
                    self.blend(x, y, Rgba::lerp(from, to, t), coverage);
                }
            }
        }
    }

    /// Stroked circle outline; the expanding shockwave ring.
    pub fn stroke_ring(&mut self, center: Vec2, radius: f32, width: f32, color: Rgba) {
        if radius <= 0.0 || width <= 0.0 {
            return;
        }
        let half = width / 2.0;
        let r = Vec2::splat(radius + half + 1.0);
        let Some((x0, y0, x1, y1)) = self.bbox(center - r, center + r) else {
            return;
        };
        for y in y0..=y1 {
            for x in x0..=x1 {
                let d = Vec2::new(x as f32 + 0.5, y as f32 + 0.5).distance(center);
                let coverage = (half - (d - radius).abs() + 0.5).clamp(0.0, 1.0);
                if coverage > 0.0 {
                    self.blend(x, y, color, coverage);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_area_surface_paints_nothing() {
        let mut s = Surface::new(0, 0);
        assert!(s.is_empty());
        s.fill(Rgba::hex(0xffffff));
        s.fill_circle(Vec2::new(1.0, 1.0), 5.0, Rgba::hex(0xffffff));
        assert!(s.as_bytes().is_empty());
    }

    #[test]
    fn fill_circle_hits_center_not_corner() {
        let mut s = Surface::new(20, 20);
        s.fill_circle(Vec2::new(10.0, 10.0), 4.0, Rgba::hex(0xff0000));
        assert!(s.pixel(10, 10).a > 0);
        assert_eq!(s.pixel(0, 0).a, 0);
    }

    #[test]
    fn opaque_over_opaque_replaces() {
        let mut s = Surface::new(4, 4);
        s.fill(Rgba::hex(0x000000));
        s.fill(Rgba::hex(0xffffff));
        let p = s.pixel(2, 2);
        assert_eq!((p.r, p.g, p.b, p.a), (255, 255, 255, 255));
    }

    #[test]
    fn low_alpha_fill_dims_gradually() {
        let mut s = Surface::new(2, 2);
        s.fill(Rgba::hex(0xffffff));
        s.fill(Rgba::hex(0x000000).with_alpha(0.15));
        let p = s.pixel(0, 0);
        assert!(p.r < 255 && p.r > 180, "one fade pass dims slightly: {}", p.r);
    }

    #[test]
    fn radial_fades_to_transparent_at_edge() {
        let mut s = Surface::new(40, 40);
        let c = Rgba::hex(0x8e2de2).with_alpha(0.3);
        s.fill_radial(Vec2::new(20.0, 20.0), 15.0, c, c.fade(0.7));
        assert!(s.pixel(20, 20).a > 0);
        // Just inside the edge is much fainter than the center.
        assert!(s.pixel(20, 34).a < s.pixel(20, 20).a);
        // Outside the radius is untouched.
        assert_eq!(s.pixel(1, 1).a, 0);
    }

    #[test]
    fn segment_covers_its_span() {
        let mut s = Surface::new(30, 10);
        s.stroke_segment(
            Vec2::new(3.0, 5.0),
            Vec2::new(26.0, 5.0),
            3.0,
            Rgba::hex(0x00a8ff),
        );
        assert!(s.pixel(15, 5).a > 0);
        assert_eq!(s.pixel(15, 0).a, 0);
    }

    #[test]
    fn gradient_segment_fades_toward_tail() {
        let mut s = Surface::new(40, 10);
        let head = Rgba::hex(0xffffff);
        s.stroke_segment_gradient(
            Vec2::new(2.0, 5.0),
            Vec2::new(37.0, 5.0),
            2.0,
            head,
            head.with_alpha(0.0),
        );
        assert!(s.pixel(4, 5).a > s.pixel(34, 5).a);
    }

    #[test]
    fn ring_leaves_interior_empty() {
        let mut s = Surface::new(40, 40);
        s.stroke_ring(Vec2::new(20.0, 20.0), 12.0, 2.0, Rgba::hex(0xffffff));
        assert_eq!(s.pixel(20, 20).a, 0);
        assert!(s.pixel(20, 8).a > 0);
    }

    #[test]
    fn composite_blends_matching_surfaces_only() {
        let mut dst = Surface::new(8, 8);
        let mut src = Surface::new(8, 8);
        src.fill_circle(Vec2::new(4.0, 4.0), 2.0, Rgba::hex(0x00a8ff));
        dst.composite(&src);
        assert!(dst.pixel(4, 4).a > 0);

        let other = Surface::new(4, 4);
        let before = dst.pixel(4, 4);
        dst.composite(&other); // size mismatch, skipped
        assert_eq!(dst.pixel(4, 4), before);
    }

    #[test]
    fn resize_discards_content() {
        let mut s = Surface::new(8, 8);
        s.fill(Rgba::hex(0xffffff));
        s.resize(16, 16);
        assert_eq!(s.pixel(4, 4).a, 0);
        assert_eq!(s.as_bytes().len(), 16 * 16 * 4);
    }
}
