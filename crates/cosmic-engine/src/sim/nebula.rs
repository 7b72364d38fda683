//! Static nebula backdrop: soft radial color fields behind everything
//! else. Nothing here evolves frame to frame; the layout is recomputed
//! only when the surface is resized.

use glam::Vec2;

use crate::render::color::Rgba;
use crate::render::surface::Surface;

const NEBULA_ALPHA: f32 = 0.3;

/// Relative placements and color pairs of the three nebula fields.
const LAYOUT: [(f32, f32, f32, u32, u32); 3] = [
    (0.3, 0.3, 1000.0, 0x6441a5, 0x2a0845),
    (0.7, 0.6, 1200.0, 0x7b2ff7, 0x4a157c),
    (0.5, 0.4, 1400.0, 0x8e2de2, 0x4a00e0),
];

struct Nebula {
    center: Vec2,
    radius: f32,
    inner: Rgba,
    outer: Rgba,
}

pub struct NebulaLayer {
    nebulas: Vec<Nebula>,
}

impl NebulaLayer {
    pub fn new() -> Self {
        NebulaLayer { nebulas: Vec::new() }
    }

    /// Recompute gradient placements for new surface dimensions.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.nebulas.clear();
        for (fx, fy, radius, inner, outer) in LAYOUT {
            self.nebulas.push(Nebula {
                center: Vec2::new(width * fx, height * fy),
                radius,
                inner: Rgba::hex(inner).with_alpha(NEBULA_ALPHA),
                outer: Rgba::hex(outer).with_alpha(NEBULA_ALPHA * 0.7),
            });
        }
    }

    pub fn draw(&self, surface: &mut Surface) {
        for n in &self.nebulas {
            surface.fill_radial(n.center, n.radius, n.inner, n.outer);
        }
    }

    pub fn len(&self) -> usize {
        self.nebulas.len()
    }
}

impl Default for NebulaLayer {
    fn default() -> Self {
        Self::new()
    }
}
