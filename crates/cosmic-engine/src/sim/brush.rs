//! Freehand brush: turns pointer input into persistent stroke pixels
//! plus short-lived sparkle particles along the path.
//!
//! Strokes land on the caller's artwork surface and survive frame
//! clears; the particles go into a separate bounded field that the
//! drawing scene composites on top each frame.

use glam::Vec2;

use crate::api::config::BrushConfig;
use crate::effects::field::{ParticleField, SpawnParams};
use crate::effects::particle::ParticleKind;
use crate::effects::rng::Rng;
use crate::render::surface::Surface;

/// Sparkles emitted per movement segment: half the brush size, capped.
const MAX_SPARKLES: u32 = 5;

pub struct BrushEngine {
    config: BrushConfig,
    /// Device pixel ratio; pointer input arrives in CSS pixels.
    dpr: f32,
    /// Last stroke point in device pixels, present while drawing.
    last: Option<Vec2>,
    cursor: Vec2,
}

impl BrushEngine {
    pub fn new(config: BrushConfig) -> Self {
        BrushEngine {
            config,
            dpr: 1.0,
            last: None,
            cursor: Vec2::ZERO,
        }
    }

    pub fn set_config(&mut self, config: BrushConfig) {
        self.config = config;
    }

    pub fn config(&self) -> &BrushConfig {
        &self.config
    }

    pub fn set_dpr(&mut self, dpr: f32) {
        // Guard against a zero or negative ratio from the host.
        self.dpr = if dpr > 0.0 { dpr } else { 1.0 };
    }

    pub fn is_drawing(&self) -> bool {
        self.last.is_some()
    }

    /// Advisory cursor position in device pixels, tracked even while
    /// the pointer is up so the host can render a brush preview.
    pub fn cursor(&self) -> Vec2 {
        self.cursor
    }

    fn to_device(&self, pos: Vec2) -> Vec2 {
        pos * self.dpr
    }

    pub fn pointer_down(&mut self, pos: Vec2) {
        let p = self.to_device(pos);
        self.cursor = p;
        self.last = Some(p);
    }

    /// Extend the active stroke to `pos`. A move without a preceding
    /// down only updates the cursor.
    pub fn pointer_move(
        &mut self,
        pos: Vec2,
        artwork: &mut Surface,
        sparkles: &mut ParticleField,
        rng: &mut Rng,
    ) {
        let p = self.to_device(pos);
        self.cursor = p;
        let Some(from) = self.last else {
            return;
        };
        self.last = Some(p);
        self.paint_segment(from, p, artwork);
        if self.config.effects.particles {
            self.emit_sparkles(p, sparkles, rng);
        }
    }

    pub fn pointer_up(&mut self, pos: Vec2) {
        let p = self.to_device(pos);
        self.cursor = p;
        self.last = None;
    }

    /// Abort the stroke without a final point (pointer left the canvas).
    pub fn pointer_cancel(&mut self) {
        self.last = None;
    }

    fn paint_segment(&self, from: Vec2, to: Vec2, artwork: &mut Surface) {
        let width = self.config.brush_size as f32 * self.dpr;
        let mut color = self.config.color;
        if self.config.effects.motion_blur {
            color = color.fade(0.8);
        }
        if self.config.effects.glow {
            // Soft underlay, twice the brush size wider than the stroke.
            let glow_width = width + 2.0 * self.config.brush_size as f32 * self.dpr;
            artwork.stroke_segment(from, to, glow_width, color.fade(0.18));
        }
        artwork.stroke_segment(from, to, width, color);
    }

    fn emit_sparkles(&self, at: Vec2, sparkles: &mut ParticleField, rng: &mut Rng) {
        let count = (self.config.brush_size / 2).min(MAX_SPARKLES) as usize;
        let params = SpawnParams::new(ParticleKind::Trail)
            .with_speed(0.5, 2.5)
            .with_size(self.dpr, 3.0 * self.dpr);
        sparkles.spawn(at, self.config.color, count, params, rng);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::color::BRUSH_PALETTE;

    fn setup() -> (BrushEngine, Surface, ParticleField, Rng) {
        (
            BrushEngine::new(BrushConfig::default()),
            Surface::new(200, 200),
            ParticleField::new(512),
            Rng::new(42),
        )
    }

    fn painted_pixels(surface: &Surface) -> usize {
        (0..surface.height())
            .flat_map(|y| (0..surface.width()).map(move |x| (x, y)))
            .filter(|&(x, y)| surface.pixel(x, y).a > 0)
            .count()
    }

    #[test]
    fn stroke_paints_between_down_and_up() {
        let (mut brush, mut artwork, mut sparkles, mut rng) = setup();
        brush.pointer_down(Vec2::new(20.0, 100.0));
        brush.pointer_move(Vec2::new(120.0, 100.0), &mut artwork, &mut sparkles, &mut rng);
        brush.pointer_up(Vec2::new(120.0, 100.0));
        assert!(painted_pixels(&artwork) > 0);
        assert!(!brush.is_drawing());
    }

    #[test]
    fn move_without_down_is_a_noop() {
        let (mut brush, mut artwork, mut sparkles, mut rng) = setup();
        brush.pointer_move(Vec2::new(50.0, 50.0), &mut artwork, &mut sparkles, &mut rng);
        assert_eq!(painted_pixels(&artwork), 0);
        assert_eq!(sparkles.len(), 0);
        // Cursor still tracks for the host preview.
        assert_eq!(brush.cursor(), Vec2::new(50.0, 50.0));
    }

    #[test]
    fn move_after_up_is_a_noop() {
        let (mut brush, mut artwork, mut sparkles, mut rng) = setup();
        brush.pointer_down(Vec2::new(10.0, 10.0));
        brush.pointer_up(Vec2::new(10.0, 10.0));
        brush.pointer_move(Vec2::new(90.0, 90.0), &mut artwork, &mut sparkles, &mut rng);
        assert_eq!(painted_pixels(&artwork), 0);
    }

    #[test]
    fn cancel_aborts_the_stroke() {
        let (mut brush, mut artwork, mut sparkles, mut rng) = setup();
        brush.pointer_down(Vec2::new(10.0, 10.0));
        brush.pointer_cancel();
        assert!(!brush.is_drawing());
        brush.pointer_move(Vec2::new(90.0, 90.0), &mut artwork, &mut sparkles, &mut rng);
        assert_eq!(painted_pixels(&artwork), 0);
    }

    #[test]
    fn glow_underlay_widens_the_stroke() {
        let (_, mut plain, mut sparkles, mut rng) = setup();
        let mut glowing = Surface::new(200, 200);

        let mut config = BrushConfig::default();
        config.effects.glow = false;
        config.effects.particles = false;
        let mut brush = BrushEngine::new(config.clone());
        brush.pointer_down(Vec2::new(40.0, 100.0));
        brush.pointer_move(Vec2::new(160.0, 100.0), &mut plain, &mut sparkles, &mut rng);

        config.effects.glow = true;
        let mut brush = BrushEngine::new(config);
        brush.pointer_down(Vec2::new(40.0, 100.0));
        brush.pointer_move(Vec2::new(160.0, 100.0), &mut glowing, &mut sparkles, &mut rng);

        assert!(painted_pixels(&glowing) > painted_pixels(&plain));
    }

    #[test]
    fn sparkle_count_is_half_brush_size_capped() {
        let (_, mut artwork, mut sparkles, mut rng) = setup();
        let mut config = BrushConfig::default();
        config.brush_size = 30; // half is 15, caps at 5
        let mut brush = BrushEngine::new(config);
        brush.pointer_down(Vec2::new(10.0, 10.0));
        brush.pointer_move(Vec2::new(20.0, 20.0), &mut artwork, &mut sparkles, &mut rng);
        assert_eq!(sparkles.len(), 5);
    }

    // End-to-end: brush size 10 with particles on spawns exactly five
    // fresh sparkles per segment.
    #[test]
    fn size_ten_brush_spawns_five_full_life_sparkles() {
        let (_, mut artwork, mut sparkles, mut rng) = setup();
        let mut config = BrushConfig::default();
        config.brush_size = 10;
        let mut brush = BrushEngine::new(config);
        brush.pointer_down(Vec2::new(10.0, 10.0));
        brush.pointer_move(Vec2::new(20.0, 20.0), &mut artwork, &mut sparkles, &mut rng);
        assert_eq!(sparkles.len(), 5);
        for p in sparkles.iter() {
            assert_eq!(p.life, 1.0);
        }
    }

    #[test]
    fn particles_toggle_suppresses_sparkles() {
        let (_, mut artwork, mut sparkles, mut rng) = setup();
        let mut config = BrushConfig::default();
        config.effects.particles = false;
        let mut brush = BrushEngine::new(config);
        brush.pointer_down(Vec2::new(10.0, 10.0));
        brush.pointer_move(Vec2::new(60.0, 60.0), &mut artwork, &mut sparkles, &mut rng);
        assert!(painted_pixels(&artwork) > 0);
        assert_eq!(sparkles.len(), 0);
    }

    #[test]
    fn dpr_scales_pointer_input() {
        let (mut brush, _, _, _) = setup();
        brush.set_dpr(2.0);
        brush.pointer_down(Vec2::new(30.0, 40.0));
        assert_eq!(brush.cursor(), Vec2::new(60.0, 80.0));
        brush.set_dpr(0.0); // invalid, falls back to 1
        brush.pointer_up(Vec2::new(30.0, 40.0));
        assert_eq!(brush.cursor(), Vec2::new(30.0, 40.0));
    }

    #[test]
    fn palette_default_color_is_used() {
        let brush = BrushEngine::new(BrushConfig::default());
        assert_eq!(brush.config().color, BRUSH_PALETTE[0]);
    }
}
