//! The drawing view: persistent freehand artwork with sparkle trails.
//!
//! Two layers per frame: the artwork surface, which accumulates strokes
//! and survives clears, and a transient overlay of trail particles that
//! the frame clear wipes every tick.

use crate::api::config::{BrushConfig, SceneConfig};
use crate::api::types::SceneEvent;
use crate::core::scheduler::{ClearMode, Scene};
use crate::effects::field::ParticleField;
use crate::effects::rng::Rng;
use crate::input::queue::InputEvent;
use crate::render::surface::Surface;
use crate::sim::brush::BrushEngine;

use glam::Vec2;

pub struct DrawingScene {
    brush: BrushEngine,
    artwork: Surface,
    sparkles: ParticleField,
    rng: Rng,
}

impl DrawingScene {
    pub fn new(config: &SceneConfig) -> Self {
        DrawingScene {
            brush: BrushEngine::new(BrushConfig::default()),
            artwork: Surface::new(0, 0),
            sparkles: ParticleField::new(config.trail_budget),
            rng: Rng::new(config.seed.wrapping_add(0xd5a0)),
        }
    }

    pub fn set_brush(&mut self, config: BrushConfig) {
        self.brush.set_config(config);
    }

    pub fn set_dpr(&mut self, dpr: f32) {
        self.brush.set_dpr(dpr);
    }

    /// Wipe the artwork and any live sparkles; the active stroke and
    /// brush settings survive.
    pub fn clear_artwork(&mut self) {
        self.artwork.clear();
        self.sparkles.clear();
    }

    /// The persistent stroke layer, e.g. for export.
    pub fn artwork(&self) -> &Surface {
        &self.artwork
    }

    pub fn cursor(&self) -> Vec2 {
        self.brush.cursor()
    }

    pub fn is_drawing(&self) -> bool {
        self.brush.is_drawing()
    }
}

impl Scene for DrawingScene {
    fn resize(&mut self, width: u32, height: u32) {
        // The artwork buffer matches the frame surface; a resize starts
        // a blank canvas.
        self.artwork.resize(width, height);
        self.sparkles.clear();
    }

    fn handle_input(&mut self, event: InputEvent) {
        match event {
            InputEvent::PointerDown { x, y } => self.brush.pointer_down(Vec2::new(x, y)),
            InputEvent::PointerMove { x, y } => self.brush.pointer_move(
                Vec2::new(x, y),
                &mut self.artwork,
                &mut self.sparkles,
                &mut self.rng,
            ),
            InputEvent::PointerUp { x, y } => self.brush.pointer_up(Vec2::new(x, y)),
            InputEvent::PointerCancel => self.brush.pointer_cancel(),
        }
    }

    fn update(&mut self, dt: f32, _events: &mut Vec<SceneEvent>) {
        self.sparkles.update(dt);
    }

    fn draw(&mut self, surface: &mut Surface) {
        surface.composite(&self.artwork);
        self.sparkles.draw(surface);
    }

    fn clear_mode(&self) -> ClearMode {
        ClearMode::Clear
    }
}
