//! The landing view: layered cosmic backdrop plus the two-body orbital
//! transition.
//!
//! Paint order back to front: nebula fields, background galaxies, the
//! starfield flythrough, the foreground spiral, and the transition
//! overlay. The frame clear is a translucent black fade, which is what
//! produces the streaking star trails; it deepens while the explosion
//! plays out.

use glam::Vec2;

use crate::api::config::SceneConfig;
use crate::api::types::SceneEvent;
use crate::core::scheduler::{ClearMode, Scene};
use crate::input::queue::InputEvent;
use crate::render::color::Rgba;
use crate::render::surface::Surface;
use crate::sim::galaxy::{GalaxyParams, SpiralGalaxy};
use crate::sim::nebula::NebulaLayer;
use crate::sim::starfield::Starfield;
use crate::sim::transition::{OrbitalTransition, TransitionPhase};

/// Per-frame fade alpha of the backdrop.
const FADE_ALPHA: f32 = 0.15;
/// Deeper fade while the explosion is on screen.
const EXPLODING_FADE_ALPHA: f32 = 0.08;

/// Anchor fraction, orbit radius, orbit speed, and disc radius of each
/// decorative background galaxy.
const BACKGROUND_SPOTS: [(f32, f32, f32, f32, f32); 3] = [
    (0.2, 0.25, 40.0, 0.004, 120.0),
    (0.82, 0.7, 55.0, 0.003, 150.0),
    (0.15, 0.8, 35.0, 0.005, 100.0),
];

pub struct LandingScene {
    nebula: NebulaLayer,
    starfield: Starfield,
    background: Vec<SpiralGalaxy>,
    foreground: SpiralGalaxy,
    transition: OrbitalTransition,
    pointer_down: bool,
    width: f32,
    height: f32,
}

impl LandingScene {
    pub fn new(config: &SceneConfig) -> Self {
        let background = BACKGROUND_SPOTS
            .iter()
            .enumerate()
            .map(|(i, &(_, _, orbit_radius, orbit_speed, radius))| {
                SpiralGalaxy::background(
                    GalaxyParams::background(radius),
                    config.seed.wrapping_add(i as u64 + 1),
                    Vec2::ZERO,
                    orbit_radius,
                    orbit_speed,
                )
            })
            .collect();
        LandingScene {
            nebula: NebulaLayer::new(),
            starfield: Starfield::new(config.star_count, config.seed),
            background,
            foreground: SpiralGalaxy::foreground(
                GalaxyParams::foreground(config.galaxy_particle_count),
                config.seed,
            ),
            transition: OrbitalTransition::new(config.explosion_budget, config.seed),
            pointer_down: false,
            width: 0.0,
            height: 0.0,
        }
    }

    /// Trigger the orbital approach; repeated calls are absorbed.
    pub fn start_transition(&mut self) {
        self.transition.start();
    }

    pub fn transition_phase(&self) -> TransitionPhase {
        self.transition.phase()
    }

    /// Rearm the transition for another run, e.g. when the host
    /// navigates back to the landing view.
    pub fn reset_transition(&mut self) {
        self.transition.reset();
    }

    fn explosion_on_screen(&self) -> bool {
        matches!(
            self.transition.phase(),
            TransitionPhase::Exploding | TransitionPhase::FadingOut
        )
    }
}

impl Scene for LandingScene {
    fn resize(&mut self, width: u32, height: u32) {
        self.width = width as f32;
        self.height = height as f32;
        self.nebula.resize(self.width, self.height);
        self.starfield.resize(self.width, self.height);
        for (galaxy, &(fx, fy, ..)) in self.background.iter_mut().zip(&BACKGROUND_SPOTS) {
            galaxy.recenter(Vec2::new(self.width * fx, self.height * fy));
        }
        let center = Vec2::new(self.width / 2.0, self.height / 2.0);
        self.foreground.recenter(center);
        self.transition.recenter(center);
    }

    fn handle_input(&mut self, event: InputEvent) {
        match event {
            InputEvent::PointerDown { x, y } => {
                self.pointer_down = true;
                self.transition.set_drag(Some(Vec2::new(x, y)));
            }
            InputEvent::PointerMove { x, y } => {
                if self.pointer_down {
                    self.transition.set_drag(Some(Vec2::new(x, y)));
                }
            }
            InputEvent::PointerUp { .. } | InputEvent::PointerCancel => {
                self.pointer_down = false;
                self.transition.set_drag(None);
            }
        }
    }

    fn update(&mut self, dt: f32, events: &mut Vec<SceneEvent>) {
        self.starfield.update(dt);
        for galaxy in &mut self.background {
            galaxy.update(dt);
        }
        self.foreground.update(dt);
        self.transition.update(dt, events);
        if self.transition.take_exploded() {
            self.foreground.boost();
            for galaxy in &mut self.background {
                galaxy.boost();
            }
        }
    }

    fn draw(&mut self, surface: &mut Surface) {
        self.nebula.draw(surface);
        for galaxy in &self.background {
            galaxy.draw(surface);
        }
        self.starfield.draw(surface);
        self.foreground.draw(surface);
        self.transition.draw(surface);
    }

    fn clear_mode(&self) -> ClearMode {
        let alpha = if self.explosion_on_screen() {
            EXPLODING_FADE_ALPHA
        } else {
            FADE_ALPHA
        };
        ClearMode::Fade(Rgba::hex(0x000000).with_alpha(alpha))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const STEP: f32 = 1.0 / 60.0;

    fn scene() -> LandingScene {
        let mut s = LandingScene::new(&SceneConfig::default());
        s.resize(800, 600);
        s
    }

    #[test]
    fn starts_idle_with_full_populations() {
        let s = scene();
        assert_eq!(s.transition_phase(), TransitionPhase::Idle);
        assert_eq!(s.starfield.len(), 800);
        assert_eq!(s.background.len(), 3);
        assert_eq!(s.foreground.particles().len(), 1200);
    }

    #[test]
    fn idle_updates_emit_no_events() {
        let mut s = scene();
        let mut events = Vec::new();
        for _ in 0..120 {
            s.update(STEP, &mut events);
        }
        assert!(events.is_empty());
        assert_eq!(s.transition_phase(), TransitionPhase::Idle);
    }

    #[test]
    fn transition_runs_to_completion() {
        let mut s = scene();
        s.start_transition();
        let mut events = Vec::new();
        for _ in 0..400 {
            s.update(STEP, &mut events);
        }
        assert_eq!(s.transition_phase(), TransitionPhase::Complete);
        assert!(events.contains(&SceneEvent::TransitionComplete));
        assert!(events.contains(&SceneEvent::FlashRequested));
    }

    #[test]
    fn fade_deepens_during_explosion() {
        let mut s = scene();
        let ClearMode::Fade(idle_fade) = s.clear_mode() else {
            panic!("landing always fades");
        };
        s.start_transition();
        let mut events = Vec::new();
        while !s.explosion_on_screen() {
            s.update(STEP, &mut events);
        }
        let ClearMode::Fade(exploding_fade) = s.clear_mode() else {
            panic!("landing always fades");
        };
        assert!(exploding_fade.a < idle_fade.a);
    }

    #[test]
    fn drag_only_applies_while_pointer_down() {
        let mut s = scene();
        let mut events = Vec::new();
        s.handle_input(InputEvent::PointerDown { x: 700.0, y: 300.0 });
        s.update(STEP, &mut events);
        let dragged = s.transition.body_position(0);
        assert!(dragged.x > 400.0, "body follows the pointer: {dragged:?}");

        s.handle_input(InputEvent::PointerUp { x: 700.0, y: 300.0 });
        s.handle_input(InputEvent::PointerMove { x: 100.0, y: 300.0 });
        s.update(STEP, &mut events);
        let after = s.transition.body_position(0);
        assert!(after.x > 400.0, "released body keeps revolving: {after:?}");
    }

    #[test]
    fn reset_rearms_after_completion() {
        let mut s = scene();
        s.start_transition();
        let mut events = Vec::new();
        for _ in 0..400 {
            s.update(STEP, &mut events);
        }
        s.reset_transition();
        assert_eq!(s.transition_phase(), TransitionPhase::Idle);
        s.start_transition();
        assert_eq!(s.transition_phase(), TransitionPhase::Approaching);
    }

    #[test]
    fn draw_layers_paint_the_frame() {
        let mut s = scene();
        let mut surface = Surface::new(800, 600);
        let mut events = Vec::new();
        s.update(STEP, &mut events);
        s.draw(&mut surface);
        // Nebula one is centered at 30% of the surface.
        assert!(surface.pixel(240, 180).a > 0);
    }
}
