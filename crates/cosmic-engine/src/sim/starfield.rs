//! Depth-parallax starfield flythrough.
//!
//! A fixed population of stars streams toward the viewer; a star that
//! crosses the near plane is reseeded at a fresh depth, so the flight
//! never terminates. Roughly one star in twenty is a comet and drags a
//! fading tail behind its motion.

use glam::Vec2;

use crate::effects::rng::Rng;
use crate::render::color::{random_star_color, Rgba};
use crate::render::surface::Surface;

/// Focal constant of the perspective divide.
const FOCAL: f32 = 600.0;
/// Far plane; also the depth that maps to zero opacity.
const FAR: f32 = 1000.0;
/// Fraction of stars that respawn as comets.
const COMET_CHANCE: f32 = 0.05;

pub struct Star {
    pub x: f32,
    pub y: f32,
    /// Depth from the viewer, in (0, 1000].
    pub z: f32,
    pub size: f32,
    pub color: Rgba,
    pub comet: bool,
    pub tail_len: f32,
}

impl Star {
    pub fn spawn(rng: &mut Rng, width: f32, height: f32) -> Self {
        let mut star = Star {
            x: 0.0,
            y: 0.0,
            z: FAR,
            size: 0.0,
            color: Rgba::TRANSPARENT,
            comet: false,
            tail_len: 0.0,
        };
        star.reset(rng, width, height);
        star
    }

    /// Reseed position, depth, size, color, and comet flag. Called at
    /// spawn and whenever the star crosses the near plane.
    pub fn reset(&mut self, rng: &mut Rng, width: f32, height: f32) {
        self.x = rng.next_f32() * width;
        self.y = rng.next_f32() * height;
        // (0, 1000]; never exactly zero, so the projection divide is safe.
        self.z = FAR * (1.0 - rng.next_f32());
        self.size = rng.range(1.0, 3.0);
        self.color = random_star_color(rng);
        self.comet = rng.chance(COMET_CHANCE);
        self.tail_len = if self.comet { rng.range(30.0, 80.0) } else { 0.0 };
    }
}

/// Projected screen appearance of a star.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    pub screen_x: f32,
    pub screen_y: f32,
    pub radius: f32,
    pub opacity: f32,
}

/// Perspective divide. Pure: the same inputs always produce the same
/// projection, and opacity is clamped to [0, 1] for any depth.
pub fn project(x: f32, y: f32, z: f32, width: f32, height: f32) -> Projection {
    let scale = FOCAL / z.max(f32::EPSILON);
    Projection {
        screen_x: (x - width / 2.0) * scale + width / 2.0,
        screen_y: (y - height / 2.0) * scale + height / 2.0,
        radius: scale,
        opacity: ((FAR - z) / FAR).clamp(0.0, 1.0),
    }
}

pub struct Starfield {
    stars: Vec<Star>,
    count: usize,
    /// Depth units travelled per 60 Hz frame.
    speed: f32,
    width: f32,
    height: f32,
    rng: Rng,
}

impl Starfield {
    pub const DEFAULT_SPEED: f32 = 0.5;

    pub fn new(count: usize, seed: u64) -> Self {
        Starfield {
            stars: Vec::with_capacity(count),
            count,
            speed: Self::DEFAULT_SPEED,
            width: 0.0,
            height: 0.0,
            rng: Rng::new(seed.wrapping_add(0x5742)),
        }
    }

    /// Regenerate the population for new surface dimensions.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
        self.stars.clear();
        for _ in 0..self.count {
            self.stars.push(Star::spawn(&mut self.rng, width, height));
        }
    }

    /// Fly forward; stars crossing the near plane respawn at depth.
    pub fn update(&mut self, dt: f32) {
        let travel = self.speed * dt * 60.0;
        let (width, height) = (self.width, self.height);
        for star in &mut self.stars {
            star.z -= travel;
            if star.z <= 0.0 {
                star.reset(&mut self.rng, width, height);
            }
        }
    }

    pub fn draw(&self, surface: &mut Surface) {
        for star in &self.stars {
            let p = project(star.x, star.y, star.z, self.width, self.height);
            let head = Vec2::new(p.screen_x, p.screen_y);
            let color = star.color.with_alpha(p.opacity);
            if star.comet {
                let tail = head + Vec2::new(star.tail_len, 0.0);
                surface.stroke_segment_gradient(
                    tail,
                    head,
                    star.size * p.radius,
                    color.with_alpha(0.0),
                    color,
                );
            }
            surface.fill_circle(head, star.size * p.radius, color);
        }
    }

    pub fn len(&self) -> usize {
        self.stars.len()
    }

    #[cfg(test)]
    fn stars_mut(&mut self) -> &mut Vec<Star> {
        &mut self.stars
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn projection_is_deterministic() {
        let a = project(100.0, 200.0, 500.0, 800.0, 600.0);
        let b = project(100.0, 200.0, 500.0, 800.0, 600.0);
        assert_eq!(a, b);
    }

    #[test]
    fn projection_center_is_fixed_point() {
        let p = project(400.0, 300.0, 250.0, 800.0, 600.0);
        assert!((p.screen_x - 400.0).abs() < 1e-3);
        assert!((p.screen_y - 300.0).abs() < 1e-3);
    }

    #[test]
    fn opacity_clamped_outside_depth_range() {
        assert_eq!(project(0.0, 0.0, 2000.0, 800.0, 600.0).opacity, 0.0);
        assert_eq!(project(0.0, 0.0, -5.0, 800.0, 600.0).opacity, 1.0);
        assert_eq!(project(0.0, 0.0, 0.5, 800.0, 600.0).opacity, 0.9995);
    }

    #[test]
    fn closer_stars_project_larger() {
        let near = project(100.0, 100.0, 50.0, 800.0, 600.0);
        let far = project(100.0, 100.0, 900.0, 800.0, 600.0);
        assert!(near.radius > far.radius);
    }

    #[test]
    fn resize_builds_full_population() {
        let mut field = Starfield::new(800, 42);
        field.resize(1280.0, 720.0);
        assert_eq!(field.len(), 800);
    }

    #[test]
    fn comet_fraction_is_about_five_percent() {
        let mut field = Starfield::new(2000, 42);
        field.resize(1280.0, 720.0);
        let comets = field.stars.iter().filter(|s| s.comet).count();
        assert!((50..160).contains(&comets), "comets: {comets}");
    }

    // End-to-end scenario: one star at z=1 advanced once with speed 0.5
    // crosses the near plane and reseeds into (0, 1000].
    #[test]
    fn near_plane_crossing_reseeds_depth() {
        let mut field = Starfield::new(1, 7);
        field.resize(640.0, 480.0);
        {
            let star = &mut field.stars_mut()[0];
            star.z = 1.0;
        }
        // Speed 0.5 per frame: two frames take z from 1.0 through 0.5
        // to the near plane, where the reset fires.
        field.update(1.0 / 60.0);
        field.update(1.0 / 60.0);
        let z = field.stars_mut()[0].z;
        assert!(z > 0.0 && z <= 1000.0, "reseeded z: {z}");
    }

    #[test]
    fn population_never_changes_size() {
        let mut field = Starfield::new(64, 3);
        field.resize(800.0, 600.0);
        for _ in 0..600 {
            field.update(1.0 / 60.0);
        }
        assert_eq!(field.len(), 64);
    }

    #[test]
    fn draw_paints_onto_surface() {
        let mut field = Starfield::new(200, 11);
        field.resize(64.0, 64.0);
        let mut surface = Surface::new(64, 64);
        field.update(1.0 / 60.0);
        field.draw(&mut surface);
        let painted = (0..64)
            .flat_map(|y| (0..64).map(move |x| (x, y)))
            .any(|(x, y)| surface.pixel(x, y).a > 0);
        assert!(painted);
    }
}
