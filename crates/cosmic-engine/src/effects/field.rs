//! Bounded particle container: spawn, update, prune, draw.

use glam::Vec2;

use crate::render::color::Rgba;
use crate::render::surface::Surface;

use super::particle::{Particle, ParticleKind};
use super::rng::Rng;

/// Randomized ranges for a spawn call.
#[derive(Debug, Clone, Copy)]
pub struct SpawnParams {
    pub kind: ParticleKind,
    /// Min/max speed magnitude in px per frame.
    pub speed: (f32, f32),
    /// Min/max particle size in px.
    pub size: (f32, f32),
}

impl SpawnParams {
    pub fn new(kind: ParticleKind) -> Self {
        SpawnParams {
            kind,
            speed: (0.5, 2.5),
            size: (1.0, 3.0),
        }
    }

    pub fn with_speed(mut self, lo: f32, hi: f32) -> Self {
        self.speed = (lo, hi);
        self
    }

    pub fn with_size(mut self, lo: f32, hi: f32) -> Self {
        self.size = (lo, hi);
        self
    }
}

/// Owns every particle it spawns; nothing escapes and the population
/// never exceeds `budget`.
pub struct ParticleField {
    particles: Vec<Particle>,
    budget: usize,
}

impl ParticleField {
    pub fn new(budget: usize) -> Self {
        ParticleField {
            particles: Vec::with_capacity(budget.min(1024)),
            budget,
        }
    }

    /// Spawn up to `count` particles at `origin` with direction, speed,
    /// and size drawn from the supplied ranges. Spawns past the budget
    /// are dropped silently.
    pub fn spawn(
        &mut self,
        origin: Vec2,
        color: Rgba,
        count: usize,
        params: SpawnParams,
        rng: &mut Rng,
    ) {
        for _ in 0..count {
            if self.particles.len() >= self.budget {
                break;
            }
            let angle = rng.angle();
            let speed = rng.range(params.speed.0, params.speed.1);
            let vel = Vec2::new(angle.cos(), angle.sin()) * speed;
            let size = rng.range(params.size.0, params.size.1);
            self.particles
                .push(Particle::new(origin, vel, size, color, params.kind));
        }
    }

    /// Append one fully-specified particle (explosion bursts build their
    /// own velocities). Still budget-capped.
    pub fn push(&mut self, particle: Particle) {
        if self.particles.len() < self.budget {
            self.particles.push(particle);
        }
    }

    /// Advance every particle and drop the expired ones.
    pub fn update(&mut self, dt: f32) {
        self.particles.retain_mut(|p| p.advance(dt));
    }

    /// Paint each particle as a filled disc with a radial glow; both
    /// fade with remaining life.
    pub fn draw(&self, surface: &mut Surface) {
        for p in &self.particles {
            let core = p.color.with_alpha(p.life);
            surface.fill_circle(p.pos, p.size, core);
            let glow_r = p.size * 3.0 * p.life;
            if glow_r > p.size {
                surface.fill_radial(
                    p.pos,
                    glow_r,
                    p.color.with_alpha(0.3 * p.life),
                    p.color.with_alpha(0.1 * p.life),
                );
            }
        }
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn budget(&self) -> usize {
        self.budget
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn clear(&mut self) {
        self.particles.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &Particle> {
        self.particles.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spawn_respects_count_and_ranges() {
        let mut field = ParticleField::new(100);
        let mut rng = Rng::new(42);
        let params = SpawnParams::new(ParticleKind::Trail).with_speed(0.5, 2.5);
        field.spawn(Vec2::new(10.0, 10.0), Rgba::hex(0xffffff), 5, params, &mut rng);
        assert_eq!(field.len(), 5);
        for p in field.iter() {
            let speed = p.vel.length();
            assert!((0.5..2.5).contains(&speed), "speed {speed}");
            assert_eq!(p.life, 1.0);
        }
    }

    #[test]
    fn budget_caps_population() {
        let mut field = ParticleField::new(8);
        let mut rng = Rng::new(1);
        let params = SpawnParams::new(ParticleKind::Explosion);
        field.spawn(Vec2::ZERO, Rgba::hex(0xff0000), 50, params, &mut rng);
        assert_eq!(field.len(), 8);
    }

    #[test]
    fn expired_particles_are_pruned() {
        let mut field = ParticleField::new(10);
        let mut rng = Rng::new(3);
        field.spawn(
            Vec2::ZERO,
            Rgba::hex(0xffffff),
            4,
            SpawnParams::new(ParticleKind::Shockwave),
            &mut rng,
        );
        // Shockwave decay 0.035/frame: gone within 29 frames.
        for _ in 0..30 {
            field.update(1.0 / 60.0);
        }
        assert!(field.is_empty());
    }

    #[test]
    fn life_stays_in_unit_interval_every_tick() {
        let mut field = ParticleField::new(32);
        let mut rng = Rng::new(11);
        field.spawn(
            Vec2::ZERO,
            Rgba::hex(0x2ecc71),
            20,
            SpawnParams::new(ParticleKind::Trail),
            &mut rng,
        );
        for _ in 0..60 {
            field.update(1.0 / 60.0);
            for p in field.iter() {
                assert!(p.life > 0.0 && p.life <= 1.0);
            }
        }
    }

    #[test]
    fn draw_paints_live_particles() {
        let mut field = ParticleField::new(4);
        field.push(Particle::new(
            Vec2::new(8.0, 8.0),
            Vec2::ZERO,
            2.0,
            Rgba::hex(0xffffff),
            ParticleKind::Trail,
        ));
        let mut surface = Surface::new(16, 16);
        field.draw(&mut surface);
        assert!(surface.pixel(8, 8).a > 0);
    }
}
