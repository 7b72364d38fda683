//! Spiral galaxy particle kinematics.
//!
//! Particles are seeded along logarithmic spiral arms and each advances
//! its own angle per frame; angular speed falls off with distance, so the
//! disc rotates differentially instead of as a rigid body. The foreground
//! galaxy sits at the surface center; background instances additionally
//! orbit their anchor point and self-rotate as a whole.

use glam::Vec2;

use crate::effects::rng::Rng;
use crate::render::color::Rgba;
use crate::render::surface::Surface;

/// Base angular speed at the galactic center, radians per 60 Hz frame.
const CORE_SPEED: f32 = 0.002;

#[derive(Debug, Clone, Copy)]
pub struct GalaxyParams {
    pub particle_count: usize,
    pub arm_count: u32,
    /// How tightly the arms wind.
    pub tightness: f32,
    /// Full turns an arm makes from core to rim.
    pub turns: f32,
    pub max_radius: f32,
    /// Whole-galaxy self-rotation, radians per frame.
    pub rotation_speed: f32,
}

impl GalaxyParams {
    pub fn foreground(particle_count: usize) -> Self {
        GalaxyParams {
            particle_count,
            arm_count: 2,
            tightness: 0.3,
            turns: 3.0,
            max_radius: 500.0,
            rotation_speed: 0.0001,
        }
    }

    pub fn background(max_radius: f32) -> Self {
        GalaxyParams {
            particle_count: 260,
            arm_count: 2,
            tightness: 0.3,
            turns: 3.0,
            max_radius,
            rotation_speed: 0.0005,
        }
    }
}

pub struct GalaxyParticle {
    pub angle: f32,
    /// Distance from the galactic center; never exceeds `max_radius`.
    pub distance: f32,
    /// Own angular speed, radians per frame; non-increasing in distance.
    pub speed: f32,
    pub size: f32,
    pub color: Rgba,
    pub glow: f32,
    glow_color: Rgba,
}

/// Hue/saturation/lightness/alpha band by normalized distance: a hot
/// cyan core, a blue midsection, and a dim outer rim.
fn band_color(ratio: f32, rng: &mut Rng) -> (Rgba, Rgba) {
    let (hue, sat, light, alpha) = if ratio < 0.3 {
        (
            180.0 + rng.next_f32() * 20.0,
            100.0,
            70.0 + rng.next_f32() * 30.0,
            0.6 + rng.next_f32() * 0.4,
        )
    } else if ratio < 0.6 {
        (
            200.0 + rng.next_f32() * 20.0,
            100.0,
            60.0 + rng.next_f32() * 30.0,
            0.4 + rng.next_f32() * 0.4,
        )
    } else {
        (
            220.0 + rng.next_f32() * 20.0,
            90.0,
            50.0 + rng.next_f32() * 30.0,
            0.2 + rng.next_f32() * 0.3,
        )
    };
    let base = Rgba::hsla(hue, sat, light, alpha);
    let glow = Rgba::hsla(hue, sat, light, 0.3);
    (base, glow)
}

pub struct SpiralGalaxy {
    pub params: GalaxyParams,
    particles: Vec<GalaxyParticle>,
    center: Vec2,
    base_center: Vec2,
    rotation: f32,
    rotation_speed: f32,
    orbit_angle: f32,
    orbit_speed: f32,
    orbit_radius: f32,
    /// Permanent particle-speed multiplier; raised after the explosion.
    speed_scale: f32,
    rng: Rng,
}

impl SpiralGalaxy {
    /// The single foreground spiral, pinned to the surface center.
    pub fn foreground(params: GalaxyParams, seed: u64) -> Self {
        let mut galaxy = SpiralGalaxy {
            params,
            particles: Vec::with_capacity(params.particle_count),
            center: Vec2::ZERO,
            base_center: Vec2::ZERO,
            rotation: 0.0,
            rotation_speed: params.rotation_speed,
            orbit_angle: 0.0,
            orbit_speed: 0.0,
            orbit_radius: 0.0,
            speed_scale: 1.0,
            rng: Rng::new(seed.wrapping_add(0x6a11)),
        };
        galaxy.regenerate();
        galaxy
    }

    /// A decorative background instance that orbits `base_center`.
    pub fn background(
        params: GalaxyParams,
        seed: u64,
        base_center: Vec2,
        orbit_radius: f32,
        orbit_speed: f32,
    ) -> Self {
        let mut galaxy = Self::foreground(params, seed);
        galaxy.base_center = base_center;
        galaxy.center = base_center;
        galaxy.orbit_radius = orbit_radius;
        galaxy.orbit_speed = orbit_speed;
        galaxy
    }

    /// Reseed the particle population along the spiral arms.
    pub fn regenerate(&mut self) {
        let p = self.params;
        self.particles.clear();
        let size_break = p.max_radius * 0.4;
        for _ in 0..p.particle_count {
            let arm = self.rng.next_int(p.arm_count);
            let arm_base = arm as f32 / p.arm_count as f32 * std::f32::consts::TAU;
            // Radial progress biased outward for visual density.
            let t = self.rng.next_f32().powf(0.3);
            let angle = arm_base + t * std::f32::consts::TAU * p.turns * p.tightness;
            let distance = t.sqrt() * p.max_radius;
            let speed = (1.0 - t.sqrt()) * CORE_SPEED;
            let (color, glow_color) = band_color(distance / p.max_radius, &mut self.rng);
            let size_cap = if distance < size_break { 2.0 } else { 1.2 };
            self.particles.push(GalaxyParticle {
                angle,
                distance,
                speed,
                size: 0.2 + self.rng.next_f32() * size_cap,
                color,
                glow: self.rng.range(2.0, 5.0),
                glow_color,
            });
        }
    }

    /// Re-anchor after a resize. The population itself is unchanged;
    /// particle placement is center-relative.
    pub fn recenter(&mut self, base_center: Vec2) {
        let offset = base_center - self.base_center;
        self.base_center = base_center;
        self.center += offset;
    }

    /// Permanent post-explosion speed-up: galaxy rotation doubles,
    /// particle orbital speed rises by half.
    pub fn boost(&mut self) {
        self.rotation_speed *= 2.0;
        self.speed_scale *= 1.5;
    }

    pub fn update(&mut self, dt: f32) {
        let frames = dt * 60.0;
        self.rotation += self.rotation_speed * frames;
        if self.orbit_radius > 0.0 {
            self.orbit_angle += self.orbit_speed * frames;
            self.center = self.base_center
                + Vec2::new(self.orbit_angle.cos(), self.orbit_angle.sin()) * self.orbit_radius;
        }
        for p in &mut self.particles {
            p.angle += p.speed * self.speed_scale * frames;
        }
    }

    pub fn draw(&self, surface: &mut Surface) {
        for p in &self.particles {
            let a = p.angle + self.rotation;
            let pos = self.center + Vec2::new(a.cos(), a.sin()) * p.distance;
            surface.fill_circle(pos, p.size, p.color);
            surface.fill_radial(
                pos,
                p.size * p.glow,
                p.glow_color,
                p.glow_color.fade(0.33),
            );
        }
    }

    pub fn center(&self) -> Vec2 {
        self.center
    }

    pub fn particles(&self) -> &[GalaxyParticle] {
        &self.particles
    }
}
