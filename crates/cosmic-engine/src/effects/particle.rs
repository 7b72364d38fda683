//! Short-lived visual particles with decaying life.

use glam::Vec2;

use crate::render::color::Rgba;

/// What spawned the particle. The kind selects the default decay rate
/// and lets the field draw staged explosion layers differently.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParticleKind {
    /// Fast ring fragments thrown out by the collision.
    Shockwave,
    /// The main color-mixed collision burst.
    Explosion,
    /// A few large, slow-fading orbs at the blast center.
    BigBang,
    /// Ephemeral sparks along a brush stroke.
    Trail,
}

impl ParticleKind {
    /// Life lost per 60 Hz frame. Shockwave fragments die first, orbs
    /// linger well past the transition completing.
    pub fn decay(self) -> f32 {
        match self {
            ParticleKind::Shockwave => 0.035,
            ParticleKind::Explosion => 0.02,
            ParticleKind::BigBang => 0.006,
            ParticleKind::Trail => 0.02,
        }
    }
}

/// A single particle. Velocity is in pixels per 60 Hz frame; `advance`
/// scales by `dt * 60`, so the tuning constants stay readable as
/// per-frame values while the simulation is rate-independent.
#[derive(Debug, Clone)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: f32,
    pub color: Rgba,
    /// Remaining life in [0, 1]; strictly decreasing.
    pub life: f32,
    pub decay: f32,
    pub kind: ParticleKind,
}

impl Particle {
    pub fn new(pos: Vec2, vel: Vec2, size: f32, color: Rgba, kind: ParticleKind) -> Self {
        Particle {
            pos,
            vel,
            size,
            color,
            life: 1.0,
            decay: kind.decay(),
            kind,
        }
    }

    /// Advance position and burn life. Returns false once expired.
    pub fn advance(&mut self, dt: f32) -> bool {
        let frames = dt * 60.0;
        self.pos += self.vel * frames;
        self.life = (self.life - self.decay * frames).max(0.0);
        self.life > 0.0
    }
}
