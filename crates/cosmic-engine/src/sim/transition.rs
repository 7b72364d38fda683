//! Two-body orbital transition: the landing page's planets circle each
//! other until triggered, spiral inward, collide, and detonate into a
//! staged explosion that signals the page swap.
//!
//! The phase machine only ever moves forward (Idle → Approaching →
//! Colliding → Exploding → FadingOut → Complete); `reset` is the sole
//! way back to Idle.

use std::collections::VecDeque;

use glam::Vec2;

use crate::api::types::SceneEvent;
use crate::effects::field::ParticleField;
use crate::effects::particle::{Particle, ParticleKind};
use crate::effects::rng::Rng;
use crate::extensions::easing::Easing;
use crate::render::color::Rgba;
use crate::render::surface::Surface;

/// Wall-clock length of the inward spiral.
const APPROACH_SECS: f32 = 2.0;
/// Bodies closer than this (screen px) collide.
const COLLISION_RADIUS: f32 = 30.0;
/// Delay between the explosion and the completion signal.
const COMPLETE_DELAY_SECS: f32 = 0.1;
/// Bounded trail history per body.
const TRAIL_CAP: usize = 25;

/// Idle revolution speed, radians per 60 Hz frame.
const IDLE_SPEED: f32 = 0.01;
/// Angular speed the approach ramps toward.
const TARGET_SPEED: f32 = 0.15;
/// Exponential smoothing factor per fixed step.
const SPEED_SMOOTHING: f32 = 0.1;

const BODY_RADIUS: f32 = 12.0;
const BASE_ORBIT_RADIUS: f32 = 150.0;

const SHOCKWAVE_GROWTH: f32 = 10.0;
const SHOCKWAVE_DECAY: f32 = 0.92;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionPhase {
    Idle,
    Approaching,
    Colliding,
    Exploding,
    FadingOut,
    Complete,
}

/// One orbiting planet. Screen position is always derived from the
/// shared center, `angle`, and the current orbit radius.
pub struct OrbitingBody {
    pub angle: f32,
    pub color: Rgba,
    trail: VecDeque<Vec2>,
}

impl OrbitingBody {
    fn new(angle: f32, color: Rgba) -> Self {
        OrbitingBody {
            angle,
            color,
            trail: VecDeque::with_capacity(TRAIL_CAP),
        }
    }

    fn push_trail(&mut self, pos: Vec2) {
        if self.trail.len() == TRAIL_CAP {
            self.trail.pop_front();
        }
        self.trail.push_back(pos);
    }

    pub fn trail_len(&self) -> usize {
        self.trail.len()
    }
}

/// Expanding ring overlay spawned by the collision.
pub struct Shockwave {
    pub center: Vec2,
    pub radius: f32,
    pub max_radius: f32,
    pub alpha: f32,
}

pub struct OrbitalTransition {
    phase: TransitionPhase,
    bodies: [OrbitingBody; 2],
    center: Vec2,
    base_orbit_radius: f32,
    orbit_radius: f32,
    speed: f32,
    /// Seconds inside Approaching.
    elapsed: f32,
    /// Seconds since the explosion fired.
    since_explosion: f32,
    /// Active pointer drag, overriding idle body angles.
    drag: Option<Vec2>,
    explosion: ParticleField,
    shockwave: Option<Shockwave>,
    completion_sent: bool,
    exploded_latch: bool,
    rng: Rng,
}

impl OrbitalTransition {
    pub fn new(explosion_budget: usize, seed: u64) -> Self {
        OrbitalTransition {
            phase: TransitionPhase::Idle,
            bodies: [
                OrbitingBody::new(0.0, Rgba::hex(0x4facfe)),
                OrbitingBody::new(std::f32::consts::PI, Rgba::hex(0xff3399)),
            ],
            center: Vec2::ZERO,
            base_orbit_radius: BASE_ORBIT_RADIUS,
            orbit_radius: BASE_ORBIT_RADIUS,
            speed: IDLE_SPEED,
            elapsed: 0.0,
            since_explosion: 0.0,
            drag: None,
            explosion: ParticleField::new(explosion_budget),
            shockwave: None,
            completion_sent: false,
            exploded_latch: false,
            rng: Rng::new(seed.wrapping_add(0x0b17)),
        }
    }

    pub fn phase(&self) -> TransitionPhase {
        self.phase
    }

    pub fn recenter(&mut self, center: Vec2) {
        self.center = center;
    }

    /// Begin the approach. Idempotent: a second trigger while already
    /// transitioning changes nothing.
    pub fn start(&mut self) {
        if self.phase == TransitionPhase::Idle {
            log::debug!("orbital transition: idle -> approaching");
            self.phase = TransitionPhase::Approaching;
            self.elapsed = 0.0;
        }
    }

    /// Full reset back to two idle bodies. The only backward move.
    pub fn reset(&mut self) {
        let seed_step = self.rng.next_int(u32::MAX);
        *self = OrbitalTransition {
            center: self.center,
            ..OrbitalTransition::new(self.explosion.budget(), seed_step as u64)
        };
    }

    /// Pointer drag override while idle: body A points at the pointer,
    /// body B sits opposite. Interaction only — not a phase change.
    pub fn set_drag(&mut self, pointer: Option<Vec2>) {
        self.drag = pointer;
    }

    /// True exactly once, after the collision burst fires. The landing
    /// scene uses this to apply the permanent galaxy boost.
    pub fn take_exploded(&mut self) -> bool {
        std::mem::take(&mut self.exploded_latch)
    }

    /// Eased approach progress in [0, 1].
    fn progress(&self) -> f32 {
        (self.elapsed / APPROACH_SECS).clamp(0.0, 1.0)
    }

    /// Extra angle the inward spiral adds on top of each body's own.
    fn spiral_term(&self) -> f32 {
        match self.phase {
            TransitionPhase::Approaching | TransitionPhase::Colliding => {
                self.progress() * std::f32::consts::TAU
            }
            _ => 0.0,
        }
    }

    /// Projected screen position of body `index`.
    pub fn body_position(&self, index: usize) -> Vec2 {
        let a = self.bodies[index].angle + self.spiral_term();
        self.center + Vec2::new(a.cos(), a.sin()) * self.orbit_radius
    }

    pub fn update(&mut self, dt: f32, events: &mut Vec<SceneEvent>) {
        let frames = dt * 60.0;
        match self.phase {
            TransitionPhase::Idle => {
                if let Some(pointer) = self.drag {
                    let toward = pointer - self.center;
                    let angle = toward.y.atan2(toward.x);
                    self.bodies[0].angle = angle;
                    self.bodies[1].angle = angle + std::f32::consts::PI;
                } else {
                    for body in &mut self.bodies {
                        body.angle += IDLE_SPEED * frames;
                    }
                }
                self.push_trails();
            }
            TransitionPhase::Approaching => {
                self.elapsed += dt;
                self.speed += (TARGET_SPEED - self.speed) * SPEED_SMOOTHING;
                for body in &mut self.bodies {
                    body.angle += self.speed * frames;
                }
                let eased = Easing::QuadIn.apply(self.progress());
                self.orbit_radius = self.base_orbit_radius * (1.0 - eased);
                self.push_trails();

                let distance = self.body_position(0).distance(self.body_position(1));
                if distance < COLLISION_RADIUS {
                    self.phase = TransitionPhase::Colliding;
                    self.explode(events);
                }
            }
            TransitionPhase::Colliding => {
                // Unreachable between ticks; collision detonates in the
                // same update that detects it.
                self.phase = TransitionPhase::Exploding;
            }
            TransitionPhase::Exploding => {
                self.advance_aftermath(dt, events);
                // Bodies and trails stop rendering from the next frame.
                self.phase = TransitionPhase::FadingOut;
            }
            TransitionPhase::FadingOut => {
                self.advance_aftermath(dt, events);
                if self.completion_sent {
                    self.phase = TransitionPhase::Complete;
                }
            }
            TransitionPhase::Complete => {
                // Leftover explosion particles decay to exhaustion.
                self.advance_aftermath(dt, events);
            }
        }
    }

    fn push_trails(&mut self) {
        for i in 0..2 {
            let pos = self.body_position(i);
            self.bodies[i].push_trail(pos);
        }
    }

    /// Shared post-explosion bookkeeping: particles, ring, completion.
    fn advance_aftermath(&mut self, dt: f32, events: &mut Vec<SceneEvent>) {
        self.explosion.update(dt);
        if let Some(wave) = &mut self.shockwave {
            let frames = dt * 60.0;
            wave.radius = (wave.radius + SHOCKWAVE_GROWTH * frames).min(wave.max_radius);
            wave.alpha *= SHOCKWAVE_DECAY.powf(frames);
            if wave.alpha < 0.02 {
                self.shockwave = None;
            }
        }
        self.since_explosion += dt;
        if !self.completion_sent && self.since_explosion >= COMPLETE_DELAY_SECS {
            self.completion_sent = true;
            log::debug!("orbital transition: complete");
            events.push(SceneEvent::TransitionComplete);
        }
    }

    /// Three coordinated bursts at the collision midpoint, plus the
    /// ring overlay and the host flash request.
    fn explode(&mut self, events: &mut Vec<SceneEvent>) {
        let at = (self.body_position(0) + self.body_position(1)) / 2.0;
        let [a, b] = [self.bodies[0].color, self.bodies[1].color];
        log::debug!("orbital transition: collision at {at:?}");

        // (a) Uniformly-angled fast shockwave ring fragments.
        let ring_count = 36;
        for i in 0..ring_count {
            let angle = i as f32 / ring_count as f32 * std::f32::consts::TAU;
            let speed = self.rng.range(5.0, 8.0);
            self.explosion.push(Particle::new(
                at,
                Vec2::new(angle.cos(), angle.sin()) * speed,
                self.rng.range(1.5, 3.0),
                Rgba::hex(0xffffff),
                ParticleKind::Shockwave,
            ));
        }
        // (b) The main burst, colors mixed between the two bodies.
        for _ in 0..80 {
            let angle = self.rng.angle();
            let speed = self.rng.range(1.0, 6.0);
            let color = Rgba::lerp(a, b, self.rng.next_f32());
            self.explosion.push(Particle::new(
                at,
                Vec2::new(angle.cos(), angle.sin()) * speed,
                self.rng.range(1.0, 4.0),
                color,
                ParticleKind::Explosion,
            ));
        }
        // (c) A few large, slow-fading orbs.
        for _ in 0..6 {
            let angle = self.rng.angle();
            let speed = self.rng.range(0.3, 1.0);
            self.explosion.push(Particle::new(
                at,
                Vec2::new(angle.cos(), angle.sin()) * speed,
                self.rng.range(8.0, 16.0),
                Rgba::lerp(a, b, self.rng.next_f32()),
                ParticleKind::BigBang,
            ));
        }

        self.shockwave = Some(Shockwave {
            center: at,
            radius: 0.0,
            max_radius: 400.0,
            alpha: 1.0,
        });
        self.since_explosion = 0.0;
        self.exploded_latch = true;
        events.push(SceneEvent::FlashRequested);
        self.phase = TransitionPhase::Exploding;
    }

    fn bodies_visible(&self) -> bool {
        matches!(
            self.phase,
            TransitionPhase::Idle
                | TransitionPhase::Approaching
                | TransitionPhase::Colliding
                | TransitionPhase::Exploding
        )
    }

    pub fn draw(&self, surface: &mut Surface) {
        if self.bodies_visible() {
            for body in &self.bodies {
                draw_trail(surface, body);
            }
            for i in 0..2 {
                let pos = self.body_position(i);
                let color = self.bodies[i].color;
                surface.fill_radial(
                    pos,
                    BODY_RADIUS * 2.5,
                    color.with_alpha(0.35),
                    color.with_alpha(0.12),
                );
                surface.fill_circle(pos, BODY_RADIUS, color);
            }
        }
        self.explosion.draw(surface);
        if let Some(wave) = &self.shockwave {
            surface.stroke_ring(
                wave.center,
                wave.radius,
                3.0,
                Rgba::hex(0xffffff).with_alpha(wave.alpha),
            );
        }
    }

    pub fn explosion_particle_count(&self) -> usize {
        self.explosion.len()
    }

    #[cfg(test)]
    fn force_approach_geometry(&mut self, base_radius: f32) {
        self.phase = TransitionPhase::Approaching;
        self.base_orbit_radius = base_radius;
        self.orbit_radius = base_radius;
    }
}

/// Smoothed fading trail: quadratic interpolation through midpoints of
/// the recorded path, stroked head-bright to tail-transparent with a
/// soft wide glow pass underneath.
fn draw_trail(surface: &mut Surface, body: &OrbitingBody) {
    let points: Vec<Vec2> = body.trail.iter().copied().collect();
    if points.len() < 2 {
        return;
    }
    let samples = smooth_path(&points);
    let n = samples.len();
    for (i, pair) in samples.windows(2).enumerate() {
        // Oldest point first: alpha ramps up toward the head.
        let t0 = i as f32 / n as f32;
        let t1 = (i + 1) as f32 / n as f32;
        let from = body.color.with_alpha(t0 * 0.9);
        let to = body.color.with_alpha(t1 * 0.9);
        surface.stroke_segment_gradient(pair[0], pair[1], 3.0, from, to);
        surface.stroke_segment_gradient(
            pair[0],
            pair[1],
            7.0,
            from.fade(0.25),
            to.fade(0.25),
        );
    }
}

/// Quadratic smoothing: for each interior point, curve through it using
/// the midpoints of its neighboring segments as anchors.
fn smooth_path(points: &[Vec2]) -> Vec<Vec2> {
    if points.len() < 3 {
        return points.to_vec();
    }
    let mut out = Vec::with_capacity(points.len() * 4);
    out.push(points[0]);
    for i in 1..points.len() - 1 {
        let m0 = (points[i - 1] + points[i]) / 2.0;
        let m1 = (points[i] + points[i + 1]) / 2.0;
        for step in 1..=4 {
            let t = step as f32 / 4.0;
            let a = m0.lerp(points[i], t);
            let b = points[i].lerp(m1, t);
            out.push(a.lerp(b, t));
        }
    }
    out.extend(points.last().copied());
    out
}
