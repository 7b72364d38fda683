pub mod field;
pub mod particle;
pub mod rng;

pub use field::{ParticleField, SpawnParams};
pub use particle::{Particle, ParticleKind};
pub use rng::Rng;
