pub mod api;
pub mod core;
pub mod effects;
pub mod extensions;
pub mod input;
pub mod render;
pub mod scene;
pub mod sim;

// Re-export key types at crate root for convenience
pub use api::config::{BrushConfig, EffectToggles, SceneConfig};
pub use api::types::{PackedEvent, SceneEvent};
pub use core::scheduler::{ClearMode, FrameDriver, Scene};
pub use core::time::FrameTimer;
pub use effects::field::{ParticleField, SpawnParams};
pub use effects::particle::{Particle, ParticleKind};
pub use effects::rng::Rng;
pub use input::queue::{InputEvent, InputQueue};
pub use render::color::{Rgba, BRUSH_PALETTE, STAR_PALETTE};
pub use render::surface::Surface;
pub use scene::drawing::DrawingScene;
pub use scene::landing::LandingScene;
pub use sim::brush::BrushEngine;
pub use sim::galaxy::{GalaxyParams, SpiralGalaxy};
pub use sim::nebula::NebulaLayer;
pub use sim::starfield::Starfield;
pub use sim::transition::{OrbitalTransition, TransitionPhase};

// Extensions — decoupled optional helpers
pub use extensions::{lerp, Easing};
