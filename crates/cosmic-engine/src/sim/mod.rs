// sim/mod.rs
//
// The cosmic simulations. Each one owns its population, updates in
// fixed steps, and paints onto a Surface; none of them know about the
// host or about each other. Scenes compose them.

pub mod brush;
pub mod galaxy;
pub mod nebula;
pub mod starfield;
pub mod transition;

pub use brush::BrushEngine;
pub use galaxy::{GalaxyParams, SpiralGalaxy};
pub use nebula::NebulaLayer;
pub use starfield::Starfield;
pub use transition::{OrbitalTransition, TransitionPhase};
