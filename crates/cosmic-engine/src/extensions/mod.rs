// extensions/mod.rs
//
// Small decoupled helpers the simulations opt into.

pub mod easing;

pub use easing::{lerp, Easing};
