pub mod config;
pub mod types;

pub use config::{BrushConfig, EffectToggles, SceneConfig};
pub use types::{PackedEvent, SceneEvent};
