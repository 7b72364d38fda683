use serde::de::Error as _;
use serde::{Deserialize, Deserializer};

use crate::render::color::{Rgba, BRUSH_PALETTE};

/// Engine configuration, provided by the embedding view.
#[derive(Debug, Clone)]
pub struct SceneConfig {
    /// Fixed timestep in seconds (default: 1/60).
    pub fixed_dt: f32,
    /// Seed for every randomized visual in the scene.
    pub seed: u64,
    /// Starfield population.
    pub star_count: usize,
    /// Foreground spiral galaxy population.
    pub galaxy_particle_count: usize,
    /// Budget for explosion/shockwave particles.
    pub explosion_budget: usize,
    /// Budget for brush trail particles.
    pub trail_budget: usize,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            fixed_dt: 1.0 / 60.0,
            seed: 42,
            star_count: 800,
            galaxy_particle_count: 1200,
            explosion_budget: 256,
            trail_budget: 512,
        }
    }
}

/// Which brush effects are active.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EffectToggles {
    pub glow: bool,
    pub particles: bool,
    pub motion_blur: bool,
}

impl Default for EffectToggles {
    fn default() -> Self {
        Self {
            glow: true,
            particles: true,
            motion_blur: false,
        }
    }
}

/// Brush configuration as sent by the UI layer:
/// `{ "color": "#00a8ff", "brushSize": 5, "effects": { ... } }`.
/// The color must name a palette entry; the size is clamped to 1–50.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BrushConfig {
    #[serde(deserialize_with = "palette_color")]
    pub color: Rgba,
    pub brush_size: u32,
    pub effects: EffectToggles,
}

impl Default for BrushConfig {
    fn default() -> Self {
        Self {
            color: BRUSH_PALETTE[0],
            brush_size: 5,
            effects: EffectToggles::default(),
        }
    }
}

impl BrushConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let mut config: BrushConfig = serde_json::from_str(json)?;
        config.brush_size = config.brush_size.clamp(1, 50);
        Ok(config)
    }
}

fn palette_color<'de, D>(deserializer: D) -> Result<Rgba, D::Error>
where
    D: Deserializer<'de>,
{
    let text = String::deserialize(deserializer)?;
    let hex = text.strip_prefix('#').unwrap_or(&text);
    let rgb = u32::from_str_radix(hex, 16)
        .map_err(|_| D::Error::custom(format!("invalid color literal: {text}")))?;
    let color = Rgba::hex(rgb);
    if BRUSH_PALETTE.contains(&color) {
        Ok(color)
    } else {
        Err(D::Error::custom(format!("color {text} is not in the brush palette")))
    }
}
