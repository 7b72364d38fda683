pub mod color;
pub mod surface;

pub use color::{Rgba, BRUSH_PALETTE, STAR_PALETTE};
pub use surface::Surface;
