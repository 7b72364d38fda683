//! RGBA color with the constructors the scene painters need.

use bytemuck::{Pod, Zeroable};

use crate::effects::rng::Rng;

/// 8-bit RGBA color, non-premultiplied. Pod so surfaces can expose
/// their pixel storage as a flat byte view.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Pod, Zeroable)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const TRANSPARENT: Rgba = Rgba { r: 0, g: 0, b: 0, a: 0 };

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Rgba { r, g, b, a }
    }

    /// Opaque color from a `0xRRGGBB` literal.
    pub const fn hex(rgb: u32) -> Self {
        Rgba {
            r: (rgb >> 16) as u8,
            g: (rgb >> 8) as u8,
            b: rgb as u8,
            a: 255,
        }
    }

    /// Replace the alpha channel with `alpha` in [0, 1].
    pub fn with_alpha(self, alpha: f32) -> Self {
        Rgba {
            a: (alpha.clamp(0.0, 1.0) * 255.0) as u8,
            ..self
        }
    }

    /// Scale the existing alpha by `factor` in [0, 1].
    pub fn fade(self, factor: f32) -> Self {
        Rgba {
            a: (self.a as f32 * factor.clamp(0.0, 1.0)) as u8,
            ..self
        }
    }

    pub fn alpha_f32(self) -> f32 {
        self.a as f32 / 255.0
    }

    /// HSLA color: hue in degrees, saturation/lightness in percent,
    /// alpha in [0, 1]. Matches the CSS hsla() model the galaxy bands use.
    pub fn hsla(hue: f32, saturation: f32, lightness: f32, alpha: f32) -> Self {
        let h = hue.rem_euclid(360.0) / 60.0;
        let s = (saturation / 100.0).clamp(0.0, 1.0);
        let l = (lightness / 100.0).clamp(0.0, 1.0);

        let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
        let x = c * (1.0 - (h % 2.0 - 1.0).abs());
        let m = l - c / 2.0;

        let (r, g, b) = match h as u32 {
            0 => (c, x, 0.0),
            1 => (x, c, 0.0),
            2 => (0.0, c, x),
            3 => (0.0, x, c),
            4 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };

        Rgba {
            r: ((r + m) * 255.0) as u8,
            g: ((g + m) * 255.0) as u8,
            b: ((b + m) * 255.0) as u8,
            a: (alpha.clamp(0.0, 1.0) * 255.0) as u8,
        }
    }

    /// Linear interpolation between two colors, all four channels.
    pub fn lerp(a: Rgba, b: Rgba, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        let mix = |x: u8, y: u8| (x as f32 + (y as f32 - x as f32) * t) as u8;
        Rgba {
            r: mix(a.r, b.r),
            g: mix(a.g, b.g),
            b: mix(a.b, b.b),
            a: mix(a.a, b.a),
        }
    }
}

/// Star colors, picked uniformly at every star reset.
pub const STAR_PALETTE: [Rgba; 5] = [
    Rgba::hex(0xc499f3), // light purple
    Rgba::hex(0x8e6dce), // medium purple
    Rgba::hex(0x63e1ff), // cyan
    Rgba::hex(0x4facfe), // blue
    Rgba::hex(0xb0f3ff), // light blue
];

/// The fixed brush palette offered by the drawing UI.
pub const BRUSH_PALETTE: [Rgba; 7] = [
    Rgba::hex(0x00a8ff), // bright blue
    Rgba::hex(0xff3399), // neon pink
    Rgba::hex(0x9b59b6), // purple
    Rgba::hex(0x2ecc71), // emerald
    Rgba::hex(0xf1c40f), // yellow
    Rgba::hex(0xe74c3c), // red
    Rgba::hex(0xffffff), // white
];

/// Pick a random star color.
pub fn random_star_color(rng: &mut Rng) -> Rgba {
    STAR_PALETTE[rng.next_int(STAR_PALETTE.len() as u32) as usize]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_unpacks_channels() {
        let c = Rgba::hex(0x4facfe);
        assert_eq!((c.r, c.g, c.b, c.a), (0x4f, 0xac, 0xfe, 255));
    }

    #[test]
    fn with_alpha_clamps() {
        assert_eq!(Rgba::hex(0xffffff).with_alpha(2.0).a, 255);
        assert_eq!(Rgba::hex(0xffffff).with_alpha(-1.0).a, 0);
    }

    #[test]
    fn hsla_primaries() {
        let red = Rgba::hsla(0.0, 100.0, 50.0, 1.0);
        assert_eq!((red.r, red.g, red.b), (255, 0, 0));
        let cyan = Rgba::hsla(180.0, 100.0, 50.0, 1.0);
        assert_eq!((cyan.r, cyan.g, cyan.b), (0, 255, 255));
    }

    #[test]
    fn hsla_lightness_extremes() {
        assert_eq!(Rgba::hsla(120.0, 100.0, 100.0, 1.0).g, 255);
        assert_eq!(Rgba::hsla(120.0, 100.0, 0.0, 1.0).g, 0);
    }

    #[test]
    fn lerp_endpoints_and_midpoint() {
        let a = Rgba::new(0, 0, 0, 0);
        let b = Rgba::new(255, 255, 255, 255);
        assert_eq!(Rgba::lerp(a, b, 0.0), a);
        assert_eq!(Rgba::lerp(a, b, 1.0), b);
        let mid = Rgba::lerp(a, b, 0.5);
        assert!(mid.r > 120 && mid.r < 135);
    }

    #[test]
    fn star_color_comes_from_palette() {
        let mut rng = Rng::new(7);
        for _ in 0..50 {
            let c = random_star_color(&mut rng);
            assert!(STAR_PALETTE.contains(&c));
        }
    }
}
