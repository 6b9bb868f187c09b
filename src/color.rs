//! RGB color handling for the lighting and rasterization stages.
//!
//! Lighting accumulates colors as three independent `f32` channels on a
//! 0-255 scale and only converts back to bytes after clamping, so a pass can
//! overshoot intermediate values without wrapping.

/// A packed 8-bit-per-channel RGB color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Self = Self { r: 0, g: 0, b: 0 };
    pub const WHITE: Self = Self {
        r: 255,
        g: 255,
        b: 255,
    };
    pub const CYAN: Self = Self {
        r: 0,
        g: 255,
        b: 255,
    };

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Converts clamped `f32` channels into a color, truncating fractions.
    pub fn from_channels(r: f32, g: f32, b: f32) -> Self {
        Self {
            r: clamp_channel(r) as u8,
            g: clamp_channel(g) as u8,
            b: clamp_channel(b) as u8,
        }
    }

    /// The color as `f32` channels for accumulation.
    pub fn channels(self) -> (f32, f32, f32) {
        (self.r as f32, self.g as f32, self.b as f32)
    }
}

/// Clamps a single color channel into the inclusive [0, 255] range.
pub fn clamp_channel(value: f32) -> f32 {
    value.clamp(0.0, 255.0)
}

/// Linear interpolation between two channel triples at parameter `t`.
pub fn lerp_channels(a: (f32, f32, f32), b: (f32, f32, f32), t: f32) -> (f32, f32, f32) {
    (
        a.0 + (b.0 - a.0) * t,
        a.1 + (b.1 - a.1) * t,
        a.2 + (b.2 - a.2) * t,
    )
}
