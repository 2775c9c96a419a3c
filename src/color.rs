//! Color types and operations.
//!
//! Provides:
//! - `Rgba8`: plain u8 components, used to build and inspect pixels
//! - `Color`: a packed native color value as stored in a color buffer
//! - `ColorDepth`: the native packing (RGB332, RGB565, ARGB8888) with
//!   its encode/decode and channel mixing functions
//!
//! Mixing works on the native channel widths so that a blend of two
//! identical colors, or a blend with weight 0 or 255, is exact.

use crate::basics::OPA_COVER;

// ============================================================================
// Rgba8 (8-bit per channel)
// ============================================================================

/// RGBA color with u8 components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    pub const BASE_SHIFT: u32 = 8;
    pub const BASE_SCALE: u32 = 1 << Self::BASE_SHIFT;
    pub const BASE_MASK: u32 = Self::BASE_SCALE - 1;
    pub const BASE_MSB: u32 = 1 << (Self::BASE_SHIFT - 1);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn new_opaque(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, OPA_COVER)
    }

    pub fn with_opacity(c: &Rgba8, a: u8) -> Self {
        Self { a, ..*c }
    }

    /// Fixed-point multiply, exact over u8: `round(a * b / 255)`.
    #[inline]
    pub fn multiply(a: u8, b: u8) -> u8 {
        let t: u32 = a as u32 * b as u32 + Self::BASE_MSB;
        (((t >> Self::BASE_SHIFT) + t) >> Self::BASE_SHIFT) as u8
    }

    /// Same RGB, alpha dropped (opaque).
    pub fn opaque(&self) -> Self {
        Self::new_opaque(self.r, self.g, self.b)
    }
}

// ============================================================================
// Color (packed native value)
// ============================================================================

/// A color packed in the native layout of some [`ColorDepth`].
///
/// The value does not carry its depth; buffers are interpreted with the
/// depth of the pixel format they were produced from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Color {
    pub full: u32,
}

impl Color {
    pub const fn from_full(full: u32) -> Self {
        Self { full }
    }
}

// ============================================================================
// ColorDepth
// ============================================================================

/// Exact division by 255 for values up to `255 * 255 * 2`.
#[inline]
fn udiv255(x: u32) -> u32 {
    (x * 0x8081) >> 23
}

/// Native color packing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorDepth {
    /// 1 byte: red in bits 5..8, green in bits 2..5, blue in bits 0..2.
    Rgb332,
    /// 2 bytes little endian: red in bits 11..16, green 5..11, blue 0..5.
    Rgb565,
    /// 4 bytes `B, G, R, A`; the alpha byte doubles as the alpha channel of
    /// formats that have one.
    Argb8888,
}

impl ColorDepth {
    /// Bytes of one native color.
    #[inline]
    pub const fn bytes(self) -> usize {
        match self {
            ColorDepth::Rgb332 => 1,
            ColorDepth::Rgb565 => 2,
            ColorDepth::Argb8888 => 4,
        }
    }

    /// Bit widths of the red, green and blue channels.
    const fn channel_bits(self) -> (u32, u32, u32) {
        match self {
            ColorDepth::Rgb332 => (3, 3, 2),
            ColorDepth::Rgb565 => (5, 6, 5),
            ColorDepth::Argb8888 => (8, 8, 8),
        }
    }

    /// Rounding offset added before the divide by 255 when mixing.
    #[inline]
    const fn mix_round_ofs(self) -> u32 {
        match self {
            ColorDepth::Argb8888 => 0,
            _ => 128,
        }
    }

    /// Split a packed color into native-width `(r, g, b)`.
    #[inline]
    pub fn channels(self, c: Color) -> (u32, u32, u32) {
        let v = c.full;
        match self {
            ColorDepth::Rgb332 => ((v >> 5) & 0x07, (v >> 2) & 0x07, v & 0x03),
            ColorDepth::Rgb565 => ((v >> 11) & 0x1F, (v >> 5) & 0x3F, v & 0x1F),
            ColorDepth::Argb8888 => ((v >> 16) & 0xFF, (v >> 8) & 0xFF, v & 0xFF),
        }
    }

    /// Pack native-width channels. ARGB8888 gets an opaque alpha byte.
    #[inline]
    pub fn from_channels(self, r: u32, g: u32, b: u32) -> Color {
        let full = match self {
            ColorDepth::Rgb332 => ((r & 0x07) << 5) | ((g & 0x07) << 2) | (b & 0x03),
            ColorDepth::Rgb565 => ((r & 0x1F) << 11) | ((g & 0x3F) << 5) | (b & 0x1F),
            ColorDepth::Argb8888 => {
                0xFF00_0000 | ((r & 0xFF) << 16) | ((g & 0xFF) << 8) | (b & 0xFF)
            }
        };
        Color::from_full(full)
    }

    /// Reduce an 8-bit color to this depth (alpha is not part of the color).
    pub fn pack(self, c: Rgba8) -> Color {
        let (rb, gb, bb) = self.channel_bits();
        self.from_channels(
            c.r as u32 >> (8 - rb),
            c.g as u32 >> (8 - gb),
            c.b as u32 >> (8 - bb),
        )
    }

    /// Expand a packed color to 8 bits per channel by bit replication.
    pub fn unpack(self, c: Color) -> Rgba8 {
        let (rb, gb, bb) = self.channel_bits();
        let (r, g, b) = self.channels(c);
        Rgba8::new_opaque(expand(r, rb), expand(g, gb), expand(b, bb))
    }

    /// Mix two colors: `c1 * mix + c2 * (255 - mix)`, divided by 255 per
    /// channel. `mix == 255` yields `c1`, `mix == 0` yields `c2`.
    pub fn mix(self, c1: Color, c2: Color, mix: u8) -> Color {
        let m = mix as u32;
        let im = 255 - m;
        let ofs = self.mix_round_ofs();
        let (r1, g1, b1) = self.channels(c1);
        let (r2, g2, b2) = self.channels(c2);
        self.from_channels(
            udiv255(r1 * m + r2 * im + ofs),
            udiv255(g1 * m + g2 * im + ofs),
            udiv255(b1 * m + b2 * im + ofs),
        )
    }

    /// Decode the color part of a pixel. ARGB8888 colors come back with an
    /// opaque alpha byte: alpha is reported separately.
    #[inline]
    pub fn read(self, px: &[u8]) -> Color {
        let full = match self {
            ColorDepth::Rgb332 => px[0] as u32,
            ColorDepth::Rgb565 => u16::from_le_bytes([px[0], px[1]]) as u32,
            ColorDepth::Argb8888 => {
                u32::from_le_bytes([px[0], px[1], px[2], px[3]]) | 0xFF00_0000
            }
        };
        Color::from_full(full)
    }

    /// Encode the color part of a pixel. The ARGB8888 alpha byte is left
    /// as written by the color (opaque) and may be overwritten afterwards.
    pub fn write(self, c: Color, px: &mut [u8]) {
        match self {
            ColorDepth::Rgb332 => px[0] = c.full as u8,
            ColorDepth::Rgb565 => px[..2].copy_from_slice(&(c.full as u16).to_le_bytes()),
            ColorDepth::Argb8888 => px[..4].copy_from_slice(&c.full.to_le_bytes()),
        }
    }
}

/// Replicate the top bits of a `bits`-wide channel down to 8 bits.
#[inline]
fn expand(v: u32, bits: u32) -> u8 {
    let bits = bits as i32;
    let mut out = 0u32;
    let mut shift = 8 - bits;
    while shift > -bits {
        out |= if shift >= 0 { v << shift } else { v >> -shift };
        shift -= bits;
    }
    out as u8
}

// ============================================================================
// Tests
// ============================================================================
