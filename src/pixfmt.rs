//! Source pixel formats.
//!
//! A [`PixelFormat`] is a runtime value: a native [`ColorDepth`] plus an
//! optional alpha byte. Before sampling it is resolved once into a
//! [`PixelCodec`] holding the byte layout and the decode/mix functions, so
//! the per-pixel loops never branch on the format.
//!
//! Layouts:
//!
//! ```text
//!   RGB332      [c]           RGB332A8  [c, a]
//!   RGB565      [lo, hi]      RGB565A8  [lo, hi, a]
//!   XRGB8888    [b, g, r, x]  ARGB8888  [b, g, r, a]
//! ```

use crate::basics::{Opa, OPA_COVER};
use crate::color::{Color, ColorDepth, Rgba8};

/// Pixel format of a source image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PixelFormat {
    pub depth: ColorDepth,
    pub has_alpha: bool,
}

impl PixelFormat {
    pub const RGB332: Self = Self::new(ColorDepth::Rgb332, false);
    pub const RGB332A8: Self = Self::new(ColorDepth::Rgb332, true);
    pub const RGB565: Self = Self::new(ColorDepth::Rgb565, false);
    pub const RGB565A8: Self = Self::new(ColorDepth::Rgb565, true);
    pub const XRGB8888: Self = Self::new(ColorDepth::Argb8888, false);
    pub const ARGB8888: Self = Self::new(ColorDepth::Argb8888, true);

    pub const fn new(depth: ColorDepth, has_alpha: bool) -> Self {
        Self { depth, has_alpha }
    }

    /// Bytes per pixel. 32-bit colors keep alpha in their fourth byte; the
    /// narrower depths append a separate alpha byte.
    pub const fn bytes_per_pixel(self) -> usize {
        match (self.depth, self.has_alpha) {
            (ColorDepth::Argb8888, _) | (_, false) => self.depth.bytes(),
            (_, true) => self.depth.bytes() + 1,
        }
    }

    /// Byte offset of the alpha channel within a pixel.
    pub const fn alpha_offset(self) -> Option<usize> {
        if self.has_alpha {
            Some(self.bytes_per_pixel() - 1)
        } else {
            None
        }
    }

    /// Resolve the layout and functions used by the samplers.
    pub fn codec(self) -> PixelCodec {
        PixelCodec {
            format: self,
            alpha_offset: self.alpha_offset(),
            read_color: match self.depth {
                ColorDepth::Rgb332 => read_rgb332,
                ColorDepth::Rgb565 => read_rgb565,
                ColorDepth::Argb8888 => read_argb8888,
            },
            mix: match self.depth {
                ColorDepth::Rgb332 => mix_rgb332,
                ColorDepth::Rgb565 => mix_rgb565,
                ColorDepth::Argb8888 => mix_argb8888,
            },
        }
    }

    /// Encode one pixel. Alpha is dropped for formats without an alpha
    /// channel.
    pub fn write_pixel(self, px: &mut [u8], c: Rgba8) {
        self.depth.write(self.depth.pack(c), px);
        if let Some(off) = self.alpha_offset() {
            px[off] = c.a;
        }
    }

    /// Decode one pixel. Formats without alpha report it as opaque.
    pub fn read_pixel(self, px: &[u8]) -> Rgba8 {
        let c = self.depth.unpack(self.depth.read(px));
        match self.alpha_offset() {
            Some(off) => Rgba8::with_opacity(&c, px[off]),
            None => c,
        }
    }
}

fn read_rgb332(px: &[u8]) -> Color {
    ColorDepth::Rgb332.read(px)
}

fn read_rgb565(px: &[u8]) -> Color {
    ColorDepth::Rgb565.read(px)
}

fn read_argb8888(px: &[u8]) -> Color {
    ColorDepth::Argb8888.read(px)
}

fn mix_rgb332(c1: Color, c2: Color, mix: u8) -> Color {
    ColorDepth::Rgb332.mix(c1, c2, mix)
}

fn mix_rgb565(c1: Color, c2: Color, mix: u8) -> Color {
    ColorDepth::Rgb565.mix(c1, c2, mix)
}

fn mix_argb8888(c1: Color, c2: Color, mix: u8) -> Color {
    ColorDepth::Argb8888.mix(c1, c2, mix)
}

// ============================================================================
// PixelCodec
// ============================================================================

/// A [`PixelFormat`] resolved for sampling.
#[derive(Clone, Copy)]
pub struct PixelCodec {
    format: PixelFormat,
    alpha_offset: Option<usize>,
    read_color: fn(&[u8]) -> Color,
    mix: fn(Color, Color, u8) -> Color,
}

impl PixelCodec {
    #[inline]
    pub fn has_alpha(&self) -> bool {
        self.alpha_offset.is_some()
    }

    /// Color part of the pixel starting at `px[0]`.
    #[inline]
    pub fn color(&self, px: &[u8]) -> Color {
        (self.read_color)(px)
    }

    /// Alpha of the pixel starting at `px[0]`; opaque without an alpha channel.
    #[inline]
    pub fn alpha(&self, px: &[u8]) -> Opa {
        match self.alpha_offset {
            Some(off) => px[off],
            None => OPA_COVER,
        }
    }

    /// `c1 * mix + c2 * (255 - mix)` in the native depth.
    #[inline]
    pub fn mix(&self, c1: Color, c2: Color, mix: u8) -> Color {
        (self.mix)(c1, c2, mix)
    }
}

impl core::fmt::Debug for PixelCodec {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PixelCodec")
            .field("format", &self.format)
            .field("alpha_offset", &self.alpha_offset)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bytes_per_pixel() {
        assert_eq!(PixelFormat::RGB332.bytes_per_pixel(), 1);
        assert_eq!(PixelFormat::RGB332A8.bytes_per_pixel(), 2);
        assert_eq!(PixelFormat::RGB565.bytes_per_pixel(), 2);
        assert_eq!(PixelFormat::RGB565A8.bytes_per_pixel(), 3);
        assert_eq!(PixelFormat::XRGB8888.bytes_per_pixel(), 4);
        assert_eq!(PixelFormat::ARGB8888.bytes_per_pixel(), 4);
    }

    #[test]
    fn test_alpha_offset() {
        assert_eq!(PixelFormat::RGB565.alpha_offset(), None);
        assert_eq!(PixelFormat::RGB565A8.alpha_offset(), Some(2));
        assert_eq!(PixelFormat::ARGB8888.alpha_offset(), Some(3));
        assert_eq!(PixelFormat::RGB332A8.alpha_offset(), Some(1));
    }

    #[test]
    fn test_write_read_argb8888() {
        let f = PixelFormat::ARGB8888;
        let mut px = [0u8; 4];
        f.write_pixel(&mut px, Rgba8::new(10, 20, 30, 128));
        assert_eq!(px, [30, 20, 10, 128]);
        assert_eq!(f.read_pixel(&px), Rgba8::new(10, 20, 30, 128));
    }

    #[test]
    fn test_write_drops_alpha_without_channel() {
        let f = PixelFormat::RGB565;
        let mut px = [0u8; 2];
        f.write_pixel(&mut px, Rgba8::new(255, 0, 0, 10));
        assert_eq!(f.read_pixel(&px), Rgba8::new_opaque(255, 0, 0));
    }

    #[test]
    fn test_codec_alpha() {
        let codec = PixelFormat::RGB565A8.codec();
        assert!(codec.has_alpha());
        assert_eq!(codec.alpha(&[0, 0, 77]), 77);
        let codec = PixelFormat::XRGB8888.codec();
        assert!(!codec.has_alpha());
        assert_eq!(codec.alpha(&[0, 0, 0, 0]), OPA_COVER);
    }

    #[test]
    fn test_codec_color_matches_depth() {
        let codec = PixelFormat::RGB565A8.codec();
        let px = [0x1F, 0xF8, 0x40];
        assert_eq!(codec.color(&px), Color::from_full(0xF81F));
        let white = Color::from_full(0xFFFF);
        assert_eq!(codec.mix(white, codec.color(&px), 255), white);
    }
}
