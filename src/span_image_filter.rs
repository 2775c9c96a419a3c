//! Image span samplers.
//!
//! Each sampler fills one destination row: a color and an alpha value per
//! pixel, reading the source at the coordinates of a [`RowSpan`].
//!
//! - [`SpanRgbNn`]: nearest neighbor, source without alpha
//! - [`SpanArgbNn`]: nearest neighbor, source with alpha
//! - [`SpanAa`]: directional two-tap blend with edge feathering, both kinds
//!
//! Samples whose integer position falls outside the source get alpha 0 and
//! leave their color untouched.

use crate::basics::{Opa, OPA_50, OPA_COVER, OPA_TRANSP, SUBPIXEL_MASK, SUBPIXEL_SHIFT};
use crate::color::{Color, Rgba8};
use crate::pixfmt::PixelCodec;
use crate::rendering_buffer::SourceImage;
use crate::span_interpolator::RowSpan;

/// A generator of destination rows.
pub trait SpanSampler {
    /// Fill `colors` and `alphas` (same length) for the row described by
    /// `span`.
    fn generate(&self, span: &RowSpan, colors: &mut [Color], alphas: &mut [Opa]);
}

// ============================================================================
// SpanRgbNn: nearest neighbor, no alpha channel
// ============================================================================

/// Nearest-neighbor sampler for sources without alpha.
///
/// The alpha row is filled opaque first; only samples outside the source
/// are cleared.
pub struct SpanRgbNn<'a> {
    source: &'a SourceImage<'a>,
    codec: PixelCodec,
}

impl<'a> SpanRgbNn<'a> {
    pub fn new(source: &'a SourceImage<'a>) -> Self {
        Self {
            source,
            codec: source.format().codec(),
        }
    }
}

impl SpanSampler for SpanRgbNn<'_> {
    fn generate(&self, span: &RowSpan, colors: &mut [Color], alphas: &mut [Opa]) {
        let len = colors.len().min(alphas.len());
        alphas[..len].fill(OPA_COVER);

        for (x, (color, alpha)) in colors.iter_mut().zip(alphas.iter_mut()).enumerate() {
            let (xs_ups, ys_ups) = span.coordinates(x as i32);
            let xs_int = xs_ups >> SUBPIXEL_SHIFT;
            let ys_int = ys_ups >> SUBPIXEL_SHIFT;

            if !self.source.contains(xs_int, ys_int) {
                *alpha = OPA_TRANSP;
            } else {
                *color = self.codec.color(self.source.pixel(xs_int, ys_int));
            }
        }
    }
}

// ============================================================================
// SpanArgbNn: nearest neighbor with alpha channel
// ============================================================================

/// Nearest-neighbor sampler copying color and alpha verbatim.
pub struct SpanArgbNn<'a> {
    source: &'a SourceImage<'a>,
    codec: PixelCodec,
}

impl<'a> SpanArgbNn<'a> {
    pub fn new(source: &'a SourceImage<'a>) -> Self {
        Self {
            source,
            codec: source.format().codec(),
        }
    }
}

impl SpanSampler for SpanArgbNn<'_> {
    fn generate(&self, span: &RowSpan, colors: &mut [Color], alphas: &mut [Opa]) {
        for (x, (color, alpha)) in colors.iter_mut().zip(alphas.iter_mut()).enumerate() {
            let (xs_ups, ys_ups) = span.coordinates(x as i32);
            let xs_int = xs_ups >> SUBPIXEL_SHIFT;
            let ys_int = ys_ups >> SUBPIXEL_SHIFT;

            if !self.source.contains(xs_int, ys_int) {
                *alpha = OPA_TRANSP;
            } else {
                let px = self.source.pixel(xs_int, ys_int);
                *color = self.codec.color(px);
                *alpha = self.codec.alpha(px);
            }
        }
    }
}

// ============================================================================
// SpanAa: directional two-tap blend
// ============================================================================

/// Pick the neighbor on the side of the pixel center the sample falls on.
///
/// Returns the direction (-1 or +1) and the distance toward that neighbor
/// remapped to `0..=254`: 0 on the pixel center, 254 next to the neighbor.
#[inline]
fn directional_neighbor(fract: i32) -> (i32, i32) {
    if fract < 0x80 {
        (-1, (0x7F - fract) * 2)
    } else {
        (1, (fract - 0x80) * 2)
    }
}

/// Blend `a` toward `base` by `fract` / 256, skipping the no-op case.
#[inline]
fn blend_alpha(a: Opa, base: Opa, fract: i32) -> Opa {
    if a == base {
        return base;
    }
    ((a as i32 * fract + base as i32 * (0x100 - fract)) >> 8) as Opa
}

/// Anti-aliased sampler.
///
/// Every sample mixes its base pixel with one horizontal and one vertical
/// neighbor: each neighbor is blended toward the base by its distance, and
/// the two partial results are averaged. When a neighbor lies outside the
/// source, the base color is kept and alpha fades toward that edge.
pub struct SpanAa<'a> {
    source: &'a SourceImage<'a>,
    codec: PixelCodec,
}

impl<'a> SpanAa<'a> {
    pub fn new(source: &'a SourceImage<'a>) -> Self {
        Self {
            source,
            codec: source.format().codec(),
        }
    }

    /// Feathered alpha for a sample whose neighbor is outside the source.
    fn edge_alpha(
        &self,
        a: Opa,
        xs_int: i32,
        ys_int: i32,
        next: (i32, i32),
        fract: (i32, i32),
    ) -> Opa {
        let (x_next, y_next) = next;
        let (xs_fract, ys_fract) = fract;
        let w = self.source.width();
        let h = self.source.height();

        if (xs_int == 0 && x_next < 0) || (xs_int == w - 1 && x_next > 0) {
            Rgba8::multiply(a, (0xFF - xs_fract) as u8)
        } else if (ys_int == 0 && y_next < 0) || (ys_int == h - 1 && y_next > 0) {
            Rgba8::multiply(a, (0xFF - ys_fract) as u8)
        } else {
            OPA_TRANSP
        }
    }
}

impl SpanSampler for SpanAa<'_> {
    fn generate(&self, span: &RowSpan, colors: &mut [Color], alphas: &mut [Opa]) {
        let codec = &self.codec;
        let src = self.source;

        for (x, (color, alpha)) in colors.iter_mut().zip(alphas.iter_mut()).enumerate() {
            let (xs_ups, ys_ups) = span.coordinates(x as i32);
            let xs_int = xs_ups >> SUBPIXEL_SHIFT;
            let ys_int = ys_ups >> SUBPIXEL_SHIFT;

            // Fully out of the image
            if !src.contains(xs_int, ys_int) {
                *alpha = OPA_TRANSP;
                continue;
            }

            let (x_next, xs_fract) = directional_neighbor(xs_ups & SUBPIXEL_MASK);
            let (y_next, ys_fract) = directional_neighbor(ys_ups & SUBPIXEL_MASK);
            let px_base = src.pixel(xs_int, ys_int);

            if !src.contains(xs_int + x_next, ys_int + y_next) {
                *color = codec.color(px_base);
                *alpha = self.edge_alpha(
                    codec.alpha(px_base),
                    xs_int,
                    ys_int,
                    (x_next, y_next),
                    (xs_fract, ys_fract),
                );
                continue;
            }

            let px_hor = src.pixel(xs_int + x_next, ys_int);
            let px_ver = src.pixel(xs_int, ys_int + y_next);

            if codec.has_alpha() {
                let a_base = codec.alpha(px_base);
                let a_ver = blend_alpha(codec.alpha(px_ver), a_base, ys_fract);
                let a_hor = blend_alpha(codec.alpha(px_hor), a_base, xs_fract);
                *alpha = ((a_ver as u32 + a_hor as u32) >> 1) as Opa;
                if *alpha == OPA_TRANSP {
                    continue;
                }
            } else {
                *alpha = OPA_COVER;
            }

            let c_base = codec.color(px_base);
            let c_ver = codec.color(px_ver);
            let c_hor = codec.color(px_hor);

            *color = if c_base == c_ver && c_base == c_hor {
                c_base
            } else {
                let c_ver = codec.mix(c_ver, c_base, ys_fract as u8);
                let c_hor = codec.mix(c_hor, c_base, xs_fract as u8);
                codec.mix(c_hor, c_ver, OPA_50)
            };
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::basics::SUBPIXEL_SCALE;
    use crate::color::ColorDepth;
    use crate::pixfmt::PixelFormat;

    fn make_image(format: PixelFormat, w: u32, h: u32, pixels: &[Rgba8]) -> Vec<u8> {
        let bpp = format.bytes_per_pixel();
        let mut buf = vec![0u8; w as usize * h as usize * bpp];
        for (i, c) in pixels.iter().enumerate() {
            format.write_pixel(&mut buf[i * bpp..], *c);
        }
        buf
    }

    /// Span walking one source pixel per destination pixel from `(x, y)`,
    /// given in upscaled units.
    fn unit_span(xs_ups: i32, ys_ups: i32) -> RowSpan {
        RowSpan {
            xs_ups,
            ys_ups,
            xs_step: SUBPIXEL_SCALE * SUBPIXEL_SCALE,
            ys_step: 0,
        }
    }

    const RED: Rgba8 = Rgba8::new_opaque(255, 0, 0);
    const GREEN: Rgba8 = Rgba8::new_opaque(0, 255, 0);
    const BLUE: Rgba8 = Rgba8::new_opaque(0, 0, 255);
    const WHITE: Rgba8 = Rgba8::new_opaque(255, 255, 255);

    #[test]
    fn test_rgb_nn_copies_and_clears_outside() {
        let f = PixelFormat::RGB565;
        let buf = make_image(f, 2, 1, &[RED, GREEN]);
        let img = SourceImage::packed(&buf, 2, 1, f).unwrap();
        let sampler = SpanRgbNn::new(&img);

        let mut colors = [Color::default(); 4];
        let mut alphas = [0u8; 4];
        // Start one pixel left of the image.
        sampler.generate(&unit_span(-256 + 128, 128), &mut colors, &mut alphas);

        assert_eq!(alphas, [0, 255, 255, 0]);
        assert_eq!(ColorDepth::Rgb565.unpack(colors[1]), RED);
        assert_eq!(ColorDepth::Rgb565.unpack(colors[2]), GREEN);
    }

    #[test]
    fn test_rgb_nn_overwrites_alpha_row() {
        let f = PixelFormat::XRGB8888;
        let buf = make_image(f, 1, 1, &[BLUE]);
        let img = SourceImage::packed(&buf, 1, 1, f).unwrap();
        let mut colors = [Color::default(); 2];
        let mut alphas = [7u8; 2];
        SpanRgbNn::new(&img).generate(&unit_span(128, 128), &mut colors, &mut alphas);
        assert_eq!(alphas, [255, 0]);
    }

    #[test]
    fn test_argb_nn_copies_alpha() {
        let f = PixelFormat::RGB565A8;
        let pixels = [Rgba8::with_opacity(&RED, 200), Rgba8::with_opacity(&BLUE, 10)];
        let buf = make_image(f, 2, 1, &pixels);
        let img = SourceImage::packed(&buf, 2, 1, f).unwrap();
        let mut colors = [Color::default(); 3];
        let mut alphas = [99u8; 3];
        SpanArgbNn::new(&img).generate(&unit_span(128, 128), &mut colors, &mut alphas);
        assert_eq!(alphas, [200, 10, 0]);
        assert_eq!(ColorDepth::Rgb565.unpack(colors[0]), RED);
        assert_eq!(ColorDepth::Rgb565.unpack(colors[1]), BLUE);
    }

    #[test]
    fn test_nn_negative_coordinates_floor() {
        // -1/256 of a pixel left of the image is outside, not pixel 0.
        let f = PixelFormat::ARGB8888;
        let buf = make_image(f, 1, 1, &[WHITE]);
        let img = SourceImage::packed(&buf, 1, 1, f).unwrap();
        let mut colors = [Color::default(); 1];
        let mut alphas = [0u8; 1];
        SpanArgbNn::new(&img).generate(&unit_span(-1, 128), &mut colors, &mut alphas);
        assert_eq!(alphas[0], 0);
    }

    #[test]
    fn test_directional_neighbor() {
        assert_eq!(directional_neighbor(0x80), (1, 0));
        assert_eq!(directional_neighbor(0x7F), (-1, 0));
        assert_eq!(directional_neighbor(0x00), (-1, 254));
        assert_eq!(directional_neighbor(0xFF), (1, 254));
        assert_eq!(directional_neighbor(0xC0), (1, 128));
    }

    #[test]
    fn test_blend_alpha() {
        assert_eq!(blend_alpha(40, 40, 200), 40);
        assert_eq!(blend_alpha(0, 200, 0), 200);
        assert_eq!(blend_alpha(255, 0, 128), 127);
    }

    #[test]
    fn test_aa_centers_reproduce_source() {
        let f = PixelFormat::ARGB8888;
        let pixels = [
            Rgba8::new(255, 0, 0, 255),
            Rgba8::new(0, 255, 0, 128),
            Rgba8::new(0, 0, 255, 64),
            Rgba8::new(10, 20, 30, 255),
            Rgba8::new(90, 90, 90, 0),
            Rgba8::new(200, 100, 50, 255),
        ];
        let buf = make_image(f, 3, 2, &pixels);
        let img = SourceImage::packed(&buf, 3, 2, f).unwrap();
        let sampler = SpanAa::new(&img);

        for y in 0..2 {
            let mut colors = [Color::default(); 3];
            let mut alphas = [0u8; 3];
            sampler.generate(&unit_span(128, y * 256 + 128), &mut colors, &mut alphas);
            for x in 0..3 {
                let src = pixels[(y * 3 + x) as usize];
                assert_eq!(alphas[x as usize], src.a, "alpha at ({}, {})", x, y);
                if src.a != 0 {
                    assert_eq!(
                        ColorDepth::Argb8888.unpack(colors[x as usize]),
                        src.opaque(),
                        "color at ({}, {})",
                        x,
                        y
                    );
                }
            }
        }
    }

    #[test]
    fn test_aa_blends_toward_neighbors() {
        // Sample 3/4 of the way to the right neighbor on the top-left
        // pixel of a 2x2 black/white checker.
        let f = PixelFormat::XRGB8888;
        let black = Rgba8::new_opaque(0, 0, 0);
        let buf = make_image(f, 2, 2, &[black, WHITE, WHITE, black]);
        let img = SourceImage::packed(&buf, 2, 2, f).unwrap();
        let mut colors = [Color::default(); 1];
        let mut alphas = [0u8; 1];
        SpanAa::new(&img).generate(&unit_span(0xC0, 0x80), &mut colors, &mut alphas);

        assert_eq!(alphas[0], 255);
        let c = ColorDepth::Argb8888.unpack(colors[0]);
        // horizontal: white at 128/255, vertical: white at 0 -> averaged
        assert!(c.r > 55 && c.r < 70, "r={}", c.r);
        assert_eq!(c.r, c.g);
        assert_eq!(c.g, c.b);
    }

    #[test]
    #[allow(arithmetic_overflow)]
    fn test_aa_blends_alpha_and_color_off_center() {
        // base red @ 200, right neighbor green @ 100, lower neighbor blue @ 40
        let f = PixelFormat::ARGB8888;
        let pixels = [
            Rgba8::new(255, 0, 0, 200),
            Rgba8::new(0, 255, 0, 100),
            Rgba8::new(0, 0, 255, 40),
            Rgba8::new(255, 255, 255, 0),
        ];
        let buf = make_image(f, 2, 2, &pixels);
        let img = SourceImage::packed(&buf, 2, 2, f).unwrap();
        let mut colors = [Color::default(); 1];
        let mut alphas = [0u8; 1];
        // x fraction 0xC0 -> right neighbor at 128, y fraction 0xA0 -> lower at 64
        SpanAa::new(&img).generate(&unit_span(0xC0, 0xA0), &mut colors, &mut alphas);

        // vertical: (40 * 64 + 200 * 192) >> 8 = 160
        // horizontal: (100 * 128 + 200 * 128) >> 8 = 150
        assert_eq!(alphas[0], (160 + 150) >> 1);

        // vertical mix (191, 0, 64), horizontal mix (127, 128, 0), then
        // horizontal * 127 + vertical * 128 over 255
        assert_eq!(
            ColorDepth::Argb8888.unpack(colors[0]),
            Rgba8::new_opaque(159, 63, 32)
        );
    }

    #[test]
    fn test_aa_transparent_sample_keeps_color() {
        let f = PixelFormat::ARGB8888;
        let clear = Rgba8::new(255, 255, 255, 0);
        let buf = make_image(f, 2, 2, &[clear; 4]);
        let img = SourceImage::packed(&buf, 2, 2, f).unwrap();
        let sentinel = Color::from_full(0x1234_5678);
        let mut colors = [sentinel; 1];
        let mut alphas = [0xAAu8; 1];
        SpanAa::new(&img).generate(&unit_span(0x90, 0x90), &mut colors, &mut alphas);
        assert_eq!(alphas[0], 0);
        assert_eq!(colors[0], sentinel);
    }

    #[test]
    fn test_aa_rgb_is_opaque_inside() {
        let f = PixelFormat::RGB332;
        let pixels = [RED, GREEN, BLUE, WHITE, RED, GREEN, BLUE, WHITE, RED];
        let buf = make_image(f, 3, 3, &pixels);
        let img = SourceImage::packed(&buf, 3, 3, f).unwrap();
        let mut colors = [Color::default(); 1];
        let mut alphas = [0u8; 1];
        for (xs, ys) in [(0x100 + 0x10, 0x100 + 0xF0), (0x1A0, 0x150), (0x180, 0x180)] {
            SpanAa::new(&img).generate(&unit_span(xs, ys), &mut colors, &mut alphas);
            assert_eq!(alphas[0], 255);
        }
    }

    #[test]
    fn test_aa_feathers_left_edge_monotonically() {
        let f = PixelFormat::ARGB8888;
        let buf = make_image(f, 3, 3, &[WHITE; 9]);
        let img = SourceImage::packed(&buf, 3, 3, f).unwrap();
        let sampler = SpanAa::new(&img);

        let mut last = 255u8;
        // Walk from the center of pixel 0 toward its left edge.
        for xs in (0..=0x80).rev() {
            let mut colors = [Color::default(); 1];
            let mut alphas = [0u8; 1];
            sampler.generate(&unit_span(xs, 256 + 128), &mut colors, &mut alphas);
            assert!(alphas[0] <= last, "alpha rose at xs={}", xs);
            assert_eq!(ColorDepth::Argb8888.unpack(colors[0]), WHITE);
            last = alphas[0];
        }
        assert!(last <= 1, "alpha at the edge = {}", last);
    }

    #[test]
    fn test_aa_feathers_bottom_edge() {
        let f = PixelFormat::RGB565;
        let buf = make_image(f, 2, 2, &[WHITE; 4]);
        let img = SourceImage::packed(&buf, 2, 2, f).unwrap();
        let mut colors = [Color::default(); 1];
        let mut alphas = [0u8; 1];
        // Horizontal neighbor exists, the vertical one (below row 1) does not.
        SpanAa::new(&img).generate(&unit_span(0x80, 0x1C0), &mut colors, &mut alphas);
        assert_eq!(alphas[0], Rgba8::multiply(255, 255 - 128));
    }
}
