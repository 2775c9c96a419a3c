//! Transformed image rendering.
//!
//! The driver ties the pipeline together: build the transform descriptor
//! from a [`DrawDescriptor`], pick a sampler for the source format and the
//! antialias flag, then fill the destination rows one after another.
//!
//! ```text
//!   DrawDescriptor -> TransformDescriptor
//!   per row: transform endpoints -> RowSpan -> sampler -> color/alpha row
//! ```
//!
//! Rows are independent of each other; [`DrawTransform::render_row`] can be
//! called for any row in any order.

use crate::basics::{Area, Opa, Point, ZOOM_NONE};
use crate::color::Color;
use crate::error::{Error, Result};
use crate::pixfmt::PixelFormat;
use crate::rendering_buffer::SourceImage;
use crate::span_image_filter::{SpanAa, SpanArgbNn, SpanRgbNn, SpanSampler};
use crate::span_interpolator::{RowSpan, SpanInterpolatorRotozoom};
use crate::trans_rotozoom::TransformDescriptor;
use crate::trigo::TrigSource;

// ============================================================================
// DrawDescriptor
// ============================================================================

/// How the source image is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrawDescriptor {
    /// Rotation in tenths of a degree, clockwise on screen.
    pub angle: i32,
    /// Zoom factor with 8 fractional bits; [`ZOOM_NONE`] (256) is 1.0.
    /// Must not be 0.
    pub zoom: i32,
    /// Rotation and zoom center, in source image coordinates.
    pub pivot: Point,
    pub antialias: bool,
}

impl DrawDescriptor {
    pub fn new() -> Self {
        Self {
            angle: 0,
            zoom: ZOOM_NONE,
            pivot: Point::default(),
            antialias: true,
        }
    }

    pub fn with_angle(mut self, angle: i32) -> Self {
        self.angle = angle;
        self
    }

    pub fn with_zoom(mut self, zoom: i32) -> Self {
        self.zoom = zoom;
        self
    }

    pub fn with_pivot(mut self, pivot: Point) -> Self {
        self.pivot = pivot;
        self
    }

    pub fn with_antialias(mut self, antialias: bool) -> Self {
        self.antialias = antialias;
        self
    }
}

impl Default for DrawDescriptor {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Sampler dispatch
// ============================================================================

/// The sampler picked for one draw call.
enum RowSampler<'a> {
    RgbNn(SpanRgbNn<'a>),
    ArgbNn(SpanArgbNn<'a>),
    Aa(SpanAa<'a>),
}

impl<'a> RowSampler<'a> {
    fn select(source: &'a SourceImage<'a>, antialias: bool) -> Self {
        match (antialias, source.format().has_alpha) {
            (true, _) => RowSampler::Aa(SpanAa::new(source)),
            (false, true) => RowSampler::ArgbNn(SpanArgbNn::new(source)),
            (false, false) => RowSampler::RgbNn(SpanRgbNn::new(source)),
        }
    }

    fn name(&self) -> &'static str {
        match self {
            RowSampler::RgbNn(_) => "rgb-nn",
            RowSampler::ArgbNn(_) => "argb-nn",
            RowSampler::Aa(_) => "aa",
        }
    }
}

impl SpanSampler for RowSampler<'_> {
    #[inline]
    fn generate(&self, span: &RowSpan, colors: &mut [Color], alphas: &mut [Opa]) {
        match self {
            RowSampler::RgbNn(s) => s.generate(span, colors, alphas),
            RowSampler::ArgbNn(s) => s.generate(span, colors, alphas),
            RowSampler::Aa(s) => s.generate(span, colors, alphas),
        }
    }
}

// ============================================================================
// DrawTransform
// ============================================================================

/// A source image prepared for drawing into one destination area.
pub struct DrawTransform<'a> {
    interp: SpanInterpolatorRotozoom,
    sampler: RowSampler<'a>,
    format: PixelFormat,
}

impl<'a> DrawTransform<'a> {
    /// Prepare drawing `source` into `area` (given in source image
    /// coordinates).
    ///
    /// # Panics
    /// If `draw.zoom` is 0.
    pub fn new<T: TrigSource + ?Sized>(
        area: Area,
        source: &'a SourceImage<'a>,
        draw: &DrawDescriptor,
        trig: &T,
    ) -> Self {
        // The descriptor maps destination to source: rotate the other way.
        let trans =
            TransformDescriptor::new(draw.angle.wrapping_neg(), draw.zoom, draw.pivot, trig);
        Self {
            interp: SpanInterpolatorRotozoom::new(trans, area),
            sampler: RowSampler::select(source, draw.antialias),
            format: source.format(),
        }
    }

    pub fn area(&self) -> &Area {
        self.interp.area()
    }

    pub fn descriptor(&self) -> &TransformDescriptor {
        self.interp.transformer()
    }

    /// Render destination row `y` into the first `width` entries of
    /// `colors` and `alphas`.
    pub fn render_row(&self, y: i32, colors: &mut [Color], alphas: &mut [Opa]) -> Result<()> {
        let area = self.area();
        if y < area.y1 || y > area.y2 {
            return Err(Error::RowOutOfArea {
                y,
                y1: area.y1,
                y2: area.y2,
            });
        }
        let (w, _) = area.size();
        check_buffers(w, colors.len(), alphas.len())?;
        self.row(y, &mut colors[..w], &mut alphas[..w]);
        Ok(())
    }

    /// Render the whole area, row after row, into buffers of at least
    /// `width * height` entries.
    pub fn render(&self, colors: &mut [Color], alphas: &mut [Opa]) -> Result<()> {
        let area = *self.area();
        if area.is_empty() {
            log::debug!("transform: empty destination area {:?}", area);
            return Ok(());
        }
        let (w, h) = area.size();
        check_buffers(w.saturating_mul(h), colors.len(), alphas.len())?;

        log::trace!(
            "transform: area={:?} mode={:?} format={:?} sampler={} {}x{}",
            area,
            self.descriptor().mode(),
            self.format,
            self.sampler.name(),
            w,
            h
        );

        let rows = colors.chunks_exact_mut(w).zip(alphas.chunks_exact_mut(w));
        for (y, (color_row, alpha_row)) in (area.y1..=area.y2).zip(rows) {
            self.row(y, color_row, alpha_row);
        }
        Ok(())
    }

    #[inline]
    fn row(&self, y: i32, colors: &mut [Color], alphas: &mut [Opa]) {
        let span = self.interp.begin(y);
        self.sampler.generate(&span, colors, alphas);
    }
}

fn check_buffers(expected: usize, colors: usize, alphas: usize) -> Result<()> {
    if colors < expected {
        return Err(Error::ColorBufferTooSmall {
            expected,
            actual: colors,
        });
    }
    if alphas < expected {
        return Err(Error::AlphaBufferTooSmall {
            expected,
            actual: alphas,
        });
    }
    Ok(())
}

/// Draw `source` rotated and zoomed per `draw` into `area`.
///
/// `out_color` and `out_alpha` receive `area.width() * area.height()`
/// entries, row by row. Pixels whose sample falls outside the source get
/// alpha 0.
///
/// # Panics
/// If `draw.zoom` is 0.
pub fn transform_blit<T: TrigSource + ?Sized>(
    area: &Area,
    source: &SourceImage<'_>,
    draw: &DrawDescriptor,
    trig: &T,
    out_color: &mut [Color],
    out_alpha: &mut [Opa],
) -> Result<()> {
    DrawTransform::new(*area, source, draw, trig).render(out_color, out_alpha)
}

// ============================================================================
// Tests
// ============================================================================
