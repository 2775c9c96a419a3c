//! Row span interpolation.
//!
//! Like a linear span interpolator, only the two endpoints of a destination
//! row are transformed; the pixels in between are reached by a fixed step.
//! The step carries 8 extra fractional bits on top of the upscaled
//! coordinates, so pixel `x` of the row samples at
//! `start + ((step * x) >> 8)`.

use crate::basics::{Area, SUBPIXEL_SCALE, SUBPIXEL_SHIFT};
use crate::trans_rotozoom::TransformDescriptor;

/// Start point and per-pixel step of one destination row in upscaled
/// source coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RowSpan {
    /// Upscaled source x of the first pixel's center.
    pub xs_ups: i32,
    /// Upscaled source y of the first pixel's center.
    pub ys_ups: i32,
    /// Source x step per destination pixel, upscaled by 256 * 256.
    pub xs_step: i32,
    /// Source y step per destination pixel, upscaled by 256 * 256.
    pub ys_step: i32,
}

impl RowSpan {
    /// Upscaled source coordinates of pixel `x` of the row.
    #[inline]
    pub fn coordinates(&self, x: i32) -> (i32, i32) {
        (
            self.xs_ups
                .wrapping_add(self.xs_step.wrapping_mul(x) >> SUBPIXEL_SHIFT),
            self.ys_ups
                .wrapping_add(self.ys_step.wrapping_mul(x) >> SUBPIXEL_SHIFT),
        )
    }
}

/// Produces a [`RowSpan`] for every row of a destination area.
#[derive(Debug, Clone, Copy)]
pub struct SpanInterpolatorRotozoom {
    trans: TransformDescriptor,
    area: Area,
    center_x: i32,
    center_y: i32,
}

impl SpanInterpolatorRotozoom {
    pub fn new(trans: TransformDescriptor, area: Area) -> Self {
        // Half a destination pixel in both directions, in source space.
        let (x0, y0) = trans.transform_upscaled(area.x1, area.y1);
        let (xr, yr) = trans.transform_upscaled(area.x1.wrapping_add(1), area.y1);
        let (xc, yc) = trans.transform_upscaled(area.x1, area.y1.wrapping_add(1));
        let center_x = xr.wrapping_sub(x0).wrapping_add(xc.wrapping_sub(x0)) / 2;
        let center_y = yr.wrapping_sub(y0).wrapping_add(yc.wrapping_sub(y0)) / 2;
        Self {
            trans,
            area,
            center_x,
            center_y,
        }
    }

    pub fn transformer(&self) -> &TransformDescriptor {
        &self.trans
    }

    pub fn area(&self) -> &Area {
        &self.area
    }

    /// Offset from a pixel's corner to its center, upscaled.
    pub fn center(&self) -> (i32, i32) {
        (self.center_x, self.center_y)
    }

    /// Span of destination row `y`.
    pub fn begin(&self, y: i32) -> RowSpan {
        // width - 1; zero for a single column
        let last = self.area.width().wrapping_sub(1);
        let (xs1, ys1) = self.trans.transform_upscaled(self.area.x1, y);
        let (xs2, ys2) = self.trans.transform_upscaled(self.area.x2, y);

        let (xs_step, ys_step) = if last != 0 {
            (
                SUBPIXEL_SCALE
                    .wrapping_mul(xs2.wrapping_sub(xs1))
                    .wrapping_div(last),
                SUBPIXEL_SCALE
                    .wrapping_mul(ys2.wrapping_sub(ys1))
                    .wrapping_div(last),
            )
        } else {
            (0, 0)
        };

        RowSpan {
            xs_ups: xs1.wrapping_add(self.center_x),
            ys_ups: ys1.wrapping_add(self.center_y),
            xs_step,
            ys_step,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
