//! Fixed-point rotation and zoom around a pivot.
//!
//! [`TransformDescriptor`] maps destination coordinates back into source
//! space. Everything is integer math:
//!
//! - angles are tenths of a degree,
//! - zoom factors have 8 fractional bits (256 = no zoom),
//! - sine/cosine coefficients have 10 fractional bits,
//! - outputs are source coordinates upscaled by 256.
//!
//! The formula is picked once, when the descriptor is built, as one of the
//! four [`TransformMode`]s. The rotate-only path normalises with `>> 2` and
//! the rotate-and-zoom path with `>> 10`; both must stay exactly as they
//! are to reproduce reference output.

use crate::basics::{Point, SUBPIXEL_SHIFT, ZOOM_NONE};
use crate::trigo::{SinTable, TrigSource};

/// Fractional bits of the interpolated sine/cosine coefficients.
pub const COEFF_SHIFT: u32 = 10;

/// Which of the point mapping formulas a descriptor uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransformMode {
    Identity,
    ZoomOnly,
    RotateOnly,
    RotateAndZoom,
}

/// Immutable rotate/zoom transform from destination to source space.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransformDescriptor {
    angle: i32,
    inverse_zoom: i32,
    pivot: Point,
    sin_coeff: i32,
    cos_coeff: i32,
    mode: TransformMode,
}

impl TransformDescriptor {
    /// Build a descriptor for a rotation of `angle` tenths of a degree and a
    /// `zoom` factor (256 = 1.0) around `pivot`.
    ///
    /// `angle` is the destination-to-source rotation; a driver rendering an
    /// image rotated by `a` passes `-a`.
    ///
    /// # Panics
    /// If `zoom` is 0.
    pub fn new<T: TrigSource + ?Sized>(angle: i32, zoom: i32, pivot: Point, trig: &T) -> Self {
        let inverse_zoom = (ZOOM_NONE * ZOOM_NONE) / zoom;

        let angle_low = angle / 10;
        let angle_high = angle_low + 1;
        let angle_rem = angle - angle_low * 10;

        let s1 = trig.sin(angle_low);
        let s2 = trig.sin(angle_high);
        let c1 = trig.sin(angle_low + 90);
        let c2 = trig.sin(angle_high + 90);

        let shift = trig.shift();
        let sin_coeff = to_coeff(interpolate(s1, s2, angle_rem), shift);
        let cos_coeff = to_coeff(interpolate(c1, c2, angle_rem), shift);

        let mode = match (angle == 0, inverse_zoom == ZOOM_NONE) {
            (true, true) => TransformMode::Identity,
            (true, false) => TransformMode::ZoomOnly,
            (false, true) => TransformMode::RotateOnly,
            (false, false) => TransformMode::RotateAndZoom,
        };

        Self {
            angle,
            inverse_zoom,
            pivot,
            sin_coeff,
            cos_coeff,
            mode,
        }
    }

    /// Rotation in tenths of a degree, destination to source.
    pub fn angle(&self) -> i32 {
        self.angle
    }

    /// `65536 / zoom`: how far source coordinates move per destination pixel.
    pub fn inverse_zoom(&self) -> i32 {
        self.inverse_zoom
    }

    pub fn pivot(&self) -> Point {
        self.pivot
    }

    pub fn sin_coeff(&self) -> i32 {
        self.sin_coeff
    }

    pub fn cos_coeff(&self) -> i32 {
        self.cos_coeff
    }

    pub fn mode(&self) -> TransformMode {
        self.mode
    }

    /// Map destination `(x, y)` to source space, upscaled by 256.
    #[inline]
    pub fn transform_upscaled(&self, x: i32, y: i32) -> (i32, i32) {
        match self.mode {
            TransformMode::Identity => self.map_identity(x, y),
            TransformMode::ZoomOnly => self.map_zoom(x, y),
            TransformMode::RotateOnly => self.map_rotate(x, y),
            TransformMode::RotateAndZoom => self.map_rotate_zoom(x, y),
        }
    }

    #[inline]
    fn map_identity(&self, x: i32, y: i32) -> (i32, i32) {
        (x << SUBPIXEL_SHIFT, y << SUBPIXEL_SHIFT)
    }

    #[inline]
    fn map_zoom(&self, x: i32, y: i32) -> (i32, i32) {
        let dx = x.wrapping_sub(self.pivot.x);
        let dy = y.wrapping_sub(self.pivot.y);
        (
            dx.wrapping_mul(self.inverse_zoom)
                .wrapping_add(self.pivot.x << SUBPIXEL_SHIFT),
            dy.wrapping_mul(self.inverse_zoom)
                .wrapping_add(self.pivot.y << SUBPIXEL_SHIFT),
        )
    }

    /// Rotation terms `(cos*dx - sin*dy, sin*dx + cos*dy)` at 10 fractional bits.
    #[inline]
    fn rotate(&self, x: i32, y: i32) -> (i32, i32) {
        let dx = x.wrapping_sub(self.pivot.x);
        let dy = y.wrapping_sub(self.pivot.y);
        (
            self.cos_coeff
                .wrapping_mul(dx)
                .wrapping_sub(self.sin_coeff.wrapping_mul(dy)),
            self.sin_coeff
                .wrapping_mul(dx)
                .wrapping_add(self.cos_coeff.wrapping_mul(dy)),
        )
    }

    #[inline]
    fn map_rotate(&self, x: i32, y: i32) -> (i32, i32) {
        let (rx, ry) = self.rotate(x, y);
        (
            (rx >> 2).wrapping_add(self.pivot.x << SUBPIXEL_SHIFT),
            (ry >> 2).wrapping_add(self.pivot.y << SUBPIXEL_SHIFT),
        )
    }

    #[inline]
    fn map_rotate_zoom(&self, x: i32, y: i32) -> (i32, i32) {
        let (rx, ry) = self.rotate(x, y);
        (
            (rx.wrapping_mul(self.inverse_zoom) >> 10).wrapping_add(self.pivot.x << SUBPIXEL_SHIFT),
            (ry.wrapping_mul(self.inverse_zoom) >> 10).wrapping_add(self.pivot.y << SUBPIXEL_SHIFT),
        )
    }
}

impl Default for TransformDescriptor {
    /// No rotation, no zoom, pivot at the origin, built from [`SinTable`].
    fn default() -> Self {
        Self::new(0, ZOOM_NONE, Point::default(), &SinTable)
    }
}

/// Weighted mean of two whole-degree samples, `rem` tenths past `v1`.
#[inline]
fn interpolate(v1: i32, v2: i32, rem: i32) -> i32 {
    v1.wrapping_mul(10 - rem).wrapping_add(v2.wrapping_mul(rem)) / 10
}

/// Bring a sine value with `shift` fractional bits to [`COEFF_SHIFT`] bits.
#[inline]
fn to_coeff(v: i32, shift: u32) -> i32 {
    if shift >= COEFF_SHIFT {
        v >> (shift - COEFF_SHIFT).min(31)
    } else {
        v.wrapping_shl(COEFF_SHIFT - shift)
    }
}

// ============================================================================
// Tests
// ============================================================================
