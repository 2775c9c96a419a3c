//! Foundation types and constants.
//!
//! Integer geometry (points and inclusive areas), opacity constants and the
//! subpixel precision shared by the transform and the samplers.

// ============================================================================
// Opacity constants
// ============================================================================

/// The type used for alpha / coverage values.
pub type Opa = u8;

pub const OPA_TRANSP: Opa = 0;
pub const OPA_50: Opa = 127;
pub const OPA_COVER: Opa = 255;

// ============================================================================
// Subpixel constants
// ============================================================================

/// Upscaled coordinates carry 8 fractional bits (1/256 pixel).
pub const SUBPIXEL_SHIFT: u32 = 8;
pub const SUBPIXEL_SCALE: i32 = 1 << SUBPIXEL_SHIFT;
pub const SUBPIXEL_MASK: i32 = SUBPIXEL_SCALE - 1;

/// Zoom factor meaning "no zoom" (1.0 with 8 fractional bits).
pub const ZOOM_NONE: i32 = 256;

// ============================================================================
// Point
// ============================================================================

/// Integer point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

// ============================================================================
// Area
// ============================================================================

/// Integer rectangle with inclusive corners: `x1..=x2`, `y1..=y2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Area {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
}

impl Area {
    pub const fn new(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Area of `width` x `height` pixels with its top-left corner at `(x, y)`.
    pub const fn from_size(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self::new(
            x,
            y,
            x.wrapping_add(width).wrapping_sub(1),
            y.wrapping_add(height).wrapping_sub(1),
        )
    }

    /// Number of columns; zero or negative for an empty area. Wraps for
    /// areas wider than `i32::MAX`.
    #[inline]
    pub fn width(&self) -> i32 {
        self.x2.wrapping_sub(self.x1).wrapping_add(1)
    }

    /// Number of rows; zero or negative for an empty area. Wraps like
    /// [`width`](Self::width).
    #[inline]
    pub fn height(&self) -> i32 {
        self.y2.wrapping_sub(self.y1).wrapping_add(1)
    }

    /// Columns and rows as buffer dimensions, `(0, 0)` when empty.
    pub fn size(&self) -> (usize, usize) {
        if self.is_empty() {
            return (0, 0);
        }
        let w = self.x2 as i64 - self.x1 as i64 + 1;
        let h = self.y2 as i64 - self.y1 as i64 + 1;
        (w as usize, h as usize)
    }

    /// Returns `true` if the area covers no pixels.
    pub fn is_empty(&self) -> bool {
        self.x2 < self.x1 || self.y2 < self.y1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_area_size() {
        let a = Area::new(2, 3, 11, 7);
        assert_eq!(a.width(), 10);
        assert_eq!(a.height(), 5);
        assert!(!a.is_empty());
    }

    #[test]
    fn test_area_from_size() {
        let a = Area::from_size(4, 4, 2, 3);
        assert_eq!(a, Area::new(4, 4, 5, 6));
    }

    #[test]
    fn test_area_empty() {
        assert!(Area::new(5, 0, 4, 0).is_empty());
        assert!(Area::from_size(0, 0, 0, 10).is_empty());
        assert!(!Area::new(0, 0, 0, 0).is_empty());
    }

    #[test]
    fn test_area_size_as_dimensions() {
        assert_eq!(Area::new(2, 3, 11, 7).size(), (10, 5));
        assert_eq!(Area::new(5, 0, 4, 0).size(), (0, 0));
        assert_eq!(Area::new(i32::MIN, 0, i32::MAX, 0).size(), (u32::MAX as usize + 1, 1));
    }

    #[test]
    fn test_area_width_wraps() {
        let a = Area::new(i32::MIN, 0, i32::MAX, 0);
        assert_eq!(a.width(), 0);
        assert_eq!(Area::new(i32::MAX - 1, 0, i32::MAX, 0).width(), 2);
    }
}
