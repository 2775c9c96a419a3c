//! Rendering buffer: read-only, row-oriented access to source pixels.
//!
//! [`SourceImage`] borrows a caller-owned byte buffer and describes it with
//! a width, a height, a row stride in bytes and a [`PixelFormat`]. The
//! layout is validated once in [`SourceImage::new`]; pixel access after
//! that only needs coordinate checks, which the samplers already perform.

use crate::error::{Error, Result};
use crate::pixfmt::PixelFormat;

/// Borrowed view of a source image.
#[derive(Debug, Clone, Copy)]
pub struct SourceImage<'a> {
    data: &'a [u8],
    width: i32,
    height: i32,
    stride: usize,
    format: PixelFormat,
}

impl<'a> SourceImage<'a> {
    /// Wrap `data` as a `width` x `height` image with `stride` bytes per row.
    ///
    /// The last row only needs to hold its pixels, not a full stride.
    pub fn new(
        data: &'a [u8],
        width: u32,
        height: u32,
        stride: usize,
        format: PixelFormat,
    ) -> Result<Self> {
        let row_bytes = (width as usize)
            .checked_mul(format.bytes_per_pixel())
            .ok_or(Error::InvalidStride {
                stride,
                min: usize::MAX,
            })?;
        if stride < row_bytes {
            return Err(Error::InvalidStride {
                stride,
                min: row_bytes,
            });
        }

        let expected = if height == 0 || width == 0 {
            0
        } else {
            stride
                .checked_mul(height as usize - 1)
                .and_then(|v| v.checked_add(row_bytes))
                .ok_or(Error::BufferTooSmall {
                    expected: usize::MAX,
                    actual: data.len(),
                })?
        };
        if data.len() < expected {
            return Err(Error::BufferTooSmall {
                expected,
                actual: data.len(),
            });
        }

        // Coordinates are compared as i32 by the samplers.
        if width > i32::MAX as u32 || height > i32::MAX as u32 {
            return Err(Error::BufferTooSmall {
                expected: usize::MAX,
                actual: data.len(),
            });
        }

        Ok(Self {
            data,
            width: width as i32,
            height: height as i32,
            stride,
            format,
        })
    }

    /// Wrap a tightly packed buffer (stride = width * bytes per pixel).
    pub fn packed(data: &'a [u8], width: u32, height: u32, format: PixelFormat) -> Result<Self> {
        Self::new(
            data,
            width,
            height,
            width as usize * format.bytes_per_pixel(),
            format,
        )
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    /// Row stride in bytes.
    #[inline]
    pub fn stride(&self) -> usize {
        self.stride
    }

    #[inline]
    pub fn format(&self) -> PixelFormat {
        self.format
    }

    /// Returns `true` if `(x, y)` addresses a pixel of the image.
    #[inline]
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= 0 && x < self.width && y >= 0 && y < self.height
    }

    /// Byte offset of pixel `(x, y)`.
    ///
    /// `(x, y)` must satisfy [`contains`](Self::contains).
    #[inline]
    pub fn offset(&self, x: i32, y: i32) -> usize {
        debug_assert!(self.contains(x, y), "pixel ({}, {}) out of bounds", x, y);
        y as usize * self.stride + x as usize * self.format.bytes_per_pixel()
    }

    /// Bytes from pixel `(x, y)` to the end of the buffer. The pixel itself
    /// occupies the first `bytes_per_pixel()` of them.
    ///
    /// # Panics
    /// If `(x, y)` is outside the image.
    #[inline]
    pub fn pixel(&self, x: i32, y: i32) -> &'a [u8] {
        assert!(
            self.contains(x, y),
            "pixel ({}, {}) out of bounds ({}x{})",
            x,
            y,
            self.width,
            self.height
        );
        &self.data[self.offset(x, y)..]
    }
}

// ============================================================================
// Tests
// ============================================================================
