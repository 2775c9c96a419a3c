//! Error type for the buffer-validating public surface.
//!
//! The sampling core itself never fails: samples outside the source image
//! resolve to transparency. Errors only report caller-supplied buffers that
//! are too small for the requested operation.

/// Errors reported when wrapping a source image or rendering into
/// caller-owned output buffers.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("invalid stride: {stride} bytes per row, at least {min} required")]
    InvalidStride { stride: usize, min: usize },

    #[error("source buffer too small: expected {expected} bytes, got {actual}")]
    BufferTooSmall { expected: usize, actual: usize },

    #[error("color buffer too small: expected {expected} entries, got {actual}")]
    ColorBufferTooSmall { expected: usize, actual: usize },

    #[error("alpha buffer too small: expected {expected} entries, got {actual}")]
    AlphaBufferTooSmall { expected: usize, actual: usize },

    #[error("row {y} is outside the destination area {y1}..={y2}")]
    RowOutOfArea { y: i32, y1: i32, y2: i32 },
}

pub type Result<T> = core::result::Result<T, Error>;
