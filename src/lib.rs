//! # rotozoom
//!
//! Fixed-point rotate and zoom resampling of raster images, for targets
//! where every pixel has to come out the same on every platform.
//!
//! Given a source image, a rotation angle (tenths of a degree), a zoom
//! factor (256 = 1.0) and a pivot, the crate fills a destination area with
//! the transformed image, one row at a time. All math is integer math.
//!
//! - Nearest-neighbour sampling for opaque and alpha-carrying sources
//! - Anti-aliased sampling with edge feathering
//! - RGB332, RGB565 and ARGB8888 color depths, with or without a separate
//!   alpha byte
//!
//! ## Architecture
//!
//! The pipeline has four stages:
//!
//! 1. **Transform descriptor** ([`trans_rotozoom`]): angle, zoom and pivot
//!    become fixed-point sine/cosine coefficients and a mapping mode
//! 2. **Span interpolator** ([`span_interpolator`]): the two endpoints of a
//!    destination row are mapped into the source, in between is a fixed step
//! 3. **Sampler** ([`span_image_filter`]): one color and one alpha per
//!    destination pixel
//! 4. **Driver** ([`renderer_transform`]): picks the sampler and walks the
//!    rows
//!
//! ```
//! use rotozoom::{transform_blit, Area, Color, DrawDescriptor, PixelFormat, Point,
//!                SinTable, SourceImage};
//!
//! let pixels = [0u8; 8 * 8 * 2];
//! let src = SourceImage::packed(&pixels, 8, 8, PixelFormat::RGB565).unwrap();
//! let draw = DrawDescriptor::new()
//!     .with_angle(450)
//!     .with_zoom(384)
//!     .with_pivot(Point::new(4, 4));
//! let area = Area::new(-4, -4, 11, 11);
//! let mut colors = vec![Color::default(); 16 * 16];
//! let mut alphas = vec![0u8; 16 * 16];
//! transform_blit(&area, &src, &draw, &SinTable, &mut colors, &mut alphas).unwrap();
//! ```

// Foundation types
pub mod basics;
pub mod color;
pub mod error;
pub mod pixfmt;
pub mod rendering_buffer;
pub mod trigo;

// Transform and sampling
pub mod span_image_filter;
pub mod span_interpolator;
pub mod trans_rotozoom;

// Rendering
pub mod renderer_transform;

pub use basics::{Area, Opa, Point, OPA_COVER, OPA_TRANSP, ZOOM_NONE};
pub use color::{Color, ColorDepth, Rgba8};
pub use error::{Error, Result};
pub use pixfmt::{PixelCodec, PixelFormat};
pub use renderer_transform::{transform_blit, DrawDescriptor, DrawTransform};
pub use rendering_buffer::SourceImage;
pub use trans_rotozoom::{TransformDescriptor, TransformMode};
pub use trigo::{SinTable, TrigSource};
