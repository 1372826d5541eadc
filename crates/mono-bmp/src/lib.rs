//! mono-bmp: 1-bit BMP quantization for thermal label printers
//!
//! This library turns an arbitrary raster image into the fixed-size,
//! palette-indexed bitmap file that label printers such as the Brother TD-4
//! series load with `PUTBMP`.
//!
//! # Quick Start
//!
//! The [`MonoEncoder`] builder is the primary entry point:
//!
//! ```
//! use image::{DynamicImage, Rgba, RgbaImage};
//! use mono_bmp::MonoEncoder;
//!
//! let source = DynamicImage::ImageRgba8(RgbaImage::from_pixel(64, 60, Rgba([0, 0, 0, 255])));
//!
//! let bytes = MonoEncoder::new().encode(&source, 0).unwrap();
//! assert_eq!(bytes.len(), 12062);
//! assert_eq!(&bytes[0..2], b"BM");
//! ```
//!
//! For the default 320x300 label canvas the free function [`encode()`] does
//! the same thing.
//!
//! # Pipeline
//!
//! ```text
//! source image (any size, RGBA)
//!     |
//!     v
//! crop `crop_top` rows off the top
//!     |
//!     v
//! uniform scale to fit the canvas    (no distortion, bilinear filter)
//!     |
//!     v
//! composite on white                 (centred horizontally, top-aligned)
//!     |
//!     v
//! luma = 0.299 R + 0.587 G + 0.114 B
//! luma < threshold ? 0 (black) : 1 (white)
//!     |
//!     v
//! BMP: 14-byte file header, 40-byte info header, 2-entry palette,
//!      rows bottom-to-top, 8 px per byte MSB-first, 4-byte row padding
//! ```
//!
//! There is deliberately no dithering: printer artwork is line art and a
//! hard threshold keeps edges crisp.
//!
//! # Output Layout
//!
//! | Offset | Size | Field |
//! |--------|------|-------|
//! | 0 | 2 | `"BM"` |
//! | 2 | 4 | file size |
//! | 10 | 4 | pixel data offset (62) |
//! | 14 | 4 | info header size (40) |
//! | 18 / 22 | 4 + 4 | width, height (positive, bottom-up) |
//! | 28 | 2 | bits per pixel (1) |
//! | 38 / 42 | 4 + 4 | pixels per metre (8000, about 203 dpi) |
//! | 46 | 4 | colours used (2) |
//! | 54 | 8 | palette: black, white |
//! | 62 | .. | pixel rows |
//!
//! All multi-byte integers are little-endian.

pub mod api;
pub mod color;
pub mod output;
pub mod preprocess;


pub use api::{encode, EncodeError, MonoEncoder};
pub use color::{luma, Threshold};
pub use output::MonoBitmap;
pub use preprocess::Fit;

/// Label canvas width in pixels.
pub const LABEL_WIDTH: u32 = 320;

/// Label canvas height in pixels.
pub const LABEL_HEIGHT: u32 = 300;
