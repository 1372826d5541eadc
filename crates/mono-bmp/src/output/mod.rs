//! Output types for the quantization pipeline.
//!
//! [`MonoBitmap`] holds one palette index per pixel and serialises itself
//! to the printer's BMP layout with [`MonoBitmap::to_bmp`].

mod bmp;
mod mono_bitmap;

pub use bmp::{row_size, BMP_HEADER_SIZE, PALETTE};
pub use mono_bitmap::MonoBitmap;
