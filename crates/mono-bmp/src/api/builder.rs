//! MonoEncoder builder -- the primary entry point for the crate.

use image::DynamicImage;

use super::EncodeError;
use crate::color::Threshold;
use crate::output::MonoBitmap;
use crate::preprocess::{compose, Fit};
use crate::{LABEL_HEIGHT, LABEL_WIDTH};

/// About 203 dpi, the native resolution of most thermal label heads.
const DEFAULT_PIXELS_PER_METER: i32 = 8000;

/// Quantize arbitrary images into fixed-size 1-bit BMP files.
///
/// - Configuration methods consume and return `self`
/// - [`encode()`](Self::encode) takes `&self`, so one encoder serves any
///   number of images
/// - Output is a pure function of (image, crop_top, settings)
///
/// # Example
///
/// ```
/// use image::{DynamicImage, Rgba, RgbaImage};
/// use mono_bmp::MonoEncoder;
///
/// let encoder = MonoEncoder::new().threshold(100);
/// let source = DynamicImage::ImageRgba8(RgbaImage::from_pixel(10, 10, Rgba([90, 90, 90, 255])));
///
/// let bitmap = encoder.quantize(&source, 0).unwrap();
/// assert_eq!((bitmap.width(), bitmap.height()), (320, 300));
/// ```
#[derive(Debug, Clone)]
pub struct MonoEncoder {
    width: u32,
    height: u32,
    threshold: Threshold,
    pixels_per_meter: i32,
}

impl MonoEncoder {
    /// Encoder for the 320x300 label canvas, threshold 128, 8000 px/m.
    pub fn new() -> Self {
        Self {
            width: LABEL_WIDTH,
            height: LABEL_HEIGHT,
            threshold: Threshold::default(),
            pixels_per_meter: DEFAULT_PIXELS_PER_METER,
        }
    }

    /// Set the output canvas size.
    ///
    /// # Panics
    ///
    /// Panics if either dimension is zero.
    #[inline]
    pub fn canvas(mut self, width: u32, height: u32) -> Self {
        assert!(width > 0 && height > 0, "canvas must not be empty");
        self.width = width;
        self.height = height;
        self
    }

    /// Set the luminance threshold below which pixels print black.
    #[inline]
    pub fn threshold(mut self, level: u8) -> Self {
        self.threshold = Threshold::new(level);
        self
    }

    /// Set the resolution stored in the BMP header.
    #[inline]
    pub fn pixels_per_meter(mut self, ppm: i32) -> Self {
        self.pixels_per_meter = ppm;
        self
    }

    /// Canvas size as (width, height).
    #[inline]
    pub fn canvas_size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Crop, fit and threshold `image` into a [`MonoBitmap`].
    ///
    /// # Errors
    ///
    /// [`EncodeError::CropOutOfRange`] unless `crop_top < image.height()`,
    /// [`EncodeError::EmptyImage`] for zero-sized sources.
    pub fn quantize(&self, image: &DynamicImage, crop_top: u32) -> Result<MonoBitmap, EncodeError> {
        let fit = Fit::compute(
            image.width(),
            image.height(),
            crop_top,
            self.width,
            self.height,
        )?;
        let canvas = compose(image, crop_top, &fit, self.width, self.height);

        let indices = canvas
            .pixels()
            .map(|&p| self.threshold.classify(p))
            .collect();

        Ok(MonoBitmap::new(indices, self.width, self.height))
    }

    /// Quantize `image` and serialise it as a BMP file.
    pub fn encode(&self, image: &DynamicImage, crop_top: u32) -> Result<Vec<u8>, EncodeError> {
        Ok(self.quantize(image, crop_top)?.to_bmp(self.pixels_per_meter))
    }
}

impl Default for MonoEncoder {
    fn default() -> Self {
        Self::new()
    }
}

/// Encode `image` for the default 320x300 label canvas.
pub fn encode(image: &DynamicImage, crop_top: u32) -> Result<Vec<u8>, EncodeError> {
    MonoEncoder::new().encode(image, crop_top)
}
