//! Uniform scale-to-fit placement.

use crate::api::EncodeError;

/// Placement of a cropped source image on a fixed canvas.
///
/// The scale factor is uniform (no distortion) and chosen so the whole
/// cropped source fits the canvas. The result is centred horizontally and
/// aligned to the top edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fit {
    /// Uniform scale factor applied to the cropped source.
    pub scale: f64,
    /// Scaled width in pixels (1..=canvas width).
    pub width: u32,
    /// Scaled height in pixels (1..=canvas height).
    pub height: u32,
    /// Horizontal offset of the scaled image on the canvas.
    pub x: u32,
    /// Vertical offset of the scaled image on the canvas (always 0).
    pub y: u32,
}

impl Fit {
    /// Compute the placement of a `src_width` x `src_height` image with
    /// `crop_top` rows removed, on a `canvas_width` x `canvas_height` canvas.
    ///
    /// # Errors
    ///
    /// - [`EncodeError::EmptyImage`] if the source has a zero dimension.
    /// - [`EncodeError::CropOutOfRange`] unless `crop_top < src_height`.
    ///
    /// # Example
    /// ```
    /// use mono_bmp::Fit;
    ///
    /// let fit = Fit::compute(640, 480, 0, 320, 300).unwrap();
    /// assert_eq!((fit.width, fit.height), (320, 240));
    /// assert_eq!((fit.x, fit.y), (0, 0));
    /// ```
    pub fn compute(
        src_width: u32,
        src_height: u32,
        crop_top: u32,
        canvas_width: u32,
        canvas_height: u32,
    ) -> Result<Self, EncodeError> {
        if src_width == 0 || src_height == 0 {
            return Err(EncodeError::EmptyImage {
                width: src_width,
                height: src_height,
            });
        }
        if crop_top >= src_height {
            return Err(EncodeError::CropOutOfRange {
                crop_top,
                height: src_height,
            });
        }

        let visible_height = src_height - crop_top;
        let scale = (canvas_width as f64 / src_width as f64)
            .min(canvas_height as f64 / visible_height as f64);

        let width = scaled_extent(src_width, scale, canvas_width);
        let height = scaled_extent(visible_height, scale, canvas_height);

        Ok(Self {
            scale,
            width,
            height,
            x: (canvas_width - width) / 2,
            y: 0,
        })
    }
}

fn scaled_extent(extent: u32, scale: f64, limit: u32) -> u32 {
    ((extent as f64 * scale).round() as u32).clamp(1, limit)
}
