//! Rec. 601 luminance and hard thresholding.

use image::Rgba;

/// Palette index for black (ink).
pub const BLACK: u8 = 0;

/// Palette index for white (no ink).
pub const WHITE: u8 = 1;

/// Rec. 601 luminance of an RGB pixel, in the 0.0..=255.0 range.
///
/// Alpha is ignored; callers composite onto an opaque background first.
///
/// # Example
/// ```
/// use image::Rgba;
/// use mono_bmp::luma;
///
/// assert_eq!(luma(Rgba([0, 0, 0, 255])), 0.0);
/// assert!((luma(Rgba([255, 255, 255, 255])) - 255.0).abs() < 1e-3);
/// ```
#[inline]
pub fn luma(pixel: Rgba<u8>) -> f32 {
    let [r, g, b, _] = pixel.0;
    0.299 * r as f32 + 0.587 * g as f32 + 0.114 * b as f32
}

/// Luminance scaled by 1000, computed exactly in integers.
#[inline]
fn luma_milli(pixel: Rgba<u8>) -> u32 {
    let [r, g, b, _] = pixel.0;
    299 * r as u32 + 587 * g as u32 + 114 * b as u32
}

/// Hard luminance threshold mapping pixels to palette indices.
///
/// Comparison happens on integer-scaled luminance so that a mid-grey of
/// exactly the threshold level is classified deterministically as white.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Threshold(u8);

impl Threshold {
    /// Create a threshold. Pixels with luminance strictly below `level` are black.
    pub fn new(level: u8) -> Self {
        Self(level)
    }

    /// The threshold level.
    #[inline]
    pub fn level(self) -> u8 {
        self.0
    }

    /// Classify a pixel: [`BLACK`] when its luminance is below the level,
    /// [`WHITE`] otherwise.
    #[inline]
    pub fn classify(self, pixel: Rgba<u8>) -> u8 {
        if luma_milli(pixel) < self.0 as u32 * 1000 {
            BLACK
        } else {
            WHITE
        }
    }
}

impl Default for Threshold {
    fn default() -> Self {
        Self::new(128)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_luma_weights() {
        assert!((luma(Rgba([255, 0, 0, 255])) - 76.245).abs() < 1e-3);
        assert!((luma(Rgba([0, 255, 0, 255])) - 149.685).abs() < 1e-3);
        assert!((luma(Rgba([0, 0, 255, 255])) - 29.07).abs() < 1e-3);
    }

    #[test]
    fn test_luma_ignores_alpha() {
        assert_eq!(luma(Rgba([10, 20, 30, 0])), luma(Rgba([10, 20, 30, 255])));
    }

    #[test]
    fn test_threshold_boundary() {
        let t = Threshold::default();
        assert_eq!(t.classify(Rgba([127, 127, 127, 255])), BLACK);
        assert_eq!(t.classify(Rgba([128, 128, 128, 255])), WHITE);
    }

    #[test]
    fn test_saturated_colours() {
        let t = Threshold::default();
        // Pure red and blue are dark enough to print, pure green is not
        assert_eq!(t.classify(Rgba([255, 0, 0, 255])), BLACK);
        assert_eq!(t.classify(Rgba([0, 0, 255, 255])), BLACK);
        assert_eq!(t.classify(Rgba([0, 255, 0, 255])), WHITE);
    }

    #[test]
    fn test_custom_level() {
        let t = Threshold::new(200);
        assert_eq!(t.level(), 200);
        assert_eq!(t.classify(Rgba([180, 180, 180, 255])), BLACK);
    }
}
