//! Crop, resample and composite onto a white canvas.

use image::imageops::{self, FilterType};
use image::{DynamicImage, GenericImageView, Rgba, RgbaImage};

use super::Fit;

/// Opaque white, the canvas background (no ink).
const PAPER: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// Render `source` (minus `crop_top` rows) onto a white canvas at `fit`.
///
/// Transparent source pixels blend towards white. The canvas is always fully
/// opaque.
pub fn compose(
    source: &DynamicImage,
    crop_top: u32,
    fit: &Fit,
    canvas_width: u32,
    canvas_height: u32,
) -> RgbaImage {
    let (src_width, src_height) = source.dimensions();
    let cropped = source
        .crop_imm(0, crop_top, src_width, src_height - crop_top)
        .to_rgba8();

    let scaled = if cropped.dimensions() == (fit.width, fit.height) {
        cropped
    } else {
        imageops::resize(&cropped, fit.width, fit.height, FilterType::Triangle)
    };

    let mut canvas = RgbaImage::from_pixel(canvas_width, canvas_height, PAPER);
    imageops::overlay(&mut canvas, &scaled, fit.x as i64, fit.y as i64);
    canvas
}
