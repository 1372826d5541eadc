//! MonoBitmap: thresholded palette indices plus BMP serialisation.

use super::bmp::{pack_row, row_size, write_header, BMP_HEADER_SIZE};

/// A 1-bit image: one palette index (0 = black, 1 = white) per pixel,
/// row-major, top row first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonoBitmap {
    indices: Vec<u8>,
    width: u32,
    height: u32,
}

impl MonoBitmap {
    /// Create a bitmap from palette indices.
    ///
    /// # Panics (debug only)
    ///
    /// Debug-asserts that `indices.len() == width * height`.
    pub fn new(indices: Vec<u8>, width: u32, height: u32) -> Self {
        debug_assert_eq!(
            indices.len(),
            width as usize * height as usize,
            "indices length ({}) must match {}x{}",
            indices.len(),
            width,
            height,
        );
        Self {
            indices,
            width,
            height,
        }
    }

    #[inline]
    pub fn indices(&self) -> &[u8] {
        &self.indices
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Palette index at (`x`, `y`), `y` counted from the top.
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> u8 {
        self.indices[(y * self.width + x) as usize]
    }

    /// Number of black (ink) pixels.
    pub fn ink_pixels(&self) -> usize {
        self.indices.iter().filter(|&&i| i == 0).count()
    }

    /// Size in bytes of the serialised BMP.
    pub fn encoded_len(&self) -> usize {
        BMP_HEADER_SIZE + row_size(self.width) * self.height as usize
    }

    /// Serialise as a bottom-up 1-bit BMP file.
    pub fn to_bmp(&self, pixels_per_meter: i32) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.encoded_len());
        write_header(&mut out, self.width, self.height, pixels_per_meter);

        if self.width > 0 {
            for row in self.indices.chunks(self.width as usize).rev() {
                pack_row(&mut out, row);
            }
        }

        debug_assert_eq!(out.len(), self.encoded_len());
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rows_written_bottom_up() {
        // 2 rows x 8 px: top row all black, bottom row all white
        let mut indices = vec![0u8; 8];
        indices.extend(vec![1u8; 8]);
        let bitmap = MonoBitmap::new(indices, 8, 2);

        let bmp = bitmap.to_bmp(8000);
        assert_eq!(bmp.len(), 62 + 2 * 4);
        // First stored row is the bottom (white) row
        assert_eq!(&bmp[62..66], &[0xFF, 0, 0, 0]);
        assert_eq!(&bmp[66..70], &[0x00, 0, 0, 0]);
    }

    #[test]
    fn test_accessors() {
        let bitmap = MonoBitmap::new(vec![0, 1, 1, 0, 1, 1], 3, 2);
        assert_eq!(bitmap.width(), 3);
        assert_eq!(bitmap.height(), 2);
        assert_eq!(bitmap.get(0, 1), 0);
        assert_eq!(bitmap.get(2, 0), 1);
        assert_eq!(bitmap.ink_pixels(), 2);
        assert_eq!(bitmap.encoded_len(), 62 + 8);
    }
}
