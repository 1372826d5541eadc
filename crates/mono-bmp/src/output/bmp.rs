//! Minimal 1-bit BMP writer (BITMAPFILEHEADER + BITMAPINFOHEADER + palette).

/// Size of the file header (14), info header (40) and palette (8).
pub const BMP_HEADER_SIZE: usize = 14 + 40 + 8;

/// Palette entries as stored on disk (B, G, R, reserved): black, white.
pub const PALETTE: [[u8; 4]; 2] = [[0x00, 0x00, 0x00, 0x00], [0xFF, 0xFF, 0xFF, 0x00]];

const INFO_HEADER_SIZE: u32 = 40;
const BI_RGB: u32 = 0;

/// Bytes per pixel row for a 1-bit image, padded to a 4-byte boundary.
///
/// ```
/// assert_eq!(mono_bmp::output::row_size(320), 40);
/// assert_eq!(mono_bmp::output::row_size(33), 8);
/// ```
#[inline]
pub fn row_size(width: u32) -> usize {
    (width as usize).div_ceil(32) * 4
}

/// Write the 62-byte header block for a `width` x `height` 1-bit bitmap.
pub(crate) fn write_header(out: &mut Vec<u8>, width: u32, height: u32, pixels_per_meter: i32) {
    let image_size = (row_size(width) * height as usize) as u32;
    let file_size = BMP_HEADER_SIZE as u32 + image_size;

    // BITMAPFILEHEADER
    out.extend_from_slice(b"BM");
    out.extend_from_slice(&file_size.to_le_bytes());
    out.extend_from_slice(&0u32.to_le_bytes());
    out.extend_from_slice(&(BMP_HEADER_SIZE as u32).to_le_bytes());

    // BITMAPINFOHEADER; positive height means rows are stored bottom-up
    out.extend_from_slice(&INFO_HEADER_SIZE.to_le_bytes());
    out.extend_from_slice(&(width as i32).to_le_bytes());
    out.extend_from_slice(&(height as i32).to_le_bytes());
    out.extend_from_slice(&1u16.to_le_bytes());
    out.extend_from_slice(&1u16.to_le_bytes());
    out.extend_from_slice(&BI_RGB.to_le_bytes());
    out.extend_from_slice(&image_size.to_le_bytes());
    out.extend_from_slice(&pixels_per_meter.to_le_bytes());
    out.extend_from_slice(&pixels_per_meter.to_le_bytes());
    out.extend_from_slice(&(PALETTE.len() as u32).to_le_bytes());
    out.extend_from_slice(&0u32.to_le_bytes());

    for entry in PALETTE {
        out.extend_from_slice(&entry);
    }
}

/// Pack one row of palette indices, 8 pixels per byte, MSB first, zero
/// padded to `row_size(row.len())` bytes.
pub(crate) fn pack_row(out: &mut Vec<u8>, row: &[u8]) {
    let start = out.len();
    for chunk in row.chunks(8) {
        let mut byte = 0u8;
        for (i, &idx) in chunk.iter().enumerate() {
            byte |= (idx & 1) << (7 - i);
        }
        out.push(byte);
    }
    out.resize(start + row_size(row.len() as u32), 0);
}
