//! Error type for the mono-bmp public API.

use std::fmt;

/// Parameter validation failures. The encoder has no other failure path:
/// decoding the source image is the caller's job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EncodeError {
    /// `crop_top` must be strictly less than the source height.
    CropOutOfRange { crop_top: u32, height: u32 },
    /// The source image has a zero dimension.
    EmptyImage { width: u32, height: u32 },
}

impl fmt::Display for EncodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EncodeError::CropOutOfRange { crop_top, height } => write!(
                f,
                "crop value {} out of range for image height {} (must be 0..{})",
                crop_top, height, height
            ),
            EncodeError::EmptyImage { width, height } => {
                write!(f, "source image is empty ({}x{})", width, height)
            }
        }
    }
}

impl std::error::Error for EncodeError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_crop_out_of_range() {
        let err = EncodeError::CropOutOfRange {
            crop_top: 500,
            height: 480,
        };
        assert_eq!(
            err.to_string(),
            "crop value 500 out of range for image height 480 (must be 0..480)"
        );
    }

    #[test]
    fn test_display_empty_image() {
        let err = EncodeError::EmptyImage {
            width: 0,
            height: 12,
        };
        assert_eq!(err.to_string(), "source image is empty (0x12)");
    }
}
