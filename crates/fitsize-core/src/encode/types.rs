//! Error type shared by the format encoders.

use thiserror::Error;

/// Errors that can occur during encoding.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// Pixel data length doesn't match expected dimensions
    #[error("Invalid pixel data: expected {expected} bytes (width * height * 3), got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },

    /// Width or height is zero
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// Width or height exceeds what the format can store
    #[error("Image too large: {width}x{height} exceeds 65535 pixels per side")]
    DimensionsTooLarge { width: u32, height: u32 },

    /// The underlying codec rejected the image
    #[error("Encoding failed: {0}")]
    EncodingFailed(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_error_display() {
        let err = EncodeError::InvalidDimensions {
            width: 0,
            height: 7,
        };
        assert_eq!(
            err.to_string(),
            "Invalid dimensions: width (0) and height (7) must be non-zero"
        );

        let err = EncodeError::EncodingFailed("bad".to_string());
        assert_eq!(err.to_string(), "Encoding failed: bad");
    }
}
