//! JPEG encoding at a caller-chosen quality.
//!
//! This module wraps the `jpeg-encoder` baseline encoder. Quality is the only
//! knob. Huffman tables are always optimized for the image being encoded;
//! quantization tables and subsampling stay at the encoder defaults, so
//! output size is a function of pixels and quality alone.

use jpeg_encoder::{ColorType, Encoder};

use super::EncodeError;

/// Encode RGB pixel data to JPEG bytes.
///
/// # Arguments
///
/// * `pixels` - RGB pixel data (3 bytes per pixel, row-major order)
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
/// * `quality` - JPEG quality, clamped to 1-100
///
/// # Returns
///
/// JPEG-encoded bytes on success, or an error if encoding fails.
pub fn encode_jpeg(
    pixels: &[u8],
    width: u32,
    height: u32,
    quality: u8,
) -> Result<Vec<u8>, EncodeError> {
    if width == 0 || height == 0 {
        return Err(EncodeError::InvalidDimensions { width, height });
    }

    // JPEG frame headers store dimensions as 16-bit values.
    let (Ok(frame_width), Ok(frame_height)) = (u16::try_from(width), u16::try_from(height)) else {
        return Err(EncodeError::DimensionsTooLarge { width, height });
    };

    let expected_len = (width as usize) * (height as usize) * 3;
    if pixels.len() != expected_len {
        return Err(EncodeError::InvalidPixelData {
            expected: expected_len,
            actual: pixels.len(),
        });
    }

    // Search ranges may run past 100; the codec may not.
    let quality = quality.clamp(1, 100);

    let mut buffer = Vec::new();
    let mut encoder = Encoder::new(&mut buffer, quality);
    encoder.set_optimized_huffman_tables(true);
    encoder
        .encode(pixels, frame_width, frame_height, ColorType::Rgb)
        .map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;

    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Diagonal gradient with some high-frequency detail.
    fn textured_pixels(width: u32, height: u32) -> Vec<u8> {
        let mut pixels = Vec::with_capacity((width * height * 3) as usize);
        for y in 0..height {
            for x in 0..width {
                pixels.push((x * 255 / width) as u8);
                pixels.push((y * 255 / height) as u8);
                pixels.push(((x * 7 + y * 13) % 256) as u8);
            }
        }
        pixels
    }

    #[test]
    fn test_encode_jpeg_basic() {
        let pixels = vec![128u8; 100 * 100 * 3];
        let jpeg_bytes = encode_jpeg(&pixels, 100, 100, 90).unwrap();

        // SOI and EOI markers
        assert_eq!(&jpeg_bytes[0..2], &[0xFF, 0xD8]);
        let len = jpeg_bytes.len();
        assert_eq!(&jpeg_bytes[len - 2..], &[0xFF, 0xD9]);
    }

    #[test]
    fn test_encode_jpeg_quality_affects_size() {
        let pixels = textured_pixels(96, 96);

        let low_q = encode_jpeg(&pixels, 96, 96, 10).unwrap();
        let high_q = encode_jpeg(&pixels, 96, 96, 95).unwrap();

        assert!(high_q.len() > low_q.len());
    }

    #[test]
    fn test_encode_jpeg_quality_clamping() {
        let pixels = vec![128u8; 10 * 10 * 3];

        let zero = encode_jpeg(&pixels, 10, 10, 0).unwrap();
        let one = encode_jpeg(&pixels, 10, 10, 1).unwrap();
        assert_eq!(zero, one);

        let max = encode_jpeg(&pixels, 10, 10, 255).unwrap();
        let hundred = encode_jpeg(&pixels, 10, 10, 100).unwrap();
        assert_eq!(max, hundred);
    }

    #[test]
    fn test_encode_jpeg_invalid_pixel_data() {
        let pixels = vec![128u8; 99 * 100 * 3]; // One row short

        let result = encode_jpeg(&pixels, 100, 100, 90);
        assert!(matches!(
            result,
            Err(EncodeError::InvalidPixelData {
                expected: 30000,
                actual: 29700
            })
        ));
    }

    #[test]
    fn test_encode_jpeg_zero_dimensions() {
        let result = encode_jpeg(&[], 0, 100, 90);
        assert!(matches!(result, Err(EncodeError::InvalidDimensions { .. })));

        let result = encode_jpeg(&[], 100, 0, 90);
        assert!(matches!(result, Err(EncodeError::InvalidDimensions { .. })));
    }

    #[test]
    fn test_encode_jpeg_oversized_dimensions() {
        let result = encode_jpeg(&[], 70_000, 1, 90);
        assert!(matches!(
            result,
            Err(EncodeError::DimensionsTooLarge {
                width: 70_000,
                height: 1
            })
        ));
    }

    #[test]
    fn test_encode_jpeg_uses_optimized_huffman_tables() {
        let pixels = textured_pixels(128, 128);

        for quality in [10u8, 50, 80, 95] {
            let optimized = encode_jpeg(&pixels, 128, 128, quality).unwrap();

            let mut standard = Vec::new();
            Encoder::new(&mut standard, quality)
                .encode(&pixels, 128, 128, ColorType::Rgb)
                .unwrap();

            assert!(
                optimized.len() < standard.len(),
                "q={quality}: optimized={} standard={}",
                optimized.len(),
                standard.len()
            );
        }
    }

    #[test]
    fn test_encode_jpeg_single_pixel() {
        let jpeg_bytes = encode_jpeg(&[255, 0, 0], 1, 1, 90).unwrap();
        assert_eq!(&jpeg_bytes[0..2], &[0xFF, 0xD8]);
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================
