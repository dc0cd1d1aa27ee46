//! End-to-end pipeline: source bytes in, one [`CompressionResult`] out.

use image::DynamicImage;
use thiserror::Error;
use tracing::debug;

use crate::decode::{decode_image, stored_color, DecodeError};
use crate::encode::{encode_png, EncodingFormat};
use crate::search::{search, CompressionResult, QualityRange, SearchError, TargetSize};

/// Errors that stop a single image from being compressed.
///
/// Not finding a fitting quality is not an error; it is
/// [`CompressionResult::Failure`].
#[derive(Debug, Error)]
pub enum CompressError {
    /// The source could not be decoded.
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// The search was misconfigured or the encoder failed.
    #[error(transparent)]
    Search(#[from] SearchError),
}

/// The outcome for one image, with the format that was chosen for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Compressed {
    /// Output format selected from the source color type.
    pub format: EncodingFormat,
    /// Search outcome.
    pub result: CompressionResult,
}

/// Decode `bytes` and compress the image to fit `target`.
///
/// The format comes from the decoded color type and from how the source
/// stored its pixels, so palette and 1-bit PNGs stay PNG.
///
/// # Errors
///
/// Returns `CompressError::Decode` for undecodable input and
/// `CompressError::Search` if encoding fails.
pub fn compress(
    bytes: &[u8],
    target: TargetSize,
    range: QualityRange,
) -> Result<Compressed, CompressError> {
    let image = decode_image(bytes)?;
    let format = EncodingFormat::for_source(&image, stored_color(bytes));
    Ok(compress_as(&image, format, target, range)?)
}

/// Compress an already-decoded image to fit `target`, choosing the format
/// from its color type alone.
pub fn compress_image(
    image: &DynamicImage,
    target: TargetSize,
    range: QualityRange,
) -> Result<Compressed, SearchError> {
    compress_as(image, EncodingFormat::for_image(image), target, range)
}

/// Compress `image` as `format` to fit `target`.
///
/// The image is prepared for the format once and the search runs on the
/// prepared image. PNG has no quality axis and is encoded a single time at
/// maximum effort; see [`fit_lossless`].
pub fn compress_as(
    image: &DynamicImage,
    format: EncodingFormat,
    target: TargetSize,
    range: QualityRange,
) -> Result<Compressed, SearchError> {
    let prepared = format.prepare(image);
    debug!(%format, width = prepared.width(), height = prepared.height(), "format selected");

    let result = match format {
        EncodingFormat::Jpeg => search(&prepared, format, target, range)?,
        EncodingFormat::Png => fit_lossless(encode_png(&prepared)?, target, range),
    };
    debug!(
        success = result.is_success(),
        quality = ?result.quality(),
        "compression finished"
    );

    Ok(Compressed { format, result })
}

/// Result of a search whose encoder ignores quality.
///
/// Every probe would see the same `encoded` bytes, so the search reduces to
/// `Success` at `range.max()` when they fit and `Failure` otherwise.
fn fit_lossless(encoded: Vec<u8>, target: TargetSize, range: QualityRange) -> CompressionResult {
    let size_bytes = encoded.len();
    if target.fits(size_bytes) {
        CompressionResult::Success {
            quality: range.max(),
            bytes: encoded,
            size_bytes,
        }
    } else {
        CompressionResult::no_quality_meets_target()
    }
}
