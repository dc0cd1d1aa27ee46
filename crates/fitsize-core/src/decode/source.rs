//! JPEG/PNG source decoding with EXIF orientation handling.

use std::io::Cursor;
use std::path::Path;

use exif::{In, Reader, Tag};
use image::{DynamicImage, ImageFormat, ImageReader};
use tracing::trace;

use super::{DecodeError, Orientation, StoredColor};

/// File extensions accepted as compression input (compared case-insensitively).
pub const SUPPORTED_EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "png"];

/// Check whether `path` has a supported image extension.
pub fn is_supported_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            SUPPORTED_EXTENSIONS
                .iter()
                .any(|supported| ext.eq_ignore_ascii_case(supported))
        })
}

/// Decode a JPEG or PNG image from bytes, applying EXIF orientation.
///
/// The source color type is kept (alpha, grayscale and bit depth survive),
/// since it drives the output format choice. Orientation is baked into the
/// pixels because the re-encoded output carries no EXIF block.
///
/// # Errors
///
/// Returns `DecodeError::InvalidFormat` if the bytes are neither JPEG nor PNG.
/// Returns `DecodeError::CorruptedFile` if decoding fails.
pub fn decode_image(bytes: &[u8]) -> Result<DynamicImage, DecodeError> {
    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    match reader.format() {
        Some(ImageFormat::Jpeg | ImageFormat::Png) => {}
        _ => return Err(DecodeError::InvalidFormat),
    }

    let img = reader
        .decode()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    let orientation = get_orientation(bytes);
    trace!(?orientation, color = ?img.color(), "decoded source image");

    Ok(apply_orientation(img, orientation))
}

/// Read the EXIF orientation from JPEG or PNG bytes.
///
/// Returns `Orientation::Normal` if no EXIF data is found or the tag cannot
/// be read.
pub fn get_orientation(bytes: &[u8]) -> Orientation {
    let mut cursor = Cursor::new(bytes);
    match Reader::new().read_from_container(&mut cursor) {
        Ok(exif) => exif
            .get_field(Tag::Orientation, In::PRIMARY)
            .and_then(|field| field.value.get_uint(0))
            .map(Orientation::from)
            .unwrap_or_default(),
        Err(_) => Orientation::Normal,
    }
}

/// Read how the source stores its pixels from the PNG header.
///
/// Anything that is not a readable PNG (including every JPEG) is
/// `StoredColor::Direct`.
pub fn stored_color(bytes: &[u8]) -> StoredColor {
    let Ok(reader) = png::Decoder::new(Cursor::new(bytes)).read_info() else {
        return StoredColor::Direct;
    };

    let info = reader.info();
    match (info.color_type, info.bit_depth) {
        (png::ColorType::Indexed, _) => StoredColor::Palette,
        (png::ColorType::Grayscale, png::BitDepth::One) => StoredColor::Bilevel,
        _ => StoredColor::Direct,
    }
}

/// Apply an EXIF orientation transformation to an image.
pub fn apply_orientation(img: DynamicImage, orientation: Orientation) -> DynamicImage {
    match orientation {
        Orientation::Normal => img,
        Orientation::FlipHorizontal => img.fliph(),
        Orientation::Rotate180 => img.rotate180(),
        Orientation::FlipVertical => img.flipv(),
        Orientation::Transpose => img.rotate90().fliph(),
        Orientation::Rotate90CW => img.rotate90(),
        Orientation::Transverse => img.rotate270().fliph(),
        Orientation::Rotate270CW => img.rotate270(),
    }
}
