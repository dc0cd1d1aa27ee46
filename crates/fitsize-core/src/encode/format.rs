//! Output format selection and the format-dispatching encoder.

use std::borrow::Cow;
use std::fmt;

use image::{ColorType, DynamicImage};
use serde::Serialize;

use super::{encode_jpeg, encode_png, png::png_compatible, EncodeError};
use crate::decode::StoredColor;

/// Output format, chosen once per image before the search starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EncodingFormat {
    /// Lossy; quality is the size knob. Stored as 3-channel RGB.
    Jpeg,
    /// Lossless; keeps alpha and high bit depths. Ignores quality.
    Png,
}

impl EncodingFormat {
    /// Pick the format for a source color type.
    ///
    /// Only 8-bit grayscale and 8-bit RGB go to JPEG. Anything carrying alpha,
    /// or stored at 16/32 bits per channel, goes to PNG so nothing is lost
    /// beyond what the quality knob trades away.
    pub fn select(color: ColorType) -> Self {
        match color {
            ColorType::L8 | ColorType::Rgb8 => EncodingFormat::Jpeg,
            _ => EncodingFormat::Png,
        }
    }

    /// Pick the format for a decoded image.
    #[inline]
    pub fn for_image(image: &DynamicImage) -> Self {
        Self::select(image.color())
    }

    /// Pick the format for a decoded image, given how its source stored it.
    ///
    /// Palette and 1-bit sources decode to plain 8-bit buffers, which would
    /// otherwise select JPEG. They stay PNG.
    pub fn for_source(image: &DynamicImage, stored: StoredColor) -> Self {
        match stored {
            StoredColor::Palette | StoredColor::Bilevel => EncodingFormat::Png,
            StoredColor::Direct => Self::for_image(image),
        }
    }

    /// Lowercase format name, also the canonical file extension.
    pub fn as_str(self) -> &'static str {
        match self {
            EncodingFormat::Jpeg => "jpeg",
            EncodingFormat::Png => "png",
        }
    }

    /// Convert `image` into the representation this format encodes.
    ///
    /// JPEG needs 3-channel RGB, so grayscale input is expanded. PNG keeps
    /// the image as-is, apart from narrowing float samples.
    pub fn prepare(self, image: &DynamicImage) -> Cow<'_, DynamicImage> {
        match self {
            EncodingFormat::Jpeg => match image {
                DynamicImage::ImageRgb8(_) => Cow::Borrowed(image),
                other => Cow::Owned(DynamicImage::ImageRgb8(other.to_rgb8())),
            },
            EncodingFormat::Png => png_compatible(image),
        }
    }
}

impl fmt::Display for EncodingFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Encode `image` as `format` at `quality`.
///
/// Deterministic for a fixed image, format and quality. PNG ignores
/// `quality`. Never touches the filesystem.
pub fn encode(
    image: &DynamicImage,
    format: EncodingFormat,
    quality: u8,
) -> Result<Vec<u8>, EncodeError> {
    match format {
        EncodingFormat::Jpeg => match image {
            DynamicImage::ImageRgb8(rgb) => {
                encode_jpeg(rgb.as_raw(), rgb.width(), rgb.height(), quality)
            }
            other => {
                let rgb = other.to_rgb8();
                encode_jpeg(rgb.as_raw(), rgb.width(), rgb.height(), quality)
            }
        },
        EncodingFormat::Png => encode_png(image),
    }
}
