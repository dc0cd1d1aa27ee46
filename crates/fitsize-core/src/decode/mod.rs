//! Image decoding for compression input.
//!
//! This module provides functionality for:
//! - Decoding JPEG and PNG sources while keeping their color type
//! - Applying EXIF orientation so outputs without EXIF stay upright
//! - Reading how a PNG stores its pixels (palette, 1-bit, direct)
//! - Recognising supported file extensions
//!
//! # Examples
//!
//! ```ignore
//! use fitsize_core::decode::decode_image;
//!
//! let bytes = std::fs::read("photo.jpg").unwrap();
//! let image = decode_image(&bytes).unwrap();
//! println!("Decoded {}x{} image", image.width(), image.height());
//! ```

mod source;
mod types;

pub use source::{
    apply_orientation, decode_image, get_orientation, is_supported_extension, stored_color,
    SUPPORTED_EXTENSIONS,
};
pub use types::{DecodeError, Orientation, StoredColor};
