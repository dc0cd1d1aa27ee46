//! fitsize Core - size-targeted image compression
//!
//! This crate compresses JPEG/PNG images so each output stays at or under a
//! target size in kilobytes, at the highest quality that allows it. The
//! quality level is found by binary search with the encoder as an oracle.
//!
//! # Module Structure
//!
//! - `decode` - JPEG/PNG decoding with EXIF orientation
//! - `encode` - Format selection and the JPEG/PNG encoder adapter
//! - `search` - The size-targeted quality search
//! - `compress` - Decode, select, prepare and search in one call
//!
//! Nothing in this crate touches the filesystem or holds global state, so
//! separate images can be compressed on separate threads freely.

pub mod compress;
pub mod decode;
pub mod encode;
pub mod search;

pub use compress::{compress, compress_as, compress_image, CompressError, Compressed};
pub use decode::{decode_image, is_supported_extension, stored_color, DecodeError, StoredColor};
pub use encode::{encode, EncodeError, EncodingFormat};
pub use search::{
    search, search_with, CompressionResult, QualityRange, SearchError, TargetSize,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reexports_compose() {
        let target = TargetSize::from_kb(200).unwrap();
        let result = search_with(QualityRange::DEFAULT, target, |q| {
            Ok(vec![0u8; usize::from(q) * 4096])
        })
        .unwrap();
        assert_eq!(result.quality(), Some(50));
    }
}
