//! Encoder adapter for the quality search.
//!
//! This module provides functionality for:
//! - Choosing an output format from the source color type ([`EncodingFormat`])
//! - Encoding JPEG at a given quality
//! - Encoding PNG at maximum compression effort
//!
//! Every encoder is a pure function of its inputs: same pixels, same format,
//! same quality, same bytes. Nothing here writes to disk.
//!
//! # Examples
//!
//! ```ignore
//! use fitsize_core::encode::{encode, EncodingFormat};
//!
//! let format = EncodingFormat::for_image(&image);
//! let prepared = format.prepare(&image);
//! let bytes = encode(&prepared, format, 80)?;
//! ```

mod format;
mod jpeg;
mod png;
mod types;

pub use format::{encode, EncodingFormat};
pub use jpeg::encode_jpeg;
pub use self::png::encode_png;
pub use types::EncodeError;
