//! Size-targeted quality search.
//!
//! This module maps a target size budget to an encoder quality level
//! without trying every level:
//! - [`search_with`] runs the binary search against any quality -> bytes oracle
//! - [`search`] binds the oracle to the real [`crate::encode::encode`]
//!
//! # Monotonicity
//!
//! The search assumes encoded size never decreases as quality rises. Most
//! encoders honour this for a fixed image, but some JPEG encoders show small
//! local inversions near quantization table transitions. The search does not
//! correct for them: it still returns a fitting encoding, just possibly not
//! the highest fitting one.
//!
//! # Examples
//!
//! ```ignore
//! use fitsize_core::search::{search_with, QualityRange, TargetSize};
//!
//! let target = TargetSize::from_kb(200).unwrap();
//! let result = search_with(QualityRange::DEFAULT, target, |q| Ok(vec![0; q as usize * 4096]))?;
//! assert_eq!(result.quality(), Some(50));
//! ```

mod binary;
mod types;

pub use binary::{search, search_with};
pub use types::{
    CompressionResult, QualityRange, SearchError, TargetSize, BYTES_PER_KB,
    NO_QUALITY_MEETS_TARGET,
};
