//! Core types for the size-targeted quality search.

use std::num::NonZeroU64;

use serde::Serialize;
use thiserror::Error;

use crate::encode::EncodeError;

/// Reason carried by [`CompressionResult::Failure`].
pub const NO_QUALITY_MEETS_TARGET: &str = "no quality in range meets target";

/// Bytes per kilobyte. Targets are binary kilobytes throughout.
pub const BYTES_PER_KB: u64 = 1024;

/// Errors that can occur during a quality search.
#[derive(Debug, Error)]
pub enum SearchError {
    /// The lower quality bound is above the upper bound.
    #[error("Invalid quality range: min ({min}) must not exceed max ({max})")]
    InvalidRange { min: u8, max: u8 },

    /// The encoder failed while producing a trial encoding.
    #[error(transparent)]
    Encode(#[from] EncodeError),
}

/// Closed, inclusive range of encoder quality levels to search.
///
/// A `QualityRange` can only be built through [`QualityRange::new`], so every
/// value that reaches the search satisfies `min <= max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct QualityRange {
    min: u8,
    max: u8,
}

impl QualityRange {
    /// Default lower bound.
    pub const DEFAULT_MIN: u8 = 10;

    /// Default upper bound.
    pub const DEFAULT_MAX: u8 = 95;

    /// The `[10, 95]` range used when the caller does not pick one.
    pub const DEFAULT: Self = Self {
        min: Self::DEFAULT_MIN,
        max: Self::DEFAULT_MAX,
    };

    /// Create a new range between `min` and `max`, both inclusive.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidRange`] if `min > max`.
    pub fn new(min: u8, max: u8) -> Result<Self, SearchError> {
        if min > max {
            return Err(SearchError::InvalidRange { min, max });
        }
        Ok(Self { min, max })
    }

    /// Lowest quality in the range.
    #[inline]
    pub fn min(self) -> u8 {
        self.min
    }

    /// Highest quality in the range.
    #[inline]
    pub fn max(self) -> u8 {
        self.max
    }

    /// Number of quality levels in the range.
    #[inline]
    #[allow(clippy::len_without_is_empty)] // A valid range is never empty.
    pub fn len(self) -> u32 {
        u32::from(self.max - self.min) + 1
    }

    /// Upper bound on encoder invocations for one search over this range:
    /// `ceil(log2(len)) + 1`.
    pub fn max_probes(self) -> u32 {
        let len = self.len();
        let ceil_log2 = u32::BITS - (len - 1).leading_zeros();
        ceil_log2 + 1
    }
}

impl Default for QualityRange {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Caller-supplied upper bound on the encoded size, in binary kilobytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct TargetSize(NonZeroU64);

impl TargetSize {
    /// Create a target from a kilobyte count. Returns `None` for zero.
    pub fn from_kb(kb: u64) -> Option<Self> {
        NonZeroU64::new(kb).map(Self)
    }

    /// The target in kilobytes.
    #[inline]
    pub fn kb(self) -> u64 {
        self.0.get()
    }

    /// The target in bytes, saturating at `u64::MAX`.
    #[inline]
    pub fn bytes(self) -> u64 {
        self.0.get().saturating_mul(BYTES_PER_KB)
    }

    /// Check whether an encoding of `size_bytes` fits under the target.
    ///
    /// Equivalent to `size_bytes / 1024 <= kb` over the reals, evaluated
    /// without floating point.
    #[inline]
    pub fn fits(self, size_bytes: usize) -> bool {
        (size_bytes as u64) <= self.bytes()
    }
}

impl From<NonZeroU64> for TargetSize {
    fn from(kb: NonZeroU64) -> Self {
        Self(kb)
    }
}

/// Outcome of one search: exactly one is produced per input image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompressionResult {
    /// The highest quality found whose encoding fits the target.
    Success {
        /// Quality level that produced `bytes`.
        quality: u8,
        /// The encoded image.
        bytes: Vec<u8>,
        /// Length of `bytes`.
        size_bytes: usize,
    },
    /// Every probed quality overshot the target.
    Failure {
        /// Human-readable reason, always [`NO_QUALITY_MEETS_TARGET`].
        reason: &'static str,
    },
}

impl CompressionResult {
    /// A failure carrying the standard reason.
    pub fn no_quality_meets_target() -> Self {
        Self::Failure {
            reason: NO_QUALITY_MEETS_TARGET,
        }
    }

    /// Whether a fitting encoding was found.
    #[inline]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// The chosen quality, if any.
    pub fn quality(&self) -> Option<u8> {
        match self {
            Self::Success { quality, .. } => Some(*quality),
            Self::Failure { .. } => None,
        }
    }

    /// The encoded bytes, if any.
    pub fn bytes(&self) -> Option<&[u8]> {
        match self {
            Self::Success { bytes, .. } => Some(bytes),
            Self::Failure { .. } => None,
        }
    }

    /// The encoded size in binary kilobytes, if any.
    pub fn size_kb(&self) -> Option<f64> {
        match self {
            Self::Success { size_bytes, .. } => Some(*size_bytes as f64 / BYTES_PER_KB as f64),
            Self::Failure { .. } => None,
        }
    }
}
