//! Binary search over the integer quality axis.

use image::DynamicImage;
use tracing::{debug, trace};

use super::{CompressionResult, QualityRange, SearchError, TargetSize};
use crate::encode::{encode, EncodeError, EncodingFormat};

/// Find the highest quality in `range` whose encoding fits `target`.
///
/// `oracle` maps a quality level to the encoded bytes at that level. It is
/// assumed to be monotonic: a higher quality never yields a smaller output.
/// When that holds, the result is the exact maximal fitting quality. When
/// it does not, the result is still a fitting encoding, but a higher
/// fitting quality may exist outside the probed path.
///
/// The loop always runs, even when `range.max()` would fit; at most
/// [`QualityRange::max_probes`] oracle calls are made. Trial encodings that
/// are not the current best are dropped immediately.
///
/// # Errors
///
/// Returns [`SearchError::Encode`] as soon as the oracle fails. No retries
/// are made since a deterministic oracle would fail the same way again.
pub fn search_with<F>(
    range: QualityRange,
    target: TargetSize,
    mut oracle: F,
) -> Result<CompressionResult, SearchError>
where
    F: FnMut(u8) -> Result<Vec<u8>, EncodeError>,
{
    trace!(
        min = range.min(),
        max = range.max(),
        max_probes = range.max_probes(),
        target_kb = target.kb(),
        "search started"
    );

    // Signed bounds so `mid - 1` cannot underflow when `min == 0`.
    let mut low = i32::from(range.min());
    let mut high = i32::from(range.max());
    let mut best: Option<(u8, Vec<u8>)> = None;

    while low <= high {
        let mid = (low + high) / 2;
        // Always within `range`, so within u8.
        let quality = mid as u8;

        let bytes = oracle(quality)?;
        let size_bytes = bytes.len();
        let fits = target.fits(size_bytes);
        debug!(quality, size_bytes, target_kb = target.kb(), fits, "trial encode");

        if fits {
            // Success narrows upward, so this always beats the previous best.
            best = Some((quality, bytes));
            low = mid + 1;
        } else {
            high = mid - 1;
        }
    }

    Ok(match best {
        Some((quality, bytes)) => {
            trace!(quality, "search converged");
            CompressionResult::Success {
                quality,
                size_bytes: bytes.len(),
                bytes,
            }
        }
        None => {
            trace!(min = range.min(), "minimum quality overshoots target");
            CompressionResult::no_quality_meets_target()
        }
    })
}

/// Search using the real encoder as the oracle.
///
/// `image` should already be prepared for `format` (see
/// [`EncodingFormat::prepare`]); it is borrowed read-only for every trial.
pub fn search(
    image: &DynamicImage,
    format: EncodingFormat,
    target: TargetSize,
    range: QualityRange,
) -> Result<CompressionResult, SearchError> {
    search_with(range, target, |quality| encode(image, format, quality))
}


// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    /// Strategy for valid quality ranges.
    fn range_strategy() -> impl Strategy<Value = QualityRange> {
        (0u8..=255, 0u8..=255).prop_map(|(a, b)| QualityRange::new(a.min(b), a.max(b)).unwrap())
    }

    /// Strictly increasing size in bytes: `base + step * quality`.
    fn linear_size(base: usize, step: usize, quality: u8) -> usize {
        base + step * usize::from(quality)
    }

    proptest! {
        /// Property: On a strictly monotonic curve the search finds exactly
        /// the maximal fitting quality a linear scan would.
        #[test]
        fn prop_matches_linear_scan_on_monotonic_curve(
            range in range_strategy(),
            base in 0usize..=4096,
            step in 1usize..=512,
            target_kb in 1u64..=200,
        ) {
            let target = TargetSize::from_kb(target_kb).unwrap();
            let result = search_with(range, target, |q| Ok(vec![0u8; linear_size(base, step, q)])).unwrap();

            let expected = (range.min()..=range.max())
                .rev()
                .find(|&q| target.fits(linear_size(base, step, q)));

            prop_assert_eq!(result.quality(), expected);
            if let CompressionResult::Success { quality, size_bytes, bytes } = &result {
                prop_assert_eq!(*size_bytes, linear_size(base, step, *quality));
                prop_assert_eq!(bytes.len(), *size_bytes);
            }
        }

        /// Property: Oracle calls never exceed ceil(log2(len)) + 1.
        #[test]
        fn prop_call_count_bound(
            range in range_strategy(),
            threshold in 0u8..=255,
        ) {
            let target = TargetSize::from_kb(1).unwrap();
            let mut calls = 0u32;
            let _ = search_with(range, target, |q| {
                calls += 1;
                let len = if q <= threshold { 1 } else { 4096 };
                Ok(vec![0u8; len])
            }).unwrap();

            prop_assert!(calls <= range.max_probes(), "calls={} bound={}", calls, range.max_probes());
        }

        /// Property: If the minimum quality overshoots, the result is Failure.
        #[test]
        fn prop_unreachable_target_fails(
            range in range_strategy(),
            target_kb in 1u64..=64,
        ) {
            let target = TargetSize::from_kb(target_kb).unwrap();
            let too_big = target.bytes() as usize + 1;
            let result = search_with(range, target, |_| Ok(vec![0u8; too_big])).unwrap();
            prop_assert_eq!(result, CompressionResult::no_quality_meets_target());
        }

        /// Property: If the maximum quality fits, the result is max.
        #[test]
        fn prop_always_reachable_returns_max(range in range_strategy()) {
            let target = TargetSize::from_kb(1).unwrap();
            let result = search_with(range, target, |q| Ok(vec![0u8; usize::from(q)])).unwrap();
            prop_assert_eq!(result.quality(), Some(range.max()));
        }

        /// Property: The chosen quality always lies inside the range.
        #[test]
        fn prop_result_within_range(
            range in range_strategy(),
            sizes in prop::collection::vec(0usize..=3000, 256),
        ) {
            let target = TargetSize::from_kb(1).unwrap();
            let result = search_with(range, target, |q| Ok(vec![0u8; sizes[usize::from(q)]])).unwrap();
            if let Some(q) = result.quality() {
                prop_assert!((range.min()..=range.max()).contains(&q));
                prop_assert!(target.fits(sizes[usize::from(q)]));
            }
        }
    }
}
