//! Parallel assembly of the full contrast map.
//!
//! The output rows are split into contiguous, non-overlapping bands, one
//! per worker. Each worker computes its band independently and writes
//! only into its own disjoint slice of the result buffer, so the map is
//! race-free by construction and bit-for-bit deterministic regardless of
//! worker count or scheduling. A single join barrier separates
//! computation from scaling; no partial map is ever observable.

use std::num::NonZeroUsize;
use std::ops::Range;

use rayon::prelude::*;
use thiserror::Error;
use tracing::debug;

use super::map::ContrastMap;
use super::statistics::window_contrast;
use crate::sequence::{FrameSequence, ValidationError};

/// Errors produced by [`ContrastAnalyzer::compute`].
#[derive(Debug, Clone, Error)]
pub enum ContrastError {
    /// An input-shape precondition was violated; nothing was computed.
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// A worker produced a non-finite contrast value. Unreachable given
    /// the guarded division in the statistics stage, but surfaced
    /// explicitly rather than letting NaN/Inf reach the output.
    #[error("internal computation fault: non-finite contrast at ({x}, {y})")]
    Internal { x: u32, y: u32 },
}

/// Computes temporal speckle-contrast maps from frame sequences.
///
/// Holds the algorithm parameters; the analyzer itself is stateless
/// across invocations. A window size of 1 means purely temporal contrast
/// with no spatial averaging.
#[derive(Debug, Clone)]
pub struct ContrastAnalyzer {
    window_size: u32,
    workers: usize,
}

impl ContrastAnalyzer {
    /// Creates an analyzer using all available parallelism.
    pub fn new(window_size: u32) -> Self {
        let workers = std::thread::available_parallelism()
            .map(NonZeroUsize::get)
            .unwrap_or(1);
        Self::with_workers(window_size, workers)
    }

    /// Creates an analyzer with an explicit worker count (minimum 1).
    pub fn with_workers(window_size: u32, workers: usize) -> Self {
        Self {
            window_size,
            workers: workers.max(1),
        }
    }

    /// Returns the configured window size.
    #[inline]
    pub fn window_size(&self) -> u32 {
        self.window_size
    }

    /// Returns the configured worker count.
    #[inline]
    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Computes the contrast map for the whole sequence.
    ///
    /// Output dimensions are `(W - S + 1) x (H - S + 1)`. The call is
    /// synchronous and atomic from the caller's perspective: it returns
    /// a fully populated map or an error, never a partial result.
    pub fn compute(&self, sequence: &FrameSequence) -> Result<ContrastMap, ContrastError> {
        let (width, height) = (sequence.width(), sequence.height());
        let max_window = width.min(height);
        if self.window_size < 1 || self.window_size > max_window {
            return Err(ValidationError::WindowSizeOutOfRange {
                got: self.window_size,
                max: max_window,
                width,
                height,
            }
            .into());
        }

        let out_width = (width - self.window_size + 1) as usize;
        let out_height = (height - self.window_size + 1) as usize;
        debug!(
            frames = sequence.len(),
            out_width,
            out_height,
            workers = self.workers,
            "computing contrast map"
        );

        let mut values = vec![0.0f64; out_width * out_height];

        // Split the buffer into one disjoint band per row range. Each
        // worker owns exactly the rows of its band, so no two workers
        // ever write the same cell.
        let ranges = partition_rows(out_height, self.workers);
        let mut bands: Vec<(Range<usize>, &mut [f64])> = Vec::with_capacity(ranges.len());
        let mut rest = values.as_mut_slice();
        for range in ranges {
            let (band, tail) = rest.split_at_mut(range.len() * out_width);
            bands.push((range, band));
            rest = tail;
        }

        bands.into_par_iter().try_for_each(|(rows, band)| {
            for (band_row, y) in rows.enumerate() {
                let row = &mut band[band_row * out_width..(band_row + 1) * out_width];
                for (x, cell) in row.iter_mut().enumerate() {
                    let contrast =
                        window_contrast(sequence, self.window_size, x as u32, y as u32);
                    if !contrast.is_finite() {
                        return Err(ContrastError::Internal {
                            x: x as u32,
                            y: y as u32,
                        });
                    }
                    *cell = contrast;
                }
            }
            Ok(())
        })?;

        let pixels = values.iter().map(|&c| scale_to_intensity(c)).collect();
        Ok(ContrastMap::new(pixels, out_width as u32, out_height as u32))
    }
}

/// Splits `rows` output rows into `workers` contiguous, gapless ranges.
///
/// Every range except the last holds `floor(rows / workers)` rows; the
/// last absorbs the remainder. Ordering and coverage are deterministic
/// for a given (rows, workers) pair.
fn partition_rows(rows: usize, workers: usize) -> Vec<Range<usize>> {
    let per_worker = rows / workers;
    (0..workers)
        .map(|i| {
            let start = i * per_worker;
            let end = if i == workers - 1 {
                rows
            } else {
                (i + 1) * per_worker
            };
            start..end
        })
        .collect()
}

/// Scales a contrast value into the byte intensity range.
///
/// Contrast is non-negative by construction, so only the upper bound
/// needs clamping.
fn scale_to_intensity(contrast: f64) -> u8 {
    (contrast * 255.0).round().min(255.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sequence::Frame;
    use proptest::prelude::*;

    fn uniform_frame(value: u8, width: u32, height: u32) -> Frame {
        Frame::new(vec![value; (width * height) as usize], width, height)
    }

    fn sequence_of(frames: Vec<Frame>) -> FrameSequence {
        FrameSequence::new(frames).unwrap()
    }

    #[test]
    fn test_partition_even_split() {
        let ranges = partition_rows(8, 4);
        assert_eq!(ranges, vec![0..2, 2..4, 4..6, 6..8]);
    }

    #[test]
    fn test_partition_last_absorbs_remainder() {
        let ranges = partition_rows(10, 4);
        assert_eq!(ranges, vec![0..2, 2..4, 4..6, 6..10]);
    }

    #[test]
    fn test_partition_more_workers_than_rows() {
        let ranges = partition_rows(2, 5);
        assert_eq!(ranges.len(), 5);
        assert!(ranges[..4].iter().all(|r| r.is_empty()));
        assert_eq!(ranges[4], 0..2);
    }

    proptest! {
        #[test]
        fn prop_partition_gapless_and_complete(
            rows in 1usize..500,
            workers in 1usize..32,
        ) {
            let ranges = partition_rows(rows, workers);
            prop_assert_eq!(ranges.len(), workers);

            let mut next = 0;
            for range in &ranges {
                prop_assert_eq!(range.start, next);
                next = range.end;
            }
            prop_assert_eq!(next, rows);
        }

        #[test]
        fn prop_output_dimension_law(
            width in 1u32..16,
            height in 1u32..16,
            window_size in 1u32..16,
        ) {
            prop_assume!(window_size <= width.min(height));
            let seq = sequence_of(vec![
                uniform_frame(60, width, height),
                uniform_frame(90, width, height),
            ]);

            let map = ContrastAnalyzer::with_workers(window_size, 3)
                .compute(&seq)
                .unwrap();
            prop_assert_eq!(map.width(), width - window_size + 1);
            prop_assert_eq!(map.height(), height - window_size + 1);
        }
    }

    #[test]
    fn test_output_dimension_law() {
        let seq = sequence_of(vec![uniform_frame(10, 7, 5), uniform_frame(20, 7, 5)]);

        let map = ContrastAnalyzer::with_workers(3, 2).compute(&seq).unwrap();
        assert_eq!(map.width(), 5);
        assert_eq!(map.height(), 3);
    }

    #[test]
    fn test_constant_sequence_all_zero() {
        let seq = sequence_of(vec![uniform_frame(100, 3, 3), uniform_frame(100, 3, 3)]);

        let map = ContrastAnalyzer::with_workers(1, 1).compute(&seq).unwrap();
        assert_eq!(map.width(), 3);
        assert_eq!(map.height(), 3);
        assert!(map.pixels().iter().all(|&v| v == 0));
    }

    #[test]
    fn test_two_frame_scenario_scales_to_180() {
        // mean 100, sample stdDev sqrt(5000): contrast ~= 0.7071,
        // round(0.7071 * 255) = 180 in every cell.
        let seq = sequence_of(vec![uniform_frame(50, 3, 3), uniform_frame(150, 3, 3)]);

        let map = ContrastAnalyzer::with_workers(1, 4).compute(&seq).unwrap();
        assert!(map.pixels().iter().all(|&v| v == 180));
    }

    #[test]
    fn test_clamps_high_contrast_to_255() {
        // Values 1 and 255: mean 128, stdDev = 127 * sqrt(2) ~= 179.6,
        // contrast ~= 1.40, which overflows the byte range before clamping.
        let seq = sequence_of(vec![uniform_frame(1, 2, 2), uniform_frame(255, 2, 2)]);

        let map = ContrastAnalyzer::with_workers(1, 1).compute(&seq).unwrap();
        assert!(map.pixels().iter().all(|&v| v == 255));
    }

    #[test]
    fn test_worker_count_invariance() {
        let frames: Vec<Frame> = (0..4)
            .map(|t| {
                let pixels = (0..9 * 7).map(|i| ((i * 13 + t * 41) % 251) as u8).collect();
                Frame::new(pixels, 9, 7)
            })
            .collect();
        let seq = sequence_of(frames);

        let single = ContrastAnalyzer::with_workers(2, 1).compute(&seq).unwrap();
        for workers in [2, 3, 8, 64] {
            let multi = ContrastAnalyzer::with_workers(2, workers)
                .compute(&seq)
                .unwrap();
            assert_eq!(single, multi, "map changed with {} workers", workers);
        }
    }

    #[test]
    fn test_repeated_invocations_identical() {
        let frames: Vec<Frame> = (0..3)
            .map(|t| {
                let pixels = (0..25).map(|i| ((i * 7 + t * 29) % 256) as u8).collect();
                Frame::new(pixels, 5, 5)
            })
            .collect();
        let seq = sequence_of(frames);
        let analyzer = ContrastAnalyzer::with_workers(2, 4);

        let first = analyzer.compute(&seq).unwrap();
        let second = analyzer.compute(&seq).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_window_size_zero_rejected() {
        let seq = sequence_of(vec![uniform_frame(10, 4, 4), uniform_frame(20, 4, 4)]);

        let result = ContrastAnalyzer::with_workers(0, 1).compute(&seq);
        assert!(matches!(
            result,
            Err(ContrastError::Validation(
                ValidationError::WindowSizeOutOfRange { got: 0, .. }
            ))
        ));
    }

    #[test]
    fn test_window_size_exceeding_frame_rejected() {
        let seq = sequence_of(vec![uniform_frame(10, 4, 6), uniform_frame(20, 4, 6)]);

        let result = ContrastAnalyzer::with_workers(5, 1).compute(&seq);
        assert!(matches!(
            result,
            Err(ContrastError::Validation(
                ValidationError::WindowSizeOutOfRange { got: 5, max: 4, .. }
            ))
        ));
    }

    #[test]
    fn test_window_equal_to_min_dimension_allowed() {
        let seq = sequence_of(vec![uniform_frame(10, 4, 6), uniform_frame(20, 4, 6)]);

        let map = ContrastAnalyzer::with_workers(4, 1).compute(&seq).unwrap();
        assert_eq!(map.width(), 1);
        assert_eq!(map.height(), 3);
    }
}
