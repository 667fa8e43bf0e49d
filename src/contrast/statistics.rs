//! Windowed temporal speckle statistics.
//!
//! Speckle contrast is the ratio of standard deviation to mean of an
//! intensity signal. Here the signal is temporal: each pixel's intensity
//! time series across the frame sequence. A square spatial window then
//! averages the per-pixel contrasts into one value per window position.

use crate::sequence::FrameSequence;

/// Computes the average temporal contrast over a square window.
///
/// The window spans `x..x+window_size` by `y..y+window_size` and must lie
/// fully inside the frame bounds; the assembler's iteration range
/// guarantees this. For each window pixel the intensity time series is
/// reduced to stdDev/mean, and the window value is the mean of those
/// per-pixel contrasts.
///
/// The variance divisor is N-1 (sample variance): the recorded frames
/// are a finite sample of the speckle process, not the full population.
/// A pixel that is dark in every frame has an undefined stdDev/mean
/// ratio and contributes 0 instead, so the result is always finite and
/// non-negative.
pub fn window_contrast(sequence: &FrameSequence, window_size: u32, x: u32, y: u32) -> f64 {
    debug_assert!(window_size >= 1);
    debug_assert!(x + window_size <= sequence.width());
    debug_assert!(y + window_size <= sequence.height());

    let frames = sequence.frames();
    let n = frames.len() as f64;
    let mut contrast_sum = 0.0;

    for dy in 0..window_size {
        for dx in 0..window_size {
            let (px, py) = (x + dx, y + dy);

            let mean: f64 = frames
                .iter()
                .map(|frame| frame.intensity(px, py) as f64)
                .sum::<f64>()
                / n;

            let sum_sq_diff: f64 = frames
                .iter()
                .map(|frame| {
                    let diff = frame.intensity(px, py) as f64 - mean;
                    diff * diff
                })
                .sum();

            let variance = sum_sq_diff / (n - 1.0);
            let std_dev = variance.sqrt();

            if mean > 0.0 {
                contrast_sum += std_dev / mean;
            }
        }
    }

    contrast_sum / (window_size as f64 * window_size as f64)
}
