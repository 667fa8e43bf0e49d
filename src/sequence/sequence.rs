//! Validated, time-ordered frame sequences.
//!
//! Temporal contrast is only defined over at least two frames of
//! identical dimensions, so those invariants are checked once here,
//! before any computation is dispatched.

use super::Frame;
use thiserror::Error;

/// Input-shape precondition violations.
///
/// All variants are detected before computation starts; a
/// `ValidationError` never leaves a partial result behind.
#[derive(Debug, Clone, Error)]
pub enum ValidationError {
    #[error("frame sequence must contain at least 2 frames, got {0}")]
    TooFewFrames(usize),
    #[error(
        "frame {index} is {got_width}x{got_height}, expected {expected_width}x{expected_height}"
    )]
    DimensionMismatch {
        index: usize,
        expected_width: u32,
        expected_height: u32,
        got_width: u32,
        got_height: u32,
    },
    #[error("frame {index} has {got} pixel bytes, expected {expected} for its dimensions")]
    InvalidFrameBuffer {
        index: usize,
        expected: usize,
        got: usize,
    },
    #[error("window size must be between 1 and {max} for {width}x{height} frames, got {got}")]
    WindowSizeOutOfRange {
        got: u32,
        max: u32,
        width: u32,
        height: u32,
    },
}

/// An ordered sequence of same-dimension grayscale frames.
///
/// Index 0..N-1 represents strictly increasing time order (ordering is
/// established by the loader). Construction enforces N >= 2 and uniform
/// dimensions; afterwards the sequence is read-only.
#[derive(Debug, Clone)]
pub struct FrameSequence {
    frames: Vec<Frame>,
    width: u32,
    height: u32,
}

impl FrameSequence {
    /// Builds a sequence from time-ordered frames, validating shape.
    pub fn new(frames: Vec<Frame>) -> Result<Self, ValidationError> {
        if frames.len() < 2 {
            return Err(ValidationError::TooFewFrames(frames.len()));
        }

        let width = frames[0].width();
        let height = frames[0].height();
        for (index, frame) in frames.iter().enumerate() {
            if frame.width() != width || frame.height() != height {
                return Err(ValidationError::DimensionMismatch {
                    index,
                    expected_width: width,
                    expected_height: height,
                    got_width: frame.width(),
                    got_height: frame.height(),
                });
            }
            // Dimensions alone are not enough: the buffer must actually
            // hold width * height samples, or pixel lookups go out of
            // bounds mid-computation.
            if !frame.is_valid() {
                return Err(ValidationError::InvalidFrameBuffer {
                    index,
                    expected: frame.pixel_count(),
                    got: frame.pixels().len(),
                });
            }
        }

        Ok(Self {
            frames,
            width,
            height,
        })
    }

    /// Returns the shared frame width.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Returns the shared frame height.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns the number of frames.
    #[inline]
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Always false: an empty sequence cannot be constructed.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Returns the time-ordered frames.
    #[inline]
    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }
}
