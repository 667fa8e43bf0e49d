//! Input frames and sequence validation.
//!
//! This module defines the grayscale [`Frame`] type and the validated
//! [`FrameSequence`] the analysis core consumes. How frames are produced
//! (decoding, grayscale conversion, temporal ordering) is the loader's
//! concern; shape invariants are enforced here.

mod frame;
mod sequence;

pub use frame::Frame;
pub use sequence::{FrameSequence, ValidationError};
