//! Temporal Laser Speckle Contrast Analysis (tLASCA)
//!
//! Computes a temporal speckle-contrast map from an ordered sequence of
//! equally-sized grayscale frames: for every spatial location, how much
//! the local intensity fluctuates over time relative to its mean. The
//! result is a single grayscale image whose brightness encodes local
//! temporal variability, used to visualize motion and flow activity in
//! a recorded sequence.
//!
//! # Architecture
//!
//! ```text
//! io (load + order frames) → sequence (validate) → contrast (compute) → io (save)
//!                                                      ↑
//!                                              config (parameters)
//! ```
//!
//! # Design Principles
//!
//! - **Validate first**: all input-shape preconditions are checked
//!   before any computation; there is never a partial map.
//! - **Deterministic parallelism**: workers own disjoint row bands of
//!   the output, so the map is bit-for-bit identical for any worker
//!   count or scheduling.
//! - **Guarded arithmetic**: a pixel that is dark across every frame
//!   contributes zero contrast, never NaN or infinity.
//!
//! # Example
//!
//! ```
//! use tlasca::{ContrastAnalyzer, Frame, FrameSequence};
//!
//! // Two 3x3 frames with a 100-point intensity swing.
//! let frames = vec![
//!     Frame::new(vec![50u8; 9], 3, 3),
//!     Frame::new(vec![150u8; 9], 3, 3),
//! ];
//! let sequence = FrameSequence::new(frames).unwrap();
//!
//! let analyzer = ContrastAnalyzer::new(1);
//! let map = analyzer.compute(&sequence).unwrap();
//!
//! assert_eq!(map.width(), 3);
//! assert_eq!(map.intensity(0, 0), 180); // round(0.7071 * 255)
//! ```

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]
#![deny(unsafe_code)]

pub mod config;
pub mod contrast;
pub mod io;
pub mod sequence;

// Re-export commonly used types at crate root
pub use config::Config;
pub use contrast::{ContrastAnalyzer, ContrastError, ContrastMap};
pub use sequence::{Frame, FrameSequence, ValidationError};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
