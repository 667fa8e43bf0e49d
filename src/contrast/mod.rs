//! The contrast-map computation engine.
//!
//! Combines windowed temporal statistics with a row-partitioned parallel
//! assembler: per output coordinate, the spatial average over an SxS
//! window of each pixel's temporal contrast (stdDev/mean across frames),
//! scaled into byte intensities.

mod assembler;
mod map;
mod statistics;

pub use assembler::{ContrastAnalyzer, ContrastError};
pub use map::ContrastMap;
pub use statistics::window_contrast;
