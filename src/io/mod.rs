//! Frame loading and contrast-map persistence.
//!
//! The analysis core operates on fully materialized in-memory
//! sequences; this module is the boundary that turns a directory of
//! numbered PNG files into a validated [`FrameSequence`](crate::sequence::FrameSequence)
//! and writes the resulting map back out.

mod loader;
mod writer;

pub use loader::{discover_frames, load_sequence, numeric_key, LoadError};
pub use writer::{save_map, SaveError};
