//! Frame-sequence discovery and loading.
//!
//! Input frames are PNG files whose names are their temporal index
//! ("0.png", "1.png", ... "12.png"). Lexicographic order would
//! interleave "10" before "2", so ordering derives from the numeric
//! stem, sorted ascending.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use crate::sequence::{Frame, FrameSequence, ValidationError};

/// Errors that can occur while loading a frame sequence.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("data directory '{0}' not found")]
    DataDirNotFound(PathBuf),
    #[error("no png files found in '{0}'")]
    NoFramesFound(PathBuf),
    #[error("frame filename '{0}' is not a number: frames must be named by temporal index")]
    InvalidFrameName(PathBuf),
    #[error("failed to read directory '{path}': {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to decode frame '{path}': {source}")]
    Decode {
        path: PathBuf,
        source: image::ImageError,
    },
    #[error(transparent)]
    InvalidSequence(#[from] ValidationError),
}

/// Extracts the temporal ordering key from a frame filename.
///
/// "12.png" maps to 12. Temporal indices are non-negative by
/// definition (frames are numbered from 0), so a signed stem such as
/// "-1.png" is treated as malformed. Any malformed stem is a
/// recoverable [`LoadError::InvalidFrameName`] so operators can fix the
/// offending file rather than lose the whole run to an abort.
pub fn numeric_key(path: &Path) -> Result<u64, LoadError> {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .and_then(|stem| stem.parse().ok())
        .ok_or_else(|| LoadError::InvalidFrameName(path.to_path_buf()))
}

/// Finds all PNG frames in `dir`, sorted by ascending temporal index.
pub fn discover_frames(dir: &Path) -> Result<Vec<PathBuf>, LoadError> {
    if !dir.is_dir() {
        return Err(LoadError::DataDirNotFound(dir.to_path_buf()));
    }

    let entries = fs::read_dir(dir).map_err(|source| LoadError::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut keyed: Vec<(u64, PathBuf)> = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| LoadError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
        let path = entry.path();
        let is_png = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("png"));
        if is_png {
            keyed.push((numeric_key(&path)?, path));
        }
    }

    if keyed.is_empty() {
        return Err(LoadError::NoFramesFound(dir.to_path_buf()));
    }

    keyed.sort_by_key(|(key, _)| *key);
    Ok(keyed.into_iter().map(|(_, path)| path).collect())
}

/// Loads and orders the full frame sequence from `dir`.
///
/// Each frame is decoded and converted to 8-bit luma; the resulting
/// sequence is shape-validated before it is returned. A single
/// unreadable frame fails the whole load, since the analysis requires a
/// complete, ordered sequence.
pub fn load_sequence(dir: &Path) -> Result<FrameSequence, LoadError> {
    let paths = discover_frames(dir)?;
    debug!(count = paths.len(), dir = %dir.display(), "loading frames");

    let mut frames = Vec::with_capacity(paths.len());
    for path in paths {
        let img = image::open(&path)
            .map_err(|source| LoadError::Decode {
                path: path.clone(),
                source,
            })?
            .into_luma8();
        let (width, height) = img.dimensions();
        frames.push(Frame::new(img.into_raw(), width, height));
    }

    Ok(FrameSequence::new(frames)?)
}
