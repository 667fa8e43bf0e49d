//! Contrast-map persistence.

use std::fs;
use std::path::{Path, PathBuf};

use image::GrayImage;
use thiserror::Error;

use crate::contrast::ContrastMap;

/// Errors that can occur while saving a contrast map.
#[derive(Debug, Error)]
pub enum SaveError {
    #[error("failed to create results directory '{path}': {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to encode '{path}': {source}")]
    Encode {
        path: PathBuf,
        source: image::ImageError,
    },
    #[error("contrast map buffer does not match its dimensions")]
    InvalidMap,
}

/// Saves the contrast map as a grayscale PNG, creating parent
/// directories as needed.
pub fn save_map(path: &Path, map: &ContrastMap) -> Result<(), SaveError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|source| SaveError::CreateDir {
                path: parent.to_path_buf(),
                source,
            })?;
        }
    }

    let img = GrayImage::from_raw(map.width(), map.height(), map.pixels().to_vec())
        .ok_or(SaveError::InvalidMap)?;
    img.save(path).map_err(|source| SaveError::Encode {
        path: path.to_path_buf(),
        source,
    })
}
