//! Application configuration.
//!
//! Settings load from a TOML file; a missing file is not an error and
//! falls back to defaults, so the tool runs out of the box against a
//! `data/` directory.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::warn;

/// Filesystem locations for input frames and output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Directory containing the input frame sequence.
    pub data_dir: PathBuf,
    /// Directory the output image is written into.
    pub results_dir: PathBuf,
    /// Filename for the generated contrast map.
    pub output_filename: String,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            results_dir: PathBuf::from("results"),
            output_filename: String::from("result.png"),
        }
    }
}

/// Parameters of the contrast algorithm.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlgorithmConfig {
    /// Side length of the square spatial averaging window. The default
    /// of 1 means purely temporal contrast, no spatial averaging.
    pub window_size: u32,
    /// Worker count for the parallel assembler. Defaults to the number
    /// of available logical cores when unset.
    pub workers: Option<usize>,
}

impl Default for AlgorithmConfig {
    fn default() -> Self {
        Self {
            window_size: 1,
            workers: None,
        }
    }
}

/// Root configuration, one section per concern.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub paths: PathsConfig,
    #[serde(default)]
    pub algorithm: AlgorithmConfig,
}

/// Configuration loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config file '{path}': {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

impl Config {
    /// Loads configuration from a TOML file.
    ///
    /// A missing file logs a warning and yields the defaults; any other
    /// read failure, or a file that does not parse, is an error.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(source) if source.kind() == std::io::ErrorKind::NotFound => {
                warn!(path = %path.display(), "config file not found, using default settings");
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ConfigError::FileRead {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Full path of the output image.
    pub fn output_path(&self) -> PathBuf {
        self.paths.results_dir.join(&self.paths.output_filename)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.paths.data_dir, PathBuf::from("data"));
        assert_eq!(config.algorithm.window_size, 1);
        assert_eq!(config.algorithm.workers, None);
        assert_eq!(config.output_path(), PathBuf::from("results/result.png"));
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let config = Config::load("/nonexistent/tlasca.toml").unwrap();
        assert_eq!(config.algorithm.window_size, 1);
    }

    #[test]
    fn test_parse_full_file() {
        let text = r#"
            [paths]
            data_dir = "frames"
            results_dir = "out"
            output_filename = "map.png"

            [algorithm]
            window_size = 5
            workers = 2
        "#;
        let config: Config = toml::from_str(text).unwrap();

        assert_eq!(config.paths.data_dir, PathBuf::from("frames"));
        assert_eq!(config.algorithm.window_size, 5);
        assert_eq!(config.algorithm.workers, Some(2));
    }

    #[test]
    fn test_partial_file_keeps_section_defaults() {
        let text = r#"
            [algorithm]
            window_size = 3
        "#;
        let config: Config = toml::from_str(text).unwrap();

        assert_eq!(config.algorithm.window_size, 3);
        assert_eq!(config.paths.output_filename, "result.png");
    }

    #[test]
    fn test_malformed_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tlasca.toml");
        std::fs::write(&path, "not = [valid").unwrap();

        assert!(matches!(
            Config::load(&path),
            Err(ConfigError::Parse { .. })
        ));
    }
}
