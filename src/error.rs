//! Error types for startup-time loading
//!
//! Gameplay itself never fails; only configuration, assets and the GPU can.

use std::path::{Path, PathBuf};

use crate::assets::ImageId;

#[derive(thiserror::Error, Debug)]
pub enum GameError {
    /// Malformed JSON in a tuning, settings or atlas file
    #[error("invalid config: {0}")]
    Config(#[from] serde_json::Error),

    /// A file could not be read
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Atlas entry is missing or has an unusable size
    #[error("invalid asset {}: {reason}", image.file_name())]
    InvalidAsset { image: ImageId, reason: String },

    /// Adapter/device/surface creation failed
    #[error("gpu error: {0}")]
    Gpu(String),
}

/// Read a whole file, tagging failures with the path
pub(crate) fn read_to_string(path: &Path) -> Result<String, GameError> {
    std::fs::read_to_string(path).map_err(|source| GameError::Io {
        path: path.to_path_buf(),
        source,
    })
}
