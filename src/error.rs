//! Error type shared by the extraction pipeline

use std::io;
use thiserror::Error;

/// Errors raised while loading, segmenting, or writing a sprite sheet.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ExtractError {
    /// File system failure (unreadable input, unwritable output directory)
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    /// Decode or encode failure from the image crate
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
    /// A label id in `1..=count` owns no pixels. Only a labeling bug can cause this.
    #[error("internal error: label {0} has no pixels")]
    EmptyLabel(u32),
    /// Manifest serialization failure
    #[error("Manifest error: {0}")]
    Manifest(#[from] serde_json::Error),
}

/// Convenience alias for pipeline results.
pub type Result<T> = std::result::Result<T, ExtractError>;
