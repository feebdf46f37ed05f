//! Sprite sheet loading

use image::RgbaImage;
use std::path::Path;
use tracing::debug;

use crate::error::Result;

/// Open and decode a sprite sheet, converting it to 8-bit RGBA.
///
/// Grayscale, RGB, and palette images all come back with four channels, so
/// the classifier always has red, green, and blue to look at.
pub fn load_sheet(path: &Path) -> Result<RgbaImage> {
    let image = image::open(path)?.to_rgba8();
    debug!(path = %path.display(), width = image.width(), height = image.height(), "loaded sheet");
    Ok(image)
}
