//! Foreground classification.
//!
//! Turns an RGBA sprite sheet into a boolean grid separating sprite content
//! from the sheet's dark background fill. Only the color channels take part
//! in the decision; alpha is carried through untouched to the crop step.

use image::{GrayImage, RgbaImage};
use serde::{Deserialize, Serialize};

/// Default channel threshold: a pixel with any of R, G, B above this is foreground.
pub const DEFAULT_THRESHOLD: u8 = 20;

/// Rule deciding whether a pixel belongs to a sprite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForegroundRule {
    /// Strict lower bound on at least one of the red, green, or blue channels
    pub threshold: u8,
}

impl Default for ForegroundRule {
    fn default() -> Self {
        Self { threshold: DEFAULT_THRESHOLD }
    }
}

impl ForegroundRule {
    pub fn new(threshold: u8) -> Self {
        Self { threshold }
    }

    /// True if any color channel of `rgba` exceeds the threshold.
    #[inline]
    pub fn is_foreground(&self, rgba: [u8; 4]) -> bool {
        let [r, g, b, _a] = rgba;
        r > self.threshold || g > self.threshold || b > self.threshold
    }
}

/// Row-major boolean grid with the same dimensions as its source image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForegroundMask {
    width: u32,
    height: u32,
    cells: Vec<bool>,
}

impl ForegroundMask {
    /// Build a mask from rows of booleans. All rows must share one length.
    ///
    /// Returns `None` if the rows are ragged.
    pub fn from_rows(rows: &[Vec<bool>]) -> Option<Self> {
        let height = rows.len() as u32;
        let width = rows.first().map(|r| r.len()).unwrap_or(0);
        if rows.iter().any(|r| r.len() != width) {
            return None;
        }
        let cells = rows.iter().flatten().copied().collect();
        Some(Self { width: width as u32, height, cells })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Foreground flag at (x, y). Out-of-bounds coordinates read as background.
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        self.cells[(y as usize) * (self.width as usize) + x as usize]
    }

    /// Number of foreground pixels.
    pub fn count(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }

    /// Render as a grayscale image: 255 for foreground, 0 for background.
    pub fn to_gray_image(&self) -> GrayImage {
        let raw = self.cells.iter().map(|&c| if c { u8::MAX } else { 0 }).collect();
        GrayImage::from_raw(self.width, self.height, raw)
            .unwrap_or_else(|| GrayImage::new(self.width, self.height))
    }
}

/// Classify every pixel of `image` with `rule`.
pub fn classify(image: &RgbaImage, rule: &ForegroundRule) -> ForegroundMask {
    let cells = image.pixels().map(|p| rule.is_foreground(p.0)).collect();
    ForegroundMask { width: image.width(), height: image.height(), cells }
}
