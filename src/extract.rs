//! Sprite extraction pipeline.
//!
//! The pure half of the tool: classify pixels, label connected components,
//! box them, and crop. Nothing here touches the filesystem except
//! [`extract_to_dir`], which pairs the pipeline with a [`DirectorySink`].
//!
//! # Example
//!
//! ```
//! use image::{Rgba, RgbaImage};
//! use spritecut::extract::{segment, ExtractConfig};
//!
//! let mut sheet = RgbaImage::from_pixel(8, 4, Rgba([0, 0, 0, 255]));
//! sheet.put_pixel(1, 1, Rgba([255, 0, 0, 255]));
//! sheet.put_pixel(6, 2, Rgba([0, 0, 255, 255]));
//!
//! let segmentation = segment(&sheet, &ExtractConfig::default()).unwrap();
//! assert_eq!(segmentation.components, 2);
//!
//! let sprites: Vec<_> = segmentation.sprites(&sheet).collect();
//! assert_eq!(sprites[0].image.dimensions(), (1, 1));
//! ```

use image::RgbaImage;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

use crate::error::Result;
use crate::labeling::{label_components, Connectivity};
use crate::mask::{classify, ForegroundRule};
use crate::output::{write_all, DirectorySink};
use crate::region::{bounding_boxes, Region};

/// Tunables for one extraction run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractConfig {
    pub rule: ForegroundRule,
    pub connectivity: Connectivity,
}

/// One cropped sprite.
#[derive(Debug, Clone)]
pub struct Sprite {
    /// Zero-based position in extraction order
    pub index: usize,
    /// Source box in sheet coordinates
    pub region: Region,
    /// Pixels copied from the sheet, all four channels
    pub image: RgbaImage,
}

/// Result of classifying and labeling a sheet.
#[derive(Debug, Clone)]
pub struct Segmentation {
    /// Sheet dimensions [width, height]
    pub size: [u32; 2],
    /// Number of connected components found
    pub components: u32,
    /// One box per component, ordered by label id
    pub regions: Vec<Region>,
}

impl Segmentation {
    /// Lazily crop each region from `image`.
    pub fn sprites<'a>(&'a self, image: &'a RgbaImage) -> Sprites<'a> {
        extract(image, &self.regions)
    }
}

/// Classify, label, and box the sprites on `image`.
pub fn segment(image: &RgbaImage, config: &ExtractConfig) -> Result<Segmentation> {
    let mask = classify(image, &config.rule);
    debug!(foreground = mask.count(), threshold = config.rule.threshold, "classified sheet");

    let labels = label_components(&mask, config.connectivity);
    let regions = bounding_boxes(&labels)?;

    Ok(Segmentation { size: [image.width(), image.height()], components: labels.count(), regions })
}

/// Copy the pixels under `region` out of `image`.
pub fn crop(image: &RgbaImage, region: &Region) -> RgbaImage {
    image::imageops::crop_imm(image, region.x1, region.y1, region.width(), region.height())
        .to_image()
}

/// Iterator over cropped sprites, one per region, in region order.
pub struct Sprites<'a> {
    image: &'a RgbaImage,
    regions: std::iter::Enumerate<std::slice::Iter<'a, Region>>,
}

impl Iterator for Sprites<'_> {
    type Item = Sprite;

    fn next(&mut self) -> Option<Sprite> {
        let (index, region) = self.regions.next()?;
        Some(Sprite { index, region: *region, image: crop(self.image, region) })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.regions.size_hint()
    }
}

impl ExactSizeIterator for Sprites<'_> {}

/// Crop every region of `image`, lazily and in order.
pub fn extract<'a>(image: &'a RgbaImage, regions: &'a [Region]) -> Sprites<'a> {
    Sprites { image, regions: regions.iter().enumerate() }
}

/// Segment `image` and write every sprite into `dir` as `{prefix}{index}.png`.
///
/// Returns the number of files written, which is always the component count.
pub fn extract_to_dir(
    image: &RgbaImage,
    config: &ExtractConfig,
    dir: &Path,
    prefix: &str,
) -> Result<usize> {
    let segmentation = segment(image, config)?;
    let mut sink = DirectorySink::create(dir, prefix)?;
    let written = write_all(segmentation.sprites(image), &mut sink)?;
    info!(written, dir = %dir.display(), "extracted sprites");
    Ok(written)
}
