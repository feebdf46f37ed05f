//! Spritecut - Library for splitting sprite sheets into individual sprites
//!
//! This library provides functionality to:
//! - Classify sheet pixels as sprite content or dark background
//! - Label connected sprite regions (4- or 8-connectivity)
//! - Crop each region's bounding box and save it as a PNG
//! - Describe the extracted sprites in a JSON manifest

pub mod cli;
pub mod config;
pub mod error;
pub mod extract;
pub mod labeling;
pub mod manifest;
pub mod mask;
pub mod output;
pub mod region;
pub mod source;

pub use error::{ExtractError, Result};
pub use extract::{extract, segment, ExtractConfig, Segmentation, Sprite, Sprites};
pub use labeling::{label_components, Connectivity, LabelGrid};
pub use mask::{classify, ForegroundMask, ForegroundRule};
pub use output::{write_all, DirectorySink, MemorySink, SpriteSink};
pub use region::{bounding_boxes, Region};
