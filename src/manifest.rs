//! JSON manifest describing where each extracted sprite came from.
//!
//! # Example Output
//!
//! ```json
//! {
//!   "image": "sheet.png",
//!   "size": [256, 128],
//!   "threshold": 20,
//!   "connectivity": "eight",
//!   "sprites": [
//!     { "file": "icon_0.png", "index": 0, "x": 4, "y": 2, "w": 16, "h": 16, "area": 201 }
//!   ]
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::Result;
use crate::extract::{ExtractConfig, Segmentation};
use crate::labeling::Connectivity;
use crate::output::sprite_file_name;

/// Default manifest file name, placed in the output directory.
pub const DEFAULT_MANIFEST_NAME: &str = "sprites.json";

/// One sprite entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestEntry {
    pub file: String,
    pub index: usize,
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
    pub area: u32,
}

/// Whole-run manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    /// Source sheet file name
    pub image: String,
    pub size: [u32; 2],
    pub threshold: u8,
    pub connectivity: Connectivity,
    pub sprites: Vec<ManifestEntry>,
}

impl Manifest {
    /// Describe a segmentation whose sprites are named `{prefix}{index}.png`.
    pub fn new(
        image: impl Into<String>,
        segmentation: &Segmentation,
        config: &ExtractConfig,
        prefix: &str,
    ) -> Self {
        let sprites = segmentation
            .regions
            .iter()
            .enumerate()
            .map(|(index, r)| ManifestEntry {
                file: sprite_file_name(prefix, index),
                index,
                x: r.x1,
                y: r.y1,
                w: r.width(),
                h: r.height(),
                area: r.area,
            })
            .collect();

        Self {
            image: image.into(),
            size: segmentation.size,
            threshold: config.rule.threshold,
            connectivity: config.connectivity,
            sprites,
        }
    }

    /// Write the manifest as pretty JSON.
    ///
    /// Parent directories are created if they don't exist.
    pub fn write(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, self)?;
        writeln!(writer)?;
        writer.flush()?;
        Ok(())
    }
}
