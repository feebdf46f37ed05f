//! Connected-component labeling over a foreground mask.
//!
//! The mask is rendered to a grayscale image and labeled with
//! `imageproc::region_labelling::connected_components`; the resulting ids are
//! then renumbered densely so they run `1..=count` in the raster order of each
//! component's first pixel. The same mask always produces the same numbering.

use image::Luma;
use imageproc::region_labelling::{self, connected_components};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::mask::ForegroundMask;

/// Pixel adjacency used when growing a component.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Connectivity {
    /// Edge neighbours only (N, S, E, W)
    Four,
    /// Edge and corner neighbours
    #[default]
    Eight,
}

impl From<Connectivity> for region_labelling::Connectivity {
    fn from(connectivity: Connectivity) -> Self {
        match connectivity {
            Connectivity::Four => region_labelling::Connectivity::Four,
            Connectivity::Eight => region_labelling::Connectivity::Eight,
        }
    }
}

impl std::fmt::Display for Connectivity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Connectivity::Four => write!(f, "four"),
            Connectivity::Eight => write!(f, "eight"),
        }
    }
}

/// Per-pixel component ids. 0 is background.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelGrid {
    width: u32,
    height: u32,
    labels: Vec<u32>,
    count: u32,
}

impl LabelGrid {
    /// Build a grid from raw parts.
    ///
    /// Nothing is checked: the labels may reference ids that own no pixels.
    /// Region extraction detects that case.
    pub fn from_raw(width: u32, height: u32, labels: Vec<u32>, count: u32) -> Self {
        debug_assert_eq!(labels.len(), (width as usize) * (height as usize));
        Self { width, height, labels, count }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of connected components.
    pub fn count(&self) -> u32 {
        self.count
    }

    /// Label at (x, y). Panics if out of bounds.
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> u32 {
        self.labels[(y as usize) * (self.width as usize) + x as usize]
    }

    /// Iterate `(x, y, label)` in raster order.
    pub fn enumerate(&self) -> impl Iterator<Item = (u32, u32, u32)> + '_ {
        let width = self.width.max(1) as usize;
        self.labels
            .iter()
            .enumerate()
            .map(move |(i, &label)| ((i % width) as u32, (i / width) as u32, label))
    }
}

/// Label the connected foreground regions of `mask`.
pub fn label_components(mask: &ForegroundMask, connectivity: Connectivity) -> LabelGrid {
    let width = mask.width();
    let height = mask.height();
    if width == 0 || height == 0 {
        return LabelGrid { width, height, labels: Vec::new(), count: 0 };
    }

    let labeled = connected_components(&mask.to_gray_image(), connectivity.into(), Luma([0u8]));
    let mut labels = labeled.into_raw();

    // Dense renumbering, first-seen order
    let max_label = labels.iter().copied().max().unwrap_or(0) as usize;
    let mut remap = vec![0u32; max_label + 1];
    let mut count = 0u32;
    for label in labels.iter_mut() {
        if *label == 0 {
            continue;
        }
        let slot = &mut remap[*label as usize];
        if *slot == 0 {
            count += 1;
            *slot = count;
        }
        *label = *slot;
    }

    debug!(width, height, components = count, %connectivity, "labeled foreground mask");

    LabelGrid { width, height, labels, count }
}
