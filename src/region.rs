//! Bounding boxes of labeled components

use serde::Serialize;
use tracing::debug;

use crate::error::{ExtractError, Result};
use crate::labeling::LabelGrid;

/// Axis-aligned box around one connected component.
///
/// Coordinates are in source-image pixels, half-open on the upper bound:
/// the box covers `x1..x2` by `y1..y2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Region {
    /// Component id in the label grid
    pub label: u32,
    pub x1: u32,
    pub y1: u32,
    pub x2: u32,
    pub y2: u32,
    /// Number of foreground pixels in the component
    pub area: u32,
}

impl Region {
    pub fn width(&self) -> u32 {
        self.x2 - self.x1
    }

    pub fn height(&self) -> u32 {
        self.y2 - self.y1
    }

    /// True if (x, y) falls inside the box.
    pub fn contains(&self, x: u32, y: u32) -> bool {
        x >= self.x1 && x < self.x2 && y >= self.y1 && y < self.y2
    }

    /// True if the two boxes share at least one pixel.
    pub fn overlaps(&self, other: &Region) -> bool {
        self.x1 < other.x2 && other.x1 < self.x2 && self.y1 < other.y2 && other.y1 < self.y2
    }
}

/// Running min/max accumulator for one label.
#[derive(Clone, Copy)]
struct Extent {
    min_x: u32,
    min_y: u32,
    max_x: u32,
    max_y: u32,
    area: u32,
}

impl Extent {
    const EMPTY: Extent = Extent { min_x: u32::MAX, min_y: u32::MAX, max_x: 0, max_y: 0, area: 0 };

    fn add(&mut self, x: u32, y: u32) {
        self.min_x = self.min_x.min(x);
        self.min_y = self.min_y.min(y);
        self.max_x = self.max_x.max(x);
        self.max_y = self.max_y.max(y);
        self.area += 1;
    }
}

/// Compute one region per label `1..=count`, ordered by label id.
///
/// Fails with [`ExtractError::EmptyLabel`] if any label in range owns no pixel.
pub fn bounding_boxes(labels: &LabelGrid) -> Result<Vec<Region>> {
    let count = labels.count() as usize;
    let mut extents = vec![Extent::EMPTY; count];

    for (x, y, label) in labels.enumerate() {
        if label == 0 {
            continue;
        }
        // Labels above count would also mean a broken grid
        match extents.get_mut(label as usize - 1) {
            Some(extent) => extent.add(x, y),
            None => return Err(ExtractError::EmptyLabel(label)),
        }
    }

    let regions = extents
        .iter()
        .enumerate()
        .map(|(i, e)| {
            let label = i as u32 + 1;
            if e.area == 0 {
                return Err(ExtractError::EmptyLabel(label));
            }
            Ok(Region {
                label,
                x1: e.min_x,
                y1: e.min_y,
                x2: e.max_x + 1,
                y2: e.max_y + 1,
                area: e.area,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    debug!(regions = regions.len(), "computed bounding boxes");
    Ok(regions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::labeling::{label_components, Connectivity};
    use crate::mask::ForegroundMask;

    fn grid(rows: &[&str]) -> LabelGrid {
        let rows: Vec<Vec<bool>> = rows.iter().map(|r| r.chars().map(|c| c == '#').collect()).collect();
        label_components(&ForegroundMask::from_rows(&rows).unwrap(), Connectivity::Eight)
    }

    #[test]
    fn test_single_pixel_box() {
        let regions = bounding_boxes(&grid(&["...", ".#.", "..."])).unwrap();
        assert_eq!(regions.len(), 1);
        let r = regions[0];
        assert_eq!((r.x1, r.y1, r.x2, r.y2), (1, 1, 2, 2));
        assert_eq!((r.width(), r.height(), r.area), (1, 1, 1));
    }

    #[test]
    fn test_row_and_column_components() {
        let regions = bounding_boxes(&grid(&["###..", ".....", "....#", "....#"])).unwrap();
        assert_eq!(regions.len(), 2);
        assert_eq!((regions[0].width(), regions[0].height()), (3, 1));
        assert_eq!((regions[1].x1, regions[1].y1, regions[1].x2, regions[1].y2), (4, 2, 5, 4));
    }

    #[test]
    fn test_ring_separated_regions_do_not_overlap() {
        let regions = bounding_boxes(&grid(&[
            ".......",
            ".##....",
            ".##....",
            ".......",
            "....##.",
            "....##.",
            ".......",
        ]))
        .unwrap();
        assert_eq!(regions.len(), 2);
        assert!(!regions[0].overlaps(&regions[1]));
    }

    #[test]
    fn test_box_covers_all_pixels_of_label() {
        let labels = grid(&["#..#", ".##.", "#..."]);
        let regions = bounding_boxes(&labels).unwrap();
        for (x, y, label) in labels.enumerate() {
            if label != 0 {
                assert!(regions[label as usize - 1].contains(x, y));
            }
        }
        let total: u32 = regions.iter().map(|r| r.area).sum();
        assert_eq!(total, 5);
    }

    #[test]
    fn test_no_labels_no_regions() {
        assert!(bounding_boxes(&grid(&["..", ".."])).unwrap().is_empty());
    }

    #[test]
    fn test_empty_label_fails_fast() {
        // Count claims two components but only label 1 is present
        let labels = LabelGrid::from_raw(2, 1, vec![1, 0], 2);
        assert!(matches!(bounding_boxes(&labels), Err(ExtractError::EmptyLabel(2))));
    }

    #[test]
    fn test_label_above_count_fails() {
        let labels = LabelGrid::from_raw(2, 1, vec![1, 3], 1);
        assert!(matches!(bounding_boxes(&labels), Err(ExtractError::EmptyLabel(3))));
    }
}
