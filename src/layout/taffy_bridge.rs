//! Taffy Bridge - flexbox layout of the box row.
//!
//! Builds a two-level Taffy tree (one container, `n` fixed-size boxes), runs
//! layout for the available width, and extracts absolute cell bounds into an
//! [`ArrayGeometry`]. That snapshot is what the terminal host "rendered", and
//! it is the geometry the [`LayoutMapper`](super::LayoutMapper) measures.

use taffy::{
    AlignContent, AvailableSpace, Dimension, Display, FlexDirection, FlexWrap, JustifyContent,
    LengthPercentage, NodeId, Size, Style, TaffyTree,
};
use tracing::trace;

use super::geometry::{Bounds, GeometryProvider};
use crate::error::{Result, TraceError};

/// Sizing and flow for the box row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArrayLayoutStyle {
    /// Preferred box width in cells (border included).
    pub box_width: u16,
    /// Box height in cells (border included).
    pub box_height: u16,
    /// Narrowest a box may shrink to when `wrap` is off.
    pub min_box_width: u16,
    /// Columns between neighbouring boxes.
    pub gap: u16,
    /// Rows between wrapped lines. Leaves room for index labels and markers.
    pub row_gap: u16,
    /// Wrap onto new lines instead of shrinking.
    pub wrap: bool,
}

impl Default for ArrayLayoutStyle {
    fn default() -> Self {
        Self {
            box_width: 5,
            box_height: 3,
            min_box_width: 3,
            gap: 1,
            row_gap: 5,
            wrap: true,
        }
    }
}

// =============================================================================
// GEOMETRY SNAPSHOT
// =============================================================================

/// Laid-out container and box bounds, in absolute cells.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ArrayGeometry {
    container: Option<Bounds>,
    boxes: Vec<Bounds>,
}

impl ArrayGeometry {
    /// Nothing rendered yet.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a snapshot directly from bounds.
    pub fn from_bounds(container: Bounds, boxes: Vec<Bounds>) -> Self {
        Self {
            container: Some(container),
            boxes,
        }
    }

    pub fn container(&self) -> Option<Bounds> {
        self.container
    }

    pub fn boxes(&self) -> &[Bounds] {
        &self.boxes
    }

    /// Index of the box covering cell `(x, y)`.
    pub fn box_index_at(&self, x: u16, y: u16) -> Option<usize> {
        let (x, y) = (x as f32, y as f32);
        self.boxes.iter().position(|b| b.contains(x, y))
    }

    /// Bottom edge of the lowest box, or the container top when empty.
    pub fn content_bottom(&self) -> f32 {
        let top = self.container.map(|c| c.top()).unwrap_or(0.0);
        self.boxes.iter().map(Bounds::bottom).fold(top, f32::max)
    }
}

impl GeometryProvider for ArrayGeometry {
    fn container_bounds(&self) -> Option<Bounds> {
        self.container
    }

    fn box_bounds(&self, index: usize) -> Option<Bounds> {
        self.boxes.get(index).copied()
    }
}

// =============================================================================
// STYLE BUILDING
// =============================================================================

fn container_style(available_width: u16, style: &ArrayLayoutStyle) -> Style {
    Style {
        display: Display::Flex,
        flex_direction: FlexDirection::Row,
        flex_wrap: if style.wrap {
            FlexWrap::Wrap
        } else {
            FlexWrap::NoWrap
        },
        justify_content: Some(JustifyContent::Center),
        align_content: Some(AlignContent::FlexStart),
        gap: Size {
            width: LengthPercentage::Length(style.gap as f32),
            height: LengthPercentage::Length(style.row_gap as f32),
        },
        size: Size {
            width: Dimension::Length(available_width as f32),
            height: Dimension::Auto,
        },
        ..Default::default()
    }
}

fn box_style(style: &ArrayLayoutStyle) -> Style {
    Style {
        display: Display::Flex,
        flex_grow: 0.0,
        flex_shrink: if style.wrap { 0.0 } else { 1.0 },
        size: Size {
            width: Dimension::Length(style.box_width as f32),
            height: Dimension::Length(style.box_height as f32),
        },
        min_size: Size {
            width: Dimension::Length(style.min_box_width as f32),
            height: Dimension::Length(style.box_height as f32),
        },
        ..Default::default()
    }
}

// =============================================================================
// MAIN ENTRY POINT
// =============================================================================

/// Lay out `count` boxes in a container `available_width` cells wide whose
/// top-left corner sits at `origin`.
pub fn compute_array_layout(
    count: usize,
    origin: (u16, u16),
    available_width: u16,
    style: &ArrayLayoutStyle,
) -> Result<ArrayGeometry> {
    let mut tree: TaffyTree<()> = TaffyTree::new();
    let layout_err = |e: taffy::TaffyError| TraceError::Layout(e.to_string());

    let child_style = box_style(style);
    let children: Vec<NodeId> = (0..count)
        .map(|_| tree.new_leaf(child_style.clone()))
        .collect::<std::result::Result<_, _>>()
        .map_err(layout_err)?;

    let root = tree
        .new_with_children(container_style(available_width, style), &children)
        .map_err(layout_err)?;

    let available = Size {
        width: AvailableSpace::Definite(available_width as f32),
        height: AvailableSpace::MaxContent,
    };
    tree.compute_layout(root, available).map_err(layout_err)?;

    let (ox, oy) = (origin.0 as f32, origin.1 as f32);
    let root_layout = tree.layout(root).map_err(layout_err)?;
    let container = Bounds::new(ox, oy, root_layout.size.width, root_layout.size.height);

    let mut boxes = Vec::with_capacity(count);
    for &child in &children {
        let layout = tree.layout(child).map_err(layout_err)?;
        boxes.push(Bounds::new(
            ox + layout.location.x,
            oy + layout.location.y,
            layout.size.width,
            layout.size.height,
        ));
    }

    trace!(count, available_width, height = container.height, "array layout computed");
    Ok(ArrayGeometry::from_bounds(container, boxes))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn style() -> ArrayLayoutStyle {
        ArrayLayoutStyle {
            box_width: 5,
            box_height: 3,
            min_box_width: 3,
            gap: 1,
            row_gap: 5,
            wrap: true,
        }
    }

    #[test]
    fn test_single_row_is_centered() {
        // 3 boxes * 5 + 2 gaps = 17 cells inside 21 -> 2 cells of slack each side
        let geometry = compute_array_layout(3, (0, 0), 21, &style()).unwrap();
        let boxes = geometry.boxes();
        assert_eq!(boxes.len(), 3);
        assert_eq!(boxes[0].x, 2.0);
        assert_eq!(boxes[1].x, 8.0);
        assert_eq!(boxes[2].x, 14.0);
        assert!(boxes.iter().all(|b| b.y == 0.0 && b.width == 5.0 && b.height == 3.0));
    }

    #[test]
    fn test_origin_offsets_everything() {
        let geometry = compute_array_layout(1, (10, 4), 5, &style()).unwrap();
        assert_eq!(geometry.container(), Some(Bounds::new(10.0, 4.0, 5.0, 3.0)));
        assert_eq!(geometry.box_bounds(0), Some(Bounds::new(10.0, 4.0, 5.0, 3.0)));
    }

    #[test]
    fn test_wraps_when_narrow() {
        // Two boxes per line fit in 11 cells (5 + 1 + 5)
        let geometry = compute_array_layout(3, (0, 0), 11, &style()).unwrap();
        let boxes = geometry.boxes();
        assert_eq!(boxes[0].y, 0.0);
        assert_eq!(boxes[1].y, 0.0);
        assert_eq!(boxes[2].y, 8.0); // box height 3 + row gap 5
        assert_eq!(geometry.content_bottom(), 11.0);
    }

    #[test]
    fn test_no_wrap_shrinks_to_min() {
        let style = ArrayLayoutStyle {
            wrap: false,
            ..style()
        };
        // 4 boxes in 15 cells with 3 gaps -> 12 cells for boxes -> 3 each
        let geometry = compute_array_layout(4, (0, 0), 15, &style).unwrap();
        for b in geometry.boxes() {
            assert_eq!(b.width, 3.0);
            assert_eq!(b.y, 0.0);
        }
    }

    #[test]
    fn test_box_index_at() {
        let geometry = compute_array_layout(3, (0, 0), 17, &style()).unwrap();
        assert_eq!(geometry.box_index_at(0, 1), Some(0));
        assert_eq!(geometry.box_index_at(5, 1), None); // the gap
        assert_eq!(geometry.box_index_at(6, 0), Some(1));
        assert_eq!(geometry.box_index_at(16, 2), Some(2));
        assert_eq!(geometry.box_index_at(16, 3), None);
    }

    #[test]
    fn test_empty_geometry_provides_nothing() {
        let geometry = ArrayGeometry::empty();
        assert_eq!(geometry.container_bounds(), None);
        assert_eq!(geometry.box_bounds(0), None);
    }
}
