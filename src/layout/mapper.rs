//! Layout Mapper - pointer indices to marker positions.
//!
//! Reads box bounds through a [`GeometryProvider`] and turns "pointer is at
//! index k" into an offset from the array container's left edge to the
//! horizontal center of box k. A marker centered on that offset sits over the
//! box's midpoint whatever the box width, count, or line wrapping.
//!
//! Results live in signals so the render effect tracks them. Every
//! measurement is skip-and-retain: when the provider has no box (or no
//! container) for an index, the previous value stays in place.
//!
//! # Example
//!
//! ```ignore
//! let mapper = LayoutMapper::new(geometry_handle.clone());
//! mapper.remeasure(session.pointers().get());
//! let marker_x = mapper.placement(PointerKind::I).left_offset;
//! ```

use std::cell::Cell;

use spark_signals::{Signal, signal};
use tracing::trace;

use super::geometry::{Bounds, GeometryProvider};
use crate::model::{PointerKind, Pointers};

/// Where one marker goes, relative to the container's top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MarkerPlacement {
    /// Container left edge to the target box's horizontal center.
    pub left_offset: f32,
    /// Container top edge to the target box's bottom edge.
    pub top_offset: f32,
}

impl MarkerPlacement {
    /// Placement for `target` inside `container`.
    pub fn for_box(container: Bounds, target: Bounds) -> Self {
        Self {
            left_offset: (target.left() - container.left()) + target.width / 2.0,
            top_offset: target.bottom() - container.top(),
        }
    }
}

/// A marker ready to paint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Marker {
    pub kind: PointerKind,
    pub index: usize,
    pub placement: MarkerPlacement,
}

/// Maps pointer indices to marker placements.
pub struct LayoutMapper<G> {
    provider: G,
    box_width: Signal<f32>,
    placements: [Signal<MarkerPlacement>; 3],
    // Untracked copies, so comparisons never subscribe the caller.
    last_width: Cell<f32>,
    last_placements: Cell<[MarkerPlacement; 3]>,
}

impl<G: GeometryProvider> LayoutMapper<G> {
    /// Create a mapper over an explicit geometry handle.
    pub fn new(provider: G) -> Self {
        Self {
            provider,
            box_width: signal(0.0),
            placements: std::array::from_fn(|_| signal(MarkerPlacement::default())),
            last_width: Cell::new(0.0),
            last_placements: Cell::new([MarkerPlacement::default(); 3]),
        }
    }

    pub fn provider(&self) -> &G {
        &self.provider
    }

    /// Last measured box width. Tracked when read inside an effect.
    pub fn box_width(&self) -> f32 {
        self.box_width.get()
    }

    /// Current placement for a pointer. Tracked when read inside an effect.
    pub fn placement(&self, kind: PointerKind) -> MarkerPlacement {
        self.placements[kind.slot()].get()
    }

    /// Measure the width of the first rendered box.
    ///
    /// Returns the measured width, or `None` (keeping the old value) when no
    /// box is rendered.
    pub fn compute_box_width(&self) -> Option<f32> {
        let width = self.provider.box_bounds(0)?.width;
        if width != self.last_width.get() {
            self.last_width.set(width);
            self.box_width.set(width);
            trace!(width, "box width");
        }
        Some(width)
    }

    /// Measure the placement for `kind` pointing at `index`.
    ///
    /// Returns the new placement, or `None` (keeping the old one) when either
    /// the container or the target box is missing.
    pub fn compute_offset(&self, kind: PointerKind, index: usize) -> Option<MarkerPlacement> {
        let container = self.provider.container_bounds()?;
        let target = self.provider.box_bounds(index)?;
        let placement = MarkerPlacement::for_box(container, target);

        let mut last = self.last_placements.get();
        let slot = kind.slot();
        if last[slot] != placement {
            last[slot] = placement;
            self.last_placements.set(last);
            self.placements[slot].set(placement);
            trace!(pointer = kind.label(), index, offset = placement.left_offset, "marker moved");
        }
        Some(placement)
    }

    /// Recompute all three placements for `pointers`.
    pub fn refresh(&self, pointers: Pointers) {
        for kind in PointerKind::ALL {
            let _ = self.compute_offset(kind, pointers.get(kind));
        }
    }

    /// Box width and all placements. Used after resizes and once layout has
    /// settled following a structural change.
    pub fn remeasure(&self, pointers: Pointers) {
        let _ = self.compute_box_width();
        self.refresh(pointers);
    }

    /// The three markers in paint order: lowest z-order first, so `i` ends
    /// up on top, then `lt`, then `gt`.
    pub fn markers(&self, pointers: Pointers) -> Vec<Marker> {
        let mut markers: Vec<Marker> = PointerKind::ALL
            .into_iter()
            .map(|kind| Marker {
                kind,
                index: pointers.get(kind),
                placement: self.placement(kind),
            })
            .collect();
        markers.sort_by_key(|m| m.kind.z_order());
        markers
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::layout::ArrayGeometry;

    fn row(count: usize, width: f32) -> ArrayGeometry {
        let boxes = (0..count)
            .map(|i| Bounds::new(i as f32 * width, 0.0, width, width))
            .collect();
        ArrayGeometry::from_bounds(Bounds::new(0.0, 0.0, count as f32 * width, width), boxes)
    }

    #[test]
    fn test_offset_is_box_center() {
        let w = 40.0;
        let mapper = LayoutMapper::new(row(3, w));
        let placement = mapper.compute_offset(PointerKind::I, 1).unwrap();
        assert_eq!(placement.left_offset, w + w / 2.0);
        assert_eq!(mapper.placement(PointerKind::I).left_offset, 60.0);
    }

    #[test]
    fn test_offset_is_relative_to_container() {
        let container = Bounds::new(10.0, 5.0, 30.0, 3.0);
        let boxes = vec![Bounds::new(12.0, 5.0, 6.0, 3.0), Bounds::new(20.0, 5.0, 6.0, 3.0)];
        let mapper = LayoutMapper::new(ArrayGeometry::from_bounds(container, boxes));

        let placement = mapper.compute_offset(PointerKind::Lt, 1).unwrap();
        assert_eq!(placement.left_offset, 13.0);
        assert_eq!(placement.top_offset, 3.0);
    }

    #[test]
    fn test_missing_box_retains_previous_offset() {
        let geometry = Rc::new(RefCell::new(row(3, 4.0)));
        let mapper = LayoutMapper::new(geometry.clone());
        mapper.compute_box_width();
        mapper.compute_offset(PointerKind::Gt, 2);
        assert_eq!(mapper.placement(PointerKind::Gt).left_offset, 10.0);

        *geometry.borrow_mut() = ArrayGeometry::empty();
        assert_eq!(mapper.compute_offset(PointerKind::Gt, 2), None);
        assert_eq!(mapper.compute_box_width(), None);
        assert_eq!(mapper.placement(PointerKind::Gt).left_offset, 10.0);
        assert_eq!(mapper.box_width(), 4.0);
    }

    #[test]
    fn test_index_past_rendered_boxes_is_skipped() {
        let mapper = LayoutMapper::new(row(2, 4.0));
        mapper.compute_offset(PointerKind::I, 1);
        assert_eq!(mapper.compute_offset(PointerKind::I, 7), None);
        assert_eq!(mapper.placement(PointerKind::I).left_offset, 6.0);
    }

    #[test]
    fn test_refresh_follows_wrapped_rows() {
        let container = Bounds::new(0.0, 0.0, 11.0, 11.0);
        let boxes = vec![
            Bounds::new(0.0, 0.0, 5.0, 3.0),
            Bounds::new(6.0, 0.0, 5.0, 3.0),
            Bounds::new(3.0, 8.0, 5.0, 3.0),
        ];
        let mapper = LayoutMapper::new(ArrayGeometry::from_bounds(container, boxes));
        mapper.refresh(Pointers::new(0, 1, 2));

        assert_eq!(
            mapper.placement(PointerKind::Lt),
            MarkerPlacement {
                left_offset: 2.5,
                top_offset: 3.0
            }
        );
        assert_eq!(
            mapper.placement(PointerKind::I),
            MarkerPlacement {
                left_offset: 8.5,
                top_offset: 3.0
            }
        );
        assert_eq!(
            mapper.placement(PointerKind::Gt),
            MarkerPlacement {
                left_offset: 5.5,
                top_offset: 11.0
            }
        );
    }

    #[test]
    fn test_refresh_is_idempotent() {
        let mapper = LayoutMapper::new(row(5, 3.0));
        let pointers = Pointers::new(0, 2, 4);
        mapper.remeasure(pointers);
        let first: Vec<_> = PointerKind::ALL.iter().map(|&k| mapper.placement(k)).collect();
        mapper.remeasure(pointers);
        let second: Vec<_> = PointerKind::ALL.iter().map(|&k| mapper.placement(k)).collect();
        assert_eq!(first, second);
        assert_eq!(mapper.box_width(), 3.0);
    }

    #[test]
    fn test_markers_paint_i_last() {
        let mapper = LayoutMapper::new(row(3, 4.0));
        let pointers = Pointers::new(1, 1, 1);
        mapper.refresh(pointers);

        let markers = mapper.markers(pointers);
        let order: Vec<_> = markers.iter().map(|m| m.kind).collect();
        assert_eq!(order, vec![PointerKind::Gt, PointerKind::Lt, PointerKind::I]);
        assert!(markers.iter().all(|m| m.placement.left_offset == 6.0));
    }
}
