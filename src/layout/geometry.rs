//! Geometry - bounds and the provider seam the mapper measures through.

use std::cell::RefCell;
use std::rc::Rc;

/// An axis-aligned rectangle in cells, measured from the screen origin.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Bounds {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.y
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    #[inline]
    pub fn center_x(&self) -> f32 {
        self.x + self.width / 2.0
    }

    /// Whether the cell at `(x, y)` lies inside.
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }
}

/// Where the host last rendered the array container and its boxes.
///
/// Both lookups return `None` when nothing is rendered there yet, e.g. before
/// the first frame or while a reset is still being laid out.
pub trait GeometryProvider {
    /// Bounds of the array container.
    fn container_bounds(&self) -> Option<Bounds>;

    /// Bounds of the box currently rendered at `index`.
    fn box_bounds(&self, index: usize) -> Option<Bounds>;
}

impl<G: GeometryProvider + ?Sized> GeometryProvider for Rc<RefCell<G>> {
    fn container_bounds(&self) -> Option<Bounds> {
        self.borrow().container_bounds()
    }

    fn box_bounds(&self, index: usize) -> Option<Bounds> {
        self.borrow().box_bounds(index)
    }
}

impl<G: GeometryProvider + ?Sized> GeometryProvider for &G {
    fn container_bounds(&self) -> Option<Bounds> {
        (**self).container_bounds()
    }

    fn box_bounds(&self, index: usize) -> Option<Bounds> {
        (**self).box_bounds(index)
    }
}
