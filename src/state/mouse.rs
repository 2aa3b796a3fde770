//! Mouse Module - mouse events and the hit grid.
//!
//! The hit grid answers "what did the learner click?" in O(1): every frame
//! paints each box and control into it, and a left-button press looks the
//! cell up.
//!
//! # Example
//!
//! ```ignore
//! let mut grid = HitGrid::new(80, 24);
//! grid.fill_rect(10, 4, 5, 3, HitTarget::Box(2));
//! assert_eq!(grid.get(12, 5), Some(HitTarget::Box(2)));
//! ```

use super::keyboard::Modifiers;
use crate::model::Action;
use crate::types::ClipRect;

// =============================================================================
// TYPES
// =============================================================================

/// Mouse action type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseAction {
    Down,
    Up,
    Move,
    Drag,
    Scroll,
}

/// Mouse button
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Middle,
    Right,
    #[default]
    None,
}

/// Mouse event
#[derive(Debug, Clone, PartialEq)]
pub struct MouseEvent {
    /// Action type (down, up, move, drag, scroll)
    pub action: MouseAction,
    /// Button pressed
    pub button: MouseButton,
    /// X coordinate (0-indexed)
    pub x: u16,
    /// Y coordinate (0-indexed)
    pub y: u16,
    /// Modifier keys state
    pub modifiers: Modifiers,
}

impl MouseEvent {
    /// Create a new mouse event
    pub fn new(action: MouseAction, button: MouseButton, x: u16, y: u16) -> Self {
        Self {
            action,
            button,
            x,
            y,
            modifiers: Modifiers::default(),
        }
    }

    /// Create a mouse down event
    pub fn down(button: MouseButton, x: u16, y: u16) -> Self {
        Self::new(MouseAction::Down, button, x, y)
    }

    /// Left-button press: the only thing the trainer reacts to.
    pub fn is_left_press(&self) -> bool {
        self.action == MouseAction::Down && self.button == MouseButton::Left
    }
}

// =============================================================================
// HIT GRID - O(1) Coordinate to Target Lookup
// =============================================================================

/// Something clickable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitTarget {
    /// The box at this position in the sequence.
    Box(usize),
    /// A control button.
    Control(Action),
}

/// A clickable rectangle produced by the frame builder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HitRegion {
    pub rect: ClipRect,
    pub target: HitTarget,
}

/// A grid for O(1) mouse hit detection.
///
/// Each cell holds the target painted there last, or `None` if empty.
#[derive(Debug, Clone)]
pub struct HitGrid {
    width: u16,
    height: u16,
    cells: Vec<Option<HitTarget>>,
}

impl HitGrid {
    /// Create a new hit grid with the given dimensions.
    pub fn new(width: u16, height: u16) -> Self {
        let size = width as usize * height as usize;
        Self {
            width,
            height,
            cells: vec![None; size],
        }
    }

    /// Get the grid width.
    pub fn width(&self) -> u16 {
        self.width
    }

    /// Get the grid height.
    pub fn height(&self) -> u16 {
        self.height
    }

    /// Resize the grid, clearing all contents.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        let size = width as usize * height as usize;
        self.cells.resize(size, None);
        self.clear();
    }

    /// Clear all cells.
    pub fn clear(&mut self) {
        self.cells.fill(None);
    }

    /// Fill a rectangle with a target.
    pub fn fill_rect(&mut self, x: u16, y: u16, width: u16, height: u16, target: HitTarget) {
        for dy in 0..height {
            let cy = y.saturating_add(dy);
            if cy >= self.height {
                break;
            }
            for dx in 0..width {
                let cx = x.saturating_add(dx);
                if cx >= self.width {
                    break;
                }
                let idx = cy as usize * self.width as usize + cx as usize;
                self.cells[idx] = Some(target);
            }
        }
    }

    /// Paint a frame's hit regions over a cleared grid of the given size.
    pub fn apply_regions(&mut self, width: u16, height: u16, regions: &[HitRegion]) {
        if (self.width, self.height) != (width, height) {
            self.resize(width, height);
        } else {
            self.clear();
        }
        for region in regions {
            let r = region.rect;
            self.fill_rect(r.x, r.y, r.width, r.height, region.target);
        }
    }

    /// Get the target at a position.
    pub fn get(&self, x: u16, y: u16) -> Option<HitTarget> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = y as usize * self.width as usize + x as usize;
        self.cells.get(idx).copied().flatten()
    }
}
