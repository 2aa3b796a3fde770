//! Pointer State - the three partition pointers and their moves.
//!
//! The moves mirror the partition loop without checking it:
//!
//! - `v < pivot`: swap(lt, i), then [`PointerState::advance_lt_and_i`]
//! - `v == pivot`: [`PointerState::advance_i`]
//! - `v > pivot`: swap(i, gt), then [`PointerState::decrement_gt`]
//!
//! Swaps are done separately through the array model. Every move saturates
//! at the array bounds, and nothing relates one pointer to another, so a
//! learner can wander off the textbook order and see the result.

use std::cell::Cell;
use std::rc::Rc;

use spark_signals::{Signal, signal};
use tracing::debug;

/// The three pointer indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pointers {
    pub lt: usize,
    pub i: usize,
    pub gt: usize,
}

impl Pointers {
    pub const fn new(lt: usize, i: usize, gt: usize) -> Self {
        Self { lt, i, gt }
    }

    /// `lt=0, i=1, gt=n-1`, with `i` pulled in for a one-element array.
    pub fn default_for_len(len: usize) -> Self {
        let last = len.saturating_sub(1);
        Self {
            lt: 0,
            i: 1.min(last),
            gt: last,
        }
    }

    /// Index held by one pointer.
    pub fn get(&self, kind: PointerKind) -> usize {
        match kind {
            PointerKind::Lt => self.lt,
            PointerKind::I => self.i,
            PointerKind::Gt => self.gt,
        }
    }
}

/// Which pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PointerKind {
    Lt,
    I,
    Gt,
}

impl PointerKind {
    pub const ALL: [PointerKind; 3] = [PointerKind::Lt, PointerKind::I, PointerKind::Gt];

    pub const fn label(self) -> &'static str {
        match self {
            PointerKind::Lt => "lt",
            PointerKind::I => "i",
            PointerKind::Gt => "gt",
        }
    }

    /// Stacking order when markers overlap: higher paints on top.
    pub const fn z_order(self) -> u8 {
        match self {
            PointerKind::I => 30,
            PointerKind::Lt => 20,
            PointerKind::Gt => 10,
        }
    }

    /// Slot for per-pointer arrays.
    pub const fn slot(self) -> usize {
        match self {
            PointerKind::Lt => 0,
            PointerKind::I => 1,
            PointerKind::Gt => 2,
        }
    }
}

/// Owns the pointer triple for an array of fixed length.
#[derive(Clone)]
pub struct PointerState {
    len: usize,
    initial: Pointers,
    current: Signal<Pointers>,
    // Untracked mirror of `current`.
    latest: Rc<Cell<Pointers>>,
}

impl PointerState {
    /// Start from `initial` over an array of `len` boxes.
    pub fn new(len: usize, initial: Pointers) -> Self {
        Self {
            len,
            initial,
            current: signal(initial),
            latest: Rc::new(Cell::new(initial)),
        }
    }

    /// Current triple. Reading inside an effect tracks it.
    pub fn get(&self) -> Pointers {
        self.current.get()
    }

    /// Current triple without tracking. For effects that must not rerun on
    /// pointer moves.
    pub fn peek(&self) -> Pointers {
        self.latest.get()
    }

    pub fn signal(&self) -> Signal<Pointers> {
        self.current.clone()
    }

    pub fn initial(&self) -> Pointers {
        self.initial
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    fn last(&self) -> usize {
        self.len.saturating_sub(1)
    }

    fn update(&self, op: &'static str, f: impl FnOnce(Pointers, usize) -> Pointers) -> Pointers {
        let before = self.latest.get();
        let after = f(before, self.last());
        if after != before {
            self.latest.set(after);
            self.current.set(after);
        }
        debug!(op, lt = after.lt, i = after.i, gt = after.gt, "pointers");
        after
    }

    /// `lt` and `i` both step right, clamped to the last index.
    pub fn advance_lt_and_i(&self) -> Pointers {
        self.update("lt&i", |p, last| Pointers {
            lt: (p.lt + 1).min(last),
            i: (p.i + 1).min(last),
            ..p
        })
    }

    /// `i` steps right, clamped to the last index.
    pub fn advance_i(&self) -> Pointers {
        self.update("i", |p, last| Pointers {
            i: (p.i + 1).min(last),
            ..p
        })
    }

    /// `gt` steps left, clamped at zero.
    pub fn decrement_gt(&self) -> Pointers {
        self.update("gt", |p, _| Pointers {
            gt: p.gt.saturating_sub(1),
            ..p
        })
    }

    /// Back to the starting triple.
    pub fn reset(&self) -> Pointers {
        let initial = self.initial;
        self.update("reset", move |_, _| initial)
    }
}
