//! Array Model - the sequence of items and the two-click swap protocol.
//!
//! Items and the pending selection live together in one reactive
//! [`ArrayState`], so a click is applied with a single signal write: anything
//! tracking the state sees either the old sequence with its selection or the
//! new one, never a swap without its cleared selection.
//!
//! # Protocol
//!
//! | selection | click `k`      | result                              |
//! |-----------|----------------|-------------------------------------|
//! | none      | `k`            | select `k`                          |
//! | `k`       | `k`            | clear                               |
//! | `k`       | `m != k`       | swap items at `k` and `m`, clear    |

use std::cell::Cell;
use std::rc::Rc;

use spark_signals::{Signal, signal};
use tracing::{debug, trace};

use super::item::{Item, ItemId, items_for_generation};

/// Snapshot of the sequence plus the pending selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArrayState {
    pub items: Vec<Item>,
    pub selection: Option<usize>,
}

impl ArrayState {
    /// Identities in positional order. Changes exactly when the sequence is
    /// structurally different (swap or reset).
    pub fn item_ids(&self) -> Vec<ItemId> {
        self.items.iter().map(|item| item.id).collect()
    }

    pub fn values(&self) -> Vec<char> {
        self.items.iter().map(|item| item.value).collect()
    }
}

/// What a box click did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    /// Nothing was selected; `index` is now selected.
    Selected(usize),
    /// `index` was selected and has been toggled off.
    Deselected(usize),
    /// The items at the two positions were exchanged and selection cleared.
    Swapped(usize, usize),
    /// The index names no box. Nothing changed.
    Ignored(usize),
}

/// Owns the ordered items and the single selection slot.
#[derive(Clone)]
pub struct ArrayModel {
    initial: Rc<[char]>,
    generation: Rc<Cell<u32>>,
    state: Signal<ArrayState>,
}

impl ArrayModel {
    /// Create a model over `data`. Items get generation-0 identities.
    pub fn new(data: &[char]) -> Self {
        let initial: Rc<[char]> = Rc::from(data);
        let state = signal(ArrayState {
            items: items_for_generation(&initial, 0),
            selection: None,
        });
        Self {
            initial,
            generation: Rc::new(Cell::new(0)),
            state,
        }
    }

    /// Number of boxes. Fixed for the model's lifetime.
    pub fn len(&self) -> usize {
        self.initial.len()
    }

    pub fn is_empty(&self) -> bool {
        self.initial.is_empty()
    }

    /// The data the model was created from (and resets to).
    pub fn initial_data(&self) -> &[char] {
        &self.initial
    }

    /// Current state. Reading inside an effect tracks it.
    pub fn state(&self) -> ArrayState {
        self.state.get()
    }

    /// Signal handle for reactive tracking.
    pub fn state_signal(&self) -> Signal<ArrayState> {
        self.state.clone()
    }

    pub fn items(&self) -> Vec<Item> {
        self.state.get().items
    }

    pub fn values(&self) -> Vec<char> {
        self.state.get().values()
    }

    pub fn selection(&self) -> Option<usize> {
        self.state.get().selection
    }

    pub fn generation(&self) -> u32 {
        self.generation.get()
    }

    /// Apply one click on box `index`.
    pub fn handle_box_click(&self, index: usize) -> ClickOutcome {
        let mut next = self.state.get();
        if index >= next.items.len() {
            trace!(index, len = next.items.len(), "click outside sequence ignored");
            return ClickOutcome::Ignored(index);
        }

        let outcome = match next.selection {
            None => {
                next.selection = Some(index);
                ClickOutcome::Selected(index)
            }
            Some(selected) if selected == index => {
                next.selection = None;
                ClickOutcome::Deselected(index)
            }
            Some(selected) => {
                next.items.swap(selected, index);
                next.selection = None;
                ClickOutcome::Swapped(selected, index)
            }
        };

        debug!(?outcome, "box click");
        self.state.set(next);
        outcome
    }

    /// Replace the items with a fresh copy of the initial data and clear the
    /// selection. Every item gets a new identity.
    pub fn reset(&self) {
        let generation = self.generation.get().wrapping_add(1);
        self.generation.set(generation);
        debug!(generation, "array reset");
        self.state.set(ArrayState {
            items: items_for_generation(&self.initial, generation),
            selection: None,
        });
    }
}
