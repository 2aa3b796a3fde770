//! Trace Session - the array model and pointer state driven by user actions.

use tracing::{debug, info};

use super::array_model::{ArrayModel, ClickOutcome};
use super::pointers::{PointerState, Pointers};
use crate::config::TraceConfig;
use crate::error::Result;

/// Something the learner can do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Click the box at this position.
    ClickBox(usize),
    /// `lt++, i++` (value < pivot).
    AdvanceLtAndI,
    /// `i++` (value == pivot).
    AdvanceI,
    /// `gt--` (value > pivot).
    DecrementGt,
    /// Restore the initial sequence and pointers.
    Reset,
}

impl Action {
    /// Short label shown on the control for this action.
    pub const fn label(&self) -> &'static str {
        match self {
            Action::ClickBox(_) => "click",
            Action::AdvanceLtAndI => "lt++, i++",
            Action::AdvanceI => "i++",
            Action::DecrementGt => "gt--",
            Action::Reset => "Reset Simulation",
        }
    }

    /// The partition case the control stands for.
    pub const fn hint(&self) -> &'static str {
        match self {
            Action::AdvanceLtAndI => "v < pivot: swap(lt, i)",
            Action::AdvanceI => "v == pivot: no swap",
            Action::DecrementGt => "v > pivot: swap(i, gt)",
            Action::ClickBox(_) | Action::Reset => "",
        }
    }
}

/// What changed as a result of an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ActionOutcome {
    /// The sequence's identities changed order or were replaced.
    pub structure_changed: bool,
    /// The pointer triple changed.
    pub pointers_changed: bool,
    /// Set for box clicks.
    pub click: Option<ClickOutcome>,
}

/// One practice session.
#[derive(Clone)]
pub struct TraceSession {
    array: ArrayModel,
    pointers: PointerState,
    pivot: char,
}

impl TraceSession {
    /// Validate `config` and start a session from it.
    pub fn new(config: &TraceConfig) -> Result<Self> {
        config.validate()?;
        let array = ArrayModel::new(&config.initial_data);
        let pointers = PointerState::new(array.len(), config.resolved_pointers());
        let pivot = config.initial_data[0];
        info!(len = array.len(), %pivot, "session started");
        Ok(Self {
            array,
            pointers,
            pivot,
        })
    }

    pub fn array(&self) -> &ArrayModel {
        &self.array
    }

    pub fn pointers(&self) -> &PointerState {
        &self.pointers
    }

    /// The first element of the initial data. Stays fixed when swaps move it.
    pub fn pivot(&self) -> char {
        self.pivot
    }

    pub fn len(&self) -> usize {
        self.array.len()
    }

    pub fn is_empty(&self) -> bool {
        self.array.is_empty()
    }

    /// Apply one action.
    pub fn apply(&self, action: Action) -> ActionOutcome {
        let before = self.pointers.get();
        let outcome = match action {
            Action::ClickBox(index) => {
                let click = self.array.handle_box_click(index);
                ActionOutcome {
                    structure_changed: matches!(click, ClickOutcome::Swapped(..)),
                    pointers_changed: false,
                    click: Some(click),
                }
            }
            Action::AdvanceLtAndI => self.pointer_move(before, self.pointers.advance_lt_and_i()),
            Action::AdvanceI => self.pointer_move(before, self.pointers.advance_i()),
            Action::DecrementGt => self.pointer_move(before, self.pointers.decrement_gt()),
            Action::Reset => {
                self.array.reset();
                let after = self.pointers.reset();
                ActionOutcome {
                    structure_changed: true,
                    pointers_changed: after != before,
                    click: None,
                }
            }
        };
        debug!(?action, ?outcome, "action applied");
        outcome
    }

    fn pointer_move(&self, before: Pointers, after: Pointers) -> ActionOutcome {
        ActionOutcome {
            structure_changed: false,
            pointers_changed: after != before,
            click: None,
        }
    }
}
