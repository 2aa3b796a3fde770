//! Model Module - session state
//!
//! - **Item** - symbol plus stable identity
//! - **ArrayModel** - the sequence and the two-click swap protocol
//! - **PointerState** - `lt`, `i`, `gt` and their clamped moves
//! - **TraceSession** - both of the above driven by [`Action`]s

mod array_model;
mod item;
mod pointers;
mod session;

pub use array_model::{ArrayModel, ArrayState, ClickOutcome};
pub use item::{Item, ItemId, items_for_generation};
pub use pointers::{PointerKind, PointerState, Pointers};
pub use session::{Action, ActionOutcome, TraceSession};
