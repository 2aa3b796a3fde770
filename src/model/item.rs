//! Items - the things that live in the boxes.

use std::fmt;

/// Stable identity of one item.
///
/// `generation` is bumped by every reset and `slot` is the item's position in
/// the initial data, so identities survive swaps and are never reused across
/// resets within one model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemId {
    pub generation: u32,
    pub slot: u32,
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "item-{}-{}", self.generation, self.slot)
    }
}

/// One symbol in the sequence together with its identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Item {
    pub id: ItemId,
    pub value: char,
}

impl Item {
    pub const fn new(id: ItemId, value: char) -> Self {
        Self { id, value }
    }
}

/// Build a fresh item list for `data` under the given generation.
pub fn items_for_generation(data: &[char], generation: u32) -> Vec<Item> {
    data.iter()
        .enumerate()
        .map(|(slot, &value)| {
            Item::new(
                ItemId {
                    generation,
                    slot: slot as u32,
                },
                value,
            )
        })
        .collect()
}
