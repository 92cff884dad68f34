//! Slot displays: how recipe and UI packets describe "an item in a slot".

use serde::{Deserialize, Serialize};

use crate::OriginStack;

/// A slot display as received from the origin protocol.
///
/// Only [`Empty`](Self::Empty), [`Item`](Self::Item) and
/// [`Stack`](Self::Stack) describe a concrete stack. The other shapes (tags,
/// composites, ...) and any tag this crate has never heard of
/// ([`Unknown`](Self::Unknown)) convert to the empty stack.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SlotDisplay {
    Empty,
    /// A single item of the given type, count 1, no components.
    Item { item: i32 },
    /// A full stack.
    Stack { stack: OriginStack },
    AnyFuel,
    Tag { tag: String },
    WithRemainder {
        input: Box<SlotDisplay>,
        remainder: Box<SlotDisplay>,
    },
    Composite { contents: Vec<SlotDisplay> },
    #[serde(other)]
    Unknown,
}
