// SPDX-License-Identifier: MIT OR Apache-2.0
//! Items and the two column sides.

use serde::{Deserialize, Serialize};

/// Which of the two columns an item belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// The left-hand column
    Left,
    /// The right-hand column
    Right,
}

impl Side {
    /// The other column. Drop targets for a drag always live there.
    pub fn opposite(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Left => write!(f, "left"),
            Side::Right => write!(f, "right"),
        }
    }
}

/// One entry in a column.
///
/// Items carry no side of their own; the side comes from which list the
/// caller put them in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Identifier, unique within the item's column
    pub id: String,
    /// Text shown inside the item's box
    pub label: String,
}

impl Item {
    /// Create a new item.
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
        }
    }
}
