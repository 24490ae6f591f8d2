// SPDX-License-Identifier: MIT OR Apache-2.0
//! Committed pairs and the ordered set that holds them.

use serde::{Deserialize, Serialize};

/// A committed connection between one left item and one right item.
///
/// Field names serialize as `leftId`/`rightId` to stay compatible with the
/// stored JSON format.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pair {
    /// Id of the left-column item
    pub left_id: String,
    /// Id of the right-column item
    pub right_id: String,
}

impl Pair {
    /// Create a new pair.
    pub fn new(left_id: impl Into<String>, right_id: impl Into<String>) -> Self {
        Self {
            left_id: left_id.into(),
            right_id: right_id.into(),
        }
    }
}

/// Ordered collection of committed pairs.
///
/// Order is creation order and stays stable for rendering. [`PairSet::add`]
/// enforces uniqueness of the exact id combination;
/// [`PairSet::replace_all`] does not, so restored data comes back exactly as
/// stored. Serializes as a bare JSON array of pairs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PairSet {
    pairs: Vec<Pair>,
}

impl PairSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a pair unless the exact combination already exists.
    ///
    /// Returns whether the set changed. An item may appear in any number of
    /// pairs; only the exact `(left, right)` combination is unique.
    pub fn add(&mut self, left_id: impl Into<String>, right_id: impl Into<String>) -> bool {
        let pair = Pair::new(left_id, right_id);
        if self.pairs.contains(&pair) {
            return false;
        }
        self.pairs.push(pair);
        true
    }

    /// Remove the pair with this exact id combination.
    ///
    /// Returns whether anything was removed. Other pairs keep their order.
    pub fn remove(&mut self, left_id: &str, right_id: &str) -> bool {
        let before = self.pairs.len();
        self.pairs
            .retain(|p| !(p.left_id == left_id && p.right_id == right_id));
        self.pairs.len() != before
    }

    /// Remove every pair. Returns whether the set held any.
    pub fn clear(&mut self) -> bool {
        if self.pairs.is_empty() {
            return false;
        }
        self.pairs.clear();
        true
    }

    /// Replace the whole sequence verbatim.
    ///
    /// No duplicate check runs here: restored data is trusted exactly as
    /// stored, duplicates included.
    pub fn replace_all(&mut self, pairs: Vec<Pair>) {
        self.pairs = pairs;
    }

    /// Whether the exact id combination is present.
    pub fn contains(&self, left_id: &str, right_id: &str) -> bool {
        self.pairs
            .iter()
            .any(|p| p.left_id == left_id && p.right_id == right_id)
    }

    /// Whether any pair references this id on the left side.
    pub fn is_paired_left(&self, id: &str) -> bool {
        self.pairs.iter().any(|p| p.left_id == id)
    }

    /// Whether any pair references this id on the right side.
    pub fn is_paired_right(&self, id: &str) -> bool {
        self.pairs.iter().any(|p| p.right_id == id)
    }

    /// Pairs in creation order.
    pub fn iter(&self) -> impl Iterator<Item = &Pair> {
        self.pairs.iter()
    }

    /// Pairs in creation order, as a slice.
    pub fn as_slice(&self) -> &[Pair] {
        &self.pairs
    }

    /// Number of committed pairs.
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}
