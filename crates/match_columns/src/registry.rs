// SPDX-License-Identifier: MIT OR Apache-2.0
//! Registration of item rectangles for geometry lookup and hit-testing.

use crate::item::Side;
use egui::{Pos2, Rect};
use indexmap::IndexMap;

/// Tracks where each item's box currently is, plus the container rectangle.
///
/// Rectangles arrive in whatever coordinate space the interaction surface
/// uses (the egui widget registers screen-space rects, refreshed every
/// frame). Each side keeps registration order, so hit-test ties resolve
/// deterministically: the first registered match wins.
#[derive(Debug, Clone, Default)]
pub struct TargetRegistry {
    left: IndexMap<String, Rect>,
    right: IndexMap<String, Rect>,
    container: Option<Rect>,
}

impl TargetRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record (or refresh) the rectangle for an item.
    ///
    /// Re-registering an existing id updates its rectangle in place and
    /// keeps its original position in the hit-test order.
    pub fn register(&mut self, side: Side, id: impl Into<String>, rect: Rect) {
        self.side_map_mut(side).insert(id.into(), rect);
    }

    /// Forget an item, removing it from geometry lookup and hit-testing.
    ///
    /// Unknown ids are ignored.
    pub fn unregister(&mut self, side: Side, id: &str) {
        self.side_map_mut(side).shift_remove(id);
    }

    /// Drop every item on `side` whose id fails the predicate.
    pub fn retain(&mut self, side: Side, mut keep: impl FnMut(&str) -> bool) {
        self.side_map_mut(side).retain(|id, _| keep(id));
    }

    /// Record the container rectangle that centers resolve against.
    pub fn set_container(&mut self, rect: Rect) {
        self.container = Some(rect);
    }

    /// The current container rectangle, if one has been recorded.
    pub fn container(&self) -> Option<Rect> {
        self.container
    }

    /// The registered rectangle for an item.
    pub fn rect(&self, side: Side, id: &str) -> Option<Rect> {
        self.side_map(side).get(id).copied()
    }

    /// Whether an item is currently registered.
    pub fn is_registered(&self, side: Side, id: &str) -> bool {
        self.side_map(side).contains_key(id)
    }

    /// Number of registered items on one side.
    pub fn len(&self, side: Side) -> usize {
        self.side_map(side).len()
    }

    /// Whether a side has no registered items.
    pub fn is_empty(&self, side: Side) -> bool {
        self.side_map(side).is_empty()
    }

    /// First registered item on `side` whose rectangle contains `pos`.
    ///
    /// `pos` must be in the same coordinate space the rectangles were
    /// registered in. Overlapping rectangles resolve to the earliest
    /// registration.
    pub fn hit_test(&self, side: Side, pos: Pos2) -> Option<&str> {
        self.side_map(side)
            .iter()
            .find(|(_, rect)| rect.contains(pos))
            .map(|(id, _)| id.as_str())
    }

    /// Translate a registered-space position into container-relative
    /// coordinates.
    ///
    /// Without a container the position passes through unchanged, which
    /// treats the container origin as zero.
    pub fn to_relative(&self, pos: Pos2) -> Pos2 {
        match self.container {
            Some(container) => (pos - container.min).to_pos2(),
            None => pos,
        }
    }

    fn side_map(&self, side: Side) -> &IndexMap<String, Rect> {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }

    fn side_map_mut(&mut self, side: Side) -> &mut IndexMap<String, Rect> {
        match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }
}
