// SPDX-License-Identifier: MIT OR Apache-2.0
//! The board: pair set, target registry and drag controller under one
//! single-writer scope, with change notification and explicit persistence.

use crate::geometry::{self, Connector};
use crate::item::Side;
use crate::pair::{Pair, PairSet};
use crate::persist::{self, KeyValueStore, DEFAULT_SLOT};
use crate::registry::TargetRegistry;
use crate::session::{DragController, PendingConnector};
use egui::{Pos2, Rect};

/// Observer invoked with the full pair sequence after every committed
/// mutation.
pub type ChangeObserver = Box<dyn FnMut(&[Pair])>;

/// Owns all mutable pairing state and funnels every mutation through the
/// pair-set operations.
///
/// Everything is synchronous and runs on the caller's thread. Pointer
/// positions come in whatever coordinate space the item rectangles were
/// registered in (the egui widget uses screen space) and are resolved
/// against the registered container for rendering.
pub struct MatchBoard {
    pairs: PairSet,
    registry: TargetRegistry,
    drag: DragController,
    slot: String,
    on_change: Option<ChangeObserver>,
}

impl Default for MatchBoard {
    fn default() -> Self {
        Self::new()
    }
}

impl MatchBoard {
    /// Create an empty board persisting under [`DEFAULT_SLOT`].
    pub fn new() -> Self {
        Self {
            pairs: PairSet::new(),
            registry: TargetRegistry::new(),
            drag: DragController::new(),
            slot: DEFAULT_SLOT.to_owned(),
            on_change: None,
        }
    }

    /// Persist under a different slot key.
    pub fn with_slot(mut self, slot: impl Into<String>) -> Self {
        self.slot = slot.into();
        self
    }

    /// Attach an observer invoked with the full pair sequence after every
    /// committed mutation, a restore included.
    pub fn with_on_change(mut self, observer: impl FnMut(&[Pair]) + 'static) -> Self {
        self.on_change = Some(Box::new(observer));
        self
    }

    /// The slot key this board persists under.
    pub fn slot(&self) -> &str {
        &self.slot
    }

    // --- target registration ---

    /// Record (or refresh) where an item's box currently is.
    pub fn register_target(&mut self, side: Side, id: impl Into<String>, rect: Rect) {
        self.registry.register(side, id, rect);
    }

    /// Forget an item that is no longer shown.
    pub fn unregister_target(&mut self, side: Side, id: &str) {
        self.registry.unregister(side, id);
    }

    /// Record the container rectangle all centers resolve against.
    pub fn set_container(&mut self, rect: Rect) {
        self.registry.set_container(rect);
    }

    /// The registry itself, for pruning and inspection.
    pub fn registry(&self) -> &TargetRegistry {
        &self.registry
    }

    /// Mutable access to the registry.
    pub fn registry_mut(&mut self) -> &mut TargetRegistry {
        &mut self.registry
    }

    // --- drag lifecycle ---

    /// Pointer pressed on an item: start a drag session from it.
    pub fn pointer_down(&mut self, side: Side, id: impl Into<String>, pos: Pos2) {
        let cursor = self.registry.to_relative(pos);
        self.drag.begin(side, id, cursor);
    }

    /// Pointer moved: refresh the live cursor. No-op while idle and never
    /// touches committed pairs.
    pub fn pointer_moved(&mut self, pos: Pos2) {
        let cursor = self.registry.to_relative(pos);
        self.drag.update_cursor(cursor);
    }

    /// Pointer released: resolve the drop target and commit a pair on a hit.
    ///
    /// The session ends here no matter what. A miss is silent, and a
    /// duplicate combination is a silent no-op.
    pub fn pointer_up(&mut self, pos: Option<Pos2>) {
        let Some(pair) = self.drag.finish(pos, &self.registry) else {
            return;
        };
        if self.pairs.add(pair.left_id.clone(), pair.right_id.clone()) {
            tracing::debug!("Committed pair {} -> {}", pair.left_id, pair.right_id);
            self.notify();
        }
    }

    /// Whether a drag session is live.
    pub fn is_dragging(&self) -> bool {
        self.drag.is_dragging()
    }

    // --- pair operations ---

    /// Remove one committed pair. Unknown combinations are ignored.
    pub fn remove_pair(&mut self, pair: &Pair) {
        if self.pairs.remove(&pair.left_id, &pair.right_id) {
            tracing::debug!("Removed pair {} -> {}", pair.left_id, pair.right_id);
            self.notify();
        }
    }

    /// Remove every committed pair. Does not touch the store.
    pub fn clear_pairs(&mut self) {
        if self.pairs.clear() {
            self.notify();
        }
    }

    /// Replace the whole pair sequence verbatim and notify.
    ///
    /// Restored data is trusted as stored; no duplicate check runs.
    pub fn replace_all(&mut self, pairs: Vec<Pair>) {
        self.pairs.replace_all(pairs);
        self.notify();
    }

    /// Committed pairs in creation order.
    pub fn pairs(&self) -> &[Pair] {
        self.pairs.as_slice()
    }

    /// Whether the exact id combination is committed.
    pub fn contains_pair(&self, left_id: &str, right_id: &str) -> bool {
        self.pairs.contains(left_id, right_id)
    }

    /// Whether any pair references this left-column id.
    pub fn is_paired_left(&self, id: &str) -> bool {
        self.pairs.is_paired_left(id)
    }

    /// Whether any pair references this right-column id.
    pub fn is_paired_right(&self, id: &str) -> bool {
        self.pairs.is_paired_right(id)
    }

    // --- derived view data ---

    /// Current endpoints for every committed pair, container-relative, in
    /// creation order. Recomputed from the registry on every call.
    pub fn connectors(&self) -> Vec<Connector> {
        geometry::connectors(&self.pairs, &self.registry)
    }

    /// Connector for the in-progress drag, if any.
    pub fn pending_connector(&self) -> Option<PendingConnector> {
        self.drag.pending_connector(&self.registry)
    }

    // --- persistence ---

    /// Write the current pairs to the store under this board's slot.
    pub fn save_to(&self, store: &mut dyn KeyValueStore) {
        persist::save(store, &self.slot, self.pairs.as_slice());
        tracing::info!("Saved {} pairs to slot '{}'", self.pairs.len(), self.slot);
    }

    /// Load this board's slot and, if it holds readable data, replace the
    /// current pairs with it verbatim.
    ///
    /// An absent or unreadable slot changes nothing and fires no
    /// notification. Returns whether a restore happened.
    pub fn restore_from(&mut self, store: &dyn KeyValueStore) -> bool {
        match persist::load(store, &self.slot) {
            Some(pairs) => {
                tracing::info!("Restored {} pairs from slot '{}'", pairs.len(), self.slot);
                self.replace_all(pairs);
                true
            }
            None => false,
        }
    }

    /// Remove every pair and delete this board's slot from the store.
    pub fn clear_all(&mut self, store: &mut dyn KeyValueStore) {
        self.clear_pairs();
        persist::remove(store, &self.slot);
        tracing::info!("Cleared slot '{}'", self.slot);
    }

    fn notify(&mut self) {
        if let Some(observer) = self.on_change.as_mut() {
            observer(self.pairs.as_slice());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persist::MemoryStore;
    use egui::vec2;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn rect(x: f32, y: f32, w: f32, h: f32) -> Rect {
        Rect::from_min_size(Pos2::new(x, y), vec2(w, h))
    }

    /// Board with a 800x400 container, two left items and two right items
    /// registered in screen space.
    fn board() -> MatchBoard {
        let mut board = MatchBoard::new();
        board.set_container(rect(100.0, 100.0, 800.0, 400.0));
        board.register_target(Side::Left, "l1", rect(110.0, 110.0, 100.0, 40.0));
        board.register_target(Side::Left, "l2", rect(110.0, 170.0, 100.0, 40.0));
        board.register_target(Side::Right, "r1", rect(790.0, 110.0, 100.0, 40.0));
        board.register_target(Side::Right, "r2", rect(790.0, 170.0, 100.0, 40.0));
        board
    }

    fn drag(board: &mut MatchBoard, side: Side, id: &str, from: Pos2, to: Pos2) {
        board.pointer_down(side, id, from);
        board.pointer_moved(to);
        board.pointer_up(Some(to));
    }

    #[test]
    fn test_drag_to_opposite_item_commits_pair() {
        let mut board = board();
        drag(&mut board, Side::Left, "l1", Pos2::new(150.0, 130.0), Pos2::new(800.0, 190.0));

        assert_eq!(board.pairs(), &[Pair::new("l1", "r2")]);
        assert!(!board.is_dragging());
    }

    #[test]
    fn test_drag_from_right_commits_left_to_right_pair() {
        let mut board = board();
        drag(&mut board, Side::Right, "r1", Pos2::new(800.0, 130.0), Pos2::new(150.0, 190.0));

        assert_eq!(board.pairs(), &[Pair::new("l2", "r1")]);
    }

    #[test]
    fn test_drag_to_empty_space_commits_nothing() {
        let mut board = board();
        drag(&mut board, Side::Left, "l1", Pos2::new(150.0, 130.0), Pos2::new(500.0, 300.0));

        assert!(board.pairs().is_empty());
        assert!(!board.is_dragging());
    }

    #[test]
    fn test_repeated_drag_is_silent_noop() {
        let mut board = board();
        drag(&mut board, Side::Left, "l1", Pos2::new(150.0, 130.0), Pos2::new(800.0, 130.0));
        drag(&mut board, Side::Left, "l1", Pos2::new(150.0, 130.0), Pos2::new(800.0, 130.0));

        assert_eq!(board.pairs(), &[Pair::new("l1", "r1")]);
    }

    #[test]
    fn test_item_can_join_multiple_pairs() {
        let mut board = board();
        drag(&mut board, Side::Left, "l1", Pos2::new(150.0, 130.0), Pos2::new(800.0, 130.0));
        drag(&mut board, Side::Left, "l1", Pos2::new(150.0, 130.0), Pos2::new(800.0, 190.0));
        drag(&mut board, Side::Left, "l2", Pos2::new(150.0, 190.0), Pos2::new(800.0, 130.0));

        assert_eq!(
            board.pairs(),
            &[
                Pair::new("l1", "r1"),
                Pair::new("l1", "r2"),
                Pair::new("l2", "r1"),
            ]
        );
        assert!(board.is_paired_left("l1"));
        assert!(board.is_paired_right("r2"));
        assert!(!board.is_paired_right("l1"));
    }

    #[test]
    fn test_pointer_move_alone_changes_nothing() {
        let mut board = board();
        board.pointer_moved(Pos2::new(400.0, 300.0));
        board.pointer_up(Some(Pos2::new(800.0, 130.0)));

        assert!(board.pairs().is_empty());
    }

    #[test]
    fn test_release_without_position_discards_session() {
        let mut board = board();
        board.pointer_down(Side::Left, "l1", Pos2::new(150.0, 130.0));
        board.pointer_up(None);

        assert!(board.pairs().is_empty());
        assert!(!board.is_dragging());
    }

    #[test]
    fn test_pending_connector_is_container_relative() {
        let mut board = board();
        board.pointer_down(Side::Left, "l1", Pos2::new(150.0, 130.0));
        board.pointer_moved(Pos2::new(500.0, 300.0));

        let pending = board.pending_connector().unwrap();
        // l1's center is (160, 130) in screen space, container origin (100, 100)
        assert_eq!(pending.from, Pos2::new(60.0, 30.0));
        assert_eq!(pending.to, Pos2::new(400.0, 200.0));
    }

    #[test]
    fn test_observer_fires_once_per_committed_mutation() {
        let calls: Rc<RefCell<Vec<usize>>> = Rc::default();
        let seen = Rc::clone(&calls);

        let mut board = MatchBoard::new().with_on_change(move |pairs| {
            seen.borrow_mut().push(pairs.len());
        });
        board.set_container(rect(0.0, 0.0, 800.0, 400.0));
        board.register_target(Side::Left, "l1", rect(10.0, 10.0, 100.0, 40.0));
        board.register_target(Side::Right, "r1", rect(690.0, 10.0, 100.0, 40.0));

        drag(&mut board, Side::Left, "l1", Pos2::new(20.0, 20.0), Pos2::new(700.0, 20.0));
        assert_eq!(*calls.borrow(), vec![1]);

        // Duplicate commit, miss, idle release: none of these notify
        drag(&mut board, Side::Left, "l1", Pos2::new(20.0, 20.0), Pos2::new(700.0, 20.0));
        drag(&mut board, Side::Left, "l1", Pos2::new(20.0, 20.0), Pos2::new(400.0, 300.0));
        board.pointer_up(Some(Pos2::new(700.0, 20.0)));
        assert_eq!(*calls.borrow(), vec![1]);

        board.remove_pair(&Pair::new("l1", "r1"));
        assert_eq!(*calls.borrow(), vec![1, 0]);

        // Removing again and clearing an empty board stay silent
        board.remove_pair(&Pair::new("l1", "r1"));
        board.clear_pairs();
        assert_eq!(*calls.borrow(), vec![1, 0]);
    }

    #[test]
    fn test_observer_fires_on_restore() {
        let calls: Rc<RefCell<Vec<usize>>> = Rc::default();
        let seen = Rc::clone(&calls);

        let mut store = MemoryStore::new();
        persist::save(
            &mut store,
            DEFAULT_SLOT,
            &[Pair::new("l1", "r1"), Pair::new("l2", "r2")],
        );

        let mut board = MatchBoard::new().with_on_change(move |pairs| {
            seen.borrow_mut().push(pairs.len());
        });
        assert!(board.restore_from(&store));
        assert_eq!(*calls.borrow(), vec![2]);

        // replace_all notifies even when the content is unchanged
        assert!(board.restore_from(&store));
        assert_eq!(*calls.borrow(), vec![2, 2]);
    }

    #[test]
    fn test_save_mutate_restore_round_trip() {
        let mut board = board();
        let mut store = MemoryStore::new();

        drag(&mut board, Side::Left, "l1", Pos2::new(150.0, 130.0), Pos2::new(800.0, 130.0));
        board.save_to(&mut store);

        drag(&mut board, Side::Left, "l2", Pos2::new(150.0, 190.0), Pos2::new(800.0, 190.0));
        board.remove_pair(&Pair::new("l1", "r1"));
        assert_eq!(board.pairs(), &[Pair::new("l2", "r2")]);

        assert!(board.restore_from(&store));
        assert_eq!(board.pairs(), &[Pair::new("l1", "r1")]);
    }

    #[test]
    fn test_restore_from_empty_or_malformed_slot_changes_nothing() {
        let mut board = board();
        drag(&mut board, Side::Left, "l1", Pos2::new(150.0, 130.0), Pos2::new(800.0, 130.0));

        let mut store = MemoryStore::new();
        assert!(!board.restore_from(&store));
        assert_eq!(board.pairs(), &[Pair::new("l1", "r1")]);

        store.set(DEFAULT_SLOT, "not-json");
        assert!(!board.restore_from(&store));
        assert_eq!(board.pairs(), &[Pair::new("l1", "r1")]);
    }

    #[test]
    fn test_restore_preserves_stored_duplicates() {
        let mut store = MemoryStore::new();
        store.set(DEFAULT_SLOT, r#"[{"leftId":"l1","rightId":"r1"},{"leftId":"l1","rightId":"r1"}]"#);

        let mut board = MatchBoard::new();
        assert!(board.restore_from(&store));
        assert_eq!(board.pairs().len(), 2);
    }

    #[test]
    fn test_clear_all_empties_board_and_store() {
        let mut board = board();
        let mut store = MemoryStore::new();

        drag(&mut board, Side::Left, "l1", Pos2::new(150.0, 130.0), Pos2::new(800.0, 130.0));
        board.save_to(&mut store);
        board.clear_all(&mut store);

        assert!(board.pairs().is_empty());
        assert!(!board.restore_from(&store));
    }

    #[test]
    fn test_custom_slot_keeps_default_slot_untouched() {
        let mut store = MemoryStore::new();

        let mut board = board().with_slot("quiz-7");
        drag(&mut board, Side::Left, "l1", Pos2::new(150.0, 130.0), Pos2::new(800.0, 130.0));
        board.save_to(&mut store);

        assert!(store.get("quiz-7").is_some());
        assert!(store.get(DEFAULT_SLOT).is_none());

        let mut fresh = MatchBoard::new().with_slot("quiz-7");
        assert!(fresh.restore_from(&store));
        assert_eq!(fresh.pairs(), &[Pair::new("l1", "r1")]);
    }
}
