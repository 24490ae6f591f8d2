// SPDX-License-Identifier: MIT OR Apache-2.0
//! Drag lifecycle: one ephemeral session from pointer-down to pointer-up.

use crate::geometry;
use crate::item::Side;
use crate::pair::Pair;
use crate::registry::TargetRegistry;
use egui::Pos2;

/// The in-progress connection gesture.
///
/// Created on pointer-down over an item, updated on every pointer-move,
/// consumed on pointer-up. Never persisted and never more than one at a
/// time.
#[derive(Debug, Clone, PartialEq)]
pub struct DragSession {
    /// Side the drag started on
    pub origin_side: Side,
    /// Id of the item the drag started on
    pub origin_id: String,
    /// Latest pointer position, container-relative
    pub cursor: Pos2,
}

/// Endpoints of the connector drawn while a drag is in progress, in
/// container-relative coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PendingConnector {
    /// Center of the origin item's box
    pub from: Pos2,
    /// Live cursor position
    pub to: Pos2,
}

/// Owns the ephemeral drag session and resolves drop targets.
///
/// The controller is either idle or dragging; nothing else. It never touches
/// committed pairs: [`DragController::finish`] hands back the pair to commit
/// and the caller decides what to do with it.
#[derive(Debug, Clone, Default)]
pub struct DragController {
    session: Option<DragSession>,
}

impl DragController {
    /// Create an idle controller.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a session from an item.
    ///
    /// A second pointer-down while a session is live should not happen with
    /// a single captured pointer; if it does, the new session replaces the
    /// old one.
    pub fn begin(&mut self, side: Side, id: impl Into<String>, cursor: Pos2) {
        self.session = Some(DragSession {
            origin_side: side,
            origin_id: id.into(),
            cursor,
        });
    }

    /// Refresh the live cursor position. Ignored while idle.
    pub fn update_cursor(&mut self, cursor: Pos2) {
        if let Some(session) = &mut self.session {
            session.cursor = cursor;
        }
    }

    /// End the session, resolving the item under the release point.
    ///
    /// The release point is hit-tested against the side opposite the drag
    /// origin; a hit yields the pair to commit, with ids ordered by the
    /// origin side. A miss, a release with no known position, or an idle
    /// controller all yield `None`. The session is gone afterwards on every
    /// path.
    pub fn finish(&mut self, release: Option<Pos2>, registry: &TargetRegistry) -> Option<Pair> {
        let session = self.session.take()?;
        let target_id = registry.hit_test(session.origin_side.opposite(), release?)?;
        let pair = match session.origin_side {
            Side::Left => Pair::new(session.origin_id, target_id),
            Side::Right => Pair::new(target_id, session.origin_id),
        };
        Some(pair)
    }

    /// The live session, if any.
    pub fn session(&self) -> Option<&DragSession> {
        self.session.as_ref()
    }

    /// Whether a drag is in progress.
    pub fn is_dragging(&self) -> bool {
        self.session.is_some()
    }

    /// Connector for the in-progress drag: origin item center to live
    /// cursor. `None` while idle.
    pub fn pending_connector(&self, registry: &TargetRegistry) -> Option<PendingConnector> {
        let session = self.session.as_ref()?;
        Some(PendingConnector {
            from: geometry::item_center(registry, session.origin_side, &session.origin_id),
            to: session.cursor,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::{vec2, Rect};

    fn registry() -> TargetRegistry {
        let mut registry = TargetRegistry::new();
        registry.set_container(Rect::from_min_size(Pos2::ZERO, vec2(800.0, 400.0)));
        registry.register(
            Side::Left,
            "l1",
            Rect::from_min_size(Pos2::new(10.0, 10.0), vec2(100.0, 40.0)),
        );
        registry.register(
            Side::Right,
            "r1",
            Rect::from_min_size(Pos2::new(690.0, 10.0), vec2(100.0, 40.0)),
        );
        registry
    }

    #[test]
    fn test_finish_on_target_yields_pair() {
        let registry = registry();
        let mut drag = DragController::new();

        drag.begin(Side::Left, "l1", Pos2::new(60.0, 30.0));
        assert!(drag.is_dragging());

        let pair = drag.finish(Some(Pos2::new(700.0, 20.0)), &registry);
        assert_eq!(pair, Some(Pair::new("l1", "r1")));
        assert!(!drag.is_dragging());
    }

    #[test]
    fn test_finish_orders_ids_by_origin_side() {
        let registry = registry();
        let mut drag = DragController::new();

        // Dragging from the right lands on a left item; the pair still
        // reads left-to-right.
        drag.begin(Side::Right, "r1", Pos2::new(740.0, 30.0));
        let pair = drag.finish(Some(Pos2::new(20.0, 20.0)), &registry);
        assert_eq!(pair, Some(Pair::new("l1", "r1")));
    }

    #[test]
    fn test_finish_miss_discards_session() {
        let registry = registry();
        let mut drag = DragController::new();

        drag.begin(Side::Left, "l1", Pos2::new(60.0, 30.0));
        assert_eq!(drag.finish(Some(Pos2::new(400.0, 200.0)), &registry), None);
        assert!(!drag.is_dragging());
    }

    #[test]
    fn test_finish_without_release_position_discards_session() {
        let registry = registry();
        let mut drag = DragController::new();

        drag.begin(Side::Left, "l1", Pos2::new(60.0, 30.0));
        assert_eq!(drag.finish(None, &registry), None);
        assert!(!drag.is_dragging());
    }

    #[test]
    fn test_finish_ignores_same_side_release() {
        let registry = registry();
        let mut drag = DragController::new();

        // Releasing over the origin's own column is a miss: only the
        // opposite side is hit-tested.
        drag.begin(Side::Left, "l1", Pos2::new(60.0, 30.0));
        assert_eq!(drag.finish(Some(Pos2::new(60.0, 30.0)), &registry), None);
    }

    #[test]
    fn test_finish_while_idle_is_noop() {
        let registry = registry();
        let mut drag = DragController::new();
        assert_eq!(drag.finish(Some(Pos2::new(700.0, 20.0)), &registry), None);
    }

    #[test]
    fn test_begin_replaces_live_session() {
        let mut drag = DragController::new();

        drag.begin(Side::Left, "l1", Pos2::new(60.0, 30.0));
        drag.begin(Side::Right, "r1", Pos2::new(740.0, 30.0));

        let session = drag.session().unwrap();
        assert_eq!(session.origin_side, Side::Right);
        assert_eq!(session.origin_id, "r1");
    }

    #[test]
    fn test_cursor_updates_only_while_dragging() {
        let mut drag = DragController::new();
        drag.update_cursor(Pos2::new(5.0, 5.0));
        assert!(drag.session().is_none());

        drag.begin(Side::Left, "l1", Pos2::new(1.0, 1.0));
        drag.update_cursor(Pos2::new(5.0, 5.0));
        assert_eq!(drag.session().unwrap().cursor, Pos2::new(5.0, 5.0));
    }

    #[test]
    fn test_pending_connector_tracks_origin_and_cursor() {
        let registry = registry();
        let mut drag = DragController::new();
        assert!(drag.pending_connector(&registry).is_none());

        drag.begin(Side::Left, "l1", Pos2::new(200.0, 120.0));
        let pending = drag.pending_connector(&registry).unwrap();
        // Origin center is container-relative: l1 at (10,10)+(100,40)/2
        assert_eq!(pending.from, Pos2::new(60.0, 30.0));
        assert_eq!(pending.to, Pos2::new(200.0, 120.0));
    }
}
