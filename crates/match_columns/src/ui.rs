// SPDX-License-Identifier: MIT OR Apache-2.0
//! The egui widget: two columns of boxes, bezier connectors between them,
//! and the drag interaction that creates pairs.
//!
//! All interaction flows through a [`MatchBoard`]; this module only adapts
//! egui pointer input onto it and paints what the board reports.

use crate::board::MatchBoard;
use crate::item::{Item, Side};
use crate::pair::Pair;
use crate::persist::KeyValueStore;
use egui::{vec2, Align2, Color32, FontId, Pos2, Rect, Sense, Stroke};

/// Height of one item box
const ITEM_HEIGHT: f32 = 48.0;
/// Vertical gap between item boxes
const ITEM_SPACING: f32 = 12.0;
/// Horizontal space reserved between the two columns
const COLUMN_GAP: f32 = 140.0;
/// Corner rounding of item boxes
const ITEM_ROUNDING: f32 = 10.0;
/// Inner padding of the pairing canvas
const CANVAS_PADDING: f32 = 8.0;
/// Radius of the anchor dot on paired boxes
const ANCHOR_RADIUS: f32 = 5.0;
/// Radius of a connector's removal disc
const REMOVE_DISC_RADIUS: f32 = 10.0;
/// Radius of the dot drawn at the live cursor during a drag
const CURSOR_DOT_RADIUS: f32 = 6.0;
/// How far connector control points pull toward the opposite column
const CURVE_PULL: f32 = 80.0;
/// Line segments per connector curve
const CURVE_SEGMENTS: usize = 32;

const CONNECTOR_STROKE: f32 = 4.0;
const PENDING_STROKE: f32 = 3.0;
const DASH_LENGTH: f32 = 6.0;

const LINK_COLOR: Color32 = Color32::from_rgb(47, 143, 58);
const LINK_HOVER_COLOR: Color32 = Color32::from_rgb(35, 107, 44);
const PANEL_FILL: Color32 = Color32::WHITE;
const PANEL_BORDER: Color32 = Color32::from_rgb(229, 229, 229);
const BOX_FILL: Color32 = Color32::from_rgb(243, 243, 243);
const BOX_FILL_PAIRED: Color32 = Color32::from_rgb(233, 246, 234);
const BOX_BORDER: Color32 = Color32::from_rgb(217, 217, 217);
const BOX_TEXT: Color32 = Color32::from_rgb(34, 34, 34);

/// Two-column pairing widget.
///
/// Owns a board, the item lists and the store it persists through. The
/// stored slot is restored once, on the first frame; after that Save,
/// Restore and Clear are explicit user actions.
pub struct MatchColumnsPanel {
    left: Vec<Item>,
    right: Vec<Item>,
    board: MatchBoard,
    store: Box<dyn KeyValueStore>,
    restored: bool,
    /// Show the usage hint next to the buttons
    pub show_hint: bool,
}

impl MatchColumnsPanel {
    /// Create a panel over the given item lists, persisting through `store`.
    pub fn new(left: Vec<Item>, right: Vec<Item>, store: Box<dyn KeyValueStore>) -> Self {
        Self {
            left,
            right,
            board: MatchBoard::new(),
            store,
            restored: false,
            show_hint: true,
        }
    }

    /// Persist under a different slot key.
    pub fn with_slot(mut self, slot: impl Into<String>) -> Self {
        self.board = self.board.with_slot(slot);
        self
    }

    /// Attach a change observer to the underlying board.
    pub fn with_on_change(mut self, observer: impl FnMut(&[Pair]) + 'static) -> Self {
        self.board = self.board.with_on_change(observer);
        self
    }

    /// The underlying board.
    pub fn board(&self) -> &MatchBoard {
        &self.board
    }

    /// Mutable access to the underlying board.
    pub fn board_mut(&mut self) -> &mut MatchBoard {
        &mut self.board
    }

    /// Items in the left column.
    pub fn left_items(&self) -> &[Item] {
        &self.left
    }

    /// Items in the right column.
    pub fn right_items(&self) -> &[Item] {
        &self.right
    }

    /// Replace the item lists, pruning registry entries for items that
    /// disappeared. Committed pairs are left alone.
    pub fn set_items(&mut self, left: Vec<Item>, right: Vec<Item>) {
        self.left = left;
        self.right = right;
        let registry = self.board.registry_mut();
        let (left, right) = (&self.left, &self.right);
        registry.retain(Side::Left, |id| left.iter().any(|item| item.id == id));
        registry.retain(Side::Right, |id| right.iter().any(|item| item.id == id));
    }

    /// Render the widget and handle one frame of interaction.
    pub fn ui(&mut self, ui: &mut egui::Ui) {
        if !self.restored {
            self.restored = true;
            self.board.restore_from(self.store.as_ref());
        }

        egui::Frame::none()
            .fill(PANEL_FILL)
            .stroke(Stroke::new(1.0, PANEL_BORDER))
            .rounding(egui::Rounding::same(10.0))
            .inner_margin(egui::Margin::same(12.0))
            .show(ui, |ui| {
                self.draw_controls(ui);
                ui.add_space(6.0);
                self.draw_canvas(ui);
            });
    }

    fn draw_controls(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            if ui
                .button("Save")
                .on_hover_text("Write the current pairs to storage")
                .clicked()
            {
                self.board.save_to(self.store.as_mut());
            }
            if ui
                .button("Restore")
                .on_hover_text("Reload the saved pairs")
                .clicked()
            {
                self.board.restore_from(self.store.as_ref());
            }
            if ui
                .button("Clear")
                .on_hover_text("Remove all pairs, saved ones included")
                .clicked()
            {
                self.board.clear_all(self.store.as_mut());
            }
            if self.show_hint {
                ui.weak("Drag from a box to one in the other column; click a link's disc to remove it.");
            }
        });
    }

    fn draw_canvas(&mut self, ui: &mut egui::Ui) {
        let rows = self.left.len().max(self.right.len()).max(1);
        let height = rows as f32 * (ITEM_HEIGHT + ITEM_SPACING) - ITEM_SPACING + CANVAS_PADDING * 2.0;
        let (container, _) =
            ui.allocate_exact_size(vec2(ui.available_width(), height), Sense::hover());
        self.board.set_container(container);

        let painter = ui.painter_at(container);
        self.draw_column(ui, &painter, container, Side::Left);
        self.draw_column(ui, &painter, container, Side::Right);
        self.draw_connectors(ui, &painter, container);
        self.draw_pending(&painter, container);
    }

    fn draw_column(&mut self, ui: &mut egui::Ui, painter: &egui::Painter, container: Rect, side: Side) {
        let width = (container.width() / 2.0 - COLUMN_GAP / 2.0 - CANVAS_PADDING).max(120.0);
        let x = match side {
            Side::Left => container.left() + CANVAS_PADDING,
            Side::Right => container.right() - CANVAS_PADDING - width,
        };
        let items = match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        };

        for (row, item) in items.iter().enumerate() {
            let y = container.top() + CANVAS_PADDING + row as f32 * (ITEM_HEIGHT + ITEM_SPACING);
            let rect = Rect::from_min_size(Pos2::new(x, y), vec2(width, ITEM_HEIGHT));
            self.board.register_target(side, &item.id, rect);

            let id = ui.id().with((side, item.id.as_str()));
            let response = ui
                .interact(rect, id, Sense::click_and_drag())
                .on_hover_cursor(egui::CursorIcon::Grab);

            let paired = match side {
                Side::Left => self.board.is_paired_left(&item.id),
                Side::Right => self.board.is_paired_right(&item.id),
            };
            let fill = if paired { BOX_FILL_PAIRED } else { BOX_FILL };
            let border = if paired { LINK_COLOR } else { BOX_BORDER };
            painter.rect_filled(rect, ITEM_ROUNDING, fill);
            painter.rect_stroke(rect, ITEM_ROUNDING, Stroke::new(1.0, border));
            painter.text(
                Pos2::new(rect.left() + 14.0, rect.center().y),
                Align2::LEFT_CENTER,
                &item.label,
                FontId::proportional(14.0),
                BOX_TEXT,
            );
            if paired {
                // Anchor dot on the edge facing the other column
                let anchor_x = match side {
                    Side::Left => rect.right() - 14.0,
                    Side::Right => rect.left() + 14.0,
                };
                painter.circle_filled(Pos2::new(anchor_x, rect.center().y), ANCHOR_RADIUS, LINK_COLOR);
            }

            if response.drag_started() {
                if let Some(pos) = response.interact_pointer_pos() {
                    self.board.pointer_down(side, &item.id, pos);
                }
            }
            if response.dragged() {
                if let Some(pos) = response.interact_pointer_pos() {
                    self.board.pointer_moved(pos);
                }
                ui.ctx().set_cursor_icon(egui::CursorIcon::Grabbing);
            }
            if response.drag_stopped() {
                self.board.pointer_up(response.interact_pointer_pos());
            }
        }
    }

    fn draw_connectors(&mut self, ui: &mut egui::Ui, painter: &egui::Painter, container: Rect) {
        for connector in self.board.connectors() {
            let from = container.min + connector.from.to_vec2();
            let to = container.min + connector.to.to_vec2();
            let path = connector_path(from, to);
            draw_path(painter, &path, Stroke::new(CONNECTOR_STROKE, LINK_COLOR));

            let mid = container.min + connector.midpoint().to_vec2();
            let disc = Rect::from_center_size(mid, vec2(REMOVE_DISC_RADIUS * 2.0, REMOVE_DISC_RADIUS * 2.0));
            let id = ui.id().with(("unlink", connector.left_id.as_str(), connector.right_id.as_str()));
            let response = ui
                .interact(disc, id, Sense::click())
                .on_hover_cursor(egui::CursorIcon::PointingHand)
                .on_hover_text("Remove this pair");

            let color = if response.hovered() { LINK_HOVER_COLOR } else { LINK_COLOR };
            painter.circle_filled(mid, REMOVE_DISC_RADIUS, color);
            painter.circle_filled(mid, 2.5, Color32::WHITE);

            if response.clicked() {
                self.board
                    .remove_pair(&Pair::new(connector.left_id, connector.right_id));
            }
        }
    }

    fn draw_pending(&self, painter: &egui::Painter, container: Rect) {
        let Some(pending) = self.board.pending_connector() else {
            return;
        };
        let from = container.min + pending.from.to_vec2();
        let to = container.min + pending.to.to_vec2();
        let path = connector_path(from, to);
        painter.extend(egui::Shape::dashed_line(
            &path,
            Stroke::new(PENDING_STROKE, LINK_COLOR),
            DASH_LENGTH,
            DASH_LENGTH,
        ));
        painter.circle_filled(to, CURSOR_DOT_RADIUS, LINK_COLOR);
    }
}

/// Sample the cubic bezier used for connector curves.
///
/// Control points pull horizontally toward the opposite endpoint, clamped to
/// half the horizontal distance so short links stay smooth.
fn connector_path(from: Pos2, to: Pos2) -> Vec<Pos2> {
    let dx = to.x - from.x;
    let pull = CURVE_PULL.min(dx.abs() * 0.5).copysign(dx);
    let c1 = Pos2::new(from.x + pull, from.y);
    let c2 = Pos2::new(to.x - pull, to.y);
    bezier_points(from, c1, c2, to, CURVE_SEGMENTS)
}

/// Evaluate a cubic bezier at evenly spaced parameters.
fn bezier_points(p0: Pos2, p1: Pos2, p2: Pos2, p3: Pos2, segments: usize) -> Vec<Pos2> {
    let mut points = Vec::with_capacity(segments + 1);
    for i in 0..=segments {
        let t = i as f32 / segments as f32;
        let u = 1.0 - t;
        let x = u * u * u * p0.x + 3.0 * u * u * t * p1.x + 3.0 * u * t * t * p2.x + t * t * t * p3.x;
        let y = u * u * u * p0.y + 3.0 * u * u * t * p1.y + 3.0 * u * t * t * p2.y + t * t * t * p3.y;
        points.push(Pos2::new(x, y));
    }
    points
}

fn draw_path(painter: &egui::Painter, points: &[Pos2], stroke: Stroke) {
    for window in points.windows(2) {
        painter.line_segment([window[0], window[1]], stroke);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persist::MemoryStore;

    fn items(prefix: &str, count: usize) -> Vec<Item> {
        (1..=count)
            .map(|i| Item::new(format!("{prefix}{i}"), format!("Item {i}")))
            .collect()
    }

    #[test]
    fn test_bezier_path_hits_both_endpoints() {
        let from = Pos2::new(10.0, 20.0);
        let to = Pos2::new(300.0, 180.0);
        let path = connector_path(from, to);

        assert_eq!(path.len(), CURVE_SEGMENTS + 1);
        assert_eq!(path[0], from);
        assert_eq!(path[path.len() - 1], to);
    }

    #[test]
    fn test_bezier_pull_clamps_on_short_links() {
        // For nearly touching endpoints the curve must not overshoot wildly
        let from = Pos2::new(0.0, 0.0);
        let to = Pos2::new(20.0, 0.0);
        let path = connector_path(from, to);

        for point in &path {
            assert!(point.x >= -1.0 && point.x <= 21.0, "overshoot at {point:?}");
        }
    }

    #[test]
    fn test_bezier_pull_follows_direction() {
        // Right-to-left links mirror the pull; the curve stays between the
        // endpoints horizontally
        let from = Pos2::new(300.0, 0.0);
        let to = Pos2::new(0.0, 100.0);
        let path = connector_path(from, to);

        assert_eq!(path[0], from);
        assert_eq!(path[path.len() - 1], to);
        for point in &path {
            assert!(point.x >= 0.0 && point.x <= 300.0, "overshoot at {point:?}");
        }
    }

    #[test]
    fn test_set_items_prunes_stale_registrations() {
        let mut panel =
            MatchColumnsPanel::new(items("l", 2), items("r", 2), Box::new(MemoryStore::new()));
        let rect = Rect::from_min_size(Pos2::ZERO, vec2(100.0, 40.0));
        panel.board_mut().register_target(Side::Left, "l1", rect);
        panel.board_mut().register_target(Side::Left, "l2", rect);
        panel.board_mut().register_target(Side::Right, "r1", rect);

        panel.set_items(items("l", 1), items("r", 1));

        let registry = panel.board().registry();
        assert!(registry.is_registered(Side::Left, "l1"));
        assert!(!registry.is_registered(Side::Left, "l2"));
        assert!(registry.is_registered(Side::Right, "r1"));
    }

    #[test]
    fn test_panel_slot_builder_flows_to_board() {
        let panel = MatchColumnsPanel::new(items("l", 1), items("r", 1), Box::new(MemoryStore::new()))
            .with_slot("custom");
        assert_eq!(panel.board().slot(), "custom");
    }
}
