// SPDX-License-Identifier: MIT OR Apache-2.0
//! Container-relative geometry for connector rendering.
//!
//! Nothing here is cached: endpoints are recomputed from the registry on
//! every call, so connectors follow items wherever layout puts them.

use crate::item::Side;
use crate::pair::PairSet;
use crate::registry::TargetRegistry;
use egui::{Pos2, Rect};

/// Center of `rect` relative to `container`'s origin.
///
/// Yields `(0, 0)` when either rectangle is unavailable. That is "not yet
/// positioned", not an error; callers tolerate transient origin-anchored
/// connectors while items are still being registered.
pub fn relative_center(container: Option<Rect>, rect: Option<Rect>) -> Pos2 {
    match (container, rect) {
        (Some(container), Some(rect)) => (rect.center() - container.min).to_pos2(),
        _ => Pos2::ZERO,
    }
}

/// Container-relative center of a registered item.
///
/// `(0, 0)` when the item or the container is unregistered.
pub fn item_center(registry: &TargetRegistry, side: Side, id: &str) -> Pos2 {
    relative_center(registry.container(), registry.rect(side, id))
}

/// Resolved endpoints for one committed pair, in container-relative
/// coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct Connector {
    /// Id of the left-column item
    pub left_id: String,
    /// Id of the right-column item
    pub right_id: String,
    /// Center of the left item's box
    pub from: Pos2,
    /// Center of the right item's box
    pub to: Pos2,
}

impl Connector {
    /// Midpoint of the segment between the endpoints. The removal disc is
    /// drawn here.
    pub fn midpoint(&self) -> Pos2 {
        Pos2::new(
            (self.from.x + self.to.x) / 2.0,
            (self.from.y + self.to.y) / 2.0,
        )
    }
}

/// Resolve current endpoints for every committed pair, in creation order.
pub fn connectors(pairs: &PairSet, registry: &TargetRegistry) -> Vec<Connector> {
    let container = registry.container();
    pairs
        .iter()
        .map(|pair| Connector {
            left_id: pair.left_id.clone(),
            right_id: pair.right_id.clone(),
            from: relative_center(container, registry.rect(Side::Left, &pair.left_id)),
            to: relative_center(container, registry.rect(Side::Right, &pair.right_id)),
        })
        .collect()
}
