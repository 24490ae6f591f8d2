// SPDX-License-Identifier: MIT OR Apache-2.0
//! Drag-to-match columns widget for egui.
//!
//! Connect items in a left column to items in a right column by dragging
//! between them. Committed pairs render as bezier connectors, survive
//! restarts through a pluggable key-value store, and report every change to
//! an optional observer.
//!
//! The core is headless and unit-testable without a UI:
//!
//! - [`PairSet`] holds committed pairs in creation order, duplicate-free on
//!   insert
//! - [`TargetRegistry`] tracks item rectangles for geometry and hit-testing
//! - [`DragController`] owns the single ephemeral drag session
//! - [`persist`] round-trips pairs through a [`KeyValueStore`]
//! - [`MatchBoard`] ties the above together under one mutation funnel
//!
//! [`MatchColumnsPanel`] adapts egui pointer input onto a board and paints
//! the columns and connectors.

pub mod board;
pub mod geometry;
pub mod item;
pub mod pair;
pub mod persist;
pub mod registry;
pub mod session;
pub mod ui;

pub use board::{ChangeObserver, MatchBoard};
pub use geometry::Connector;
pub use item::{Item, Side};
pub use pair::{Pair, PairSet};
pub use persist::{KeyValueStore, MemoryStore, DEFAULT_SLOT};
pub use registry::TargetRegistry;
pub use session::{DragController, DragSession, PendingConnector};
pub use ui::MatchColumnsPanel;
