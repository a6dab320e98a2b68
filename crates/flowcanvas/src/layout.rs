//! Layout of transformed dialog trees.
//!
//! # Pipeline Position
//!
//! ```text
//! Dialog JSON
//!     ↓ transform
//! FlowNode tree
//!     ↓ layout (this module)
//! FlowGraph
//!     ↓ render / navigate
//! Output
//! ```
//!
//! # Submodules
//!
//! - [`measure`] - Boundaries of leaf elements by role
//! - [`layouters`] - One pure layouter per construct shape
//! - [`engine`] - Bottom-up tree layout and flattening into a [`FlowGraph`]

pub mod engine;
pub mod layouters;
pub mod measure;

use serde::Serialize;

pub use engine::{Block, FlowGraph, FlowLayoutEngine, PlacedEdge, PlacedNode};
pub use layouters::{Branch, Layouter};
pub use measure::Measurer;

/// Minimum horizontal gap between two adjacent branches.
pub const FIXED_MIN_GAP: f32 = 40.0;
/// Minimum horizontal distance between two adjacent branch axes.
pub const AXIS_MIN_SEPARATION: f32 = 200.0;
/// Vertical gap between consecutive elements of a sequence.
pub const ELEMENT_INTERVAL_Y: f32 = 40.0;
/// Vertical gap between a condition box and its choice diamond.
pub const CHOICE_INTERVAL_Y: f32 = 20.0;
/// Vertical gap between a choice diamond and the branch row.
pub const BRANCH_INTERVAL_Y: f32 = 30.0;
/// Space below the branch row holding the merge point.
pub const MERGE_MARGIN_Y: f32 = 30.0;
/// Gutter left of a loop body for the back edge.
pub const LOOP_EDGE_MARGIN_X: f32 = 30.0;

pub const NODE_WIDTH: f32 = 180.0;
pub const NODE_HEIGHT: f32 = 50.0;
pub const DIAMOND_WIDTH: f32 = 50.0;
pub const DIAMOND_HEIGHT: f32 = 20.0;
pub const LOOP_INDICATOR_WIDTH: f32 = 50.0;
pub const LOOP_INDICATOR_HEIGHT: f32 = 20.0;

/// What a laid-out leaf element represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum NodeRole {
    /// A plain action box.
    Action,
    /// The box of a conditional or switch action.
    Condition,
    /// The diamond under a condition showing its expression.
    Choice,
    /// The marker drawn above a loop body.
    LoopIndicator,
}
