//! Leaf measurement.

use flowcanvas_core::geometry::Boundary;

use crate::config::LayoutConfig;

use super::NodeRole;

/// Assigns boundaries to leaf elements by role.
///
/// Every leaf is measured with its axis at the geometric center.
#[derive(Debug, Clone)]
pub struct Measurer {
    node: Boundary,
    diamond: Boundary,
    loop_indicator: Boundary,
}

impl Measurer {
    pub fn new(config: &LayoutConfig) -> Self {
        Self {
            node: Boundary::centered(config.node_width(), config.node_height()),
            diamond: Boundary::centered(config.diamond_width(), config.diamond_height()),
            loop_indicator: Boundary::centered(
                config.loop_indicator_width(),
                config.loop_indicator_height(),
            ),
        }
    }

    /// Returns the boundary of a leaf with the given role.
    pub fn measure(&self, role: NodeRole) -> Boundary {
        match role {
            NodeRole::Action | NodeRole::Condition => self.node,
            NodeRole::Choice => self.diamond,
            NodeRole::LoopIndicator => self.loop_indicator,
        }
    }
}

impl Default for Measurer {
    fn default() -> Self {
        Self::new(&LayoutConfig::default())
    }
}
