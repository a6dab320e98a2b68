//! Configuration types for Flowcanvas layout and navigation.
//!
//! All types implement [`serde::Deserialize`] so they can be loaded from
//! external sources. Every field is optional in the serialized form and falls
//! back to the built-in layout constants.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining layout and navigation settings.
//! - [`LayoutConfig`] - Node sizes and the spacing constants used by the layouters.
//! - [`NavigationConfig`] - Keyboard navigation behavior.
//!
//! # Example
//!
//! ```
//! # use flowcanvas::config::AppConfig;
//! let config = AppConfig::default();
//! assert_eq!(config.layout().node_width(), 180.0);
//! assert!(!config.navigation().tab_fallback());
//! ```

use serde::Deserialize;

use crate::{FlowError, layout};

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Layout configuration section.
    #[serde(default)]
    layout: LayoutConfig,

    /// Navigation configuration section.
    #[serde(default)]
    navigation: NavigationConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] from its sections.
    pub fn new(layout: LayoutConfig, navigation: NavigationConfig) -> Self {
        Self { layout, navigation }
    }

    /// Returns the layout configuration.
    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    /// Returns the navigation configuration.
    pub fn navigation(&self) -> &NavigationConfig {
        &self.navigation
    }

    /// Checks that every configured size and spacing is usable.
    ///
    /// # Errors
    ///
    /// Returns [`FlowError::Config`] naming the first negative or non-finite value.
    pub fn validate(&self) -> Result<(), FlowError> {
        self.layout.validate().map_err(FlowError::Config)
    }
}

/// Node sizes and spacing used when laying out a dialog.
///
/// Defaults match the constants in [`crate::layout`].
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    node_width: f32,
    node_height: f32,
    diamond_width: f32,
    diamond_height: f32,
    loop_indicator_width: f32,
    loop_indicator_height: f32,

    fixed_min_gap: f32,
    axis_min_separation: f32,
    element_interval_y: f32,
    choice_interval_y: f32,
    branch_interval_y: f32,
    merge_margin_y: f32,
    loop_edge_margin_x: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            node_width: layout::NODE_WIDTH,
            node_height: layout::NODE_HEIGHT,
            diamond_width: layout::DIAMOND_WIDTH,
            diamond_height: layout::DIAMOND_HEIGHT,
            loop_indicator_width: layout::LOOP_INDICATOR_WIDTH,
            loop_indicator_height: layout::LOOP_INDICATOR_HEIGHT,
            fixed_min_gap: layout::FIXED_MIN_GAP,
            axis_min_separation: layout::AXIS_MIN_SEPARATION,
            element_interval_y: layout::ELEMENT_INTERVAL_Y,
            choice_interval_y: layout::CHOICE_INTERVAL_Y,
            branch_interval_y: layout::BRANCH_INTERVAL_Y,
            merge_margin_y: layout::MERGE_MARGIN_Y,
            loop_edge_margin_x: layout::LOOP_EDGE_MARGIN_X,
        }
    }
}

impl LayoutConfig {
    /// Width of action and condition boxes.
    pub fn node_width(&self) -> f32 {
        self.node_width
    }

    /// Height of action and condition boxes.
    pub fn node_height(&self) -> f32 {
        self.node_height
    }

    pub fn diamond_width(&self) -> f32 {
        self.diamond_width
    }

    pub fn diamond_height(&self) -> f32 {
        self.diamond_height
    }

    pub fn loop_indicator_width(&self) -> f32 {
        self.loop_indicator_width
    }

    pub fn loop_indicator_height(&self) -> f32 {
        self.loop_indicator_height
    }

    /// Minimum horizontal gap between two adjacent branches.
    pub fn fixed_min_gap(&self) -> f32 {
        self.fixed_min_gap
    }

    /// Minimum horizontal distance between two adjacent branch axes.
    pub fn axis_min_separation(&self) -> f32 {
        self.axis_min_separation
    }

    /// Vertical gap between consecutive elements of a sequence.
    pub fn element_interval_y(&self) -> f32 {
        self.element_interval_y
    }

    /// Vertical gap between a condition and its choice diamond.
    pub fn choice_interval_y(&self) -> f32 {
        self.choice_interval_y
    }

    /// Vertical gap between a choice diamond and the branch row.
    pub fn branch_interval_y(&self) -> f32 {
        self.branch_interval_y
    }

    /// Space reserved below the branch row for the merge point.
    pub fn merge_margin_y(&self) -> f32 {
        self.merge_margin_y
    }

    /// Horizontal gutter left of a loop body for the back edge.
    pub fn loop_edge_margin_x(&self) -> f32 {
        self.loop_edge_margin_x
    }

    fn validate(&self) -> Result<(), String> {
        let values = [
            ("node_width", self.node_width),
            ("node_height", self.node_height),
            ("diamond_width", self.diamond_width),
            ("diamond_height", self.diamond_height),
            ("loop_indicator_width", self.loop_indicator_width),
            ("loop_indicator_height", self.loop_indicator_height),
            ("fixed_min_gap", self.fixed_min_gap),
            ("axis_min_separation", self.axis_min_separation),
            ("element_interval_y", self.element_interval_y),
            ("choice_interval_y", self.choice_interval_y),
            ("branch_interval_y", self.branch_interval_y),
            ("merge_margin_y", self.merge_margin_y),
            ("loop_edge_margin_x", self.loop_edge_margin_x),
        ];

        match values
            .iter()
            .find(|(_, value)| !value.is_finite() || *value < 0.0)
        {
            Some((name, value)) => Err(format!(
                "layout.{name} must be a finite, non-negative number (got {value})"
            )),
            None => Ok(()),
        }
    }
}

/// Keyboard navigation settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct NavigationConfig {
    /// Fall back to tab order when an arrow key finds no target.
    tab_fallback: bool,
    /// Treat elements drawn for one node as a single arrow-key target.
    group_tags: bool,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            tab_fallback: false,
            group_tags: true,
        }
    }
}

impl NavigationConfig {
    pub fn new(tab_fallback: bool, group_tags: bool) -> Self {
        Self {
            tab_fallback,
            group_tags,
        }
    }

    /// Whether a directional move with no spatial winner moves along the tab order.
    pub fn tab_fallback(&self) -> bool {
        self.tab_fallback
    }

    /// Whether arrow keys skip other elements sharing the focused element's tag.
    pub fn group_tags(&self) -> bool {
        self.group_tags
    }
}
