//! Flowcanvas - Layout and keyboard navigation for dialog flow graphs.
//!
//! Turns a dialog document (a tree of actions tagged by `$kind`) into a
//! renderable graph with exact geometry, and moves keyboard focus across the
//! rendered graph.

pub mod config;
pub mod cursor;
pub mod index;
pub mod layout;
pub mod transform;

mod error;

pub use flowcanvas_core::{geometry, graph, selection};

pub use error::FlowError;

use log::{debug, info, trace};
use serde_json::Value;

use config::AppConfig;
use cursor::CursorTracker;
use index::NodeItem;
use layout::{FlowGraph, FlowLayoutEngine};
use selection::SelectorElement;
use transform::FlowNode;

/// Builder for laying out dialog documents.
///
/// Provides the pipeline stages (parse, transform, layout, serialize) and
/// builds navigation trackers with the configured behavior.
///
/// # Examples
///
/// ```rust
/// use flowcanvas::{FlowBuilder, config::AppConfig};
///
/// let source = r#"{
///     "$kind": "Microsoft.OnBeginDialog",
///     "actions": [{ "$kind": "Microsoft.SendActivity" }]
/// }"#;
///
/// let builder = FlowBuilder::new(AppConfig::default());
/// let dialog = builder.parse(source).expect("Failed to parse");
/// let graph = builder.layout(&dialog);
///
/// assert_eq!(graph.nodes().len(), 1);
/// assert_eq!(graph.nodes()[0].id(), "actions[0]");
/// ```
#[derive(Debug, Default)]
pub struct FlowBuilder {
    config: AppConfig,
    engine: FlowLayoutEngine,
}

impl FlowBuilder {
    /// Create a new builder with the given configuration.
    ///
    /// # Arguments
    ///
    /// * `config` - Layout sizes, spacing and navigation settings
    pub fn new(config: AppConfig) -> Self {
        let engine = FlowLayoutEngine::new(config.layout());
        Self { config, engine }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Parse dialog document text.
    ///
    /// # Errors
    ///
    /// Returns [`FlowError::Parse`] with the source attached when the text is
    /// not a valid document.
    pub fn parse(&self, source: &str) -> Result<Value, FlowError> {
        info!("Parsing dialog");

        let dialog =
            flowcanvas_parser::parse(source).map_err(|err| FlowError::new_parse_error(err, source))?;

        debug!("Dialog parsed successfully");
        Ok(dialog)
    }

    /// Transform a dialog into its indexed node tree.
    ///
    /// Returns `None` when the dialog has nothing to render.
    pub fn transform(&self, dialog: &Value) -> Option<FlowNode> {
        let flow = transform::transform(Some(dialog), "");
        debug!(indexed_nodes = flow.as_ref().map_or(0, |flow| flow.indexed_nodes().len()); "Dialog transformed");
        flow
    }

    /// Transform and lay out a dialog.
    ///
    /// A dialog with nothing to render yields [`FlowGraph::empty`].
    pub fn layout(&self, dialog: &Value) -> FlowGraph {
        info!("Laying out dialog");

        let Some(flow) = self.transform(dialog) else {
            info!("Dialog has nothing to render");
            return FlowGraph::empty();
        };

        let graph = self.engine.layout(&flow);
        info!(
            nodes = graph.nodes().len(),
            edges = graph.edges().len();
            "Layout calculated"
        );
        trace!(graph:?; "Laid out graph");

        graph
    }

    /// Serialize a laid-out graph as JSON.
    ///
    /// # Errors
    ///
    /// Returns [`FlowError::Json`] if serialization fails.
    pub fn render_json(&self, graph: &FlowGraph, pretty: bool) -> Result<String, FlowError> {
        let json = if pretty {
            serde_json::to_string_pretty(graph)?
        } else {
            serde_json::to_string(graph)?
        };
        Ok(json)
    }

    /// Build a focus tracker over a snapshot of rendered elements.
    ///
    /// Tab fallback and tag grouping for arrow keys follow the navigation
    /// configuration.
    pub fn cursor<'e>(
        &self,
        elements: &'e [SelectorElement],
        tab_order: &[NodeItem],
    ) -> CursorTracker<'e> {
        CursorTracker::new(elements)
            .with_tab_order(tab_order)
            .with_tab_fallback(self.config.navigation().tab_fallback())
            .with_tag_grouping(self.config.navigation().group_tags())
    }
}
