//! Bottom-up layout of a transformed dialog tree.
//!
//! [`FlowLayoutEngine::build_tree`] measures every leaf and composes each
//! construct with its layouter, producing a tree of [`GraphNode`]s whose
//! composite nodes keep their [`GraphLayout`]. [`FlowLayoutEngine::flatten`]
//! then resolves every nested layout into the single canvas coordinate space
//! of a [`FlowGraph`].

use log::{debug, trace, warn};
use serde::Serialize;
use serde_json::Value;

use flowcanvas_core::{
    geometry::{BoundRect, Boundary, Point},
    graph::{Edge, GraphLayout, GraphNode},
    selection::SelectorElement,
};

use crate::{
    config::LayoutConfig,
    index::{NodeIndexGenerator, NodeItem},
    transform::{FlowNode, IndexedNode, StepGroup},
};

use super::{Branch, Layouter, Measurer, NodeRole};

/// Payload of a node in the laid-out tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Block<'t> {
    /// A measured element backed by an [`IndexedNode`].
    Leaf {
        role: NodeRole,
        node: &'t IndexedNode,
        /// Shared by the elements drawn for one logical node.
        tag: Option<&'t str>,
    },
    /// A construct and its laid-out children.
    Composite {
        layout: GraphLayout,
        children: Vec<GraphNode<Block<'t>>>,
    },
}

/// An element positioned on the canvas.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacedNode {
    id: String,
    role: NodeRole,
    json: Value,
    rect: BoundRect,
    #[serde(skip_serializing_if = "Option::is_none")]
    tag: Option<String>,
}

impl PlacedNode {
    /// The path of the element in the dialog document.
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn role(&self) -> NodeRole {
        self.role
    }

    pub fn json(&self) -> &Value {
        &self.json
    }

    pub fn rect(&self) -> BoundRect {
        self.rect
    }

    pub fn tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }
}

/// An edge with both ends resolved to canvas coordinates.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacedEdge {
    edge: Edge,
    start: Point,
    end: Point,
}

impl PlacedEdge {
    pub fn edge(&self) -> &Edge {
        &self.edge
    }

    pub fn start(&self) -> Point {
        self.start
    }

    pub fn end(&self) -> Point {
        self.end
    }
}

/// A fully laid-out dialog in a single coordinate space.
///
/// Nodes are listed depth-first in document order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FlowGraph {
    boundary: Boundary,
    nodes: Vec<PlacedNode>,
    edges: Vec<PlacedEdge>,
}

impl FlowGraph {
    /// A graph with nothing to render.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn boundary(&self) -> Boundary {
        self.boundary
    }

    pub fn nodes(&self) -> &[PlacedNode] {
        &self.nodes
    }

    pub fn edges(&self) -> &[PlacedEdge] {
        &self.edges
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns the node with the given id.
    pub fn node(&self, id: &str) -> Option<&PlacedNode> {
        self.nodes.iter().find(|node| node.id == id)
    }

    /// The selectable elements a renderer registers for this graph.
    ///
    /// The condition box and choice diamond of a branching construct share a
    /// tag so arrow-key navigation treats them as one node.
    pub fn selector_elements(&self) -> Vec<SelectorElement> {
        self.nodes
            .iter()
            .map(|node| {
                let element = SelectorElement::new(node.id.clone(), node.rect);
                match &node.tag {
                    Some(tag) => element.with_tag_id(tag.clone()),
                    None => element,
                }
            })
            .collect()
    }

    /// Registers every node with `generator` in document order and returns the tab order.
    pub fn tab_order(&self, generator: &mut NodeIndexGenerator) -> Vec<NodeItem> {
        for node in &self.nodes {
            generator.get_node_index(&node.id);
        }
        generator.item_list()
    }
}

/// Lays out [`FlowNode`] trees.
#[derive(Debug, Clone, Default)]
pub struct FlowLayoutEngine {
    measurer: Measurer,
    layouter: Layouter,
}

impl FlowLayoutEngine {
    pub fn new(config: &LayoutConfig) -> Self {
        Self {
            measurer: Measurer::new(config),
            layouter: Layouter::new(config),
        }
    }

    /// Lays out `node` and flattens the result.
    pub fn layout(&self, node: &FlowNode) -> FlowGraph {
        let tree = self.build_tree(node);
        let graph = Self::flatten(&tree);
        debug!(
            nodes = graph.nodes.len(),
            edges = graph.edges.len(),
            width = graph.boundary.width(),
            height = graph.boundary.height();
            "Flow graph laid out"
        );
        graph
    }

    /// Lays out `node` bottom-up, keeping the nested layouts.
    pub fn build_tree<'t>(&self, node: &'t FlowNode) -> GraphNode<Block<'t>> {
        match node {
            FlowNode::Steps(group) => self.layout_group(group),
            FlowNode::Action(action) => self.leaf(action, NodeRole::Action, None),
            FlowNode::Conditional(block) => {
                let tag = Some(block.condition().path());
                let condition = self.leaf(block.condition(), NodeRole::Condition, tag);
                let choice = self.leaf(block.choice(), NodeRole::Choice, tag);
                let if_branch = self.layout_group(block.if_branch());
                let else_branch = self.layout_group(block.else_branch());

                let layout = self.layouter.if_else(
                    Some(&condition),
                    Some(&choice),
                    Some(&if_branch),
                    Some(&else_branch),
                );
                debug!(id = block.condition().path(); "Laid out conditional");

                composite(
                    block.condition().path(),
                    layout,
                    vec![condition, choice, if_branch, else_branch],
                )
            }
            FlowNode::Switch(block) => {
                let tag = Some(block.condition().path());
                let condition = self.leaf(block.condition(), NodeRole::Condition, tag);
                let choice = self.leaf(block.choice(), NodeRole::Choice, tag);
                let branch_nodes: Vec<_> = block
                    .branches()
                    .map(|branch| self.layout_group(branch.steps()))
                    .collect();

                let layout = {
                    let branches: Vec<_> = block
                        .branches()
                        .zip(&branch_nodes)
                        .map(|(branch, node)| Branch::new(branch.label(), Some(node)))
                        .collect();
                    self.layouter
                        .switch(Some(&condition), Some(&choice), &branches)
                };
                debug!(
                    id = block.condition().path(),
                    branches = branch_nodes.len();
                    "Laid out switch"
                );

                let mut children = Vec::with_capacity(branch_nodes.len() + 2);
                children.push(condition);
                children.push(choice);
                children.extend(branch_nodes);
                composite(block.condition().path(), layout, children)
            }
            FlowNode::Loop(block) => {
                let indicator = self.leaf(block.indicator(), NodeRole::LoopIndicator, None);
                let body = self.layout_group(block.body());

                let layout = self.layouter.foreach(Some(&indicator), Some(&body));
                debug!(id = block.indicator().path(); "Laid out loop");

                composite(block.indicator().path(), layout, vec![indicator, body])
            }
        }
    }

    /// Resolves a laid-out tree into canvas coordinates with its origin at `(0, 0)`.
    pub fn flatten(tree: &GraphNode<Block<'_>>) -> FlowGraph {
        let mut graph = FlowGraph {
            boundary: tree.boundary(),
            ..FlowGraph::default()
        };
        flatten_into(tree, Point::default(), &mut graph);
        graph
    }

    fn leaf<'t>(
        &self,
        node: &'t IndexedNode,
        role: NodeRole,
        tag: Option<&'t str>,
    ) -> GraphNode<Block<'t>> {
        GraphNode::new(
            node.path(),
            Block::Leaf { role, node, tag },
            self.measurer.measure(role),
        )
    }

    /// Lays out a step group as a sequence. Empty nested groups take no space.
    fn layout_group<'t>(&self, group: &'t StepGroup) -> GraphNode<Block<'t>> {
        let children: Vec<_> = group
            .steps()
            .iter()
            .map(|step| self.build_tree(step))
            .filter(|child| !child.boundary().is_empty())
            .collect();

        let layout = self.layouter.sequence(&children);
        trace!(id = group.path(), steps = children.len(); "Laid out step group");
        composite(group.path(), layout, children)
    }
}

fn composite<'t>(
    id: &str,
    layout: GraphLayout,
    children: Vec<GraphNode<Block<'t>>>,
) -> GraphNode<Block<'t>> {
    let boundary = layout.boundary();
    GraphNode::new(id, Block::Composite { layout, children }, boundary)
}

fn flatten_into(node: &GraphNode<Block<'_>>, origin: Point, graph: &mut FlowGraph) {
    match node.data() {
        Block::Leaf { role, node: indexed, tag } => graph.nodes.push(PlacedNode {
            id: indexed.path().to_string(),
            role: *role,
            json: indexed.json().clone(),
            rect: node.boundary().to_rect(origin),
            tag: tag.map(str::to_string),
        }),
        Block::Composite { layout, children } => {
            for child in children {
                match layout.placement(child.id()) {
                    Some(placement) => {
                        flatten_into(child, origin.add_point(placement.offset()), graph)
                    }
                    None => warn!(id = child.id(); "Child was not placed by its layouter"),
                }
            }

            for edge in layout.edges() {
                match (layout.anchor_point(edge.from()), layout.anchor_point(edge.to())) {
                    (Some(start), Some(end)) => graph.edges.push(PlacedEdge {
                        edge: edge.clone(),
                        start: origin.add_point(start),
                        end: origin.add_point(end),
                    }),
                    _ => warn!(edge = edge.id(); "Edge anchor could not be resolved"),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;
    use serde_json::json;

    use super::*;
    use crate::transform::transform;

    fn layout(dialog: &Value) -> FlowGraph {
        let flow = transform(Some(dialog), "").unwrap();
        FlowLayoutEngine::default().layout(&flow)
    }

    fn send(text: &str) -> Value {
        json!({ "$kind": "Microsoft.SendActivity", "activity": text })
    }

    #[test]
    fn test_sequence_positions_on_canvas() {
        let graph = layout(&json!({
            "$kind": "Microsoft.OnBeginDialog",
            "actions": [send("a"), send("b")],
        }));

        assert_eq!(graph.nodes().len(), 2);
        assert_eq!(graph.edges().len(), 1);
        let second = graph.node("actions[1]").unwrap();
        assert_approx_eq!(f32, second.rect().top(), 90.0);
        assert_approx_eq!(f32, second.rect().left(), 0.0);

        let edge = &graph.edges()[0];
        assert_eq!(edge.edge().id(), "actions[0]->actions[1]");
        assert_eq!(edge.start(), Point::new(90.0, 50.0));
        assert_eq!(edge.end(), Point::new(90.0, 90.0));
    }

    #[test]
    fn test_conditional_nodes_are_tagged() {
        let graph = layout(&json!({
            "$kind": "Microsoft.OnBeginDialog",
            "actions": [{
                "$kind": "Microsoft.IfCondition",
                "condition": "x",
                "actions": [send("t")],
                "elseActions": [send("f")],
            }],
        }));

        let roles: Vec<_> = graph.nodes().iter().map(PlacedNode::role).collect();
        assert_eq!(
            roles,
            vec![
                NodeRole::Condition,
                NodeRole::Choice,
                NodeRole::Action,
                NodeRole::Action
            ]
        );
        assert_eq!(graph.nodes()[0].tag(), Some("actions[0]"));
        assert_eq!(graph.nodes()[1].tag(), Some("actions[0]"));
        assert_eq!(graph.nodes()[2].tag(), None);

        let elements = graph.selector_elements();
        assert!(elements[0].shares_tag_with(&elements[1]));
        assert!(!elements[0].shares_tag_with(&elements[2]));
    }

    #[test]
    fn test_nested_layout_is_translated() {
        let graph = layout(&json!({
            "$kind": "Microsoft.OnBeginDialog",
            "actions": [
                send("first"),
                {
                    "$kind": "Microsoft.IfCondition",
                    "actions": [send("t")],
                    "elseActions": [send("f")],
                },
            ],
        }));

        // The conditional starts below the first action and is 400 wide,
        // so the 180-wide action is centered on the 200 spine.
        let first = graph.node("actions[0]").unwrap();
        assert_approx_eq!(f32, first.rect().left(), 110.0);

        let condition = graph.node("actions[1]").unwrap();
        assert_approx_eq!(f32, condition.rect().top(), 90.0);
        assert_approx_eq!(f32, condition.rect().left(), 110.0);

        let else_action = graph.node("actions[1].elseActions[0]").unwrap();
        assert_approx_eq!(f32, else_action.rect().top(), 90.0 + 120.0);
        assert_approx_eq!(f32, else_action.rect().left(), 220.0);

        let merge_out = graph
            .edges()
            .iter()
            .find(|edge| edge.edge().id() == "actions[1]/merge-out")
            .unwrap();
        assert_eq!(merge_out.end(), Point::new(200.0, 90.0 + 200.0));
    }

    #[test]
    fn test_empty_groups_take_no_space() {
        let graph = layout(&json!({
            "$kind": "Microsoft.AdaptiveDialog",
            "triggers": [
                { "$kind": "Microsoft.OnBeginDialog" },
                { "$kind": "Microsoft.OnIntent", "actions": [send("a")] },
            ],
        }));

        assert_eq!(graph.nodes().len(), 1);
        assert_approx_eq!(f32, graph.boundary().height(), 50.0);
        assert!(graph.edges().is_empty());
    }

    #[test]
    fn test_loop_back_edge_is_resolved() {
        let graph = layout(&json!({
            "$kind": "Microsoft.OnBeginDialog",
            "actions": [{ "$kind": "Microsoft.Foreach", "actions": [send("x")] }],
        }));

        assert_eq!(graph.nodes()[0].role(), NodeRole::LoopIndicator);
        let back = graph
            .edges()
            .iter()
            .find(|edge| edge.edge().style().is_dashed())
            .unwrap();
        // Body bottom center to indicator left center.
        assert_eq!(back.start(), Point::new(120.0, 110.0));
        assert_eq!(back.end(), Point::new(95.0, 10.0));
    }

    #[test]
    fn test_tab_order_follows_document_order() {
        let graph = layout(&json!({
            "$kind": "Microsoft.OnBeginDialog",
            "actions": [send("a"), send("b")],
        }));

        let mut generator = NodeIndexGenerator::default();
        generator.get_node_index("header");
        let items = graph.tab_order(&mut generator);

        let ids: Vec<_> = items.iter().map(NodeItem::id).collect();
        assert_eq!(ids, vec!["header", "actions[0]", "actions[1]"]);
    }

    #[test]
    fn test_empty_graph() {
        let graph = FlowGraph::empty();
        assert!(graph.is_empty());
        assert!(graph.boundary().is_empty());
        assert!(graph.selector_elements().is_empty());
    }
}
