//! Per-construct layouters.
//!
//! Each layouter consumes already laid-out child [`GraphNode`]s and returns a
//! [`GraphLayout`]: the composite boundary, the offset of every child inside
//! it and the edges connecting them. Layouters never fail. When a required
//! child is missing they return [`GraphLayout::empty`], so half-edited
//! documents still lay out.
//!
//! Layouters hold no state besides their spacing values; calling one twice
//! with equal inputs yields equal outputs.

use log::debug;

use flowcanvas_core::{
    geometry::{self, Anchor, Boundary, Point},
    graph::{AnchorRef, Edge, EdgeDirection, EdgeStyle, GraphLayout, GraphNode, Placement},
};

use crate::config::LayoutConfig;

/// Edge label for the branch taken when a condition holds.
pub const TRUE_LABEL: &str = "True";
/// Edge label for the branch taken when a condition does not hold.
pub const FALSE_LABEL: &str = "False";

/// A labelled branch of a switch.
#[derive(Debug)]
pub struct Branch<'n, D> {
    label: &'n str,
    node: Option<&'n GraphNode<D>>,
}

impl<'n, D> Branch<'n, D> {
    pub fn new(label: &'n str, node: Option<&'n GraphNode<D>>) -> Self {
        Self { label, node }
    }

    pub fn label(&self) -> &'n str {
        self.label
    }

    pub fn node(&self) -> Option<&'n GraphNode<D>> {
        self.node
    }
}

/// Geometry shared by the conditional and switch layouts.
struct BranchFrame {
    boundary: Boundary,
    placements: Vec<Placement>,
    /// Where the branch edges meet, on the spine.
    merge: Point,
    /// Spine point level with the bottom of the tallest branch.
    row_bottom: Point,
}

/// Composes child boundaries into construct layouts.
#[derive(Debug, Clone)]
pub struct Layouter {
    fixed_min_gap: f32,
    axis_min_separation: f32,
    element_interval_y: f32,
    choice_interval_y: f32,
    branch_interval_y: f32,
    merge_margin_y: f32,
    loop_edge_margin_x: f32,
}

impl Default for Layouter {
    fn default() -> Self {
        Self::new(&LayoutConfig::default())
    }
}

impl Layouter {
    pub fn new(config: &LayoutConfig) -> Self {
        Self {
            fixed_min_gap: config.fixed_min_gap(),
            axis_min_separation: config.axis_min_separation(),
            element_interval_y: config.element_interval_y(),
            choice_interval_y: config.choice_interval_y(),
            branch_interval_y: config.branch_interval_y(),
            merge_margin_y: config.merge_margin_y(),
            loop_edge_margin_x: config.loop_edge_margin_x(),
        }
    }

    /// Horizontal gap between two branches placed side by side.
    pub fn branch_interval(&self, left: Boundary, right: Boundary) -> f32 {
        geometry::branch_interval(left, right, self.fixed_min_gap, self.axis_min_separation)
    }

    /// Stacks nodes top to bottom on a single spine.
    ///
    /// The spine sits at the widest left half, so the first child is
    /// re-centred onto it when a later child is wider to the left.
    /// Consecutive nodes are joined by an edge with id `"{a}->{b}"`. An empty
    /// slice yields an empty layout.
    pub fn sequence<D>(&self, nodes: &[GraphNode<D>]) -> GraphLayout {
        if nodes.is_empty() {
            return GraphLayout::empty();
        }

        let boundaries: Vec<Boundary> = nodes.iter().map(GraphNode::boundary).collect();
        let (boundary, offsets) =
            geometry::stack_vertically(&boundaries, self.element_interval_y);

        let placements = nodes
            .iter()
            .zip(offsets)
            .map(|(node, offset)| Placement::new(node.id(), offset, node.boundary()))
            .collect();

        let edges = nodes
            .windows(2)
            .map(|pair| {
                let (from, to) = (&pair[0], &pair[1]);
                Edge::new(
                    format!("{}->{}", from.id(), to.id()),
                    AnchorRef::node(from.id(), Anchor::BottomCenter),
                    AnchorRef::node(to.id(), Anchor::TopCenter),
                    EdgeDirection::Y,
                )
            })
            .collect();

        GraphLayout::new(boundary, placements, edges)
    }

    /// Lays out an if/else block.
    ///
    /// The condition box sits on top with the choice diamond below it. The
    /// two branches share a row under the diamond and their edges meet at a
    /// merge point under the row. Always emits exactly seven edges, with ids
    /// prefixed by the condition's id.
    pub fn if_else<D>(
        &self,
        condition: Option<&GraphNode<D>>,
        choice: Option<&GraphNode<D>>,
        if_branch: Option<&GraphNode<D>>,
        else_branch: Option<&GraphNode<D>>,
    ) -> GraphLayout {
        let (Some(condition), Some(choice), Some(if_branch), Some(else_branch)) =
            (condition, choice, if_branch, else_branch)
        else {
            debug!("Conditional layout is missing a child, returning empty layout");
            return GraphLayout::empty();
        };

        let frame = self.branch_frame(condition, choice, &[if_branch, else_branch]);
        let id = condition.id();

        let edges = vec![
            Edge::new(
                format!("{id}/condition->choice"),
                AnchorRef::node(condition.id(), Anchor::BottomCenter),
                AnchorRef::node(choice.id(), Anchor::TopCenter),
                EdgeDirection::Y,
            ),
            Edge::new(
                format!("{id}/choice->if"),
                AnchorRef::node(choice.id(), Anchor::LeftCenter),
                AnchorRef::node(if_branch.id(), Anchor::TopCenter),
                EdgeDirection::X,
            )
            .with_label(TRUE_LABEL),
            Edge::new(
                format!("{id}/choice->else"),
                AnchorRef::node(choice.id(), Anchor::RightCenter),
                AnchorRef::node(else_branch.id(), Anchor::TopCenter),
                EdgeDirection::X,
            )
            .with_label(FALSE_LABEL),
            Edge::new(
                format!("{id}/if->merge"),
                AnchorRef::node(if_branch.id(), Anchor::BottomCenter),
                AnchorRef::container(Anchor::At(frame.merge)),
                EdgeDirection::Y,
            ),
            Edge::new(
                format!("{id}/else->merge"),
                AnchorRef::node(else_branch.id(), Anchor::BottomCenter),
                AnchorRef::container(Anchor::At(frame.merge)),
                EdgeDirection::Y,
            ),
            merge_in_edge(id, &frame),
            merge_out_edge(id, &frame),
        ];

        GraphLayout::new(frame.boundary, frame.placements, edges)
    }

    /// Lays out a multi-way switch.
    ///
    /// Same frame as [`Layouter::if_else`] with `N` branches in the row.
    /// Emits `2N + 3` edges: condition to choice, one edge from the choice to
    /// each branch (labelled with the branch label), one edge from each branch
    /// to the merge point and the two merge stubs. With no branches the merge
    /// point sits directly under the choice.
    pub fn switch<D>(
        &self,
        condition: Option<&GraphNode<D>>,
        choice: Option<&GraphNode<D>>,
        branches: &[Branch<'_, D>],
    ) -> GraphLayout {
        let (Some(condition), Some(choice)) = (condition, choice) else {
            debug!("Switch layout is missing its condition, returning empty layout");
            return GraphLayout::empty();
        };
        let Some(nodes) = branches
            .iter()
            .map(Branch::node)
            .collect::<Option<Vec<_>>>()
        else {
            debug!(branches = branches.len(); "Switch layout is missing a branch, returning empty layout");
            return GraphLayout::empty();
        };

        let frame = self.branch_frame(condition, choice, &nodes);
        let id = condition.id();

        let mut edges = Vec::with_capacity(2 * nodes.len() + 3);
        edges.push(Edge::new(
            format!("{id}/condition->choice"),
            AnchorRef::node(condition.id(), Anchor::BottomCenter),
            AnchorRef::node(choice.id(), Anchor::TopCenter),
            EdgeDirection::Y,
        ));
        for (i, (branch, node)) in branches.iter().zip(&nodes).enumerate() {
            edges.push(
                Edge::new(
                    format!("{id}/choice->branch[{i}]"),
                    AnchorRef::node(choice.id(), Anchor::BottomCenter),
                    AnchorRef::node(node.id(), Anchor::TopCenter),
                    EdgeDirection::Y,
                )
                .with_label(branch.label),
            );
        }
        for (i, node) in nodes.iter().enumerate() {
            edges.push(Edge::new(
                format!("{id}/branch[{i}]->merge"),
                AnchorRef::node(node.id(), Anchor::BottomCenter),
                AnchorRef::container(Anchor::At(frame.merge)),
                EdgeDirection::Y,
            ));
        }
        edges.push(merge_in_edge(id, &frame));
        edges.push(merge_out_edge(id, &frame));

        GraphLayout::new(frame.boundary, frame.placements, edges)
    }

    /// Lays out a loop: the indicator above the body.
    ///
    /// The body is offset by the loop edge margin so the dashed back edge,
    /// from the bottom of the body to the left of the indicator, has room on
    /// the left.
    pub fn foreach<D>(
        &self,
        indicator: Option<&GraphNode<D>>,
        body: Option<&GraphNode<D>>,
    ) -> GraphLayout {
        let (Some(indicator), Some(body)) = (indicator, body) else {
            debug!("Loop layout is missing a child, returning empty layout");
            return GraphLayout::empty();
        };

        let ind = indicator.boundary();
        let bd = body.boundary();

        let axis_x = ind
            .left_half_width()
            .max(self.loop_edge_margin_x + bd.left_half_width());
        let right = ind.right_half_width().max(bd.right_half_width());
        let body_y = ind.height() + self.element_interval_y;
        let height = body_y + bd.height() + self.merge_margin_y;

        let boundary = Boundary::new(axis_x + right, height, axis_x, ind.axis_y());
        let placements = vec![
            Placement::new(indicator.id(), Point::new(axis_x - ind.axis_x(), 0.0), ind),
            Placement::new(body.id(), Point::new(axis_x - bd.axis_x(), body_y), bd),
        ];

        let id = indicator.id();
        let edges = vec![
            Edge::new(
                format!("{id}/indicator->body"),
                AnchorRef::node(indicator.id(), Anchor::BottomCenter),
                AnchorRef::node(body.id(), Anchor::TopCenter),
                EdgeDirection::Y,
            ),
            Edge::new(
                format!("{id}/body->indicator"),
                AnchorRef::node(body.id(), Anchor::BottomCenter),
                AnchorRef::node(indicator.id(), Anchor::LeftCenter),
                EdgeDirection::X,
            )
            .with_style(EdgeStyle::dashed(true)),
        ];

        GraphLayout::new(boundary, placements, edges)
    }

    /// Places condition and choice on the spine and the branches in a row below.
    fn branch_frame<D>(
        &self,
        condition: &GraphNode<D>,
        choice: &GraphNode<D>,
        branches: &[&GraphNode<D>],
    ) -> BranchFrame {
        let cond = condition.boundary();
        let ch = choice.boundary();
        let row: Vec<Boundary> = branches.iter().map(|node| node.boundary()).collect();

        let offsets =
            geometry::distribute_horizontally(&row, self.fixed_min_gap, self.axis_min_separation);

        // Spine sits midway between the outermost branch axes.
        let (spine_in_row, row_width, tallest) = match (row.first(), row.last(), offsets.last()) {
            (Some(first), Some(last), Some(last_offset)) => (
                (first.axis_x() + last_offset + last.axis_x()) / 2.0,
                last_offset + last.width(),
                row.iter().map(|b| b.height()).fold(0.0, f32::max),
            ),
            _ => (0.0, 0.0, 0.0),
        };

        let left = spine_in_row
            .max(cond.left_half_width())
            .max(ch.left_half_width());
        let right = (row_width - spine_in_row)
            .max(cond.right_half_width())
            .max(ch.right_half_width());
        let row_shift = left - spine_in_row;

        let choice_y = cond.height() + self.choice_interval_y;
        let choice_bottom = choice_y + ch.height();
        let (row_top, row_bottom) = if row.is_empty() {
            (choice_bottom, choice_bottom)
        } else {
            let top = choice_bottom + self.branch_interval_y;
            (top, top + tallest)
        };
        let height = row_bottom + self.merge_margin_y;

        let mut placements = Vec::with_capacity(branches.len() + 2);
        placements.push(Placement::new(
            condition.id(),
            Point::new(left - cond.axis_x(), 0.0),
            cond,
        ));
        placements.push(Placement::new(
            choice.id(),
            Point::new(left - ch.axis_x(), choice_y),
            ch,
        ));
        for ((node, boundary), offset) in branches.iter().zip(&row).zip(&offsets) {
            placements.push(Placement::new(
                node.id(),
                Point::new(row_shift + offset, row_top),
                *boundary,
            ));
        }

        BranchFrame {
            boundary: Boundary::new(left + right, height, left, cond.axis_y()),
            placements,
            merge: Point::new(left, height - self.merge_margin_y / 2.0),
            row_bottom: Point::new(left, row_bottom),
        }
    }
}

fn merge_in_edge(id: &str, frame: &BranchFrame) -> Edge {
    Edge::new(
        format!("{id}/merge-in"),
        AnchorRef::container(Anchor::At(frame.row_bottom)),
        AnchorRef::container(Anchor::At(frame.merge)),
        EdgeDirection::Y,
    )
}

fn merge_out_edge(id: &str, frame: &BranchFrame) -> Edge {
    Edge::new(
        format!("{id}/merge-out"),
        AnchorRef::container(Anchor::At(frame.merge)),
        AnchorRef::container(Anchor::BottomCenter),
        EdgeDirection::Y,
    )
}


#[cfg(test)]
mod proptest_tests {
    use proptest::prelude::*;

    use super::*;

    // ===================
    // Strategies
    // ===================

    fn boundary_strategy() -> impl Strategy<Value = Boundary> {
        (1.0f32..400.0, 1.0f32..300.0, 0.0f32..1.0)
            .prop_map(|(w, h, ax)| Boundary::new(w, h, w * ax, h / 2.0))
    }

    fn branch_boundaries_strategy() -> impl Strategy<Value = Vec<Boundary>> {
        prop::collection::vec(boundary_strategy(), 0..6)
    }

    fn nodes(boundaries: &[Boundary]) -> Vec<GraphNode<()>> {
        boundaries
            .iter()
            .enumerate()
            .map(|(i, boundary)| GraphNode::new(format!("b{i}"), (), *boundary))
            .collect()
    }

    // ===================
    // Property Test Functions
    // ===================

    /// A conditional always has seven edges and contains all its children.
    fn check_if_else(
        cond: Boundary,
        choice: Boundary,
        left: Boundary,
        right: Boundary,
    ) -> Result<(), TestCaseError> {
        let c = GraphNode::new("c", (), cond);
        let ch = GraphNode::new("c.condition", (), choice);
        let t = GraphNode::new("t", (), left);
        let f = GraphNode::new("f", (), right);

        let layout = Layouter::default().if_else(Some(&c), Some(&ch), Some(&t), Some(&f));
        prop_assert_eq!(layout.edges().len(), 7);

        let boundary = layout.boundary();
        for placement in layout.placements() {
            prop_assert!(placement.offset().x() >= -0.01);
            prop_assert!(
                placement.offset().x() + placement.boundary().width() <= boundary.width() + 0.01
            );
            prop_assert!(
                placement.offset().y() + placement.boundary().height()
                    <= boundary.height() + 0.01
            );
        }

        let expected = cond.height()
            + CHOICE_GAP
            + choice.height()
            + BRANCH_GAP
            + left.height().max(right.height())
            + MERGE_GAP;
        prop_assert!((boundary.height() - expected).abs() < 0.05);
        Ok(())
    }

    /// A switch with N branches has 2N + 3 edges.
    fn check_switch_edge_count(branches: Vec<Boundary>) -> Result<(), TestCaseError> {
        let c = GraphNode::new("c", (), Boundary::centered(180.0, 50.0));
        let ch = GraphNode::new("c.condition", (), Boundary::centered(50.0, 20.0));
        let nodes = nodes(&branches);
        let branches: Vec<_> = nodes
            .iter()
            .map(|node| Branch::new(node.id(), Some(node)))
            .collect();

        let layout = Layouter::default().switch(Some(&c), Some(&ch), &branches);
        prop_assert_eq!(layout.edges().len(), 2 * branches.len() + 3);
        for edge in layout.edges() {
            prop_assert!(layout.anchor_point(edge.from()).is_some());
            prop_assert!(layout.anchor_point(edge.to()).is_some());
        }
        Ok(())
    }

    /// Sequence axis is the widest left half and every child sits on it.
    fn check_sequence_spine(boundaries: Vec<Boundary>) -> Result<(), TestCaseError> {
        let nodes = nodes(&boundaries);
        let layout = Layouter::default().sequence(&nodes);

        prop_assert_eq!(layout.edges().len(), nodes.len().saturating_sub(1));
        for placement in layout.placements() {
            let axis = placement.offset().x() + placement.boundary().axis_x();
            prop_assert!((axis - layout.boundary().axis_x()).abs() < 0.01);
        }
        Ok(())
    }

    const CHOICE_GAP: f32 = crate::layout::CHOICE_INTERVAL_Y;
    const BRANCH_GAP: f32 = crate::layout::BRANCH_INTERVAL_Y;
    const MERGE_GAP: f32 = crate::layout::MERGE_MARGIN_Y;

    // ===================
    // Proptest Wrappers
    // ===================

    proptest! {
        #[test]
        fn if_else_invariants(
            cond in boundary_strategy(),
            choice in boundary_strategy(),
            left in boundary_strategy(),
            right in boundary_strategy(),
        ) {
            check_if_else(cond, choice, left, right)?;
        }

        #[test]
        fn switch_edge_count(branches in branch_boundaries_strategy()) {
            check_switch_edge_count(branches)?;
        }

        #[test]
        fn sequence_spine(boundaries in branch_boundaries_strategy()) {
            check_sequence_spine(boundaries)?;
        }
    }
}
