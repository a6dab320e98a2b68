//! Graph primitives produced by the layouters.
//!
//! A [`GraphNode`] pairs an identifier and an opaque payload with a
//! [`Boundary`]. Layouters consume already-laid-out child nodes and produce a
//! [`GraphLayout`]: the parent boundary, the position of every child inside it
//! and the [`Edge`]s connecting them.
//!
//! Edges reference their endpoints symbolically through [`AnchorRef`], so a
//! layout can be resolved to absolute coordinates only once its own position
//! in the outer layout is known.

use serde::Serialize;

use crate::geometry::{Anchor, Boundary, Point};

/// A laid-out node: identifier, payload and boundary.
///
/// Nodes are never mutated after creation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphNode<D> {
    id: String,
    data: D,
    boundary: Boundary,
}

impl<D> GraphNode<D> {
    /// Creates a new node.
    pub fn new(id: impl Into<String>, data: D, boundary: Boundary) -> Self {
        Self {
            id: id.into(),
            data,
            boundary,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn data(&self) -> &D {
        &self.data
    }

    pub fn boundary(&self) -> Boundary {
        self.boundary
    }
}

/// The node an [`AnchorRef`] points into.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum NodeRef {
    /// A child node of the layout, by id.
    Node(String),
    /// The container being composed by the layouter itself.
    Container,
}

/// One end of an [`Edge`]: a node plus a named anchor on it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnchorRef {
    node: NodeRef,
    anchor: Anchor,
}

impl AnchorRef {
    /// Anchor on a child node.
    pub fn node(id: impl Into<String>, anchor: Anchor) -> Self {
        Self {
            node: NodeRef::Node(id.into()),
            anchor,
        }
    }

    /// Anchor on the container being composed.
    pub fn container(anchor: Anchor) -> Self {
        Self {
            node: NodeRef::Container,
            anchor,
        }
    }

    pub fn node_ref(&self) -> &NodeRef {
        &self.node
    }

    pub fn anchor(&self) -> Anchor {
        self.anchor
    }
}

/// The axis along which an edge is drawn first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeDirection {
    X,
    Y,
}

/// Presentation hints the renderer uses when painting an edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EdgeStyle {
    directed: bool,
    dashed: bool,
}

impl EdgeStyle {
    /// A solid connector, with or without an arrow head.
    pub fn solid(directed: bool) -> Self {
        Self {
            directed,
            dashed: false,
        }
    }

    /// A dashed connector, used for loop back edges.
    pub fn dashed(directed: bool) -> Self {
        Self {
            directed,
            dashed: true,
        }
    }

    pub fn is_directed(self) -> bool {
        self.directed
    }

    pub fn is_dashed(self) -> bool {
        self.dashed
    }
}

impl Default for EdgeStyle {
    fn default() -> Self {
        Self::solid(true)
    }
}

/// A typed connector between two anchors.
///
/// Edges exist only as layouter output.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Edge {
    id: String,
    from: AnchorRef,
    to: AnchorRef,
    direction: EdgeDirection,
    #[serde(skip_serializing_if = "Option::is_none")]
    label: Option<String>,
    style: EdgeStyle,
}

impl Edge {
    /// Creates a solid, directed, unlabelled edge.
    pub fn new(
        id: impl Into<String>,
        from: AnchorRef,
        to: AnchorRef,
        direction: EdgeDirection,
    ) -> Self {
        Self {
            id: id.into(),
            from,
            to,
            direction,
            label: None,
            style: EdgeStyle::default(),
        }
    }

    /// Sets the edge label (builder style).
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Sets the edge style (builder style).
    pub fn with_style(mut self, style: EdgeStyle) -> Self {
        self.style = style;
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn from(&self) -> &AnchorRef {
        &self.from
    }

    pub fn to(&self) -> &AnchorRef {
        &self.to
    }

    pub fn direction(&self) -> EdgeDirection {
        self.direction
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn style(&self) -> EdgeStyle {
        self.style
    }
}

/// Position of one child inside a [`GraphLayout`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Placement {
    id: String,
    offset: Point,
    boundary: Boundary,
}

impl Placement {
    /// Places a node with its top-left corner at `offset` from the container's top-left.
    pub fn new(id: impl Into<String>, offset: Point, boundary: Boundary) -> Self {
        Self {
            id: id.into(),
            offset,
            boundary,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn offset(&self) -> Point {
        self.offset
    }

    pub fn boundary(&self) -> Boundary {
        self.boundary
    }
}

/// The output of a layouter.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GraphLayout {
    boundary: Boundary,
    placements: Vec<Placement>,
    edges: Vec<Edge>,
}

impl GraphLayout {
    pub fn new(boundary: Boundary, placements: Vec<Placement>, edges: Vec<Edge>) -> Self {
        Self {
            boundary,
            placements,
            edges,
        }
    }

    /// Layout with an empty boundary, no placements and no edges.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn boundary(&self) -> Boundary {
        self.boundary
    }

    pub fn placements(&self) -> &[Placement] {
        &self.placements
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Returns the placement of the child with the given id.
    pub fn placement(&self, id: &str) -> Option<&Placement> {
        self.placements.iter().find(|placement| placement.id == id)
    }

    /// Resolves an anchor to a point relative to this layout's top-left corner.
    ///
    /// Returns `None` if the anchor names a child that was not placed.
    pub fn anchor_point(&self, anchor_ref: &AnchorRef) -> Option<Point> {
        match &anchor_ref.node {
            NodeRef::Container => Some(self.boundary.anchor(anchor_ref.anchor)),
            NodeRef::Node(id) => {
                let placement = self.placement(id)?;
                Some(
                    placement
                        .offset
                        .add_point(placement.boundary.anchor(anchor_ref.anchor)),
                )
            }
        }
    }
}
