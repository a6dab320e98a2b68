//! Tree-to-node transformation.
//!
//! [`transform`] walks a dialog document and produces a [`FlowNode`] tree in
//! which every renderable element is an [`IndexedNode`]: the raw JSON of the
//! element together with the path it was found at.
//!
//! # Paths
//!
//! A path is built by joining the parent path and the field name with `.`
//! (the field alone under an empty parent), and appending `[i]` for array
//! elements:
//!
//! ```text
//! ""          + actions[0] -> "actions[0]"
//! "events[0]" + actions[0] -> "events[0].actions[0]"
//! ```
//!
//! Parent paths are opaque. A parent that already carries bracketed indices
//! is extended verbatim and never re-parsed.

use log::trace;
use serde::Serialize;
use serde_json::Value;

use flowcanvas_parser::{
    DialogNode, Step,
    dialog::{Conditional, Loop, Switch, fields},
};

/// Label of the branch taken when no switch case matches.
pub const DEFAULT_CASE_LABEL: &str = "Default";

/// A raw dialog element paired with its path in the document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndexedNode {
    path: String,
    json: Value,
}

impl IndexedNode {
    pub fn new(path: impl Into<String>, json: Value) -> Self {
        Self {
            path: path.into(),
            json,
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn json(&self) -> &Value {
        &self.json
    }
}

/// An ordered list of steps found under one field.
///
/// `path` is the path of the list itself; its elements live at `path[i]`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StepGroup {
    path: String,
    steps: Vec<FlowNode>,
}

impl StepGroup {
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn steps(&self) -> &[FlowNode] {
        &self.steps
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

/// An if/else block.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConditionalBlock {
    condition: IndexedNode,
    choice: IndexedNode,
    if_branch: StepGroup,
    else_branch: StepGroup,
}

impl ConditionalBlock {
    /// The conditional action itself.
    pub fn condition(&self) -> &IndexedNode {
        &self.condition
    }

    /// The diamond showing the condition expression.
    pub fn choice(&self) -> &IndexedNode {
        &self.choice
    }

    pub fn if_branch(&self) -> &StepGroup {
        &self.if_branch
    }

    pub fn else_branch(&self) -> &StepGroup {
        &self.else_branch
    }
}

/// One labelled branch of a [`SwitchBlock`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CaseBranch {
    label: String,
    steps: StepGroup,
}

impl CaseBranch {
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn steps(&self) -> &StepGroup {
        &self.steps
    }
}

/// A multi-way switch block.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SwitchBlock {
    condition: IndexedNode,
    choice: IndexedNode,
    cases: Vec<CaseBranch>,
    default: CaseBranch,
}

impl SwitchBlock {
    pub fn condition(&self) -> &IndexedNode {
        &self.condition
    }

    pub fn choice(&self) -> &IndexedNode {
        &self.choice
    }

    pub fn cases(&self) -> &[CaseBranch] {
        &self.cases
    }

    /// The default branch, labelled [`DEFAULT_CASE_LABEL`].
    pub fn default_branch(&self) -> &CaseBranch {
        &self.default
    }

    /// Every branch in layout order: the cases followed by the default.
    pub fn branches(&self) -> impl Iterator<Item = &CaseBranch> {
        self.cases.iter().chain(std::iter::once(&self.default))
    }
}

/// A loop block.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoopBlock {
    indicator: IndexedNode,
    body: StepGroup,
}

impl LoopBlock {
    /// The loop action itself, drawn above the body.
    pub fn indicator(&self) -> &IndexedNode {
        &self.indicator
    }

    pub fn body(&self) -> &StepGroup {
        &self.body
    }
}

/// The transformed dialog tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "shape", rename_all = "camelCase")]
pub enum FlowNode {
    Steps(StepGroup),
    Action(IndexedNode),
    Conditional(ConditionalBlock),
    Switch(SwitchBlock),
    Loop(LoopBlock),
}

impl FlowNode {
    /// Every [`IndexedNode`] of the tree, depth-first in document order.
    pub fn indexed_nodes(&self) -> Vec<&IndexedNode> {
        let mut nodes = Vec::new();
        self.collect_indexed(&mut nodes);
        nodes
    }

    fn collect_indexed<'a>(&'a self, out: &mut Vec<&'a IndexedNode>) {
        match self {
            Self::Steps(group) => group.collect_indexed(out),
            Self::Action(node) => out.push(node),
            Self::Conditional(block) => {
                out.push(&block.condition);
                out.push(&block.choice);
                block.if_branch.collect_indexed(out);
                block.else_branch.collect_indexed(out);
            }
            Self::Switch(block) => {
                out.push(&block.condition);
                out.push(&block.choice);
                for branch in block.branches() {
                    branch.steps.collect_indexed(out);
                }
            }
            Self::Loop(block) => {
                out.push(&block.indicator);
                block.body.collect_indexed(out);
            }
        }
    }
}

impl StepGroup {
    fn collect_indexed<'a>(&'a self, out: &mut Vec<&'a IndexedNode>) {
        for step in &self.steps {
            step.collect_indexed(out);
        }
    }
}

/// Joins a parent path and a field name.
pub fn join_path(parent: &str, field: &str) -> String {
    if parent.is_empty() {
        field.to_string()
    } else {
        format!("{parent}.{field}")
    }
}

/// Path of element `index` of the list at `list_path`.
pub fn element_path(list_path: &str, index: usize) -> String {
    format!("{list_path}[{index}]")
}

/// Transform a dialog node found at `path`.
///
/// Returns `None` when there is nothing to render: the node is absent or
/// JSON `null`. Step-list nodes produce a [`FlowNode::Steps`] whose path is
/// `path` joined with their step field; every other shape produces
/// [`IndexedNode`]s rooted at `path` itself.
pub fn transform(node: Option<&Value>, path: &str) -> Option<FlowNode> {
    let shape = DialogNode::classify(node?)?;
    trace!(path = path, kind = shape.kind(); "Transforming node");

    let flow = match shape {
        DialogNode::StepList(list) => {
            FlowNode::Steps(transform_steps(list.steps(), &join_path(path, list.field())))
        }
        DialogNode::Conditional(conditional) => {
            FlowNode::Conditional(transform_conditional(&conditional, path))
        }
        DialogNode::Switch(switch) => FlowNode::Switch(transform_switch(&switch, path)),
        DialogNode::Loop(node) => FlowNode::Loop(transform_loop(&node, path)),
        DialogNode::Leaf(leaf) => FlowNode::Action(IndexedNode::new(path, leaf.node().clone())),
    };

    Some(flow)
}

fn transform_steps(steps: &[Step<'_>], list_path: &str) -> StepGroup {
    let steps = steps
        .iter()
        .enumerate()
        .filter_map(|(i, step)| {
            let value = step.to_value();
            transform(Some(value.as_ref()), &element_path(list_path, i))
        })
        .collect();

    StepGroup {
        path: list_path.to_string(),
        steps,
    }
}

fn choice_node(condition: Option<&Value>, path: &str) -> IndexedNode {
    IndexedNode::new(
        join_path(path, fields::CONDITION),
        condition.cloned().unwrap_or(Value::Null),
    )
}

fn transform_conditional(conditional: &Conditional<'_>, path: &str) -> ConditionalBlock {
    ConditionalBlock {
        condition: IndexedNode::new(path, conditional.node().clone()),
        choice: choice_node(conditional.condition(), path),
        if_branch: transform_steps(conditional.actions(), &join_path(path, fields::ACTIONS)),
        else_branch: transform_steps(
            conditional.else_actions(),
            &join_path(path, fields::ELSE_ACTIONS),
        ),
    }
}

fn transform_switch(switch: &Switch<'_>, path: &str) -> SwitchBlock {
    let cases = switch
        .cases()
        .iter()
        .enumerate()
        .map(|(i, case)| {
            let case_path = element_path(&join_path(path, fields::CASES), i);
            CaseBranch {
                label: case.label().to_string(),
                steps: transform_steps(case.actions(), &join_path(&case_path, fields::ACTIONS)),
            }
        })
        .collect();

    SwitchBlock {
        condition: IndexedNode::new(path, switch.node().clone()),
        choice: choice_node(switch.condition(), path),
        cases,
        default: CaseBranch {
            label: DEFAULT_CASE_LABEL.to_string(),
            steps: transform_steps(switch.default(), &join_path(path, fields::DEFAULT)),
        },
    }
}

fn transform_loop(node: &Loop<'_>, path: &str) -> LoopBlock {
    LoopBlock {
        indicator: IndexedNode::new(path, node.node().clone()),
        body: transform_steps(node.actions(), &join_path(path, fields::ACTIONS)),
    }
}
